// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Actor-fed stream source
//!
//! [`ActorSource`] is the construction primitive the flow adapter forwards
//! into: a blueprint for an output-side buffer fed by an actor handle.
//! Materializing it spawns an internal buffer actor whose mailbox *is* the
//! handle -- sending a value to the handle is emitting an element
//! downstream.

use std::marker::PhantomData;
use std::sync::Arc;

use crate::core::actor::{Actor, ActorContext};
use crate::core::actor_ref::ActorRef;
use crate::core::buffer::{OutputBuffer, PushOutcome};
use crate::core::error::Result;
use crate::core::flow::FlowOutput;
use crate::core::overflow::OverflowStrategy;
use crate::core::props::Props;
use crate::core::system::ActorSystem;

/// Blueprint for an actor-fed source with a bounded output buffer.
///
/// Holding an `ActorSource` allocates nothing; resources are created by
/// [`ActorSource::materialize`].
#[derive(Debug)]
pub struct ActorSource<Out> {
    buffer_size: usize,
    strategy: OverflowStrategy,
    _elements: PhantomData<fn() -> Out>,
}

impl<Out: Send + 'static> ActorSource<Out> {
    pub fn new(buffer_size: usize, strategy: OverflowStrategy) -> Self {
        Self {
            buffer_size,
            strategy,
            _elements: PhantomData,
        }
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn overflow_strategy(&self) -> OverflowStrategy {
        self.strategy
    }

    /// Spawn the buffer actor and hand out the feeding handle together with
    /// the consuming stream.
    ///
    /// # Errors
    /// Fails when the actor system refuses the spawn (shut down).
    pub fn materialize(&self, system: &ActorSystem) -> Result<(ActorRef<Out>, FlowOutput<Out>)> {
        let buffer = Arc::new(OutputBuffer::new(self.buffer_size, self.strategy));
        let props = Props::new({
            let buffer = Arc::clone(&buffer);
            move || BufferActor {
                buffer: Arc::clone(&buffer),
            }
        });
        let handle = system.spawn(&props)?;
        Ok((handle, FlowOutput::new(buffer)))
    }
}

/// Internal actor bridging a mailbox to the output buffer.
///
/// Stops itself when a push fails the stream, and completes the buffer when
/// it terminates (draining whatever is still queued).
struct BufferActor<Out> {
    buffer: Arc<OutputBuffer<Out>>,
}

impl<Out: Send + 'static> Actor for BufferActor<Out> {
    type Message = Out;

    fn receive(&mut self, ctx: &mut ActorContext<Out>, msg: Out) {
        if self.buffer.push(msg) == PushOutcome::Failed {
            tracing::warn!(actor = %ctx.self_ref().name(), "output buffer overflow, failing stream");
            ctx.stop();
        }
    }

    fn stopped(&mut self) {
        self.buffer.complete();
    }
}
