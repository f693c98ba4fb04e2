// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Actor-backed bidirectional flows
//!
//! A [`Flow`] is a lazy blueprint: building one records configuration and
//! allocates nothing. [`Flow::run`] materializes it into a live pair of
//! endpoints:
//!
//! - [`FlowInput`]: elements pushed in are delivered to the flow actor's
//!   mailbox -- unbounded, fire-and-forget, no backpressure.
//! - [`FlowOutput`]: elements the actor sends to its output handle, pulled
//!   through the bounded output buffer.
//!
//! Exactly one flow actor exists per flow. The upstream is cancelled when
//! the actor terminates itself; there is no external cancellation API.

use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_util::{Sink, Stream};

use crate::core::actor_ref::ActorRef;
use crate::core::buffer::OutputBuffer;
use crate::core::error::{Result, StreamError};
use crate::core::materializer::Materializer;
use crate::core::overflow::OverflowStrategy;
use crate::core::props::Props;
use crate::core::source::ActorSource;
use crate::core::system::ActorSystem;

/// Lazy blueprint for an actor-backed flow.
///
/// Built by [`ActorFlow`](crate::core::actor_flow::ActorFlow); consumed by
/// [`Flow::run`]. The props factory is invoked exactly once, at
/// materialization.
pub struct Flow<In, Out> {
    props_factory: Box<dyn FnOnce(ActorRef<Out>) -> Props<In> + Send>,
    source: ActorSource<Out>,
    system: ActorSystem,
    materializer: Materializer,
}

impl<In, Out> Flow<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    pub(crate) fn new(
        props_factory: Box<dyn FnOnce(ActorRef<Out>) -> Props<In> + Send>,
        buffer_size: usize,
        strategy: OverflowStrategy,
        system: ActorSystem,
        materializer: Materializer,
    ) -> Self {
        Self {
            props_factory,
            source: ActorSource::new(buffer_size, strategy),
            system,
            materializer,
        }
    }

    /// Output buffer size this flow will materialize with.
    pub fn buffer_size(&self) -> usize {
        self.source.buffer_size()
    }

    /// Overflow strategy this flow will materialize with.
    pub fn overflow_strategy(&self) -> OverflowStrategy {
        self.source.overflow_strategy()
    }

    /// Materialize the flow.
    ///
    /// Spawns the output-side buffer actor, calls the props factory with its
    /// handle, spawns the flow actor, and wires termination mirroring: when
    /// the flow actor terminates the output side completes (draining its
    /// buffer) and the input side is cancelled; when the output side fails
    /// the flow actor is stopped.
    ///
    /// # Errors
    /// Fails when the actor system refuses a spawn (shut down).
    pub fn run(self) -> Result<(FlowInput<In>, FlowOutput<Out>)> {
        let (out_ref, output) = self.source.materialize(&self.system)?;
        let props = (self.props_factory)(out_ref.clone());
        let flow_ref = match self.system.spawn(&props) {
            Ok(flow_ref) => flow_ref,
            Err(err) => {
                out_ref.stop();
                return Err(err);
            }
        };

        let input = FlowInput::new(flow_ref.clone());
        self.materializer.spawn(async move {
            tokio::select! {
                _ = flow_ref.terminated() => {
                    tracing::debug!(actor = %flow_ref.name(), "flow actor terminated, completing output");
                    out_ref.stop();
                }
                _ = out_ref.terminated() => {
                    tracing::debug!(actor = %out_ref.name(), "output side terminated, stopping flow actor");
                    flow_ref.stop();
                }
            }
        });

        Ok((input, output))
    }
}

impl<In, Out> fmt::Debug for Flow<In, Out>
where
    In: Send + 'static,
    Out: Send + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Flow")
            .field("buffer_size", &self.source.buffer_size())
            .field("overflow_strategy", &self.source.overflow_strategy())
            .finish_non_exhaustive()
    }
}

/// Input side of a materialized flow.
///
/// Pushes are fire-and-forget into the flow actor's mailbox: they never
/// block and never apply backpressure. Once the actor has terminated the
/// input is cancelled and pushes are rejected.
pub struct FlowInput<In> {
    target: ActorRef<In>,
}

impl<In: Send + 'static> FlowInput<In> {
    pub(crate) fn new(target: ActorRef<In>) -> Self {
        Self { target }
    }

    /// Deliver an element to the flow actor.
    ///
    /// # Errors
    /// Returns `StreamError::Cancelled` once the flow actor has terminated.
    pub fn push(&self, element: In) -> Result<()> {
        if self.target.is_terminated() {
            return Err(StreamError::Cancelled(
                "flow actor has terminated".to_string(),
            ));
        }
        self.target.tell(element);
        Ok(())
    }

    /// Signal that no more elements will be pushed; stops the flow actor.
    pub fn complete(&self) {
        self.target.stop();
    }

    /// Whether the upstream has been cancelled by actor termination.
    pub fn is_cancelled(&self) -> bool {
        self.target.is_terminated()
    }

    /// Wait until the upstream is cancelled.
    pub async fn cancelled(&self) {
        self.target.terminated().await;
    }
}

impl<In: Send + 'static> Sink<In> for FlowInput<In> {
    type Error = StreamError;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        if self.target.is_terminated() {
            Poll::Ready(Err(StreamError::Cancelled(
                "flow actor has terminated".to_string(),
            )))
        } else {
            Poll::Ready(Ok(()))
        }
    }

    fn start_send(self: Pin<&mut Self>, item: In) -> Result<()> {
        self.push(item)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        // Nothing to flush: delivery into the mailbox is immediate.
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<()>> {
        self.complete();
        Poll::Ready(Ok(()))
    }
}

impl<In: Send + 'static> fmt::Debug for FlowInput<In> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowInput")
            .field("target", &self.target.name())
            .finish()
    }
}

/// Output side of a materialized flow.
///
/// Yields `Ok` elements in emission order, then a recorded failure (at most
/// once), then end-of-stream. Single consumer.
pub struct FlowOutput<Out> {
    buffer: Arc<OutputBuffer<Out>>,
}

impl<Out: Send + 'static> FlowOutput<Out> {
    pub(crate) fn new(buffer: Arc<OutputBuffer<Out>>) -> Self {
        Self { buffer }
    }
}

impl<Out: Send + 'static> Stream for FlowOutput<Out> {
    type Item = std::result::Result<Out, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.buffer.poll_next(cx)
    }
}

impl<Out> fmt::Debug for FlowOutput<Out> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowOutput").finish_non_exhaustive()
    }
}
