// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Flow adapter
//!
//! Builds a [`Flow`] whose element-producing side is backed by an actor.
//! The props factory receives the handle of the output side: every value the
//! spawned actor sends to that handle is emitted downstream. Elements pushed
//! into the flow are delivered to the actor's mailbox with no backpressure;
//! if the actor is slow they queue up unboundedly. The upstream is cancelled
//! by the actor terminating itself.
//!
//! These constructors only record configuration -- no actor is created and
//! no buffer allocated until the returned flow is run. They perform no
//! validation either; anything questionable (such as a zero buffer size) is
//! forwarded and surfaces from the runtime at materialization or streaming
//! time.

use crate::core::actor_ref::ActorRef;
use crate::core::config::FlowConfig;
use crate::core::flow::Flow;
use crate::core::materializer::Materializer;
use crate::core::overflow::{OverflowStrategy, DEFAULT_BUFFER_SIZE};
use crate::core::props::Props;
use crate::core::system::ActorSystem;

/// Constructors for actor-backed flows.
pub struct ActorFlow;

impl ActorFlow {
    /// Create a flow handled by an actor, with the default output buffer of
    /// [`DEFAULT_BUFFER_SIZE`] elements and the [`OverflowStrategy::Fail`]
    /// policy: the stream fails once more than 16 unconsumed elements
    /// accumulate on the output side.
    ///
    /// Equivalent to
    /// `actor_ref_with(props, DEFAULT_BUFFER_SIZE, OverflowStrategy::Fail, ..)`.
    pub fn actor_ref<In, Out, F>(
        props: F,
        system: &ActorSystem,
        materializer: &Materializer,
    ) -> Flow<In, Out>
    where
        In: Send + 'static,
        Out: Send + 'static,
        F: FnOnce(ActorRef<Out>) -> Props<In> + Send + 'static,
    {
        Self::actor_ref_with(
            props,
            DEFAULT_BUFFER_SIZE,
            OverflowStrategy::Fail,
            system,
            materializer,
        )
    }

    /// Create a flow handled by an actor, with an explicit output buffer
    /// size and overflow strategy.
    ///
    /// `props` must not retain the handle beyond the actor's lifetime. The
    /// buffer size is forwarded as given.
    pub fn actor_ref_with<In, Out, F>(
        props: F,
        buffer_size: usize,
        overflow_strategy: OverflowStrategy,
        system: &ActorSystem,
        materializer: &Materializer,
    ) -> Flow<In, Out>
    where
        In: Send + 'static,
        Out: Send + 'static,
        F: FnOnce(ActorRef<Out>) -> Props<In> + Send + 'static,
    {
        Flow::new(
            Box::new(props),
            buffer_size,
            overflow_strategy,
            system.clone(),
            materializer.clone(),
        )
    }

    /// Create a flow with buffering parameters taken from a [`FlowConfig`].
    pub fn from_config<In, Out, F>(
        props: F,
        config: &FlowConfig,
        system: &ActorSystem,
        materializer: &Materializer,
    ) -> Flow<In, Out>
    where
        In: Send + 'static,
        Out: Send + 'static,
        F: FnOnce(ActorRef<Out>) -> Props<In> + Send + 'static,
    {
        Self::actor_ref_with(
            props,
            config.buffer_size,
            config.overflow_strategy,
            system,
            materializer,
        )
    }
}
