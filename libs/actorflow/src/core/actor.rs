//! Actor trait and execution context
//!
//! An actor is a message-driven unit of computation with private state and a
//! mailbox, processing one message at a time. Actors are described by a
//! [`Props`](crate::core::props::Props) recipe and instantiated by an
//! [`ActorSystem`](crate::core::system::ActorSystem) when spawned.

use crate::core::actor_ref::ActorRef;

/// A message-driven unit of computation.
///
/// `receive` is invoked for one message at a time; the actor owns its state
/// exclusively while running, so no synchronization is needed inside.
///
/// Lifecycle hooks mirror the runtime's setup/teardown pattern: `started`
/// runs before the first message, `stopped` after the last one.
pub trait Actor: Send + 'static {
    /// The message type this actor processes.
    type Message: Send + 'static;

    /// Handle a single message.
    fn receive(&mut self, ctx: &mut ActorContext<Self::Message>, msg: Self::Message);

    /// Called once before the first message is processed.
    fn started(&mut self, _ctx: &mut ActorContext<Self::Message>) {}

    /// Called once after the actor leaves its receive loop.
    fn stopped(&mut self) {}
}

/// Execution context handed to an actor during its lifecycle hooks and
/// `receive` calls.
pub struct ActorContext<M> {
    self_ref: ActorRef<M>,
    stopping: bool,
}

impl<M: Send + 'static> ActorContext<M> {
    pub(crate) fn new(self_ref: ActorRef<M>) -> Self {
        Self {
            self_ref,
            stopping: false,
        }
    }

    /// The handle other parties use to send messages to this actor.
    pub fn self_ref(&self) -> &ActorRef<M> {
        &self.self_ref
    }

    /// Request self-directed termination.
    ///
    /// The actor finishes the current message and leaves its receive loop;
    /// messages still queued in the mailbox are discarded. This is the only
    /// cancellation path a flow actor has.
    pub fn stop(&mut self) {
        self.stopping = true;
    }

    pub(crate) fn is_stopping(&self) -> bool {
        self.stopping
    }
}

/// Object-safe erasure of [`Actor`] so `Props<M>` and the spawn machinery are
/// independent of the concrete actor type.
pub(crate) trait DynActor<M>: Send {
    fn started(&mut self, ctx: &mut ActorContext<M>);
    fn receive(&mut self, ctx: &mut ActorContext<M>, msg: M);
    fn stopped(&mut self);
}

impl<A: Actor> DynActor<A::Message> for A {
    fn started(&mut self, ctx: &mut ActorContext<A::Message>) {
        Actor::started(self, ctx);
    }

    fn receive(&mut self, ctx: &mut ActorContext<A::Message>, msg: A::Message) {
        Actor::receive(self, ctx, msg);
    }

    fn stopped(&mut self) {
        Actor::stopped(self);
    }
}
