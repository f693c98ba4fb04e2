use std::fmt;
use std::sync::Arc;

use crate::core::actor::{Actor, DynActor};

/// Immutable recipe for constructing an actor.
///
/// A `Props` carries no running state; it only records how to build an actor
/// instance. Instantiation happens at spawn time, inside
/// [`ActorSystem::spawn`](crate::core::system::ActorSystem::spawn) -- holding
/// or cloning a `Props` allocates nothing.
pub struct Props<M> {
    producer: Arc<dyn Fn() -> Box<dyn DynActor<M>> + Send + Sync>,
}

impl<M: Send + 'static> Props<M> {
    /// Create a recipe from an actor constructor.
    pub fn new<A, F>(producer: F) -> Self
    where
        A: Actor<Message = M>,
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(move || Box::new(producer()) as Box<dyn DynActor<M>>),
        }
    }

    pub(crate) fn produce(&self) -> Box<dyn DynActor<M>> {
        (self.producer)()
    }
}

impl<M> Clone for Props<M> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<M> fmt::Debug for Props<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Props").finish_non_exhaustive()
    }
}
