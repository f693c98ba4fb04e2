// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Actor execution context
//!
//! The [`ActorSystem`] owns actor instantiation and scheduling. It is an
//! explicitly passed context object -- never an ambient global -- so tests
//! can construct throwaway systems on their own runtime.
//!
//! Each spawned actor runs as a tokio task: one logical thread per actor,
//! multiplexed over the runtime's worker pool.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::core::actor::ActorContext;
use crate::core::actor_ref::ActorRef;
use crate::core::error::{Result, StreamError};
use crate::core::mailbox::{self, Envelope};
use crate::core::props::Props;

struct ActorEntry {
    id: u64,
    name: Arc<str>,
    stop: Box<dyn Fn() + Send + Sync>,
    terminated: watch::Receiver<bool>,
}

struct SystemShared {
    name: Arc<str>,
    handle: Handle,
    actors: Mutex<Vec<ActorEntry>>,
    next_id: AtomicU64,
    shutdown: AtomicBool,
}

/// Factory and supervisor context for actors.
///
/// Created at application startup and torn down with [`shutdown`]
/// (ActorSystem::shutdown). Cloning shares the same underlying system.
#[derive(Clone)]
pub struct ActorSystem {
    inner: Arc<SystemShared>,
}

impl ActorSystem {
    /// Create a system bound to the current tokio runtime.
    ///
    /// # Errors
    /// Returns `StreamError::Configuration` when called outside a tokio
    /// runtime; use [`ActorSystem::with_handle`] in that case.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| {
            StreamError::Configuration(
                "ActorSystem::new requires a running tokio runtime (use with_handle instead)"
                    .to_string(),
            )
        })?;
        Ok(Self::with_handle(name, handle))
    }

    /// Create a system bound to an explicit runtime handle.
    pub fn with_handle(name: impl Into<String>, handle: Handle) -> Self {
        let name: Arc<str> = name.into().into();
        tracing::debug!(system = %name, "actor system created");
        Self {
            inner: Arc::new(SystemShared {
                name,
                handle,
                actors: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    /// System name, used as the prefix of actor names.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The runtime handle actors are scheduled on.
    pub fn handle(&self) -> &Handle {
        &self.inner.handle
    }

    /// Number of live (not yet terminated) actors.
    ///
    /// Terminated actors are pruned from the registry as their receive loop
    /// exits, so a long-lived system does not accumulate entries.
    pub fn actor_count(&self) -> usize {
        self.inner.actors.lock().len()
    }

    fn prune(shared: &Weak<SystemShared>, id: u64) {
        if let Some(shared) = shared.upgrade() {
            shared.actors.lock().retain(|entry| entry.id != id);
        }
    }

    /// Instantiate an actor from its recipe and start its receive loop.
    ///
    /// The actor instance is constructed synchronously, before this method
    /// returns; the receive loop then runs as a tokio task until the actor
    /// stops itself, receives the stop signal, or every handle is dropped.
    ///
    /// # Errors
    /// Returns `StreamError::Runtime` once the system has been shut down.
    pub fn spawn<M: Send + 'static>(&self, props: &Props<M>) -> Result<ActorRef<M>> {
        if self.inner.shutdown.load(Ordering::SeqCst) {
            return Err(StreamError::Runtime(format!(
                "actor system '{}' is shut down",
                self.name()
            )));
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let name: Arc<str> = format!("{}/user/{}", self.inner.name, id).into();
        let (sender, mut mailbox) = mailbox::channel::<M>();
        let (term_tx, term_rx) = watch::channel(false);
        let actor_ref = ActorRef::new(Arc::clone(&name), sender, term_rx.clone());

        let mut actor = props.produce();
        let mut ctx = ActorContext::new(actor_ref.clone());
        tracing::debug!(actor = %name, "spawning actor");

        // Register before the task starts, so a short-lived actor cannot
        // terminate (and prune itself) ahead of its own registration.
        self.inner.actors.lock().push(ActorEntry {
            id,
            name,
            stop: {
                let actor_ref = actor_ref.clone();
                Box::new(move || actor_ref.stop())
            },
            terminated: term_rx,
        });

        let shared = Arc::downgrade(&self.inner);
        self.inner.handle.spawn(async move {
            actor.started(&mut ctx);
            while !ctx.is_stopping() {
                match mailbox.recv().await {
                    Some(Envelope::User(msg)) => actor.receive(&mut ctx, msg),
                    Some(Envelope::Stop) | None => break,
                }
            }
            actor.stopped();
            tracing::debug!(actor = %ctx.self_ref().name(), "actor terminated");
            // Drop the registry entry before the termination flag flips, so
            // anyone awaiting termination observes the pruned registry.
            Self::prune(&shared, id);
            let _ = term_tx.send(true);
        });

        Ok(actor_ref)
    }

    /// Signal every live actor to stop and refuse further spawns.
    ///
    /// Returns immediately; use [`ActorSystem::terminated`] to wait for the
    /// actors to finish.
    pub fn shutdown(&self) {
        if self.inner.shutdown.swap(true, Ordering::SeqCst) {
            return;
        }
        let actors = self.inner.actors.lock();
        tracing::info!(system = %self.name(), actors = actors.len(), "shutting down actor system");
        for entry in actors.iter() {
            tracing::debug!(actor = %entry.name, "stop signal");
            (entry.stop)();
        }
    }

    /// Wait until every actor spawned so far has terminated.
    pub async fn terminated(&self) {
        let watches: Vec<watch::Receiver<bool>> = self
            .inner
            .actors
            .lock()
            .iter()
            .map(|entry| entry.terminated.clone())
            .collect();
        for mut rx in watches {
            while !*rx.borrow() {
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    }
}

impl std::fmt::Debug for ActorSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorSystem")
            .field("name", &self.inner.name)
            .field("actors", &self.inner.actors.lock().len())
            .field("shutdown", &self.inner.shutdown.load(Ordering::SeqCst))
            .finish()
    }
}
