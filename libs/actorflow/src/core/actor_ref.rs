// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Addressable actor handles

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;

use crate::core::mailbox::{Envelope, MailboxSender};

/// Addressable reference to a spawned actor.
///
/// Cloning is cheap; all clones address the same mailbox. `tell` is
/// fire-and-forget with no backpressure: messages queue unboundedly in the
/// actor's mailbox regardless of processing speed. A message sent after the
/// actor has terminated is a dead letter -- it is dropped and logged, never
/// an error.
pub struct ActorRef<M> {
    name: Arc<str>,
    sender: MailboxSender<M>,
    terminated: watch::Receiver<bool>,
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
            terminated: self.terminated.clone(),
        }
    }
}

impl<M: Send + 'static> ActorRef<M> {
    pub(crate) fn new(
        name: Arc<str>,
        sender: MailboxSender<M>,
        terminated: watch::Receiver<bool>,
    ) -> Self {
        Self {
            name,
            sender,
            terminated,
        }
    }

    /// The actor's path-style name, e.g. `system/user/3`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Send a message, fire-and-forget.
    pub fn tell(&self, msg: M) {
        if !self.sender.send(Envelope::User(msg)) {
            tracing::debug!(actor = %self.name, "dead letter: mailbox closed");
        }
    }

    /// Whether the actor has left its receive loop.
    pub fn is_terminated(&self) -> bool {
        *self.terminated.borrow()
    }

    /// Wait until the actor has terminated.
    pub async fn terminated(&self) {
        let mut rx = self.terminated.clone();
        while !*rx.borrow() {
            // A dropped sender means the actor task is gone as well.
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Inject the stop control signal. Queued user messages behind it are
    /// discarded.
    pub(crate) fn stop(&self) {
        let _ = self.sender.send(Envelope::Stop);
    }
}

impl<M> fmt::Debug for ActorRef<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorRef")
            .field("name", &self.name)
            .field("terminated", &*self.terminated.borrow())
            .finish()
    }
}
