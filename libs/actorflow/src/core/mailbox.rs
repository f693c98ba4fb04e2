//! Unbounded actor mailboxes
//!
//! Key properties:
//! - Unbounded queueing, fire-and-forget delivery
//! - No backpressure: a slow actor accumulates messages, it never slows
//!   the sender down
//! - Sends to a terminated actor are dead letters, never errors
//!
//! The only bounded buffer in a flow is the output-side buffer; see
//! `core::buffer` for the overflow policy applied there.

use tokio::sync::mpsc;

/// A message envelope as it travels through a mailbox.
///
/// `Stop` is the control signal injected by `ActorRef::stop` and system
/// shutdown; it terminates the receive loop without draining later messages.
pub(crate) enum Envelope<M> {
    User(M),
    Stop,
}

/// Sending half of a mailbox. Cheap to clone.
pub(crate) struct MailboxSender<M> {
    tx: mpsc::UnboundedSender<Envelope<M>>,
}

impl<M> Clone for MailboxSender<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M: Send> MailboxSender<M> {
    /// Enqueue an envelope. Returns false if the receiving actor is gone.
    pub(crate) fn send(&self, envelope: Envelope<M>) -> bool {
        self.tx.send(envelope).is_ok()
    }
}

/// Receiving half of a mailbox, owned by the actor's event loop.
pub(crate) struct Mailbox<M> {
    rx: mpsc::UnboundedReceiver<Envelope<M>>,
}

impl<M: Send> Mailbox<M> {
    /// Receive the next envelope, or None once every sender is gone.
    pub(crate) async fn recv(&mut self) -> Option<Envelope<M>> {
        self.rx.recv().await
    }
}

/// Create a connected mailbox pair.
pub(crate) fn channel<M: Send>() -> (MailboxSender<M>, Mailbox<M>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MailboxSender { tx }, Mailbox { rx })
}
