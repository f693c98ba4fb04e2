//! Bounded output-side buffer
//!
//! The single bounded resource in a flow. Elements emitted by the flow actor
//! land here until the consumer polls them off; when the buffer is full the
//! configured [`OverflowStrategy`] decides what gives.
//!
//! Key properties:
//! - Fixed capacity, chosen at materialization time
//! - Completion drains the remaining queue before ending the stream
//! - Failure preempts queued elements (the queue is discarded)
//! - Thread-safe (Mutex'd state, stored consumer waker)
//!
//! Capacity is deliberately not validated. A non-positive size is
//! runtime-defined behavior: with capacity 0 every push overflows, which
//! under the `Fail` strategy fails the stream on the first element.

use std::collections::VecDeque;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;

use crate::core::error::StreamError;
use crate::core::overflow::OverflowStrategy;

/// What happened to a pushed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PushOutcome {
    /// The element is in the buffer (possibly at the cost of a dropped one).
    Accepted,
    /// The element was dropped, the buffer is unchanged.
    Dropped,
    /// The push overflowed under `Fail`; the stream is now failed.
    Failed,
}

struct BufferState<T> {
    queue: VecDeque<T>,
    completed: bool,
    failed: bool,
    failure: Option<StreamError>,
    waker: Option<Waker>,
}

impl<T> BufferState<T> {
    fn wake(&mut self) {
        if let Some(waker) = self.waker.take() {
            waker.wake();
        }
    }
}

pub(crate) struct OutputBuffer<T> {
    capacity: usize,
    strategy: OverflowStrategy,
    state: Mutex<BufferState<T>>,
}

impl<T> OutputBuffer<T> {
    pub(crate) fn new(capacity: usize, strategy: OverflowStrategy) -> Self {
        Self {
            capacity,
            strategy,
            state: Mutex::new(BufferState {
                queue: VecDeque::new(),
                completed: false,
                failed: false,
                failure: None,
                waker: None,
            }),
        }
    }

    /// Offer an element, applying the overflow strategy when full.
    pub(crate) fn push(&self, element: T) -> PushOutcome {
        let mut state = self.state.lock();
        if state.failed || state.completed {
            return PushOutcome::Dropped;
        }
        if state.queue.len() < self.capacity {
            state.queue.push_back(element);
            state.wake();
            return PushOutcome::Accepted;
        }
        match self.strategy {
            OverflowStrategy::DropHead => {
                state.queue.pop_front();
                state.queue.push_back(element);
                tracing::trace!("buffer full, dropped oldest element");
                state.wake();
                PushOutcome::Accepted
            }
            OverflowStrategy::DropTail => {
                state.queue.pop_back();
                state.queue.push_back(element);
                tracing::trace!("buffer full, dropped youngest element");
                state.wake();
                PushOutcome::Accepted
            }
            OverflowStrategy::DropBuffer => {
                let dropped = state.queue.len();
                state.queue.clear();
                state.queue.push_back(element);
                tracing::trace!(dropped, "buffer full, dropped buffer content");
                state.wake();
                PushOutcome::Accepted
            }
            OverflowStrategy::DropNew => {
                tracing::trace!("buffer full, dropped incoming element");
                PushOutcome::Dropped
            }
            OverflowStrategy::Fail => {
                state.queue.clear();
                state.failed = true;
                state.failure = Some(StreamError::BufferOverflow(format!(
                    "output buffer overflowed (capacity {})",
                    self.capacity
                )));
                state.wake();
                PushOutcome::Failed
            }
        }
    }

    /// End the stream once the remaining queue has drained. A no-op after a
    /// failure, which keeps the recorded error observable.
    pub(crate) fn complete(&self) {
        let mut state = self.state.lock();
        if state.failed {
            return;
        }
        state.completed = true;
        state.wake();
    }

    /// Stream-style poll: queued elements first, then the recorded failure
    /// (delivered once), then end-of-stream.
    pub(crate) fn poll_next(&self, cx: &mut Context<'_>) -> Poll<Option<Result<T, StreamError>>> {
        let mut state = self.state.lock();
        if let Some(element) = state.queue.pop_front() {
            return Poll::Ready(Some(Ok(element)));
        }
        if state.failed {
            return match state.failure.take() {
                Some(err) => Poll::Ready(Some(Err(err))),
                None => Poll::Ready(None),
            };
        }
        if state.completed {
            return Poll::Ready(None);
        }
        state.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
