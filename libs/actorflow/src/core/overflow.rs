// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

/// Output buffer size used when none is given explicitly.
pub const DEFAULT_BUFFER_SIZE: usize = 16;

/// Rule applied when the bounded output-side buffer of a flow is exceeded.
///
/// The mailbox path into a flow actor is unbounded; the output buffer is the
/// only place a bounded-resource policy applies. Backpressure is deliberately
/// not part of this enumeration: the feeding side is fire-and-forget, so
/// there is nothing to slow down. Callers needing flow control have to add
/// it outside the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowStrategy {
    /// Drop the oldest buffered element to make room for the new one.
    DropHead,
    /// Drop the youngest buffered element to make room for the new one.
    DropTail,
    /// Drop the entire buffer content, keeping only the new element.
    DropBuffer,
    /// Drop the incoming element, keeping the buffer as is.
    DropNew,
    /// Fail the stream. Buffered elements are discarded and the consumer
    /// observes a `BufferOverflow` error.
    #[default]
    Fail,
}
