//! Flow configuration types

use serde::{Deserialize, Serialize};

use crate::core::overflow::{OverflowStrategy, DEFAULT_BUFFER_SIZE};

/// Buffering parameters for an actor-backed flow.
///
/// Fields left out of a config file fall back to the adapter defaults
/// (buffer of 16, fail on overflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Maximum number of elements the output side may hold.
    pub buffer_size: usize,
    /// Rule applied when the output buffer is exceeded.
    pub overflow_strategy: OverflowStrategy,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            overflow_strategy: OverflowStrategy::Fail,
        }
    }
}
