// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Stream execution runtime handle

use std::fmt;
use std::future::Future;

use tokio::runtime::Handle;

use crate::core::error::{Result, StreamError};

/// Handle to the runtime that executes materialized flows.
///
/// Like [`ActorSystem`](crate::core::system::ActorSystem) this is an
/// explicitly passed context object; flows capture a clone at adapter-call
/// time and use it when they are run.
#[derive(Clone)]
pub struct Materializer {
    handle: Handle,
}

impl Materializer {
    /// Bind to the current tokio runtime.
    ///
    /// # Errors
    /// Returns `StreamError::Configuration` when called outside a tokio
    /// runtime; use [`Materializer::with_handle`] in that case.
    pub fn new() -> Result<Self> {
        let handle = Handle::try_current().map_err(|_| {
            StreamError::Configuration(
                "Materializer::new requires a running tokio runtime (use with_handle instead)"
                    .to_string(),
            )
        })?;
        Ok(Self::with_handle(handle))
    }

    /// Bind to an explicit runtime handle.
    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }

    /// The underlying runtime handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub(crate) fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.handle.spawn(fut);
    }
}

impl fmt::Debug for Materializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Materializer").finish_non_exhaustive()
    }
}
