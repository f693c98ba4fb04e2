// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod actor;
pub mod actor_flow;
pub mod actor_ref;
pub(crate) mod buffer;
pub mod config;
pub mod error;
pub mod flow;
pub(crate) mod mailbox;
pub mod materializer;
pub mod overflow;
pub mod prelude;
pub mod props;
pub mod source;
pub mod system;

pub use actor::{Actor, ActorContext};
pub use actor_flow::ActorFlow;
pub use actor_ref::ActorRef;
pub use config::FlowConfig;
pub use error::{Result, StreamError};
pub use flow::{Flow, FlowInput, FlowOutput};
pub use materializer::Materializer;
pub use overflow::{OverflowStrategy, DEFAULT_BUFFER_SIZE};
pub use props::Props;
pub use source::ActorSource;
pub use system::ActorSystem;
