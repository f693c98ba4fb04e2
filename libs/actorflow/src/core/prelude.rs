// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Commonly used types for `use actorflow::prelude::*`.

pub use crate::core::{
    // Errors
    error::{Result, StreamError},

    // Actor layer
    actor::{Actor, ActorContext},
    actor_ref::ActorRef,
    props::Props,
    system::ActorSystem,

    // Flows
    actor_flow::ActorFlow,
    config::FlowConfig,
    flow::{Flow, FlowInput, FlowOutput},
    materializer::Materializer,
    overflow::{OverflowStrategy, DEFAULT_BUFFER_SIZE},
};
