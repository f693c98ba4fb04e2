// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Actor-backed bidirectional stream flows.
//!
//! The entry point is [`ActorFlow`]: given a props factory
//! `(ActorRef<Out>) -> Props<In>`, it builds a lazy [`Flow`] whose output
//! side is driven by messages the spawned actor sends to the handle passed
//! into the factory. See the `core::actor_flow` module docs for the
//! delivery and cancellation contract.

// Suppress pedantic clippy warnings that are intentional design choices
#![allow(clippy::type_complexity)] // Boxed factory signatures are clear in context

pub mod core;

pub use core::prelude;
pub use core::{
    Actor, ActorContext, ActorFlow, ActorRef, ActorSource, ActorSystem, Flow, FlowConfig,
    FlowInput, FlowOutput, Materializer, OverflowStrategy, Props, Result, StreamError,
    DEFAULT_BUFFER_SIZE,
};
