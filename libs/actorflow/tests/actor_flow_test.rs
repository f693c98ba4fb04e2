//! Flow Adapter Integration Test
//!
//! Exercises the adapter contract end to end:
//! 1. Defaulting law (defaulted constructor == explicit 16/fail)
//! 2. Laziness (nothing is instantiated until the flow is run)
//! 3. Overflow failure under the `fail` policy
//! 4. Upstream cancellation through actor self-termination
//! 5. Handle identity (the factory's handle feeds the output)
//! 6. Identity flow round trip

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::Arc;

use actorflow::{
    Actor, ActorContext, ActorFlow, ActorRef, ActorSystem, FlowConfig, Materializer,
    OverflowStrategy, Props, StreamError, DEFAULT_BUFFER_SIZE,
};
use futures_util::{SinkExt, StreamExt};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// =============================================================================
// Test-only actors
// =============================================================================

/// Forwards every inbound element to the output handle (identity flow).
struct ForwardActor {
    out: ActorRef<u64>,
}

impl Actor for ForwardActor {
    type Message = u64;

    fn receive(&mut self, _ctx: &mut ActorContext<u64>, msg: u64) {
        self.out.tell(msg);
    }
}

fn forward(out: ActorRef<u64>) -> Props<u64> {
    Props::new(move || ForwardActor { out: out.clone() })
}

/// Emits `msg` consecutive numbers to the output handle per inbound element.
struct BurstActor {
    out: ActorRef<u64>,
}

impl Actor for BurstActor {
    type Message = u64;

    fn receive(&mut self, _ctx: &mut ActorContext<u64>, msg: u64) {
        for i in 0..msg {
            self.out.tell(i);
        }
    }
}

/// Forwards the first element, then terminates itself.
struct OneShotActor {
    out: ActorRef<u64>,
}

impl Actor for OneShotActor {
    type Message = u64;

    fn receive(&mut self, ctx: &mut ActorContext<u64>, msg: u64) {
        self.out.tell(msg);
        ctx.stop();
    }
}

/// Ignores its input entirely; the output is driven from outside.
struct SilentActor;

impl Actor for SilentActor {
    type Message = ();

    fn receive(&mut self, _ctx: &mut ActorContext<()>, _msg: ()) {}
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn defaulted_constructor_equals_explicit_16_fail() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let defaulted = ActorFlow::actor_ref(forward, &system, &materializer);
    let explicit = ActorFlow::actor_ref_with(
        forward,
        DEFAULT_BUFFER_SIZE,
        OverflowStrategy::Fail,
        &system,
        &materializer,
    );

    assert_eq!(defaulted.buffer_size(), 16);
    assert_eq!(defaulted.overflow_strategy(), OverflowStrategy::Fail);
    assert_eq!(defaulted.buffer_size(), explicit.buffer_size());
    assert_eq!(defaulted.overflow_strategy(), explicit.overflow_strategy());

    // FlowConfig's defaults encode the same pair.
    let config = FlowConfig::default();
    assert_eq!(config.buffer_size, defaulted.buffer_size());
    assert_eq!(config.overflow_strategy, defaulted.overflow_strategy());
}

#[tokio::test]
async fn flow_endpoints_format_with_debug() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let flow = ActorFlow::actor_ref(forward, &system, &materializer);
    let rendered = format!("{flow:?}");
    assert!(rendered.contains("buffer_size: 16"), "got {rendered}");
    assert!(rendered.contains("Fail"), "got {rendered}");

    let (input, output) = flow.run().unwrap();
    assert!(format!("{input:?}").contains("FlowInput"));
    assert!(format!("{output:?}").contains("FlowOutput"));
}

#[tokio::test]
async fn adapter_call_instantiates_nothing() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let factory_calls = Arc::new(AtomicU64::new(0));
    let constructions = Arc::new(AtomicU64::new(0));

    let flow = ActorFlow::actor_ref(
        {
            let factory_calls = Arc::clone(&factory_calls);
            let constructions = Arc::clone(&constructions);
            move |out: ActorRef<u64>| {
                factory_calls.fetch_add(1, Ordering::SeqCst);
                let constructions = Arc::clone(&constructions);
                Props::new(move || {
                    constructions.fetch_add(1, Ordering::SeqCst);
                    ForwardActor { out: out.clone() }
                })
            }
        },
        &system,
        &materializer,
    );

    assert_eq!(factory_calls.load(Ordering::SeqCst), 0);
    assert_eq!(constructions.load(Ordering::SeqCst), 0);

    let (_input, _output) = flow.run().unwrap();

    // Exactly one flow actor per flow, created at materialization.
    assert_eq!(factory_calls.load(Ordering::SeqCst), 1);
    assert_eq!(constructions.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn overflow_under_fail_policy_fails_the_stream() {
    init_tracing();
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let flow = ActorFlow::actor_ref_with(
        |out: ActorRef<u64>| Props::new(move || BurstActor { out: out.clone() }),
        2,
        OverflowStrategy::Fail,
        &system,
        &materializer,
    );
    let (input, mut output) = flow.run().unwrap();

    // Three emissions with no consumer attached: the third overflows.
    input.push(3).unwrap();
    input.cancelled().await;

    match output.next().await {
        Some(Err(StreamError::BufferOverflow(_))) => {}
        other => panic!("expected buffer overflow failure, got {:?}", other),
    }
    assert!(output.next().await.is_none());
}

#[tokio::test]
async fn self_termination_cancels_upstream_and_completes() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let flow = ActorFlow::actor_ref(
        |out: ActorRef<u64>| Props::new(move || OneShotActor { out: out.clone() }),
        &system,
        &materializer,
    );
    let (input, mut output) = flow.run().unwrap();

    input.push(7).unwrap();
    input.cancelled().await;
    assert!(input.is_cancelled());

    match input.push(8) {
        Err(StreamError::Cancelled(_)) => {}
        other => panic!("expected cancellation, got {:?}", other),
    }

    // The element emitted before termination still drains, then the flow
    // completes without accepting more.
    match output.next().await {
        Some(Ok(7)) => {}
        other => panic!("expected the forwarded element, got {:?}", other),
    }
    assert!(output.next().await.is_none());
}

#[tokio::test]
async fn factory_handle_feeds_the_output() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let (handle_tx, handle_rx) = mpsc::channel();
    let flow = ActorFlow::actor_ref(
        move |out: ActorRef<u64>| {
            handle_tx.send(out.clone()).unwrap();
            Props::new(|| SilentActor)
        },
        &system,
        &materializer,
    );
    // Lazy: the factory has not run yet, so no handle exists.
    assert!(handle_rx.try_recv().is_err());

    let (_input, mut output) = flow.run().unwrap();
    let out = handle_rx.try_recv().unwrap();

    out.tell(42);
    match output.next().await {
        Some(Ok(42)) => {}
        other => panic!("expected the value sent to the handle, got {:?}", other),
    }
}

#[tokio::test]
async fn identity_flow_preserves_order() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let flow = ActorFlow::actor_ref(forward, &system, &materializer);
    let (input, mut output) = flow.run().unwrap();

    for i in 0..5u64 {
        input.push(i).unwrap();
    }
    for i in 0..5u64 {
        match output.next().await {
            Some(Ok(v)) if v == i => {}
            other => panic!("expected {} in order, got {:?}", i, other),
        }
    }

    input.complete();
    assert!(output.next().await.is_none());
}

#[tokio::test]
async fn sink_and_stream_trait_surface() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let flow = ActorFlow::actor_ref(forward, &system, &materializer);
    let (input, output) = flow.run().unwrap();

    let mut input = input;
    input.send(1).await.unwrap();
    input.send(2).await.unwrap();
    input.close().await.unwrap();

    let collected: Vec<u64> = output.map(|element| element.unwrap()).collect().await;
    assert_eq!(collected, vec![1, 2]);
}

#[tokio::test]
async fn config_driven_flow_applies_drop_new() {
    let system = ActorSystem::new("flows").unwrap();
    let materializer = Materializer::new().unwrap();

    let config: FlowConfig =
        serde_json::from_str(r#"{"buffer_size": 2, "overflow_strategy": "drop-new"}"#).unwrap();

    let (handle_tx, handle_rx) = mpsc::channel();
    let flow = ActorFlow::from_config(
        move |out: ActorRef<u64>| {
            handle_tx.send(out.clone()).unwrap();
            Props::new(|| SilentActor)
        },
        &config,
        &system,
        &materializer,
    );
    assert_eq!(flow.buffer_size(), 2);
    assert_eq!(flow.overflow_strategy(), OverflowStrategy::DropNew);

    let (input, output) = flow.run().unwrap();
    let out = handle_rx.try_recv().unwrap();

    for i in 0..5u64 {
        out.tell(i);
    }
    input.complete();
    out.terminated().await;

    // drop-new keeps the two oldest elements and drops the rest.
    let collected: Vec<u64> = output.map(|element| element.unwrap()).collect().await;
    assert_eq!(collected, vec![0, 1]);
}
