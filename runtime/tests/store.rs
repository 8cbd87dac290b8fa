//! Integration tests for the Store dispatch loop
//!
//! Covers effect feedback, completion tracking, action broadcasting, and
//! graceful shutdown.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use foodcart_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use foodcart_runtime::{Store, StoreConfig, StoreError};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start an async operation
    Start,
    /// Operation finished (terminal action)
    Finished(u32),
    /// Pure increment, no effect
    Bump,
    /// Start an operation that never produces an action
    StartSilent,
    /// Fan out two async operations at once
    StartParallel,
    /// Run two async operations strictly one after the other
    StartSequential,
}

#[derive(Debug, Clone, Default)]
struct TestState {
    counter: u32,
    finished: Vec<u32>,
}

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = ();

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Start => {
                state.counter += 1;
                let value = state.counter;
                smallvec![Effect::future(async move {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Some(TestAction::Finished(value))
                })]
            },
            TestAction::Finished(value) => {
                state.finished.push(value);
                smallvec![Effect::None]
            },
            TestAction::Bump => {
                state.counter += 1;
                smallvec![Effect::None]
            },
            TestAction::StartSilent => {
                smallvec![Effect::future(async {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    None
                })]
            },
            TestAction::StartParallel => {
                smallvec![Effect::merge(vec![
                    Effect::future(async {
                        tokio::time::sleep(Duration::from_millis(20)).await;
                        Some(TestAction::Finished(1))
                    }),
                    Effect::future(async {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        Some(TestAction::Finished(2))
                    }),
                ])]
            },
            TestAction::StartSequential => {
                // The first step is the slower one: only sequencing can make
                // it finish before the second.
                smallvec![Effect::chain(vec![
                    Effect::future(async {
                        tokio::time::sleep(Duration::from_millis(30)).await;
                        Some(TestAction::Finished(1))
                    }),
                    Effect::future(async { Some(TestAction::Finished(2)) }),
                ])]
            },
        }
    }
}

fn test_store() -> Store<TestState, TestAction, (), TestReducer> {
    Store::new(TestState::default(), TestReducer, ())
}

#[tokio::test]
async fn send_applies_reducer_synchronously() {
    let store = test_store();

    store.send(TestAction::Bump).await.unwrap();
    store.send(TestAction::Bump).await.unwrap();

    assert_eq!(store.state(|s| s.counter).await, 2);
}

#[tokio::test]
async fn effect_handle_waits_for_feedback_action() {
    let store = test_store();

    let mut handle = store.send(TestAction::Start).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    // The terminal action has been reduced by the time the handle resolves.
    assert_eq!(store.state(|s| s.finished.clone()).await, vec![1]);
}

#[tokio::test]
async fn effect_handle_completes_for_silent_effects() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartSilent).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(store.state(|s| s.counter).await, 0);
}

#[tokio::test]
async fn send_and_wait_for_returns_matching_terminal_action() {
    let store = test_store();

    let result = store
        .send_and_wait_for(
            TestAction::Start,
            |a| matches!(a, TestAction::Finished(_)),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, TestAction::Finished(1));
    // State was updated before the broadcast was observed.
    assert_eq!(store.state(|s| s.finished.clone()).await, vec![1]);
}

#[tokio::test]
async fn send_and_wait_for_times_out_without_match() {
    let store = test_store();

    let result = store
        .send_and_wait_for(
            TestAction::Bump,
            |a| matches!(a, TestAction::Finished(_)),
            Duration::from_millis(50),
        )
        .await;

    assert!(matches!(result, Err(StoreError::Timeout)));
}

#[tokio::test]
async fn subscribe_actions_observes_effect_output() {
    let store = test_store();
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(TestAction::Start).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    assert_eq!(rx.recv().await.unwrap(), TestAction::Finished(1));
}

#[tokio::test]
async fn parallel_effects_all_feed_back_before_handle_resolves() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartParallel).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let mut finished = store.state(|s| s.finished.clone()).await;
    finished.sort_unstable();
    assert_eq!(finished, vec![1, 2]);
}

#[tokio::test]
async fn sequential_effects_run_in_order() {
    let store = test_store();

    let mut handle = store.send(TestAction::StartSequential).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    // The slow first step settled before the instant second one started.
    assert_eq!(store.state(|s| s.finished.clone()).await, vec![1, 2]);
}

#[tokio::test]
async fn shutdown_rejects_new_actions() {
    let store = test_store();

    store.shutdown().await.unwrap();

    let result = store.send(TestAction::Bump).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}

#[tokio::test]
async fn shutdown_waits_for_pending_effects() {
    let store = test_store();

    store.send(TestAction::Start).await.unwrap();
    store.shutdown().await.unwrap();

    // The in-flight effect ran to completion, but its terminal action was
    // rejected by the shutdown flag: no cancellation, but no late mutation.
    assert_eq!(store.state(|s| s.finished.clone()).await, Vec::<u32>::new());
}

#[tokio::test]
async fn shutdown_times_out_with_stuck_effect() {
    #[derive(Clone)]
    struct StuckReducer;

    impl Reducer for StuckReducer {
        type State = ();
        type Action = ();
        type Environment = ();

        fn reduce(
            &self,
            _state: &mut Self::State,
            (): Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            smallvec![Effect::future(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                None
            })]
        }
    }

    let config = StoreConfig::default().with_shutdown_timeout(Duration::from_millis(50));
    let store = Store::with_config((), StuckReducer, (), config);

    store.send(()).await.unwrap();
    let result = store.shutdown().await;

    assert!(matches!(result, Err(StoreError::ShutdownTimeout(1))));
}
