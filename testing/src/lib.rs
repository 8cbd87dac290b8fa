//! # Foodcart Testing
//!
//! Testing utilities and helpers for the foodcart state architecture.
//!
//! This crate provides:
//! - A Given-When-Then harness for pure reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//! - Tracing initialization for integration tests
//!
//! ## Example
//!
//! ```ignore
//! use foodcart_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(BuilderReducer)
//!     .with_env(test_environment())
//!     .given_state(BuilderState::default())
//!     .when_action(BuilderAction::Reset)
//!     .then_state(|state| assert!(state.is_empty()))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```


pub use reducer_test::{ReducerTest, assertions};

/// Initialize a tracing subscriber for tests
///
/// Safe to call from multiple tests; only the first call installs the
/// subscriber. Output goes through the test writer so it interleaves with
/// `cargo test` capture.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}
