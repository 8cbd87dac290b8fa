//! Confirmed orders and the submission pipeline slice.
//!
//! The pipeline holds at most one submission in flight. A `Submit` while one
//! is pending is dropped on the floor; the guard lives here because this slice
//! owns `is_submitting`.

use crate::api::AppEnvironment;
use crate::error::ApiError;
use crate::ingredient::IngredientId;
use chrono::{DateTime, Utc};
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effect, Effects, SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Server-assigned order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fulfilment status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Accepted but not yet queued.
    Created,
    /// Being prepared.
    Pending,
    /// Ready.
    Done,
}

/// One confirmed order, as it appears in submissions and the public feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Server-assigned identifier.
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Current fulfilment status.
    pub status: OrderStatus,
    /// Display name assigned by the server.
    pub name: String,
    /// Catalog ids of the ingredients, in submission order.
    pub ingredients: Vec<IngredientId>,
    /// Creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    /// Short human-facing order number.
    pub number: u32,
}

/// State of the submission pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPipelineState {
    /// A submission is currently on the wire.
    pub is_submitting: bool,
    /// Last confirmed order, kept until dismissed.
    pub confirmed: Option<Order>,
    /// Failure of the most recent submission, cleared on the next attempt.
    pub error: Option<ApiError>,
}

/// Actions accepted by [`OrderReducer`].
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Send the composed ingredient sequence to the server.
    Submit {
        /// Catalog ids in bun-items-bun order.
        ingredient_ids: Vec<IngredientId>,
    },
    /// The server accepted the submission.
    Confirmed(Order),
    /// The submission failed.
    Rejected(ApiError),
    /// Clear the confirmation (and any stale error).
    DismissConfirmed,
}

/// Reducer for the order submission pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderReducer;

impl Reducer for OrderReducer {
    type State = OrderPipelineState;
    type Action = OrderAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            OrderAction::Submit { ingredient_ids } => {
                if state.is_submitting {
                    tracing::debug!("submission already in flight, dropping duplicate");
                    return SmallVec::new();
                }

                state.is_submitting = true;
                state.error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.submit_order(ingredient_ids).await {
                        Ok(order) => Some(OrderAction::Confirmed(order)),
                        Err(error) => Some(OrderAction::Rejected(error)),
                    }
                })]
            },
            OrderAction::Confirmed(order) => {
                tracing::info!(number = order.number, "order confirmed");
                state.is_submitting = false;
                state.confirmed = Some(order);
                SmallVec::new()
            },
            OrderAction::Rejected(error) => {
                tracing::warn!(%error, "order submission failed");
                state.is_submitting = false;
                state.error = Some(error);
                SmallVec::new()
            },
            OrderAction::DismissConfirmed => {
                state.confirmed = None;
                state.error = None;
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::mocks::{StubApi, order_fixture, test_environment};
    use foodcart_testing::ReducerTest;

    fn submit(ids: &[&str]) -> OrderAction {
        OrderAction::Submit {
            ingredient_ids: ids.iter().map(|id| IngredientId::from(*id)).collect(),
        }
    }

    #[test]
    fn submit_marks_pending_and_clears_stale_error() {
        ReducerTest::new(OrderReducer)
            .with_env(test_environment(StubApi::default()))
            .given_state(OrderPipelineState {
                error: Some(ApiError::transport("old failure")),
                ..OrderPipelineState::default()
            })
            .when_action(submit(&["bun", "patty", "bun"]))
            .then_state(|state| {
                assert!(state.is_submitting);
                assert!(state.error.is_none());
            })
            .then_effects(|effects| assert_eq!(effects.len(), 1))
            .run();
    }

    #[test]
    fn duplicate_submit_produces_no_effect() {
        ReducerTest::new(OrderReducer)
            .with_env(test_environment(StubApi::default()))
            .given_state(OrderPipelineState {
                is_submitting: true,
                ..OrderPipelineState::default()
            })
            .when_action(submit(&["bun", "bun"]))
            .then_state(|state| assert!(state.is_submitting))
            .then_effects(|effects| assert!(effects.is_empty()))
            .run();
    }

    #[test]
    fn confirmation_stores_order_and_clears_pending() {
        let order = order_fixture(42);
        let expected = order.clone();
        ReducerTest::new(OrderReducer)
            .with_env(test_environment(StubApi::default()))
            .given_state(OrderPipelineState {
                is_submitting: true,
                ..OrderPipelineState::default()
            })
            .when_action(OrderAction::Confirmed(order))
            .then_state(move |state| {
                assert!(!state.is_submitting);
                assert_eq!(state.confirmed.as_ref(), Some(&expected));
            })
            .then_effects(|effects| assert!(effects.is_empty()))
            .run();
    }

    #[test]
    fn rejection_records_error_and_allows_retry() {
        ReducerTest::new(OrderReducer)
            .with_env(test_environment(StubApi::default()))
            .given_state(OrderPipelineState {
                is_submitting: true,
                ..OrderPipelineState::default()
            })
            .when_action(OrderAction::Rejected(ApiError::server("kitchen closed")))
            .then_state(|state| {
                assert!(!state.is_submitting);
                assert_eq!(state.error, Some(ApiError::server("kitchen closed")));
            })
            .run();
    }

    #[test]
    fn dismiss_is_idempotent() {
        ReducerTest::new(OrderReducer)
            .with_env(test_environment(StubApi::default()))
            .given_state(OrderPipelineState::default())
            .when_action(OrderAction::DismissConfirmed)
            .when_action(OrderAction::DismissConfirmed)
            .then_state(|state| {
                assert!(state.confirmed.is_none());
                assert!(state.error.is_none());
            })
            .then_effects(|effects| assert!(effects.is_empty()))
            .run();
    }
}
