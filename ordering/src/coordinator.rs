//! Cross-slice reactions.
//!
//! Slices never reach into each other's state. When one slice must react to
//! another's action, the rule lives here and runs inside the same dispatch
//! turn, before the action is delegated, so no observer can see the two
//! updates apart.

use crate::api::AppEnvironment;
use crate::app::{AppAction, AppState};
use crate::builder::{BuilderAction, BuilderReducer};
use crate::order::OrderAction;
use foodcart_core::reducer::Reducer;

/// Resets the builder when an order is confirmed.
///
/// This is the only cross-slice rule: a confirmed order means the draft it
/// was composed from is spent. Rejections leave the draft intact so the user
/// can retry without rebuilding.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderCoordinator;

impl OrderCoordinator {
    /// Apply cross-slice reactions for `action` before delegation.
    pub fn intercept(&self, state: &mut AppState, action: &AppAction, env: &AppEnvironment) {
        if let AppAction::Order(OrderAction::Confirmed(order)) = action {
            tracing::info!(number = order.number, "order confirmed, resetting builder");
            let _ = BuilderReducer.reduce(&mut state.builder, BuilderAction::Reset, env);
        }
    }
}
