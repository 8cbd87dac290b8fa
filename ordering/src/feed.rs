//! Public order feed slice.

use crate::api::AppEnvironment;
use crate::error::ApiError;
use crate::order::Order;
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effect, Effects, SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One snapshot of the public feed, replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSnapshot {
    /// Recent orders, newest first.
    pub orders: Vec<Order>,
    /// Orders placed since the beginning of time.
    pub total: u64,
    /// Orders placed today.
    #[serde(rename = "totalToday")]
    pub total_today: u64,
}

/// State of the public feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// A refresh is in flight. Starts `true`: the feed loads on entry.
    pub is_loading: bool,
    /// Failure of the most recent refresh.
    pub error: Option<ApiError>,
    /// Last snapshot received.
    pub snapshot: FeedSnapshot,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            is_loading: true,
            error: None,
            snapshot: FeedSnapshot::default(),
        }
    }
}

/// Three-phase feed refresh.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedAction {
    /// Start a refresh.
    Fetch,
    /// The refresh succeeded.
    Loaded(FeedSnapshot),
    /// The refresh failed.
    Failed(ApiError),
}

/// Reducer for the public feed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeedReducer;

impl Reducer for FeedReducer {
    type State = FeedState;
    type Action = FeedAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            FeedAction::Fetch => {
                state.is_loading = true;
                state.error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.fetch_feed().await {
                        Ok(snapshot) => Some(FeedAction::Loaded(snapshot)),
                        Err(error) => Some(FeedAction::Failed(error)),
                    }
                })]
            },
            FeedAction::Loaded(snapshot) => {
                tracing::debug!(
                    orders = snapshot.orders.len(),
                    total = snapshot.total,
                    "feed refreshed"
                );
                state.is_loading = false;
                state.error = None;
                state.snapshot = snapshot;
                SmallVec::new()
            },
            FeedAction::Failed(error) => {
                tracing::warn!(%error, "feed refresh failed");
                state.is_loading = false;
                state.error = Some(error);
                SmallVec::new()
            },
        }
    }
}
