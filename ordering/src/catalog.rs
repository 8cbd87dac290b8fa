//! Ingredient catalog slice.

use crate::api::AppEnvironment;
use crate::error::ApiError;
use crate::ingredient::Ingredient;
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effect, Effects, SmallVec, smallvec};
use std::sync::Arc;

/// State of the ingredient catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogState {
    /// A fetch is in flight. Starts `true`: the catalog loads on startup.
    pub is_loading: bool,
    /// Failure of the most recent fetch.
    pub error: Option<ApiError>,
    /// The loaded catalog, replaced wholesale on each successful fetch.
    pub items: Vec<Ingredient>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            is_loading: true,
            error: None,
            items: Vec::new(),
        }
    }
}

/// Three-phase catalog fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Start a fetch.
    Fetch,
    /// The fetch succeeded.
    Loaded(Vec<Ingredient>),
    /// The fetch failed.
    Failed(ApiError),
}

/// Reducer for the ingredient catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogReducer;

impl Reducer for CatalogReducer {
    type State = CatalogState;
    type Action = CatalogAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            CatalogAction::Fetch => {
                state.is_loading = true;
                state.error = None;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.fetch_ingredients().await {
                        Ok(items) => Some(CatalogAction::Loaded(items)),
                        Err(error) => Some(CatalogAction::Failed(error)),
                    }
                })]
            },
            CatalogAction::Loaded(items) => {
                tracing::debug!(count = items.len(), "catalog loaded");
                state.is_loading = false;
                state.error = None;
                state.items = items;
                SmallVec::new()
            },
            CatalogAction::Failed(error) => {
                tracing::warn!(%error, "catalog fetch failed");
                state.is_loading = false;
                state.error = Some(error);
                SmallVec::new()
            },
        }
    }
}
