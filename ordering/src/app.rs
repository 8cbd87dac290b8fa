//! Application composition: one state tree, one action enum, one reducer.
//!
//! `AppReducer` owns no logic of its own beyond two things slices cannot do
//! alone: running the cross-slice coordinator, and composing a submission
//! from the builder draft (which the order pipeline must not read).

use crate::api::AppEnvironment;
use crate::builder::{BuilderAction, BuilderReducer, BuilderState};
use crate::catalog::{CatalogAction, CatalogReducer, CatalogState};
use crate::coordinator::OrderCoordinator;
use crate::error::ApiError;
use crate::feed::{FeedAction, FeedReducer, FeedState};
use crate::ingredient::IngredientId;
use crate::order::{Order, OrderAction, OrderPipelineState, OrderReducer};
use crate::user::{UserAction, UserOperation, UserReducer, UserState};
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effects, SmallVec};

/// The whole application state tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    /// Ingredient catalog.
    pub catalog: CatalogState,
    /// Burger draft.
    pub builder: BuilderState,
    /// Public order feed.
    pub feed: FeedState,
    /// Authentication and profile.
    pub user: UserState,
    /// Order submission pipeline.
    pub order: OrderPipelineState,
}

impl AppState {
    /// Price of the current draft.
    pub fn total_price(&self) -> u64 {
        self.builder.total_price()
    }

    /// A submission is currently on the wire.
    pub const fn is_order_pending(&self) -> bool {
        self.order.is_submitting
    }

    /// The confirmed order awaiting dismissal, if any.
    pub const fn confirmed_order(&self) -> Option<&Order> {
        self.order.confirmed.as_ref()
    }

    /// The startup session probe has finished.
    pub const fn is_auth_checked(&self) -> bool {
        self.user.is_auth_checked
    }

    /// A session is active.
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_authenticated
    }

    /// Latest failure of the given authentication operation.
    pub fn auth_error(&self, operation: UserOperation) -> Option<&ApiError> {
        self.user.error(operation)
    }
}

/// Every action the application can dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Compose the builder draft into a submission and send it.
    ///
    /// Ignored when the draft has no bun; a burger without a bun is not a
    /// submittable order.
    SubmitOrder,
    /// Catalog slice action.
    Catalog(CatalogAction),
    /// Builder slice action.
    Builder(BuilderAction),
    /// Feed slice action.
    Feed(FeedAction),
    /// Authentication slice action.
    User(UserAction),
    /// Submission pipeline action.
    Order(OrderAction),
}

/// Root reducer delegating to the slice reducers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer {
    catalog: CatalogReducer,
    builder: BuilderReducer,
    feed: FeedReducer,
    user: UserReducer,
    order: OrderReducer,
    coordinator: OrderCoordinator,
}

fn lift<A: Send + 'static>(effects: Effects<A>, wrap: fn(A) -> AppAction) -> Effects<AppAction> {
    effects.into_iter().map(|effect| effect.map(wrap)).collect()
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        // Cross-slice reactions run first, in the same dispatch turn.
        self.coordinator.intercept(state, &action, env);

        match action {
            AppAction::SubmitOrder => {
                let Some(bun) = state.builder.bun.as_ref() else {
                    tracing::debug!("submit without a bun, ignoring");
                    return SmallVec::new();
                };

                // The wire sequence brackets the stack with the bun.
                let mut ingredient_ids: Vec<IngredientId> =
                    Vec::with_capacity(state.builder.items.len() + 2);
                ingredient_ids.push(bun.id.clone());
                ingredient_ids.extend(state.builder.items.iter().map(|p| p.ingredient.id.clone()));
                ingredient_ids.push(bun.id.clone());

                lift(
                    self.order
                        .reduce(&mut state.order, OrderAction::Submit { ingredient_ids }, env),
                    AppAction::Order,
                )
            },
            AppAction::Catalog(action) => lift(
                self.catalog.reduce(&mut state.catalog, action, env),
                AppAction::Catalog,
            ),
            AppAction::Builder(action) => lift(
                self.builder.reduce(&mut state.builder, action, env),
                AppAction::Builder,
            ),
            AppAction::Feed(action) => {
                lift(self.feed.reduce(&mut state.feed, action, env), AppAction::Feed)
            },
            AppAction::User(action) => {
                lift(self.user.reduce(&mut state.user, action, env), AppAction::User)
            },
            AppAction::Order(action) => {
                lift(self.order.reduce(&mut state.order, action, env), AppAction::Order)
            },
        }
    }
}
