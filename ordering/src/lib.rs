//! State orchestration for a food-ordering client.
//!
//! The application is a tree of independent state slices reduced by pure-ish
//! reducers, with all I/O pushed into effects behind the [`api::Api`]
//! boundary:
//!
//! ```text
//!                      ┌─────────────────┐
//!        AppAction ──▶ │   AppReducer    │ ──▶ Effects (API calls)
//!                      │  ┌───────────┐  │
//!                      │  │coordinator│  │        catalog  builder
//!                      │  └───────────┘  │        feed     user
//!                      │   then delegate │        order pipeline
//!                      └─────────────────┘
//! ```
//!
//! Slices never read each other's state. The two places that need more than
//! one slice live in [`app`]: submission composes the wire sequence from the
//! builder draft, and [`coordinator::OrderCoordinator`] resets the draft when
//! an order is confirmed, inside the same dispatch turn.
//!
//! Drive [`app::AppReducer`] with a `foodcart-runtime` store for the full
//! async feedback loop, or reduce it directly in tests.

pub mod api;
pub mod app;
pub mod builder;
pub mod catalog;
pub mod coordinator;
pub mod error;
pub mod feed;
pub mod ingredient;
#[cfg(feature = "test-utils")]
pub mod mocks;
pub mod order;
pub mod user;

pub use api::{Api, ApiFuture, AppEnvironment, AuthSession, TokenStore};
pub use app::{AppAction, AppReducer, AppState};
pub use builder::{BuilderAction, BuilderReducer, BuilderState};
pub use catalog::{CatalogAction, CatalogReducer, CatalogState};
pub use coordinator::OrderCoordinator;
pub use error::ApiError;
pub use feed::{FeedAction, FeedReducer, FeedSnapshot, FeedState};
pub use ingredient::{Ingredient, IngredientId, IngredientKind, PlacedIngredient, PlacementId};
pub use order::{Order, OrderAction, OrderId, OrderPipelineState, OrderReducer, OrderStatus};
pub use user::{
    LoginData, RegisterData, User, UserAction, UserOperation, UserPatch, UserReducer, UserState,
};
