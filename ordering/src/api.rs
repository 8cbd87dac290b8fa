//! The boundary between reducers and the outside world.
//!
//! Reducers never touch the network directly; effects call through [`Api`]
//! and persist credentials through [`TokenStore`]. Both traits are object
//! safe so [`AppEnvironment`] stays a plain cloneable struct and tests can
//! swap in in-memory doubles.

use crate::error::ApiError;
use crate::feed::FeedSnapshot;
use crate::ingredient::{Ingredient, IngredientId};
use crate::order::Order;
use crate::user::{LoginData, RegisterData, User, UserPatch};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`Api`] operations.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send + 'a>>;

/// Authenticated identity plus the credentials that came with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    /// The authenticated user.
    pub user: User,
    /// Bearer token for subsequent requests.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
}

/// Remote operations the ordering slices depend on.
///
/// Methods return boxed futures rather than using `async fn` so the trait
/// stays object safe behind `Arc<dyn Api>`.
pub trait Api: Send + Sync {
    /// Fetch the full ingredient catalog.
    fn fetch_ingredients(&self) -> ApiFuture<'_, Vec<Ingredient>>;

    /// Fetch the current public feed snapshot.
    fn fetch_feed(&self) -> ApiFuture<'_, FeedSnapshot>;

    /// Submit an order composed of the given catalog ids.
    fn submit_order(&self, ingredient_ids: Vec<IngredientId>) -> ApiFuture<'_, Order>;

    /// Create an account and sign in.
    fn register(&self, data: RegisterData) -> ApiFuture<'_, AuthSession>;

    /// Sign in with existing credentials.
    fn login(&self, data: LoginData) -> ApiFuture<'_, AuthSession>;

    /// Invalidate the current session server-side.
    fn logout(&self) -> ApiFuture<'_, ()>;

    /// Fetch the identity behind the stored credentials, if any.
    fn fetch_current_user(&self) -> ApiFuture<'_, User>;

    /// Update profile fields of the current user.
    fn update_user(&self, patch: UserPatch) -> ApiFuture<'_, User>;
}

/// Durable credential storage.
///
/// Tokens are written only after the server confirms an operation, so the
/// store never holds credentials the server does not know about.
pub trait TokenStore: Send + Sync {
    /// Persist both tokens, replacing any previous pair.
    fn store(&self, refresh_token: &str, access_token: &str);

    /// Drop any stored pair.
    fn clear(&self);
}

/// Shared environment handed to every reducer.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Remote API client.
    pub api: Arc<dyn Api>,
    /// Credential storage.
    pub tokens: Arc<dyn TokenStore>,
}

impl AppEnvironment {
    /// Build an environment from concrete implementations.
    pub fn new(api: Arc<dyn Api>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { api, tokens }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}
