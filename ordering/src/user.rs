//! Authentication and profile slice.
//!
//! Credentials are persisted inside the effect, after the server confirms the
//! operation and before the terminal action is reduced. By the time the state
//! says "authenticated", the token store already agrees.

use crate::api::AppEnvironment;
use crate::error::ApiError;
use foodcart_core::reducer::Reducer;
use foodcart_core::{Effect, Effects, SmallVec, smallvec};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// The signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Account email.
    pub email: String,
    /// Display name.
    pub name: String,
}

/// Payload for account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterData {
    /// Account email.
    pub email: String,
    /// Plaintext password, sent once over the wire.
    pub password: String,
    /// Display name.
    pub name: String,
}

/// Payload for signing in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginData {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Partial profile update. Absent fields are left untouched server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    /// New email, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New password, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// New display name, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// The authentication operations that keep their own error slot.
///
/// A failed login must stay visible on the login form even if a later profile
/// update also fails, so errors are keyed by operation instead of sharing one
/// field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UserOperation {
    /// Account creation.
    Register,
    /// Signing in.
    Login,
    /// Signing out.
    Logout,
    /// Profile update.
    Update,
}

/// State of the authentication slice.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserState {
    /// The startup session probe has finished, successfully or not.
    /// Once set it never goes back to `false`.
    pub is_auth_checked: bool,
    /// A session is active.
    pub is_authenticated: bool,
    /// Current identity. Empty when signed out.
    pub user: User,
    /// A register, login, logout, or probe request is in flight.
    pub is_loading: bool,
    /// A profile update is in flight.
    pub is_updating: bool,
    /// Latest failure per operation. An entry is cleared when its own
    /// operation is retried, never by a different operation.
    pub errors: BTreeMap<UserOperation, ApiError>,
}

impl UserState {
    /// Latest failure of the given operation, if any.
    pub fn error(&self, operation: UserOperation) -> Option<&ApiError> {
        self.errors.get(&operation)
    }
}

/// Actions accepted by [`UserReducer`].
#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    /// Create an account and sign in.
    Register(RegisterData),
    /// Registration succeeded; tokens are already stored.
    Registered(User),
    /// Registration failed.
    RegisterFailed(ApiError),

    /// Sign in.
    Login(LoginData),
    /// Login succeeded; tokens are already stored.
    LoggedIn(User),
    /// Login failed.
    LoginFailed(ApiError),

    /// Sign out.
    Logout,
    /// Logout succeeded; tokens are already cleared.
    LoggedOut,
    /// Logout failed; the session and tokens are kept.
    LogoutFailed(ApiError),

    /// Probe the stored credentials for an existing session.
    FetchUser,
    /// The probe found a live session.
    UserFetched(User),
    /// The probe failed; the session state stays as it was.
    UserFetchFailed(ApiError),

    /// Update profile fields.
    Update(UserPatch),
    /// The update succeeded; the identity is replaced wholesale.
    Updated(User),
    /// The update failed.
    UpdateFailed(ApiError),
}

/// Reducer for authentication and profile state.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserReducer;

impl Reducer for UserReducer {
    type State = UserState;
    type Action = UserAction;
    type Environment = AppEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per phase of five operations
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            UserAction::Register(data) => {
                state.is_loading = true;
                state.errors.remove(&UserOperation::Register);

                let api = Arc::clone(&env.api);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::future(async move {
                    match api.register(data).await {
                        Ok(session) => {
                            tokens.store(&session.refresh_token, &session.access_token);
                            Some(UserAction::Registered(session.user))
                        },
                        Err(error) => Some(UserAction::RegisterFailed(error)),
                    }
                })]
            },
            UserAction::Registered(user) => {
                tracing::info!(email = %user.email, "registered");
                state.is_loading = false;
                state.is_authenticated = true;
                state.user = user;
                SmallVec::new()
            },
            UserAction::RegisterFailed(error) => {
                tracing::warn!(%error, "registration failed");
                state.is_loading = false;
                state.errors.insert(UserOperation::Register, error);
                SmallVec::new()
            },

            UserAction::Login(data) => {
                state.is_loading = true;
                state.errors.remove(&UserOperation::Login);

                let api = Arc::clone(&env.api);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::future(async move {
                    match api.login(data).await {
                        Ok(session) => {
                            tokens.store(&session.refresh_token, &session.access_token);
                            Some(UserAction::LoggedIn(session.user))
                        },
                        Err(error) => Some(UserAction::LoginFailed(error)),
                    }
                })]
            },
            UserAction::LoggedIn(user) => {
                tracing::info!(email = %user.email, "logged in");
                state.is_loading = false;
                state.is_authenticated = true;
                state.user = user;
                SmallVec::new()
            },
            UserAction::LoginFailed(error) => {
                tracing::warn!(%error, "login failed");
                state.is_loading = false;
                state.errors.insert(UserOperation::Login, error);
                SmallVec::new()
            },

            UserAction::Logout => {
                state.is_loading = true;
                state.errors.remove(&UserOperation::Logout);

                let api = Arc::clone(&env.api);
                let tokens = Arc::clone(&env.tokens);
                smallvec![Effect::future(async move {
                    match api.logout().await {
                        Ok(()) => {
                            tokens.clear();
                            Some(UserAction::LoggedOut)
                        },
                        // Tokens stay put; the session is still live server-side.
                        Err(error) => Some(UserAction::LogoutFailed(error)),
                    }
                })]
            },
            UserAction::LoggedOut => {
                tracing::info!("logged out");
                state.is_loading = false;
                state.is_authenticated = false;
                state.user = User::default();
                SmallVec::new()
            },
            UserAction::LogoutFailed(error) => {
                tracing::warn!(%error, "logout failed");
                state.is_loading = false;
                state.errors.insert(UserOperation::Logout, error);
                SmallVec::new()
            },

            UserAction::FetchUser => {
                state.is_loading = true;

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.fetch_current_user().await {
                        Ok(user) => Some(UserAction::UserFetched(user)),
                        Err(error) => Some(UserAction::UserFetchFailed(error)),
                    }
                })]
            },
            UserAction::UserFetched(user) => {
                state.is_loading = false;
                state.is_auth_checked = true;
                state.is_authenticated = true;
                state.user = user;
                SmallVec::new()
            },
            UserAction::UserFetchFailed(error) => {
                // A failed probe answers "unknown", not "denied": the check is
                // complete but the session verdict is left as it was.
                tracing::debug!(%error, "session probe failed");
                state.is_loading = false;
                state.is_auth_checked = true;
                SmallVec::new()
            },

            UserAction::Update(patch) => {
                state.is_updating = true;
                state.errors.remove(&UserOperation::Update);

                let api = Arc::clone(&env.api);
                smallvec![Effect::future(async move {
                    match api.update_user(patch).await {
                        Ok(user) => Some(UserAction::Updated(user)),
                        Err(error) => Some(UserAction::UpdateFailed(error)),
                    }
                })]
            },
            UserAction::Updated(user) => {
                state.is_updating = false;
                state.user = user;
                SmallVec::new()
            },
            UserAction::UpdateFailed(error) => {
                tracing::warn!(%error, "profile update failed");
                state.is_updating = false;
                state.errors.insert(UserOperation::Update, error);
                SmallVec::new()
            },
        }
    }
}
