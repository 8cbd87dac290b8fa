//! In-memory doubles for the API boundary.
//!
//! [`StubApi`] replays scripted responses per operation and counts calls, so
//! tests can assert how many requests actually went out. An optional per
//! operation latency lets tests race the in-flight guards.

use crate::api::{Api, ApiFuture, AppEnvironment, AuthSession, TokenStore};
use crate::error::ApiError;
use crate::feed::FeedSnapshot;
use crate::ingredient::{Ingredient, IngredientId, IngredientKind};
use crate::order::{Order, OrderId, OrderStatus};
use crate::user::{LoginData, RegisterData, User, UserPatch};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Scripted responses and call accounting for one API operation.
struct ResponseQueue<T> {
    queue: Mutex<VecDeque<Result<T, ApiError>>>,
    calls: AtomicUsize,
    latency: Mutex<Option<Duration>>,
}

impl<T> Default for ResponseQueue<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            latency: Mutex::new(None),
        }
    }
}

impl<T: Send> ResponseQueue<T> {
    fn push(&self, response: Result<T, ApiError>) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(response);
    }

    fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap_or_else(PoisonError::into_inner) = Some(latency);
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn take(&self) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let latency = *self.latency.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::transport("no stubbed response")))
    }
}

/// Scriptable [`Api`] double.
///
/// Responses are consumed in FIFO order per operation; an operation with an
/// empty queue answers with a transport error. Cloning shares the queues.
#[derive(Clone, Default)]
pub struct StubApi {
    ingredients: Arc<ResponseQueue<Vec<Ingredient>>>,
    feed: Arc<ResponseQueue<FeedSnapshot>>,
    orders: Arc<ResponseQueue<Order>>,
    register: Arc<ResponseQueue<AuthSession>>,
    login: Arc<ResponseQueue<AuthSession>>,
    logout: Arc<ResponseQueue<()>>,
    current_user: Arc<ResponseQueue<User>>,
    update: Arc<ResponseQueue<User>>,
    submitted: Arc<Mutex<Vec<Vec<IngredientId>>>>,
}

impl StubApi {
    /// Script the next catalog fetch.
    pub fn stub_ingredients(&self, response: Result<Vec<Ingredient>, ApiError>) {
        self.ingredients.push(response);
    }

    /// Script the next feed refresh.
    pub fn stub_feed(&self, response: Result<FeedSnapshot, ApiError>) {
        self.feed.push(response);
    }

    /// Script the next order submission.
    pub fn stub_submit_order(&self, response: Result<Order, ApiError>) {
        self.orders.push(response);
    }

    /// Delay every order submission by `latency` before answering.
    pub fn set_submit_order_latency(&self, latency: Duration) {
        self.orders.set_latency(latency);
    }

    /// Script the next registration.
    pub fn stub_register(&self, response: Result<AuthSession, ApiError>) {
        self.register.push(response);
    }

    /// Script the next login.
    pub fn stub_login(&self, response: Result<AuthSession, ApiError>) {
        self.login.push(response);
    }

    /// Script the next logout.
    pub fn stub_logout(&self, response: Result<(), ApiError>) {
        self.logout.push(response);
    }

    /// Script the next session probe.
    pub fn stub_current_user(&self, response: Result<User, ApiError>) {
        self.current_user.push(response);
    }

    /// Script the next profile update.
    pub fn stub_update_user(&self, response: Result<User, ApiError>) {
        self.update.push(response);
    }

    /// How many order submissions reached the API.
    pub fn submit_order_calls(&self) -> usize {
        self.orders.calls()
    }

    /// How many catalog fetches reached the API.
    pub fn fetch_ingredients_calls(&self) -> usize {
        self.ingredients.calls()
    }

    /// How many logins reached the API.
    pub fn login_calls(&self) -> usize {
        self.login.calls()
    }

    /// Every ingredient id sequence submitted so far, oldest first.
    pub fn submitted_ingredient_ids(&self) -> Vec<Vec<IngredientId>> {
        self.submitted
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Api for StubApi {
    fn fetch_ingredients(&self) -> ApiFuture<'_, Vec<Ingredient>> {
        let queue = Arc::clone(&self.ingredients);
        Box::pin(async move { queue.take().await })
    }

    fn fetch_feed(&self) -> ApiFuture<'_, FeedSnapshot> {
        let queue = Arc::clone(&self.feed);
        Box::pin(async move { queue.take().await })
    }

    fn submit_order(&self, ingredient_ids: Vec<IngredientId>) -> ApiFuture<'_, Order> {
        let queue = Arc::clone(&self.orders);
        let submitted = Arc::clone(&self.submitted);
        Box::pin(async move {
            submitted
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(ingredient_ids);
            queue.take().await
        })
    }

    fn register(&self, _data: RegisterData) -> ApiFuture<'_, AuthSession> {
        let queue = Arc::clone(&self.register);
        Box::pin(async move { queue.take().await })
    }

    fn login(&self, _data: LoginData) -> ApiFuture<'_, AuthSession> {
        let queue = Arc::clone(&self.login);
        Box::pin(async move { queue.take().await })
    }

    fn logout(&self) -> ApiFuture<'_, ()> {
        let queue = Arc::clone(&self.logout);
        Box::pin(async move { queue.take().await })
    }

    fn fetch_current_user(&self) -> ApiFuture<'_, User> {
        let queue = Arc::clone(&self.current_user);
        Box::pin(async move { queue.take().await })
    }

    fn update_user(&self, _patch: UserPatch) -> ApiFuture<'_, User> {
        let queue = Arc::clone(&self.update);
        Box::pin(async move { queue.take().await })
    }
}

/// [`TokenStore`] double backed by process memory.
#[derive(Clone, Default)]
pub struct MemoryTokenStore {
    pair: Arc<Mutex<Option<(String, String)>>>,
}

impl MemoryTokenStore {
    /// The stored `(refresh, access)` pair, if any.
    pub fn tokens(&self) -> Option<(String, String)> {
        self.pair
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.tokens().is_none()
    }
}

impl TokenStore for MemoryTokenStore {
    fn store(&self, refresh_token: &str, access_token: &str) {
        *self.pair.lock().unwrap_or_else(PoisonError::into_inner) =
            Some((refresh_token.to_owned(), access_token.to_owned()));
    }

    fn clear(&self) {
        *self.pair.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Environment wired to the given stub and a fresh in-memory token store.
pub fn test_environment(api: StubApi) -> AppEnvironment {
    AppEnvironment::new(Arc::new(api), Arc::new(MemoryTokenStore::default()))
}

/// Minimal catalog entry for tests. Name and image fields derive from `id`.
pub fn ingredient_fixture(id: &str, kind: IngredientKind, price: u64) -> Ingredient {
    Ingredient {
        id: IngredientId::from(id),
        name: id.to_owned(),
        kind,
        price,
        calories: 0,
        proteins: 0,
        fat: 0,
        carbohydrates: 0,
        image: format!("https://example.test/{id}.png"),
        image_mobile: format!("https://example.test/{id}-mobile.png"),
        image_large: format!("https://example.test/{id}-large.png"),
    }
}

/// Minimal confirmed order for tests.
pub fn order_fixture(number: u32) -> Order {
    Order {
        id: OrderId(format!("order-{number}")),
        status: OrderStatus::Done,
        name: "Fixture burger".to_owned(),
        ingredients: Vec::new(),
        created_at: DateTime::<Utc>::UNIX_EPOCH,
        updated_at: DateTime::<Utc>::UNIX_EPOCH,
        number,
    }
}

/// `order_fixture` with the submitted ingredient ids echoed back.
pub fn order_fixture_with_ingredients(number: u32, ids: &[&str]) -> Order {
    Order {
        ingredients: ids.iter().map(|id| IngredientId::from(*id)).collect(),
        ..order_fixture(number)
    }
}
