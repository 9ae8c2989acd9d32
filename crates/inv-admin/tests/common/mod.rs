//! In-memory stand-in for the inventory REST backend.
//!
//! Serves the same routes and status conventions as the real backend
//! (`201` on create, `204` on delete and on an empty category list,
//! structured `400` bodies) on an ephemeral local port.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

use axum::{
    Json, Router,
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use inv_admin::PageSession;
use inv_client::{ClientConfig, HttpInventoryApi};
use inv_model::{
    Category, CategoryInput, CurrentUser, Id, Product, ProductInput, User, UserInput,
    ValidationErrorBody,
};
use rust_decimal::Decimal;
use serde_json::json;

type Shared = Arc<Mutex<BackendState>>;

#[derive(Debug, Default)]
pub struct BackendState {
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
    pub session_user: Option<CurrentUser>,
    /// `METHOD /path` of every request received, in order
    pub requests: Vec<String>,
    /// Paths that answer `500` regardless of method
    pub failing: HashSet<String>,
    /// Answer the next create/update with this `400` body
    pub reject_next: Option<ValidationErrorBody>,
    next_id: Id,
}

impl BackendState {
    fn allocate_id(&mut self) -> Id {
        let max = self
            .products
            .iter()
            .map(|p| p.id)
            .chain(self.users.iter().map(|u| u.id))
            .chain(self.categories.iter().map(|c| c.id))
            .max()
            .unwrap_or(0);
        self.next_id = self.next_id.max(max) + 1;
        self.next_id
    }

    fn fullname_of(&self, user_id: Id) -> Option<String> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.fullname.clone())
    }
}

/// Seeds a [`FakeBackend`]
#[derive(Default)]
pub struct FakeBackendBuilder {
    state: BackendState,
}

impl FakeBackendBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product(mut self, id: Id, title: &str, price: i64, quantity: i32, user_id: Id) -> Self {
        self.state.products.push(product(id, title, price, quantity, Some(user_id)));
        self
    }

    pub fn user(mut self, id: Id, fullname: &str, email: &str) -> Self {
        self.state.users.push(User {
            id,
            fullname: fullname.to_string(),
            email: email.to_string(),
            phone: None,
        });
        self
    }

    pub fn category(mut self, id: Id, name: &str) -> Self {
        self.state.categories.push(Category {
            id,
            name: name.to_string(),
            images: None,
        });
        self
    }

    pub fn signed_in(mut self, is_admin: bool) -> Self {
        self.state.session_user = Some(CurrentUser {
            id: 1,
            fullname: "Admin Nguyen".to_string(),
            email: "admin@example.com".to_string(),
            phone: None,
            is_admin,
            is_user: !is_admin,
        });
        self
    }

    pub async fn spawn(self) -> FakeBackend {
        let state = Arc::new(Mutex::new(self.state));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake backend");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake backend crashed");
        });

        FakeBackend {
            state,
            base_url: format!("http://{addr}"),
        }
    }
}

pub struct FakeBackend {
    state: Shared,
    base_url: String,
}

impl FakeBackend {
    pub fn api(&self) -> HttpInventoryApi {
        HttpInventoryApi::new(ClientConfig::new(self.base_url.clone()))
            .expect("Failed to build client")
    }

    pub fn session(&self) -> PageSession<HttpInventoryApi> {
        PageSession::new(self.api())
    }

    pub fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("Backend state poisoned")
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn fail(&self, path: &str) {
        self.state().failing.insert(path.to_string());
    }

    pub fn reject_next(&self, body: ValidationErrorBody) {
        self.state().reject_next = Some(body);
    }
}

pub fn product(id: Id, title: &str, price: i64, quantity: i32, user_id: Option<Id>) -> Product {
    Product {
        id,
        title: title.to_string(),
        description: None,
        price: Decimal::from(price),
        quantity,
        user_id,
        user_fullname: None,
        images: None,
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/{id}",
            put(update_product).delete(delete_product),
        )
        .route("/api/products/user/{id}", get(products_by_user))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", put(update_user).delete(delete_user))
        .route("/api/categories", get(list_categories).post(create_category))
        .route(
            "/api/categories/{id}",
            put(update_category).delete(delete_category),
        )
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let failing = {
        let mut state = state.lock().expect("Backend state poisoned");
        state.requests.push(format!("{} {path}", request.method()));
        state.failing.contains(&path)
    };
    if failing {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    next.run(request).await
}

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().expect("Backend state poisoned")
}

fn not_found(kind: &str, id: Id) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{kind} not found with id: {id}") })),
    )
        .into_response()
}

fn rejected(state: &mut BackendState) -> Option<Response> {
    state
        .reject_next
        .take()
        .map(|body| (StatusCode::BAD_REQUEST, Json(body)).into_response())
}

async fn list_products(State(state): State<Shared>) -> Json<Vec<Product>> {
    Json(lock(&state).products.clone())
}

async fn products_by_user(State(state): State<Shared>, Path(id): Path<Id>) -> Json<Vec<Product>> {
    let state = lock(&state);
    Json(
        state
            .products
            .iter()
            .filter(|p| p.user_id == Some(id))
            .cloned()
            .collect(),
    )
}

async fn create_product(State(state): State<Shared>, Json(input): Json<ProductInput>) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    let id = state.allocate_id();
    let product = Product {
        id,
        title: input.title,
        description: input.description,
        price: input.price,
        quantity: input.quantity,
        user_id: Some(input.user_id),
        user_fullname: state.fullname_of(input.user_id),
        images: input.images,
    };
    state.products.push(product.clone());
    (StatusCode::CREATED, Json(product)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(input): Json<ProductInput>,
) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    let fullname = state.fullname_of(input.user_id);
    let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
        return not_found("Product", id);
    };
    product.title = input.title;
    product.description = input.description;
    product.price = input.price;
    product.quantity = input.quantity;
    product.user_id = Some(input.user_id);
    product.user_fullname = fullname;
    product.images = input.images;
    Json(product.clone()).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut state = lock(&state);
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
        return not_found("Product", id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_users(State(state): State<Shared>) -> Json<Vec<User>> {
    Json(lock(&state).users.clone())
}

async fn create_user(State(state): State<Shared>, Json(input): Json<UserInput>) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    if input.password.is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Password is required" })),
        )
            .into_response();
    }
    let user = User {
        id: state.allocate_id(),
        fullname: input.fullname,
        email: input.email,
        phone: input.phone,
    };
    state.users.push(user.clone());
    (StatusCode::CREATED, Json(user)).into_response()
}

async fn update_user(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(input): Json<UserInput>,
) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    let Some(user) = state.users.iter_mut().find(|u| u.id == id) else {
        return not_found("User", id);
    };
    user.fullname = input.fullname;
    user.email = input.email;
    user.phone = input.phone;
    Json(user.clone()).into_response()
}

async fn delete_user(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut state = lock(&state);
    let before = state.users.len();
    state.users.retain(|u| u.id != id);
    if state.users.len() == before {
        return not_found("User", id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn list_categories(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    if state.categories.is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }
    Json(state.categories.clone()).into_response()
}

async fn create_category(State(state): State<Shared>, Json(input): Json<CategoryInput>) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    let category = Category {
        id: state.allocate_id(),
        name: input.name,
        images: input.images,
    };
    state.categories.push(category.clone());
    (StatusCode::CREATED, Json(category)).into_response()
}

async fn update_category(
    State(state): State<Shared>,
    Path(id): Path<Id>,
    Json(input): Json<CategoryInput>,
) -> Response {
    let mut state = lock(&state);
    if let Some(response) = rejected(&mut state) {
        return response;
    }
    let Some(category) = state.categories.iter_mut().find(|c| c.id == id) else {
        return not_found("Category", id);
    };
    category.name = input.name;
    category.images = input.images;
    Json(category.clone()).into_response()
}

async fn delete_category(State(state): State<Shared>, Path(id): Path<Id>) -> Response {
    let mut state = lock(&state);
    let before = state.categories.len();
    state.categories.retain(|c| c.id != id);
    if state.categories.len() == before {
        return not_found("Category", id);
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn me(State(state): State<Shared>) -> Response {
    match lock(&state).session_user.clone() {
        Some(user) => Json(json!({ "success": true, "user": user })).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "message": "Not signed in" })),
        )
            .into_response(),
    }
}

async fn logout(State(state): State<Shared>) -> Json<serde_json::Value> {
    lock(&state).session_user = None;
    Json(json!({ "success": true, "message": "Signed out" }))
}
