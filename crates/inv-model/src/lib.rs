//! Records exchanged with the inventory REST backend.
//!
//! Entities mirror the backend DTOs one to one and are only ever held in
//! page-local memory. Write payloads live next to them so that every REST
//! collection is described by a single [`Resource`] implementation.

pub mod models;
pub mod payload;

use serde::{Serialize, de::DeserializeOwned};

pub use models::{Category, CurrentUser, LogoutResponse, MeResponse, Product, User};
pub use payload::{CategoryInput, FieldError, ProductInput, UserInput, ValidationErrorBody};

/// Backend identifier type shared by every collection.
pub type Id = i64;

/// An entity addressable as a REST collection under `/api/{COLLECTION}`.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Path segment of the collection, e.g. `products`.
    const COLLECTION: &'static str;
    /// Lowercase human label, e.g. `product`.
    const LABEL: &'static str;
    /// Body sent on create and update.
    type Input: Serialize + Send + Sync;

    /// Backend identifier of this record.
    fn id(&self) -> Id;
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const LABEL: &'static str = "product";
    type Input = ProductInput;

    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const LABEL: &'static str = "user";
    type Input = UserInput;

    fn id(&self) -> Id {
        self.id
    }
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const LABEL: &'static str = "category";
    type Input = CategoryInput;

    fn id(&self) -> Id {
        self.id
    }
}
