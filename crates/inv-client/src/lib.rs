//! REST client for the inventory backend.
//!
//! [`InventoryApi`] is the seam the admin pages are written against;
//! [`HttpInventoryApi`] is the `reqwest` implementation used in production.

pub mod api;
pub mod error;
pub mod http;
pub mod metrics;
pub mod request_id;

pub use api::InventoryApi;
pub use error::ClientError;
pub use http::{ClientConfig, HttpInventoryApi};
