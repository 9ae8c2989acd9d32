//! Page controllers for the inventory admin panel.
//!
//! Each page ([`ProductsPage`], [`UsersPage`], [`CategoriesPage`],
//! [`DashboardPage`]) runs the same cycle against an [`InventoryApi`]:
//! load collections, render them as [`view::Table`]s, validate and submit a
//! form, delete with confirmation, reload. Status is reported through the
//! page's single [`message::Banner`].
//!
//! [`InventoryApi`]: inv_client::InventoryApi

pub mod config;
pub mod error;
pub mod filter;
pub mod form;
pub mod format;
pub mod jobs;
pub mod message;
pub mod mutation;
pub mod pages;
pub mod report;
pub mod session;
pub mod tracing;
pub mod validation;
pub mod view;

pub use config::{AdminConfig, Environment};
pub use error::{AdminError, ValidationFailure};
pub use pages::{CategoriesPage, DashboardPage, ProductsPage, UsersPage};
pub use session::PageSession;
