//! Page controllers.
//!
//! A page owns its [`PageSession`](crate::session::PageSession) and its
//! collections for as long as it is open. Loading replaces collections
//! wholesale; mutations are followed by a reload rather than a local patch.

pub mod categories;
pub mod dashboard;
pub mod products;
pub mod users;

pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use products::ProductsPage;
pub use users::UsersPage;
