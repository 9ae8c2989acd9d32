//! User management page

use std::collections::HashMap;

use inv_client::InventoryApi;
use inv_model::{Id, Product, Resource, User};

use crate::{
    error::AdminError,
    filter::{TextQuery, filter_view},
    form::Form,
    mutation::{self, PendingDelete, Saved},
    session::PageSession,
    validation::UserDraft,
    view::{Cell, Row, Table},
};

pub const USER_COLUMNS: [&str; 5] = ["ID", "Full name", "Email", "Phone", "Products"];
pub const USER_PRODUCT_COLUMNS: [&str; 4] = ["ID", "Title", "Price", "Quantity"];

#[derive(Debug)]
pub struct UsersPage<A> {
    session: PageSession<A>,
    users: Vec<User>,
    product_counts: HashMap<Id, usize>,
    form: Form<UserDraft>,
    pending_delete: PendingDelete,
}

impl Form<UserDraft> {
    /// Password is mandatory for new users; on edit an empty one keeps the current password
    pub fn password_required(&self) -> bool {
        self.mode().is_create()
    }
}

impl<A: InventoryApi> UsersPage<A> {
    pub fn new(session: PageSession<A>) -> Self {
        Self {
            session,
            users: Vec::new(),
            product_counts: HashMap::new(),
            form: Form::default(),
            pending_delete: PendingDelete::default(),
        }
    }

    pub fn session(&self) -> &PageSession<A> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PageSession<A> {
        &mut self.session
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn form(&self) -> &Form<UserDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<UserDraft> {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<Id> {
        self.pending_delete.target()
    }

    /// Products owned by `user_id` among those seen at the last load
    pub fn product_count(&self, user_id: Id) -> usize {
        self.product_counts.get(&user_id).copied().unwrap_or(0)
    }

    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.session.info("Loading data...");
        self.reload().await?;
        self.session.banner_mut().clear();
        Ok(())
    }

    /// Fetch users and products together; the products only feed the per-user counts.
    async fn reload(&mut self) -> Result<(), AdminError> {
        let api = self.session.api();
        let loaded = tokio::try_join!(api.list::<User>(), api.list::<Product>());
        match loaded {
            Ok((users, products)) => {
                tracing::info!(
                    users = users.len(),
                    products = products.len(),
                    "Users page loaded"
                );
                self.users = users;
                self.product_counts = inv_stats::product_counts(&products);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load users page: {e}");
                self.session.error(format!("Failed to load data: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    pub fn table(&self) -> Table {
        self.render(&self.users, "No users found")
    }

    /// Users whose full name, email or phone contains `query`
    pub fn filtered_table(&self, query: &str) -> Table {
        let query = TextQuery::new(query);
        if query.is_empty() {
            return self.table();
        }
        self.render(filter_view(&self.users, &query), "No users match the search")
    }

    fn render<'a>(&self, users: impl IntoIterator<Item = &'a User>, empty_text: &str) -> Table {
        Table::from_records(&USER_COLUMNS, empty_text, users, |u| {
            Row::record(
                u.id,
                vec![
                    Cell::Integer(u.id),
                    Cell::Text(u.fullname.clone()),
                    Cell::Text(u.email.clone()),
                    Cell::optional(u.phone.as_deref(), "Not provided"),
                    Cell::Badge(self.product_count(u.id)),
                ],
            )
        })
    }

    /// The products one user owns, fetched fresh from the backend
    pub async fn user_products(&mut self, user_id: Id) -> Result<Table, AdminError> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(self.not_found(user_id));
        }

        match self.session.api().products_by_user(user_id).await {
            Ok(products) => Ok(Table::from_records(
                &USER_PRODUCT_COLUMNS,
                "This user has no products yet",
                &products,
                |p| {
                    Row::record(
                        p.id,
                        vec![
                            Cell::Integer(p.id),
                            Cell::Text(p.title.clone()),
                            Cell::Money(p.price),
                            Cell::Integer(p.quantity.into()),
                        ],
                    )
                },
            )),
            Err(e) => {
                tracing::error!(user_id, "Failed to load products of user: {e}");
                self.session.error(format!("Failed to load products: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    /// Full name of a loaded user, for headings
    pub fn fullname(&self, user_id: Id) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.fullname.as_str())
    }

    pub fn show_add_modal(&mut self) {
        self.form.open_create();
    }

    pub fn edit(&mut self, id: Id) -> Result<(), AdminError> {
        match self.users.iter().find(|u| u.id == id) {
            Some(user) => {
                self.form.open_edit(user);
                Ok(())
            }
            None => Err(self.not_found(id)),
        }
    }

    pub fn close_modal(&mut self) {
        self.form.close();
    }

    pub async fn submit(&mut self) -> Result<Saved, AdminError> {
        let saved = mutation::submit(&mut self.session, &mut self.form).await?;
        self.reload().await?;
        Ok(saved)
    }

    pub fn request_delete(&mut self, id: Id) -> Result<(), AdminError> {
        if !self.users.iter().any(|u| u.id == id) {
            return Err(self.not_found(id));
        }
        self.pending_delete.arm(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete.cancel();
    }

    pub async fn confirm_delete(&mut self) -> Result<Option<Id>, AdminError> {
        let Some(id) = self.pending_delete.target() else {
            return Ok(None);
        };
        mutation::delete::<A, User>(&mut self.session, id).await?;
        self.pending_delete.cancel();
        self.reload().await?;
        Ok(Some(id))
    }

    fn not_found(&mut self, id: Id) -> AdminError {
        self.session.error("User not found");
        AdminError::NotFound {
            label: User::LABEL,
            id,
        }
    }
}
