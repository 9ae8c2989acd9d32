//! Product management page

use inv_client::InventoryApi;
use inv_model::{Category, Id, Product, Resource, User};

use crate::{
    error::AdminError,
    filter::{SortOrder, TextQuery, filter_view, sort_by_price},
    form::Form,
    mutation::{self, PendingDelete, Saved},
    session::PageSession,
    validation::ProductDraft,
    view::{Cell, Row, SelectOption, Table},
};

pub const PRODUCT_COLUMNS: [&str; 6] = ["ID", "Title", "Description", "Price", "Quantity", "Owner"];

const EMPTY_TEXT: &str = "No products found";
const UNKNOWN_OWNER: &str = "Unknown";

#[derive(Debug)]
pub struct ProductsPage<A> {
    session: PageSession<A>,
    products: Vec<Product>,
    users: Vec<User>,
    categories: Vec<Category>,
    form: Form<ProductDraft>,
    pending_delete: PendingDelete,
}

impl<A: InventoryApi> ProductsPage<A> {
    pub fn new(session: PageSession<A>) -> Self {
        Self {
            session,
            products: Vec::new(),
            users: Vec::new(),
            categories: Vec::new(),
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

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn form(&self) -> &Form<ProductDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<ProductDraft> {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<Id> {
        self.pending_delete.target()
    }

    /// Fetch products, users and categories concurrently.
    ///
    /// All three must succeed. On failure nothing is replaced.
    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.session.info("Loading data...");

        let api = self.session.api();
        let loaded = tokio::try_join!(
            api.list::<Product>(),
            api.list::<User>(),
            api.list::<Category>(),
        );

        match loaded {
            Ok((products, users, categories)) => {
                tracing::info!(
                    products = products.len(),
                    users = users.len(),
                    categories = categories.len(),
                    "Products page loaded"
                );
                self.products = products;
                self.users = users;
                self.categories = categories;
                self.session.banner_mut().clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load products page: {e}");
                self.session.error(format!("Failed to load data: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    /// Re-fetch products only, leaving the banner alone.
    async fn reload_products(&mut self) -> Result<(), AdminError> {
        match self.session.api().list::<Product>().await {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to reload products: {e}");
                self.session.error(format!("Failed to reload products: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    pub async fn refresh(&mut self) -> Result<(), AdminError> {
        self.session.info("Refreshing data...");
        match self.session.api().list::<Product>().await {
            Ok(products) => {
                self.products = products;
                self.session.success("Data refreshed successfully!");
                Ok(())
            }
            Err(e) => {
                self.session.error(format!("Failed to refresh data: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    pub fn table(&self) -> Table {
        self.render(&self.products)
    }

    /// Products whose title or description contains `query`.
    ///
    /// `category` is accepted but not applied: products carry no category
    /// relationship.
    pub fn filtered_table(&self, query: &str, category: Option<Id>) -> Table {
        if let Some(category_id) = category {
            tracing::debug!(category_id, "Category filter ignored, products have no category");
        }
        self.render(filter_view(&self.products, &TextQuery::new(query)))
    }

    /// Reorder the loaded products by price and render them.
    pub fn sort_by_price(&mut self, order: SortOrder) -> Table {
        sort_by_price(&mut self.products, order);
        self.table()
    }

    fn render<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Table {
        Table::from_records(&PRODUCT_COLUMNS, EMPTY_TEXT, products, |p| {
            Row::record(
                p.id,
                vec![
                    Cell::Integer(p.id),
                    Cell::Text(p.title.clone()),
                    Cell::optional(p.description.as_deref(), "No description"),
                    Cell::Money(p.price),
                    Cell::Integer(p.quantity.into()),
                    Cell::Text(self.owner_name(p).to_string()),
                ],
            )
        })
    }

    /// The owner's full name from the loaded users
    pub fn owner_name(&self, product: &Product) -> &str {
        product
            .user_id
            .and_then(|id| self.users.iter().find(|u| u.id == id))
            .map_or(UNKNOWN_OWNER, |u| u.fullname.as_str())
    }

    /// Owner picker entries, `fullname (email)`
    pub fn user_options(&self) -> Vec<SelectOption> {
        self.users
            .iter()
            .map(|u| SelectOption {
                value: u.id,
                label: format!("{} ({})", u.fullname, u.email),
            })
            .collect()
    }

    pub fn category_options(&self) -> Vec<SelectOption> {
        self.categories
            .iter()
            .map(|c| SelectOption {
                value: c.id,
                label: c.name.clone(),
            })
            .collect()
    }

    pub fn show_add_modal(&mut self) {
        self.form.open_create();
    }

    pub fn edit(&mut self, id: Id) -> Result<(), AdminError> {
        match self.products.iter().find(|p| p.id == id) {
            Some(product) => {
                self.form.open_edit(product);
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
        self.reload_products().await?;
        Ok(saved)
    }

    pub fn request_delete(&mut self, id: Id) -> Result<(), AdminError> {
        if !self.products.iter().any(|p| p.id == id) {
            return Err(self.not_found(id));
        }
        self.pending_delete.arm(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete.cancel();
    }

    /// Delete the record armed by [`Self::request_delete`]; `Ok(None)` if nothing was armed.
    ///
    /// On failure the confirmation stays armed so it can be retried.
    pub async fn confirm_delete(&mut self) -> Result<Option<Id>, AdminError> {
        let Some(id) = self.pending_delete.target() else {
            return Ok(None);
        };
        mutation::delete::<A, Product>(&mut self.session, id).await?;
        self.pending_delete.cancel();
        self.reload_products().await?;
        Ok(Some(id))
    }

    fn not_found(&mut self, id: Id) -> AdminError {
        self.session.error("Product not found");
        AdminError::NotFound {
            label: Product::LABEL,
            id,
        }
    }
}
