//! Category management page

use inv_client::InventoryApi;
use inv_model::{Category, Id, Resource};

use crate::{
    error::AdminError,
    filter::{TextQuery, filter_view},
    form::Form,
    mutation::{self, PendingDelete, Saved},
    session::PageSession,
    validation::CategoryDraft,
    view::{Cell, Row, Table},
};

pub const CATEGORY_COLUMNS: [&str; 4] = ["ID", "Name", "Image", "Users"];
pub const CATEGORY_USER_COLUMNS: [&str; 3] = ["ID", "Full name", "Email"];

/// What the backend can report about which users belong to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    /// No endpoint exists; shown as a marker, never as a guessed number
    Unsupported,
    Known(usize),
}

impl Membership {
    fn cell(self) -> Cell {
        match self {
            Self::Unsupported => Cell::Unsupported,
            Self::Known(count) => Cell::Badge(count),
        }
    }
}

// TODO: switch to per-category counts once the page calls GET /api/users/category/{id}
pub const MEMBERSHIP: Membership = Membership::Unsupported;

#[derive(Debug)]
pub struct CategoriesPage<A> {
    session: PageSession<A>,
    categories: Vec<Category>,
    form: Form<CategoryDraft>,
    pending_delete: PendingDelete,
}

impl<A: InventoryApi> CategoriesPage<A> {
    pub fn new(session: PageSession<A>) -> Self {
        Self {
            session,
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

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn form(&self) -> &Form<CategoryDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form<CategoryDraft> {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<Id> {
        self.pending_delete.target()
    }

    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.session.info("Loading data...");
        self.reload().await?;
        self.session.banner_mut().clear();
        Ok(())
    }

    async fn reload(&mut self) -> Result<(), AdminError> {
        match self.session.api().list::<Category>().await {
            Ok(categories) => {
                tracing::info!(categories = categories.len(), "Categories page loaded");
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load categories: {e}");
                self.session.error(format!("Failed to load data: {e}"));
                Err(AdminError::Fetch(e))
            }
        }
    }

    pub fn table(&self) -> Table {
        self.render(&self.categories, "No categories found")
    }

    pub fn filtered_table(&self, query: &str) -> Table {
        let query = TextQuery::new(query);
        if query.is_empty() {
            return self.table();
        }
        self.render(
            filter_view(&self.categories, &query),
            "No categories match the search",
        )
    }

    fn render<'a>(&self, categories: impl IntoIterator<Item = &'a Category>, empty_text: &str) -> Table {
        Table::from_records(&CATEGORY_COLUMNS, empty_text, categories, |c| {
            let image = match c.images.as_deref().filter(|url| !url.trim().is_empty()) {
                Some(url) => Cell::Image {
                    url: url.to_string(),
                    alt: c.name.clone(),
                },
                None => Cell::Muted("No image".to_string()),
            };
            Row::record(
                c.id,
                vec![
                    Cell::Integer(c.id),
                    Cell::Text(c.name.clone()),
                    image,
                    MEMBERSHIP.cell(),
                ],
            )
        })
    }

    /// Users of one category. Always a placeholder while [`MEMBERSHIP`] is unsupported.
    pub fn category_users(&mut self, id: Id) -> Result<Table, AdminError> {
        if !self.categories.iter().any(|c| c.id == id) {
            return Err(self.not_found(id));
        }
        Ok(Table::placeholder(
            &CATEGORY_USER_COLUMNS,
            "Category membership is not supported by the backend",
        ))
    }

    pub fn show_add_modal(&mut self) {
        self.form.open_create();
    }

    pub fn edit(&mut self, id: Id) -> Result<(), AdminError> {
        match self.categories.iter().find(|c| c.id == id) {
            Some(category) => {
                self.form.open_edit(category);
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
        if !self.categories.iter().any(|c| c.id == id) {
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
        mutation::delete::<A, Category>(&mut self.session, id).await?;
        self.pending_delete.cancel();
        self.reload().await?;
        Ok(Some(id))
    }

    fn not_found(&mut self, id: Id) -> AdminError {
        self.session.error("Category not found");
        AdminError::NotFound {
            label: Category::LABEL,
            id,
        }
    }
}
