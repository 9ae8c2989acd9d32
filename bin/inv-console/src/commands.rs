use std::{path::PathBuf, sync::Arc};

use clap::{Args, Subcommand};
use inv_admin::{
    AdminConfig, AdminError, CategoriesPage, DashboardPage, PageSession, ProductsPage, UsersPage,
    filter::SortOrder,
    jobs::start_dashboard_refresh,
    pages::categories::{MEMBERSHIP, Membership},
    validation::{CategoryDraft, ProductDraft, UserDraft},
};
use inv_client::HttpInventoryApi;
use inv_model::Id;
use tokio::sync::Mutex;

use crate::output;

type Api = HttpInventoryApi;

#[derive(Subcommand)]
pub enum Command {
    /// Show the signed-in account
    Whoami,
    /// End the backend session
    Logout,
    /// Statistics overview
    Dashboard {
        /// Keep running and reload on the configured interval
        #[arg(long)]
        watch: bool,
    },
    /// Save the overview report as a text file
    Report {
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    #[command(subcommand)]
    Products(ProductsCommand),
    #[command(subcommand)]
    Users(UsersCommand),
    #[command(subcommand)]
    Categories(CategoriesCommand),
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_name = "asc|desc")]
        sort: Option<SortOrder>,
        /// Accepted for parity with the web page; products carry no category
        #[arg(long)]
        category: Option<Id>,
    },
    /// List the owner and category pickers
    Options,
    Add(ProductFields),
    Edit {
        id: Id,
        #[command(flatten)]
        fields: ProductFields,
    },
    Delete {
        id: Id,
    },
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    quantity: Option<String>,
    #[arg(long)]
    user_id: Option<Id>,
    #[arg(long)]
    images: Option<String>,
}

impl ProductFields {
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(title) = self.title {
            draft.title = title;
        }
        if let Some(description) = self.description {
            draft.description = description;
        }
        if let Some(price) = self.price {
            draft.price = price;
        }
        if let Some(quantity) = self.quantity {
            draft.quantity = quantity;
        }
        if let Some(user_id) = self.user_id {
            draft.user_id = Some(user_id);
        }
        if let Some(images) = self.images {
            draft.images = images;
        }
    }
}

#[derive(Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add(UserFields),
    Edit {
        id: Id,
        #[command(flatten)]
        fields: UserFields,
    },
    Delete {
        id: Id,
    },
    /// Products owned by one user
    Products {
        id: Id,
    },
}

#[derive(Args)]
pub struct UserFields {
    #[arg(long)]
    fullname: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    /// Required when adding; leave out on edit to keep the current one
    #[arg(long)]
    password: Option<String>,
}

impl UserFields {
    fn apply(self, draft: &mut UserDraft) {
        if let Some(fullname) = self.fullname {
            draft.fullname = fullname;
        }
        if let Some(email) = self.email {
            draft.email = email;
        }
        if let Some(phone) = self.phone {
            draft.phone = phone;
        }
        if let Some(password) = self.password {
            draft.password = password;
        }
    }
}

#[derive(Subcommand)]
pub enum CategoriesCommand {
    List {
        #[arg(long)]
        search: Option<String>,
    },
    Add(CategoryFields),
    Edit {
        id: Id,
        #[command(flatten)]
        fields: CategoryFields,
    },
    Delete {
        id: Id,
    },
    /// Users belonging to one category
    Users {
        id: Id,
    },
}

#[derive(Args)]
pub struct CategoryFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    images: Option<String>,
}

impl CategoryFields {
    fn apply(self, draft: &mut CategoryDraft) {
        if let Some(name) = self.name {
            draft.name = name;
        }
        if let Some(images) = self.images {
            draft.images = images;
        }
    }
}

pub async fn run(
    command: Command,
    session: PageSession<Api>,
    config: &AdminConfig,
) -> Result<(), AdminError> {
    match command {
        Command::Whoami => whoami(session).await,
        Command::Logout => logout(session).await,
        Command::Dashboard { watch } => dashboard(session, watch, config).await,
        Command::Report { out } => report(session, out).await,
        Command::Products(command) => {
            let mut page = ProductsPage::new(session);
            let result = products(&mut page, command).await;
            output::banner(page.session_mut().banner_mut());
            output::annotations(page.form());
            result
        }
        Command::Users(command) => {
            let mut page = UsersPage::new(session);
            let result = users(&mut page, command).await;
            output::banner(page.session_mut().banner_mut());
            output::annotations(page.form());
            result
        }
        Command::Categories(command) => {
            let mut page = CategoriesPage::new(session);
            let result = categories(&mut page, command).await;
            output::banner(page.session_mut().banner_mut());
            output::annotations(page.form());
            result
        }
    }
}

async fn products(page: &mut ProductsPage<Api>, command: ProductsCommand) -> Result<(), AdminError> {
    page.load().await?;
    match command {
        ProductsCommand::List {
            search,
            sort,
            category,
        } => {
            if let Some(order) = sort {
                page.sort_by_price(order);
            }
            let table = page.filtered_table(search.as_deref().unwrap_or_default(), category);
            output::table("Products", &table);
        }
        ProductsCommand::Options => {
            output::options("Owners", &page.user_options());
            output::options("Categories", &page.category_options());
        }
        ProductsCommand::Add(fields) => {
            let pick_owner = fields.user_id.is_none();
            page.show_add_modal();
            fields.apply(page.form_mut().draft_mut());
            if let Err(e) = page.submit().await {
                if pick_owner {
                    output::options("Owners", &page.user_options());
                }
                return Err(e);
            }
            output::table("Products", &page.table());
        }
        ProductsCommand::Edit { id, fields } => {
            page.edit(id)?;
            fields.apply(page.form_mut().draft_mut());
            page.submit().await?;
            output::table("Products", &page.table());
        }
        ProductsCommand::Delete { id } => {
            page.request_delete(id)?;
            page.confirm_delete().await?;
            output::table("Products", &page.table());
        }
    }
    Ok(())
}

async fn users(page: &mut UsersPage<Api>, command: UsersCommand) -> Result<(), AdminError> {
    page.load().await?;
    match command {
        UsersCommand::List { search } => {
            output::table("Users", &page.filtered_table(search.as_deref().unwrap_or_default()));
        }
        UsersCommand::Add(fields) => {
            page.show_add_modal();
            fields.apply(page.form_mut().draft_mut());
            page.submit().await?;
            output::table("Users", &page.table());
        }
        UsersCommand::Edit { id, fields } => {
            page.edit(id)?;
            fields.apply(page.form_mut().draft_mut());
            page.submit().await?;
            output::table("Users", &page.table());
        }
        UsersCommand::Delete { id } => {
            page.request_delete(id)?;
            page.confirm_delete().await?;
            output::table("Users", &page.table());
        }
        UsersCommand::Products { id } => {
            let table = page.user_products(id).await?;
            let title = format!("Products of {}", page.fullname(id).unwrap_or_default());
            output::table(&title, &table);
        }
    }
    Ok(())
}

async fn categories(
    page: &mut CategoriesPage<Api>,
    command: CategoriesCommand,
) -> Result<(), AdminError> {
    page.load().await?;
    match command {
        CategoriesCommand::List { search } => {
            let table = page.filtered_table(search.as_deref().unwrap_or_default());
            output::table("Categories", &table);
            if MEMBERSHIP == Membership::Unsupported {
                println!("User counts are not available from the backend.");
            }
        }
        CategoriesCommand::Add(fields) => {
            page.show_add_modal();
            fields.apply(page.form_mut().draft_mut());
            page.submit().await?;
            output::table("Categories", &page.table());
        }
        CategoriesCommand::Edit { id, fields } => {
            page.edit(id)?;
            fields.apply(page.form_mut().draft_mut());
            page.submit().await?;
            output::table("Categories", &page.table());
        }
        CategoriesCommand::Delete { id } => {
            page.request_delete(id)?;
            page.confirm_delete().await?;
            output::table("Categories", &page.table());
        }
        CategoriesCommand::Users { id } => {
            output::table("Category users", &page.category_users(id)?);
        }
    }
    Ok(())
}

async fn whoami(session: PageSession<Api>) -> Result<(), AdminError> {
    let mut page = DashboardPage::new(session);
    let user = page.authorize().await?;
    println!("{} <{}>", user.fullname, user.email);
    if let Some(role) = page.role_label() {
        println!("Role: {role}");
    }
    Ok(())
}

async fn logout(session: PageSession<Api>) -> Result<(), AdminError> {
    let mut page = DashboardPage::new(session);
    let result = page.logout().await;
    output::banner(page.session_mut().banner_mut());
    let next = result?;
    println!("Next: {next}");
    Ok(())
}

async fn open_dashboard(page: &mut DashboardPage<Api>) -> Result<(), AdminError> {
    page.authorize().await?;
    let result = page.load().await;
    if result.is_err() {
        output::banner(page.session_mut().banner_mut());
    }
    result
}

fn print_dashboard(page: &mut DashboardPage<Api>) {
    output::banner(page.session_mut().banner_mut());
    if let (Some(user), Some(role)) = (page.current_user(), page.role_label()) {
        println!("Signed in as {} ({role})", user.fullname);
    }
    let navigation: Vec<&str> = page.navigation().into_iter().map(|item| item.label()).collect();
    println!("Navigation: {}", navigation.join(" | "));

    output::table("Overview", &page.overview_table());
    output::table("Recent products", &page.recent_products_table());
    output::table("Top users", &page.top_users_table());
    output::table("Prices", &page.price_summary_table());
    output::table("Price distribution", &page.price_distribution_table());
}

async fn dashboard(
    session: PageSession<Api>,
    watch: bool,
    config: &AdminConfig,
) -> Result<(), AdminError> {
    let mut page = DashboardPage::new(session);
    open_dashboard(&mut page).await?;
    print_dashboard(&mut page);
    if !watch {
        return Ok(());
    }

    let page = Arc::new(Mutex::new(page));
    let handle = start_dashboard_refresh(page, config.dashboard_refresh(), print_dashboard);
    println!(
        "\nRefreshing every {}s, press Ctrl-C to stop",
        config.dashboard_refresh().as_secs()
    );
    tokio::signal::ctrl_c().await?;
    handle.abort();
    Ok(())
}

async fn report(session: PageSession<Api>, out: PathBuf) -> Result<(), AdminError> {
    let mut page = DashboardPage::new(session);
    open_dashboard(&mut page).await?;
    let result = page
        .write_report(&out, chrono::Local::now().naive_local())
        .await;
    output::banner(page.session_mut().banner_mut());
    println!("Saved to {}", result?.display());
    Ok(())
}
