//! Dashboard: who is signed in, headline statistics, exported report

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use inv_client::InventoryApi;
use inv_model::{Category, CurrentUser, Product, User};
use inv_stats::{DASHBOARD_LIST_LIMIT, Overview, PriceAnalysis};

use crate::{
    error::AdminError,
    format::{format_currency, format_percentage},
    report::Report,
    session::PageSession,
    view::{Cell, Row, Table},
};

pub const LOGIN_PATH: &str = "/web/login";

pub const OVERVIEW_COLUMNS: [&str; 2] = ["Metric", "Value"];
pub const RECENT_PRODUCT_COLUMNS: [&str; 3] = ["Product", "Price", "Quantity"];
pub const TOP_USER_COLUMNS: [&str; 3] = ["User", "Email", "Products"];
pub const PRICE_SUMMARY_COLUMNS: [&str; 3] = ["Lowest price", "Average price", "Highest price"];
pub const PRICE_DISTRIBUTION_COLUMNS: [&str; 3] = ["Range", "Products", "Share"];

const NO_PRICES: &str = "No products to analyse";

/// Login page URL carrying a reason for the redirect
pub fn login_url(reason: &str) -> String {
    format!("{LOGIN_PATH}?error={}", reason.replace(' ', "+"))
}

/// Sidebar entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Products,
    Users,
    Categories,
    Administration,
}

impl NavItem {
    pub fn label(self) -> &'static str {
        match self {
            Self::Products => "Products",
            Self::Users => "Users",
            Self::Categories => "Categories",
            Self::Administration => "Administration",
        }
    }
}

/// The three collections the statistics are computed from
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub categories: Vec<Category>,
}

#[derive(Debug)]
pub struct DashboardPage<A> {
    session: PageSession<A>,
    data: DashboardData,
    current_user: Option<CurrentUser>,
}

impl<A: InventoryApi> DashboardPage<A> {
    pub fn new(session: PageSession<A>) -> Self {
        Self {
            session,
            data: DashboardData::default(),
            current_user: None,
        }
    }

    pub fn session(&self) -> &PageSession<A> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut PageSession<A> {
        &mut self.session
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    /// Confirm there is a signed-in session before anything else is loaded.
    pub async fn authorize(&mut self) -> Result<&CurrentUser, AdminError> {
        let reason = match self.session.api().current_user().await {
            Ok(me) if me.success => match me.user {
                Some(user) => {
                    tracing::info!(user_id = user.id, admin = user.is_admin, "Signed in");
                    return Ok(self.current_user.insert(user));
                }
                None => "Please sign in",
            },
            Ok(me) => {
                tracing::debug!(message = me.message.as_deref(), "No active session");
                "Please sign in"
            }
            Err(e) => {
                tracing::warn!("Session check failed: {e}");
                "Authentication error"
            }
        };
        self.current_user = None;
        Err(AdminError::AuthRequired {
            login_url: login_url(reason),
        })
    }

    /// "Administrator" or "User"
    pub fn role_label(&self) -> Option<&'static str> {
        self.current_user
            .as_ref()
            .map(|u| if u.is_admin { "Administrator" } else { "User" })
    }

    /// Admin-only entries are left out for plain users.
    pub fn navigation(&self) -> Vec<NavItem> {
        let is_admin = self.current_user.as_ref().is_some_and(|u| u.is_admin);
        if is_admin {
            vec![
                NavItem::Products,
                NavItem::Users,
                NavItem::Categories,
                NavItem::Administration,
            ]
        } else {
            vec![NavItem::Products]
        }
    }

    /// Fetch all three collections. Any failure keeps the previous data.
    pub async fn load(&mut self) -> Result<(), AdminError> {
        self.session.info("Loading dashboard data...");

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
                    "Dashboard loaded"
                );
                self.data = DashboardData {
                    products,
                    users,
                    categories,
                };
                self.session.banner_mut().clear();
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load dashboard data: {e}");
                self.session
                    .error("Failed to load dashboard data: One or more APIs did not respond");
                Err(AdminError::Fetch(e))
            }
        }
    }

    pub fn overview(&self) -> Overview {
        inv_stats::overview(&self.data.products, &self.data.users, &self.data.categories)
    }

    pub fn overview_table(&self) -> Table {
        let overview = self.overview();
        let metric = |name: &str, value: Cell| Row::anonymous(vec![Cell::Text(name.to_string()), value]);
        Table {
            columns: OVERVIEW_COLUMNS.to_vec(),
            rows: vec![
                metric("Products", Cell::Badge(overview.total_products)),
                metric("Users", Cell::Badge(overview.total_users)),
                metric("Categories", Cell::Badge(overview.total_categories)),
                metric("Inventory value", Cell::Money(overview.total_value)),
                metric("Average price", Cell::Money(overview.average_price)),
            ],
        }
    }

    pub fn recent_products_table(&self) -> Table {
        let recent = inv_stats::recent_products(&self.data.products, DASHBOARD_LIST_LIMIT);
        Table::from_records(&RECENT_PRODUCT_COLUMNS, "No products yet", recent, |p| {
            Row::record(
                p.id,
                vec![
                    Cell::Text(p.title.clone()),
                    Cell::Money(p.price),
                    Cell::Integer(p.quantity.into()),
                ],
            )
        })
    }

    pub fn top_users_table(&self) -> Table {
        if self.data.users.is_empty() {
            return Table::placeholder(&TOP_USER_COLUMNS, "No users yet");
        }
        let top = inv_stats::top_users(&self.data.users, &self.data.products, DASHBOARD_LIST_LIMIT);
        if top.iter().all(|entry| entry.product_count == 0) {
            return Table::placeholder(&TOP_USER_COLUMNS, "No users have products yet");
        }
        Table::from_records(&TOP_USER_COLUMNS, "No users yet", top, |entry| {
            Row::record(
                entry.user.id,
                vec![
                    Cell::Text(entry.user.fullname.clone()),
                    Cell::Text(entry.user.email.clone()),
                    Cell::Badge(entry.product_count),
                ],
            )
        })
    }

    pub fn price_analysis(&self) -> Option<PriceAnalysis> {
        inv_stats::price_analysis(&self.data.products)
    }

    pub fn price_summary_table(&self) -> Table {
        match self.price_analysis() {
            Some(analysis) => Table {
                columns: PRICE_SUMMARY_COLUMNS.to_vec(),
                rows: vec![Row::anonymous(vec![
                    Cell::Money(analysis.min),
                    Cell::Money(analysis.average),
                    Cell::Money(analysis.max),
                ])],
            },
            None => Table::placeholder(&PRICE_SUMMARY_COLUMNS, NO_PRICES),
        }
    }

    pub fn price_distribution_table(&self) -> Table {
        let Some(analysis) = self.price_analysis() else {
            return Table::placeholder(&PRICE_DISTRIBUTION_COLUMNS, NO_PRICES);
        };
        Table::from_records(
            &PRICE_DISTRIBUTION_COLUMNS,
            NO_PRICES,
            analysis.buckets,
            |bucket| {
                let range = match bucket.max {
                    Some(max) if bucket.min.is_zero() => format!("< {}", format_currency(max)),
                    Some(max) => format!(
                        "{} - {}",
                        format_currency(bucket.min),
                        format_currency(max)
                    ),
                    None => format!("> {}", format_currency(bucket.min)),
                };
                Row::anonymous(vec![
                    Cell::Text(range),
                    Cell::Badge(bucket.count),
                    Cell::Text(format_percentage(bucket.percentage)),
                ])
            },
        )
    }

    pub fn report(&self, generated_at: NaiveDateTime) -> Report {
        Report::build(&self.overview(), generated_at)
    }

    /// Build the report and save it under `dir`.
    pub async fn write_report(
        &mut self,
        dir: &Path,
        generated_at: NaiveDateTime,
    ) -> Result<PathBuf, AdminError> {
        self.session.info("Generating report...");
        let report = self.report(generated_at);
        match report.write_to(dir).await {
            Ok(path) => {
                tracing::info!(path = %path.display(), "Report written");
                self.session.success("Report generated and saved successfully!");
                Ok(path)
            }
            Err(e) => {
                tracing::error!("Failed to write report: {e}");
                self.session.error(format!("Failed to write report: {e}"));
                Err(AdminError::Io(e))
            }
        }
    }

    /// End the backend session, returning where to navigate next.
    pub async fn logout(&mut self) -> Result<String, AdminError> {
        match self.session.api().logout().await {
            Ok(response) if response.success => {
                tracing::info!("Signed out");
                self.current_user = None;
                self.session.success("Signed out successfully!");
                Ok(LOGIN_PATH.to_string())
            }
            Ok(response) => {
                let reason = response.message.unwrap_or_default();
                self.session.error(format!("Failed to sign out: {reason}"));
                Err(AdminError::Refused(reason))
            }
            Err(e) => {
                tracing::error!("Logout failed: {e}");
                self.session.error("Connection error. Please try again.");
                Err(AdminError::Mutation(e))
            }
        }
    }
}
