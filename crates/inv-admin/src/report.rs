//! Plain-text summary report of the dashboard overview

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use inv_stats::Overview;

use crate::format::format_currency;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// `inventory-report-YYYY-MM-DD.txt`
    pub file_name: String,
    pub body: String,
}

impl Report {
    pub fn build(overview: &Overview, generated_at: NaiveDateTime) -> Self {
        let body = format!(
            "=== INVENTORY OVERVIEW REPORT ===\n\
             \n\
             Generated at: {generated}\n\
             \n\
             OVERVIEW:\n\
             - Total products: {products}\n\
             - Total users: {users}\n\
             - Total categories: {categories}\n\
             - Total inventory value: {value}\n\
             - Average product price: {average}\n\
             \n\
             === END OF REPORT ===\n",
            generated = generated_at.format("%d/%m/%Y %H:%M:%S"),
            products = overview.total_products,
            users = overview.total_users,
            categories = overview.total_categories,
            value = format_currency(overview.total_value),
            average = format_currency(overview.average_price),
        );

        Self {
            file_name: format!("inventory-report-{}.txt", generated_at.format("%Y-%m-%d")),
            body,
        }
    }

    /// Write the report into `dir`, returning the file path.
    pub async fn write_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.body).await?;
        Ok(path)
    }
}
