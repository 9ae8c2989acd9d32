//! Dashboard aggregation for the inventory admin panel
//!
//! Everything here is a pure function of already-loaded collections. Nothing
//! is fetched and nothing is cached; the dashboard recomputes these after
//! every load.

use std::collections::HashMap;

use inv_model::{Category, Id, Product, User};
use rust_decimal::Decimal;

/// How many rows the "recent products" and "top users" panels show
pub const DASHBOARD_LIST_LIMIT: usize = 5;

/// Price bucket bounds in đồng, half-open `[min, max)`; `None` is unbounded
pub const PRICE_BUCKET_BOUNDS: [(i64, Option<i64>); 4] = [
    (0, Some(100_000)),
    (100_000, Some(500_000)),
    (500_000, Some(1_000_000)),
    (1_000_000, None),
];

/// Headline numbers shown on the dashboard cards and in the exported report
#[derive(Debug, Clone, PartialEq)]
pub struct Overview {
    pub total_products: usize,
    pub total_users: usize,
    pub total_categories: usize,
    /// Σ price × quantity
    pub total_value: Decimal,
    /// Mean unit price, zero when there are no products
    pub average_price: Decimal,
}

/// Compute the overview from the three collections.
pub fn overview(products: &[Product], users: &[User], categories: &[Category]) -> Overview {
    Overview {
        total_products: products.len(),
        total_users: users.len(),
        total_categories: categories.len(),
        total_value: total_inventory_value(products),
        average_price: average_price(products),
    }
}

/// Total stock value: the sum of `price * quantity` over all products.
pub fn total_inventory_value(products: &[Product]) -> Decimal {
    products
        .iter()
        .map(|p| p.price * Decimal::from(p.quantity))
        .sum()
}

/// Mean unit price.
///
/// Returns zero for an empty collection rather than failing.
pub fn average_price(products: &[Product]) -> Decimal {
    if products.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = products.iter().map(|p| p.price).sum();
    sum / Decimal::from(products.len())
}

/// The newest products, assuming a higher id means a newer record.
pub fn recent_products(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut recent: Vec<&Product> = products.iter().collect();
    recent.sort_by(|a, b| b.id.cmp(&a.id));
    recent.truncate(limit);
    recent
}

/// Number of products owned by each user id
pub fn product_counts(products: &[Product]) -> HashMap<Id, usize> {
    let mut counts = HashMap::new();
    for user_id in products.iter().filter_map(|p| p.user_id) {
        *counts.entry(user_id).or_insert(0) += 1;
    }
    counts
}

/// A user joined with the number of products they own
#[derive(Debug, Clone, PartialEq)]
pub struct UserProducts<'a> {
    pub user: &'a User,
    pub product_count: usize,
}

/// Join every user with their product count, in user collection order.
pub fn user_product_counts<'a>(users: &'a [User], products: &[Product]) -> Vec<UserProducts<'a>> {
    let counts = product_counts(products);
    users
        .iter()
        .map(|user| UserProducts {
            user,
            product_count: counts.get(&user.id).copied().unwrap_or(0),
        })
        .collect()
}

/// Users ranked by product count, highest first.
///
/// The sort is stable, so ties keep collection order.
pub fn top_users<'a>(
    users: &'a [User],
    products: &[Product],
    limit: usize,
) -> Vec<UserProducts<'a>> {
    let mut ranked = user_product_counts(users, products);
    ranked.sort_by(|a, b| b.product_count.cmp(&a.product_count));
    ranked.truncate(limit);
    ranked
}

/// One price range and how many products fall in it
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBucket {
    pub min: Decimal,
    /// Exclusive upper bound, `None` for the open-ended top bucket
    pub max: Option<Decimal>,
    pub count: usize,
    /// Share of all products, 0.0 to 100.0
    pub percentage: f64,
}

impl PriceBucket {
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceAnalysis {
    pub min: Decimal,
    pub average: Decimal,
    pub max: Decimal,
    pub buckets: Vec<PriceBucket>,
}

/// Min/average/max and the bucket distribution of unit prices.
///
/// Returns `None` when there are no products to analyse.
pub fn price_analysis(products: &[Product]) -> Option<PriceAnalysis> {
    let min = products.iter().map(|p| p.price).min()?;
    let max = products.iter().map(|p| p.price).max()?;
    let total = products.len() as f64;

    let buckets = PRICE_BUCKET_BOUNDS
        .iter()
        .map(|&(min, max)| {
            let mut bucket = PriceBucket {
                min: Decimal::from(min),
                max: max.map(Decimal::from),
                count: 0,
                percentage: 0.0,
            };
            bucket.count = products.iter().filter(|p| bucket.contains(p.price)).count();
            bucket.percentage = bucket.count as f64 / total * 100.0;
            bucket
        })
        .collect();

    Some(PriceAnalysis {
        min,
        average: average_price(products),
        max,
        buckets,
    })
}
