//! Client-side search and sort over loaded collections.
//!
//! Searching never touches the canonical collection: it yields a borrowed
//! view. Sorting is the one operation that reorders the collection itself.

use std::{fmt, str::FromStr};

use inv_model::{Category, Product, User};

/// Case-insensitive substring query. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery(String);

impl TextQuery {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.0)
    }

    fn matches_opt(&self, haystack: Option<&str>) -> bool {
        haystack.is_some_and(|h| self.matches(h))
    }
}

pub trait Searchable {
    fn matches(&self, query: &TextQuery) -> bool;
}

impl Searchable for Product {
    fn matches(&self, query: &TextQuery) -> bool {
        query.matches(&self.title) || query.matches_opt(self.description.as_deref())
    }
}

impl Searchable for User {
    fn matches(&self, query: &TextQuery) -> bool {
        query.matches(&self.fullname)
            || query.matches(&self.email)
            || query.matches_opt(self.phone.as_deref())
    }
}

impl Searchable for Category {
    fn matches(&self, query: &TextQuery) -> bool {
        query.matches(&self.name)
    }
}

/// The items matching `query`, in collection order
pub fn filter_view<'a, T: Searchable>(items: &'a [T], query: &TextQuery) -> Vec<&'a T> {
    if query.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.matches(query)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}', expected 'asc' or 'desc'")),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Reorder products by unit price. Equal prices keep their relative order.
pub fn sort_by_price(products: &mut [Product], order: SortOrder) {
    match order {
        SortOrder::Asc => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOrder::Desc => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
}
