use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Id;

/// Product model - an inventory line owned by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier
    pub id: Id,
    /// Product title (3 to 255 chars)
    pub title: String,
    /// Optional free-form description (max 1000 chars)
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in đồng, at most 99,999,999.99
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    /// Units in stock (0 to 10,000)
    pub quantity: i32,
    /// Owning user
    #[serde(default)]
    pub user_id: Option<Id>,
    /// Owner's full name, denormalized by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_fullname: Option<String>,
    /// Optional image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
}

/// User model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier
    pub id: Id,
    /// User's full name
    pub fullname: String,
    /// User's email
    pub email: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
}

/// Category model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier
    pub id: Id,
    /// Category name
    pub name: String,
    /// Optional image URL
    #[serde(default)]
    pub images: Option<String>,
}

/// The signed-in account as reported by `/api/auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: Id,
    pub fullname: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_user: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<CurrentUser>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}
