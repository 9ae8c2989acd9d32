//! Write payloads and the backend's validation failure body.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Id;

/// Body of `POST /api/products` and `PUT /api/products/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub title: String,
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub quantity: i32,
    pub user_id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
}

/// Body of `POST /api/users` and `PUT /api/users/{id}`
///
/// `password` is write-only: it is left out of the JSON entirely when absent,
/// which the backend treats as "keep the current password".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub fullname: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub images: Option<String>,
}

/// A single rejected field, keyed by the form control name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_value: Option<serde_json::Value>,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rejected_value: None,
        }
    }
}

/// Body the backend returns with `400 Bad Request` on validation failure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub field_errors: Vec<FieldError>,
}

impl ValidationErrorBody {
    /// Whether the body carries anything a form can show.
    pub fn is_structured(&self) -> bool {
        !self.field_errors.is_empty()
            || self.message.as_deref().is_some_and(|m| !m.trim().is_empty())
    }

    /// One-line description used in logs and error displays.
    pub fn summary(&self) -> String {
        if self.field_errors.is_empty() {
            return self.message.clone().unwrap_or_default();
        }
        self.field_errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
