//! Form drafts and the client-side rules applied before anything is sent.
//!
//! Each field reports only its first failing rule. Field names match the
//! backend's `fieldErrors[].field` so server and client errors land on the
//! same control.

use std::{str::FromStr, sync::LazyLock};

use inv_model::{
    Category, CategoryInput, FieldError, Id, Product, ProductInput, User, UserInput,
};
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidateEmail;

use crate::form::{Draft, FormMode};

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 255;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;
pub const QUANTITY_MAX: i32 = 10_000;
pub const FULLNAME_MIN_CHARS: usize = 2;
pub const FULLNAME_MAX_CHARS: usize = 100;
pub const EMAIL_MAX_CHARS: usize = 100;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const PASSWORD_MAX_CHARS: usize = 100;
pub const PHONE_MAX_CHARS: usize = 15;
pub const CATEGORY_NAME_MIN_CHARS: usize = 2;
pub const CATEGORY_NAME_MAX_CHARS: usize = 100;
pub const IMAGE_URL_MAX_CHARS: usize = 500;

/// 99,999,999.99
pub const PRICE_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

static FULLNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\s]+$").expect("full name pattern is valid"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\+84|0)[0-9]{9,10}$").expect("phone pattern is valid"));

type Rule<T> = Result<T, &'static str>;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Empty or whitespace-only input means "not provided"
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Run one field's rule, recording its message under `field` on failure.
fn check<T>(errors: &mut Vec<FieldError>, field: &str, rule: Rule<T>) -> Option<T> {
    match rule {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(FieldError::new(field, message));
            None
        }
    }
}

pub fn validate_title(title: &str) -> Rule<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Product title is required");
    }
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&char_len(title)) {
        return Err("Title must be between 3 and 255 characters");
    }
    Ok(title.to_string())
}

pub fn validate_price(price: &str) -> Rule<Decimal> {
    let price = Decimal::from_str(price.trim()).map_err(|_| "Price must be greater than 0")?;
    if price <= Decimal::ZERO {
        return Err("Price must be greater than 0");
    }
    if price > PRICE_MAX {
        return Err("Price must not exceed 99,999,999.99");
    }
    Ok(price)
}

pub fn validate_quantity(quantity: &str) -> Rule<i32> {
    let quantity: i32 = quantity
        .trim()
        .parse()
        .map_err(|_| "Quantity must be greater than or equal to 0")?;
    if quantity < 0 {
        return Err("Quantity must be greater than or equal to 0");
    }
    if quantity > QUANTITY_MAX {
        return Err("Quantity must not exceed 10000");
    }
    Ok(quantity)
}

pub fn validate_description(description: &str) -> Rule<Option<String>> {
    if char_len(description) > DESCRIPTION_MAX_CHARS {
        return Err("Description must not exceed 1000 characters");
    }
    Ok(non_blank(description))
}

pub fn validate_fullname(fullname: &str) -> Rule<String> {
    let fullname = fullname.trim();
    if fullname.is_empty() {
        return Err("Full name is required");
    }
    if !(FULLNAME_MIN_CHARS..=FULLNAME_MAX_CHARS).contains(&char_len(fullname)) {
        return Err("Full name must be between 2 and 100 characters");
    }
    if !FULLNAME_PATTERN.is_match(fullname) {
        return Err("Full name may only contain letters and spaces");
    }
    Ok(fullname.to_string())
}

pub fn validate_email(email: &str) -> Rule<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Email is required");
    }
    if char_len(email) > EMAIL_MAX_CHARS {
        return Err("Email must not exceed 100 characters");
    }
    if !email.validate_email() {
        return Err("Email is invalid");
    }
    Ok(email.to_string())
}

/// An empty password is only accepted when editing, where it means
/// "keep the current one".
pub fn validate_password(password: &str, mode: FormMode) -> Rule<Option<String>> {
    if password.is_empty() {
        if mode.is_create() {
            return Err("Password is required when creating a user");
        }
        return Ok(None);
    }
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&char_len(password)) {
        return Err("Password must be between 6 and 100 characters");
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(
            "Password must contain at least one lowercase letter, one uppercase letter and one digit",
        );
    }
    Ok(Some(password.to_string()))
}

pub fn validate_phone(phone: &str) -> Rule<Option<String>> {
    let Some(phone) = non_blank(phone) else {
        return Ok(None);
    };
    if char_len(&phone) > PHONE_MAX_CHARS {
        return Err("Phone number must not exceed 15 characters");
    }
    if !PHONE_PATTERN.is_match(&phone) {
        return Err("Phone number is invalid (format: +84xxxxxxxxx or 0xxxxxxxxx)");
    }
    Ok(Some(phone))
}

pub fn validate_category_name(name: &str) -> Rule<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Category name is required");
    }
    if !(CATEGORY_NAME_MIN_CHARS..=CATEGORY_NAME_MAX_CHARS).contains(&char_len(name)) {
        return Err("Category name must be between 2 and 100 characters");
    }
    Ok(name.to_string())
}

pub fn validate_image_url(images: &str) -> Rule<Option<String>> {
    let images = non_blank(images);
    if images.as_deref().is_some_and(|url| char_len(url) > IMAGE_URL_MAX_CHARS) {
        return Err("Image URL must not exceed 500 characters");
    }
    Ok(images)
}

/// Product form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub quantity: String,
    /// Selected owner
    pub user_id: Option<Id>,
    pub images: String,
}

impl Draft for ProductDraft {
    type Entity = Product;

    fn from_entity(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.normalize().to_string(),
            quantity: product.quantity.to_string(),
            user_id: product.user_id,
            images: product.images.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<ProductInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        let title = check(&mut errors, "title", validate_title(&self.title));
        let price = check(&mut errors, "price", validate_price(&self.price));
        let quantity = check(&mut errors, "quantity", validate_quantity(&self.quantity));
        let user_id = check(&mut errors, "userId", self.user_id.ok_or("Please select a user"));
        let description = check(
            &mut errors,
            "description",
            validate_description(&self.description),
        );
        let images = check(&mut errors, "images", validate_image_url(&self.images));

        match (title, price, quantity, user_id, description, images) {
            (Some(title), Some(price), Some(quantity), Some(user_id), Some(description), Some(images))
                if errors.is_empty() =>
            {
                Ok(ProductInput {
                    title,
                    description,
                    price,
                    quantity,
                    user_id,
                    images,
                })
            }
            _ => Err(errors),
        }
    }
}

/// User form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub fullname: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

impl Draft for UserDraft {
    type Entity = User;

    fn from_entity(user: &User) -> Self {
        Self {
            fullname: user.fullname.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            password: String::new(),
        }
    }

    fn validate(&self, mode: FormMode) -> Result<UserInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        let fullname = check(&mut errors, "fullname", validate_fullname(&self.fullname));
        let email = check(&mut errors, "email", validate_email(&self.email));
        let password = check(
            &mut errors,
            "password",
            validate_password(&self.password, mode),
        );
        let phone = check(&mut errors, "phone", validate_phone(&self.phone));

        match (fullname, email, password, phone) {
            (Some(fullname), Some(email), Some(password), Some(phone)) if errors.is_empty() => {
                Ok(UserInput {
                    fullname,
                    email,
                    phone,
                    password,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Category form input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub images: String,
}

impl Draft for CategoryDraft {
    type Entity = Category;

    fn from_entity(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            images: category.images.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, _mode: FormMode) -> Result<CategoryInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        let name = check(&mut errors, "name", validate_category_name(&self.name));
        let images = check(&mut errors, "images", validate_image_url(&self.images));

        match (name, images) {
            (Some(name), Some(images)) if errors.is_empty() => Ok(CategoryInput { name, images }),
            _ => Err(errors),
        }
    }
}
