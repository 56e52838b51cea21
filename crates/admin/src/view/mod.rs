use crate::domain::{requests::product::FormData, response::product::Product};
use askama::Template;
use axum::response::Html;
use shared::errors::HttpError;
use tracing::error;

/// Formats a price as US dollars, e.g. `$1,234.50`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{fraction:02}")
}

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub available: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: format_currency(product.price),
            available: product.availability,
        }
    }
}

#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsPage {
    pub products: Vec<ProductRow>,
}

impl ProductsPage {
    pub fn new(products: &[Product]) -> Self {
        Self {
            products: products.iter().map(ProductRow::from).collect(),
        }
    }
}

#[derive(Template, Default)]
#[template(path = "new_product.html")]
pub struct NewProductPage {
    pub error: Option<String>,
    pub name: String,
    pub price: String,
}

impl NewProductPage {
    /// Re-shows the submitted values above the error.
    pub fn with_error(form: &FormData, message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            name: form.get("name").unwrap_or_default().to_string(),
            price: form.get("price").unwrap_or_default().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "edit_product.html")]
pub struct EditProductPage {
    pub id: i64,
    pub error: Option<String>,
    pub name: String,
    pub price: String,
    pub availability: bool,
}

impl EditProductPage {
    pub fn new(product: &Product) -> Self {
        Self {
            id: product.id,
            error: None,
            name: product.name.clone(),
            price: product.price.to_string(),
            availability: product.availability,
        }
    }

    pub fn with_error(id: i64, form: &FormData, message: &str) -> Self {
        Self {
            id,
            error: Some(message.to_string()),
            name: form.get("name").unwrap_or_default().to_string(),
            price: form.get("price").unwrap_or_default().to_string(),
            availability: form.get("availability") != Some("false"),
        }
    }
}

#[derive(Template)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeletePage {
    pub id: i64,
    pub prompt: &'static str,
    pub error: Option<String>,
}

impl ConfirmDeletePage {
    pub fn new(id: i64, prompt: &'static str) -> Self {
        Self {
            id,
            prompt,
            error: None,
        }
    }

    pub fn with_error(id: i64, prompt: &'static str, message: &str) -> Self {
        Self {
            error: Some(message.to_string()),
            ..Self::new(id, prompt)
        }
    }
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, HttpError> {
    page.render().map(Html).map_err(|e| {
        error!("Failed to render template: {e}");
        HttpError::Internal("Failed to render page".to_string())
    })
}
