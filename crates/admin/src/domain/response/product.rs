use crate::schema::{FieldKind, Schema};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product as the backend stores it. Only field kinds are checked here; the
/// non-empty rules belong to submitted payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Product {
    pub id: i64,

    pub name: String,

    pub price: f64,

    pub availability: bool,
}

impl Schema for Product {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("id", FieldKind::Integer),
        ("name", FieldKind::Text),
        ("price", FieldKind::Number),
        ("availability", FieldKind::Boolean),
    ];
}
