use crate::schema::{FieldKind, Schema};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Submitted form fields, name to raw text, exactly as the browser sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// True when any submitted field is the empty string.
    pub fn has_empty_field(&self) -> bool {
        self.0.values().any(String::is_empty)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Creation payload. The backend assigns `id` and defaults `availability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DraftProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub price: f64,
}

impl Schema for DraftProduct {
    const FIELDS: &'static [(&'static str, FieldKind)] =
        &[("name", FieldKind::Text), ("price", FieldKind::Number)];
}

/// Full replacement payload sent when an edited product is saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateProduct {
    pub id: i64,

    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub price: f64,

    pub availability: bool,
}

impl Schema for UpdateProduct {
    const FIELDS: &'static [(&'static str, FieldKind)] = &[
        ("id", FieldKind::Integer),
        ("name", FieldKind::Text),
        ("price", FieldKind::Number),
        ("availability", FieldKind::Boolean),
    ];
}
