//! HTML forms only carry text. These helpers turn form text into the JSON types
//! the product shapes declare. Text that cannot be coerced is passed through
//! unchanged so that validation reports it.

use crate::domain::requests::product::FormData;
use serde_json::{Map, Value};

pub fn number(text: &str) -> Value {
    match text.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(text.to_string())),
        _ => Value::String(text.to_string()),
    }
}

pub fn integer(text: &str) -> Value {
    match text.trim().parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(text.to_string()),
    }
}

pub fn boolean(text: &str) -> Value {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(text.to_string())
    }
}

fn draft_fields(form: &FormData) -> Map<String, Value> {
    let mut object = Map::new();
    if let Some(name) = form.get("name") {
        object.insert("name".into(), Value::String(name.to_string()));
    }
    if let Some(price) = form.get("price") {
        object.insert("price".into(), number(price));
    }
    object
}

/// `{ name, price }` from a create form. Missing fields stay missing.
pub fn draft_payload(form: &FormData) -> Value {
    Value::Object(draft_fields(form))
}

/// Full product payload from an edit form, with the id taken from the route.
pub fn product_payload(form: &FormData, id: i64) -> Value {
    let mut object = draft_fields(form);
    object.insert("id".into(), Value::from(id));
    if let Some(availability) = form.get("availability") {
        object.insert("availability".into(), boolean(availability));
    }
    Value::Object(object)
}
