//! Shape validation for untrusted product data.
//!
//! Input arrives either from HTML forms (after [`coerce`]) or from backend JSON
//! responses. [`Schema::parse`] checks every declared field against its kind and
//! collects all mismatches before deserializing, then applies the `validator`
//! constraints declared on the target type. Undeclared fields are dropped.

pub mod coerce;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Integer,
    Boolean,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Boolean => "boolean",
        }
    }
}

/// One mismatch between a value and the shape it was checked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaIssue {
    pub path: String,
    pub expected: &'static str,
    pub received: String,
}

impl SchemaIssue {
    fn new(path: impl Into<String>, expected: &'static str, received: Option<&Value>) -> Self {
        Self {
            path: path.into(),
            expected,
            received: describe(received),
        }
    }
}

impl fmt::Display for SchemaIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            &self.path
        };
        write!(
            f,
            "{path}: expected {}, received {}",
            self.expected, self.received
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} schema issue(s): {}", .issues.len(), join_issues(.issues))]
pub struct SchemaError {
    pub issues: Vec<SchemaIssue>,
}

impl SchemaError {
    fn single(issue: SchemaIssue) -> Self {
        Self {
            issues: vec![issue],
        }
    }

    fn prefixed(self, prefix: &str) -> Vec<SchemaIssue> {
        self.issues
            .into_iter()
            .map(|mut issue| {
                issue.path = if issue.path.is_empty() {
                    prefix.to_string()
                } else {
                    format!("{prefix}.{}", issue.path)
                };
                issue
            })
            .collect()
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        let mut issues: Vec<SchemaIssue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| SchemaIssue {
                    path: field.to_string(),
                    expected: "valid value",
                    received: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string()),
                })
            })
            .collect();
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        Self { issues }
    }
}

impl From<SchemaError> for shared::errors::ServiceError {
    fn from(err: SchemaError) -> Self {
        shared::errors::ServiceError::Validation(
            err.issues.iter().map(ToString::to_string).collect(),
        )
    }
}

fn join_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe(value: Option<&Value>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(v) => v.to_string(),
    }
}

/// A record shape with declared, typed fields.
pub trait Schema: DeserializeOwned + Validate + Sized {
    const FIELDS: &'static [(&'static str, FieldKind)];

    fn parse(value: &Value) -> Result<Self, SchemaError> {
        let Some(object) = value.as_object() else {
            return Err(SchemaError::single(SchemaIssue::new(
                "",
                "object",
                Some(value),
            )));
        };

        let mut issues = Vec::new();
        let mut projected = Map::with_capacity(Self::FIELDS.len());

        for (name, kind) in Self::FIELDS {
            match object.get(*name) {
                Some(field) if kind.accepts(field) => {
                    projected.insert((*name).to_string(), field.clone());
                }
                other => issues.push(SchemaIssue::new(*name, kind.as_str(), other)),
            }
        }

        if !issues.is_empty() {
            return Err(SchemaError { issues });
        }

        let parsed: Self = serde_json::from_value(Value::Object(projected)).map_err(|e| {
            SchemaError::single(SchemaIssue {
                path: String::new(),
                expected: "deserializable record",
                received: e.to_string(),
            })
        })?;

        parsed.validate()?;

        Ok(parsed)
    }
}

/// Validates an array where every element must satisfy `T`.
pub fn parse_list<T: Schema>(value: &Value) -> Result<Vec<T>, SchemaError> {
    let Some(items) = value.as_array() else {
        return Err(SchemaError::single(SchemaIssue::new(
            "",
            "array",
            Some(value),
        )));
    };

    let mut parsed = Vec::with_capacity(items.len());
    let mut issues = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match T::parse(item) {
            Ok(record) => parsed.push(record),
            Err(err) => issues.extend(err.prefixed(&format!("[{index}]"))),
        }
    }

    if issues.is_empty() {
        Ok(parsed)
    } else {
        Err(SchemaError { issues })
    }
}
