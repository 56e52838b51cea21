use serde::Deserialize;
use serde_json::Value;

/// Backend envelope: `{ "data": ... }`. The payload stays untyped until it has
/// been checked against a product shape.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub data: Value,
}
