//! Response normalization.
//!
//! Mutating endpoints answer `{success, data, message?}` and some return HTTP
//! 200 with `success: false`, so success is decided by the flag. List
//! endpoints answer in several shapes; [`normalize_list`] accepts:
//!
//! * a bare array: `[...]`
//! * a data wrapper: `{"data": [...]}`
//! * a paginated wrapper: `{"data": {"data": [...]}}`
//! * a named collection: `{"employees": [...]}` for any key passed in `keys`
//!
//! `null` is treated as an empty list. Anything else is a decode error.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<Value>,
}

impl<T> ApiEnvelope<T> {
    /// Payload of a successful envelope; `success: false` becomes a business
    /// rejection carrying the backend's message.
    pub fn into_result(self, http_status: u16) -> Result<Option<T>, ApiError> {
        if self.success == Some(false) {
            return Err(ApiError::Rejected {
                status: Some(http_status),
                message: self
                    .message
                    .or_else(|| self.errors.as_ref().and_then(first_error_message))
                    .unwrap_or_else(|| "the request was rejected".to_string()),
            });
        }
        Ok(self.data)
    }
}

/// First human-readable message in a Laravel-style `errors` object.
pub(crate) fn first_error_message(errors: &Value) -> Option<String> {
    match errors {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => items.iter().find_map(first_error_message),
        Value::Object(fields) => fields.values().find_map(first_error_message),
        _ => None,
    }
}

/// Message a backend error body carries, checked in `message`, `error`, then
/// `errors`.
pub(crate) fn error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    object
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| object.get("error").and_then(Value::as_str))
        .map(str::to_string)
        .or_else(|| object.get("errors").and_then(first_error_message))
        .filter(|message| !message.trim().is_empty())
}

/// Decode a list response of any supported shape into `Vec<T>`.
pub fn normalize_list<T: DeserializeOwned>(
    endpoint: &str,
    body: Value,
    keys: &[&str],
) -> Result<Vec<T>, ApiError> {
    let list = extract_list(body, keys).ok_or_else(|| {
        ApiError::decode(endpoint, "response did not contain a list")
    })?;
    serde_json::from_value(list).map_err(|err| ApiError::decode(endpoint, err))
}

fn extract_list(body: Value, keys: &[&str]) -> Option<Value> {
    match body {
        Value::Null => Some(Value::Array(Vec::new())),
        Value::Array(_) => Some(body),
        Value::Object(mut fields) => {
            if fields.get("success").and_then(Value::as_bool) == Some(false) {
                return None;
            }
            if let Some(data) = fields.remove("data") {
                if let Some(list) = extract_list(data, keys) {
                    return Some(list);
                }
            }
            keys.iter().find_map(|key| match fields.remove(*key) {
                Some(value @ Value::Array(_)) => Some(value),
                _ => None,
            })
        }
        _ => None,
    }
}
