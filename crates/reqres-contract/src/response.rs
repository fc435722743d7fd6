// crates/reqres-contract/src/response.rs
// ============================================================================
// Module: Contract Response
// Description: A response that already satisfied its contract.
// Purpose: Decode dotted JSON paths of the body into typed records.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! [`ContractResponse`] is only constructed after status and shape checks
//! pass. Extraction selects a subtree by dotted path (`data`, `support.url`)
//! and decodes it with serde; missing paths and decode failures surface as
//! [`ContractError::Deserialization`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ContractError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Response whose status and shape matched the installed contract.
#[derive(Debug, Clone)]
pub struct ContractResponse {
    /// Resolved request URL.
    url: String,
    /// Observed status.
    status: StatusCode,
    /// Parsed JSON body; `None` for empty-body contracts.
    body: Option<Value>,
}

impl ContractResponse {
    /// Wraps a validated response.
    #[must_use]
    pub const fn new(url: String, status: StatusCode, body: Option<Value>) -> Self {
        Self {
            url,
            status,
            body,
        }
    }

    /// Returns the resolved request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the observed status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the parsed JSON body, if any.
    #[must_use]
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Decodes the array at `path` into a list of records.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Deserialization`] when the path is absent, is
    /// not an array, or an element fails to decode.
    pub fn extract_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ContractError> {
        let node = self.select(path)?;
        if !node.is_array() {
            return Err(ContractError::Deserialization {
                path: display_path(path),
                message: format!("expected array, found {}", json_kind(node)),
            });
        }
        decode(node, path)
    }

    /// Decodes the whole body into a record.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Deserialization`] when the body is absent or
    /// fails to decode.
    pub fn extract_one<T: DeserializeOwned>(&self) -> Result<T, ContractError> {
        self.extract_at("")
    }

    /// Decodes the subtree at `path` into a record.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Deserialization`] when the path is absent or
    /// fails to decode.
    pub fn extract_at<T: DeserializeOwned>(&self, path: &str) -> Result<T, ContractError> {
        let node = self.select(path)?;
        decode(node, path)
    }

    /// Resolves a dotted path against the body.
    fn select(&self, path: &str) -> Result<&Value, ContractError> {
        let root = self.body.as_ref().ok_or_else(|| ContractError::Deserialization {
            path: display_path(path),
            message: format!("response from {} has no body", self.url),
        })?;
        if path.is_empty() {
            return Ok(root);
        }
        let mut node = root;
        for segment in path.split('.') {
            let next = match node {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment.parse::<usize>().ok().and_then(|idx| items.get(idx)),
                _ => None,
            };
            node = next.ok_or_else(|| ContractError::Deserialization {
                path: display_path(path),
                message: format!("segment `{segment}` not found"),
            })?;
        }
        Ok(node)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a selected node into `T`.
fn decode<T: DeserializeOwned>(node: &Value, path: &str) -> Result<T, ContractError> {
    T::deserialize(node).map_err(|err| ContractError::Deserialization {
        path: display_path(path),
        message: err.to_string(),
    })
}

/// Renders a path for diagnostics; the root is `$`.
fn display_path(path: &str) -> String {
    if path.is_empty() { "$".to_string() } else { path.to_string() }
}

/// Names the JSON type of a value.
const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
