// crates/reqres-contract/src/contract.rs
// ============================================================================
// Module: Response Contract Specs
// Description: Expected status and minimal body shape for a response class.
// Purpose: Gate body extraction behind a status and JSON Schema check.
// Dependencies: jsonschema, reqwest, serde_json
// ============================================================================

//! ## Overview
//! A [`ResponseContractSpec`] pairs an expected status code with a minimal
//! body shape. Shapes are rendered as draft 2020-12 JSON Schemas and compiled
//! with `jsonschema` at validation time.
//!
//! Default shapes by status family:
//! - `204`: empty body.
//! - other `2xx`: a JSON object.
//! - `4xx`/`5xx`: a JSON object with a string `error` field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use jsonschema::Draft;
use reqwest::StatusCode;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::error::ContractError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum number of body characters echoed into contract diagnostics.
const BODY_PREVIEW_CHARS: usize = 512;

// ============================================================================
// SECTION: Types
// ============================================================================

/// JSON type required for a top-level body field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// JSON integer.
    Integer,
    /// JSON string.
    String,
    /// JSON array.
    Array,
    /// JSON object.
    Object,
}

impl FieldKind {
    /// Returns the JSON Schema `type` keyword for the kind.
    #[must_use]
    pub const fn schema_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

/// Minimal shape a response body must satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyShape {
    /// Body must be empty (ignoring whitespace).
    Empty,
    /// Body must be a JSON object carrying the listed typed fields.
    JsonObject {
        /// Required top-level fields in insertion order.
        required: Vec<(String, FieldKind)>,
    },
}

/// Expected status code plus minimal body shape for one request.
///
/// # Invariants
/// - Created per request context; never shared across scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContractSpec {
    /// Status the response must carry.
    expected_status: StatusCode,
    /// Shape the body must satisfy once the status matches.
    shape: BodyShape,
}

/// Builds the default contract for an expected status.
#[must_use]
pub fn spec_for(expected_status: StatusCode) -> ResponseContractSpec {
    let shape = if expected_status == StatusCode::NO_CONTENT {
        BodyShape::Empty
    } else if expected_status.is_client_error() || expected_status.is_server_error() {
        BodyShape::JsonObject {
            required: vec![("error".to_string(), FieldKind::String)],
        }
    } else {
        BodyShape::JsonObject {
            required: Vec::new(),
        }
    };
    ResponseContractSpec {
        expected_status,
        shape,
    }
}

impl ResponseContractSpec {
    /// 200 with a JSON object body.
    #[must_use]
    pub fn ok() -> Self {
        spec_for(StatusCode::OK)
    }

    /// 200 listing envelope: integer `page` and array `data`.
    #[must_use]
    pub fn listing() -> Self {
        Self::ok().require_field("page", FieldKind::Integer).require_field("data", FieldKind::Array)
    }

    /// 201 with a JSON object body.
    #[must_use]
    pub fn created() -> Self {
        spec_for(StatusCode::CREATED)
    }

    /// 204 with an empty body.
    #[must_use]
    pub fn no_content() -> Self {
        spec_for(StatusCode::NO_CONTENT)
    }

    /// 400 with a string `error` field.
    #[must_use]
    pub fn bad_request() -> Self {
        spec_for(StatusCode::BAD_REQUEST)
    }

    /// Adds a required typed top-level field.
    ///
    /// An [`BodyShape::Empty`] contract becomes a JSON object contract.
    /// Re-registering a field replaces its kind.
    #[must_use]
    pub fn require_field(mut self, name: &str, kind: FieldKind) -> Self {
        match &mut self.shape {
            BodyShape::JsonObject {
                required,
            } => {
                if let Some(entry) = required.iter_mut().find(|(field, _)| field == name) {
                    entry.1 = kind;
                } else {
                    required.push((name.to_string(), kind));
                }
            }
            BodyShape::Empty => {
                self.shape = BodyShape::JsonObject {
                    required: vec![(name.to_string(), kind)],
                };
            }
        }
        self
    }

    /// Replaces the body shape.
    #[must_use]
    pub fn with_shape(mut self, shape: BodyShape) -> Self {
        self.shape = shape;
        self
    }

    /// Returns the expected status.
    #[must_use]
    pub const fn expected_status(&self) -> StatusCode {
        self.expected_status
    }

    /// Returns the body shape.
    #[must_use]
    pub const fn shape(&self) -> &BodyShape {
        &self.shape
    }

    /// Renders the body shape as a JSON Schema, or `None` for empty bodies.
    #[must_use]
    pub fn body_schema(&self) -> Option<Value> {
        let BodyShape::JsonObject {
            required,
        } = &self.shape
        else {
            return None;
        };
        let mut properties = Map::new();
        for (name, kind) in required {
            properties.insert(name.clone(), json!({ "type": kind.schema_type() }));
        }
        let names: Vec<&str> = required.iter().map(|(name, _)| name.as_str()).collect();
        Some(json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": names,
            "properties": properties,
        }))
    }

    /// Checks a raw response against the contract.
    ///
    /// Returns the parsed JSON body for object contracts and `None` for empty
    /// contracts.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ContractViolation`] when the status differs and
    /// [`ContractError::ShapeViolation`] when the body does not match the shape.
    pub fn validate(
        &self,
        method: &str,
        url: &str,
        status: StatusCode,
        body: &[u8],
    ) -> Result<Option<Value>, ContractError> {
        if status != self.expected_status {
            return Err(ContractError::ContractViolation {
                method: method.to_string(),
                url: url.to_string(),
                expected: self.expected_status.as_u16(),
                actual: status.as_u16(),
                body: body_preview(body),
            });
        }
        let Some(schema) = self.body_schema() else {
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(None);
            }
            return Err(ContractError::ShapeViolation {
                url: url.to_string(),
                details: format!("expected empty body, got `{}`", body_preview(body)),
            });
        };
        let instance: Value =
            serde_json::from_slice(body).map_err(|err| ContractError::ShapeViolation {
                url: url.to_string(),
                details: format!("body is not valid json: {err}"),
            })?;
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&schema)
            .map_err(|err| ContractError::Config(format!("invalid contract schema: {err}")))?;
        let messages: Vec<String> =
            validator.iter_errors(&instance).map(|err| err.to_string()).collect();
        if !messages.is_empty() {
            return Err(ContractError::ShapeViolation {
                url: url.to_string(),
                details: messages.join("; "),
            });
        }
        Ok(Some(instance))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders a bounded, lossy UTF-8 preview of a body for diagnostics.
pub(crate) fn body_preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let trimmed = text.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let mut preview: String = trimmed.chars().take(BODY_PREVIEW_CHARS).collect();
    preview.push_str("...");
    preview
}

// ============================================================================
// SECTION: Tests
// ============================================================================
