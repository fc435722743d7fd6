// crates/reqres-contract/src/error.rs
// ============================================================================
// Module: Contract Errors
// Description: Error taxonomy for contract checks, extraction, and transport.
// Purpose: Surface every failure class to the test runner with diagnostics.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Every failure raised by the request context, the extraction helpers, or the
//! invariant checks is a [`ContractError`]. Nothing is retried or suppressed;
//! callers propagate with `?` and the test runner reports the message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use thiserror::Error;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Errors raised while exercising a response contract.
///
/// # Invariants
/// - Variants are stable for test diagnostics.
/// - String payloads may include untrusted response text.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Observed HTTP status differs from the contract's expected status.
    #[error("contract violation for {method} {url}: expected status {expected}, observed {actual}: {body}")]
    ContractViolation {
        /// HTTP method of the request.
        method: String,
        /// Fully resolved request URL.
        url: String,
        /// Status code registered on the contract.
        expected: u16,
        /// Status code returned by the service.
        actual: u16,
        /// Response body preview.
        body: String,
    },
    /// Response body does not satisfy the contract's shape.
    #[error("response shape violation for {url}: {details}")]
    ShapeViolation {
        /// Fully resolved request URL.
        url: String,
        /// Joined schema validation messages.
        details: String,
    },
    /// Response body is missing expected fields or has the wrong types.
    #[error("deserialization failed at `{path}`: {message}")]
    Deserialization {
        /// Dotted JSON path that was decoded (`$` for the root).
        path: String,
        /// Decoder message.
        message: String,
    },
    /// Business invariant violated.
    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
    /// Network-level failure.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Invalid request configuration.
    #[error("request config error: {0}")]
    Config(String),
}

/// Business invariant failure with expected-vs-actual diagnostics.
///
/// # Invariants
/// - `check` names the invariant that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionFailure {
    /// Name of the failed check.
    pub check: &'static str,
    /// Expected value rendering.
    pub expected: String,
    /// Observed value rendering.
    pub actual: String,
}

impl AssertionFailure {
    /// Builds an assertion failure for the named check.
    #[must_use]
    pub fn new(check: &'static str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            check,
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: expected {}, actual {}", self.check, self.expected, self.actual)
    }
}

impl std::error::Error for AssertionFailure {}
