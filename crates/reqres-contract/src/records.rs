// crates/reqres-contract/src/records.rs
// ============================================================================
// Module: Data Records
// Description: Flat serde records mirroring reqres request and response JSON.
// Purpose: Replace dynamic field lookups with typed decoding.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Records are immutable value types scoped to one scenario. Response records
//! reject missing or `null` required fields at decode time; unknown fields are
//! ignored so additive service changes do not break decoding.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Listing Records
// ============================================================================

/// User entry from `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub id: u64,
    /// Email address.
    pub email: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Avatar image URL.
    pub avatar: String,
}

/// Color entry from `GET /api/unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Color identifier.
    pub id: u64,
    /// Color name.
    pub name: String,
    /// Year the color was introduced.
    pub year: i32,
    /// Hex color code (for example `#98B2D1`).
    pub color: String,
    /// Pantone reference.
    pub pantone_value: String,
}

/// Support banner attached to listing responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportInfo {
    /// Support URL.
    pub url: String,
    /// Support text.
    pub text: String,
}

/// Paginated listing envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Current page number (1-based).
    pub page: u32,
    /// Entries per page.
    pub per_page: u32,
    /// Total entries across all pages.
    pub total: u32,
    /// Total number of pages.
    pub total_pages: u32,
    /// Entries on this page.
    pub data: Vec<T>,
    /// Optional support banner.
    #[serde(default)]
    pub support: Option<SupportInfo>,
}

// ============================================================================
// SECTION: Registration Records
// ============================================================================

/// Body of `POST /api/register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Email to register.
    pub email: String,
    /// Password; empty triggers the failure path.
    pub password: String,
}

impl RegistrationRequest {
    /// Builds a registration request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSuccess {
    /// Assigned user identifier.
    pub id: u64,
    /// Session token.
    pub token: String,
}

/// Failed registration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFailure {
    /// Error message.
    pub error: String,
}

// ============================================================================
// SECTION: Job Records
// ============================================================================

/// Name and job pair sent to `POST /api/users` and `PUT /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignment {
    /// Person name.
    pub name: String,
    /// Job title.
    pub job: String,
}

impl JobAssignment {
    /// Builds a name/job pair.
    #[must_use]
    pub fn new(name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            job: job.into(),
        }
    }
}

/// Response of `PUT /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignmentUpdated {
    /// Echoed name.
    pub name: String,
    /// Echoed job.
    pub job: String,
    /// RFC 3339 update timestamp.
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// Response of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobAssignmentCreated {
    /// Echoed name.
    pub name: String,
    /// Echoed job.
    pub job: String,
    /// Assigned identifier (the service returns it as a string).
    pub id: String,
    /// RFC 3339 creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

// ============================================================================
// SECTION: Tests
// ============================================================================
