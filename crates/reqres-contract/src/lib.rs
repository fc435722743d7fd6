// crates/reqres-contract/src/lib.rs
// ============================================================================
// Module: Reqres Contract Library
// Description: Contract-checked HTTP requests and typed records for reqres.
// Purpose: Provide the building blocks of the reqres black-box scenarios.
// Dependencies: jsonschema, reqwest, serde, thiserror, time, tracing, url
// ============================================================================

//! ## Overview
//! This crate hosts the pieces every reqres scenario is assembled from:
//!
//! - [`contract`]: expected status plus minimal body shape.
//! - [`request`]: explicit config and a per-scenario request context.
//! - [`response`]: typed extraction from a contract-checked body.
//! - [`records`]: flat request/response records.
//! - [`checks`]: business invariants over decoded records.
//!
//! A scenario configures a context with a contract, sends one request,
//! extracts records, and runs checks. Every failure is a [`ContractError`].
//!
//! ## Index
//! - Public API: [`configure`], [`spec_for`], [`RequestConfig`], [`RequestContext`],
//!   [`ContractResponse`], [`ContractError`], [`AssertionFailure`]

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod checks;
pub mod contract;
pub mod error;
pub mod records;
pub mod request;
pub mod response;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use contract::BodyShape;
pub use contract::FieldKind;
pub use contract::ResponseContractSpec;
pub use contract::spec_for;
pub use error::AssertionFailure;
pub use error::ContractError;
pub use request::RequestConfig;
pub use request::RequestContext;
pub use request::TranscriptEntry;
pub use request::configure;
pub use response::ContractResponse;
