// system-tests/src/lib.rs
// ============================================================================
// Module: Reqres System Tests Library
// Description: Shared configuration for reqres black-box scenarios.
// Purpose: Provide common utilities for the system-test binaries.
// Dependencies: reqres-contract, url
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the reqres system-test
//! binaries in `system-tests/tests`. Scenarios target a live service when
//! `REQRES_SYSTEM_TEST_BASE_URL` is set and an in-process stub otherwise.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
