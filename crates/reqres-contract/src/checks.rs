// crates/reqres-contract/src/checks.rs
// ============================================================================
// Module: Invariant Checks
// Description: Business invariants asserted against decoded records.
// Purpose: Report the first violating record with expected-vs-actual values.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Checks are pure functions over records. Each returns an
//! [`AssertionFailure`] naming the check and the offending values; per-record
//! checks pass vacuously on empty input, so listing scenarios pair them with
//! [`check_not_empty`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::Duration;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::AssertionFailure;
use crate::records::ColorRecord;
use crate::records::RegistrationFailure;
use crate::records::RegistrationSuccess;
use crate::records::UserRecord;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Domain suffix shared by every reqres user email.
pub const REQRES_EMAIL_SUFFIX: &str = "@reqres.in";
/// User id the service assigns to the seeded registration account.
pub const EXPECTED_REGISTRATION_ID: u64 = 4;
/// Token the service returns for the seeded registration account.
pub const EXPECTED_REGISTRATION_TOKEN: &str = "QpwL5tke4Pnpja7X4";
/// Error returned when registering without a password.
pub const MISSING_PASSWORD_ERROR: &str = "Missing password";

// ============================================================================
// SECTION: Listing Checks
// ============================================================================

/// Fails when a listing decoded to zero records.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when `records` is empty.
pub fn check_not_empty<T>(label: &'static str, records: &[T]) -> Result<(), AssertionFailure> {
    if records.is_empty() {
        return Err(AssertionFailure::new(label, "at least one record", "0 records"));
    }
    Ok(())
}

/// Every avatar URL embeds the decimal user id.
///
/// # Errors
///
/// Returns [`AssertionFailure`] for the first user whose avatar lacks its id.
pub fn check_avatar_and_id(users: &[UserRecord]) -> Result<(), AssertionFailure> {
    for user in users {
        let id = user.id.to_string();
        if !user.avatar.contains(&id) {
            return Err(AssertionFailure::new(
                "check_avatar_and_id",
                format!("avatar containing `{id}`"),
                user.avatar.clone(),
            ));
        }
    }
    Ok(())
}

/// Every email ends with `suffix`.
///
/// # Errors
///
/// Returns [`AssertionFailure`] for the first email without the suffix.
pub fn check_email_ends(users: &[UserRecord], suffix: &str) -> Result<(), AssertionFailure> {
    match users.iter().find(|user| !user.email.ends_with(suffix)) {
        Some(user) => Err(AssertionFailure::new(
            "check_email_ends",
            format!("email ending with `{suffix}`"),
            user.email.clone(),
        )),
        None => Ok(()),
    }
}

/// The year sequence equals its ascending sort.
///
/// # Errors
///
/// Returns [`AssertionFailure`] with both sequences when the order differs.
pub fn check_sorted_by_years(colors: &[ColorRecord]) -> Result<(), AssertionFailure> {
    let years: Vec<i32> = colors.iter().map(|color| color.year).collect();
    let mut sorted = years.clone();
    sorted.sort_unstable();
    if years != sorted {
        return Err(AssertionFailure::new(
            "check_sorted_by_years",
            render_years(&sorted),
            render_years(&years),
        ));
    }
    Ok(())
}

/// Renders years as `[2000, 2001]`.
fn render_years(years: &[i32]) -> String {
    let joined: Vec<String> = years.iter().map(ToString::to_string).collect();
    format!("[{}]", joined.join(", "))
}

// ============================================================================
// SECTION: Registration Checks
// ============================================================================

/// Registration returned the expected id and token.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the id, the token, or both differ.
pub fn check_successful_registration(
    success: &RegistrationSuccess,
    expected_id: u64,
    expected_token: &str,
) -> Result<(), AssertionFailure> {
    if success.id != expected_id {
        return Err(AssertionFailure::new(
            "check_successful_registration.id",
            expected_id.to_string(),
            success.id.to_string(),
        ));
    }
    if success.token != expected_token {
        return Err(AssertionFailure::new(
            "check_successful_registration.token",
            expected_token,
            success.token.clone(),
        ));
    }
    Ok(())
}

/// Registration failed with the expected message.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the error message differs.
pub fn check_unsuccessful_registration(
    failure: &RegistrationFailure,
    expected_error: &str,
) -> Result<(), AssertionFailure> {
    if failure.error != expected_error {
        return Err(AssertionFailure::new(
            "check_unsuccessful_registration",
            expected_error,
            failure.error.clone(),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Timestamp Checks
// ============================================================================

/// An RFC 3339 timestamp lies within `tolerance` of `now`.
///
/// # Errors
///
/// Returns [`AssertionFailure`] when the timestamp does not parse or drifts
/// beyond the tolerance.
pub fn check_timestamp_near(
    label: &'static str,
    timestamp: &str,
    now: OffsetDateTime,
    tolerance: Duration,
) -> Result<(), AssertionFailure> {
    let parsed = OffsetDateTime::parse(timestamp, &Rfc3339).map_err(|err| {
        AssertionFailure::new(label, "RFC 3339 timestamp", format!("`{timestamp}` ({err})"))
    })?;
    let drift = (parsed - now).abs();
    if drift > tolerance {
        let expected = now.format(&Rfc3339).unwrap_or_else(|err| format!("local clock ({err})"));
        return Err(AssertionFailure::new(
            label,
            format!("within {tolerance} of {expected}"),
            format!("{timestamp} (drift {drift})"),
        ));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
