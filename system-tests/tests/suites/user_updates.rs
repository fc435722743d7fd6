// system-tests/tests/suites/user_updates.rs
// ============================================================================
// Module: User Mutation Tests
// Description: Create, update, and delete scenarios for `/api/users`.
// Purpose: Verify mutation echoes, server timestamps, and empty deletes.
// Dependencies: reqres-contract, system-tests helpers, time
// ============================================================================

//! ## Overview
//! Mutation scenarios against `/api/users`.
//! Invariants:
//! - `PUT` echoes the job assignment with a fresh `updatedAt`.
//! - `POST` answers 201 with an id and a fresh `createdAt`.
//! - `DELETE` answers 204 with no body.

use std::error::Error;

use reqres_contract::FieldKind;
use reqres_contract::ResponseContractSpec;
use reqres_contract::checks;
use reqres_contract::records::JobAssignment;
use reqres_contract::records::JobAssignmentCreated;
use reqres_contract::records::JobAssignmentUpdated;
use time::Duration;
use time::OffsetDateTime;

use crate::helpers::target::Target;

/// Allowed drift between server timestamps and the local clock.
const CLOCK_TOLERANCE: Duration = Duration::minutes(5);

#[tokio::test(flavor = "multi_thread")]
async fn update_user_echoes_assignment() -> Result<(), Box<dyn Error>> {
    let target = Target::resolve()?;
    let mut reporter = target.reporter("update_user_echoes_assignment")?;
    let context =
        target.context(ResponseContractSpec::ok().require_field("updatedAt", FieldKind::String))?;

    let assignment = JobAssignment::new("morpheus", "zion resident");
    let response = context.put_json("api/users/2", &assignment).await;
    reporter.artifacts().write_transcript(&context)?;
    let updated: JobAssignmentUpdated = response?.extract_one()?;

    assert_eq!(updated.name, assignment.name);
    assert_eq!(updated.job, assignment.job);
    checks::check_timestamp_near(
        "updated_at",
        &updated.updated_at,
        OffsetDateTime::now_utc(),
        CLOCK_TOLERANCE,
    )?;
    reporter.pass("update echoed the assignment with a current timestamp")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn create_user_returns_created() -> Result<(), Box<dyn Error>> {
    let target = Target::resolve()?;
    let mut reporter = target.reporter("create_user_returns_created")?;
    let context = target.context(
        ResponseContractSpec::created()
            .require_field("id", FieldKind::String)
            .require_field("createdAt", FieldKind::String),
    )?;

    let assignment = JobAssignment::new("morpheus", "leader");
    let response = context.post_json("api/users", &assignment).await;
    reporter.artifacts().write_transcript(&context)?;
    let created: JobAssignmentCreated = response?.extract_one()?;

    assert_eq!(created.name, assignment.name);
    assert_eq!(created.job, assignment.job);
    assert!(!created.id.trim().is_empty(), "created id must not be blank");
    checks::check_timestamp_near(
        "created_at",
        &created.created_at,
        OffsetDateTime::now_utc(),
        CLOCK_TOLERANCE,
    )?;
    reporter.pass("create answered 201 with an id and a current timestamp")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_user_returns_no_content() -> Result<(), Box<dyn Error>> {
    let target = Target::resolve()?;
    let mut reporter = target.reporter("delete_user_returns_no_content")?;
    let context = target.context(ResponseContractSpec::no_content())?;

    let response = context.delete("api/users/2").await;
    reporter.artifacts().write_transcript(&context)?;
    let response = response?;

    assert!(response.body().is_none(), "204 must carry no body");
    reporter.pass("delete answered 204 without a body")?;
    Ok(())
}
