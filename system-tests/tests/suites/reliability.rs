// system-tests/tests/suites/reliability.rs
// ============================================================================
// Module: Reliability Tests
// Description: Repeatability checks for read-only endpoints.
// Purpose: Ensure repeated reads return identical listings.
// Dependencies: reqres-contract, system-tests helpers
// ============================================================================

//! ## Overview
//! Repeated reads of the same listing must agree; the suite never retries.

use std::error::Error;

use reqres_contract::ResponseContractSpec;
use reqres_contract::records::ColorRecord;
use reqres_contract::records::Page;
use reqres_contract::records::UserRecord;

use crate::helpers::target::Target;

/// Number of identical reads per scenario.
const REPEAT_COUNT: usize = 3;

#[tokio::test(flavor = "multi_thread")]
async fn user_listing_is_idempotent() -> Result<(), Box<dyn Error>> {
    let target = Target::resolve()?;
    let mut reporter = target.reporter("user_listing_is_idempotent")?;
    let context = target.context(ResponseContractSpec::listing())?;

    let mut responses = Vec::with_capacity(REPEAT_COUNT);
    for _ in 0 .. REPEAT_COUNT {
        responses.push(context.get("api/users", &[("page", "2")]).await);
    }
    reporter.artifacts().write_transcript(&context)?;
    let mut pages: Vec<Page<UserRecord>> = Vec::with_capacity(REPEAT_COUNT);
    for response in responses {
        pages.push(response?.extract_one()?);
    }

    let first = &pages[0];
    for (index, page) in pages.iter().enumerate().skip(1) {
        assert_eq!(page, first, "read {} differs from the first read", index + 1);
    }
    assert_eq!(context.transcript().len(), REPEAT_COUNT);
    reporter.pass("repeated page-2 reads returned identical listings")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn parallel_color_reads_agree() -> Result<(), Box<dyn Error>> {
    let target = Target::resolve()?;
    let mut reporter = target.reporter("parallel_color_reads_agree")?;
    let context = target.context(ResponseContractSpec::listing())?;

    let mut tasks = Vec::with_capacity(REPEAT_COUNT);
    for _ in 0 .. REPEAT_COUNT {
        let context = context.clone();
        tasks.push(tokio::spawn(async move {
            context.get("api/unknown", &[]).await?.extract_list::<ColorRecord>("data")
        }));
    }
    let mut listings = Vec::with_capacity(REPEAT_COUNT);
    for task in tasks {
        listings.push(task.await?);
    }
    reporter.artifacts().write_transcript(&context)?;

    let listings = listings.into_iter().collect::<Result<Vec<_>, _>>()?;
    assert!(listings.windows(2).all(|pair| pair[0] == pair[1]), "parallel reads disagree");
    let mut sequences: Vec<u64> = context.transcript().iter().map(|entry| entry.sequence).collect();
    sequences.sort_unstable();
    assert_eq!(sequences, vec![1, 2, 3], "shared transcript records each round trip once");
    reporter.pass("parallel reads through one context agreed")?;
    Ok(())
}
