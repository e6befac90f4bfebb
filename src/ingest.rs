//! Sync pipeline orchestration.
//!
//! Coordinates the full update flow: remote search → duplicate gate →
//! detail/article fetch → normalization → persistence. Candidates are
//! processed strictly one at a time with a fixed pause between them, and a
//! failure on one candidate never aborts the batch; every candidate resolves
//! to exactly one [`ItemOutcome`] collected into the run's [`BatchSummary`].

use anyhow::Result;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::Value;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::client::LegislationSource;
use crate::config::Config;
use crate::db;
use crate::models::{BatchSummary, ItemOutcome};
use crate::normalize;
use crate::store;

pub async fn run_sync(
    config: &Config,
    source: &dyn LegislationSource,
    days: i64,
    dry_run: bool,
    limit: Option<usize>,
) -> Result<BatchSummary> {
    let pool = db::connect(config).await?;

    let end_date = Utc::now().date_naive();
    let start_date = end_date - ChronoDuration::days(days);
    let start = start_date.format("%Y-%m-%d").to_string();
    let end = end_date.format("%Y-%m-%d").to_string();

    // Page through the date range until a short page signals the end.
    let page_size = config.remote.page_size;
    let mut candidates: Vec<Value> = Vec::new();
    let mut page = 1;
    loop {
        let batch = source.search(&start, &end, page, page_size).await;
        let full_page = batch.len() as i64 == page_size;
        candidates.extend(batch);
        let limit_reached = limit.is_some_and(|lim| candidates.len() >= lim);
        if !full_page || limit_reached {
            break;
        }
        page += 1;
    }

    if let Some(lim) = limit {
        candidates.truncate(lim);
    }

    if dry_run {
        let mut new_count = 0u64;
        for raw in &candidates {
            if let Some(number) = normalize::document_number(raw) {
                if !store::document_exists(&pool, &number).await? {
                    new_count += 1;
                }
            }
        }
        println!("sync {} .. {} (dry-run)", start, end);
        println!("  candidates found: {}", candidates.len());
        println!("  new documents: {}", new_count);

        pool.close().await;
        return Ok(BatchSummary {
            fetched: candidates.len() as u64,
            ..Default::default()
        });
    }

    let mut summary = BatchSummary {
        fetched: candidates.len() as u64,
        ..Default::default()
    };

    let throttle = Duration::from_millis(config.remote.throttle_ms);

    for (i, mut raw) in candidates.into_iter().enumerate() {
        if i > 0 && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }

        let (outcome, article_warning) = process_candidate(&pool, source, &mut raw).await;

        match &outcome {
            ItemOutcome::Inserted { number } => println!("  inserted: {}", number),
            ItemOutcome::SkippedDuplicate { number } => {
                println!("  already present: {}", number)
            }
            ItemOutcome::FetchFailed { reason } => eprintln!("  fetch error: {}", reason),
            ItemOutcome::PersistFailed { number, reason } => {
                eprintln!("  persist error for {}: {}", number, reason)
            }
        }

        if let Some(warning) = article_warning {
            eprintln!("  warning: {}", warning);
            summary.consistency_warnings += 1;
        }

        summary.record(outcome);
    }

    println!("sync {} .. {}", start, end);
    println!("  fetched: {} candidates", summary.fetched);
    println!("  inserted: {}", summary.inserted);
    println!("  skipped (already present): {}", summary.skipped);
    println!("  fetch errors: {}", summary.fetch_errors);
    println!("  persist errors: {}", summary.persist_errors);
    if summary.consistency_warnings > 0 {
        println!("  consistency warnings: {}", summary.consistency_warnings);
    }
    println!("ok");

    pool.close().await;
    Ok(summary)
}

/// Process one search candidate end to end. Returns the item outcome plus an
/// optional consistency warning (document committed, article batch lost).
async fn process_candidate(
    pool: &SqlitePool,
    source: &dyn LegislationSource,
    raw: &mut Value,
) -> (ItemOutcome, Option<String>) {
    let number = match normalize::document_number(raw) {
        Some(number) => number,
        None => {
            return (
                ItemOutcome::FetchFailed {
                    reason: "candidate has no document number".to_string(),
                },
                None,
            )
        }
    };

    match store::document_exists(pool, &number).await {
        Ok(true) => return (ItemOutcome::SkippedDuplicate { number }, None),
        Ok(false) => {}
        Err(e) => {
            return (
                ItemOutcome::PersistFailed {
                    number,
                    reason: e.to_string(),
                },
                None,
            )
        }
    }

    // The detail/articles endpoints key off the upstream record id when one
    // is present; older records only carry the document number.
    let remote_id = normalize::document_id(raw).unwrap_or_else(|| number.clone());

    if let Some(detail) = source.fetch_detail(&remote_id).await {
        normalize::overlay(raw, detail);
    }

    let raw_articles = source.fetch_articles(&remote_id).await;
    let document = normalize::normalize(raw, &raw_articles);
    let articles = normalize::normalize_articles(&raw_articles);

    match store::write_document(pool, &document, &articles).await {
        Ok(report) => (ItemOutcome::Inserted { number }, report.article_warning),
        Err(e) => (
            ItemOutcome::PersistFailed {
                number,
                reason: e.to_string(),
            },
            None,
        ),
    }
}
