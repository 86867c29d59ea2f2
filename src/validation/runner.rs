//! Feed validation runner.
//!
//! This module drives a single pass over a feed: each line is decoded, and
//! every decoded record is handed to all checks. Undecodable lines are logged
//! and skipped; only a failure to read the feed itself aborts the scan.

use anyhow::Result;
use std::io::BufRead;
use std::path::Path;

use super::check::RecordCheck;
use super::completeness::CompletenessReconciler;
use super::config::ValidationConfig;
use super::entity_format::EntityIdFormat;
use super::record::{parse_line, Record};
use super::report::{FeedReport, ScanStats, SkippedLine};
use super::source::{open_feed, FeedLine, FeedLines};
use super::uniqueness::UniqueDocuments;

/// Decode every line from `lines` and hand each record to `on_record`.
///
/// Blank lines are counted and skipped; undecodable lines are logged, recorded
/// in the returned stats and skipped. A read error aborts the scan.
pub fn scan_records<I, F>(
    lines: I,
    config: &ValidationConfig,
    mut on_record: F,
) -> Result<ScanStats>
where
    I: IntoIterator<Item = Result<FeedLine>>,
    F: FnMut(usize, &Record),
{
    let mut stats = ScanStats::default();

    for line in lines {
        let line = line?;
        stats.lines += 1;

        match parse_line(&line.bytes) {
            Ok(Some(record)) => {
                stats.records += 1;
                on_record(line.number, &record);
            }
            Ok(None) => stats.blank_lines += 1,
            Err(e) => {
                tracing::warn!("Skipping line {}: {}", line.number, e);
                stats.skipped.push(SkippedLine {
                    line: line.number,
                    reason: e.to_string(),
                });
            }
        }

        if config.progress_interval > 0 && stats.lines % config.progress_interval == 0 {
            tracing::debug!("Processed {} lines...", stats.lines);
        }
    }

    Ok(stats)
}

/// Feed every decoded record from `lines` to each check.
pub fn scan_lines<I>(
    lines: I,
    checks: &mut [&mut dyn RecordCheck],
    config: &ValidationConfig,
) -> Result<ScanStats>
where
    I: IntoIterator<Item = Result<FeedLine>>,
{
    scan_records(lines, config, |line, record| {
        for check in checks.iter_mut() {
            check.observe(line, record);
        }
    })
}

/// Run all feed checks over an already opened reader.
pub fn validate_reader<R: BufRead>(reader: R, config: &ValidationConfig) -> Result<FeedReport> {
    let mut unique = UniqueDocuments::new(config.fields.clone());
    let mut completeness = CompletenessReconciler::new(config.fields.clone())
        .with_max_listed_indices(config.max_listed_indices);
    let mut entity_format = EntityIdFormat::new(config.fields.clone());

    let mut checks: [&mut dyn RecordCheck; 3] =
        [&mut unique, &mut completeness, &mut entity_format];
    let stats = scan_lines(FeedLines::new(reader), &mut checks, config)?;

    tracing::info!(
        "Scanned {} lines: {} records, {} unique documents, {} entity ids",
        stats.lines,
        stats.records,
        unique.count(),
        entity_format.checked()
    );

    Ok(FeedReport {
        stats,
        document_count: unique.count(),
        unique_documents: unique.report(),
        completeness: completeness.report(),
        entity_format: entity_format.report(),
    })
}

/// Validate the feed at `path`.
///
/// Fails only when the feed cannot be opened or read; data problems are
/// reported through the returned [`FeedReport`].
pub fn validate_feed(path: &Path, config: &ValidationConfig) -> Result<FeedReport> {
    let reader = open_feed(path)?;
    validate_reader(reader, config)
}
