//! Common test utilities for feedcheck integration tests.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// One analytic record line with all four identity fields.
pub fn record(document_id: &str, entity_id: &str, count: i64, index: i64) -> String {
    serde_json::json!({
        "RP_DOCUMENT_ID": document_id,
        "RP_ENTITY_ID": entity_id,
        "DOCUMENT_RECORD_COUNT": count,
        "DOCUMENT_RECORD_INDEX": index,
        "ENTITY_NAME": "Acme Corp",
    })
    .to_string()
}

/// Write `lines` as a feed file named `name` inside `dir`.
pub fn write_feed(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).expect("Failed to create feed file");
    for line in lines {
        writeln!(file, "{line}").expect("Failed to write feed line");
    }
    path
}

/// Write `lines` as a gzip-compressed feed file.
#[allow(dead_code)]
pub fn write_gz_feed(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let file = File::create(&path).expect("Failed to create feed file");
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    for line in lines {
        writeln!(encoder, "{line}").expect("Failed to write feed line");
    }
    encoder.finish().expect("Failed to finish gzip stream");
    path
}

/// Run feedcheck with the given arguments, returning the full Output.
#[allow(dead_code)]
pub fn run_feedcheck(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_feedcheck"))
        .args(args)
        .output()
        .expect("Failed to run feedcheck")
}
