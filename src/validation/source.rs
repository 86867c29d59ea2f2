//! Feed file reader utilities.
//!
//! This module provides streaming iteration over the physical lines of a
//! newline-delimited JSON feed (plain or `.gz`), numbering every line.

use anyhow::Result;
use flate2::read::GzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// The feed could not be opened. Fatal for a validation run.
#[derive(Debug)]
pub struct SourceUnavailable {
    pub path: PathBuf,
    pub source: io::Error,
}

impl fmt::Display for SourceUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feed not available: {}", self.path.display())
    }
}

impl std::error::Error for SourceUnavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// One physical line of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    /// 1-based line number, counting blank and undecodable lines.
    pub number: usize,
    /// Line content without the trailing line terminator.
    pub bytes: Vec<u8>,
}

/// Iterator that streams numbered lines from a feed reader.
pub struct FeedLines<R: BufRead> {
    reader: R,
    line: usize,
}

impl<R: BufRead> FeedLines<R> {
    /// Create a new FeedLines from a reader.
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0 }
    }
}

impl<R: BufRead> Iterator for FeedLines<R> {
    type Item = Result<FeedLine>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut bytes = Vec::new();
        match self.reader.read_until(b'\n', &mut bytes) {
            Ok(0) => return None,
            Ok(_) => {}
            Err(e) => return Some(Err(e.into())),
        }

        if bytes.last() == Some(&b'\n') {
            bytes.pop();
            if bytes.last() == Some(&b'\r') {
                bytes.pop();
            }
        }

        self.line += 1;
        Some(Ok(FeedLine {
            number: self.line,
            bytes,
        }))
    }
}

/// Open a feed for reading, handling `.gz` compression and `-` for stdin.
pub fn open_feed(path: &Path) -> Result<Box<dyn BufRead>, SourceUnavailable> {
    if path.as_os_str() == STDIN_PATH {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(path).map_err(|source| SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::with_capacity(256 * 1024, file);

    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    if name.ends_with(".gz") {
        let decoder = GzDecoder::new(reader);
        Ok(Box::new(BufReader::with_capacity(256 * 1024, decoder)))
    } else {
        Ok(Box::new(reader))
    }
}
