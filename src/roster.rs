//! Roster parsing.
//!
//! Each roster line holds one or more full names separated by `;`:
//!
//! ```text
//! Aaker, Jennifer L; Li, Fei-Fei
//! Aalami, Oliver O
//! Engler, Dawson, R
//! ```
//!
//! Two shapes are understood. `Last, First M` splits the part after the comma
//! on a single space; `Last, First, M` takes the three comma parts as they are.

use crate::error::{GuessError, SegmentError};
use crate::models::{DedupKey, NameRecord};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

/// What to do with a segment that is not a recognizable name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Abort the run with a malformed-input error.
    #[default]
    Reject,
    /// Log a warning, count the segment and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RosterOptions {
    pub on_malformed: MalformedPolicy,
    /// Discard the first line.
    pub has_header: bool,
}

/// Parse one `;`-separated roster segment.
pub fn parse_segment(segment: &str) -> Result<NameRecord, SegmentError> {
    let parts: Vec<&str> = segment.trim().split(',').collect();
    let record = match parts.as_slice() {
        [] | [_] => return Err(SegmentError::MissingComma),
        [last, rest] => {
            let rest = rest.trim();
            match rest.split(' ').collect::<Vec<_>>().as_slice() {
                [first, middle] => NameRecord::new(last, first, middle),
                _ => NameRecord::new(last, rest, ""),
            }
        }
        [last, first, middle, ..] => NameRecord::new(last, first, middle),
    };
    if record.last().is_empty() {
        return Err(SegmentError::EmptyLast);
    }
    if record.first().is_empty() {
        return Err(SegmentError::EmptyFirst);
    }
    Ok(record)
}

/// Insertion-ordered record store keyed by [`NameRecord::dedup_key`].
///
/// A key keeps the position of its first insertion; re-inserting the same key
/// replaces the stored record.
#[derive(Debug, Clone, Default)]
pub struct RosterStore {
    records: Vec<NameRecord>,
    index: HashMap<DedupKey, usize>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the key was new.
    pub fn insert(&mut self, record: NameRecord) -> bool {
        let key = record.dedup_key();
        match self.index.get(&key) {
            Some(&pos) => {
                self.records[pos] = record;
                false
            }
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
                true
            }
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NameRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RosterStore {
    type Item = &'a NameRecord;
    type IntoIter = std::slice::Iter<'a, NameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterStats {
    pub segments_parsed: usize,
    pub segments_blank: usize,
    pub segments_malformed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub store: RosterStore,
    pub stats: RosterStats,
}

pub fn import_roster(path: &Path, opts: RosterOptions) -> Result<Roster, GuessError> {
    info!("Importing roster {}", path.display());
    let file = File::open(path).map_err(|e| GuessError::file_access(path, e))?;
    let roster = read_roster(BufReader::new(file), &path.display().to_string(), opts)?;
    info!(
        "Parsed {} roster segments into {} distinct names",
        roster.stats.segments_parsed,
        roster.store.len()
    );
    Ok(roster)
}

pub fn read_roster<R: BufRead>(
    reader: R,
    source_name: &str,
    opts: RosterOptions,
) -> Result<Roster, GuessError> {
    let mut roster = Roster::default();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx as u64 + 1;
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => {
                GuessError::malformed(source_name, Some(line_no), format!("not valid UTF-8 ({e})"))
            }
            _ => GuessError::file_access(source_name, e),
        })?;
        let line = if idx == 0 {
            line.strip_prefix('\u{feff}').unwrap_or(line.as_str())
        } else {
            line.as_str()
        };
        if idx == 0 && opts.has_header {
            debug!("{source_name}: skipping header line {:?}", line.trim());
            continue;
        }
        for segment in line.split(';') {
            if segment.trim().is_empty() {
                roster.stats.segments_blank += 1;
                continue;
            }
            match parse_segment(segment) {
                Ok(record) => {
                    roster.stats.segments_parsed += 1;
                    roster.store.insert(record);
                }
                Err(err) => match opts.on_malformed {
                    MalformedPolicy::Reject => {
                        return Err(GuessError::malformed(
                            source_name,
                            Some(line_no),
                            format!("{err}: {:?}", segment.trim()),
                        ));
                    }
                    MalformedPolicy::Skip => {
                        warn!(
                            "{source_name} line {line_no}: skipping {:?} ({err})",
                            segment.trim()
                        );
                        roster.stats.segments_malformed += 1;
                    }
                },
            }
        }
    }
    if roster.stats.segments_blank > 0 {
        debug!(
            "{source_name}: ignored {} blank segments",
            roster.stats.segments_blank
        );
    }
    Ok(roster)
}
