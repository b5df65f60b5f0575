//! Reference table of first names labeled by sex.
//!
//! The source is a CSV with at least the columns `name`, `gender` and
//! `frequency`, in any order:
//!
//! ```text
//! name,gender,frequency
//! Mary,F,7065
//! Anna,F,2604
//! ```
//!
//! Frequencies are ignored. Rows are not assumed to be sorted; when a name
//! appears more than once the last row wins.

use crate::error::GuessError;
use crate::models::ReferenceColumns;
use csv::{ReaderBuilder, Trim};
use log::{debug, info};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ReferenceRow {
    name: String,
    gender: String,
}

/// Mapping from first name to sex label.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    by_name: HashMap<String, String>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the label for `name`.
    pub fn insert(&mut self, name: impl Into<String>, sex: impl Into<String>) {
        self.by_name.insert(name.into(), sex.into());
    }

    pub fn lookup(&self, first_name: &str) -> Option<&str> {
        self.by_name.get(first_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl<N: Into<String>, S: Into<String>> FromIterator<(N, S)> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (n, s) in iter {
            table.insert(n, s);
        }
        table
    }
}

/// Load the reference table from a CSV file.
pub fn load_reference(path: &Path) -> Result<ReferenceTable, GuessError> {
    info!("Importing reference names file {}", path.display());
    let file = File::open(path).map_err(|e| GuessError::file_access(path, e))?;
    let table = read_reference(file, &path.display().to_string()).map_err(|e| match e {
        GuessError::Csv(err) if err.is_io_error() => {
            GuessError::file_access(path, std::io::Error::other(err))
        }
        other => other,
    })?;
    info!(
        "Done importing reference names: {} distinct names",
        table.len()
    );
    Ok(table)
}

/// Read reference rows from any reader. `source_name` is used in error messages.
pub fn read_reference<R: Read>(reader: R, source_name: &str) -> Result<ReferenceTable, GuessError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| classify_csv_error(e, source_name))?
        .clone();
    let missing = ReferenceColumns::from_headers(headers.iter()).missing();
    if !missing.is_empty() {
        return Err(GuessError::malformed(
            source_name,
            Some(1),
            format!("header lacks required column(s): {}", missing.join(", ")),
        ));
    }

    let mut table = ReferenceTable::new();
    let mut rows = 0usize;
    for result in rdr.deserialize::<ReferenceRow>() {
        let row = result.map_err(|e| classify_csv_error(e, source_name))?;
        table.insert(row.name, row.gender);
        rows += 1;
    }
    debug!("{source_name}: {rows} rows, {} distinct names", table.len());
    Ok(table)
}

/// Undecodable content is malformed input; anything else stays a csv error.
fn classify_csv_error(e: csv::Error, source_name: &str) -> GuessError {
    let bad_content = matches!(
        e.kind(),
        csv::ErrorKind::Deserialize { .. }
            | csv::ErrorKind::UnequalLengths { .. }
            | csv::ErrorKind::Utf8 { .. }
    );
    if bad_content {
        GuessError::malformed(source_name, e.position().map(|p| p.line()), e.to_string())
    } else {
        GuessError::Csv(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn read(s: &str) -> Result<ReferenceTable, GuessError> {
        read_reference(s.as_bytes(), "names.csv")
    }

    #[test]
    fn frequency_ignored_and_last_row_wins() {
        let t = read("name,gender,frequency\nMary,F,7065\nLeslie,F,10\nLeslie,M,400\n").unwrap();
        assert_eq!(t.len(), 2);
        assert_eq!(t.lookup("Mary"), Some("F"));
        assert_eq!(t.lookup("Leslie"), Some("M"));
        assert_eq!(t.lookup("mary"), None);
    }

    #[test]
    fn column_order_and_extra_columns() {
        let t = read("year, frequency ,gender,name\n1880,7065,F,Mary\n1881,9655,M,John\n").unwrap();
        assert_eq!(t.lookup("Mary"), Some("F"));
        assert_eq!(t.lookup("John"), Some("M"));
    }

    #[test]
    fn missing_column_is_malformed() {
        match read("name,sex,frequency\nMary,F,1\n") {
            Err(GuessError::MalformedInput { reason, line, .. }) => {
                assert!(reason.contains("gender"), "{reason}");
                assert_eq!(line, Some(1));
            }
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn empty_file_is_malformed() {
        assert!(matches!(read(""), Err(GuessError::MalformedInput { .. })));
    }

    #[test]
    fn short_row_is_malformed() {
        match read("name,gender,frequency\nMary,F,1\nAnna\n") {
            Err(GuessError::MalformedInput { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_cell_is_malformed() {
        let res = read_reference(&b"name,gender,frequency\nMary,F,1\n\xffM,F,1\n"[..], "names.csv");
        match res {
            Err(GuessError::MalformedInput { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_header_is_malformed() {
        let res = read_reference(&b"na\xffme,gender,frequency\nMary,F,1\n"[..], "names.csv");
        assert!(matches!(res, Err(GuessError::MalformedInput { .. })), "{res:?}");
    }

    #[test]
    fn load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "name,gender,frequency").unwrap();
        writeln!(f, "Oliver,M,120").unwrap();
        let t = load_reference(f.path()).unwrap();
        assert_eq!(t.lookup("Oliver"), Some("M"));
    }

    #[test]
    fn missing_file_is_file_access() {
        let dir = tempfile::tempdir().unwrap();
        let res = load_reference(&dir.path().join("absent.csv"));
        assert!(matches!(res, Err(GuessError::FileAccess { .. })));
    }
}
