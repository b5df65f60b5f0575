use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum GuessError {
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed input in {source_name}{}: {reason}", .line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    MalformedInput {
        source_name: String,
        line: Option<u64>,
        reason: String,
    },
    #[error("could not write {}: {reason}", .path.display())]
    SecondaryWrite { path: PathBuf, reason: String },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl GuessError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(source_name: impl Into<String>, line: Option<u64>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            source_name: source_name.into(),
            line,
            reason: reason.into(),
        }
    }
}

/// Why a single roster segment could not be turned into a name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SegmentError {
    #[error("expected \"Last, First\" but found no comma")]
    MissingComma,
    #[error("last name is empty")]
    EmptyLast,
    #[error("first name is empty")]
    EmptyFirst,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_message_includes_line_when_known() {
        let e = GuessError::malformed("roster.txt", Some(7), "no comma");
        assert_eq!(e.to_string(), "malformed input in roster.txt at line 7: no comma");
        let e = GuessError::malformed("names.csv", None, "missing column 'gender'");
        assert_eq!(e.to_string(), "malformed input in names.csv: missing column 'gender'");
    }

    #[test]
    fn file_access_keeps_io_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let e = GuessError::file_access("/nope/roster.txt", io);
        assert!(e.to_string().starts_with("cannot access /nope/roster.txt"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
