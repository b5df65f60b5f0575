use crate::error::GuessError;
use crate::models::{LabeledName, NameRecord, OUTPUT_HEADERS};
use crate::orchestrator::summary::RunSummary;
use csv::{Writer, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where the labeled roster goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    pub fn from_option(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::File(p.to_path_buf()),
            None => Self::Stdout,
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(p) => p.display().to_string(),
            Self::Stdout => "<stdout>".to_string(),
        }
    }
}

fn create_buffered(path: &Path) -> Result<BufWriter<File>, GuessError> {
    let file = File::create(path).map_err(|e| GuessError::file_access(path, e))?;
    Ok(BufWriter::with_capacity(512 * 1024, file))
}

/// Write the header and one row per labeled name.
pub fn write_labeled<W: Write>(w: &mut Writer<W>, rows: &[LabeledName<'_>]) -> Result<(), GuessError> {
    w.write_record(OUTPUT_HEADERS)?;
    for row in rows {
        w.write_record(row.as_row())?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write the labeled roster to a file or stdout. Failing to create the file is
/// a file-access error.
pub fn export_labeled(target: &OutputTarget, rows: &[LabeledName<'_>]) -> Result<(), GuessError> {
    match target {
        OutputTarget::File(path) => {
            let mut w = WriterBuilder::new().from_writer(create_buffered(path)?);
            write_labeled(&mut w, rows).map_err(|e| match e {
                GuessError::Csv(err) if err.is_io_error() => {
                    GuessError::file_access(path, std::io::Error::other(err))
                }
                other => other,
            })
        }
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            let mut w = WriterBuilder::new().from_writer(stdout.lock());
            write_labeled(&mut w, rows)
        }
    }
}

/// Write one display name per line, no header. Every failure is reported as
/// [`GuessError::SecondaryWrite`].
pub fn export_unknowns<'a>(
    path: &Path,
    unknowns: impl IntoIterator<Item = &'a NameRecord>,
) -> Result<usize, GuessError> {
    let secondary = |reason: String| GuessError::SecondaryWrite {
        path: path.to_path_buf(),
        reason,
    };
    let file = File::create(path).map_err(|e| secondary(e.to_string()))?;
    let mut w = WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(file));
    let mut n = 0usize;
    for record in unknowns {
        w.write_record([record.to_string()])
            .map_err(|e| secondary(e.to_string()))?;
        n += 1;
    }
    w.flush().map_err(|e| secondary(e.to_string()))?;
    Ok(n)
}

/// Two-column `Key,Value` report of a run.
pub fn export_summary_csv(path: &Path, summary: &RunSummary) -> Result<(), GuessError> {
    let mut w = WriterBuilder::new().from_writer(create_buffered(path)?);
    w.write_record(["Key", "Value"])?;
    for (k, v) in summary.key_values() {
        w.write_record([k, v.as_str()])?;
    }
    w.flush().map_err(csv::Error::from)?;
    Ok(())
}
