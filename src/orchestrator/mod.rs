//! End-to-end run: load the reference table and the roster, label the roster,
//! write the outputs and report.
//!
//! Reading either input or creating the primary output is fatal. Writing the
//! unknowns list or the summary report is not: such failures are logged and
//! recorded on the returned [`RunSummary`].

pub mod summary;

use crate::config::AppConfig;
use crate::error::GuessError;
use crate::export::csv_export::{OutputTarget, export_labeled, export_summary_csv, export_unknowns};
use crate::matching::{label_roster, unknowns};
use crate::reference::load_reference;
use crate::roster::import_roster;
use log::{info, warn};
use summary::RunSummary;

pub fn run(cfg: &AppConfig) -> Result<RunSummary, GuessError> {
    let mut summary = RunSummary::new(
        &cfg.input.roster_path.display().to_string(),
        &cfg.input.reference_path.display().to_string(),
    );

    let reference = load_reference(&cfg.input.reference_path)?;
    summary.reference_names = reference.len();

    let roster = import_roster(&cfg.input.roster_path, cfg.parse.roster_options())?;
    summary.segments_parsed = roster.stats.segments_parsed;
    summary.segments_blank = roster.stats.segments_blank;
    summary.segments_malformed = roster.stats.segments_malformed;
    summary.distinct_names = roster.store.len();

    let rows = label_roster(&roster.store, &reference);
    summary.unknown_count = unknowns(&rows).count();

    let target = OutputTarget::from_option(cfg.output.out_path.as_deref());
    export_labeled(&target, &rows)?;
    summary.output = target.describe();
    info!("Wrote result to {}", summary.output);
    info!("Number of unknowns: {}", summary.unknown_count);

    if let Some(path) = cfg.output.unknowns_path.as_deref() {
        summary.unknowns_output = Some(path.display().to_string());
        match export_unknowns(path, unknowns(&rows)) {
            Ok(n) => info!("Wrote {} unknowns to {}", n, path.display()),
            Err(e) => {
                warn!("Could not write unknowns file: {e}");
                summary.unknowns_error = Some(e.to_string());
            }
        }
    }

    summary.finish();
    if let Some(path) = cfg.output.summary_path.as_deref() {
        match export_summary_csv(path, &summary) {
            Ok(()) => info!("Wrote run summary to {}", path.display()),
            Err(e) => warn!("Could not write run summary: {e}"),
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InputConfig, OutputConfig};
    use crate::roster::MalformedPolicy;
    use std::fs;
    use std::path::Path;

    const REFERENCE: &str = "name,gender,frequency\n\
                             Jennifer,F,2000\n\
                             Oliver,M,120\n\
                             Paul,F,1\n\
                             Paul,M,900\n";
    const ROSTER: &str = "Aaker, Jennifer L\n\
                          Aaker, Jennifer L\n\
                          Aaker, Jennifer L; Li, Fei-Fei\n\
                          Aalami, Oliver O\n\
                          Aalami, Oliver O; Yock, Paul\n\
                          Aanjaneya, Mridul\n\
                          Engler, Dawson, R\n";

    fn setup(dir: &Path) -> AppConfig {
        fs::write(dir.join("names.csv"), REFERENCE).unwrap();
        fs::write(dir.join("roster.txt"), ROSTER).unwrap();
        AppConfig {
            input: InputConfig {
                roster_path: dir.join("roster.txt"),
                reference_path: dir.join("names.csv"),
            },
            output: OutputConfig {
                out_path: Some(dir.join("out.csv")),
                unknowns_path: Some(dir.join("unknowns.csv")),
                summary_path: Some(dir.join("summary.csv")),
            },
            ..Default::default()
        }
    }

    #[test]
    fn full_run_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = setup(dir.path());
        let summary = run(&cfg).unwrap();

        let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(
            out,
            "LastName,FirstName,MiddleName,Sex\n\
             Aaker,Jennifer,L,F\n\
             Li,Fei-Fei,,U\n\
             Aalami,Oliver,O,M\n\
             Yock,Paul,,M\n\
             Aanjaneya,Mridul,,U\n\
             Engler,Dawson,R,U\n"
        );
        let unknowns = fs::read_to_string(dir.path().join("unknowns.csv")).unwrap();
        assert_eq!(
            unknowns,
            "\"Li, Fei-Fei\"\n\"Aanjaneya, Mridul\"\n\"Engler, Dawson R.\"\n"
        );

        let unknown_rows = out.lines().filter(|l| l.ends_with(",U")).count();
        assert_eq!(summary.unknown_count, unknown_rows);
        assert_eq!(summary.distinct_names, 6);
        assert_eq!(summary.segments_parsed, 9);
        assert_eq!(summary.reference_names, 3);
        assert!(summary.unknowns_error.is_none());

        let report = fs::read_to_string(dir.path().join("summary.csv")).unwrap();
        assert!(report.contains("Unknowns,3\n"));
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = setup(dir.path());
        run(&cfg).unwrap();
        let first = fs::read(dir.path().join("out.csv")).unwrap();
        run(&cfg).unwrap();
        let second = fs::read(dir.path().join("out.csv")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unwritable_unknowns_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = setup(dir.path());
        cfg.output.unknowns_path = Some(dir.path().join("missing").join("unknowns.csv"));
        let summary = run(&cfg).unwrap();
        assert!(summary.unknowns_error.is_some());
        let out = fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn missing_reference_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = setup(dir.path());
        cfg.input.reference_path = dir.path().join("absent.csv");
        assert!(matches!(run(&cfg), Err(GuessError::FileAccess { .. })));
        assert!(!dir.path().join("out.csv").exists());
    }

    #[test]
    fn malformed_roster_policy() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = setup(dir.path());
        fs::write(&cfg.input.roster_path, "Aalami, Oliver O; Cher\n").unwrap();
        assert!(matches!(
            run(&cfg),
            Err(GuessError::MalformedInput { line: Some(1), .. })
        ));

        cfg.parse.on_malformed = MalformedPolicy::Skip;
        let summary = run(&cfg).unwrap();
        assert_eq!(summary.segments_malformed, 1);
        assert_eq!(summary.distinct_names, 1);
    }
}
