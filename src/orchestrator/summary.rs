//! Run summary reporting.

use chrono::{DateTime, Utc};

/// Counters and destinations of one run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub roster_path: String,
    pub reference_path: String,
    pub reference_names: usize,
    pub segments_parsed: usize,
    pub segments_blank: usize,
    pub segments_malformed: usize,
    pub distinct_names: usize,
    pub unknown_count: usize,
    pub output: String,
    pub unknowns_output: Option<String>,
    /// Set when the unknowns file could not be written.
    pub unknowns_error: Option<String>,
    pub started_utc: DateTime<Utc>,
    pub ended_utc: DateTime<Utc>,
}

impl RunSummary {
    pub fn new(roster_path: &str, reference_path: &str) -> Self {
        let now = Utc::now();
        Self {
            roster_path: roster_path.to_string(),
            reference_path: reference_path.to_string(),
            reference_names: 0,
            segments_parsed: 0,
            segments_blank: 0,
            segments_malformed: 0,
            distinct_names: 0,
            unknown_count: 0,
            output: String::new(),
            unknowns_output: None,
            unknowns_error: None,
            started_utc: now,
            ended_utc: now,
        }
    }

    pub fn finish(&mut self) {
        self.ended_utc = Utc::now();
    }

    pub fn duration_secs(&self) -> f64 {
        (self.ended_utc - self.started_utc).num_milliseconds() as f64 / 1000.0
    }

    /// Ordered key/value pairs for the summary report.
    pub fn key_values(&self) -> Vec<(&'static str, String)> {
        let fmt_time = |dt: &DateTime<Utc>| format!("{} UTC", dt.format("%Y-%m-%d %H:%M:%S"));
        let mut kv = vec![
            ("Roster", self.roster_path.clone()),
            ("Reference", self.reference_path.clone()),
            ("Reference names", self.reference_names.to_string()),
            ("Roster segments parsed", self.segments_parsed.to_string()),
            ("Roster segments blank", self.segments_blank.to_string()),
            ("Roster segments malformed", self.segments_malformed.to_string()),
            ("Distinct names", self.distinct_names.to_string()),
            ("Unknowns", self.unknown_count.to_string()),
            ("Output", self.output.clone()),
        ];
        if let Some(dest) = &self.unknowns_output {
            kv.push(("Unknowns output", dest.clone()));
        }
        if let Some(err) = &self.unknowns_error {
            kv.push(("Unknowns output error", err.clone()));
        }
        kv.push(("Started", fmt_time(&self.started_utc)));
        kv.push(("Ended", fmt_time(&self.ended_utc)));
        kv.push(("Duration", fmt_duration(self.duration_secs())));
        kv
    }
}

/// `HH:MM:SS`; hours may exceed 23.
pub fn fmt_duration(secs: f64) -> String {
    let total = secs.max(0.0).floor() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
