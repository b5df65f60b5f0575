use clap::{Parser, ValueEnum};
use name_sex_guesser::config::{AppConfig, InputConfig, OutputConfig, ParseConfig};
use name_sex_guesser::error::ConfigError;
use name_sex_guesser::roster::MalformedPolicy;
use std::path::PathBuf;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, ValueEnum, Debug)]
pub enum OnMalformedOpt {
    Reject,
    Skip,
}

impl OnMalformedOpt {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Skip => "skip",
        }
    }
}

impl std::fmt::Display for OnMalformedOpt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<OnMalformedOpt> for MalformedPolicy {
    fn from(opt: OnMalformedOpt) -> Self {
        match opt {
            OnMalformedOpt::Reject => MalformedPolicy::Reject,
            OnMalformedOpt::Skip => MalformedPolicy::Skip,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "name_sex_guesser",
    version,
    about = "Guess sex by first names",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Roster file: "Last, First M" names, several per line separated by ';'
    #[arg(value_name = "ROSTER")]
    pub names_file: PathBuf,
    /// CSV of names with sex association (columns name,gender,frequency)
    #[arg(value_name = "REFERENCE")]
    pub reference_file: PathBuf,
    /// Path for the result (env: SEX_GUESSER_OUTFILE); default: stdout
    #[arg(short = 'o', long = "outfile", value_name = "PATH", env = "SEX_GUESSER_OUTFILE")]
    pub outfile: Option<PathBuf>,
    /// Path for the list of names with unknown first name (env: SEX_GUESSER_UNKNOWNS); default: not collected
    #[arg(short = 'u', long = "unknowns", value_name = "PATH", env = "SEX_GUESSER_UNKNOWNS")]
    pub unknowns: Option<PathBuf>,
    /// Path for a Key,Value run summary (env: SEX_GUESSER_SUMMARY)
    #[arg(long = "summary", value_name = "PATH", env = "SEX_GUESSER_SUMMARY")]
    pub summary: Option<PathBuf>,
    /// What to do with a roster entry that is not "Last, First" (env: SEX_GUESSER_ON_MALFORMED)
    #[arg(
        long = "on-malformed",
        value_name = "POLICY",
        env = "SEX_GUESSER_ON_MALFORMED",
        default_value_t = OnMalformedOpt::Reject
    )]
    pub on_malformed: OnMalformedOpt,
    /// Discard the first roster line
    #[arg(long = "roster-has-header")]
    pub roster_has_header: bool,
}

impl Cli {
    pub fn to_app_config(&self) -> Result<AppConfig, ConfigError> {
        let cfg = AppConfig {
            input: InputConfig {
                roster_path: self.names_file.clone(),
                reference_path: self.reference_file.clone(),
            },
            output: OutputConfig {
                out_path: self.outfile.clone(),
                unknowns_path: self.unknowns.clone(),
                summary_path: self.summary.clone(),
            },
            parse: ParseConfig {
                on_malformed: self.on_malformed.into(),
                roster_has_header: self.roster_has_header,
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }
}
