use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};

mod cli;
mod logging;

use name_sex_guesser::config::AppConfig;
use name_sex_guesser::orchestrator;
use name_sex_guesser::util::envfile::load_dotenv_if_present;

fn main() {
    // Before logging init so RUST_LOG may come from .env
    let dotenv = load_dotenv_if_present();
    logging::init_from_env();
    if let Err(e) = dotenv {
        warn!("Ignoring unreadable .env: {:#}", e);
    }

    let cli = cli::Cli::parse();
    let cfg = match cli.to_app_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&cfg) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cfg: &AppConfig) -> Result<()> {
    let summary = orchestrator::run(cfg).with_context(|| {
        format!(
            "guessing sex for {} against {}",
            cfg.input.roster_path.display(),
            cfg.input.reference_path.display()
        )
    })?;
    info!(
        "{} distinct names, {} unknown, {} malformed segments skipped{}",
        summary.distinct_names,
        summary.unknown_count,
        summary.segments_malformed,
        if summary.unknowns_error.is_some() {
            ", unknowns list not written"
        } else {
            ""
        }
    );
    Ok(())
}
