//! Command-line surface: clap parsing and conversion into [`AppConfig`].
//!
//! [`AppConfig`]: name_sex_guesser::config::AppConfig

mod clap_parser;

pub use clap_parser::Cli;
