pub mod config;
pub mod error;
pub mod export;
pub mod matching;
pub mod models;
pub mod orchestrator;
pub mod reference;
pub mod roster;
pub mod util;
