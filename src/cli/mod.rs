//! CLI command handlers.
//!
//! Handlers hold the business logic for each subcommand so they can be
//! tested without going through argument parsing.

mod enrich;

pub use enrich::{build_pipeline, run_enrich};
