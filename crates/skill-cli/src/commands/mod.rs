//! Command implementations for skill-cli

pub mod update;

pub use update::{UpdateArgs, run_update};
