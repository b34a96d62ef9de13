//! 🔮 Augur - reading the omens in polyglot codebases
//!
//! Augur measures the Go, TypeScript, JavaScript, Python and Rust sources of a
//! project, delegates complexity and duplication analysis to external tools,
//! turns the combined per-file metrics into severity-ranked issues, and ranks
//! files worth refactoring.

pub mod aggregate;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod detection;
pub mod errors;
pub mod issues;
pub mod metrics;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod recommend;
pub mod store;
pub mod tools;
pub mod utils;
