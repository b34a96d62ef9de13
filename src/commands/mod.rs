//! Command handlers for Augur's CLI commands

mod detect;
mod history;
mod issues;
mod recommend;
mod scan;

pub use detect::DetectCommand;
pub use history::HistoryCommand;
pub use issues::{IssuesCommand, SetStatusCommand};
pub use recommend::RecommendCommand;
pub use scan::ScanCommand;
