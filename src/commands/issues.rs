use log::info;

use crate::errors::AugurError;
use crate::models::{IssueStatus, StoredIssue};
use crate::output::OutputFormatter;
use crate::store::IssueStore;

/// Command handler for the issues command
pub struct IssuesCommand<'a, S: IssueStore + ?Sized> {
    store: &'a S,
    output_formatter: &'a dyn OutputFormatter,
}

impl<'a, S: IssueStore + ?Sized> IssuesCommand<'a, S> {
    pub fn new(store: &'a S, output_formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            store,
            output_formatter,
        }
    }

    /// List a scenario's issues, most severe first
    pub fn execute(
        &self,
        scenario: &str,
        status: Option<IssueStatus>,
    ) -> Result<Vec<StoredIssue>, AugurError> {
        let mut issues = self.store.issues(scenario, status)?;
        issues.sort_by(|a, b| {
            b.issue
                .severity
                .cmp(&a.issue.severity)
                .then_with(|| a.issue.file_path.cmp(&b.issue.file_path))
                .then_with(|| a.id.cmp(&b.id))
        });

        println!("{}", self.output_formatter.format_issues(&issues));
        Ok(issues)
    }
}

/// Command handler for the set-status command
pub struct SetStatusCommand<'a, S: IssueStore + ?Sized> {
    store: &'a S,
    output_formatter: &'a dyn OutputFormatter,
}

impl<'a, S: IssueStore + ?Sized> SetStatusCommand<'a, S> {
    pub fn new(store: &'a S, output_formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            store,
            output_formatter,
        }
    }

    pub fn execute(&self, id: u64, status: IssueStatus) -> Result<StoredIssue, AugurError> {
        let updated = self.store.update_issue_status(id, status)?;
        info!("Issue #{} set to {}", id, status);
        println!("{}", self.output_formatter.format_issue_update(&updated));
        Ok(updated)
    }
}
