use crate::errors::AugurError;
use crate::models::ScanRecord;
use crate::output::OutputFormatter;
use crate::store::ScanHistory;

/// Command handler for the history command
pub struct HistoryCommand<'a, S: ScanHistory + ?Sized> {
    store: &'a S,
    output_formatter: &'a dyn OutputFormatter,
}

impl<'a, S: ScanHistory + ?Sized> HistoryCommand<'a, S> {
    pub fn new(store: &'a S, output_formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            store,
            output_formatter,
        }
    }

    pub fn execute(&self, scenario: &str) -> Result<Vec<ScanRecord>, AugurError> {
        let scans = self.store.scan_history(scenario)?;
        println!("{}", self.output_formatter.format_history(&scans));
        Ok(scans)
    }
}
