use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use super::StalenessProvider;
use crate::errors::StoreError;
use crate::models::VisitSignal;

/// Visit signals read from a JSON document shaped
/// `{"<scenario>": {"<path>": {"visit_count": .., "last_visited": .., "staleness_score": ..}}}`
#[derive(Debug, Clone, Default)]
pub struct VisitFile {
    scenarios: BTreeMap<String, HashMap<String, VisitSignal>>,
}

impl VisitFile {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let scenarios = serde_json::from_str(&content)
            .map_err(|source| StoreError::Corrupt { path: path.clone(), source })?;
        debug!("Loaded visit signals from {:?}", path);
        Ok(Self { scenarios })
    }

    pub fn from_signals(scenario: &str, signals: HashMap<String, VisitSignal>) -> Self {
        let mut scenarios = BTreeMap::new();
        scenarios.insert(scenario.to_string(), signals);
        Self { scenarios }
    }
}

impl StalenessProvider for VisitFile {
    fn staleness(&self, scenario: &str) -> Result<HashMap<String, VisitSignal>, StoreError> {
        Ok(self.scenarios.get(scenario).cloned().unwrap_or_default())
    }
}

/// Treats every file as never visited
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVisits;

impl StalenessProvider for NoVisits {
    fn staleness(&self, _scenario: &str) -> Result<HashMap<String, VisitSignal>, StoreError> {
        Ok(HashMap::new())
    }
}
