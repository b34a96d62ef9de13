//! Language detection over a scenario's source roots

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::errors::{AugurError, ConfigError, DetectionError};
use crate::models::{Inventory, Language};
use crate::utils;

pub mod language_detection;

pub use language_detection::{count_non_blank_lines, count_non_blank_lines_in_file, is_pruned_dir};

/// Trait for detecting which languages a scenario contains
pub trait LanguageDetector {
    /// Walk the scenario's source roots and build per-language inventories
    fn detect(&self, root: &Path) -> Result<Inventory, AugurError>;

    /// Relative paths of every file of `language`; runs a fresh detection pass
    fn files_for_language(&self, root: &Path, language: Language) -> Result<Vec<String>, AugurError> {
        let inventory = self.detect(root)?;
        Ok(inventory
            .get(&language)
            .map(|inv| inv.files.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Whether any file of `language` exists; runs a fresh detection pass
    fn has_language(&self, root: &Path, language: Language) -> Result<bool, AugurError> {
        Ok(self
            .detect(root)?
            .get(&language)
            .is_some_and(|inv| inv.file_count > 0))
    }
}

/// Default implementation of LanguageDetector
#[derive(Debug, Clone)]
pub struct DefaultLanguageDetector {
    /// Source roots relative to the scenario root
    roots: Vec<String>,

    /// Files to leave out, matched against scenario-relative paths
    exclude: Option<GlobSet>,
}

impl Default for DefaultLanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DefaultLanguageDetector {
    /// Create a detector for the conventional `api`, `ui/src` and `cli` roots
    pub fn new() -> Self {
        Self {
            roots: ScanConfig::default().roots,
            exclude: None,
        }
    }

    /// Create a detector from scan configuration
    pub fn from_config(config: &ScanConfig) -> Result<Self, ConfigError> {
        let exclude = if config.exclude.is_empty() {
            None
        } else {
            let mut builder = GlobSetBuilder::new();
            for pattern in &config.exclude {
                let glob = Glob::new(pattern).map_err(|e| ConfigError::InvalidGlob {
                    pattern: pattern.clone(),
                    message: e.to_string(),
                })?;
                builder.add(glob);
            }
            Some(builder.build().map_err(|e| ConfigError::InvalidGlob {
                pattern: config.exclude.join(", "),
                message: e.to_string(),
            })?)
        };

        Ok(Self {
            roots: config.roots.clone(),
            exclude,
        })
    }

    /// Source roots this detector walks
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|set| set.is_match(relative))
    }

    fn walk_root(
        &self,
        scenario_root: &Path,
        source_root: &str,
        inventory: &mut Inventory,
    ) -> Result<(), DetectionError> {
        let dir: PathBuf = scenario_root.join(source_root);
        if !dir.is_dir() {
            debug!("Source root {:?} not present, skipping", dir);
            return Ok(());
        }

        let walker = WalkDir::new(&dir)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                e.depth() == 0
                    || !e.file_type().is_dir()
                    || !is_pruned_dir(&e.file_name().to_string_lossy())
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(DetectionError::WalkFailed {
                        path: dir.clone(),
                        message: err.to_string(),
                    });
                }
                Err(err) => {
                    warn!("Skipping unreadable entry under {:?}: {}", dir, err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(language) = Language::from_path(entry.path()) else {
                continue;
            };

            let relative = utils::relative_path(scenario_root, entry.path());
            if self.is_excluded(&relative) {
                debug!("Excluded by pattern: {}", relative);
                continue;
            }

            let lines = match count_non_blank_lines_in_file(entry.path()) {
                Ok(lines) => lines,
                Err(err) => {
                    warn!("Skipping unreadable file {:?}: {}", entry.path(), err);
                    continue;
                }
            };

            inventory
                .entry(language)
                .or_insert_with(|| crate::models::LanguageInventory {
                    primary_directory: source_root.to_string(),
                    ..Default::default()
                })
                .add_file(relative, lines);
        }

        Ok(())
    }
}

impl LanguageDetector for DefaultLanguageDetector {
    fn detect(&self, root: &Path) -> Result<Inventory, AugurError> {
        if !root.is_dir() {
            return Err(DetectionError::InvalidDirectory(root.to_path_buf()).into());
        }

        let mut inventory = Inventory::new();
        for source_root in &self.roots {
            self.walk_root(root, source_root, &mut inventory)?;
        }

        debug!(
            "Detected {} languages under {:?}: {:?}",
            inventory.len(),
            root,
            inventory
                .iter()
                .map(|(lang, inv)| (lang.to_string(), inv.file_count))
                .collect::<Vec<_>>()
        );

        Ok(inventory)
    }
}
