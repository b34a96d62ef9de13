use log::debug;
use std::path::{Path, PathBuf};

use crate::cli::{
    DetectArgs, HistoryArgs, IssuesArgs, OutputFormat, RecommendArgs, ScanArgs, SetStatusArgs,
    Verbosity,
};
use crate::commands::{
    DetectCommand, HistoryCommand, IssuesCommand, RecommendCommand, ScanCommand, SetStatusCommand,
};
use crate::config::{AugurConfig, ConfigProvider};
use crate::detection::DefaultLanguageDetector;
use crate::errors::{AugurError, DetectionError};
use crate::output::{formatter_for, OutputFormatter};
use crate::pipeline::ScanPipeline;
use crate::recommend::{parse_sort_key, RecommendationQuery};
use crate::store::{JsonStore, NoVisits, StalenessProvider, VisitFile};

const DEFAULT_SCENARIO: &str = "default";

/// Core application that wires configuration, store and commands together
pub struct AugurApp<C: ConfigProvider> {
    config_provider: C,
    output_formatter: Box<dyn OutputFormatter>,
    format: OutputFormat,
    verbosity: Verbosity,
    scenario: Option<String>,
}

impl<C: ConfigProvider> AugurApp<C> {
    pub fn new(config_provider: C) -> Self {
        Self {
            config_provider,
            output_formatter: formatter_for(OutputFormat::default()),
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            scenario: None,
        }
    }

    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self.output_formatter = formatter_for(format);
        self
    }

    /// Override the scenario name derived from the root directory
    pub fn with_scenario(mut self, scenario: Option<String>) -> Self {
        self.scenario = scenario;
        self
    }

    /// Run the detect command
    pub fn detect(&self, args: DetectArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let detector = DefaultLanguageDetector::from_config(&config.scan)?;

        DetectCommand::new(detector, self.output_formatter.as_ref()).execute(root, &config)?;
        Ok(())
    }

    /// Run the scan command
    pub async fn scan(&self, args: ScanArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let scenario = self.scenario_name(root);
        let detector = DefaultLanguageDetector::from_config(&config.scan)?;

        let show_progress = self.verbosity != Verbosity::Quiet && self.format == OutputFormat::Pretty;
        let command = ScanCommand::new(
            ScanPipeline::new(detector, config.clone()),
            self.output_formatter.as_ref(),
            show_progress,
        );

        if args.no_persist {
            command.execute::<JsonStore>(&scenario, root, None).await?;
        } else {
            let store = self.open_store(root, &config)?;
            command.execute(&scenario, root, Some(&store)).await?;
        }
        Ok(())
    }

    /// Run the issues command
    pub fn issues(&self, args: IssuesArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let store = self.open_store(root, &config)?;

        IssuesCommand::new(&store, self.output_formatter.as_ref())
            .execute(&self.scenario_name(root), args.status)?;
        Ok(())
    }

    /// Run the set-status command
    pub fn set_status(&self, args: SetStatusArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let store = self.open_store(root, &config)?;

        SetStatusCommand::new(&store, self.output_formatter.as_ref()).execute(args.id, args.status)?;
        Ok(())
    }

    /// Run the recommend command; flags override `[recommend]` settings
    pub fn recommend(&self, args: RecommendArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let store = self.open_store(root, &config)?;
        let defaults = &config.recommend;

        let query = RecommendationQuery {
            scenario: self.scenario_name(root),
            limit: args.limit.unwrap_or(defaults.limit),
            sort: match &args.sort {
                Some(name) => parse_sort_key(name)?,
                None => defaults.sort,
            },
            min_lines: args.min_lines.unwrap_or(defaults.min_lines),
            max_visits: args.max_visits.or(defaults.max_visits),
        };

        let visits_file = args
            .visits
            .clone()
            .or_else(|| defaults.visits_file.as_ref().map(|p| resolve(root, p)));
        let staleness: Box<dyn StalenessProvider> = match visits_file {
            Some(path) => Box::new(VisitFile::open(path)?),
            None => Box::new(NoVisits),
        };

        RecommendCommand::new(&store, staleness.as_ref(), self.output_formatter.as_ref())
            .execute(&query)?;
        Ok(())
    }

    /// Run the history command
    pub fn history(&self, args: HistoryArgs) -> Result<(), AugurError> {
        let root = &scenario_root(args.root.path())?;
        let config = self.load_config(root)?;
        let store = self.open_store(root, &config)?;

        HistoryCommand::new(&store, self.output_formatter.as_ref())
            .execute(&self.scenario_name(root))?;
        Ok(())
    }

    fn load_config(&self, root: &Path) -> Result<AugurConfig, AugurError> {
        Ok(self.config_provider.load_config(root)?)
    }

    fn open_store(&self, root: &Path, config: &AugurConfig) -> Result<JsonStore, AugurError> {
        let path = resolve(root, &config.store.path);
        debug!("Using store {:?}", path);
        Ok(JsonStore::open(path)?)
    }

    /// Explicit scenario name, else the (canonical) root directory's name
    pub fn scenario_name(&self, root: &Path) -> String {
        if let Some(name) = &self.scenario {
            return name.clone();
        }
        root.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SCENARIO.to_string())
    }
}

/// Absolute form of the scenario root, so tool-reported paths can be relativized
fn scenario_root(path: &Path) -> Result<PathBuf, AugurError> {
    path.canonicalize()
        .map_err(|_| DetectionError::InvalidDirectory(path.to_path_buf()).into())
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
