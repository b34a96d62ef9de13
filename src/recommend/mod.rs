//! Ranks files worth refactoring by combining stored metrics with visit staleness

use log::debug;
use std::cmp::Ordering;

use crate::errors::AugurError;
use crate::models::{DetailedFileMetrics, RefactorRecommendation, SortKey, VisitSignal};
use crate::store::{MetricsStore, StalenessProvider};

const LENGTH_BASELINE: usize = 500;
const COMPLEXITY_BASELINE: u32 = 10;
const DUPLICATION_BASELINE: f64 = 0.05;
const MISSING_TEST_PENALTY: f64 = 10.0;
const SPARSE_COMMENT_PENALTY: f64 = 10.0;
const SPARSE_COMMENT_RATIO: f64 = 0.05;

/// Parameters for one recommendation request
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    pub scenario: String,

    /// Maximum results; 0 means unlimited
    pub limit: usize,

    pub sort: SortKey,

    pub min_lines: usize,

    /// Files visited more often than this are left out
    pub max_visits: Option<u32>,
}

impl RecommendationQuery {
    pub fn new(scenario: impl Into<String>) -> Self {
        Self {
            scenario: scenario.into(),
            limit: 0,
            sort: SortKey::default(),
            min_lines: 0,
            max_visits: None,
        }
    }
}

/// Parse a sort key name, rejecting unknown keys
pub fn parse_sort_key(name: &str) -> Result<SortKey, AugurError> {
    name.parse::<SortKey>().map_err(|_| {
        AugurError::InvalidQuery(format!(
            "unknown sort key '{}' (expected complexity, length, duplication, priority or staleness)",
            name
        ))
    })
}

/// Composite refactor priority for one file
pub fn priority(metrics: &DetailedFileMetrics, signal: &VisitSignal) -> f64 {
    let length_excess = metrics.line_count.saturating_sub(LENGTH_BASELINE) as f64 / 10.0;

    let complexity_excess =
        metrics.max_complexity.unwrap_or(0).saturating_sub(COMPLEXITY_BASELINE) as f64 * 2.0;

    let duplication_fraction = metrics.duplication_percentage.unwrap_or(0.0) / 100.0;
    let duplication_excess = (duplication_fraction - DUPLICATION_BASELINE).max(0.0) * 300.0;

    let debt = (metrics.todo_count + 2 * metrics.fixme_count + 3 * metrics.hack_count) as f64;

    let mut score =
        signal.staleness_score + length_excess + complexity_excess + duplication_excess + debt;

    if !metrics.has_test_file {
        score += MISSING_TEST_PENALTY;
    }
    if metrics.comment_ratio < SPARSE_COMMENT_RATIO {
        score += SPARSE_COMMENT_PENALTY;
    }

    score
}

fn sort_value(recommendation: &RefactorRecommendation, key: SortKey) -> f64 {
    let metrics = &recommendation.metrics;
    match key {
        SortKey::Complexity => metrics.max_complexity.unwrap_or(0) as f64,
        SortKey::Length => metrics.line_count as f64,
        SortKey::Duplication => metrics.duplication_percentage.unwrap_or(0.0),
        SortKey::Priority => recommendation.priority,
        SortKey::Staleness => recommendation.staleness_score,
    }
}

/// Produces ranked refactor recommendations
pub struct RefactorRecommender<'a, M: MetricsStore + ?Sized, S: StalenessProvider + ?Sized> {
    metrics: &'a M,
    staleness: &'a S,
}

impl<'a, M: MetricsStore + ?Sized, S: StalenessProvider + ?Sized> RefactorRecommender<'a, M, S> {
    pub fn new(metrics: &'a M, staleness: &'a S) -> Self {
        Self { metrics, staleness }
    }

    pub fn recommend(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<RefactorRecommendation>, AugurError> {
        let signals = self.staleness.staleness(&query.scenario)?;
        let records = self.metrics.file_metrics(&query.scenario, query.min_lines)?;
        debug!(
            "Ranking {} files for scenario '{}' ({} visit signals)",
            records.len(),
            query.scenario,
            signals.len()
        );

        let mut recommendations: Vec<RefactorRecommendation> = records
            .into_iter()
            .filter_map(|metrics| {
                let signal = signals
                    .get(&metrics.file_path)
                    .cloned()
                    .unwrap_or_else(VisitSignal::unvisited);

                if query.max_visits.is_some_and(|max| signal.visit_count > max) {
                    return None;
                }

                let priority = priority(&metrics, &signal);
                Some(RefactorRecommendation {
                    metrics,
                    visit_count: signal.visit_count,
                    last_visited: signal.last_visited,
                    staleness_score: signal.staleness_score,
                    priority,
                })
            })
            .collect();

        recommendations.sort_by(|a, b| {
            sort_value(b, query.sort)
                .partial_cmp(&sort_value(a, query.sort))
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.metrics.file_path.cmp(&b.metrics.file_path))
        });

        if query.limit > 0 {
            recommendations.truncate(query.limit);
        }

        Ok(recommendations)
    }
}
