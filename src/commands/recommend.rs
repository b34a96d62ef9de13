use crate::errors::AugurError;
use crate::models::RefactorRecommendation;
use crate::output::OutputFormatter;
use crate::recommend::{RecommendationQuery, RefactorRecommender};
use crate::store::{MetricsStore, StalenessProvider};

/// Command handler for the recommend command
pub struct RecommendCommand<'a, M: MetricsStore + ?Sized, S: StalenessProvider + ?Sized> {
    recommender: RefactorRecommender<'a, M, S>,
    output_formatter: &'a dyn OutputFormatter,
}

impl<'a, M: MetricsStore + ?Sized, S: StalenessProvider + ?Sized> RecommendCommand<'a, M, S> {
    pub fn new(metrics: &'a M, staleness: &'a S, output_formatter: &'a dyn OutputFormatter) -> Self {
        Self {
            recommender: RefactorRecommender::new(metrics, staleness),
            output_formatter,
        }
    }

    pub fn execute(
        &self,
        query: &RecommendationQuery,
    ) -> Result<Vec<RefactorRecommendation>, AugurError> {
        let recommendations = self.recommender.recommend(query)?;
        println!(
            "{}",
            self.output_formatter.format_recommendations(&recommendations)
        );
        Ok(recommendations)
    }
}
