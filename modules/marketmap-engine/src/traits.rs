use std::sync::Arc;

use async_trait::async_trait;

use analysis_client::{AnalysisClient, Result};
use marketmap_common::{Cofounder, Competitor, DemographicPoint, Investor, MarketAnalysis};

/// The five analysis fetches, abstracted so tests can substitute stub
/// feeds for the HTTP client.
#[async_trait]
pub trait AnalysisFeed: Send + Sync {
    async fn audience_map(&self, idea: &str, audience: &str) -> Result<Vec<DemographicPoint>>;
    async fn competitors(&self, idea: &str) -> Result<Vec<Competitor>>;
    async fn cofounders(&self, idea: &str) -> Result<Vec<Cofounder>>;
    async fn investors(&self, idea: &str) -> Result<Vec<Investor>>;
    async fn market_analysis(&self, idea: &str) -> Result<MarketAnalysis>;
}

#[async_trait]
impl AnalysisFeed for AnalysisClient {
    async fn audience_map(&self, idea: &str, audience: &str) -> Result<Vec<DemographicPoint>> {
        AnalysisClient::audience_map(self, idea, audience, None).await
    }

    async fn competitors(&self, idea: &str) -> Result<Vec<Competitor>> {
        self.find_competitors(idea).await
    }

    async fn cofounders(&self, idea: &str) -> Result<Vec<Cofounder>> {
        self.find_cofounders(idea).await
    }

    async fn investors(&self, idea: &str) -> Result<Vec<Investor>> {
        self.find_investors(idea).await
    }

    async fn market_analysis(&self, idea: &str) -> Result<MarketAnalysis> {
        AnalysisClient::market_analysis(self, idea, None).await
    }
}

#[async_trait]
impl<T: AnalysisFeed + ?Sized> AnalysisFeed for Arc<T> {
    async fn audience_map(&self, idea: &str, audience: &str) -> Result<Vec<DemographicPoint>> {
        T::audience_map(self, idea, audience).await
    }

    async fn competitors(&self, idea: &str) -> Result<Vec<Competitor>> {
        T::competitors(self, idea).await
    }

    async fn cofounders(&self, idea: &str) -> Result<Vec<Cofounder>> {
        T::cofounders(self, idea).await
    }

    async fn investors(&self, idea: &str) -> Result<Vec<Investor>> {
        T::investors(self, idea).await
    }

    async fn market_analysis(&self, idea: &str) -> Result<MarketAnalysis> {
        T::market_analysis(self, idea).await
    }
}
