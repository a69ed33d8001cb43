pub mod error;
pub mod retry;
pub mod types;

pub use error::{AnalysisError, Result};
pub use retry::{call_with_backoff, RetryPolicy};
pub use types::{AnalysisRequest, IntelRequest};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use marketmap_common::{Cofounder, Competitor, DemographicPoint, Investor, MarketAnalysis};
use types::{
    CofoundersEnvelope, CompetitorsEnvelope, FeatureCollection, InvestorsEnvelope,
    MarketAnalysisEnvelope,
};

pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::from_status(status.as_u16(), message));
        }

        Ok(resp.json().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self.client.get(&url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::from_status(status.as_u16(), message));
        }

        Ok(resp.json().await?)
    }

    /// Fetch the target-audience density points for an idea as decoded
    /// GeoJSON. Every returned point has coordinates; weights are clamped
    /// into the 1-5 rendering domain.
    pub async fn audience_map(
        &self,
        idea: &str,
        audience: &str,
        country: Option<&str>,
    ) -> Result<Vec<DemographicPoint>> {
        tracing::info!(idea, "Fetching audience map");

        let mut query = vec![("startup_idea", idea), ("target_description", audience)];
        if let Some(code) = country {
            query.push(("country", code));
        }

        let collection: FeatureCollection = self.get_json("/audience-map", &query).await?;
        let points: Vec<DemographicPoint> = collection
            .features
            .into_iter()
            .map(|f| f.into_domain())
            .collect();

        tracing::info!(count = points.len(), "Fetched audience points");
        Ok(points)
    }

    pub async fn find_competitors(&self, idea: &str) -> Result<Vec<Competitor>> {
        tracing::info!(idea, "Fetching competitors");

        let envelope: CompetitorsEnvelope = self
            .post_json("/find-competitors", &IntelRequest::new(idea))
            .await?;
        let competitors: Vec<Competitor> = envelope
            .competitors
            .into_iter()
            .map(|c| c.into_domain())
            .collect();

        tracing::info!(count = competitors.len(), "Fetched competitors");
        Ok(competitors)
    }

    pub async fn find_cofounders(&self, idea: &str) -> Result<Vec<Cofounder>> {
        tracing::info!(idea, "Fetching cofounders");

        let envelope: CofoundersEnvelope = self
            .post_json("/find-cofounders", &IntelRequest::new(idea))
            .await?;
        let cofounders: Vec<Cofounder> = envelope
            .cofounders
            .into_iter()
            .map(|c| c.into_domain())
            .collect();

        tracing::info!(count = cofounders.len(), "Fetched cofounders");
        Ok(cofounders)
    }

    pub async fn find_investors(&self, idea: &str) -> Result<Vec<Investor>> {
        tracing::info!(idea, "Fetching investors");

        let envelope: InvestorsEnvelope = self
            .post_json("/find-vcs", &IntelRequest::new(idea))
            .await?;
        let investors: Vec<Investor> = envelope.vcs.into_iter().map(|v| v.into_domain()).collect();

        tracing::info!(count = investors.len(), "Fetched investors");
        Ok(investors)
    }

    /// Fetch derived market statistics for the idea. Optional context for
    /// demographic selections; callers tolerate its absence.
    pub async fn market_analysis(&self, idea: &str, region: Option<&str>) -> Result<MarketAnalysis> {
        tracing::info!(idea, "Fetching market analysis");

        let body = AnalysisRequest {
            user_prompt: idea.to_string(),
            region: region.unwrap_or_default().to_string(),
        };
        let envelope: MarketAnalysisEnvelope = self
            .post_json("/comprehensive-market-analysis", &body)
            .await?;

        Ok(envelope.comprehensive_analysis.into_domain())
    }
}
