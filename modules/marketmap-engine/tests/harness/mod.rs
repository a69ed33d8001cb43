//! Scripted feed for orchestrator tests: per-category data, failures,
//! throttle budgets, and a call log for ordering assertions.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use analysis_client::{AnalysisError, Result};
use marketmap_common::{
    Category, Cofounder, Competitor, DemographicPoint, GeoPoint, Investor, MarketAnalysis,
    TrendPoint,
};
use marketmap_engine::AnalysisFeed;

#[derive(Default)]
pub struct StubFeed {
    pub demographics: Vec<DemographicPoint>,
    pub competitors: Vec<Competitor>,
    pub cofounders: Vec<Cofounder>,
    pub investors: Vec<Investor>,
    pub analysis: Option<MarketAnalysis>,
    /// Categories that answer with a plain server error.
    pub fail: Vec<Category>,
    /// Remaining 429 responses per category before success.
    pub throttle: Mutex<HashMap<Category, u32>>,
    /// start:/end: markers, in call order.
    pub log: Mutex<Vec<String>>,
    /// When set, the first demographics call parks here until notified.
    pub gate: Mutex<Option<Arc<Notify>>>,
}

impl StubFeed {
    pub fn log_entries(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn calls_for(&self, category: Category) -> usize {
        let marker = format!("start:{category}");
        self.log_entries().iter().filter(|e| **e == marker).count()
    }

    async fn step(&self, category: Category) -> Result<()> {
        self.log
            .lock()
            .unwrap()
            .push(format!("start:{category}"));

        // Behave like a real suspension point so watchers get scheduled
        tokio::task::yield_now().await;

        if category == Category::Demographics {
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
        }

        let throttled = {
            let mut budgets = self.throttle.lock().unwrap();
            match budgets.get_mut(&category) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            }
        };

        let result = if throttled {
            Err(AnalysisError::RateLimited {
                status: 429,
                message: "Too Many Requests".to_string(),
            })
        } else if self.fail.contains(&category) {
            Err(AnalysisError::Api {
                status: 500,
                message: "internal error".to_string(),
            })
        } else {
            Ok(())
        };

        self.log.lock().unwrap().push(format!("end:{category}"));
        result
    }
}

#[async_trait]
impl AnalysisFeed for StubFeed {
    async fn audience_map(&self, _idea: &str, _audience: &str) -> Result<Vec<DemographicPoint>> {
        self.step(Category::Demographics).await?;
        Ok(self.demographics.clone())
    }

    async fn competitors(&self, _idea: &str) -> Result<Vec<Competitor>> {
        self.step(Category::Competitors).await?;
        Ok(self.competitors.clone())
    }

    async fn cofounders(&self, _idea: &str) -> Result<Vec<Cofounder>> {
        self.step(Category::Cofounders).await?;
        Ok(self.cofounders.clone())
    }

    async fn investors(&self, _idea: &str) -> Result<Vec<Investor>> {
        self.step(Category::Investors).await?;
        Ok(self.investors.clone())
    }

    async fn market_analysis(&self, _idea: &str) -> Result<MarketAnalysis> {
        self.analysis.clone().ok_or_else(|| AnalysisError::Api {
            status: 500,
            message: "analysis unavailable".to_string(),
        })
    }
}

// --- Fixture data ---

pub fn demographic(name: &str, lat: f64, lng: f64, weight: f32) -> DemographicPoint {
    DemographicPoint {
        name: name.to_string(),
        coordinates: GeoPoint { lat, lng },
        weight,
        description: Some(format!("{name} description")),
        target_fit: None,
        display_name: None,
        area_code: None,
        borough: None,
        country: None,
        bbox: None,
    }
}

pub fn competitor(name: &str, coordinates: Option<GeoPoint>, threat_score: f32) -> Competitor {
    Competitor {
        company_name: name.to_string(),
        location: "Toronto, Canada".to_string(),
        links: vec![format!("https://{}.example", name.to_lowercase())],
        date_founded: Some("2021".to_string()),
        coordinates,
        threat_score,
        explanation: None,
    }
}

pub fn cofounder(name: &str) -> Cofounder {
    Cofounder {
        name: name.to_string(),
        location: "Berlin, Germany".to_string(),
        links: vec![],
        coordinates: Some(GeoPoint {
            lat: 52.52,
            lng: 13.405,
        }),
        match_score: 8.0,
    }
}

pub fn investor(name: &str) -> Investor {
    Investor {
        name: name.to_string(),
        firm: "Meridian Ventures".to_string(),
        location: "San Francisco, USA".to_string(),
        links: vec![],
        coordinates: Some(GeoPoint {
            lat: 37.7749,
            lng: -122.4194,
        }),
        match_score: 9.0,
        explanation: None,
    }
}

pub fn analysis() -> MarketAnalysis {
    MarketAnalysis {
        queries_analyzed: vec!["legal tech".to_string(), "AI contracts".to_string()],
        trend_points: vec![
            TrendPoint {
                period: "2024-06".to_string(),
                value: 78,
            },
            TrendPoint {
                period: "2024-12".to_string(),
                value: 85,
            },
        ],
        resilience_score: 7,
        market_cap_estimate: 1_250_000_000.5,
    }
}
