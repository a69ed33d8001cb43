//! Wire types for the analysis service. Envelopes carry bookkeeping
//! fields (`success`, timestamps, summaries) we do not need; serde drops
//! anything unlisted.

use serde::{Deserialize, Serialize};

use marketmap_common::{
    Cofounder, Competitor, CompetitorExplanation, DemographicPoint, GeoPoint, Investor,
    InvestorExplanation, MarketAnalysis, TrendPoint,
};

// --- Requests ---

#[derive(Debug, Clone, Serialize)]
pub struct IntelRequest {
    pub idea: String,
    pub max_results: u32,
    pub include_coordinates: bool,
}

impl IntelRequest {
    pub fn new(idea: &str) -> Self {
        Self {
            idea: idea.to_string(),
            max_results: 20,
            include_coordinates: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub user_prompt: String,
    pub region: String,
}

// --- Coordinates as the service sends them ---

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub(crate) struct WireCoordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl WireCoordinates {
    /// A usable point needs both halves; a partial pair counts as absent.
    pub(crate) fn into_point(self) -> Option<GeoPoint> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
            _ => None,
        }
    }
}

// --- Competitors ---

#[derive(Debug, Deserialize)]
pub(crate) struct CompetitorsEnvelope {
    #[serde(default)]
    pub competitors: Vec<WireCompetitor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCompetitor {
    pub company_name: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub date_founded: Option<String>,
    pub coordinates: Option<WireCoordinates>,
    pub threat_score: f32,
    #[serde(default)]
    pub explanation: Option<CompetitorExplanation>,
}

impl WireCompetitor {
    pub(crate) fn into_domain(self) -> Competitor {
        Competitor {
            company_name: self.company_name,
            location: self.location,
            links: self.links,
            date_founded: self.date_founded.filter(|d| d != "Unknown"),
            coordinates: self.coordinates.and_then(WireCoordinates::into_point),
            threat_score: self.threat_score,
            explanation: self.explanation,
        }
    }
}

// --- Investors ---

#[derive(Debug, Deserialize)]
pub(crate) struct InvestorsEnvelope {
    #[serde(default)]
    pub vcs: Vec<WireInvestor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireInvestor {
    pub name: String,
    pub firm: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub coordinates: Option<WireCoordinates>,
    pub match_score: f32,
    #[serde(default)]
    pub explanation: Option<InvestorExplanation>,
}

impl WireInvestor {
    pub(crate) fn into_domain(self) -> Investor {
        Investor {
            name: self.name,
            firm: self.firm,
            location: self.location,
            links: self.links,
            coordinates: self.coordinates.and_then(WireCoordinates::into_point),
            match_score: self.match_score,
            explanation: self.explanation,
        }
    }
}

// --- Cofounders ---

#[derive(Debug, Deserialize)]
pub(crate) struct CofoundersEnvelope {
    #[serde(default)]
    pub cofounders: Vec<WireCofounder>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireCofounder {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub coordinates: Option<WireCoordinates>,
    pub match_score: f32,
}

impl WireCofounder {
    pub(crate) fn into_domain(self) -> Cofounder {
        Cofounder {
            name: self.name,
            location: self.location,
            links: self.links,
            coordinates: self.coordinates.and_then(WireCoordinates::into_point),
            match_score: self.match_score,
        }
    }
}

// --- Audience map (GeoJSON) ---

#[derive(Debug, Deserialize)]
pub(crate) struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Feature {
    pub geometry: PointGeometry,
    pub properties: AudienceProperties,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PointGeometry {
    /// GeoJSON order: [longitude, latitude].
    pub coordinates: [f64; 2],
}

#[derive(Debug, Deserialize)]
pub(crate) struct AudienceProperties {
    pub name: String,
    pub weight: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub target_fit: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub area_code: Option<String>,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub bbox: Option<[f64; 4]>,
}

impl Feature {
    pub(crate) fn into_domain(self) -> DemographicPoint {
        let [lng, lat] = self.geometry.coordinates;
        let props = self.properties;
        DemographicPoint {
            name: props.name,
            coordinates: GeoPoint { lat, lng },
            // The service has emitted scores on a wider scale; the density
            // surface contract is 1-5.
            weight: props.weight.unwrap_or(3.0).clamp(1.0, 5.0) as f32,
            description: props.description,
            target_fit: props.target_fit,
            display_name: props.display_name,
            area_code: props.area_code,
            borough: props.borough,
            country: props.country,
            bbox: props.bbox,
        }
    }
}

// --- Market analysis ---

#[derive(Debug, Deserialize)]
pub(crate) struct MarketAnalysisEnvelope {
    pub comprehensive_analysis: WireMarketAnalysis,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireMarketAnalysis {
    #[serde(default)]
    pub queries_analyzed: Vec<String>,
    /// Each entry is a single-key object like `{"2024-06": 78}`.
    #[serde(default)]
    pub google_trends: Vec<std::collections::BTreeMap<String, u32>>,
    #[serde(rename = "how_AI_proof_it_is")]
    pub how_ai_proof_it_is: u8,
    pub market_cap_estimation: f64,
}

impl WireMarketAnalysis {
    pub(crate) fn into_domain(self) -> MarketAnalysis {
        let trend_points = self
            .google_trends
            .into_iter()
            .filter_map(|entry| {
                entry
                    .into_iter()
                    .next()
                    .map(|(period, value)| TrendPoint { period, value })
            })
            .collect();
        MarketAnalysis {
            queries_analyzed: self.queries_analyzed,
            trend_points,
            resilience_score: self.how_ai_proof_it_is.clamp(1, 10),
            market_cap_estimate: self.market_cap_estimation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_coordinates_count_as_absent() {
        let only_lat = WireCoordinates {
            latitude: Some(48.85),
            longitude: None,
        };
        assert!(only_lat.into_point().is_none());

        let both = WireCoordinates {
            latitude: Some(48.85),
            longitude: Some(2.35),
        };
        assert!(both.into_point().is_some());
    }

    #[test]
    fn unknown_founding_date_becomes_none() {
        let wire = WireCompetitor {
            company_name: "Acme".to_string(),
            location: "Austin, USA".to_string(),
            links: vec![],
            date_founded: Some("Unknown".to_string()),
            coordinates: None,
            threat_score: 4.0,
            explanation: None,
        };
        assert!(wire.into_domain().date_founded.is_none());
    }

    #[test]
    fn geojson_feature_decodes_lng_lat_order() {
        let json = r#"{
            "geometry": {"type": "Point", "coordinates": [-0.08, 51.526]},
            "properties": {"name": "Shoreditch", "weight": 4.5, "borough": "Hackney"}
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        let point = feature.into_domain();
        assert_eq!(point.coordinates.lat, 51.526);
        assert_eq!(point.coordinates.lng, -0.08);
        assert_eq!(point.weight, 4.5);
        assert_eq!(point.borough.as_deref(), Some("Hackney"));
    }

    #[test]
    fn out_of_range_weight_is_clamped() {
        let json = r#"{
            "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
            "properties": {"name": "Anywhere", "weight": 8.5}
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.into_domain().weight, 5.0);
    }

    #[test]
    fn trend_entries_flatten_to_points() {
        let wire = WireMarketAnalysis {
            queries_analyzed: vec!["legal tech".to_string()],
            google_trends: vec![
                [("2024-06".to_string(), 78u32)].into_iter().collect(),
                [("2024-12".to_string(), 85u32)].into_iter().collect(),
            ],
            how_ai_proof_it_is: 7,
            market_cap_estimation: 1_250_000_000.5,
        };
        let analysis = wire.into_domain();
        assert_eq!(analysis.trend_points.len(), 2);
        assert_eq!(analysis.trend_points[0].period, "2024-06");
        assert_eq!(analysis.trend_points[1].value, 85);
        assert_eq!(analysis.resilience_score, 7);
    }
}
