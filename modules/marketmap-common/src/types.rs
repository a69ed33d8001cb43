use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Haversine great-circle distance between two lat/lng points in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1_r.cos() * lat2_r.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_KM * c
}

// --- Categories ---

/// One of the four intel feeds. `all()` is the fixed acquisition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Demographics,
    Competitors,
    Cofounders,
    Investors,
}

impl Category {
    pub fn all() -> [Category; 4] {
        [
            Category::Demographics,
            Category::Competitors,
            Category::Cofounders,
            Category::Investors,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Demographics => write!(f, "demographics"),
            Category::Competitors => write!(f, "competitors"),
            Category::Cofounders => write!(f, "cofounders"),
            Category::Investors => write!(f, "investors"),
        }
    }
}

// --- Explanation bullet groups ---

/// Why a competitor matters: their angle, coverage, and gaps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CompetitorExplanation {
    #[serde(default)]
    pub angle: Vec<String>,
    #[serde(default)]
    pub what_they_cover: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// Why an investor matches: track record, thesis, and approach.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct InvestorExplanation {
    #[serde(default)]
    pub recent_investments: Vec<String>,
    #[serde(default)]
    pub investment_thesis: Vec<String>,
    #[serde(default)]
    pub how_to_pitch: Vec<String>,
}

// --- Record Types ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Competitor {
    pub company_name: String,
    /// "City, Country" headquarters label.
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub date_founded: Option<String>,
    pub coordinates: Option<GeoPoint>,
    /// 0-10, higher is a bigger threat.
    pub threat_score: f32,
    pub explanation: Option<CompetitorExplanation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Investor {
    pub name: String,
    pub firm: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub coordinates: Option<GeoPoint>,
    /// 0-10, higher is a better match.
    pub match_score: f32,
    pub explanation: Option<InvestorExplanation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Cofounder {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<String>,
    pub coordinates: Option<GeoPoint>,
    /// 0-10, higher is a better match.
    pub match_score: f32,
}

/// A neighborhood-level concentration of the target audience.
/// Weight is clamped to 1-5 at decode time; it drives the density surface.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DemographicPoint {
    pub name: String,
    pub coordinates: GeoPoint,
    pub weight: f32,
    pub description: Option<String>,
    pub target_fit: Option<String>,
    pub display_name: Option<String>,
    pub area_code: Option<String>,
    pub borough: Option<String>,
    pub country: Option<String>,
    /// Geocoder bounding box [west, south, east, north], when known.
    pub bbox: Option<[f64; 4]>,
}

// --- Sum type ---

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "record_type", rename_all = "snake_case")]
pub enum SourceRecord {
    Competitor(Competitor),
    Investor(Investor),
    Cofounder(Cofounder),
    Demographic(DemographicPoint),
}

impl SourceRecord {
    pub fn category(&self) -> Category {
        match self {
            SourceRecord::Competitor(_) => Category::Competitors,
            SourceRecord::Investor(_) => Category::Investors,
            SourceRecord::Cofounder(_) => Category::Cofounders,
            SourceRecord::Demographic(_) => Category::Demographics,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SourceRecord::Competitor(r) => &r.company_name,
            SourceRecord::Investor(r) => &r.name,
            SourceRecord::Cofounder(r) => &r.name,
            SourceRecord::Demographic(r) => {
                r.display_name.as_deref().unwrap_or(r.name.as_str())
            }
        }
    }

    /// Base coordinates, before any collision offset. Records without
    /// coordinates are kept in payloads but never rendered.
    pub fn coordinates(&self) -> Option<GeoPoint> {
        match self {
            SourceRecord::Competitor(r) => r.coordinates,
            SourceRecord::Investor(r) => r.coordinates,
            SourceRecord::Cofounder(r) => r.coordinates,
            SourceRecord::Demographic(r) => Some(r.coordinates),
        }
    }

    pub fn location_label(&self) -> &str {
        match self {
            SourceRecord::Competitor(r) => &r.location,
            SourceRecord::Investor(r) => &r.location,
            SourceRecord::Cofounder(r) => &r.location,
            SourceRecord::Demographic(r) => r.borough.as_deref().unwrap_or(r.name.as_str()),
        }
    }

    pub fn links(&self) -> &[String] {
        match self {
            SourceRecord::Competitor(r) => &r.links,
            SourceRecord::Investor(r) => &r.links,
            SourceRecord::Cofounder(r) => &r.links,
            SourceRecord::Demographic(_) => &[],
        }
    }
}

// --- Market analysis context ---

/// One bi-annual sample of search interest, e.g. period "2024-06".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TrendPoint {
    pub period: String,
    pub value: u32,
}

/// Derived market statistics for the idea, attached to demographic
/// selections when the analysis service produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MarketAnalysis {
    #[serde(default)]
    pub queries_analyzed: Vec<String>,
    #[serde(default)]
    pub trend_points: Vec<TrendPoint>,
    /// 1-10, higher means more resilient to displacement.
    pub resilience_score: u8,
    /// Total addressable market estimate in USD.
    pub market_cap_estimate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_is_fixed() {
        assert_eq!(
            Category::all(),
            [
                Category::Demographics,
                Category::Competitors,
                Category::Cofounders,
                Category::Investors,
            ]
        );
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::Cofounders).unwrap();
        assert_eq!(json, "\"cofounders\"");
    }

    #[test]
    fn haversine_london_to_paris() {
        // London to Paris is ~344km
        let dist = haversine_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(
            (dist - 344.0).abs() < 5.0,
            "London to Paris should be ~344km, got {dist}"
        );
    }

    #[test]
    fn haversine_same_point_is_zero() {
        let dist = haversine_km(40.7128, -74.006, 40.7128, -74.006);
        assert!(dist < 0.001, "Same point should be 0km, got {dist}");
    }

    #[test]
    fn record_tag_round_trips() {
        let record = SourceRecord::Cofounder(Cofounder {
            name: "Ada Quinn".to_string(),
            location: "Berlin, Germany".to_string(),
            links: vec!["https://example.com/ada".to_string()],
            coordinates: Some(GeoPoint {
                lat: 52.52,
                lng: 13.405,
            }),
            match_score: 8.0,
        });
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"record_type\":\"cofounder\""));
        let back: SourceRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.category(), Category::Cofounders);
        assert_eq!(back.display_name(), "Ada Quinn");
    }

    #[test]
    fn missing_coordinates_excluded_from_rendering_accessor() {
        let record = SourceRecord::Competitor(Competitor {
            company_name: "Lexware".to_string(),
            location: "Unknown".to_string(),
            links: vec![],
            date_founded: None,
            coordinates: None,
            threat_score: 8.5,
            explanation: None,
        });
        assert!(record.coordinates().is_none());
    }

    #[test]
    fn demographic_display_name_falls_back_to_name() {
        let point = DemographicPoint {
            name: "Shoreditch".to_string(),
            coordinates: GeoPoint {
                lat: 51.526,
                lng: -0.08,
            },
            weight: 4.0,
            description: None,
            target_fit: None,
            display_name: None,
            area_code: None,
            borough: None,
            country: None,
            bbox: None,
        };
        let record = SourceRecord::Demographic(point);
        assert_eq!(record.display_name(), "Shoreditch");
    }
}
