//! Builds the declarative density-surface spec from demographic points.
//! The renderer evaluates the ramps against the raw point set; nothing
//! here buckets or clusters.

use marketmap_common::{DemographicPoint, GeoPoint};
use serde::Serialize;

/// A raw point with its 1-5 relevance weight, as the renderer consumes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightedPoint {
    pub position: GeoPoint,
    pub weight: f32,
    pub name: String,
}

/// Piecewise-linear interpolation stops: (input, output) pairs with
/// strictly increasing inputs.
pub type Stops = Vec<(f32, f32)>;

/// Declarative parameters for the density surface. All ramps are
/// monotonic in the direction the field name implies; the same point set
/// and zoom always yield the same rendered layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapLayerSpec {
    pub points: Vec<WeightedPoint>,
    /// weight (1-5) -> per-point contribution, non-decreasing.
    pub weight_stops: Stops,
    /// zoom -> overall intensity multiplier, non-decreasing so the
    /// surface stays visible as points spread out.
    pub intensity_stops: Stops,
    /// zoom -> kernel radius in pixels.
    pub radius_stops: Stops,
    /// zoom -> layer opacity, non-increasing; fades out once individual
    /// points are distinguishable.
    pub opacity_stops: Stops,
}

/// Evaluate interpolation stops at `x`, clamping outside the domain.
pub fn interpolate(stops: &[(f32, f32)], x: f32) -> f32 {
    let Some(&(first_in, first_out)) = stops.first() else {
        return 0.0;
    };
    if x <= first_in {
        return first_out;
    }
    let &(last_in, last_out) = stops.last().expect("stops checked non-empty");
    if x >= last_in {
        return last_out;
    }
    for window in stops.windows(2) {
        let (x0, y0) = window[0];
        let (x1, y1) = window[1];
        if x <= x1 {
            let t = (x - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }
    last_out
}

/// Build the density-surface spec for a set of demographic points.
pub fn build_layer(points: &[DemographicPoint]) -> HeatmapLayerSpec {
    let weighted = points
        .iter()
        .map(|p| WeightedPoint {
            position: p.coordinates,
            weight: p.weight,
            name: p.name.clone(),
        })
        .collect();

    HeatmapLayerSpec {
        points: weighted,
        weight_stops: vec![(1.0, 0.2), (3.0, 0.6), (5.0, 1.0)],
        intensity_stops: vec![(0.0, 0.6), (9.0, 1.8), (15.0, 3.0)],
        radius_stops: vec![(0.0, 18.0), (9.0, 40.0), (15.0, 64.0)],
        opacity_stops: vec![(0.0, 0.85), (10.0, 0.85), (13.0, 0.4), (15.0, 0.0)],
    }
}

impl HeatmapLayerSpec {
    /// Contribution of a record weight to the surface.
    pub fn contribution_for(&self, weight: f32) -> f32 {
        interpolate(&self.weight_stops, weight)
    }

    pub fn intensity_at(&self, zoom: f32) -> f32 {
        interpolate(&self.intensity_stops, zoom)
    }

    pub fn radius_at(&self, zoom: f32) -> f32 {
        interpolate(&self.radius_stops, zoom)
    }

    pub fn opacity_at(&self, zoom: f32) -> f32 {
        interpolate(&self.opacity_stops, zoom)
    }
}
