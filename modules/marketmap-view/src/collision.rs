//! Declutters co-located markers. Records of different categories at the
//! same point get a fixed directional nudge per category; a small random
//! jitter separates same-category duplicates.

use marketmap_common::{Category, GeoPoint};
use rand::Rng;

/// Per-axis bias in degrees. Roughly 1.3 km of latitude.
const BIAS_DEG: f64 = 0.012;

/// Per-axis jitter bound in degrees. Kept well under the bias so jitter
/// can never collapse two categories back onto each other.
const JITTER_DEG: f64 = 0.0015;

#[derive(Debug, Clone, Copy)]
pub struct CollisionResolver {
    bias_deg: f64,
    jitter_deg: f64,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self {
            bias_deg: BIAS_DEG,
            jitter_deg: JITTER_DEG,
        }
    }
}

impl CollisionResolver {
    /// The guaranteed floor on the distance (in degrees) between two
    /// resolved points of different marker categories at the same input.
    pub fn min_separation_deg(&self) -> f64 {
        // Closest pair is the unbiased category vs a diagonal one, with
        // jitter pulling both inward on each axis.
        let gap = self.bias_deg - 2.0 * self.jitter_deg;
        gap * std::f64::consts::SQRT_2
    }

    /// Deterministic (lat, lng) bias for a category, in degrees.
    /// Investors stay put; competitors shift north-east, cofounders
    /// north-west. Demographic points render as a density surface and
    /// are never nudged.
    pub fn bias_for(&self, category: Category) -> (f64, f64) {
        match category {
            Category::Investors | Category::Demographics => (0.0, 0.0),
            Category::Competitors => (self.bias_deg, self.bias_deg),
            Category::Cofounders => (self.bias_deg, -self.bias_deg),
        }
    }

    /// Resolve a render position for a record at `point`. Best-effort
    /// declutter, not exact packing: dense same-category clusters can
    /// still brush against each other.
    pub fn offset<R: Rng + ?Sized>(
        &self,
        point: GeoPoint,
        category: Category,
        rng: &mut R,
    ) -> GeoPoint {
        let (d_lat, d_lng) = self.bias_for(category);
        GeoPoint {
            lat: point.lat + d_lat + rng.random_range(-self.jitter_deg..=self.jitter_deg),
            lng: point.lng + d_lng + rng.random_range(-self.jitter_deg..=self.jitter_deg),
        }
    }
}
