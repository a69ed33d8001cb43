//! Derives the marker set from acquired records. Pure: recomputed
//! whenever a category's data or visibility changes, never mutated in
//! place.

use marketmap_common::{Category, GeoPoint, SourceRecord};
use rand::Rng;
use serde::Serialize;

use crate::collision::CollisionResolver;

/// Which categories the viewer currently has switched on.
#[derive(Debug, Clone, Copy)]
pub struct VisibilityToggles {
    pub demographics: bool,
    pub competitors: bool,
    pub cofounders: bool,
    pub investors: bool,
}

impl Default for VisibilityToggles {
    fn default() -> Self {
        Self {
            demographics: true,
            competitors: true,
            cofounders: true,
            investors: true,
        }
    }
}

impl VisibilityToggles {
    pub fn is_visible(&self, category: Category) -> bool {
        match category {
            Category::Demographics => self.demographics,
            Category::Competitors => self.competitors,
            Category::Cofounders => self.cofounders,
            Category::Investors => self.investors,
        }
    }
}

/// A record placed at its collision-resolved position. `record_index`
/// points back into the slice the pin was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPin {
    pub category: Category,
    pub record_index: usize,
    pub position: GeoPoint,
}

/// Derive marker pins from `records`. Demographic points surface through
/// the density layer instead; records without coordinates stay in the
/// payload but are skipped here.
pub fn render_pins<R: Rng + ?Sized>(
    records: &[SourceRecord],
    toggles: &VisibilityToggles,
    resolver: &CollisionResolver,
    rng: &mut R,
) -> Vec<RenderedPin> {
    records
        .iter()
        .enumerate()
        .filter_map(|(record_index, record)| {
            let category = record.category();
            if category == Category::Demographics || !toggles.is_visible(category) {
                return None;
            }
            let base = record.coordinates()?;
            Some(RenderedPin {
                category,
                record_index,
                position: resolver.offset(base, category, rng),
            })
        })
        .collect()
}
