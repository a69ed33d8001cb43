//! The per-run acquisition state. One controller owns it; everyone else
//! sees read-only snapshots through the watch channel.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use marketmap_common::{Category, DemographicPoint, MarketAnalysis, SourceRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    #[default]
    Pending,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CategoryState {
    pub status: FetchStatus,
    pub records: Vec<SourceRecord>,
    pub last_error: Option<String>,
}

/// Everything acquired for one idea. Reset wholesale when a new run
/// starts, overwritten field-by-field as each sequential fetch resolves.
#[derive(Debug, Clone, Serialize)]
pub struct AcquisitionSnapshot {
    pub run_id: Uuid,
    pub idea: String,
    pub started_at: DateTime<Utc>,
    pub categories: HashMap<Category, CategoryState>,
    /// Market context for demographic selections, filled after the four
    /// category fetches when the analysis service cooperates.
    pub analysis: Option<MarketAnalysis>,
}

impl AcquisitionSnapshot {
    /// The initial watch value, before any run has started.
    pub fn empty() -> Self {
        Self::new(Uuid::nil(), "")
    }

    pub fn new(run_id: Uuid, idea: &str) -> Self {
        let categories = Category::all()
            .into_iter()
            .map(|c| (c, CategoryState::default()))
            .collect();
        Self {
            run_id,
            idea: idea.to_string(),
            started_at: Utc::now(),
            categories,
            analysis: None,
        }
    }

    pub fn category(&self, category: Category) -> &CategoryState {
        self.categories
            .get(&category)
            .expect("snapshot always carries all four categories")
    }

    /// The sequencing invariant allows at most one of these at a time.
    pub fn loading_category(&self) -> Option<Category> {
        Category::all()
            .into_iter()
            .find(|c| self.category(*c).status == FetchStatus::Loading)
    }

    /// True once every category has left Pending/Loading.
    pub fn all_settled(&self) -> bool {
        Category::all().into_iter().all(|c| {
            matches!(
                self.category(c).status,
                FetchStatus::Success | FetchStatus::Error
            )
        })
    }

    /// All records across categories, in acquisition order. Input to pin
    /// derivation.
    pub fn all_records(&self) -> Vec<SourceRecord> {
        Category::all()
            .into_iter()
            .flat_map(|c| self.category(c).records.iter().cloned())
            .collect()
    }

    /// The demographic points, typed for the density surface.
    pub fn demographic_points(&self) -> Vec<DemographicPoint> {
        self.category(Category::Demographics)
            .records
            .iter()
            .filter_map(|r| match r {
                SourceRecord::Demographic(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_snapshot_has_four_pending_categories() {
        let snap = AcquisitionSnapshot::new(Uuid::new_v4(), "AI legal assistant");
        assert_eq!(snap.categories.len(), 4);
        for category in Category::all() {
            assert_eq!(snap.category(category).status, FetchStatus::Pending);
            assert!(snap.category(category).records.is_empty());
        }
        assert!(snap.loading_category().is_none());
        assert!(!snap.all_settled());
    }

    #[test]
    fn settled_requires_every_category_resolved() {
        let mut snap = AcquisitionSnapshot::new(Uuid::new_v4(), "AI legal assistant");
        for category in Category::all() {
            snap.categories.get_mut(&category).unwrap().status = FetchStatus::Success;
        }
        assert!(snap.all_settled());

        snap.categories.get_mut(&Category::Investors).unwrap().status = FetchStatus::Error;
        assert!(snap.all_settled(), "errors still count as settled");

        snap.categories.get_mut(&Category::Cofounders).unwrap().status = FetchStatus::Loading;
        assert!(!snap.all_settled());
        assert_eq!(snap.loading_category(), Some(Category::Cofounders));
    }
}
