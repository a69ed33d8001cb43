//! One detail panel, one selection. Every record shape flattens into the
//! same tagged view so the panel renders generically, keeping per-category
//! distinction (score direction, bullet groups) as data.

use marketmap_common::{Category, MarketAnalysis, SourceRecord};
use serde::Serialize;

/// Whether a high primary score is good news or bad news.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirection {
    HigherIsWorse,
    HigherIsBetter,
}

/// A titled bullet group in the detail panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplanationGroup {
    pub title: String,
    pub bullets: Vec<String>,
}

/// The unified view of whichever record is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub category: Category,
    pub display_name: String,
    pub primary_score: f32,
    pub score_direction: ScoreDirection,
    pub location: String,
    pub links: Vec<String>,
    pub explanation: Vec<ExplanationGroup>,
    /// Demographic selections only: the 1-5 density weight.
    pub weight: Option<f32>,
    /// Demographic selections only, when the analysis service produced
    /// market context. Absence never blocks the rest of the panel.
    pub analysis: Option<MarketAnalysis>,
}

fn group(title: &str, bullets: &[String]) -> Option<ExplanationGroup> {
    if bullets.is_empty() {
        return None;
    }
    Some(ExplanationGroup {
        title: title.to_string(),
        bullets: bullets.to_vec(),
    })
}

/// Flatten a record into the unified panel view.
pub fn unify(record: &SourceRecord, analysis: Option<&MarketAnalysis>) -> Selection {
    let (primary_score, score_direction, explanation, weight) = match record {
        SourceRecord::Competitor(c) => {
            let groups = c
                .explanation
                .iter()
                .flat_map(|e| {
                    [
                        group("Angle", &e.angle),
                        group("What they cover", &e.what_they_cover),
                        group("Gaps", &e.gaps),
                    ]
                })
                .flatten()
                .collect();
            (c.threat_score, ScoreDirection::HigherIsWorse, groups, None)
        }
        SourceRecord::Investor(i) => {
            let groups = i
                .explanation
                .iter()
                .flat_map(|e| {
                    [
                        group("Recent investments", &e.recent_investments),
                        group("Investment thesis", &e.investment_thesis),
                        group("How to pitch", &e.how_to_pitch),
                    ]
                })
                .flatten()
                .collect();
            (i.match_score, ScoreDirection::HigherIsBetter, groups, None)
        }
        SourceRecord::Cofounder(c) => {
            (c.match_score, ScoreDirection::HigherIsBetter, Vec::new(), None)
        }
        SourceRecord::Demographic(d) => {
            let mut groups = Vec::new();
            if let Some(description) = &d.description {
                groups.push(ExplanationGroup {
                    title: "About this area".to_string(),
                    bullets: vec![description.clone()],
                });
            }
            if let Some(fit) = &d.target_fit {
                groups.push(ExplanationGroup {
                    title: "Why your audience is here".to_string(),
                    bullets: vec![fit.clone()],
                });
            }
            (d.weight, ScoreDirection::HigherIsBetter, groups, Some(d.weight))
        }
    };

    Selection {
        category: record.category(),
        display_name: record.display_name().to_string(),
        primary_score,
        score_direction,
        location: record.location_label().to_string(),
        links: record.links().to_vec(),
        explanation,
        weight,
        analysis: match record {
            SourceRecord::Demographic(_) => analysis.cloned(),
            _ => None,
        },
    }
}

/// Detail-panel state. Pinning only defers dismiss-on-outside-click; it
/// never changes which selection is open.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PanelState {
    Closed,
    Open { selection: Selection, pinned: bool },
}

#[derive(Debug, Default)]
pub struct SelectionController {
    state: PanelState,
}

impl Default for PanelState {
    fn default() -> Self {
        PanelState::Closed
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn current(&self) -> Option<&Selection> {
        match &self.state {
            PanelState::Open { selection, .. } => Some(selection),
            PanelState::Closed => None,
        }
    }

    /// Open the panel on `record`, replacing any open selection in one
    /// step. No network I/O happens here; all data is pre-fetched.
    pub fn select(&mut self, record: &SourceRecord, analysis: Option<&MarketAnalysis>) {
        self.state = PanelState::Open {
            selection: unify(record, analysis),
            pinned: false,
        };
    }

    /// Explicit close, escape, or navigation away. Always closes.
    pub fn clear(&mut self) {
        self.state = PanelState::Closed;
    }

    pub fn set_pinned(&mut self, pinned: bool) {
        if let PanelState::Open { pinned: p, .. } = &mut self.state {
            *p = pinned;
        }
    }

    /// A click outside the panel dismisses it unless pinned.
    pub fn dismiss_outside_click(&mut self) {
        if let PanelState::Open { pinned: false, .. } = self.state {
            self.state = PanelState::Closed;
        }
    }
}
