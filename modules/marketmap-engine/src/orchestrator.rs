//! Drives the four category fetches strictly in order, one at a time,
//! with a mandatory pause between steps. The pacing exists to stay under
//! the analysis service's rate limit; reliability is bought with latency.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{info, warn};
use uuid::Uuid;

use analysis_client::{call_with_backoff, RetryPolicy};
use marketmap_common::{Category, MarketMapError, SourceRecord};

use crate::acquisition::{AcquisitionSnapshot, FetchStatus};
use crate::notify::Notification;
use crate::traits::AnalysisFeed;

#[derive(Debug, Clone, Copy)]
pub struct AcquisitionPolicy {
    /// Mandatory pause between category fetches, regardless of outcome.
    pub inter_step_delay: Duration,
    /// Backoff policy handed to the retry wrapper for every fetch.
    pub retry: RetryPolicy,
    /// Minimum trimmed idea length worth a run.
    pub min_idea_len: usize,
}

impl Default for AcquisitionPolicy {
    fn default() -> Self {
        Self {
            inter_step_delay: Duration::from_millis(3000),
            retry: RetryPolicy::default(),
            min_idea_len: 3,
        }
    }
}

/// Owns `AcquisitionSnapshot` and is its only writer. Consumers observe
/// via `subscribe()`; transient alerts arrive on the notification
/// receiver returned from `new`.
pub struct Orchestrator<F> {
    feed: F,
    policy: AcquisitionPolicy,
    snapshot_tx: watch::Sender<AcquisitionSnapshot>,
    notify_tx: mpsc::UnboundedSender<Notification>,
}

impl<F: AnalysisFeed> Orchestrator<F> {
    pub fn new(
        feed: F,
        policy: AcquisitionPolicy,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (snapshot_tx, _) = watch::channel(AcquisitionSnapshot::empty());
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        (
            Self {
                feed,
                policy,
                snapshot_tx,
                notify_tx,
            },
            notify_rx,
        )
    }

    pub fn subscribe(&self) -> watch::Receiver<AcquisitionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn snapshot(&self) -> AcquisitionSnapshot {
        self.snapshot_tx.borrow().clone()
    }

    /// Execute one acquisition run. A later `run` call supersedes this
    /// one: in-flight fetches are not aborted, but once the snapshot
    /// belongs to a newer run this run's writes are dropped and it stops
    /// starting new steps.
    pub async fn run(&self, idea: &str, audience: &str) -> Result<(), MarketMapError> {
        let idea = idea.trim();
        if idea.len() < self.policy.min_idea_len {
            return Err(MarketMapError::Validation(format!(
                "idea must be at least {} characters",
                self.policy.min_idea_len
            )));
        }

        {
            let current = self.snapshot_tx.borrow();
            if !current.run_id.is_nil() && current.idea == idea {
                info!(idea, "Idea unchanged, keeping current acquisition");
                return Ok(());
            }
        }

        let run_id = Uuid::new_v4();
        self.snapshot_tx
            .send_replace(AcquisitionSnapshot::new(run_id, idea));
        info!(%run_id, idea, "Acquisition run starting");

        for (step, category) in Category::all().into_iter().enumerate() {
            if step > 0 {
                tokio::time::sleep(self.policy.inter_step_delay).await;
            }

            if !self.mark_loading(run_id, category) {
                info!(%run_id, "Run superseded, stopping");
                return Ok(());
            }

            let result =
                call_with_backoff(self.policy.retry, || self.fetch(category, idea, audience))
                    .await;

            match result {
                Ok(records) => {
                    let count = records.len();
                    if self.record_success(run_id, category, records) {
                        info!(category = %category, count, "Category fetched");
                    }
                }
                Err(err) => {
                    warn!(category = %category, error = %err, "Category fetch failed");
                    if self.record_failure(run_id, category, err.to_string()) {
                        let _ = self
                            .notify_tx
                            .send(Notification::failure(category, err.to_string()));
                    }
                }
            }
        }

        // Market context rides behind the four categories. Its absence is
        // tolerated everywhere, so a failure only logs.
        match call_with_backoff(self.policy.retry, || self.feed.market_analysis(idea)).await {
            Ok(analysis) => {
                self.write_if_current(run_id, |snap| snap.analysis = Some(analysis));
            }
            Err(err) => warn!(error = %err, "Market analysis unavailable"),
        }

        info!(%run_id, "Acquisition run finished");
        Ok(())
    }

    async fn fetch(
        &self,
        category: Category,
        idea: &str,
        audience: &str,
    ) -> analysis_client::Result<Vec<SourceRecord>> {
        match category {
            Category::Demographics => Ok(self
                .feed
                .audience_map(idea, audience)
                .await?
                .into_iter()
                .map(SourceRecord::Demographic)
                .collect()),
            Category::Competitors => Ok(self
                .feed
                .competitors(idea)
                .await?
                .into_iter()
                .map(SourceRecord::Competitor)
                .collect()),
            Category::Cofounders => Ok(self
                .feed
                .cofounders(idea)
                .await?
                .into_iter()
                .map(SourceRecord::Cofounder)
                .collect()),
            Category::Investors => Ok(self
                .feed
                .investors(idea)
                .await?
                .into_iter()
                .map(SourceRecord::Investor)
                .collect()),
        }
    }

    /// Apply a mutation only while `run_id` still owns the snapshot.
    /// Returns whether the write landed.
    fn write_if_current(
        &self,
        run_id: Uuid,
        mutate: impl FnOnce(&mut AcquisitionSnapshot),
    ) -> bool {
        let mut applied = false;
        self.snapshot_tx.send_modify(|snap| {
            if snap.run_id == run_id {
                mutate(snap);
                applied = true;
            }
        });
        applied
    }

    fn mark_loading(&self, run_id: Uuid, category: Category) -> bool {
        self.write_if_current(run_id, |snap| {
            if let Some(state) = snap.categories.get_mut(&category) {
                state.status = FetchStatus::Loading;
            }
        })
    }

    fn record_success(
        &self,
        run_id: Uuid,
        category: Category,
        records: Vec<SourceRecord>,
    ) -> bool {
        self.write_if_current(run_id, |snap| {
            if let Some(state) = snap.categories.get_mut(&category) {
                state.status = FetchStatus::Success;
                state.records = records;
                state.last_error = None;
            }
        })
    }

    fn record_failure(&self, run_id: Uuid, category: Category, message: String) -> bool {
        self.write_if_current(run_id, |snap| {
            if let Some(state) = snap.categories.get_mut(&category) {
                state.status = FetchStatus::Error;
                state.last_error = Some(message);
            }
        })
    }
}
