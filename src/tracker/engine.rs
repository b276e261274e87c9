use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use log::{info, warn};
use tokio::sync::Mutex;

use crate::{
    alerts::AlertGateway,
    db::{
        models::entry::{MAX_INTENSITY, MAX_WORRY_TEXT_CHARS},
        Database, WorryEntry,
    },
    settings::SettingsStore,
    tracker::classifier::{classify, Buckets},
};

const ALERT_TITLE: &str = "Worry check-in";
const ALERT_BODY: &str = "Time to revisit a worry you logged. Was it as bad as you feared?";

/// Owns the worry-entry lifecycle: CRUD against the store, alert
/// registrations on the gateway, and the published lifecycle buckets.
///
/// State is pull-based: nothing fires on the Pending→Ready edge. Callers
/// invoke [`ReminderEngine::refresh`] on foreground/visibility events and
/// the snapshot is recomputed wholesale from the stored timestamps, so
/// correctness never depends on the process having been running when a
/// reminder time passed.
#[derive(Clone)]
pub struct ReminderEngine {
    db: Database,
    alerts: Arc<dyn AlertGateway>,
    settings: Arc<SettingsStore>,
    buckets: Arc<Mutex<Buckets>>,
}

impl ReminderEngine {
    pub fn new(db: Database, alerts: Arc<dyn AlertGateway>, settings: Arc<SettingsStore>) -> Self {
        Self {
            db,
            alerts,
            settings,
            buckets: Arc::new(Mutex::new(Buckets::default())),
        }
    }

    /// Validates and persists a new worry, then requests its alert. The
    /// alert attempt strictly follows a successful persist, so a store
    /// failure can never leave a dangling registration. A reminder time in
    /// the past is accepted; the entry simply classifies straight into
    /// Ready.
    pub async fn add_worry(
        &self,
        worry_text: &str,
        control_thought: Option<String>,
        intensity: u8,
        reminder_at: DateTime<Utc>,
    ) -> Result<WorryEntry> {
        let text = worry_text.trim();
        if text.is_empty() {
            return Err(anyhow!("worry text must not be empty"));
        }
        if text.chars().count() > MAX_WORRY_TEXT_CHARS {
            return Err(anyhow!(
                "worry text exceeds {MAX_WORRY_TEXT_CHARS} characters"
            ));
        }
        if intensity > MAX_INTENSITY {
            return Err(anyhow!("intensity must be in 0..={MAX_INTENSITY}"));
        }

        let entry = WorryEntry::new(
            text.to_string(),
            control_thought.filter(|thought| !thought.trim().is_empty()),
            intensity,
            reminder_at,
        );

        self.db.insert_entry(&entry).await?;

        if reminder_at <= Utc::now() {
            info!("Worry {} logged with an elapsed reminder time", entry.id);
        }
        self.maybe_schedule(&entry.id, entry.reminder_at);

        self.refresh().await?;
        Ok(entry)
    }

    /// Records the outcome judgment for an entry. Idempotent: a second
    /// answer (double tap, replayed UI event) is a logged no-op and the
    /// first outcome is kept. Cancels the alert registration so a stale
    /// notification cannot fire for an already-completed entry.
    pub async fn answer_worry(&self, entry_id: &str, outcome: bool) -> Result<()> {
        let changed = self
            .db
            .mark_entry_answered(entry_id, outcome, Utc::now())
            .await?;

        if changed {
            self.alerts.cancel(entry_id);
        } else {
            warn!("Ignoring answer for {entry_id}: already answered or unknown");
        }

        self.refresh().await?;
        Ok(())
    }

    /// Cancels the entry's alert registration and removes the record. Safe
    /// for entries with no outstanding registration (already answered, or
    /// scheduling failed at creation).
    pub async fn delete_worry(&self, entry_id: &str) -> Result<()> {
        self.alerts.cancel(entry_id);
        self.db.delete_entry(entry_id).await?;
        self.refresh().await?;
        Ok(())
    }

    /// Moves an unanswered entry's reminder and replaces its alert
    /// registration under the same id. Answered or unknown entries are a
    /// logged no-op. Returns whether anything changed.
    pub async fn reschedule_worry(
        &self,
        entry_id: &str,
        reminder_at: DateTime<Utc>,
    ) -> Result<bool> {
        let changed = self
            .db
            .update_entry_reminder(entry_id, reminder_at, Utc::now())
            .await?;

        if changed {
            self.maybe_schedule(entry_id, reminder_at);
        } else {
            warn!("Ignoring reschedule for {entry_id}: already answered or unknown");
        }

        self.refresh().await?;
        Ok(changed)
    }

    /// Re-fetches every entry and republishes the lifecycle buckets against
    /// the current instant. The only way bucket state becomes visible.
    pub async fn refresh(&self) -> Result<Buckets> {
        let entries = self.db.fetch_all_entries().await?;
        let snapshot = classify(entries, Utc::now());

        let mut guard = self.buckets.lock().await;
        *guard = snapshot.clone();
        Ok(snapshot)
    }

    /// Last published snapshot; call [`ReminderEngine::refresh`] first when
    /// returning to the foreground.
    pub async fn buckets(&self) -> Buckets {
        self.buckets.lock().await.clone()
    }

    /// Re-registers alerts for unanswered entries whose reminder is still
    /// ahead. Call once at startup: gateway registrations do not survive a
    /// process restart, and scheduling is an idempotent replace so calling
    /// this repeatedly is harmless.
    pub async fn resync_alerts(&self) -> Result<usize> {
        if !self.settings.alerts().enabled {
            return Ok(0);
        }

        let upcoming = self.db.fetch_unanswered_future_entries(Utc::now()).await?;
        for entry in &upcoming {
            self.alerts.schedule(&entry.id, entry.reminder_at, ALERT_TITLE, ALERT_BODY);
        }

        if !upcoming.is_empty() {
            info!("Re-registered {} pending alerts", upcoming.len());
        }
        Ok(upcoming.len())
    }

    fn maybe_schedule(&self, entry_id: &str, fire_at: DateTime<Utc>) {
        if !self.settings.alerts().enabled {
            info!("Alerts disabled; skipping registration for {entry_id}");
            return;
        }
        self.alerts.schedule(entry_id, fire_at, ALERT_TITLE, ALERT_BODY);
    }
}
