use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::models::WorryEntry;

/// Immutable lifecycle snapshot published to the presentation layer.
/// Recomputed wholesale on every refresh rather than patched incrementally,
/// so the buckets can never drift from the stored entries.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Buckets {
    /// Reminder time not yet arrived.
    pub pending: Vec<WorryEntry>,
    /// Reminder time arrived, outcome not yet recorded.
    pub ready: Vec<WorryEntry>,
    /// Resolved with an outcome judgment.
    pub completed: Vec<WorryEntry>,
}

/// Partitions entries into the three lifecycle buckets at instant `now`.
///
/// The partition is exhaustive and pairwise disjoint: every entry lands in
/// exactly one bucket. An entry whose reminder time equals `now` is Ready.
/// Each bucket is ordered most recently created first.
pub fn classify(entries: Vec<WorryEntry>, now: DateTime<Utc>) -> Buckets {
    let mut buckets = Buckets::default();

    for entry in entries {
        if entry.is_answered {
            buckets.completed.push(entry);
        } else if entry.reminder_at > now {
            buckets.pending.push(entry);
        } else {
            buckets.ready.push(entry);
        }
    }

    for bucket in [
        &mut buckets.pending,
        &mut buckets.ready,
        &mut buckets.completed,
    ] {
        bucket.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }

    buckets
}
