use chrono::{DateTime, Utc};

/// Platform capability for a single future local alert per entry id.
///
/// Both operations are idempotent: scheduling twice under the same id
/// replaces the earlier registration, cancelling an unknown id is a no-op.
/// Calls are fire-and-forget; the reminder engine never awaits delivery and
/// must stay correct when every call silently fails (e.g. the user denied
/// the one-time authorization prompt). Alerts are a convenience nudge, not
/// the source of truth — `refresh()` is.
pub trait AlertGateway: Send + Sync {
    /// One-time, user-facing permission request. Returns whether alerts may
    /// be delivered; a `false` here never blocks any engine operation.
    fn request_authorization(&self) -> bool;

    fn schedule(&self, id: &str, fire_at: DateTime<Utc>, title: &str, body: &str);

    fn cancel(&self, id: &str);
}
