//! Worry-tracker core for a personal wellness companion app.
//!
//! A user logs a worry together with a future point in time at which they
//! intend to revisit it. Entries move through three lifecycle buckets
//! (Pending, Ready, Completed) driven purely by wall-clock time, with one
//! best-effort local alert per entry. Everything is local: SQLite for the
//! records, the platform notification daemon for the nudge, no server.
//!
//! The presentation layer talks to [`ReminderEngine`] and calls
//! [`ReminderEngine::refresh`] whenever the app returns to the foreground;
//! bucket membership is recomputed from stored timestamps on every refresh
//! rather than driven by timers, so nothing breaks while the process is
//! suspended.

mod alerts;
mod db;
mod settings;
mod tracker;

pub use alerts::{AlertGateway, DesktopAlertGateway};
pub use db::{Database, WorryEntry};
pub use settings::{AlertSettings, SettingsStore};
pub use tracker::{classify, time_left_label, Buckets, ReminderEngine, DUE_NOW_LABEL};

/// Initialize logging (reads RUST_LOG env var). Call once from the host
/// application before constructing the engine.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
