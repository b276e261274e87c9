use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use chrono::{DateTime, Utc};
use log::{info, warn};
use notify_rust::Notification;
use tokio::{task::JoinHandle, time};

use crate::alerts::gateway::AlertGateway;

/// Desktop implementation backed by `notify-rust`: one spawned task per
/// entry id sleeps until the fire time and then shows a notification.
/// Registrations live only as long as the process; the engine re-registers
/// pending alerts on startup.
#[derive(Clone, Default)]
pub struct DesktopAlertGateway {
    tasks: Arc<Mutex<HashMap<String, JoinHandle<()>>>>,
}

impl DesktopAlertGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn abort_existing(&self, id: &str) -> bool {
        let mut guard = match self.tasks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        match guard.remove(id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    fn registration_count(&self) -> usize {
        self.tasks.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

impl AlertGateway for DesktopAlertGateway {
    fn request_authorization(&self) -> bool {
        // Desktop notification daemons have no per-app grant to acquire; the
        // worst case is a delivery failure logged at fire time.
        true
    }

    fn schedule(&self, id: &str, fire_at: DateTime<Utc>, title: &str, body: &str) {
        if self.abort_existing(id) {
            info!("Replacing alert registration for {id}");
        }

        let delay = (fire_at - Utc::now()).to_std().unwrap_or(Duration::ZERO);
        let entry_id = id.to_string();
        let title = title.to_string();
        let body = body.to_string();
        let tasks = self.tasks.clone();

        let task_id = entry_id.clone();
        let handle = tokio::spawn(async move {
            time::sleep(delay).await;

            if let Err(err) = Notification::new().summary(&title).body(&body).show() {
                warn!("Failed to deliver alert for {task_id}: {err}");
            }

            if let Ok(mut guard) = tasks.lock() {
                guard.remove(&task_id);
            }
        });

        if let Ok(mut guard) = self.tasks.lock() {
            guard.insert(entry_id, handle);
        }
    }

    fn cancel(&self, id: &str) {
        if self.abort_existing(id) {
            info!("Cancelled alert registration for {id}");
        }
    }
}
