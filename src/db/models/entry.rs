use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of the worry text, in characters.
pub const MAX_WORRY_TEXT_CHARS: usize = 200;

/// Maximum self-rated intensity on the 0..=10 scale.
pub const MAX_INTENSITY: u8 = 10;

/// A logged worry paired with a future self-check time.
///
/// `id` doubles as the alert gateway's scheduling key. Lifecycle bucket
/// membership is never stored on the entry; it is derived from
/// (`is_answered`, `reminder_at`, now) at classification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorryEntry {
    pub id: String,
    pub worry_text: String,
    pub control_thought: Option<String>,
    pub intensity: u8,
    pub created_at: DateTime<Utc>,
    pub reminder_at: DateTime<Utc>,
    pub is_answered: bool,
    /// Whether reality turned out better than feared. `Some` exactly when
    /// `is_answered` is true; set once and never changed.
    pub outcome: Option<bool>,
    pub updated_at: DateTime<Utc>,
}

impl WorryEntry {
    pub fn new(
        worry_text: String,
        control_thought: Option<String>,
        intensity: u8,
        reminder_at: DateTime<Utc>,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            worry_text,
            control_thought,
            intensity,
            created_at,
            reminder_at,
            is_answered: false,
            outcome: None,
            updated_at: created_at,
        }
    }
}
