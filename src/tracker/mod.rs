pub mod classifier;
pub mod engine;
pub mod timeleft;

pub use classifier::{classify, Buckets};
pub use engine::ReminderEngine;
pub use timeleft::{time_left_label, DUE_NOW_LABEL};
