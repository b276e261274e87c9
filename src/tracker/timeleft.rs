use chrono::{DateTime, Utc};

/// Rendered when less than a whole minute remains.
pub const DUE_NOW_LABEL: &str = "soon";

/// Coarse human label for the time remaining until `target`.
///
/// Whole hours render as "in Hh Mm", whole minutes as "in Mm", and anything
/// under a minute as the due-now sentinel. Truncation only, no rounding.
/// Only Pending entries are ever formatted, so a non-positive difference
/// simply falls through to the sentinel.
pub fn time_left_label(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let total_minutes = (target - now).num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        format!("in {hours}h {minutes}m")
    } else if minutes > 0 {
        format!("in {minutes}m")
    } else {
        DUE_NOW_LABEL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn renders_hours_and_minutes() {
        let now = Utc::now();
        assert_eq!(
            time_left_label(now + Duration::minutes(135), now),
            "in 2h 15m"
        );
    }

    #[test]
    fn sixty_one_minutes_is_one_hour_one_minute() {
        let now = Utc::now();
        assert_eq!(time_left_label(now + Duration::minutes(61), now), "in 1h 1m");
    }

    #[test]
    fn whole_hour_keeps_zero_minutes() {
        let now = Utc::now();
        assert_eq!(time_left_label(now + Duration::minutes(60), now), "in 1h 0m");
    }

    #[test]
    fn minutes_only_below_one_hour() {
        let now = Utc::now();
        assert_eq!(time_left_label(now + Duration::minutes(45), now), "in 45m");
    }

    #[test]
    fn sub_minute_renders_due_now_sentinel() {
        let now = Utc::now();
        assert_eq!(time_left_label(now + Duration::seconds(45), now), "soon");
    }

    #[test]
    fn past_target_clamps_to_sentinel() {
        let now = Utc::now();
        assert_eq!(time_left_label(now - Duration::minutes(10), now), "soon");
    }
}
