use std::convert::TryFrom;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn to_intensity(value: i64, field: &str) -> Result<u8> {
    let raw = u8::try_from(value).map_err(|_| anyhow!("{field} out of range: {value}"))?;
    if raw > 10 {
        return Err(anyhow!("{field} exceeds maximum of 10: {raw}"));
    }
    Ok(raw)
}

pub fn to_bool(value: i64) -> bool {
    value != 0
}

pub fn to_optional_bool(value: Option<i64>) -> Option<bool> {
    value.map(to_bool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_accepts_full_scale() {
        assert_eq!(to_intensity(0, "intensity").unwrap(), 0);
        assert_eq!(to_intensity(10, "intensity").unwrap(), 10);
    }

    #[test]
    fn intensity_rejects_out_of_range() {
        assert!(to_intensity(11, "intensity").is_err());
        assert!(to_intensity(-1, "intensity").is_err());
    }

    #[test]
    fn datetime_roundtrips_rfc3339() {
        let now = Utc::now();
        let parsed = parse_datetime(&now.to_rfc3339(), "created_at").unwrap();
        assert_eq!(parsed, now);
    }
}
