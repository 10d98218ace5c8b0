use serde::Serialize;
use time::{format_description::FormatItem, macros::format_description, Date};

use crate::error::ApiError;
use crate::summary::MacroTotals;
use crate::validation::Violations;

/// Calendar-day wire format for per-day summaries and the `/summaries/:date`
/// path parameter.
pub const DAY_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn parse_day(raw: &str) -> Result<Date, ApiError> {
    Date::parse(raw, DAY_FORMAT).map_err(|_| {
        let mut v = Violations::new();
        v.add("date", "must be a YYYY-MM-DD date");
        ApiError::Validation(v)
    })
}

#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: String,
    #[serde(flatten)]
    pub totals: MacroTotals,
}

impl DaySummary {
    pub fn new(date: Date, totals: MacroTotals) -> Self {
        Self {
            // the format description cannot fail on a valid Date
            date: date.format(DAY_FORMAT).expect("day format"),
            totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn parse_day_accepts_iso_dates() {
        assert_eq!(parse_day("2024-01-01").unwrap(), date!(2024 - 01 - 01));
    }

    #[test]
    fn parse_day_rejects_garbage() {
        assert!(parse_day("01/01/2024").is_err());
        assert!(parse_day("2024-13-40").is_err());
        assert!(parse_day("tomorrow").is_err());
    }

    #[test]
    fn day_summary_serializes_flat() {
        let row = DaySummary::new(
            date!(2024 - 01 - 01),
            MacroTotals {
                calories: 140.0,
                protein: 12.0,
                carbs: 2.0,
                fat: 10.0,
            },
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["calories"], 140.0);
        assert!(json.get("totals").is_none());
    }
}
