//! Sign-up period settings for the admin page.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::forms::{FormError, FormFields};
use crate::models::{DateDict, PeriodRequest};

/// The club runs on Japan Standard Time.
pub const JST_OFFSET_HOURS: i32 = 9;

const LOCAL_INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Parses the value of an `<input type="datetime-local">`.
pub fn parse_local_input(field: &str, value: &str) -> Result<NaiveDateTime, FormError> {
    let value = value.trim();
    LOCAL_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| FormError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

impl DateDict {
    pub fn from_local_input(field: &str, value: &str) -> Result<Self, FormError> {
        parse_local_input(field, value).map(Self::from_naive)
    }

    pub fn from_naive(dt: NaiveDateTime) -> Self {
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            timezone: JST_OFFSET_HOURS,
        }
    }
}

/// Builds the `PUT /admin/period` body from the settings form.
///
/// Ordering is checked on the full input, seconds included, before the
/// values are truncated to minutes for the request.
pub fn period_request(fields: &FormFields) -> Result<PeriodRequest, FormError> {
    let start = parse_local_input("start_time", &fields.required("start_time")?)?;
    let end = parse_local_input("end_time", &fields.required("end_time")?)?;

    if end <= start {
        return Err(FormError::PeriodOrder);
    }

    Ok(PeriodRequest {
        year: fields.int("year")?,
        season: fields.int("season")?,
        start_time: DateDict::from_naive(start),
        end_time: DateDict::from_naive(end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(start: &str, end: &str) -> FormFields {
        FormFields::new()
            .with("year", "2025")
            .with("season", "2")
            .with("start_time", start)
            .with("end_time", end)
    }

    #[test]
    fn test_parses_datetime_local() {
        let date = DateDict::from_local_input("start_time", "2025-04-09T07:00").unwrap();
        assert_eq!(
            date,
            DateDict {
                year: 2025,
                month: 4,
                day: 9,
                hour: 7,
                minute: 0,
                timezone: 9,
            }
        );
    }

    #[test]
    fn test_rejects_garbage_date() {
        let err = DateDict::from_local_input("end_time", "tomorrow").unwrap_err();
        assert!(matches!(err, FormError::InvalidDate { ref field, .. } if field == "end_time"));
    }

    #[test]
    fn test_period_request() {
        let request = period_request(&fields("2025-09-01T07:00", "2025-09-30T23:59")).unwrap();
        assert_eq!(request.year, 2025);
        assert_eq!(request.season, 2);
        assert_eq!(request.start_time.month, 9);
        assert_eq!(request.end_time.minute, 59);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["start_time"]["timezone"], 9);
    }

    #[test]
    fn test_period_must_move_forward() {
        let result = period_request(&fields("2025-09-30T07:00", "2025-09-01T07:00"));
        assert!(matches!(result, Err(FormError::PeriodOrder)));

        let result = period_request(&fields("2025-09-01T07:00", "2025-09-01T07:00"));
        assert!(matches!(result, Err(FormError::PeriodOrder)));
    }

    #[test]
    fn test_period_order_counts_seconds() {
        let request =
            period_request(&fields("2025-09-01T07:00:10", "2025-09-01T07:00:50")).unwrap();
        assert_eq!(request.start_time, request.end_time);

        let result = period_request(&fields("2025-09-01T07:00:50", "2025-09-01T07:00:10"));
        assert!(matches!(result, Err(FormError::PeriodOrder)));
    }
}
