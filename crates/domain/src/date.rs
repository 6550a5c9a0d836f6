use crate::reminder::ReminderSettings;
use chrono::prelude::*;
use chrono::Duration;
use chrono_tz::Tz;
use thiserror::Error;

const DATE_FORMAT: &str = "%d.%m.%Y";
const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";
const SHORT_DATETIME_FORMAT: &str = "%d.%m %H:%M";

/// Years a typed date may fall in, chrono alone also accepts signed and
/// five digit years.
const ACCEPTED_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

#[derive(Error, Debug, PartialEq)]
pub enum DateParseError {
    #[error("`{0}` is not a date in the DD.MM.YYYY format")]
    InvalidDate(String),
    #[error("`{0}` is not a date and time in the DD.MM.YYYY HH:MM format")]
    InvalidDateTime(String),
    #[error("`{0}` does not exist in the configured time zone")]
    NonexistentLocalTime(String),
    #[error("`{0}` is outside of the years 0001 to 9999")]
    YearOutOfRange(String),
}

fn check_year(year: i32, text: &str) -> Result<(), DateParseError> {
    if ACCEPTED_YEARS.contains(&year) {
        Ok(())
    } else {
        Err(DateParseError::YearOutOfRange(text.to_string()))
    }
}

/// The instant `date` at `hour`:00 in `tz`.
///
/// When the wall clock skips that hour (DST gap) the first existing
/// instant an hour later is used instead.
pub fn local_at_hour(date: NaiveDate, hour: u32, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
}

/// Parses a `DD.MM.YYYY` expiration date into the anchor instant in millis,
/// which is the date at the configured notification hour.
pub fn parse_expiration(text: &str, settings: &ReminderSettings) -> Result<i64, DateParseError> {
    let text = text.trim();
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| DateParseError::InvalidDate(text.to_string()))?;
    check_year(date.year(), text)?;

    local_at_hour(date, settings.notify_hour, &settings.timezone)
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| DateParseError::NonexistentLocalTime(text.to_string()))
}

/// Parses a `DD.MM.YYYY HH:MM` wall clock time in `tz` into millis
pub fn parse_custom_time(text: &str, tz: &Tz) -> Result<i64, DateParseError> {
    let text = text.trim();
    let naive = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .map_err(|_| DateParseError::InvalidDateTime(text.to_string()))?;
    check_year(naive.year(), text)?;

    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| DateParseError::NonexistentLocalTime(text.to_string()))
}

fn format_with(timestamp_millis: i64, tz: &Tz, format: &str) -> String {
    match tz.timestamp_millis_opt(timestamp_millis).single() {
        Some(dt) => dt.format(format).to_string(),
        None => "-".into(),
    }
}

pub fn format_date(timestamp_millis: i64, tz: &Tz) -> String {
    format_with(timestamp_millis, tz, DATE_FORMAT)
}

pub fn format_short_datetime(timestamp_millis: i64, tz: &Tz) -> String {
    format_with(timestamp_millis, tz, SHORT_DATETIME_FORMAT)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono_tz::Europe::Moscow;
    use chrono_tz::Europe::Oslo;

    fn settings() -> ReminderSettings {
        ReminderSettings {
            timezone: Moscow,
            notify_hour: 9,
        }
    }

    #[test]
    fn it_parses_expiration_at_notify_hour() {
        let ts = parse_expiration("01.06.2025", &settings()).expect("Valid date");
        let expected = Moscow.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        assert_eq!(ts, expected.timestamp_millis());
    }

    #[test]
    fn it_trims_input() {
        assert!(parse_expiration("  01.06.2025 \n", &settings()).is_ok());
        assert!(parse_custom_time(" 15.05.2025 14:30 ", &Moscow).is_ok());
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid = vec![
            "not-a-date",
            "",
            "2025-06-01",
            "32.01.2025",
            "29.02.2025",
            "01.13.2025",
            "01.06.2025 09:00",
        ];
        for text in invalid {
            assert!(
                parse_expiration(text, &settings()).is_err(),
                "Expected {} to be rejected",
                text
            );
        }
        assert_eq!(
            parse_expiration("nope", &settings()),
            Err(DateParseError::InvalidDate("nope".into()))
        );
    }

    #[test]
    fn it_accepts_leap_day() {
        assert!(parse_expiration("29.02.2028", &settings()).is_ok());
    }

    #[test]
    fn it_rejects_years_outside_of_calendar_range() {
        for text in &["01.01.-262143", "01.01.0000", "31.12.-1"] {
            assert_eq!(
                parse_expiration(text, &settings()),
                Err(DateParseError::YearOutOfRange(text.to_string())),
                "Expected {} to be rejected",
                text
            );
        }
        assert_eq!(
            parse_custom_time("01.01.-262143 10:00", &Moscow),
            Err(DateParseError::YearOutOfRange("01.01.-262143 10:00".into()))
        );
        assert!(parse_expiration("01.01.0001", &settings()).is_ok());
        assert!(parse_expiration("31.12.9999", &settings()).is_ok());
    }

    #[test]
    fn it_parses_custom_time_in_timezone() {
        let ts = parse_custom_time("15.05.2025 14:30", &Moscow).expect("Valid datetime");
        let expected = Moscow.with_ymd_and_hms(2025, 5, 15, 14, 30, 0).unwrap();
        assert_eq!(ts, expected.timestamp_millis());
    }

    #[test]
    fn it_rejects_invalid_custom_times() {
        for text in &["15.05.2025", "15.05.2025 25:00", "15.05.2025 14:61", "tomorrow"] {
            assert!(parse_custom_time(text, &Moscow).is_err());
        }
    }

    #[test]
    fn it_rejects_custom_time_inside_dst_gap() {
        // Clocks in Oslo jumped from 02:00 to 03:00 on 30.03.2025
        assert_eq!(
            parse_custom_time("30.03.2025 02:30", &Oslo),
            Err(DateParseError::NonexistentLocalTime("30.03.2025 02:30".into()))
        );
    }

    #[test]
    fn notify_hour_inside_dst_gap_moves_forward() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 30).unwrap();
        let dt = local_at_hour(date, 2, &Oslo).expect("To resolve an instant");
        assert_eq!(dt.hour(), 3);
    }

    #[test]
    fn it_formats_in_timezone() {
        let ts = Moscow
            .with_ymd_and_hms(2025, 5, 15, 14, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_date(ts, &Moscow), "15.05.2025");
        assert_eq!(format_short_datetime(ts, &Moscow), "15.05 14:30");
    }
}
