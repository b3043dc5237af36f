/// Utilities for date handling in filters
///
/// Filter dates are calendar days in the user's local time zone. They are
/// kept as `NaiveDate` and never round-tripped through UTC, otherwise a user
/// east of Greenwich picking "today" late in the evening would query
/// tomorrow (or yesterday, west of it).
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Wire format of date query parameters and `<input type="date">` values.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats a calendar day as `YYYY-MM-DD`.
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses `YYYY-MM-DD`. Empty or malformed input gives `None`.
pub fn parse_iso_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).ok()
}

/// Calendar day of an instant as seen in the instant's own time zone.
pub fn local_calendar_date<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Today in the browser's time zone.
pub fn today_local() -> NaiveDate {
    local_calendar_date(&Local::now())
}

/// Inclusive range of the last `days` days ending at `today`.
pub fn last_days(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    let days = days.max(1);
    (today - Duration::days(days - 1), today)
}

/// First day of `today`'s month through `today`.
pub fn month_to_date(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day0(0).unwrap_or(today);
    (first, today)
}

/// Display format of timestamps, e.g. `15 Mar 2024, 14:02`.
pub const DISPLAY_DATETIME_FORMAT: &str = "%d %b %Y, %H:%M";
/// Display format of calendar days, e.g. `15 Mar 2024`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %Y";

/// Timestamp in the given zone. Accepts RFC 3339 and naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` (read as UTC); anything
/// else is returned unchanged.
pub fn format_datetime_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let trimmed = raw.trim();
    let instant = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(tz))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
                .ok()
                .map(|naive| Utc.from_utc_datetime(&naive).with_timezone(tz))
        });
    match instant {
        Some(dt) => dt.format(DISPLAY_DATETIME_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// Calendar day in the given zone. Plain `YYYY-MM-DD` is shown as is, a
/// timestamp is converted first; anything else is returned unchanged.
pub fn format_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> String {
    let trimmed = raw.trim();
    let day = parse_iso_date(trimmed).or_else(|| {
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| local_calendar_date(&dt.with_timezone(tz)))
    });
    match day {
        Some(day) => day.format(DISPLAY_DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

/// [`format_datetime_in`] the browser's time zone.
pub fn format_datetime(raw: &str) -> String {
    format_datetime_in(raw, &Local)
}

/// [`format_date_in`] the browser's time zone.
pub fn format_date(raw: &str) -> String {
    format_date_in(raw, &Local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_iso_round_trip_and_rejects() {
        assert_eq!(format_iso_date(date(2024, 3, 5)), "2024-03-05");
        assert_eq!(parse_iso_date("2024-03-05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_iso_date(""), None);
        assert_eq!(parse_iso_date("05.03.2024"), None);
        assert_eq!(parse_iso_date("2024-02-30"), None);
    }

    #[test]
    fn test_local_calendar_date_uses_local_offset() {
        // 20:00 UTC on the 15th is already the 16th in India (+05:30)
        let utc = Utc.with_ymd_and_hms(2024, 3, 15, 20, 0, 0).unwrap();
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(local_calendar_date(&utc.with_timezone(&ist)), date(2024, 3, 16));
        assert_eq!(local_calendar_date(&utc), date(2024, 3, 15));

        // and 02:00 UTC on the 15th is still the 14th in New York (-05:00)
        let utc = Utc.with_ymd_and_hms(2024, 3, 15, 2, 0, 0).unwrap();
        let ny = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!(local_calendar_date(&utc.with_timezone(&ny)), date(2024, 3, 14));
    }

    #[test]
    fn test_quick_ranges() {
        assert_eq!(last_days(date(2024, 3, 5), 7), (date(2024, 2, 28), date(2024, 3, 5)));
        assert_eq!(last_days(date(2024, 3, 5), 0), (date(2024, 3, 5), date(2024, 3, 5)));
        assert_eq!(month_to_date(date(2024, 3, 17)), (date(2024, 3, 1), date(2024, 3, 17)));
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime_in("2024-03-15T14:02:26.123Z", &Utc),
            "15 Mar 2024, 14:02"
        );
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(
            format_datetime_in("2024-12-31T23:59:59Z", &ist),
            "01 Jan 2025, 05:29"
        );
        assert_eq!(format_datetime_in("2024-03-15 08:30:00", &Utc), "15 Mar 2024, 08:30");
        assert_eq!(format_datetime_in("invalid", &Utc), "invalid");
    }

    #[test]
    fn test_format_date() {
        let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!(format_date_in("2024-03-15", &ist), "15 Mar 2024");
        // 20:00 UTC is already the next day in India
        assert_eq!(format_date_in("2024-03-15T20:00:00Z", &ist), "16 Mar 2024");
        assert_eq!(format_date_in("2024-03-15T20:00:00Z", &Utc), "15 Mar 2024");
        assert_eq!(format_date_in("15/03/2024", &Utc), "15/03/2024");
    }
}
