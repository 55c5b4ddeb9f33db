use crate::types::{TaskError, TaskKind};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_HINT: &str = "Use 'today', 'tomorrow', a relative time like '2h' or '1h30m', \
     or an absolute date 'YYYY-MM-DD [HH:MM[:SS]]' / 'DD/MM/YYYY [HHMM]'";

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H%M",
    "%d/%m/%Y %H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];

pub fn validate_description(description: &str, kind: TaskKind) -> Result<&str, TaskError> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(TaskError::InvalidTask(format!(
            "The description of {} {kind} cannot be empty.",
            kind.article()
        )));
    }
    Ok(trimmed)
}

fn end_of_day(date: NaiveDate) -> Result<NaiveDateTime, TaskError> {
    date.and_hms_opt(23, 59, 59)
        .ok_or_else(|| TaskError::InvalidDate(format!("'{date}' has no end of day")))
}

fn too_far(input: &str) -> TaskError {
    TaskError::InvalidDate(format!("'{}' is too far away", input.trim()))
}

/// Parses the date/time grammar shared by deadlines and events. Relative
/// inputs are resolved against `now`.
pub fn parse_when(input: &str, now: NaiveDateTime) -> Result<NaiveDateTime, TaskError> {
    let trimmed = input.trim().to_lowercase();

    match trimmed.as_str() {
        "" => {
            return Err(TaskError::InvalidDate(format!(
                "No date was given. {DATE_HINT}"
            )));
        }
        "today" => return end_of_day(now.date()),
        "tomorrow" => {
            let date = now
                .date()
                .succ_opt()
                .ok_or_else(|| TaskError::InvalidDate("There is no tomorrow.".into()))?;
            return end_of_day(date);
        }
        _ => {}
    }

    let cleaned = trimmed.replace(' ', "");

    if let Some(h_pos) = cleaned.find('h') {
        let (hours_part, rest) = cleaned.split_at(h_pos);
        let rest = &rest[1..]; // drop 'h'

        if let Ok(h) = hours_part.parse::<i64>() {
            let mut duration = Duration::try_hours(h).ok_or_else(|| too_far(input))?;
            if !rest.is_empty() {
                match rest.strip_suffix('m').map(str::parse::<i64>) {
                    Some(Ok(m)) => {
                        duration = Duration::try_minutes(m)
                            .and_then(|mins| duration.checked_add(&mins))
                            .ok_or_else(|| too_far(input))?;
                    }
                    _ => {
                        return Err(TaskError::InvalidDate(format!(
                            "Unable to parse '{}'. Expected minutes after hours, e.g. '4h30m'",
                            input.trim()
                        )));
                    }
                }
            }
            return now.checked_add_signed(duration).ok_or_else(|| too_far(input));
        }
    }

    if let Some(mins_str) = cleaned.strip_suffix('m')
        && let Ok(m) = mins_str.parse::<i64>()
    {
        return Duration::try_minutes(m)
            .and_then(|duration| now.checked_add_signed(duration))
            .ok_or_else(|| too_far(input));
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&trimmed, fmt) {
            return Ok(naive);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&trimmed, fmt) {
            return end_of_day(date);
        }
    }

    Err(TaskError::InvalidDate(format!(
        "Unable to parse '{}'. {DATE_HINT}",
        input.trim()
    )))
}

/// The day named by `input` when it carries no time of day.
fn date_only(input: &str, now: NaiveDateTime) -> Option<NaiveDate> {
    let trimmed = input.trim().to_lowercase();
    match trimmed.as_str() {
        "today" => Some(now.date()),
        "tomorrow" => now.date().succ_opt(),
        _ => DATE_FORMATS
            .into_iter()
            .find_map(|fmt| NaiveDate::parse_from_str(&trimmed, fmt).ok()),
    }
}

/// Parses an event window. An end written as a bare `HH:MM` lands on the
/// start's date, and a start without a time of day then begins at midnight.
pub fn parse_range(
    start: &str,
    end: &str,
    now: NaiveDateTime,
) -> Result<(NaiveDateTime, NaiveDateTime), TaskError> {
    let Ok(end_time) = NaiveTime::parse_from_str(end.trim(), "%H:%M") else {
        return Ok((parse_when(start, now)?, parse_when(end, now)?));
    };

    let start = match date_only(start, now) {
        Some(day) => day.and_time(NaiveTime::MIN),
        None => parse_when(start, now)?,
    };
    Ok((start, start.date().and_time(end_time)))
}

/// Byte offset of the first ASCII case-insensitive occurrence of `needle`.
pub fn find_keyword(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Splits `input` around the first occurrence of `keyword`, trimming both
/// halves. `keyword` must be ASCII.
pub fn split_keyword<'a>(input: &'a str, keyword: &str) -> Option<(&'a str, &'a str)> {
    let pos = find_keyword(input, keyword)?;
    Some((input[..pos].trim(), input[pos + keyword.len()..].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn ymd_hms(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn keywords_resolve_to_end_of_day() {
        assert_eq!(parse_when("today", now()).unwrap(), ymd_hms(2025, 8, 1, 23, 59, 59));
        assert_eq!(parse_when("Tomorrow", now()).unwrap(), ymd_hms(2025, 8, 2, 23, 59, 59));
    }

    #[test]
    fn relative_times_add_to_now() {
        assert_eq!(parse_when("2h", now()).unwrap(), ymd_hms(2025, 8, 1, 12, 0, 0));
        assert_eq!(parse_when("45m", now()).unwrap(), ymd_hms(2025, 8, 1, 10, 45, 0));
        assert_eq!(parse_when("1h 30m", now()).unwrap(), ymd_hms(2025, 8, 1, 11, 30, 0));
    }

    #[test]
    fn huge_relative_times_are_rejected_not_panicking() {
        assert!(matches!(parse_when("99999999999999h", now()), Err(TaskError::InvalidDate(_))));
    }

    #[test]
    fn hours_followed_by_garbage_is_rejected() {
        assert!(matches!(parse_when("2hx", now()), Err(TaskError::InvalidDate(_))));
    }

    #[test]
    fn absolute_formats() {
        assert_eq!(
            parse_when("2025-12-24 18:30", now()).unwrap(),
            ymd_hms(2025, 12, 24, 18, 30, 0)
        );
        assert_eq!(
            parse_when("2025-12-24 18:30:15", now()).unwrap(),
            ymd_hms(2025, 12, 24, 18, 30, 15)
        );
        assert_eq!(
            parse_when("2025-12-24", now()).unwrap(),
            ymd_hms(2025, 12, 24, 23, 59, 59)
        );
        assert_eq!(
            parse_when("24/12/2025 1830", now()).unwrap(),
            ymd_hms(2025, 12, 24, 18, 30, 0)
        );
        assert_eq!(
            parse_when("24/12/2025", now()).unwrap(),
            ymd_hms(2025, 12, 24, 23, 59, 59)
        );
    }

    #[test]
    fn garbage_and_empty_are_invalid_dates() {
        assert!(matches!(parse_when("someday", now()), Err(TaskError::InvalidDate(_))));
        assert!(matches!(parse_when("  ", now()), Err(TaskError::InvalidDate(_))));
        assert!(matches!(parse_when("2025-13-40", now()), Err(TaskError::InvalidDate(_))));
    }

    #[test]
    fn bare_end_time_uses_start_date() {
        assert_eq!(
            parse_range("2025-12-24 18:00", "21:00", now()).unwrap(),
            (ymd_hms(2025, 12, 24, 18, 0, 0), ymd_hms(2025, 12, 24, 21, 0, 0))
        );
        assert_eq!(
            parse_range("2025-12-24 18:00", "2025-12-25 01:00", now()).unwrap(),
            (ymd_hms(2025, 12, 24, 18, 0, 0), ymd_hms(2025, 12, 25, 1, 0, 0))
        );
    }

    #[test]
    fn date_only_start_begins_at_midnight_before_a_bare_end_time() {
        assert_eq!(
            parse_range("2025-08-02", "23:30", now()).unwrap(),
            (ymd_hms(2025, 8, 2, 0, 0, 0), ymd_hms(2025, 8, 2, 23, 30, 0))
        );
        assert_eq!(
            parse_range("tomorrow", "09:00", now()).unwrap(),
            (ymd_hms(2025, 8, 2, 0, 0, 0), ymd_hms(2025, 8, 2, 9, 0, 0))
        );
    }

    #[test]
    fn date_only_start_keeps_end_of_day_before_a_full_end() {
        assert_eq!(
            parse_range("2025-08-02", "2025-08-04", now()).unwrap(),
            (ymd_hms(2025, 8, 2, 23, 59, 59), ymd_hms(2025, 8, 4, 23, 59, 59))
        );
    }

    #[test]
    fn split_keyword_is_case_insensitive() {
        assert_eq!(
            split_keyword("return book /BY tomorrow", "/by"),
            Some(("return book", "tomorrow"))
        );
        assert_eq!(split_keyword("no marker here", "/by"), None);
    }
}
