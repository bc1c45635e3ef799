//! Weekday and timezone helpers shared by the planner and calendar loading.

use chrono::{Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, Weekday};

use crate::error::{Result, ValidationError};

/// Parse a weekday name (`monday`, `Monday`, `mon`, ...).
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    name.trim()
        .parse::<Weekday>()
        .map_err(|_| ValidationError::UnknownWeekday(name.to_string()).into())
}

/// The next date (today included) that falls on `weekday`.
///
/// Never resolves backwards: asking for Monday on a Tuesday gives the
/// Monday six days later.
pub fn day_to_date(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let target = i64::from(weekday.num_days_from_monday());
    let current = i64::from(today.weekday().num_days_from_monday());

    let mut offset = target - current;
    if offset < 0 {
        offset += 7;
    }

    today + Duration::days(offset)
}

/// [`day_to_date`] with a weekday name.
pub fn anchor_date(weekday: &str, today: NaiveDate) -> Result<NaiveDate> {
    Ok(day_to_date(parse_weekday(weekday)?, today))
}

/// Parse `+HH:MM`, `-HH:MM`, `+HH` or `Z` into a fixed offset.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset> {
    let invalid = || ValidationError::InvalidUtcOffset(raw.to_string());
    let trimmed = raw.trim();

    if trimmed.eq_ignore_ascii_case("z") {
        return FixedOffset::east_opt(0).ok_or_else(|| invalid().into());
    }

    let (sign, rest) = match trimmed.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid().into()),
    };

    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours = i32::from(hours.parse::<u8>().map_err(|_| invalid())?);
    let minutes = i32::from(minutes.parse::<u8>().map_err(|_| invalid())?);
    if hours > 23 || minutes > 59 {
        return Err(invalid().into());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(|| invalid().into())
}

/// RFC 3339 timestamp for a minute of `date` in `offset`. Minute 1440 rolls
/// over to midnight of the following day.
pub fn local_timestamp(date: NaiveDate, minute: u16, offset: FixedOffset) -> String {
    let day = date + Duration::days(i64::from(minute / 1440));
    let minute = u32::from(minute % 1440);
    let time = NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or(NaiveTime::MIN);
    format!(
        "{}T{}{}",
        day.format("%Y-%m-%d"),
        time.format("%H:%M:%S"),
        offset
    )
}
