use time::{Date, Duration, OffsetDateTime, macros::format_description};

pub const DAYS_PER_WEEK: u8 = 7;

/// Returns the Monday of the week containing `date`
pub fn week_start(date: Date) -> Date {
    let days_since_monday = date.weekday().number_days_from_monday();

    date.checked_sub(Duration::days(days_since_monday.into()))
        .unwrap_or(date)
}

/// Returns the last day of the 7-day window starting at `start`
pub fn week_end(start: Date) -> crate::Result<Date> {
    match start.checked_add(Duration::days(i64::from(DAYS_PER_WEEK) - 1)) {
        Some(end) => Ok(end),
        _ => crate::user!("week starting at {start} goes past the supported calendar"),
    }
}

/// The 7 consecutive days starting at `start`, fewer if the calendar ends first
pub fn week_days(start: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(start), |day| day.next_day()).take(DAYS_PER_WEEK.into())
}

pub fn to_timestamp(date: Date) -> i64 {
    date.midnight().assume_utc().unix_timestamp()
}

pub fn from_timestamp(timestamp: i64) -> crate::Result<Date> {
    Ok(OffsetDateTime::from_unix_timestamp(timestamp)?.date())
}

/// Parses a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> crate::Result<Date> {
    Ok(Date::parse(value, format_description!("[year]-[month]-[day]"))?)
}
