//! Schedule parsing
//!
//! Turns the free-text `<day>/<month>` and `<hour>:<minute>` tokens of the
//! /match command into an absolute instant. Tokens are interpreted in local
//! civil time, the year defaults to the current one, and the resulting instant
//! must be strictly in the future.

use chrono::{DateTime, Datelike, Local, TimeZone, Utc};

use crate::utils::errors::{MatchdayError, Result};

/// Parse a date token and a time token into a future UTC instant.
pub fn parse_schedule(date: &str, time: &str) -> Result<DateTime<Utc>> {
    parse_schedule_at(date, time, Local::now())
}

/// Same as [`parse_schedule`], with an explicit "now" for the year default and
/// the future-ness check.
pub fn parse_schedule_at(date: &str, time: &str, now: DateTime<Local>) -> Result<DateTime<Utc>> {
    let (day, month) = split_date(date)?;
    let (hour, minute) = split_time(time)?;

    let scheduled = Local
        .with_ymd_and_hms(now.year(), month, day, hour, minute, 0)
        .earliest()
        .ok_or_else(|| MatchdayError::InvalidDate(date.to_string()))?;

    if scheduled <= now {
        return Err(MatchdayError::PastTime);
    }

    Ok(scheduled.with_timezone(&Utc))
}

fn split_date(date: &str) -> Result<(u32, u32)> {
    let invalid = || MatchdayError::InvalidDate(date.to_string());
    let parts: Vec<&str> = date.split('/').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let day: u32 = parts[0].trim().parse().map_err(|_| invalid())?;
    let month: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
    if day == 0 || day > 31 || month == 0 || month > 12 {
        return Err(invalid());
    }
    Ok((day, month))
}

fn split_time(time: &str) -> Result<(u32, u32)> {
    let invalid = || MatchdayError::InvalidTime(time.to_string());
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let hour: u32 = parts[0].trim().parse().map_err(|_| invalid())?;
    let minute: u32 = parts[1].trim().parse().map_err(|_| invalid())?;
    if hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Timelike;
    use proptest::prelude::*;

    fn fixed_now() -> DateTime<Local> {
        // A mid-year reference point so both earlier and later dates exist
        // within the same calendar year.
        Local.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn parses_a_future_instant() {
        let parsed = parse_schedule_at("14/6", "18:30", fixed_now()).unwrap();
        let local = parsed.with_timezone(&Local);
        assert_eq!(local.day(), 14);
        assert_eq!(local.month(), 6);
        assert_eq!(local.hour(), 18);
        assert_eq!(local.minute(), 30);
        assert_eq!(local.year(), 2025);
    }

    #[test]
    fn rejects_malformed_date_tokens() {
        for date in ["14", "14/6/2025", "x/6", "14/y", "", "/"] {
            assert_matches!(
                parse_schedule_at(date, "18:30", fixed_now()),
                Err(MatchdayError::InvalidDate(_))
            );
        }
    }

    #[test]
    fn rejects_malformed_time_tokens() {
        for time in ["18", "18:30:00", "x:30", "18:y", "25:00", "18:60"] {
            assert_matches!(
                parse_schedule_at("14/6", time, fixed_now()),
                Err(MatchdayError::InvalidTime(_))
            );
        }
    }

    #[test]
    fn rejects_out_of_range_dates() {
        assert_matches!(
            parse_schedule_at("32/6", "18:30", fixed_now()),
            Err(MatchdayError::InvalidDate(_))
        );
        assert_matches!(
            parse_schedule_at("14/13", "18:30", fixed_now()),
            Err(MatchdayError::InvalidDate(_))
        );
        // Exists as numbers but not as a calendar date.
        assert_matches!(
            parse_schedule_at("31/2", "18:30", fixed_now()),
            Err(MatchdayError::InvalidDate(_))
        );
    }

    #[test]
    fn rejects_past_instants() {
        assert_matches!(
            parse_schedule_at("1/1", "10:00", fixed_now()),
            Err(MatchdayError::PastTime)
        );
        // The current minute is not strictly in the future.
        assert_matches!(
            parse_schedule_at("1/6", "12:00", fixed_now()),
            Err(MatchdayError::PastTime)
        );
    }

    proptest! {
        #[test]
        fn future_instants_round_trip(day in 1u32..=28, month in 7u32..=12, hour in 0u32..=23, minute in 0u32..=59) {
            let now = fixed_now();
            let parsed = parse_schedule_at(
                &format!("{day}/{month}"),
                &format!("{hour}:{minute}"),
                now,
            ).unwrap();
            let local = parsed.with_timezone(&Local);
            prop_assert!(parsed.with_timezone(&Local) > now);
            prop_assert_eq!((local.day(), local.month()), (day, month));
            prop_assert_eq!((local.hour(), local.minute()), (hour, minute));
        }

        #[test]
        fn garbage_tokens_never_panic(date in "\\PC{0,12}", time in "\\PC{0,12}") {
            let _ = parse_schedule_at(&date, &time, fixed_now());
        }
    }
}
