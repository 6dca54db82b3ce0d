use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, Weekday};

use crate::engine::error::{EngineError, EngineResult};

/// First and last calendar day of `(month, year)`.
pub fn month_bounds(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidArgument(format!(
            "month must be 1-12, got {}",
            month
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::InvalidArgument(format!("unrepresentable period {}-{}", year, month))
    })?;

    // Last day = day before the first of the next month
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| {
        EngineError::InvalidArgument(format!("unrepresentable period {}-{}", year, month))
    })?;

    let last = next_first.pred_opt().ok_or_else(|| {
        EngineError::InvalidArgument(format!("unrepresentable period {}-{}", year, month))
    })?;

    Ok((first, last))
}

/// First instant of the month, time component zeroed.
pub fn month_start(month: u32, year: i32) -> EngineResult<NaiveDateTime> {
    let (first, _) = month_bounds(month, year)?;
    first
        .and_hms_milli_opt(0, 0, 0, 0)
        .ok_or_else(|| EngineError::InvalidArgument("invalid period start".into()))
}

/// Last instant of the month (23:59:59.999).
pub fn month_end(month: u32, year: i32) -> EngineResult<NaiveDateTime> {
    let (_, last) = month_bounds(month, year)?;
    last.and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(|| EngineError::InvalidArgument("invalid period end".into()))
}

/// Count of calendar days in `[start, end]` inclusive whose weekday is not
/// Saturday/Sunday. Holidays are not accounted for.
pub fn working_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    let mut day = start;
    let mut count = 0;

    while day <= end {
        if day.weekday() != Weekday::Sat && day.weekday() != Weekday::Sun {
            count += 1;
        }

        day = match day.checked_add_days(Days::new(1)) {
            Some(d) => d,
            None => break,
        };
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_bounds_cover_whole_month() {
        let (first, last) = month_bounds(2, 2024).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let (first, last) = month_bounds(12, 2025).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn month_start_not_after_month_end() {
        for month in 1..=12 {
            let start = month_start(month, 2025).unwrap();
            let end = month_end(month, 2025).unwrap();
            assert!(start <= end);
        }
    }

    #[test]
    fn working_days_exclude_weekends() {
        // June 2024: 30 days, 10 fall on a weekend
        let (first, last) = month_bounds(6, 2024).unwrap();
        assert_eq!(working_days_between(first, last), 20);

        // A single Saturday
        let sat = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(working_days_between(sat, sat), 0);

        // Mon..=Fri
        let mon = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let fri = NaiveDate::from_ymd_opt(2024, 6, 7).unwrap();
        assert_eq!(working_days_between(mon, fri), 5);
    }

    #[test]
    fn working_days_empty_when_start_after_end() {
        let d1 = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(working_days_between(d1, d2), 0);
    }

    #[test]
    fn invalid_month_rejected() {
        assert!(month_bounds(0, 2025).is_err());
        assert!(month_bounds(13, 2025).is_err());
    }
}
