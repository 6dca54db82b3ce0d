use chrono::{NaiveDateTime, NaiveTime};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::Attendance;
use crate::model::timelog::TimeLog;

/// Aggregated view of one employee's attendance over a date range.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceSummary {
    /// Days with a check-in record. No record means absent.
    #[schema(example = 22)]
    pub present_days: u32,

    /// Days whose stored late flag is set.
    #[schema(example = 3)]
    pub late_days: u32,

    #[schema(example = 176.5)]
    pub total_working_hours: f64,

    #[schema(example = 8.02)]
    pub avg_working_hours: f64,
}

/// Late iff the check-in time-of-day is strictly after the office start
/// threshold. Evaluated once at check-in and stored with the record; stored
/// flags are never recomputed when the threshold changes.
pub fn is_late(check_in: NaiveTime, office_start: NaiveTime) -> bool {
    check_in > office_start
}

/// Worked hours between check-in and check-out, floored at zero so that
/// checkout-before-checkin data (clock skew, corrupt rows) never yields a
/// negative figure.
pub fn working_hours(check_in: NaiveDateTime, check_out: NaiveDateTime) -> f64 {
    let minutes = (check_out - check_in).num_minutes().max(0);
    minutes as f64 / 60.0
}

/// Minutes worked beyond the standard shift, floored at zero. Derived once
/// at clock-out and stored on the time-log row.
pub fn overtime_minutes(
    clock_in: NaiveDateTime,
    clock_out: NaiveDateTime,
    standard_shift_minutes: i64,
) -> i64 {
    let worked = (clock_out - clock_in).num_minutes().max(0);
    (worked - standard_shift_minutes).max(0)
}

/// Summarize the raw attendance rows of one employee over a period.
pub fn summarize(records: &[Attendance]) -> AttendanceSummary {
    let present_days = records.len() as u32;
    let late_days = records.iter().filter(|r| r.is_late).count() as u32;

    let total_working_hours: f64 = records.iter().filter_map(|r| r.total_working_hours).sum();

    // Average over checked-out days only; open records carry no hours yet.
    let closed = records
        .iter()
        .filter(|r| r.total_working_hours.is_some())
        .count();
    let avg_working_hours = if closed > 0 {
        total_working_hours / closed as f64
    } else {
        0.0
    };

    AttendanceSummary {
        present_days,
        late_days,
        total_working_hours,
        avg_working_hours,
    }
}

/// Total overtime across a period, in hours.
pub fn overtime_hours(logs: &[TimeLog]) -> f64 {
    let minutes: i64 = logs.iter().map(|l| l.overtime_minutes).sum();
    minutes as f64 / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    fn record(day: u32, late: bool, hours: Option<f64>) -> Attendance {
        Attendance {
            id: day as u64,
            employee_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
            check_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            check_out: hours.map(|_| NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
            is_late: late,
            total_working_hours: hours,
        }
    }

    #[test]
    fn late_only_strictly_after_threshold() {
        let threshold = NaiveTime::from_hms_opt(9, 30, 0).unwrap();

        assert!(!is_late(NaiveTime::from_hms_opt(9, 30, 0).unwrap(), threshold));
        assert!(!is_late(NaiveTime::from_hms_opt(8, 59, 0).unwrap(), threshold));
        assert!(is_late(NaiveTime::from_hms_opt(9, 30, 1).unwrap(), threshold));
    }

    #[test]
    fn working_hours_never_negative() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let check_in = day.and_hms_opt(9, 0, 0).unwrap();
        let check_out = day.and_hms_opt(17, 30, 0).unwrap();

        assert_eq!(working_hours(check_in, check_out), 8.5);
        // Corrupt row: checkout before checkin
        assert_eq!(working_hours(check_out, check_in), 0.0);
    }

    #[test]
    fn overtime_floors_at_shift_length() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let clock_in = day.and_hms_opt(9, 0, 0).unwrap();

        let on_time = day.and_hms_opt(17, 0, 0).unwrap();
        assert_eq!(overtime_minutes(clock_in, on_time, 480), 0);

        let late_out = day.and_hms_opt(19, 15, 0).unwrap();
        assert_eq!(overtime_minutes(clock_in, late_out, 480), 135);
    }

    #[test]
    fn summary_counts_present_and_late_days() {
        let records = vec![
            record(3, false, Some(8.0)),
            record(4, true, Some(7.5)),
            record(5, false, None), // still checked in
        ];

        let summary = summarize(&records);
        assert_eq!(summary.present_days, 3);
        assert_eq!(summary.late_days, 1);
        assert_eq!(summary.total_working_hours, 15.5);
        assert_eq!(summary.avg_working_hours, 7.75);
    }

    #[test]
    fn summary_of_empty_range_is_all_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.present_days, 0);
        assert_eq!(summary.late_days, 0);
        assert_eq!(summary.avg_working_hours, 0.0);
    }

    #[test]
    fn overtime_hours_sums_log_minutes() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let logs = vec![
            TimeLog {
                id: 1,
                employee_id: 1,
                date: day,
                clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                clock_out: Some(NaiveTime::from_hms_opt(19, 0, 0).unwrap()),
                overtime_minutes: 90,
            },
            TimeLog {
                id: 2,
                employee_id: 1,
                date: day.succ_opt().unwrap(),
                clock_in: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                clock_out: None,
                overtime_minutes: 30,
            },
        ];

        assert_eq!(overtime_hours(&logs), 2.0);
        assert_eq!(overtime_hours(&[]), 0.0);
    }
}
