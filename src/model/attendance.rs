use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One day of attendance for one employee. Created at check-in; mutated
/// exactly once at check-out (sets `check_out` and `total_working_hours`).
/// `is_late` is frozen at check-in time.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Attendance {
    pub id: u64,
    pub employee_id: u64,

    #[schema(example = "2025-03-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:12:40", value_type = String)]
    pub check_in: NaiveTime,

    #[schema(example = "17:45:02", value_type = String, nullable = true)]
    pub check_out: Option<NaiveTime>,

    pub is_late: bool,

    #[schema(example = 8.5, nullable = true)]
    pub total_working_hours: Option<f64>,
}
