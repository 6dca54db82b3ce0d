use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Overtime stream, tracked separately from basic attendance so payroll can
/// stay computable when this source is unavailable.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct TimeLog {
    pub id: u64,
    pub employee_id: u64,

    #[schema(example = "2025-03-03", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "09:00:00", value_type = String)]
    pub clock_in: NaiveTime,

    #[schema(example = "19:15:00", value_type = String, nullable = true)]
    pub clock_out: Option<NaiveTime>,

    /// Minutes beyond the standard shift, derived at clock-out.
    #[schema(example = 135)]
    pub overtime_minutes: i64,
}
