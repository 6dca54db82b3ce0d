use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// One-way lifecycle: `Pending` -> `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PayrollStatus {
    Pending,
    Paid,
}

/// Derived payroll row, keyed by (employee_id, month, year). Regeneration
/// overwrites the row entirely; no history of prior generations is kept.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Payroll {
    pub id: u64,
    pub employee_id: u64,

    #[schema(example = 3, minimum = 1, maximum = 12)]
    pub month: u32,

    #[schema(example = 2025)]
    pub year: i32,

    #[schema(example = 26000.0)]
    pub base_salary: f64,

    /// Policy denominator, snapshotted at generation time.
    #[schema(example = 26)]
    pub working_days: u32,

    #[schema(example = 20)]
    pub present_days: u32,

    #[schema(example = 3)]
    pub late_days: u32,

    #[schema(example = 10.0)]
    pub overtime_hours: f64,

    #[schema(example = 1875.0)]
    pub overtime_pay: f64,

    #[schema(example = 300.0)]
    pub late_deductions: f64,

    #[schema(example = 0.0)]
    pub bonuses: f64,

    #[schema(example = 21875.0)]
    pub gross_salary: f64,

    #[schema(example = 21575.0)]
    pub net_salary: f64,

    #[schema(example = "pending", value_type = String)]
    pub status: String,

    #[schema(example = "2025-04-01T08:00:00Z", format = "date-time", value_type = String)]
    pub generated_at: DateTime<Utc>,

    #[schema(example = "2025-04-05T10:00:00Z", format = "date-time", value_type = String, nullable = true)]
    pub paid_at: Option<DateTime<Utc>>,
}
