use actix_web::{HttpResponse, Responder, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::api::attendance::{fetch_attendance, fetch_time_logs};
use crate::auth::auth::AuthUser;
use crate::engine::{
    attendance,
    error::EngineError,
    payroll::{self, PayrollInputs},
    period,
};
use crate::model::payroll::{Payroll, PayrollStatus};
use crate::utils::employee_cache;

const PAYROLL_COLUMNS: &str = "id, employee_id, month, year, base_salary, working_days, \
     present_days, late_days, overtime_hours, overtime_pay, late_deductions, bonuses, \
     gross_salary, net_salary, status, generated_at, paid_at";

#[derive(Deserialize, ToSchema)]
pub struct GeneratePayroll {
    #[schema(example = 1001)]
    pub employee_id: u64,

    #[schema(example = 3, minimum = 1, maximum = 12)]
    pub month: u32,

    #[schema(example = 2025)]
    pub year: i32,

    /// Overrides the employee's stored base salary when present.
    #[schema(example = 26000.0)]
    pub base_salary: Option<f64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PayrollQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 10)]
    pub per_page: Option<u32>,

    #[schema(example = 1001)]
    pub employee_id: Option<u64>,

    #[schema(example = 2025)]
    pub year: Option<i32>,

    #[schema(example = 3)]
    pub month: Option<u32>,

    #[schema(example = "pending")]
    pub status: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct PaginatedPayrollResponse {
    pub data: Vec<Payroll>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    I64(i64),
    Str(&'a str),
}

/// Generate (or regenerate) one employee's payroll for a month.
///
/// Regeneration overwrites the stored record for the same
/// (employee, month, year) entirely; no history is kept.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/generate",
    request_body = GeneratePayroll,
    responses(
        (status = 201, description = "Payroll generated", body = Payroll),
        (status = 400, description = "Invalid month/year/base salary"),
        (status = 404, description = "Employee not found"),
        (status = 401),
        (status = 403),
        (status = 503, description = "Attendance store unavailable")
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn generate_payroll(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<GeneratePayroll>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let (start, end) = match period::month_bounds(payload.month, payload.year) {
        Ok(bounds) => bounds,
        Err(EngineError::InvalidArgument(msg)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "message": msg })));
        }
        Err(e) => {
            tracing::error!(error = %e, "Period resolution failed");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    };

    // Base salary: explicit override, else the employee profile
    let base_salary = match payload.base_salary {
        Some(salary) => salary,
        None => {
            let employee = employee_cache::get_employee(pool.get_ref(), payload.employee_id)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, employee_id = payload.employee_id, "Employee lookup failed");
                    actix_web::error::ErrorInternalServerError("Internal Server Error")
                })?;

            match employee {
                Some(emp) => emp.base_salary,
                None => {
                    return Ok(HttpResponse::NotFound().json(serde_json::json!({
                        "message": "Employee not found"
                    })));
                }
            }
        }
    };

    // Attendance is mandatory input: a failing fetch fails the generation
    let records = match fetch_attendance(pool.get_ref(), payload.employee_id, start, end).await {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, employee_id = payload.employee_id, "Failed to fetch attendance");
            let err = EngineError::UpstreamUnavailable("attendance store unreachable".into());
            return Ok(HttpResponse::ServiceUnavailable()
                .json(serde_json::json!({ "message": err.to_string() })));
        }
    };

    // Overtime is optional input: a failing fetch degrades to zero hours
    let logs = match fetch_time_logs(pool.get_ref(), payload.employee_id, start, end).await {
        Ok(logs) => logs,
        Err(e) => {
            tracing::warn!(
                error = %e,
                employee_id = payload.employee_id,
                "Time-log fetch failed, generating payroll without overtime"
            );
            Vec::new()
        }
    };

    let summary = attendance::summarize(&records);
    let overtime_hours = attendance::overtime_hours(&logs);

    let breakdown = match payroll::compute(&PayrollInputs {
        base_salary,
        present_days: summary.present_days,
        late_days: summary.late_days,
        overtime_hours,
    }) {
        Ok(b) => b,
        Err(EngineError::InvalidArgument(msg)) => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({ "message": msg })));
        }
        Err(e) => {
            tracing::error!(error = %e, "Payroll computation failed");
            return Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ));
        }
    };

    let generated_at = Utc::now();

    // Overwrite-on-regenerate: the UNIQUE (employee_id, month, year) key
    // turns the insert into a full replacement of every derived column,
    // including the payment state.
    sqlx::query(
        r#"
        INSERT INTO payroll
        (employee_id, month, year, base_salary, working_days, present_days, late_days,
         overtime_hours, overtime_pay, late_deductions, bonuses, gross_salary, net_salary,
         status, generated_at, paid_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL)
        ON DUPLICATE KEY UPDATE
            base_salary = VALUES(base_salary),
            working_days = VALUES(working_days),
            present_days = VALUES(present_days),
            late_days = VALUES(late_days),
            overtime_hours = VALUES(overtime_hours),
            overtime_pay = VALUES(overtime_pay),
            late_deductions = VALUES(late_deductions),
            bonuses = VALUES(bonuses),
            gross_salary = VALUES(gross_salary),
            net_salary = VALUES(net_salary),
            status = VALUES(status),
            generated_at = VALUES(generated_at),
            paid_at = NULL
        "#,
    )
    .bind(payload.employee_id)
    .bind(payload.month)
    .bind(payload.year)
    .bind(base_salary)
    .bind(payroll::WORKING_DAYS)
    .bind(summary.present_days)
    .bind(summary.late_days)
    .bind(overtime_hours)
    .bind(breakdown.overtime_pay)
    .bind(breakdown.late_deductions)
    .bind(breakdown.bonuses)
    .bind(breakdown.gross_salary)
    .bind(breakdown.net_salary)
    .bind(PayrollStatus::Pending.to_string())
    .bind(generated_at)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id = payload.employee_id, "Failed to persist payroll");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let sql = format!(
        "SELECT {} FROM payroll WHERE employee_id = ? AND month = ? AND year = ?",
        PAYROLL_COLUMNS
    );
    let record = sqlx::query_as::<_, Payroll>(&sql)
        .bind(payload.employee_id)
        .bind(payload.month)
        .bind(payload.year)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to read back generated payroll");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Created().json(record))
}

/// One-way transition Pending -> Paid. Re-marking an already paid record
/// re-stamps paid_at.
#[utoipa::path(
    put,
    path = "/api/v1/payroll/{payroll_id}/pay",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    responses(
        (status = 200, description = "Payroll marked as paid"),
        (status = 404, description = "Payroll record not found"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn mark_payroll_paid(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let payroll_id = path.into_inner();

    // Nothing is written for an unknown id
    if let Err(e) = find_payroll(pool.get_ref(), payroll_id).await {
        return match e {
            EngineError::RecordNotFound(msg) => {
                Ok(HttpResponse::NotFound().json(serde_json::json!({ "message": msg })))
            }
            other => {
                tracing::error!(error = %other, payroll_id, "Mark-paid lookup failed");
                Err(actix_web::error::ErrorInternalServerError(
                    "Internal Server Error",
                ))
            }
        };
    }

    // Re-marking an already paid record simply re-stamps paid_at
    sqlx::query(
        r#"
        UPDATE payroll
        SET status = ?, paid_at = NOW()
        WHERE id = ?
        "#,
    )
    .bind(PayrollStatus::Paid.to_string())
    .bind(payroll_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, payroll_id, "Mark-paid failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Payroll marked as paid"
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(
        ("payroll_id", description = "Payroll ID")
    ),
    responses(
        (status = 200, body = Payroll),
        (status = 404)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn get_payroll(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let payroll_id = path.into_inner();

    match find_payroll(pool.get_ref(), payroll_id).await {
        Ok(p) => Ok(HttpResponse::Ok().json(p)),
        Err(EngineError::RecordNotFound(msg)) => {
            Ok(HttpResponse::NotFound().json(serde_json::json!({ "message": msg })))
        }
        Err(e) => {
            tracing::error!(error = %e, payroll_id, "Failed to fetch payroll");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Payroll lookup by id, in engine terms.
async fn find_payroll(pool: &MySqlPool, payroll_id: u64) -> Result<Payroll, EngineError> {
    let sql = format!("SELECT {} FROM payroll WHERE id = ?", PAYROLL_COLUMNS);

    sqlx::query_as::<_, Payroll>(&sql)
        .bind(payroll_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| EngineError::UpstreamUnavailable(e.to_string()))?
        .ok_or_else(|| EngineError::RecordNotFound(format!("payroll {} does not exist", payroll_id)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses(
        (status = 200, body = PaginatedPayrollResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Payroll"
)]
pub async fn list_payrolls(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<PayrollQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }

    if let Some(year) = query.year {
        where_sql.push_str(" AND year = ?");
        args.push(FilterValue::I64(year as i64));
    }

    if let Some(month) = query.month {
        where_sql.push_str(" AND month = ?");
        args.push(FilterValue::I64(month as i64));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let count_sql = format!("SELECT COUNT(*) FROM payroll{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::I64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to count payrolls");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT {} FROM payroll{} ORDER BY year DESC, month DESC LIMIT ? OFFSET ?",
        PAYROLL_COLUMNS, where_sql
    );

    let mut data_q = sqlx::query_as::<_, Payroll>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::I64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let data = data_q
        .bind(per_page as i64)
        .bind(offset as i64)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch payroll list");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(PaginatedPayrollResponse {
        data,
        page,
        per_page,
        total,
    }))
}
