use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::engine::{attendance, error::EngineError, geofence, period};
use crate::model::attendance::Attendance;
use crate::model::timelog::TimeLog;
use crate::utils::db_utils::{build_update_sql, execute_update};
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

const ATTENDANCE_COLUMNS: &str =
    "id, employee_id, date, check_in, check_out, is_late, total_working_hours";

#[derive(Deserialize, ToSchema)]
pub struct CheckInReq {
    /// Reported position, validated against the office geofence when one is
    /// configured.
    #[schema(example = 23.8103)]
    pub lat: Option<f64>,

    #[schema(example = 90.4125)]
    pub lng: Option<f64>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SummaryQuery {
    #[schema(example = 3, minimum = 1, maximum = 12)]
    pub month: u32,

    #[schema(example = 2025)]
    pub year: i32,

    /// Admin only: employee to report on. Employees always get their own.
    #[schema(example = 1001)]
    pub employee_id: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct SummaryResponse {
    pub employee_id: u64,
    pub month: u32,
    pub year: i32,

    #[schema(example = "2025-03-01T00:00:00", value_type = String, format = "date-time")]
    pub period_start: chrono::NaiveDateTime,

    #[schema(example = "2025-03-31T23:59:59.999", value_type = String, format = "date-time")]
    pub period_end: chrono::NaiveDateTime,

    /// Mon-Fri days in the calendar month (holidays not considered).
    #[schema(example = 21)]
    pub calendar_working_days: i64,

    #[serde(flatten)]
    pub summary: attendance::AttendanceSummary,

    #[schema(example = 7.5)]
    pub overtime_hours: f64,
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-in",
    request_body(
        content = CheckInReq,
        description = "Optional reported position",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "message": "Checked in successfully",
            "is_late": false
        })),
        (status = 400, description = "Already checked in today or position missing"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Outside the office geofence"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: Option<web::Json<CheckInReq>>,
) -> actix_web::Result<impl Responder> {
    let employee_id: u64 = auth.require_employee_id()?;

    if let Some(fence) = &config.geofence {
        let position = payload
            .as_ref()
            .and_then(|p| p.lat.zip(p.lng));

        let (lat, lng) = match position {
            Some(p) => p,
            None => {
                return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                    "message": "Position (lat, lng) is required for check-in"
                })));
            }
        };

        if !geofence::within_radius(lat, lng, fence.lat, fence.lng, fence.radius_m) {
            return Ok(HttpResponse::Forbidden().json(serde_json::json!({
                "message": "Check-in position is outside the office geofence"
            })));
        }
    }

    // Lateness is decided now and stored with the record; later threshold
    // changes never rewrite it.
    let now = Local::now().naive_local();
    let is_late = attendance::is_late(now.time(), config.office_start);

    let result = sqlx::query(
        r#"
        INSERT INTO attendance (employee_id, date, check_in, is_late)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(now.date())
    .bind(now.time())
    .bind(is_late)
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Checked in successfully",
            "is_late": is_late
        }))),

        Err(e) => {
            // Duplicate check-in for same day
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Already checked in today"
                    })));
                }
            }

            tracing::error!(error = %e, employee_id, "Check-in failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/v1/attendance/check-out",
    responses(
        (status = 200, description = "Checked out successfully", body = Object, example = json!({
            "message": "Checked out successfully",
            "total_working_hours": 8.25
        })),
        (status = 400, description = "No active check-in found for today", body = Object, example = json!({
            "message": "No active check-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id: u64 = auth.require_employee_id()?;

    let now = Local::now().naive_local();

    let open = sqlx::query_as::<_, (u64, chrono::NaiveDate, chrono::NaiveTime)>(
        r#"
        SELECT id, date, check_in
        FROM attendance
        WHERE employee_id = ?
        AND date = ?
        AND check_out IS NULL
        "#,
    )
    .bind(employee_id)
    .bind(now.date())
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-out lookup failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let (id, date, check_in) = match open {
        Some(row) => row,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "No active check-in found for today"
            })));
        }
    };

    let total_working_hours = attendance::working_hours(date.and_time(check_in), now);

    sqlx::query(
        r#"
        UPDATE attendance
        SET check_out = ?, total_working_hours = ?
        WHERE id = ?
        "#,
    )
    .bind(now.time())
    .bind(total_working_hours)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Check-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Checked out successfully",
        "total_working_hours": total_working_hours
    })))
}

/// Monthly attendance summary (present/late days, hours, overtime)
#[utoipa::path(
    get,
    path = "/api/v1/attendance/summary",
    params(SummaryQuery),
    responses(
        (status = 200, description = "Aggregated month view", body = SummaryResponse),
        (status = 400, description = "Invalid month/year"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn summary(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<SummaryQuery>,
) -> actix_web::Result<impl Responder> {
    // Employees report on themselves; admins pick a target
    let employee_id = match query.employee_id {
        Some(target) if auth.is_admin() => target,
        Some(_) => return Err(actix_web::error::ErrorForbidden("Admin only")),
        None => auth.require_employee_id()?,
    };

    let (start, end) = match period::month_bounds(query.month, query.year) {
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

    let records = fetch_attendance(pool.get_ref(), employee_id, start, end)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch attendance");
            actix_web::error::ErrorInternalServerError("Attendance store unavailable")
        })?;

    // Overtime is optional input: a failing time-log source degrades to zero
    let logs = match fetch_time_logs(pool.get_ref(), employee_id, start, end).await {
        Ok(logs) => logs,
        Err(e) => {
            tracing::warn!(error = %e, employee_id, "Time-log fetch failed, assuming no overtime");
            Vec::new()
        }
    };

    let summary = attendance::summarize(&records);
    let overtime_hours = attendance::overtime_hours(&logs);

    Ok(HttpResponse::Ok().json(SummaryResponse {
        employee_id,
        month: query.month,
        year: query.year,
        period_start: period::month_start(query.month, query.year)
            .map_err(actix_web::error::ErrorInternalServerError)?,
        period_end: period::month_end(query.month, query.year)
            .map_err(actix_web::error::ErrorInternalServerError)?,
        calendar_working_days: period::working_days_between(start, end),
        summary,
        overtime_hours,
    }))
}

/// Admin correction of a raw attendance record
#[utoipa::path(
    put,
    path = "/api/v1/attendance/{attendance_id}",
    params(
        ("attendance_id", description = "Attendance record ID")
    ),
    request_body = Object,
    responses(
        (status = 200, description = "Attendance record updated"),
        (status = 404, description = "Attendance record not found"),
        (status = 401),
        (status = 403)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn correct_attendance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<i64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let attendance_id = path.into_inner();

    let update = build_update_sql("attendance", &body, "id", attendance_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Attendance record not found"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Attendance record updated"
    })))
}

/// Raw attendance rows for one employee over `[start, end]`.
pub(crate) async fn fetch_attendance(
    pool: &MySqlPool,
    employee_id: u64,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<Vec<Attendance>, sqlx::Error> {
    let sql = format!(
        "SELECT {} FROM attendance WHERE employee_id = ? AND date BETWEEN ? AND ? ORDER BY date",
        ATTENDANCE_COLUMNS
    );

    sqlx::query_as::<_, Attendance>(&sql)
        .bind(employee_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
}

/// Time-log rows for one employee over `[start, end]`.
pub(crate) async fn fetch_time_logs(
    pool: &MySqlPool,
    employee_id: u64,
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<Vec<TimeLog>, sqlx::Error> {
    sqlx::query_as::<_, TimeLog>(
        r#"
        SELECT id, employee_id, date, clock_in, clock_out, overtime_minutes
        FROM time_logs
        WHERE employee_id = ? AND date BETWEEN ? AND ?
        ORDER BY date
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await
}
