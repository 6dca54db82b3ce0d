use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::engine::attendance;
use actix_web::{HttpResponse, Responder, web};
use chrono::Local;
use sqlx::MySqlPool;

/// Overtime clock-in endpoint
#[utoipa::path(
    post,
    path = "/api/v1/timelog/clock-in",
    responses(
        (status = 200, description = "Clocked in successfully", body = Object, example = json!({
            "message": "Clocked in successfully"
        })),
        (status = 400, description = "Already clocked in today", body = Object, example = json!({
            "message": "Already clocked in today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "TimeLog"
)]
pub async fn clock_in(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id: u64 = auth.require_employee_id()?;

    let now = Local::now().naive_local();

    let result = sqlx::query(
        r#"
        INSERT INTO time_logs (employee_id, date, clock_in)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(now.date())
    .bind(now.time())
    .execute(pool.get_ref())
    .await;

    match result {
        Ok(_) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Clocked in successfully"
        }))),

        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                        "message": "Already clocked in today"
                    })));
                }
            }

            tracing::error!(error = %e, employee_id, "Clock-in failed");
            Err(actix_web::error::ErrorInternalServerError(
                "Internal Server Error",
            ))
        }
    }
}

/// Overtime clock-out endpoint. Minutes beyond the standard shift are
/// derived here and stored on the log row.
#[utoipa::path(
    put,
    path = "/api/v1/timelog/clock-out",
    responses(
        (status = 200, description = "Clocked out successfully", body = Object, example = json!({
            "message": "Clocked out successfully",
            "overtime_minutes": 45
        })),
        (status = 400, description = "No active clock-in found for today", body = Object, example = json!({
            "message": "No active clock-in found for today"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "TimeLog"
)]
pub async fn clock_out(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> actix_web::Result<impl Responder> {
    let employee_id: u64 = auth.require_employee_id()?;

    let now = Local::now().naive_local();

    let open = sqlx::query_as::<_, (u64, chrono::NaiveDate, chrono::NaiveTime)>(
        r#"
        SELECT id, date, clock_in
        FROM time_logs
        WHERE employee_id = ?
        AND date = ?
        AND clock_out IS NULL
        "#,
    )
    .bind(employee_id)
    .bind(now.date())
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Clock-out lookup failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let (id, date, clock_in) = match open {
        Some(row) => row,
        None => {
            return Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "message": "No active clock-in found for today"
            })));
        }
    };

    let overtime_minutes =
        attendance::overtime_minutes(date.and_time(clock_in), now, config.standard_shift_minutes);

    sqlx::query(
        r#"
        UPDATE time_logs
        SET clock_out = ?, overtime_minutes = ?
        WHERE id = ?
        "#,
    )
    .bind(now.time())
    .bind(overtime_minutes)
    .bind(id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Clock-out failed");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Clocked out successfully",
        "overtime_minutes": overtime_minutes
    })))
}
