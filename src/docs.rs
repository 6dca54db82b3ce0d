use crate::api::attendance::{CheckInReq, SummaryQuery, SummaryResponse};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, EmployeeQuery, UpdateEmployee};
use crate::api::leave_request::LeaveFilter;
use crate::api::leave_request::LeaveListResponse;
use crate::api::leave_request::LeaveResponse;
use crate::api::payroll::{GeneratePayroll, PaginatedPayrollResponse, PayrollQuery};
use crate::engine::attendance::AttendanceSummary;
use crate::engine::payroll::PayrollBreakdown;
use crate::model::attendance::Attendance;
use crate::model::employee::Employee;
use crate::model::payroll::Payroll;
use crate::model::timelog::TimeLog;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Tracking & Payroll API",
        version = "1.0.0",
        description = r#"
## Employee Tracking & Payroll System

This API powers an employee-tracking backend built around an attendance and
payroll derivation engine.

### 🔹 Key Features
- **Attendance Tracking**
  - Daily check-in/check-out with geofence validation and stored lateness
  - Monthly attendance summaries (present/late days, working hours)
- **Overtime Time Logs**
  - Separate clock-in/clock-out stream; overtime derived at clock-out
- **Payroll Management**
  - Generate monthly payroll from attendance and overtime, mark as paid,
    list and view payroll records
- **Employee Management**
  - Create, update, list, and view employee profiles
- **Leave Management**
  - Apply for leave (working-day counting), approve/reject requests

### 🔐 Security
Most endpoints are protected using **JWT Bearer authentication**.
Payroll and employee administration require the **Admin** role.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::summary,
        crate::api::attendance::correct_attendance,

        crate::api::timelog::clock_in,
        crate::api::timelog::clock_out,

        crate::api::payroll::generate_payroll,
        crate::api::payroll::mark_payroll_paid,
        crate::api::payroll::get_payroll,
        crate::api::payroll::list_payrolls,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave
    ),
    components(
        schemas(
            CheckInReq,
            SummaryQuery,
            SummaryResponse,
            AttendanceSummary,
            Attendance,
            TimeLog,
            GeneratePayroll,
            PayrollQuery,
            PaginatedPayrollResponse,
            Payroll,
            PayrollBreakdown,
            CreateEmployee,
            UpdateEmployee,
            EmployeeQuery,
            Employee,
            EmployeeListResponse,
            LeaveFilter,
            LeaveResponse,
            LeaveListResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance tracking APIs"),
        (name = "TimeLog", description = "Overtime time-log APIs"),
        (name = "Payroll", description = "Payroll derivation APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;
