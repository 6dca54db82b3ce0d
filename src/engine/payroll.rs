use serde::Serialize;
use utoipa::ToSchema;

use crate::engine::error::{EngineError, EngineResult};

/// Fixed compensation policy. These are deliberately constants, not
/// configuration: historical payroll must stay reproducible.
pub const WORKING_DAYS: u32 = 26;
pub const LATE_DEDUCTION_PER_DAY: f64 = 100.0;
pub const OVERTIME_MULTIPLIER: f64 = 1.5;
pub const BONUS_THRESHOLD_FRACTION: f64 = 0.95;
pub const BONUS_AMOUNT: f64 = 1000.0;
pub const STANDARD_SHIFT_HOURS: u32 = 8;

/// Inputs already aggregated for one employee and month.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs {
    pub base_salary: f64,
    pub present_days: u32,
    pub late_days: u32,
    pub overtime_hours: f64,
}

/// The derived pay figures. Always recomputed whole from current inputs,
/// never patched incrementally.
#[derive(Debug, Serialize, ToSchema)]
pub struct PayrollBreakdown {
    #[schema(example = 20000.0)]
    pub earned_salary: f64,

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
}

/// Apply the compensation formula.
///
/// Invariants: `gross = earned + overtime_pay + bonuses` and
/// `net = gross - late_deductions`. Net salary is not floored at zero; a
/// month of late days with no earnings yields a negative payable amount.
pub fn compute(inputs: &PayrollInputs) -> EngineResult<PayrollBreakdown> {
    if inputs.base_salary <= 0.0 {
        return Err(EngineError::InvalidArgument(format!(
            "base_salary must be positive, got {}",
            inputs.base_salary
        )));
    }

    let per_day_salary = inputs.base_salary / WORKING_DAYS as f64;
    let earned_salary = per_day_salary * inputs.present_days as f64;

    let late_deductions = inputs.late_days as f64 * LATE_DEDUCTION_PER_DAY;

    let hourly_rate = inputs.base_salary / (WORKING_DAYS * STANDARD_SHIFT_HOURS) as f64;
    let overtime_pay = inputs.overtime_hours * hourly_rate * OVERTIME_MULTIPLIER;

    let bonuses = if inputs.present_days as f64 >= WORKING_DAYS as f64 * BONUS_THRESHOLD_FRACTION {
        BONUS_AMOUNT
    } else {
        0.0
    };

    let gross_salary = earned_salary + overtime_pay + bonuses;
    let net_salary = gross_salary - late_deductions;

    Ok(PayrollBreakdown {
        earned_salary,
        overtime_pay,
        late_deductions,
        bonuses,
        gross_salary,
        net_salary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_month_with_bonus() {
        let pay = compute(&PayrollInputs {
            base_salary: 26000.0,
            present_days: 26,
            late_days: 0,
            overtime_hours: 0.0,
        })
        .unwrap();

        assert_eq!(pay.earned_salary, 26000.0);
        assert_eq!(pay.bonuses, 1000.0); // 26 >= 26 * 0.95
        assert_eq!(pay.late_deductions, 0.0);
        assert_eq!(pay.gross_salary, 27000.0);
        assert_eq!(pay.net_salary, 27000.0);
    }

    #[test]
    fn partial_month_with_overtime_and_lates() {
        let pay = compute(&PayrollInputs {
            base_salary: 26000.0,
            present_days: 20,
            late_days: 3,
            overtime_hours: 10.0,
        })
        .unwrap();

        assert_eq!(pay.earned_salary, 20000.0); // 1000/day * 20
        assert_eq!(pay.overtime_pay, 1875.0); // 10 * 125 * 1.5
        assert_eq!(pay.late_deductions, 300.0);
        assert_eq!(pay.bonuses, 0.0); // 20 < 24.7
        assert_eq!(pay.gross_salary, 21875.0);
        assert_eq!(pay.net_salary, 21575.0);
    }

    #[test]
    fn absent_month_still_computes() {
        let pay = compute(&PayrollInputs {
            base_salary: 26000.0,
            present_days: 0,
            late_days: 0,
            overtime_hours: 0.0,
        })
        .unwrap();

        assert_eq!(pay.earned_salary, 0.0);
        assert_eq!(pay.gross_salary, 0.0);
        assert_eq!(pay.net_salary, 0.0);
    }

    #[test]
    fn net_may_go_negative() {
        // Deductions exceed earnings: no floor is applied.
        let pay = compute(&PayrollInputs {
            base_salary: 2600.0,
            present_days: 1,
            late_days: 2,
            overtime_hours: 0.0,
        })
        .unwrap();

        assert_eq!(pay.earned_salary, 100.0);
        assert_eq!(pay.late_deductions, 200.0);
        assert_eq!(pay.net_salary, -100.0);
    }

    #[test]
    fn non_positive_salary_rejected() {
        let mut inputs = PayrollInputs {
            base_salary: 0.0,
            present_days: 10,
            late_days: 0,
            overtime_hours: 0.0,
        };
        assert!(compute(&inputs).is_err());

        inputs.base_salary = -1.0;
        assert!(compute(&inputs).is_err());
    }
}
