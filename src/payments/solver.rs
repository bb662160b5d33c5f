use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::interest::RateBasis;
use crate::loan::LoanParameters;

use super::calculator::compute_periodic_payment;

/// extra amount per period that retires the loan in `target_term_periods`
/// instead of `current_term_periods`
///
/// closed-form difference of two annuity payments; zero when the target is
/// not shorter than the current term
pub fn required_extra_payment(
    principal: Money,
    period_rate: Rate,
    current_term_periods: u32,
    target_term_periods: u32,
) -> Result<Money> {
    if target_term_periods >= current_term_periods {
        return Ok(Money::ZERO);
    }

    let target = compute_periodic_payment(principal, period_rate, target_term_periods)?;
    let current = compute_periodic_payment(principal, period_rate, current_term_periods)?;

    Ok((target - current).non_negative())
}

/// required extra payment to pay `params` off within `target_years`
pub fn required_extra_payment_for_term(params: &LoanParameters, target_years: u32) -> Result<Money> {
    params.validate()?;

    if target_years == 0 {
        return Err(ScheduleError::invalid_parameter("target term must be at least one year"));
    }

    let basis = RateBasis::resolve(
        params.annual_rate,
        params.payment_frequency,
        params.compounding_frequency,
    )?;
    let target_periods = target_years.saturating_mul(basis.periods_per_year);

    required_extra_payment(
        params.principal,
        basis.period_rate,
        params.scheduled_periods(),
        target_periods,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleSimulator;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn mortgage() -> LoanParameters {
        LoanParameters::builder()
            .principal(Money::from_major(300_000))
            .rate(Rate::from_bps(450))
            .term_years(30)
            .start_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_no_acceleration_needed() {
        let rate = Rate::from_decimal(dec!(0.00375));
        let principal = Money::from_major(300_000);

        assert_eq!(required_extra_payment(principal, rate, 360, 360).unwrap(), Money::ZERO);
        assert_eq!(required_extra_payment(principal, rate, 360, 480).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_halving_the_term() {
        let extra = required_extra_payment(
            Money::from_major(300_000),
            Rate::from_decimal(dec!(0.00375)),
            360,
            180,
        )
        .unwrap();

        assert!(extra > Money::from_major(770));
        assert!(extra < Money::from_major(780));
    }

    #[test]
    fn test_zero_rate_difference() {
        let extra = required_extra_payment(Money::from_major(120_000), Rate::ZERO, 120, 60).unwrap();
        assert_eq!(extra, Money::from_major(1_000));
    }

    #[test]
    fn test_solved_extra_hits_target_term() {
        let params = mortgage();
        let extra = required_extra_payment_for_term(&params, 15).unwrap();

        let accelerated = LoanParameters {
            recurring_extra: Some(crate::loan::RecurringExtra {
                amount: extra,
                start_period: 1,
            }),
            ..params
        };

        let result = ScheduleSimulator::default().simulate(&accelerated).unwrap();
        assert_eq!(result.period_count(), 180);
    }

    #[test]
    fn test_zero_target_rejected() {
        assert!(matches!(
            required_extra_payment_for_term(&mortgage(), 0),
            Err(ScheduleError::InvalidParameter { .. })
        ));
        assert!(matches!(
            required_extra_payment(Money::from_major(1_000), Rate::ZERO, 12, 0),
            Err(ScheduleError::InvalidParameter { .. })
        ));
    }
}
