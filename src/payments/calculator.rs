use rust_decimal::{Decimal, RoundingStrategy};

use crate::decimal::{checked_powi, Money, Rate, MONEY_DP};
use crate::errors::{Result, ScheduleError};

/// fixed periodic payment that retires `principal` over `total_periods`
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), or straight-line P / n when
/// the periodic rate is zero
///
/// rounded up at money precision so the scheduled term never leaves a
/// balance behind
pub fn compute_periodic_payment(principal: Money, period_rate: Rate, total_periods: u32) -> Result<Money> {
    if !principal.is_positive() {
        return Err(ScheduleError::invalid_parameter(format!(
            "principal must be positive, got {}",
            principal
        )));
    }

    if total_periods == 0 {
        return Err(ScheduleError::invalid_parameter("loan must run for at least one period"));
    }

    if period_rate.is_negative() {
        return Err(ScheduleError::invalid_parameter(format!(
            "period rate must not be negative, got {}",
            period_rate
        )));
    }

    if period_rate.is_zero() {
        return Ok(round_up(principal.as_decimal() / Decimal::from(total_periods)));
    }

    let r = period_rate.as_decimal();
    let compound = checked_powi(Decimal::ONE + r, total_periods).ok_or_else(|| {
        ScheduleError::invalid_parameter(format!(
            "rate {} over {} periods overflows the annuity factor",
            period_rate, total_periods
        ))
    })?;

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        // rate too small to register in the annuity factor
        return Ok(round_up(principal.as_decimal() / Decimal::from(total_periods)));
    }

    let payment = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound))
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| {
            ScheduleError::invalid_parameter(format!(
                "payment for principal {} at rate {} is not representable",
                principal, period_rate
            ))
        })?;

    Ok(round_up(payment))
}

fn round_up(payment: Decimal) -> Money {
    Money::from_decimal(payment.round_dp_with_strategy(MONEY_DP, RoundingStrategy::AwayFromZero))
}
