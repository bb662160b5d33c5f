use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{checked_powi, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{CompoundingFrequency, PaymentFrequency};

/// effective annual rate for a nominal rate under the given compounding
///
/// annual compounding returns the nominal rate untouched, the others use
/// `(1 + nominal/n)^n - 1`
pub fn effective_annual_rate(nominal: Rate, compounding: CompoundingFrequency) -> Result<Rate> {
    if compounding == CompoundingFrequency::Annually {
        return Ok(nominal);
    }

    let n = compounding.periods_per_year();
    let base = Decimal::ONE + nominal.as_decimal() / Decimal::from(n);
    let factor = checked_powi(base, n).ok_or_else(|| {
        ScheduleError::invalid_parameter(format!(
            "rate {} overflows {:?} compounding",
            nominal, compounding
        ))
    })?;

    Ok(Rate::from_decimal(factor - Decimal::ONE))
}

/// interest rate applied per payment period: effective annual rate spread
/// evenly over the payments in a year
pub fn period_rate(
    nominal: Rate,
    payment: PaymentFrequency,
    compounding: CompoundingFrequency,
) -> Result<Rate> {
    let effective = effective_annual_rate(nominal, compounding)?;
    Ok(Rate::from_decimal(
        effective.as_decimal() / Decimal::from(payment.periods_per_year()),
    ))
}

/// resolved rate figures for one loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateBasis {
    pub nominal_rate: Rate,
    pub effective_annual_rate: Rate,
    pub period_rate: Rate,
    pub periods_per_year: u32,
}

impl RateBasis {
    pub fn resolve(
        nominal: Rate,
        payment: PaymentFrequency,
        compounding: CompoundingFrequency,
    ) -> Result<Self> {
        if nominal.is_negative() {
            return Err(ScheduleError::invalid_parameter(format!(
                "annual rate must not be negative, got {}",
                nominal
            )));
        }

        let effective = effective_annual_rate(nominal, compounding)?;
        let periods_per_year = payment.periods_per_year();

        Ok(Self {
            nominal_rate: nominal,
            effective_annual_rate: effective,
            period_rate: Rate::from_decimal(effective.as_decimal() / Decimal::from(periods_per_year)),
            periods_per_year,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_annual_compounding_is_nominal() {
        let nominal = Rate::from_bps(450);
        let effective = effective_annual_rate(nominal, CompoundingFrequency::Annually).unwrap();
        assert_eq!(effective, nominal);

        let monthly = period_rate(nominal, PaymentFrequency::Monthly, CompoundingFrequency::Annually).unwrap();
        assert_eq!(monthly.as_decimal(), dec!(0.00375));
    }

    #[test]
    fn test_effective_rate_by_compounding() {
        let apr = Rate::from_percentage(18);

        let daily = effective_annual_rate(apr, CompoundingFrequency::Daily).unwrap();
        assert!(daily.as_percentage() > dec!(19.7));
        assert!(daily.as_percentage() < dec!(19.8));

        let monthly = effective_annual_rate(apr, CompoundingFrequency::Monthly).unwrap();
        assert!(monthly.as_percentage() > dec!(19.5));
        assert!(monthly.as_percentage() < dec!(19.6));

        // more frequent compounding never yields less
        assert!(daily > monthly);
        assert!(monthly > apr);
    }

    #[test]
    fn test_zero_rate_stays_zero() {
        for compounding in CompoundingFrequency::ALL {
            for payment in PaymentFrequency::ALL {
                let rate = period_rate(Rate::ZERO, payment, compounding).unwrap();
                assert!(rate.is_zero());
            }
        }
    }

    #[test]
    fn test_quarterly_period_rate() {
        let rate = period_rate(
            Rate::from_percentage(8),
            PaymentFrequency::Quarterly,
            CompoundingFrequency::Annually,
        )
        .unwrap();
        assert_eq!(rate.as_decimal(), dec!(0.02));
    }

    #[test]
    fn test_rate_basis_rejects_negative_rate() {
        let negative = Rate::from_decimal(dec!(-0.01));
        let result = RateBasis::resolve(negative, PaymentFrequency::Monthly, CompoundingFrequency::Monthly);
        assert!(matches!(result, Err(ScheduleError::InvalidParameter { .. })));
    }

    #[test]
    fn test_rate_basis_overflow_is_invalid_parameter() {
        let absurd = Rate::from_decimal(dec!(100000));
        let result = RateBasis::resolve(absurd, PaymentFrequency::Weekly, CompoundingFrequency::Daily);
        assert!(matches!(result, Err(ScheduleError::InvalidParameter { .. })));
    }
}
