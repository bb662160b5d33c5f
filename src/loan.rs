use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{Result, ScheduleError};
use crate::types::{CompoundingFrequency, PaymentFrequency};

/// additional principal paid every period from `start_period` onward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringExtra {
    pub amount: Money,
    pub start_period: u32,
}

/// single lump-sum principal payment at `period`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeExtra {
    pub amount: Money,
    pub period: u32,
}

/// immutable description of a loan to amortize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub payment_frequency: PaymentFrequency,
    pub compounding_frequency: CompoundingFrequency,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub recurring_extra: Option<RecurringExtra>,
    #[serde(default)]
    pub one_time_extra: Option<OneTimeExtra>,
    /// contractual payment replacing the annuity-formula payment
    #[serde(default)]
    pub payment_override: Option<Money>,
}

impl LoanParameters {
    pub fn builder() -> LoanParametersBuilder {
        LoanParametersBuilder::new()
    }

    /// period count implied by term and payment frequency
    pub fn scheduled_periods(&self) -> u32 {
        self.term_years
            .saturating_mul(self.payment_frequency.periods_per_year())
    }

    pub fn has_extra_payments(&self) -> bool {
        self.recurring_extra.map_or(false, |e| e.amount.is_positive())
            || self.one_time_extra.map_or(false, |e| e.amount.is_positive())
    }

    /// extra principal scheduled for the given 1-based period; `None` when
    /// the recurring and one-time amounts together overflow
    pub fn extra_for_period(&self, period: u32) -> Option<Money> {
        let recurring = match self.recurring_extra {
            Some(extra) if period >= extra.start_period => extra.amount,
            _ => Money::ZERO,
        };
        let one_time = match self.one_time_extra {
            Some(extra) if period == extra.period => extra.amount,
            _ => Money::ZERO,
        };
        recurring.checked_add(one_time)
    }

    /// same loan with every extra payment removed
    pub fn without_extras(&self) -> Self {
        Self {
            recurring_extra: None,
            one_time_extra: None,
            ..self.clone()
        }
    }

    /// structural checks the engine relies on; business-rule limits belong
    /// to the caller
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(ScheduleError::invalid_parameter(format!(
                "principal must be positive, got {}",
                self.principal
            )));
        }

        if self.annual_rate.is_negative() {
            return Err(ScheduleError::invalid_parameter(format!(
                "annual rate must not be negative, got {}",
                self.annual_rate
            )));
        }

        if self.term_years == 0 {
            return Err(ScheduleError::invalid_parameter("term must be at least one year"));
        }

        if let Some(extra) = self.recurring_extra {
            if extra.amount.is_negative() {
                return Err(ScheduleError::invalid_parameter(format!(
                    "recurring extra payment must not be negative, got {}",
                    extra.amount
                )));
            }
            if extra.start_period == 0 {
                return Err(ScheduleError::invalid_parameter(
                    "recurring extra payment start period is 1-based",
                ));
            }
        }

        if let Some(extra) = self.one_time_extra {
            if extra.amount.is_negative() {
                return Err(ScheduleError::invalid_parameter(format!(
                    "one-time extra payment must not be negative, got {}",
                    extra.amount
                )));
            }
            if extra.period == 0 {
                return Err(ScheduleError::invalid_parameter(
                    "one-time extra payment period is 1-based",
                ));
            }
        }

        if let Some(payment) = self.payment_override {
            if !payment.is_positive() {
                return Err(ScheduleError::invalid_parameter(format!(
                    "payment override must be positive, got {}",
                    payment
                )));
            }
        }

        Ok(())
    }
}

/// builder for loan parameters
#[derive(Debug, Default)]
pub struct LoanParametersBuilder {
    principal: Option<Money>,
    annual_rate: Option<Rate>,
    term_years: Option<u32>,
    payment_frequency: Option<PaymentFrequency>,
    compounding_frequency: Option<CompoundingFrequency>,
    start_date: Option<NaiveDate>,
    recurring_extra: Option<RecurringExtra>,
    one_time_extra: Option<OneTimeExtra>,
    payment_override: Option<Money>,
}

impl LoanParametersBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn payment_frequency(mut self, frequency: PaymentFrequency) -> Self {
        self.payment_frequency = Some(frequency);
        self
    }

    pub fn compounding(mut self, frequency: CompoundingFrequency) -> Self {
        self.compounding_frequency = Some(frequency);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn recurring_extra(mut self, amount: Money, start_period: u32) -> Self {
        self.recurring_extra = Some(RecurringExtra { amount, start_period });
        self
    }

    pub fn one_time_extra(mut self, amount: Money, period: u32) -> Self {
        self.one_time_extra = Some(OneTimeExtra { amount, period });
        self
    }

    pub fn payment_override(mut self, payment: Money) -> Self {
        self.payment_override = Some(payment);
        self
    }

    /// build and validate; frequencies default to monthly payments with
    /// annual compounding
    pub fn build(self) -> Result<LoanParameters> {
        let principal = self
            .principal
            .ok_or_else(|| ScheduleError::invalid_parameter("principal required"))?;

        let annual_rate = self
            .annual_rate
            .ok_or_else(|| ScheduleError::invalid_parameter("rate required"))?;

        let term_years = self
            .term_years
            .ok_or_else(|| ScheduleError::invalid_parameter("term required"))?;

        let start_date = self
            .start_date
            .ok_or_else(|| ScheduleError::invalid_parameter("start date required"))?;

        let params = LoanParameters {
            principal,
            annual_rate,
            term_years,
            payment_frequency: self.payment_frequency.unwrap_or(PaymentFrequency::Monthly),
            compounding_frequency: self
                .compounding_frequency
                .unwrap_or(CompoundingFrequency::Annually),
            start_date,
            recurring_extra: self.recurring_extra,
            one_time_extra: self.one_time_extra,
            payment_override: self.payment_override,
        };

        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let params = LoanParameters::builder()
            .principal(Money::from_major(300_000))
            .rate(Rate::from_bps(450))
            .term_years(30)
            .start_date(start())
            .build()
            .unwrap();

        assert_eq!(params.payment_frequency, PaymentFrequency::Monthly);
        assert_eq!(params.compounding_frequency, CompoundingFrequency::Annually);
        assert_eq!(params.scheduled_periods(), 360);
        assert!(!params.has_extra_payments());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let result = LoanParameters::builder()
            .principal(Money::from_major(1_000))
            .term_years(1)
            .start_date(start())
            .build();

        assert!(matches!(result, Err(ScheduleError::InvalidParameter { .. })));
    }

    #[test]
    fn test_extra_for_period() {
        let params = LoanParameters::builder()
            .principal(Money::from_major(300_000))
            .rate(Rate::from_bps(450))
            .term_years(30)
            .start_date(start())
            .recurring_extra(Money::from_major(200), 3)
            .one_time_extra(Money::from_major(10_000), 12)
            .build()
            .unwrap();

        assert_eq!(params.extra_for_period(1), Some(Money::ZERO));
        assert_eq!(params.extra_for_period(3), Some(Money::from_major(200)));
        assert_eq!(params.extra_for_period(12), Some(Money::from_major(10_200)));
        assert_eq!(params.extra_for_period(13), Some(Money::from_major(200)));
        assert!(params.has_extra_payments());

        let baseline = params.without_extras();
        assert_eq!(baseline.extra_for_period(12), Some(Money::ZERO));
        assert_eq!(baseline.principal, params.principal);
    }

    #[test]
    fn test_validation_rules() {
        let base = LoanParameters::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(5))
            .term_years(5)
            .start_date(start());

        assert!(LoanParameters::builder()
            .principal(Money::ZERO)
            .rate(Rate::from_percentage(5))
            .term_years(5)
            .start_date(start())
            .build()
            .is_err());

        assert!(LoanParameters::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(5))
            .term_years(0)
            .start_date(start())
            .build()
            .is_err());

        assert!(base.recurring_extra(Money::from_major(-1), 1).build().is_err());

        let zero_period = LoanParameters::builder()
            .principal(Money::from_major(10_000))
            .rate(Rate::from_percentage(5))
            .term_years(5)
            .start_date(start())
            .one_time_extra(Money::from_major(500), 0)
            .build();
        assert!(zero_period.is_err());
    }

    #[test]
    fn test_deserialize_from_json() {
        let json = r#"{
            "principal": "250000",
            "annual_rate": "0.06",
            "term_years": 15,
            "payment_frequency": "biweekly",
            "compounding_frequency": "monthly",
            "start_date": "2025-03-01",
            "recurring_extra": { "amount": "100", "start_period": 1 }
        }"#;

        let params: LoanParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.scheduled_periods(), 15 * 26);
        assert_eq!(params.one_time_extra, None);
        assert!(params.validate().is_ok());
    }
}
