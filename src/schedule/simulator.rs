use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::comparison::Savings;
use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::events::{EventStore, ScheduleEvent};
use crate::interest::RateBasis;
use crate::loan::LoanParameters;
use crate::payments::compute_periodic_payment;

use super::dates::payment_date;
use super::yearly::{aggregate_by_year, YearSummary};

/// upper bound on the ledger allocation made before the first period runs
const PREALLOCATED_PERIODS: u32 = 4096;

/// one period of the payment ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub period: u32,
    pub date: NaiveDate,
    /// interest plus all principal applied this period
    pub payment: Money,
    /// scheduled principal actually applied
    pub principal: Money,
    pub interest: Money,
    pub extra_principal: Money,
    /// balance after this payment
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
    /// scheduled plus extra principal was cut down to the remaining balance
    pub clamped: bool,
}

impl PaymentRecord {
    pub fn total_principal(&self) -> Money {
        self.principal + self.extra_principal
    }
}

/// complete output of one simulation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub periodic_payment: Money,
    pub rate_basis: RateBasis,
    pub scheduled_periods: u32,
    pub records: Vec<PaymentRecord>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_extra_principal: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
    pub events: Vec<ScheduleEvent>,
    /// set when produced through the comparison engine
    pub savings: Option<Savings>,
}

impl ScheduleResult {
    pub fn period_count(&self) -> u32 {
        self.records.len() as u32
    }

    /// record for a 1-based period
    pub fn get_record(&self, period: u32) -> Option<&PaymentRecord> {
        period
            .checked_sub(1)
            .and_then(|index| self.records.get(index as usize))
    }

    /// balance after the given period; zero past payoff
    pub fn balance_after(&self, period: u32) -> Option<Money> {
        if period == 0 {
            return self.records.first().map(|r| r.balance + r.total_principal());
        }
        match self.get_record(period) {
            Some(record) => Some(record.balance),
            None => self.records.last().map(|_| Money::ZERO),
        }
    }

    pub fn clamped_periods(&self) -> impl Iterator<Item = &PaymentRecord> {
        self.records.iter().filter(|r| r.clamped)
    }

    pub fn yearly_summaries(&self) -> Vec<YearSummary> {
        aggregate_by_year(&self.records)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ScheduleError::Serialization {
            message: e.to_string(),
        })
    }
}

/// period-by-period loan simulator
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleSimulator {
    config: EngineConfig,
}

impl ScheduleSimulator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// simulate the loan to payoff
    pub fn simulate(&self, params: &LoanParameters) -> Result<ScheduleResult> {
        params.validate()?;
        self.config.validate()?;

        let rate_basis = RateBasis::resolve(
            params.annual_rate,
            params.payment_frequency,
            params.compounding_frequency,
        )?;
        let scheduled_periods = params.scheduled_periods();

        let periodic_payment = match params.payment_override {
            Some(payment) => payment,
            None => compute_periodic_payment(params.principal, rate_basis.period_rate, scheduled_periods)?,
        };

        self.run(params, rate_basis, scheduled_periods, periodic_payment)
    }

    fn run(
        &self,
        params: &LoanParameters,
        rate_basis: RateBasis,
        scheduled_periods: u32,
        periodic_payment: Money,
    ) -> Result<ScheduleResult> {
        let cap = self.config.period_cap(scheduled_periods);
        let tolerance = self.config.payoff_tolerance;

        let mut records = Vec::with_capacity(scheduled_periods.min(PREALLOCATED_PERIODS) as usize);
        let mut events = EventStore::new();
        let mut balance = params.principal;
        let mut cumulative_interest = Money::ZERO;
        let mut cumulative_principal = Money::ZERO;
        let mut total_extra_principal = Money::ZERO;
        let mut total_paid = Money::ZERO;

        for period in 1..=cap {
            let date = payment_date(params.start_date, params.payment_frequency, period - 1)?;
            let stalled = move || ScheduleError::NonConvergence {
                periods: period - 1,
                cap,
                remaining_balance: balance,
            };

            let interest = balance.interest_at(rate_basis.period_rate).ok_or_else(stalled)?;
            let base_principal = periodic_payment.checked_sub(interest).ok_or_else(stalled)?;
            let extra = params.extra_for_period(period).ok_or_else(stalled)?;
            let requested = base_principal.checked_add(extra).ok_or_else(stalled)?;

            // the balance may never rise; a payment below interest cannot amortize
            if requested.is_negative() {
                log::debug!(
                    "period {period}: payment {periodic_payment} plus extra {extra} is below interest {interest}"
                );
                return Err(stalled());
            }

            let mut applied = requested.min(balance);
            let clamped = requested > balance;

            // a clamp eats into the extra portion before the scheduled one
            let mut principal = base_principal.min(applied);
            let extra_principal = applied - principal;

            // sub-unit rounding residue on the last scheduled period is paid with it
            let residue = balance - applied;
            if period == scheduled_periods && residue > tolerance && residue < Money::ONE {
                log::trace!("period {period}: residue {residue} folded into the final payment");
                principal += residue;
                applied = balance;
            }

            let payment = interest.checked_add(applied).ok_or_else(stalled)?;
            balance -= applied;
            cumulative_interest = cumulative_interest.checked_add(interest).ok_or_else(stalled)?;
            cumulative_principal += applied;
            total_extra_principal += extra_principal;
            total_paid = total_paid.checked_add(payment).ok_or_else(stalled)?;

            if extra_principal.is_positive() {
                events.emit(ScheduleEvent::ExtraPaymentApplied {
                    period,
                    date,
                    amount: extra_principal,
                });
            }

            if clamped {
                log::trace!("period {period}: principal {requested} clamped to balance {applied}");
                events.emit(ScheduleEvent::OverpaymentClamped {
                    period,
                    date,
                    requested_principal: requested,
                    applied_principal: applied,
                });
            }

            records.push(PaymentRecord {
                period,
                date,
                payment,
                principal,
                interest,
                extra_principal,
                balance,
                cumulative_interest,
                cumulative_principal,
                clamped,
            });

            if balance <= tolerance {
                events.emit(ScheduleEvent::LoanPaidOff {
                    period,
                    date,
                    total_interest: cumulative_interest,
                });

                log::debug!(
                    "schedule paid off after {period} of {scheduled_periods} scheduled periods, total interest {cumulative_interest}"
                );

                return Ok(ScheduleResult {
                    periodic_payment,
                    rate_basis,
                    scheduled_periods,
                    records,
                    total_interest: cumulative_interest,
                    total_principal: cumulative_principal,
                    total_extra_principal,
                    total_paid,
                    payoff_date: date,
                    events: events.take_events(),
                    savings: None,
                });
            }
        }

        Err(ScheduleError::NonConvergence {
            periods: cap,
            cap,
            remaining_balance: balance,
        })
    }
}
