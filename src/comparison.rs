use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::Result;
use crate::loan::LoanParameters;
use crate::schedule::{ScheduleResult, ScheduleSimulator};

/// periods saved split into whole years and leftover payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSaved {
    pub years: u32,
    pub periods: u32,
}

impl TimeSaved {
    pub fn from_periods(periods_saved: u32, periods_per_year: u32) -> Self {
        if periods_per_year == 0 {
            return Self { years: 0, periods: periods_saved };
        }
        Self {
            years: periods_saved / periods_per_year,
            periods: periods_saved % periods_per_year,
        }
    }
}

/// deltas of the actual schedule against the no-extra-payment baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings {
    pub interest_savings: Money,
    pub periods_saved: u32,
    pub time_saved: TimeSaved,
    pub baseline_total_interest: Money,
    pub baseline_period_count: u32,
    pub baseline_payoff_date: NaiveDate,
}

impl Savings {
    /// both deltas floored at zero
    pub fn between(actual: &ScheduleResult, baseline: &ScheduleResult) -> Self {
        let interest_savings = (baseline.total_interest - actual.total_interest).non_negative();
        let periods_saved = baseline.period_count().saturating_sub(actual.period_count());

        Self {
            interest_savings,
            periods_saved,
            time_saved: TimeSaved::from_periods(periods_saved, actual.rate_basis.periods_per_year),
            baseline_total_interest: baseline.total_interest,
            baseline_period_count: baseline.period_count(),
            baseline_payoff_date: baseline.payoff_date,
        }
    }
}

/// runs the loan with and without its extra payments
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine {
    simulator: ScheduleSimulator,
}

impl ComparisonEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            simulator: ScheduleSimulator::new(config),
        }
    }

    pub fn with_simulator(simulator: ScheduleSimulator) -> Self {
        Self { simulator }
    }

    /// actual schedule with `savings` filled in
    pub fn compare(&self, params: &LoanParameters) -> Result<ScheduleResult> {
        let (mut actual, baseline) = self.run_pair(params)?;
        actual.savings = Some(Savings::between(&actual, &baseline));
        Ok(actual)
    }

    /// actual and baseline schedules; the actual one carries the savings
    pub fn run_pair(&self, params: &LoanParameters) -> Result<(ScheduleResult, ScheduleResult)> {
        let actual = self.simulator.simulate(params)?;

        let baseline = if params.has_extra_payments() {
            self.simulator.simulate(&params.without_extras())?
        } else {
            // same inputs, same schedule
            actual.clone()
        };

        log::debug!(
            "comparison: actual {} periods / {} interest, baseline {} periods / {} interest",
            actual.period_count(),
            actual.total_interest,
            baseline.period_count(),
            baseline.total_interest
        );

        Ok((actual, baseline))
    }
}
