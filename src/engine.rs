use serde::{Deserialize, Serialize};

use crate::comparison::ComparisonEngine;
use crate::config::EngineConfig;
use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};
use crate::loan::LoanParameters;
use crate::payments::required_extra_payment_for_term;
use crate::schedule::{ScheduleResult, ScheduleSimulator, YearSummary};

/// schedule with savings and calendar-year breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationReport {
    pub schedule: ScheduleResult,
    pub yearly: Vec<YearSummary>,
}

impl AmortizationReport {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ScheduleError::Serialization {
            message: e.to_string(),
        })
    }
}

/// entry point tying the simulator, comparison and solver together
#[derive(Debug, Clone, Copy, Default)]
pub struct AmortizationEngine {
    simulator: ScheduleSimulator,
}

impl AmortizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            simulator: ScheduleSimulator::new(config),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        self.simulator.config()
    }

    /// plain schedule, no baseline run
    pub fn schedule(&self, params: &LoanParameters) -> Result<ScheduleResult> {
        self.simulator.simulate(params)
    }

    /// schedule with savings against the no-extra baseline
    pub fn compare(&self, params: &LoanParameters) -> Result<ScheduleResult> {
        ComparisonEngine::with_simulator(self.simulator).compare(params)
    }

    /// full report: compared schedule plus yearly summaries
    pub fn report(&self, params: &LoanParameters) -> Result<AmortizationReport> {
        let schedule = self.compare(params)?;
        let yearly = schedule.yearly_summaries();
        Ok(AmortizationReport { schedule, yearly })
    }

    pub fn required_extra_payment(&self, params: &LoanParameters, target_years: u32) -> Result<Money> {
        required_extra_payment_for_term(params, target_years)
    }
}
