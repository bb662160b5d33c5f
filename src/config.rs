use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{Result, ScheduleError};

/// engine thresholds, passed into every run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// balance at or below which the loan counts as paid off
    #[serde(default = "default_payoff_tolerance")]
    pub payoff_tolerance: Money,
    /// hard cap on simulated periods, as a multiple of the scheduled count
    #[serde(default = "default_max_period_multiplier")]
    pub max_period_multiplier: u32,
}

fn default_payoff_tolerance() -> Money {
    Money::CENT
}

fn default_max_period_multiplier() -> u32 {
    2
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            payoff_tolerance: default_payoff_tolerance(),
            max_period_multiplier: default_max_period_multiplier(),
        }
    }
}

impl EngineConfig {
    pub fn with_payoff_tolerance(mut self, tolerance: Money) -> Self {
        self.payoff_tolerance = tolerance;
        self
    }

    pub fn with_max_period_multiplier(mut self, multiplier: u32) -> Self {
        self.max_period_multiplier = multiplier;
        self
    }

    /// parse from json, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.payoff_tolerance.is_negative() {
            return Err(ScheduleError::InvalidConfiguration {
                message: format!("payoff tolerance must not be negative, got {}", self.payoff_tolerance),
            });
        }

        if self.max_period_multiplier == 0 {
            return Err(ScheduleError::InvalidConfiguration {
                message: "max period multiplier must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// iteration cap for a loan scheduled over `scheduled_periods`
    pub fn period_cap(&self, scheduled_periods: u32) -> u32 {
        scheduled_periods.saturating_mul(self.max_period_multiplier)
    }
}
