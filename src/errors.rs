use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        message: String,
    },

    /// `periods` counts the ledger rows completed before the run stopped:
    /// the cap when it ran out, fewer when a period could not amortize
    #[error("schedule did not converge: {periods} periods simulated (cap {cap}), remaining balance {remaining_balance}")]
    NonConvergence {
        periods: u32,
        cap: u32,
        remaining_balance: Money,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl ScheduleError {
    pub(crate) fn invalid_parameter(message: impl Into<String>) -> Self {
        ScheduleError::InvalidParameter {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
