pub mod comparison;
pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod events;
pub mod interest;
pub mod loan;
pub mod payments;
pub mod schedule;
pub mod types;

// re-export key types
pub use comparison::{ComparisonEngine, Savings, TimeSaved};
pub use config::EngineConfig;
pub use decimal::{Money, Rate};
pub use engine::{AmortizationEngine, AmortizationReport};
pub use errors::{Result, ScheduleError};
pub use events::{EventStore, ScheduleEvent};
pub use interest::{effective_annual_rate, period_rate, RateBasis};
pub use loan::{LoanParameters, LoanParametersBuilder, OneTimeExtra, RecurringExtra};
pub use payments::{compute_periodic_payment, required_extra_payment, required_extra_payment_for_term};
pub use schedule::{aggregate_by_year, PaymentRecord, ScheduleResult, ScheduleSimulator, YearSummary};
pub use types::{CompoundingFrequency, DateStep, PaymentFrequency};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
