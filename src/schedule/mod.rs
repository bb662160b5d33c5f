pub mod dates;
pub mod simulator;
pub mod yearly;

pub use dates::payment_date;
pub use simulator::{PaymentRecord, ScheduleResult, ScheduleSimulator};
pub use yearly::{aggregate_by_year, YearSummary};
