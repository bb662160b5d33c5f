pub mod frequency;

pub use frequency::{effective_annual_rate, period_rate, RateBasis};
