pub mod calculator;
pub mod solver;

pub use calculator::compute_periodic_payment;
pub use solver::{required_extra_payment, required_extra_payment_for_term};
