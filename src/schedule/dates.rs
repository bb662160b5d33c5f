use chrono::{Days, Months, NaiveDate};

use crate::errors::{Result, ScheduleError};
use crate::types::{DateStep, PaymentFrequency};

/// date of the payment `offset` steps after `start`
///
/// always computed from the start date rather than the previous payment so
/// month-end clamping (Jan 31 -> Feb 29) does not drift later payments
pub fn payment_date(start: NaiveDate, frequency: PaymentFrequency, offset: u32) -> Result<NaiveDate> {
    let date = match frequency.date_step() {
        DateStep::Months(months) => months
            .checked_mul(offset)
            .and_then(|total| start.checked_add_months(Months::new(total))),
        DateStep::Days(days) => {
            start.checked_add_days(Days::new(u64::from(days) * u64::from(offset)))
        }
    };

    date.ok_or_else(|| ScheduleError::InvalidDate {
        message: format!(
            "payment {} after {} with {:?} frequency is out of range",
            offset, start, frequency
        ),
    })
}
