use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

use super::simulator::PaymentRecord;

/// totals for one calendar year of the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: i32,
    pub payment_count: u32,
    pub total_payment: Money,
    pub total_interest: Money,
    /// scheduled plus extra principal
    pub total_principal: Money,
    pub total_extra_principal: Money,
    /// balance after the last payment of the year
    pub ending_balance: Money,
}

impl YearSummary {
    fn open(record: &PaymentRecord) -> Self {
        Self {
            year: record.date.year(),
            payment_count: 0,
            total_payment: Money::ZERO,
            total_interest: Money::ZERO,
            total_principal: Money::ZERO,
            total_extra_principal: Money::ZERO,
            ending_balance: record.balance,
        }
    }

    fn absorb(&mut self, record: &PaymentRecord) {
        self.payment_count += 1;
        self.total_payment += record.payment;
        self.total_interest += record.interest;
        self.total_principal += record.total_principal();
        self.total_extra_principal += record.extra_principal;
        self.ending_balance = record.balance;
    }
}

/// fold an ordered ledger into per-year summaries
pub fn aggregate_by_year(records: &[PaymentRecord]) -> Vec<YearSummary> {
    let mut summaries: Vec<YearSummary> = Vec::new();

    for record in records {
        let year = record.date.year();
        match summaries.last_mut() {
            Some(current) if current.year == year => current.absorb(record),
            _ => {
                let mut summary = YearSummary::open(record);
                summary.absorb(record);
                summaries.push(summary);
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::loan::LoanParameters;
    use crate::schedule::ScheduleSimulator;
    use crate::types::PaymentFrequency;
    use chrono::NaiveDate;

    fn schedule(start: NaiveDate, frequency: PaymentFrequency) -> Vec<PaymentRecord> {
        let params = LoanParameters::builder()
            .principal(Money::from_major(50_000))
            .rate(Rate::from_percentage(6))
            .term_years(5)
            .payment_frequency(frequency)
            .start_date(start)
            .one_time_extra(Money::from_major(5_000), 4)
            .build()
            .unwrap();

        ScheduleSimulator::default().simulate(&params).unwrap().records
    }

    #[test]
    fn test_empty_ledger() {
        assert!(aggregate_by_year(&[]).is_empty());
    }

    #[test]
    fn test_partial_first_year() {
        let records = schedule(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), PaymentFrequency::Monthly);
        let years = aggregate_by_year(&records);

        assert_eq!(years[0].year, 2024);
        assert_eq!(years[0].payment_count, 3);
        assert_eq!(years[1].year, 2025);
        assert_eq!(years[1].payment_count, 12);
        assert_eq!(years[0].ending_balance, records[2].balance);
    }

    #[test]
    fn test_sums_match_ledger() {
        let records = schedule(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(), PaymentFrequency::Biweekly);
        let years = aggregate_by_year(&records);

        let count: u32 = years.iter().map(|y| y.payment_count).sum();
        assert_eq!(count as usize, records.len());

        let interest: Money = years.iter().map(|y| y.total_interest).sum();
        let ledger_interest: Money = records.iter().map(|r| r.interest).sum();
        assert_eq!(interest, ledger_interest);

        let payments: Money = years.iter().map(|y| y.total_payment).sum();
        let ledger_payments: Money = records.iter().map(|r| r.payment).sum();
        assert_eq!(payments, ledger_payments);

        let extra: Money = years.iter().map(|y| y.total_extra_principal).sum();
        assert_eq!(extra, Money::from_major(5_000));

        let last = years.last().unwrap();
        assert_eq!(last.ending_balance, records.last().unwrap().balance);

        // years are strictly increasing
        for pair in years.windows(2) {
            assert!(pair[0].year < pair[1].year);
        }
    }
}
