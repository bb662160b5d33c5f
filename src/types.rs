use serde::{Deserialize, Serialize};

/// how often the borrower pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    Monthly,
    Biweekly,
    Weekly,
    Quarterly,
}

/// how often the nominal rate compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Monthly,
    Daily,
    Annually,
}

/// calendar increment between two consecutive payments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStep {
    Months(u32),
    Days(u32),
}

impl PaymentFrequency {
    pub const ALL: [PaymentFrequency; 4] = [
        PaymentFrequency::Monthly,
        PaymentFrequency::Biweekly,
        PaymentFrequency::Weekly,
        PaymentFrequency::Quarterly,
    ];

    /// payments per year and calendar step, one row per frequency
    fn table(&self) -> (u32, DateStep) {
        match self {
            PaymentFrequency::Monthly => (12, DateStep::Months(1)),
            PaymentFrequency::Biweekly => (26, DateStep::Days(14)),
            PaymentFrequency::Weekly => (52, DateStep::Days(7)),
            PaymentFrequency::Quarterly => (4, DateStep::Months(3)),
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        self.table().0
    }

    pub fn date_step(&self) -> DateStep {
        self.table().1
    }
}

impl CompoundingFrequency {
    pub const ALL: [CompoundingFrequency; 3] = [
        CompoundingFrequency::Monthly,
        CompoundingFrequency::Daily,
        CompoundingFrequency::Annually,
    ];

    /// number of compounding events per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Annually => 1,
        }
    }
}
