use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// conditions recorded while a schedule is simulated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleEvent {
    ExtraPaymentApplied {
        period: u32,
        date: NaiveDate,
        amount: Money,
    },
    /// scheduled plus extra principal exceeded the balance and was cut down
    OverpaymentClamped {
        period: u32,
        date: NaiveDate,
        requested_principal: Money,
        applied_principal: Money,
    },
    LoanPaidOff {
        period: u32,
        date: NaiveDate,
        total_interest: Money,
    },
}

impl ScheduleEvent {
    pub fn period(&self) -> u32 {
        match self {
            ScheduleEvent::ExtraPaymentApplied { period, .. }
            | ScheduleEvent::OverpaymentClamped { period, .. }
            | ScheduleEvent::LoanPaidOff { period, .. } => *period,
        }
    }
}

/// event store for collecting events during a run
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<ScheduleEvent>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: ScheduleEvent) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<ScheduleEvent> {
        std::mem::take(&mut self.events)
    }
}
