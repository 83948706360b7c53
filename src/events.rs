use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{PaymentBasis, RuleId};

/// all events that can be emitted while generating a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // overpayment events
    OverpaymentApplied {
        rule_id: RuleId,
        month: u32,
        amount: Money,
        keep_payment_constant: bool,
    },
    RecurringOverpaymentChanged {
        month: u32,
        old_value: Money,
        new_value: Money,
    },

    // payment events
    PaymentRecalculated {
        month: u32,
        basis: PaymentBasis,
        old_payment: Money,
        new_payment: Money,
    },

    // carry-forward events
    CarryForwardScheduled {
        source_rule: RuleId,
        rule_id: RuleId,
        month: u32,
        start_month: u32,
        value: Money,
    },
    CarryForwardIgnored {
        source_rule: RuleId,
        month: u32,
        value: Money,
    },

    // lifecycle events
    /// rounding residue added to the final payment at maturity
    ResidueSettled {
        month: u32,
        amount: Money,
    },
    LoanRepaid {
        month: u32,
        final_payment: Money,
    },
}

impl Event {
    /// month the event happened in
    pub fn month(&self) -> u32 {
        match self {
            Event::OverpaymentApplied { month, .. }
            | Event::RecurringOverpaymentChanged { month, .. }
            | Event::PaymentRecalculated { month, .. }
            | Event::CarryForwardScheduled { month, .. }
            | Event::CarryForwardIgnored { month, .. }
            | Event::ResidueSettled { month, .. }
            | Event::LoanRepaid { month, .. } => *month,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
