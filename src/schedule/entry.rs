use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::events::Event;

/// one month of a schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub month: u32,
    /// scheduled annuity payment before any overpayment
    ///
    /// At maturity this also carries any rounding residue left on the
    /// balance, recorded as [`Event::ResidueSettled`].
    pub payment: Money,
    pub interest: Money,
    /// principal portion of the payment
    pub capital: Money,
    /// extra principal paid this month, summed over all rules
    pub overpayment: Money,
    pub payment_overpayment: Money,
    /// balance after this month
    pub remaining_balance: Money,
    /// months left including this one
    pub remaining_term: u32,
}

impl ScheduleEntry {
    pub fn new(
        month: u32,
        payment: Money,
        interest: Money,
        capital: Money,
        overpayment: Money,
        remaining_balance: Money,
        remaining_term: u32,
    ) -> Self {
        Self {
            month,
            payment,
            interest,
            capital,
            overpayment,
            payment_overpayment: payment + overpayment,
            remaining_balance,
            remaining_term,
        }
    }

    /// add an overpayment and record the balance it leaves
    pub fn add_overpayment(&mut self, overpayment: Money, remaining_balance: Money) {
        self.overpayment += overpayment;
        self.payment_overpayment = self.payment + self.overpayment;
        self.remaining_balance = remaining_balance;
    }

    /// principal repaid this month, scheduled and extra
    pub fn total_capital(&self) -> Money {
        self.capital + self.overpayment
    }
}

/// month-ordered schedule for one loan and one rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub term_months: u32,
    pub entries: Vec<ScheduleEntry>,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Schedule {
    pub fn new(term_months: u32, entries: Vec<ScheduleEntry>, events: Vec<Event>) -> Self {
        Self {
            term_months,
            entries,
            events,
        }
    }

    /// entry for a 1-based month
    pub fn get(&self, month: u32) -> Option<&ScheduleEntry> {
        if month == 0 {
            return None;
        }
        self.entries.get((month - 1) as usize)
    }

    pub fn first(&self) -> Option<&ScheduleEntry> {
        self.entries.first()
    }

    pub fn last(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduleEntry> {
        self.entries.iter()
    }

    /// true when the final entry leaves nothing to pay
    pub fn is_repaid(&self) -> bool {
        self.last().map(|e| e.remaining_balance.is_zero()).unwrap_or(false)
    }

    pub fn total_interest(&self) -> Money {
        self.iter().map(|e| e.interest).sum()
    }

    pub fn total_overpayment(&self) -> Money {
        self.iter().map(|e| e.overpayment).sum()
    }

    /// everything paid: payments plus overpayments
    pub fn total_paid(&self) -> Money {
        self.iter().map(|e| e.payment_overpayment).sum()
    }

    /// carry-forward overpayments dropped because they began past the term
    pub fn ignored_carry_forwards(&self) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::CarryForwardIgnored { .. }))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ScheduleEntry;
    type IntoIter = std::slice::Iter<'a, ScheduleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
