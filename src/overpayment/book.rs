use std::collections::HashSet;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::{OverpaymentKind, RuleId};

use super::OverpaymentRule;

/// carry-forward rule waiting for the month to end
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedRule {
    /// rule whose effect is being carried forward
    pub source: RuleId,
    pub rule: OverpaymentRule,
}

/// live, append-only rule list owned by one generation run
///
/// Carry-forward rules are queued during a month and only become visible
/// once the month is committed, so rules never change under an iteration.
#[derive(Debug, Clone)]
pub struct RuleBook {
    term_months: u32,
    rules: Vec<OverpaymentRule>,
    queued: Vec<QueuedRule>,
}

impl RuleBook {
    /// normalize caller rules against the loan term
    pub fn new(rules: &[OverpaymentRule], term_months: u32) -> Result<Self> {
        if term_months == 0 {
            return Err(LoanError::InvalidTerm { months: term_months });
        }

        let mut seen: HashSet<RuleId> = HashSet::with_capacity(rules.len());
        let mut normalized = Vec::with_capacity(rules.len());

        for (position, rule) in rules.iter().enumerate() {
            let mut rule = rule.clone();
            // rules may have been built for another term or edited directly
            match rule.kind {
                OverpaymentKind::OneTime => rule.end_month = rule.start_month,
                OverpaymentKind::Range => rule.end_month = rule.end_month.min(term_months),
                OverpaymentKind::FullTerm => {
                    rule.start_month = 1;
                    rule.end_month = term_months;
                }
            }

            if rule.start_month == 0 || rule.start_month > term_months || rule.start_month > rule.end_month {
                return Err(LoanError::InvalidOverpaymentRange {
                    start: rule.start_month,
                    end: rule.end_month,
                    term: term_months,
                });
            }
            if rule.value.is_negative() {
                return Err(LoanError::InvalidOverpaymentValue { value: rule.value });
            }

            // cloned rules share an id; snapshots are keyed by id
            if !seen.insert(rule.id) {
                rule.id = Uuid::new_v5(&rule.id, &(position as u64).to_be_bytes());
                seen.insert(rule.id);
            }
            normalized.push(rule);
        }

        Ok(Self {
            term_months,
            rules: normalized,
            queued: Vec::new(),
        })
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// committed rules in application order
    pub fn rules(&self) -> &[OverpaymentRule] {
        &self.rules
    }

    /// rules covering `month`, in list order
    pub fn active(&self, month: u32) -> impl Iterator<Item = &OverpaymentRule> {
        self.rules.iter().filter(move |rule| rule.is_active(month))
    }

    /// build a carry-forward rule for `source`, created in `month`
    ///
    /// The id is derived from the source rule and month so repeated runs over
    /// the same rules produce identical rule books.
    pub fn carry_forward(&self, source: &OverpaymentRule, month: u32, start_month: u32, value: Money) -> OverpaymentRule {
        let id = Uuid::new_v5(&source.id, &month.to_be_bytes());
        OverpaymentRule::carry_forward(id, start_month, self.term_months, value)
    }

    /// queue a rule for the next commit
    pub fn queue(&mut self, source: RuleId, rule: OverpaymentRule) {
        self.queued.push(QueuedRule { source, rule });
    }

    pub fn has_queued(&self) -> bool {
        !self.queued.is_empty()
    }

    /// append queued rules; rules starting past the term are returned instead
    pub fn commit(&mut self) -> Vec<QueuedRule> {
        let term_months = self.term_months;
        let (accepted, ignored): (Vec<_>, Vec<_>) = self
            .queued
            .drain(..)
            .partition(|queued| queued.rule.start_month <= term_months);
        self.rules.extend(accepted.into_iter().map(|queued| queued.rule));
        ignored
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
