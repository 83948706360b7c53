use log::{debug, info, trace, warn};
use std::collections::HashMap;

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::events::{Event, EventStore};
use crate::overpayment::{OverpaymentRule, RuleBook};
use crate::types::{OverpaymentKind, PaymentBasis, RuleId};

use super::annuity;
use super::{Schedule, ScheduleEntry};

/// generate the schedule of a loan under an ordered list of overpayment rules
pub fn generate_schedule(
    principal: Money,
    annual_rate: Rate,
    term_months: u32,
    rules: &[OverpaymentRule],
) -> Result<Schedule> {
    let terms = LoanTerms::new(principal, annual_rate, term_months)?;
    ScheduleGenerator::new(&terms).generate(rules)
}

/// month-by-month schedule simulation for one loan
///
/// Each call to [`ScheduleGenerator::generate`] owns all of its simulation
/// state, so one generator can run any number of rule sets independently.
pub struct ScheduleGenerator<'a> {
    terms: &'a LoanTerms,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn new(terms: &'a LoanTerms) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &LoanTerms {
        self.terms
    }

    /// run the simulation for `rules`, applied in list order each month
    pub fn generate(&self, rules: &[OverpaymentRule]) -> Result<Schedule> {
        self.terms.validate()?;

        let term_months = self.terms.term_months;
        let mut book = RuleBook::new(rules, term_months)?;
        let mut state = GenerationState::new(self.terms)?;
        let mut entries = Vec::with_capacity(term_months as usize);

        for month in 1..=term_months {
            let mut carried = Vec::new();
            let mut entry = state.next_entry(month, &book, &mut carried)?;

            for (source, rule) in carried {
                book.queue(source, rule);
            }
            for ignored in book.commit() {
                warn!(
                    "overpayment of {} carried from month {} ignored because the loan term ended",
                    ignored.rule.value, month
                );
                state.events.emit(Event::CarryForwardIgnored {
                    source_rule: ignored.source,
                    month,
                    value: ignored.rule.value,
                });
            }

            if month == term_months && entry.remaining_balance.is_positive() {
                // rounding residue is due at maturity
                let residue = entry.remaining_balance;
                debug!("month {}: settling rounding residue {}", month, residue);
                state.events.emit(Event::ResidueSettled {
                    month,
                    amount: residue,
                });
                entry.payment += residue;
                entry.capital += residue;
                entry.payment_overpayment = entry.payment + entry.overpayment;
                entry.remaining_balance = Money::ZERO;
            }

            trace!(
                "month {}: payment {}, interest {}, capital {}, overpayment {}, balance {}",
                entry.month,
                entry.payment,
                entry.interest,
                entry.capital,
                entry.overpayment,
                entry.remaining_balance
            );

            let remaining_balance = entry.remaining_balance;
            let final_payment = entry.payment_overpayment;
            entries.push(entry);
            state.remaining_term = state.remaining_term.saturating_sub(1);
            state.remaining_balance = remaining_balance;

            if !remaining_balance.is_positive() {
                info!("loan fully repaid in month {}", month);
                state.events.emit(Event::LoanRepaid { month, final_payment });
                break;
            }
        }

        Ok(Schedule::new(term_months, entries, state.events.take_events()))
    }
}

/// mutable simulation state of one generation run
struct GenerationState {
    monthly_rate: Rate,
    term_months: u32,
    /// basis of the monthly payment, lowered by every applied overpayment
    saldo: Money,
    /// basis lowered only by term-shortening rules
    const_saldo: Money,
    const_payment: Money,
    /// recurring overpayment carried into following months
    monthly_overpayment: Money,
    /// recurring overpayment in effect before each running RANGE rule started
    range_snapshots: HashMap<RuleId, Money>,
    remaining_balance: Money,
    remaining_term: u32,
    events: EventStore,
}

impl GenerationState {
    fn new(terms: &LoanTerms) -> Result<Self> {
        let monthly_rate = terms.monthly_rate();
        let principal = terms.principal;

        Ok(Self {
            monthly_rate,
            term_months: terms.term_months,
            saldo: principal,
            const_saldo: principal,
            const_payment: annuity::payment(principal, monthly_rate, terms.term_months)?,
            monthly_overpayment: Money::ZERO,
            range_snapshots: HashMap::new(),
            remaining_balance: principal,
            remaining_term: terms.term_months,
            events: EventStore::new(),
        })
    }

    /// annuity payment on `basis` over the original term
    fn payment_on(&self, basis: Money) -> Result<Money> {
        annuity::payment(basis, self.monthly_rate, self.term_months)
    }

    /// build the entry for `month`, collecting carry-forward rules into `carried`
    fn next_entry(
        &mut self,
        month: u32,
        book: &RuleBook,
        carried: &mut Vec<(RuleId, OverpaymentRule)>,
    ) -> Result<ScheduleEntry> {
        let payment = self.payment_on(self.saldo)?;
        let interest = annuity::monthly_interest(self.remaining_balance, self.monthly_rate);
        let capital = payment - interest;
        let balance = self.remaining_balance;

        if balance <= capital {
            // scheduled payment clears the loan
            return Ok(ScheduleEntry::new(
                month,
                interest + balance,
                interest,
                balance,
                Money::ZERO,
                Money::ZERO,
                self.remaining_term,
            ));
        }

        let mut entry = ScheduleEntry::new(
            month,
            payment,
            interest,
            capital,
            Money::ZERO,
            balance - capital,
            self.remaining_term,
        );

        if balance <= capital + self.monthly_overpayment {
            // recurring overpayment alone clears the loan
            entry.add_overpayment(balance - capital, Money::ZERO);
            return Ok(entry);
        }

        // balance before capital, less overpayments applied so far this month
        let mut outstanding = balance;

        for rule in book.active(month) {
            if outstanding <= capital + self.monthly_overpayment + rule.value {
                let last = outstanding - capital;
                entry.add_overpayment(last, Money::ZERO);
                self.events.emit(Event::OverpaymentApplied {
                    rule_id: rule.id,
                    month,
                    amount: last,
                    keep_payment_constant: rule.keep_payment_constant,
                });
                debug!("month {}: final overpayment {} clears the loan", month, last);
                break;
            }

            let full_overpayment = rule.value + self.monthly_overpayment;
            self.saldo -= full_overpayment;

            if rule.keep_payment_constant {
                self.apply_constant_payment(rule, month, book, carried)?;
            } else {
                self.apply_term_shortening(rule, month)?;
            }

            outstanding -= full_overpayment;
            entry.add_overpayment(full_overpayment, outstanding - capital);

            self.events.emit(Event::OverpaymentApplied {
                rule_id: rule.id,
                month,
                amount: full_overpayment,
                keep_payment_constant: rule.keep_payment_constant,
            });
            debug!(
                "month {}: applied overpayment {} ({})",
                month, full_overpayment, rule
            );
        }

        Ok(entry)
    }

    /// lower future payments after a constant-payment overpayment
    fn apply_constant_payment(
        &mut self,
        rule: &OverpaymentRule,
        month: u32,
        book: &RuleBook,
        carried: &mut Vec<(RuleId, OverpaymentRule)>,
    ) -> Result<()> {
        let new_payment = self.payment_on(self.saldo)?;

        let carry_from = if rule.kind == OverpaymentKind::OneTime {
            Some(rule.start_month + 1)
        } else if rule.ends_in(month) {
            let restored = self
                .range_snapshots
                .remove(&rule.id)
                .unwrap_or(self.monthly_overpayment);
            self.set_monthly_overpayment(month, restored);
            Some(rule.end_month + 1)
        } else {
            None
        };

        match carry_from {
            Some(start_month) => {
                let delta = self.const_payment - new_payment;
                self.recalculate(month, PaymentBasis::Saldo, new_payment);

                let carry = book.carry_forward(rule, month, start_month, delta);
                self.events.emit(Event::CarryForwardScheduled {
                    source_rule: rule.id,
                    rule_id: carry.id,
                    month,
                    start_month,
                    value: delta,
                });
                debug!(
                    "month {}: carrying payment reduction {} forward from month {}",
                    month, delta, start_month
                );
                carried.push((rule.id, carry));
            }
            None => {
                if rule.starts_in(month) {
                    self.range_snapshots.insert(rule.id, self.monthly_overpayment);
                }
                let delta = self.const_payment - new_payment;
                self.set_monthly_overpayment(month, delta);
            }
        }
        Ok(())
    }

    /// shorten the term: only the term-shortening basis moves
    fn apply_term_shortening(&mut self, rule: &OverpaymentRule, month: u32) -> Result<()> {
        self.const_saldo -= rule.value;
        let new_payment = self.payment_on(self.const_saldo)?;
        self.recalculate(month, PaymentBasis::ConstSaldo, new_payment);
        Ok(())
    }

    fn recalculate(&mut self, month: u32, basis: PaymentBasis, new_payment: Money) {
        self.events.emit(Event::PaymentRecalculated {
            month,
            basis,
            old_payment: self.const_payment,
            new_payment,
        });
        self.const_payment = new_payment;
    }

    fn set_monthly_overpayment(&mut self, month: u32, value: Money) {
        if value != self.monthly_overpayment {
            self.events.emit(Event::RecurringOverpaymentChanged {
                month,
                old_value: self.monthly_overpayment,
                new_value: value,
            });
        }
        self.monthly_overpayment = value;
    }
}
