use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};
use crate::types::{OverpaymentKind, RuleId};

/// one extra-payment policy over an inclusive, 1-based month range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverpaymentRule {
    pub id: RuleId,
    pub kind: OverpaymentKind,
    pub start_month: u32,
    pub end_month: u32,
    pub value: Money,
    /// true lowers later required payments, false shortens the term
    pub keep_payment_constant: bool,
}

impl OverpaymentRule {
    /// create a validated rule for a loan of `term_months`
    ///
    /// ONE_TIME rules end where they start, a RANGE without an end covers only
    /// its start month and FULL_TERM always spans `[1, term_months]`. The end
    /// month is clamped to the term.
    pub fn new(
        kind: OverpaymentKind,
        start_month: u32,
        end_month: Option<u32>,
        value: Money,
        keep_payment_constant: bool,
        term_months: u32,
    ) -> Result<Self> {
        if term_months == 0 {
            return Err(LoanError::InvalidTerm { months: term_months });
        }

        let (start, end) = match kind {
            OverpaymentKind::OneTime => (start_month, start_month),
            OverpaymentKind::Range => (start_month, end_month.unwrap_or(start_month)),
            OverpaymentKind::FullTerm => (1, term_months),
        };
        let end = end.min(term_months);

        if start == 0 || start > term_months || start > end {
            return Err(LoanError::InvalidOverpaymentRange {
                start,
                end,
                term: term_months,
            });
        }

        if value.is_negative() {
            return Err(LoanError::InvalidOverpaymentValue { value });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            start_month: start,
            end_month: end,
            value,
            keep_payment_constant,
        })
    }

    /// single overpayment in `month`
    pub fn one_time(month: u32, value: Money, keep_payment_constant: bool, term_months: u32) -> Result<Self> {
        Self::new(OverpaymentKind::OneTime, month, None, value, keep_payment_constant, term_months)
    }

    /// monthly overpayment from `start_month` to `end_month` inclusive
    pub fn range(
        start_month: u32,
        end_month: u32,
        value: Money,
        keep_payment_constant: bool,
        term_months: u32,
    ) -> Result<Self> {
        Self::new(
            OverpaymentKind::Range,
            start_month,
            Some(end_month),
            value,
            keep_payment_constant,
            term_months,
        )
    }

    /// monthly overpayment for the whole loan
    pub fn full_term(value: Money, keep_payment_constant: bool, term_months: u32) -> Result<Self> {
        Self::new(OverpaymentKind::FullTerm, 1, None, value, keep_payment_constant, term_months)
    }

    /// carry-forward rule created by the generator, never validated by callers
    pub(crate) fn carry_forward(id: RuleId, start_month: u32, term_months: u32, value: Money) -> Self {
        Self {
            id,
            kind: OverpaymentKind::Range,
            start_month,
            end_month: term_months,
            value,
            keep_payment_constant: true,
        }
    }

    pub fn is_active(&self, month: u32) -> bool {
        self.start_month <= month && month <= self.end_month
    }

    /// true for a RANGE rule in its last month
    pub fn ends_in(&self, month: u32) -> bool {
        self.kind == OverpaymentKind::Range && self.end_month == month
    }

    /// true for a RANGE rule in its first month
    pub fn starts_in(&self, month: u32) -> bool {
        self.kind == OverpaymentKind::Range && self.start_month == month
    }

    /// number of months the rule covers
    pub fn months(&self) -> u32 {
        self.end_month - self.start_month + 1
    }
}

impl fmt::Display for OverpaymentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            OverpaymentKind::OneTime => write!(
                f,
                "{}, month {}, {}, keep payment constant: {}",
                self.kind, self.start_month, self.value, self.keep_payment_constant
            ),
            _ => write!(
                f,
                "{}, months {}-{}, {}, keep payment constant: {}",
                self.kind, self.start_month, self.end_month, self.value, self.keep_payment_constant
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_time_ends_where_it_starts() {
        let rule = OverpaymentRule::new(
            OverpaymentKind::OneTime,
            20,
            Some(45),
            Money::from_major(5_000),
            false,
            60,
        )
        .unwrap();

        assert_eq!(rule.start_month, 20);
        assert_eq!(rule.end_month, 20);
        assert!(rule.is_active(20));
        assert!(!rule.is_active(21));
        assert!(!rule.ends_in(20));
    }

    #[test]
    fn test_range_end_clamped_to_term() {
        let rule = OverpaymentRule::range(10, 400, Money::from_major(300), true, 60).unwrap();
        assert_eq!(rule.end_month, 60);
        assert_eq!(rule.months(), 51);
        assert!(rule.starts_in(10));
        assert!(rule.ends_in(60));
    }

    #[test]
    fn test_range_without_end_covers_start_month() {
        let rule = OverpaymentRule::new(OverpaymentKind::Range, 7, None, Money::from_major(100), true, 60).unwrap();
        assert_eq!((rule.start_month, rule.end_month), (7, 7));
    }

    #[test]
    fn test_full_term_spans_loan() {
        let rule = OverpaymentRule::full_term(Money::from_major(300), false, 60).unwrap();
        assert_eq!((rule.start_month, rule.end_month), (1, 60));
        assert_eq!(rule.kind, OverpaymentKind::FullTerm);
        assert!(!rule.ends_in(60));
    }

    #[test]
    fn test_invalid_ranges_rejected() {
        let value = Money::from_major(100);
        assert!(matches!(
            OverpaymentRule::range(30, 10, value, false, 60),
            Err(LoanError::InvalidOverpaymentRange { start: 30, end: 10, term: 60 })
        ));
        assert!(OverpaymentRule::one_time(0, value, false, 60).is_err());
        assert!(OverpaymentRule::one_time(61, value, false, 60).is_err());
        assert!(matches!(
            OverpaymentRule::full_term(value, false, 0),
            Err(LoanError::InvalidTerm { months: 0 })
        ));
    }

    #[test]
    fn test_negative_value_rejected() {
        let result = OverpaymentRule::one_time(5, Money::from_major(-1), true, 60);
        assert!(matches!(result, Err(LoanError::InvalidOverpaymentValue { .. })));
    }

    #[test]
    fn test_rules_get_distinct_ids() {
        let a = OverpaymentRule::one_time(5, Money::from_major(10), true, 60).unwrap();
        let b = OverpaymentRule::one_time(5, Money::from_major(10), true, 60).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_display() {
        let one = OverpaymentRule::one_time(20, Money::from_major(5_000), false, 60).unwrap();
        assert_eq!(one.to_string(), "ONE_TIME, month 20, 5000.00, keep payment constant: false");

        let range = OverpaymentRule::range(10, 30, Money::from_major(300), true, 60).unwrap();
        assert_eq!(range.to_string(), "RANGE, months 10-30, 300.00, keep payment constant: true");
    }
}
