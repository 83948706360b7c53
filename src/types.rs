use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// unique identifier for an overpayment rule
pub type RuleId = Uuid;

/// how an overpayment rule spreads over the loan term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverpaymentKind {
    /// single extra payment in one month
    OneTime,
    /// extra payment every month of an inclusive month range
    Range,
    /// extra payment every month from the first to the last
    FullTerm,
}

impl fmt::Display for OverpaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OverpaymentKind::OneTime => "ONE_TIME",
            OverpaymentKind::Range => "RANGE",
            OverpaymentKind::FullTerm => "FULL_TERM",
        };
        f.write_str(name)
    }
}

/// principal basis a payment recalculation was made against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentBasis {
    /// basis lowered by constant-payment rules, drives the monthly payment
    Saldo,
    /// basis lowered by term-shortening rules
    ConstSaldo,
}
