use thiserror::Error;

use crate::decimal::{Money, Rate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid principal: {principal} must be positive")]
    InvalidPrincipal {
        principal: Money,
    },

    #[error("invalid interest rate: {rate}")]
    InvalidInterestRate {
        rate: Rate,
    },

    #[error("invalid term: {months} months")]
    InvalidTerm {
        months: u32,
    },

    #[error("invalid overpayment range: months {start}-{end} for a {term} month term")]
    InvalidOverpaymentRange {
        start: u32,
        end: u32,
        term: u32,
    },

    #[error("invalid overpayment value: {value}")]
    InvalidOverpaymentValue {
        value: Money,
    },

    #[error("payment on {principal} over {months} months is out of range")]
    PaymentOverflow {
        principal: Money,
        months: u32,
    },

    #[error("duplicate rule set name: {name}")]
    DuplicateRuleSet {
        name: String,
    },

    #[error("rule set not found: {name}")]
    RuleSetNotFound {
        name: String,
    },

    #[error("schedule has no entries")]
    EmptySchedule,

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("serialization error: {message}")]
    Serialization {
        message: String,
    },
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::Serialization {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
