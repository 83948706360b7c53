use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::overpayment::{OverpaymentRule, RuleSet};
use crate::scenario::Scenario;
use crate::schedule::annuity;
use crate::types::OverpaymentKind;

/// rule set name of the fixed overpayment value analysis
pub const CONSTANT_VALUE_ANALYSIS: &str = "Overpayment with constant overpayment value";
/// rule set name of the constant payment analysis
pub const CONSTANT_PAYMENT_ANALYSIS: &str = "Overpayment with constant monthly payment value";

/// fixed-rate, fixed-term loan terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
}

impl LoanTerms {
    /// create validated loan terms
    pub fn new(principal: Money, annual_rate: Rate, term_months: u32) -> Result<Self> {
        let terms = Self {
            principal,
            annual_rate,
            term_months,
        };
        terms.validate()?;
        Ok(terms)
    }

    pub fn builder() -> LoanTermsBuilder {
        LoanTermsBuilder::new()
    }

    /// check terms, used again after deserialization
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(LoanError::InvalidPrincipal {
                principal: self.principal,
            });
        }
        if self.annual_rate.is_negative() {
            return Err(LoanError::InvalidInterestRate {
                rate: self.annual_rate,
            });
        }
        if self.term_months == 0 {
            return Err(LoanError::InvalidTerm {
                months: self.term_months,
            });
        }
        annuity::payment(self.principal, self.monthly_rate(), self.term_months)?;
        Ok(())
    }

    /// monthly rate as used by the annuity recurrence
    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoanTermsBuilder {
    amount: Option<Money>,
    rate: Option<Rate>,
    term_months: Option<u32>,
}

impl LoanTermsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn build(self) -> Result<LoanTerms> {
        let principal = self.amount.ok_or(LoanError::InvalidConfiguration {
            message: "loan amount is required".to_string(),
        })?;
        let term_months = self.term_months.ok_or(LoanError::InvalidConfiguration {
            message: "term in months is required".to_string(),
        })?;

        LoanTerms::new(principal, self.rate.unwrap_or(Rate::ZERO), term_months)
    }
}

/// raw overpayment rule as entered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub kind: OverpaymentKind,
    #[serde(default = "first_month")]
    pub start_month: u32,
    #[serde(default)]
    pub end_month: Option<u32>,
    pub value: Money,
    #[serde(default)]
    pub keep_payment_constant: bool,
}

fn first_month() -> u32 {
    1
}

impl RuleConfig {
    pub fn to_rule(&self, term_months: u32) -> Result<OverpaymentRule> {
        OverpaymentRule::new(
            self.kind,
            self.start_month,
            self.end_month,
            self.value,
            self.keep_payment_constant,
            term_months,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSetConfig {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// a full what-if run: one loan, several named rule sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub loan: LoanTerms,
    #[serde(default = "include_baseline")]
    pub include_baseline: bool,
    /// adds the constant value and constant payment FULL_TERM analyses
    #[serde(default)]
    pub constant_overpayment_analysis: Option<Money>,
    #[serde(default)]
    pub rule_sets: Vec<RuleSetConfig>,
}

fn include_baseline() -> bool {
    true
}

impl ScenarioConfig {
    pub fn new(loan: LoanTerms) -> Self {
        Self {
            loan,
            include_baseline: true,
            constant_overpayment_analysis: None,
            rule_sets: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// validate rules against the loan and build a runnable scenario
    pub fn into_scenario(self) -> Result<Scenario> {
        self.loan.validate()?;
        let term = self.loan.term_months;

        let mut scenario = Scenario::new(self.loan).include_baseline(self.include_baseline);

        if let Some(value) = self.constant_overpayment_analysis {
            if !value.is_positive() {
                return Err(LoanError::InvalidOverpaymentValue { value });
            }
            for (name, keep_payment_constant) in [
                (CONSTANT_VALUE_ANALYSIS, false),
                (CONSTANT_PAYMENT_ANALYSIS, true),
            ] {
                let rule = OverpaymentRule::full_term(value, keep_payment_constant, term)?;
                scenario = scenario.rule_set(RuleSet::with_rules(name, vec![rule]));
            }
        }

        for set in &self.rule_sets {
            let rules = set
                .rules
                .iter()
                .map(|rule| rule.to_rule(term))
                .collect::<Result<Vec<_>>>()?;
            scenario = scenario.rule_set(RuleSet::with_rules(set.name.clone(), rules));
        }

        Ok(scenario)
    }
}
