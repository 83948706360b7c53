use serde::{Deserialize, Serialize};
use std::fmt;

use super::OverpaymentRule;

/// named, ordered collection of overpayment rules, one what-if scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub name: String,
    rules: Vec<OverpaymentRule>,
}

impl RuleSet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn with_rules(name: impl Into<String>, rules: Vec<OverpaymentRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    /// append a rule, later rules apply after earlier ones within a month
    pub fn add(&mut self, rule: OverpaymentRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    /// remove the rule at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<OverpaymentRule> {
        if index < self.rules.len() {
            Some(self.rules.remove(index))
        } else {
            None
        }
    }

    pub fn rules(&self) -> &[OverpaymentRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: [", self.name)?;
        for (i, rule) in self.rules.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", rule)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Money;

    #[test]
    fn test_add_and_remove_keep_order() {
        let mut set = RuleSet::new("custom");
        let first = OverpaymentRule::one_time(5, Money::from_major(1_000), false, 60).unwrap();
        let second = OverpaymentRule::range(10, 20, Money::from_major(100), true, 60).unwrap();
        let third = OverpaymentRule::full_term(Money::from_major(50), false, 60).unwrap();

        set.add(first.clone()).add(second.clone()).add(third.clone());
        assert_eq!(set.len(), 3);

        let removed = set.remove(1).unwrap();
        assert_eq!(removed, second);
        assert_eq!(set.rules(), &[first, third]);
        assert!(set.remove(5).is_none());
    }

    #[test]
    fn test_display_lists_rules() {
        let set = RuleSet::with_rules(
            "bonus",
            vec![OverpaymentRule::one_time(12, Money::from_major(2_000), true, 60).unwrap()],
        );
        assert_eq!(
            set.to_string(),
            "bonus: [ONE_TIME, month 12, 2000.00, keep payment constant: true]"
        );
        assert!(RuleSet::new("empty").is_empty());
    }
}
