use log::info;
use std::collections::HashSet;

use crate::config::LoanTerms;
use crate::errors::{LoanError, Result};
use crate::overpayment::{OverpaymentRule, RuleSet};
use crate::schedule::{LoanSummary, Schedule, ScheduleGenerator, SummaryComparison};

/// name of the rule-free run every scenario is compared against
pub const BASELINE_NAME: &str = "No overpayment";

/// one loan evaluated under several named rule sets
#[derive(Debug, Clone)]
pub struct Scenario {
    terms: LoanTerms,
    rule_sets: Vec<RuleSet>,
    include_baseline: bool,
}

impl Scenario {
    pub fn new(terms: LoanTerms) -> Self {
        Self {
            terms,
            rule_sets: Vec::new(),
            include_baseline: true,
        }
    }

    /// whether `run` prepends the rule-free baseline
    pub fn include_baseline(mut self, include: bool) -> Self {
        self.include_baseline = include;
        self
    }

    pub fn rule_set(mut self, rule_set: RuleSet) -> Self {
        self.rule_sets.push(rule_set);
        self
    }

    pub fn rule_sets(&self) -> &[RuleSet] {
        &self.rule_sets
    }

    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    /// generate and summarize every rule set independently
    pub fn run(&self) -> Result<ScenarioResults> {
        let mut names = HashSet::with_capacity(self.rule_sets.len() + 1);
        if self.include_baseline {
            names.insert(BASELINE_NAME);
        }
        for set in &self.rule_sets {
            if !names.insert(set.name.as_str()) {
                return Err(LoanError::DuplicateRuleSet {
                    name: set.name.clone(),
                });
            }
        }

        let generator = ScheduleGenerator::new(&self.terms);
        let mut outcomes = Vec::with_capacity(names.len());

        if self.include_baseline {
            outcomes.push(ScenarioOutcome::generate(&generator, BASELINE_NAME, &[])?);
        }
        for set in &self.rule_sets {
            outcomes.push(ScenarioOutcome::generate(&generator, &set.name, set.rules())?);
        }

        Ok(ScenarioResults {
            baseline: self.include_baseline,
            outcomes,
        })
    }
}

/// schedule and summary of one rule set
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub schedule: Schedule,
    pub summary: LoanSummary,
}

impl ScenarioOutcome {
    fn generate(
        generator: &ScheduleGenerator<'_>,
        name: &str,
        rules: &[OverpaymentRule],
    ) -> Result<Self> {
        info!("calculating schedule for {}", name);
        let schedule = generator.generate(rules)?;
        let summary = LoanSummary::from_schedule(&schedule)?;
        info!(
            "{}: last month {}, total interest {}",
            name, summary.last_month, summary.total_interest
        );
        Ok(Self {
            name: name.to_string(),
            schedule,
            summary,
        })
    }
}

/// outcomes in run order, baseline first when included
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResults {
    baseline: bool,
    outcomes: Vec<ScenarioOutcome>,
}

impl ScenarioResults {
    pub fn outcomes(&self) -> &[ScenarioOutcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScenarioOutcome> {
        self.outcomes.iter()
    }

    pub fn get(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    /// like `get`, failing when no rule set has that name
    pub fn outcome(&self, name: &str) -> Result<&ScenarioOutcome> {
        self.get(name).ok_or_else(|| LoanError::RuleSetNotFound {
            name: name.to_string(),
        })
    }

    pub fn baseline(&self) -> Option<&ScenarioOutcome> {
        if self.baseline {
            self.outcomes.first()
        } else {
            None
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.outcomes.iter().map(|o| o.name.as_str()).collect()
    }

    /// savings of each rule set over the baseline; empty without one
    pub fn comparisons(&self) -> Vec<(&str, SummaryComparison)> {
        let Some(baseline) = self.baseline() else {
            return Vec::new();
        };
        self.outcomes
            .iter()
            .skip(1)
            .map(|o| (o.name.as_str(), o.summary.compare(&baseline.summary)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl<'a> IntoIterator for &'a ScenarioResults {
    type Item = &'a ScenarioOutcome;
    type IntoIter = std::slice::Iter<'a, ScenarioOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::{Money, Rate};
    use test_log::test;

    fn terms() -> LoanTerms {
        LoanTerms::new(Money::from_major(30_000), Rate::from_percentage(5), 60).unwrap()
    }

    fn one_time(keep: bool) -> RuleSet {
        let name = if keep { "one time, constant" } else { "one time" };
        RuleSet::with_rules(
            name,
            vec![OverpaymentRule::one_time(20, Money::from_major(5_000), keep, 60).unwrap()],
        )
    }

    #[test]
    fn test_run_with_baseline() {
        let results = Scenario::new(terms())
            .rule_set(one_time(false))
            .rule_set(one_time(true))
            .run()
            .unwrap();

        assert_eq!(results.names(), vec![BASELINE_NAME, "one time", "one time, constant"]);
        assert_eq!(results.baseline().unwrap().summary.last_month, 60);
        assert_eq!(results.get("one time").unwrap().summary.last_month, 57);
        assert_eq!(results.get("one time, constant").unwrap().summary.last_month, 50);

        let comparisons = results.comparisons();
        assert_eq!(comparisons.len(), 2);
        assert_eq!(comparisons[0].0, "one time");
        assert_eq!(comparisons[0].1.months_saved, 3);
        assert_eq!(comparisons[1].1.months_saved, 10);
        assert!(comparisons[1].1.interest_saved > comparisons[0].1.interest_saved);
    }

    #[test]
    fn test_run_without_baseline() {
        let results = Scenario::new(terms())
            .include_baseline(false)
            .rule_set(one_time(true))
            .run()
            .unwrap();

        assert_eq!(results.len(), 1);
        assert!(results.baseline().is_none());
        assert!(results.comparisons().is_empty());
        assert!(results.get(BASELINE_NAME).is_none());
        assert_eq!(
            results.outcome(BASELINE_NAME),
            Err(LoanError::RuleSetNotFound {
                name: BASELINE_NAME.to_string()
            })
        );
        assert_eq!(results.outcome("one time, constant").unwrap().summary.last_month, 50);
    }

    #[test]
    fn test_rule_sets_run_independently() {
        let shared = one_time(true);
        let results = Scenario::new(terms())
            .rule_set(RuleSet::with_rules("first", shared.rules().to_vec()))
            .rule_set(RuleSet::with_rules("second", shared.rules().to_vec()))
            .run()
            .unwrap();

        assert_eq!(results.get("first").unwrap().schedule, results.get("second").unwrap().schedule);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = Scenario::new(terms())
            .rule_set(one_time(false))
            .rule_set(one_time(false))
            .run()
            .unwrap_err();
        assert_eq!(
            err,
            LoanError::DuplicateRuleSet {
                name: "one time".to_string()
            }
        );

        let clash = Scenario::new(terms()).rule_set(RuleSet::new(BASELINE_NAME)).run();
        assert!(matches!(clash, Err(LoanError::DuplicateRuleSet { .. })));

        // without a baseline the name is free
        let free = Scenario::new(terms())
            .include_baseline(false)
            .rule_set(RuleSet::new(BASELINE_NAME))
            .run()
            .unwrap();
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn test_empty_rule_set_matches_baseline() {
        let results = Scenario::new(terms()).rule_set(RuleSet::new("nothing")).run().unwrap();
        let baseline = results.baseline().unwrap();
        let nothing = results.get("nothing").unwrap();
        assert_eq!(baseline.summary, nothing.summary);
        assert_eq!(results.comparisons()[0].1.months_saved, 0);
        assert_eq!((&results).into_iter().count(), 2);
    }
}
