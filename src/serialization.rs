/// serialization support for schedules and scenario results
use serde::{Deserialize, Serialize};

use crate::config::LoanTerms;
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::scenario::{ScenarioOutcome, ScenarioResults};
use crate::schedule::{LoanSummary, Schedule, ScheduleEntry, SummaryComparison};

/// serializable view of a generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub term_months: u32,
    pub months_paid: u32,
    pub repaid: bool,
    pub totals: TotalsView,
    pub entries: Vec<ScheduleEntry>,
    /// carry-forward overpayments that started past the term
    pub ignored_carry_forwards: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsView {
    pub interest: Money,
    pub overpayment: Money,
    pub paid: Money,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        ScheduleView {
            term_months: schedule.term_months,
            months_paid: schedule.len() as u32,
            repaid: schedule.is_repaid(),
            totals: TotalsView {
                interest: schedule.total_interest(),
                overpayment: schedule.total_overpayment(),
                paid: schedule.total_paid(),
            },
            entries: schedule.entries.clone(),
            ignored_carry_forwards: schedule.ignored_carry_forwards().len(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// summary of one rule set, with its savings over the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub name: String,
    pub summary: LoanSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub savings: Option<SummaryComparison>,
}

impl SummaryView {
    pub fn from_outcome(outcome: &ScenarioOutcome, baseline: Option<&LoanSummary>) -> Self {
        SummaryView {
            name: outcome.name.clone(),
            summary: outcome.summary.clone(),
            savings: baseline.map(|b| outcome.summary.compare(b)),
        }
    }
}

/// report of a whole scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub summaries: Vec<SummaryView>,
    /// full schedules, only when requested
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schedules: Vec<ScheduleView>,
}

impl ScenarioReport {
    /// summaries only
    pub fn new(terms: &LoanTerms, results: &ScenarioResults) -> Self {
        let baseline = results.baseline().map(|b| &b.summary);
        let summaries = results
            .iter()
            .enumerate()
            .map(|(index, outcome)| {
                // the baseline runs first and has nothing to save against itself
                let against = baseline.filter(|_| index > 0);
                SummaryView::from_outcome(outcome, against)
            })
            .collect();

        ScenarioReport {
            principal: terms.principal,
            annual_rate: terms.annual_rate,
            term_months: terms.term_months,
            summaries,
            schedules: Vec::new(),
        }
    }

    /// summaries plus every schedule, in run order
    pub fn with_schedules(terms: &LoanTerms, results: &ScenarioResults) -> Self {
        let mut report = Self::new(terms, results);
        report.schedules = results
            .iter()
            .map(|outcome| ScheduleView::from_schedule(&outcome.schedule))
            .collect();
        report
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// compact json of any serializable value
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
