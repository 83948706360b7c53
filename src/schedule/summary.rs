use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

use super::Schedule;

/// totals of one generated schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub loan_amount: Money,
    pub total_interest: Money,
    pub total_loan_cost: Money,
    pub total_overpayment: Money,
    pub last_month: u32,
    pub years: u32,
    pub rest_months: u32,
}

impl LoanSummary {
    /// reduce a schedule to its totals
    pub fn from_schedule(schedule: &Schedule) -> Result<Self> {
        let first = schedule.first().ok_or(LoanError::EmptySchedule)?;
        let last = schedule.last().ok_or(LoanError::EmptySchedule)?;

        // first month's split recovers the original principal
        let loan_amount = first.capital + first.overpayment + first.remaining_balance;
        let total_interest = schedule.total_interest();
        let last_month = last.month;

        Ok(Self {
            loan_amount,
            total_interest,
            total_loan_cost: loan_amount + total_interest,
            total_overpayment: schedule.total_overpayment(),
            last_month,
            years: last_month / 12,
            rest_months: last_month % 12,
        })
    }

    /// savings of this summary over `baseline`
    pub fn compare(&self, baseline: &LoanSummary) -> SummaryComparison {
        SummaryComparison {
            interest_saved: baseline.total_interest - self.total_interest,
            cost_saved: baseline.total_loan_cost - self.total_loan_cost,
            months_saved: baseline.last_month as i64 - self.last_month as i64,
        }
    }
}

/// reduce a schedule to its totals
pub fn summarize(schedule: &Schedule) -> Result<LoanSummary> {
    LoanSummary::from_schedule(schedule)
}

impl fmt::Display for LoanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loan amount: {}", self.loan_amount)?;
        writeln!(f, "Total interest: {}", self.total_interest)?;
        writeln!(f, "Total loan cost: {}", self.total_loan_cost)?;
        write!(
            f,
            "Last month: {} ({} years and {} months)",
            self.last_month, self.years, self.rest_months
        )
    }
}

/// difference between a scenario and the baseline, positive when cheaper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryComparison {
    pub interest_saved: Money,
    pub cost_saved: Money,
    pub months_saved: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoanTerms;
    use crate::decimal::Rate;
    use crate::overpayment::OverpaymentRule;
    use crate::schedule::{ScheduleGenerator, ScheduleEntry};

    fn money(s: &str) -> Money {
        s.parse().unwrap()
    }

    fn assert_near(actual: Money, expected: &str, tolerance: &str) {
        assert!(
            (actual - money(expected)).abs() <= money(tolerance),
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_summary_without_overpayment() {
        let terms = LoanTerms::new(Money::from_major(30_000), Rate::from_percentage(5), 60).unwrap();
        let schedule = ScheduleGenerator::new(&terms).generate(&[]).unwrap();
        let summary = summarize(&schedule).unwrap();

        assert_eq!(summary.loan_amount, Money::from_major(30_000));
        assert_near(summary.total_interest, "3968.22", "0.10");
        assert_eq!(summary.total_loan_cost, summary.loan_amount + summary.total_interest);
        assert_eq!(summary.total_overpayment, Money::ZERO);
        assert_eq!((summary.last_month, summary.years, summary.rest_months), (60, 5, 0));
    }

    #[test]
    fn test_summary_with_one_time_overpayment() {
        let terms = LoanTerms::new(Money::from_major(30_000), Rate::from_percentage(5), 60).unwrap();
        let rule = OverpaymentRule::one_time(20, Money::from_major(5_000), false, 60).unwrap();
        let schedule = ScheduleGenerator::new(&terms).generate(&[rule]).unwrap();
        let summary = summarize(&schedule).unwrap();

        assert_eq!(summary.loan_amount, Money::from_major(30_000));
        assert_near(summary.total_interest, "3397.65", "0.10");
        assert_eq!((summary.last_month, summary.years, summary.rest_months), (57, 4, 9));
        assert_eq!(
            summary.to_string().lines().last(),
            Some("Last month: 57 (4 years and 9 months)")
        );

        let baseline = summarize(&ScheduleGenerator::new(&terms).generate(&[]).unwrap()).unwrap();
        let comparison = summary.compare(&baseline);
        assert_eq!(comparison.months_saved, 3);
        assert!(comparison.interest_saved.is_positive());
        assert_eq!(comparison.cost_saved, comparison.interest_saved);
    }

    #[test]
    fn test_loan_amount_recovered_from_first_month_overpayment() {
        let terms = LoanTerms::new(Money::from_major(30_000), Rate::from_percentage(5), 60).unwrap();
        let rule = OverpaymentRule::full_term(Money::from_major(300), true, 60).unwrap();
        let schedule = ScheduleGenerator::new(&terms).generate(&[rule]).unwrap();
        let summary = LoanSummary::from_schedule(&schedule).unwrap();

        assert_eq!(summary.loan_amount, Money::from_major(30_000));
        assert_eq!(summary.last_month, 38);
        assert_eq!((summary.years, summary.rest_months), (3, 2));
    }

    #[test]
    fn test_single_month_schedule() {
        let schedule = Schedule::new(
            1,
            vec![ScheduleEntry::new(
                1,
                money("1010.00"),
                money("10.00"),
                money("1000.00"),
                Money::ZERO,
                Money::ZERO,
                1,
            )],
            Vec::new(),
        );
        let summary = summarize(&schedule).unwrap();
        assert_eq!(summary.loan_amount, money("1000.00"));
        assert_eq!(summary.total_loan_cost, money("1010.00"));
        assert_eq!((summary.years, summary.rest_months), (0, 1));
    }

    #[test]
    fn test_empty_schedule_rejected() {
        let schedule = Schedule::new(12, Vec::new(), Vec::new());
        assert_eq!(summarize(&schedule), Err(LoanError::EmptySchedule));
    }
}
