/// what-if - compare rule sets against the plain schedule
use loan_overpayment_rs::{LoanTerms, Money, OverpaymentRule, Rate, RuleSet, Scenario};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let terms = LoanTerms::new(Money::from_major(400_000), Rate::from_bps(758), 300)?;
    let term = terms.term_months;

    let mut mixed = RuleSet::new("Bonus and yearly range");
    mixed
        .add(OverpaymentRule::one_time(12, Money::from_major(20_000), true, term)?)
        .add(OverpaymentRule::range(13, 72, Money::from_major(1_000), true, term)?);

    let results = Scenario::new(terms)
        .rule_set(RuleSet::with_rules(
            "Fixed 1,000 monthly",
            vec![OverpaymentRule::full_term(Money::from_major(1_000), false, term)?],
        ))
        .rule_set(RuleSet::with_rules(
            "Constant payment plus 1,000",
            vec![OverpaymentRule::full_term(Money::from_major(1_000), true, term)?],
        ))
        .rule_set(mixed)
        .run()?;

    for outcome in &results {
        println!("== {} ==", outcome.name);
        println!("{}", outcome.summary);
        println!();
    }

    for (name, saved) in results.comparisons() {
        println!(
            "{}: {} less interest, {} months sooner",
            name, saved.interest_saved, saved.months_saved
        );
    }

    Ok(())
}
