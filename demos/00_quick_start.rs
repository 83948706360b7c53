/// quick start - one loan, one overpayment rule
use loan_overpayment_rs::{LoanTerms, Money, OverpaymentRule, Rate, ScheduleGenerator, summarize};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // a 30,000 loan at 5% over five years
    let terms = LoanTerms::builder()
        .amount(Money::from_major(30_000))
        .rate(Rate::from_percentage(5))
        .term_months(60)
        .build()?;

    // pay 5,000 extra in month 20 and keep the monthly payment unchanged
    let bonus = OverpaymentRule::one_time(20, Money::from_major(5_000), true, terms.term_months)?;

    let schedule = ScheduleGenerator::new(&terms).generate(&[bonus])?;
    for entry in &schedule {
        println!(
            "{:>3}  payment {:>8}  interest {:>7}  capital {:>8}  overpayment {:>8}  balance {:>9}",
            entry.month,
            entry.payment,
            entry.interest,
            entry.capital,
            entry.overpayment,
            entry.remaining_balance
        );
    }

    println!();
    println!("{}", summarize(&schedule)?);

    Ok(())
}
