/// json scenario - load a scenario, run it and print the report
use loan_overpayment_rs::{ScenarioConfig, ScenarioReport};

const SCENARIO: &str = r#"{
    "loan": { "principal": "30000", "annual_rate": "0.05", "term_months": 60 },
    "constant_overpayment_analysis": "300",
    "rule_sets": [
        {
            "name": "Bonus in month 20",
            "rules": [ { "kind": "ONE_TIME", "start_month": 20, "value": "5000", "keep_payment_constant": true } ]
        },
        {
            "name": "Extra 300 in months 10 to 30",
            "rules": [ { "kind": "RANGE", "start_month": 10, "end_month": 30, "value": "300" } ]
        }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // a path argument replaces the built-in scenario
    let json = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SCENARIO.to_string(),
    };

    let config = ScenarioConfig::from_json(&json)?;
    let terms = config.loan;
    let results = config.into_scenario()?.run()?;

    let report = ScenarioReport::new(&terms, &results);
    println!("{}", report.to_json_pretty()?);

    Ok(())
}
