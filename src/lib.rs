pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod overpayment;
pub mod scenario;
pub mod schedule;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::{LoanTerms, LoanTermsBuilder, RuleConfig, RuleSetConfig, ScenarioConfig};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use events::{Event, EventStore};
pub use overpayment::{OverpaymentRule, RuleBook, RuleSet};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioResults, BASELINE_NAME};
pub use schedule::{
    generate_schedule, summarize, LoanSummary, Schedule, ScheduleEntry, ScheduleGenerator,
    SummaryComparison,
};
pub use serialization::{ScenarioReport, ScheduleView, SummaryView};
pub use types::{OverpaymentKind, PaymentBasis, RuleId};

// re-export external dependencies that users will need
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
