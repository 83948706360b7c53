pub mod book;
pub mod rule;
pub mod rule_set;

pub use book::{QueuedRule, RuleBook};
pub use rule::OverpaymentRule;
pub use rule_set::RuleSet;
