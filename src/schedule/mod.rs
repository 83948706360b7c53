pub mod annuity;
pub mod entry;
pub mod generator;
pub mod summary;

pub use entry::{Schedule, ScheduleEntry};
pub use generator::{generate_schedule, ScheduleGenerator};
pub use summary::{summarize, LoanSummary, SummaryComparison};
