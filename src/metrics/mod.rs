//! Outcome types and the channel that gathers them from every worker.
mod collector;
mod types;


pub use collector::{ResultCollector, ResultSink, Tally};
pub use types::{AggregateReport, CategorizedBodies, Outcome, OutcomeCategory};
