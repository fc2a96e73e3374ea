//! Run orchestration, console summary and the report file.
mod orchestrator;
mod output;
mod runner;
mod summary;


pub use orchestrator::{Orchestrator, RunResults, RunStatus};
pub use output::{confirm_overwrite, write_report};
pub use runner::run_local;
pub use summary::{print_summary, summary_lines};
