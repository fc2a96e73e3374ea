use tracing::{error, info};

use crate::config::RunConfig;
use crate::error::{AppResult, ReportError};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel, wait_for_shutdown};

use super::orchestrator::{Orchestrator, RunResults, RunStatus};
use super::output::write_report;
use super::summary::print_summary;

const INTERRUPT_MESSAGE: &str = "Exiting on interrupt...";

/// Runs one load test: fan out, wait, summarize, then write the report.
///
/// The interrupt listener stays armed until the report is written, so Ctrl+C
/// during the overwrite prompt still ends the run without a report.
///
/// # Errors
///
/// Returns an error for invalid run settings, a failed client task, or a
/// declined overwrite of the report file. Failing to write the report is
/// logged but not returned.
pub async fn run_local(config: &RunConfig) -> AppResult<()> {
    let orchestrator = Orchestrator::new(config)?;
    info!(
        "Starting tests with {} clients and {} requests per client",
        config.clients, config.requests
    );

    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = match orchestrator.run(&mut shutdown_rx).await {
        Ok(RunStatus::Completed(results)) => {
            tokio::select! {
                finished = finish_run(config, &results) => finished,
                () = wait_for_shutdown(&mut shutdown_rx) => {
                    println!("{}", INTERRUPT_MESSAGE);
                    Ok(())
                }
            }
        }
        Ok(RunStatus::Interrupted) => {
            println!("{}", INTERRUPT_MESSAGE);
            Ok(())
        }
        Err(err) => Err(err),
    };

    signal_handle.abort();
    result
}

async fn finish_run(config: &RunConfig, results: &RunResults) -> AppResult<()> {
    print_summary(&results.report);

    if let Some(path) = config.output.as_deref() {
        match write_report(path, &results.bodies, config.overwrite).await {
            Ok(()) => info!("Wrote results to {}", path.display()),
            Err(err @ ReportError::OverwriteDeclined { .. }) => {
                error!("{}", err);
                return Err(err.into());
            }
            Err(err) => error!("{}", err),
        }
    }
    Ok(())
}
