use std::sync::Arc;

use reqwest::Client;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::config::RunConfig;
use crate::error::{AppResult, HttpError};
use crate::http::{RequestTemplate, run_worker};
use crate::metrics::{AggregateReport, CategorizedBodies, ResultCollector};
use crate::shutdown::{ShutdownReceiver, wait_for_shutdown};

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResults {
    pub report: AggregateReport,
    pub bodies: CategorizedBodies,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Completed(RunResults),
    /// A shutdown arrived before every client finished; nothing was aggregated.
    Interrupted,
}

/// Owns the shared client and template and fans the run out over the clients.
#[derive(Debug)]
pub struct Orchestrator {
    client: Client,
    template: Arc<RequestTemplate>,
    clients: usize,
    requests: u64,
    capacity: usize,
}

impl Orchestrator {
    /// Validates the run settings and prepares the shared client.
    ///
    /// Nothing is sent here; a request is only assembled once to surface
    /// template problems before any client starts.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid template, transport settings the client
    /// rejects, or a clients x requests product that does not fit the buffer.
    pub fn new(config: &RunConfig) -> AppResult<Self> {
        let capacity = config.outcome_capacity()?;
        let template = RequestTemplate::build(
            &config.method,
            &config.data,
            &config.headers,
            &config.target,
        )?;
        let client = config.transport.build_client()?;
        template
            .to_request(&client)
            .map_err(|source| HttpError::BuildRequestFailed { source })?;

        debug!(
            method = %template.method(),
            target = %template.target(),
            body_bytes = template.body().len(),
            body_file = ?template.body().file_path(),
            "Request template ready"
        );

        Ok(Self {
            client,
            template: Arc::new(template),
            clients: config.clients.get(),
            requests: config.requests.get(),
            capacity,
        })
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Runs every client to completion, or until a shutdown is broadcast.
    ///
    /// Aggregation starts only after the last client returned, so a completed
    /// run always holds exactly clients x requests outcomes.
    ///
    /// # Errors
    ///
    /// Returns an error when a client task panicked.
    pub async fn run(self, shutdown_rx: &mut ShutdownReceiver) -> AppResult<RunStatus> {
        let (sink, collector) = ResultCollector::channel(self.capacity);
        let started = Instant::now();

        let mut workers = JoinSet::new();
        for worker_id in 0..self.clients {
            debug!("Starting client: {}", worker_id);
            let client = self.client.clone();
            let template = Arc::clone(&self.template);
            let sink = sink.clone();
            let quota = self.requests;
            workers.spawn(async move { run_worker(worker_id, quota, &client, &template, &sink).await });
        }
        drop(sink);

        info!("Drum roll please...");
        debug!("Waiting for {} clients to finish...", self.clients);

        let finished = tokio::select! {
            joined = join_workers(&mut workers) => Some(joined),
            () = wait_for_shutdown(shutdown_rx) => None,
        };
        let Some(joined) = finished else {
            workers.abort_all();
            return Ok(RunStatus::Interrupted);
        };
        let submitted = joined?;
        let elapsed = started.elapsed();
        debug!("All clients finished; {} outcomes submitted", submitted);

        let (report, bodies) = collector.drain(elapsed).await;
        Ok(RunStatus::Completed(RunResults { report, bodies }))
    }
}

async fn join_workers(workers: &mut JoinSet<u64>) -> AppResult<u64> {
    let mut submitted: u64 = 0;
    let mut failure = None;
    while let Some(joined) = workers.join_next().await {
        match joined {
            Ok(count) => submitted = submitted.saturating_add(count),
            Err(err) => {
                error!("Client task failed: {}", err);
                if failure.is_none() {
                    failure = Some(err);
                }
            }
        }
    }
    match failure {
        Some(err) => Err(err.into()),
        None => Ok(submitted),
    }
}
