use std::path::PathBuf;

use crate::args::{PositiveU64, PositiveUsize, TesterArgs};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{RedirectPolicy, TransportPolicy};

/// Fully resolved settings for one run, after config file and CLI are merged.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub target: String,
    pub clients: PositiveUsize,
    pub requests: PositiveU64,
    pub method: String,
    pub data: String,
    pub headers: Vec<String>,
    pub output: Option<PathBuf>,
    pub overwrite: bool,
    pub transport: TransportPolicy,
}

impl RunConfig {
    /// Resolves parsed arguments into run settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the redirect limit is out of range.
    pub fn from_args(args: &TesterArgs) -> AppResult<Self> {
        let redirect = RedirectPolicy::from_limit(args.redirects)?;
        Ok(Self {
            target: args.url.clone(),
            clients: args.clients,
            requests: args.requests,
            method: args.method.clone(),
            data: args.data.clone(),
            headers: args.headers.clone(),
            output: args.output.as_ref().map(PathBuf::from),
            overwrite: args.overwrite,
            transport: TransportPolicy {
                tls_verify: args.verify_tls,
                request_timeout: args.request_timeout,
                redirect,
                keep_alive: args.keep_alive,
                max_idle_per_host: args.max_idle_per_host.get(),
            },
        })
    }

    /// Total number of attempts across all clients, which is also the result
    /// buffer size.
    ///
    /// # Errors
    ///
    /// Returns an error when clients x requests does not fit in the buffer.
    pub fn outcome_capacity(&self) -> AppResult<usize> {
        let clients = self.clients.get();
        let requests = self.requests.get();
        let overflow = || {
            AppError::validation(ValidationError::OutcomeCapacityOverflow { clients, requests })
        };

        let per_client = usize::try_from(requests).map_err(|_| overflow())?;
        let capacity = clients.checked_mul(per_client).ok_or_else(overflow)?;
        if capacity > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(overflow());
        }
        Ok(capacity)
    }
}
