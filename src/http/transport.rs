use std::time::Duration;

use reqwest::Client;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;

use super::RedirectPolicy;

/// Connection behaviour shared read-only by every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportPolicy {
    pub tls_verify: bool,
    /// Applied to connecting and to every read, so each redirect hop gets the full budget.
    pub request_timeout: Duration,
    pub redirect: RedirectPolicy,
    pub keep_alive: Duration,
    pub max_idle_per_host: usize,
}

impl TransportPolicy {
    /// Builds the single client all workers share.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend or client cannot be initialized.
    pub fn build_client(&self) -> Result<Client, HttpError> {
        let mut builder = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .connect_timeout(self.request_timeout)
            .read_timeout(self.request_timeout)
            .tcp_keepalive(self.keep_alive)
            .pool_max_idle_per_host(self.max_idle_per_host)
            .redirect(self.redirect.to_reqwest());

        if !self.tls_verify {
            builder = builder
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true);
        }

        builder
            .build()
            .map_err(|source| HttpError::BuildClientFailed { source })
    }
}
