use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCategory {
    /// Transport failed before a response arrived (DNS, connect, TLS, timeout, redirect limit).
    NetworkError,
    /// A response arrived but was outside 200-299, or its body could not be read.
    BadStatus,
    Success,
}

impl OutcomeCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OutcomeCategory::NetworkError => "net",
            OutcomeCategory::BadStatus => "bad",
            OutcomeCategory::Success => "succ",
        }
    }
}

/// Classified result of one request attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub category: OutcomeCategory,
    pub payload: String,
}

impl Outcome {
    #[must_use]
    pub fn network_error(payload: impl Into<String>) -> Self {
        Self {
            category: OutcomeCategory::NetworkError,
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn bad_status(payload: impl Into<String>) -> Self {
        Self {
            category: OutcomeCategory::BadStatus,
            payload: payload.into(),
        }
    }

    #[must_use]
    pub fn success(payload: impl Into<String>) -> Self {
        Self {
            category: OutcomeCategory::Success,
            payload: payload.into(),
        }
    }
}

/// Response bodies (or error descriptions) grouped by category, in drain order.
///
/// Serialized with the `Net`/`Bad`/`Succ` keys of the report file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorizedBodies {
    #[serde(rename = "Net")]
    pub network: Vec<String>,
    #[serde(rename = "Bad")]
    pub bad: Vec<String>,
    #[serde(rename = "Succ")]
    pub success: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateReport {
    pub total_count: u64,
    pub success_count: u64,
    pub network_failed_count: u64,
    pub bad_failed_count: u64,
    pub elapsed: Duration,
    /// Requests per second scaled by 100 (two fixed decimals).
    pub requests_per_second_x100: u64,
}

impl AggregateReport {
    #[must_use]
    pub fn new(
        success_count: u64,
        network_failed_count: u64,
        bad_failed_count: u64,
        elapsed: Duration,
    ) -> Self {
        let total_count = success_count
            .saturating_add(network_failed_count)
            .saturating_add(bad_failed_count);
        Self {
            total_count,
            success_count,
            network_failed_count,
            bad_failed_count,
            elapsed,
            requests_per_second_x100: requests_per_second_x100(total_count, elapsed),
        }
    }
}

fn requests_per_second_x100(total: u64, elapsed: Duration) -> u64 {
    if total == 0 {
        return 0;
    }
    let elapsed_us = elapsed.as_micros().max(1);
    let scaled = u128::from(total)
        .saturating_mul(100_000_000)
        .checked_div(elapsed_us)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
