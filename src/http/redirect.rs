use reqwest::redirect;

use crate::error::{RedirectLimitExceeded, ValidationError};

/// How many redirect hops a single request may follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectPolicy {
    /// Return the redirect response itself.
    NeverFollow,
    /// Follow up to `n` hops, then fail the request.
    Limited(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectDecision {
    Stop,
    Follow,
    Exceeded,
}

impl RedirectPolicy {
    /// Maps the CLI value: `-1` never follows, `n >= 0` follows up to `n` hops.
    ///
    /// # Errors
    ///
    /// Returns an error for values below `-1`.
    pub fn from_limit(limit: i64) -> Result<Self, ValidationError> {
        match limit {
            -1 => Ok(RedirectPolicy::NeverFollow),
            value if value >= 0 => Ok(RedirectPolicy::Limited(
                usize::try_from(value).unwrap_or(usize::MAX),
            )),
            value => Err(ValidationError::RedirectLimitOutOfRange { value }),
        }
    }

    /// Decides what to do with the next redirect.
    ///
    /// `hops` is the length of the redirect history, which includes the
    /// original request, so the first redirect is evaluated with `hops == 1`.
    #[must_use]
    pub const fn decide(self, hops: usize) -> RedirectDecision {
        match self {
            RedirectPolicy::NeverFollow => RedirectDecision::Stop,
            RedirectPolicy::Limited(limit) if hops > limit => RedirectDecision::Exceeded,
            RedirectPolicy::Limited(_) => RedirectDecision::Follow,
        }
    }

    #[must_use]
    pub fn to_reqwest(self) -> redirect::Policy {
        redirect::Policy::custom(move |attempt| match self.decide(attempt.previous().len()) {
            RedirectDecision::Stop => attempt.stop(),
            RedirectDecision::Follow => attempt.follow(),
            RedirectDecision::Exceeded => attempt.error(RedirectLimitExceeded {
                limit: self.limit(),
            }),
        })
    }

    const fn limit(self) -> usize {
        match self {
            RedirectPolicy::NeverFollow => 0,
            RedirectPolicy::Limited(limit) => limit,
        }
    }
}
