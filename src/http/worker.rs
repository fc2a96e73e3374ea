use std::error::Error as StdError;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::metrics::{Outcome, ResultSink};

use super::RequestTemplate;

/// Sends `quota` requests one after another and submits one outcome per attempt.
///
/// Failures never end the loop early; only a closed sink does. Returns the
/// number of outcomes handed to the sink.
pub async fn run_worker(
    worker_id: usize,
    quota: u64,
    client: &Client,
    template: &RequestTemplate,
    sink: &ResultSink,
) -> u64 {
    let mut submitted: u64 = 0;
    for attempt in 1..=quota {
        debug!("Client {} making request {}", worker_id, attempt);
        let outcome = execute_attempt(client, template).await;
        debug!(
            worker = worker_id,
            attempt,
            category = outcome.category.as_str(),
            "Request finished"
        );
        if !sink.submit(outcome) {
            warn!(
                "Client {} stopped after {} requests: result collector refused the outcome",
                worker_id, submitted
            );
            break;
        }
        submitted = submitted.saturating_add(1);
    }
    submitted
}

/// Performs one request and classifies what came back.
pub async fn execute_attempt(client: &Client, template: &RequestTemplate) -> Outcome {
    let request = match template.to_request(client) {
        Ok(request) => request,
        Err(err) => return Outcome::network_error(describe_error(&err)),
    };

    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(err) => {
            if err.is_timeout() {
                debug!("Request timed out: {}", err);
            }
            return Outcome::network_error(describe_error(&err));
        }
    };

    let status = response.status();
    match response.bytes().await {
        Ok(body) => classify_response(status, &String::from_utf8_lossy(&body)),
        Err(err) => {
            debug!("Error reading body of the response: {}", err);
            Outcome::bad_status(describe_error(&err))
        }
    }
}

/// 200-299 is a success; every other status is bad, whatever the body says.
#[must_use]
pub fn classify_response(status: StatusCode, body: &str) -> Outcome {
    if status.is_success() {
        Outcome::success(body)
    } else {
        Outcome::bad_status(body)
    }
}

/// Renders an error with its source chain, skipping causes already in the message.
pub(super) fn describe_error(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

