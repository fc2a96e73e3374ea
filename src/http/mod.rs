//! Request template, transport policy and the per-worker request loop.
mod redirect;
mod template;
mod transport;
mod worker;

#[cfg(test)]
pub(crate) mod test_server;

pub use redirect::{RedirectDecision, RedirectPolicy};
pub use template::{BodySource, RequestTemplate, normalize_url, parse_header_entry, parse_method};
pub use transport::TransportPolicy;
pub use worker::{classify_response, execute_attempt, run_worker};
