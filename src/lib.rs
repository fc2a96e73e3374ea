//! Core library for the `spotter` CLI.
//!
//! `spotter` fires a fixed number of requests from a fixed number of
//! concurrent clients at one URL, collects every outcome over a pre-sized
//! channel, and reports success, bad-status and network-failure counts plus
//! throughput. The binary is the primary interface; the modules are public so
//! the run can also be driven from tests or other tools.
pub mod app;
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod shutdown;
mod system;
