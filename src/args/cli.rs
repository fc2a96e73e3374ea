use clap::Parser;
use std::time::Duration;

use super::defaults::DEFAULT_REDIRECTS;
use super::parsers::{
    parse_duration_arg, parse_positive_u64, parse_positive_usize, parse_redirect_limit,
};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "spotter",
    version,
    about = "Concurrent HTTP load generator: every client sends a fixed number of requests to one URL and the results are tallied per category."
)]
pub struct TesterArgs {
    /// Target URL (the scheme defaults to http when omitted)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Number of requests each client sends
    #[arg(
        long,
        short = 'r',
        env = "SPOTTER_REQUESTS",
        default_value = "1",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Number of concurrent clients
    #[arg(
        long,
        short = 'c',
        env = "SPOTTER_CLIENTS",
        default_value = "1",
        value_parser = parse_positive_usize
    )]
    pub clients: PositiveUsize,

    /// HTTP request type (GET, POST, PUT, ...)
    #[arg(long = "type", short = 'X', env = "SPOTTER_TYPE", default_value = "GET")]
    pub method: String,

    /// Request body, or '@path' to send the contents of a file
    #[arg(long, short = 'd', default_value = "")]
    pub data: String,

    /// Write categorized response bodies to this JSON file
    #[arg(long, short = 'o', env = "SPOTTER_OUTPUT")]
    pub output: Option<String>,

    /// Overwrite an existing output file without asking
    #[arg(long, short = 'y')]
    pub overwrite: bool,

    /// Request header in 'key:value' format (repeatable)
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,

    /// Timeout per request (supports ms/s/m/h, e.g. 1m30s)
    #[arg(
        long = "req-timeout",
        alias = "reqTimeout",
        env = "SPOTTER_REQ_TIMEOUT",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Number of redirects to follow; -1 never follows
    #[arg(
        long,
        env = "SPOTTER_REDIRECTS",
        default_value_t = DEFAULT_REDIRECTS,
        allow_negative_numbers = true,
        value_parser = parse_redirect_limit
    )]
    pub redirects: i64,

    /// Verify TLS certificates and hostnames (off by default)
    #[arg(long = "verify-tls")]
    pub verify_tls: bool,

    /// TCP keep-alive interval (supports ms/s/m/h)
    #[arg(
        long = "keep-alive",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub keep_alive: Duration,

    /// Maximum idle connections kept per host
    #[arg(
        long = "max-idle-per-host",
        default_value = "10000",
        value_parser = parse_positive_usize
    )]
    pub max_idle_per_host: PositiveUsize,

    /// Path to config file (TOML/JSON). Defaults to ./spotter.toml or ./spotter.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by SPOTTER_LOG/RUST_LOG)
    #[arg(long, short = 'v', alias = "dev")]
    pub verbose: bool,

    /// Disable ANSI colors in logs and the banner
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Print the banner before starting
    #[arg(long, alias = "oh")]
    pub banner: bool,
}
