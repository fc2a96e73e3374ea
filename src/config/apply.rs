use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::parsers::ensure_redirect_limit;
use crate::args::{PositiveU64, PositiveUsize, TesterArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line or through environment variables win over
/// the config file.
///
/// # Errors
///
/// Returns an error when a config value is out of range.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = PositiveU64::try_from(requests).map_err(|err| invalid("requests", err))?;
    }

    if !is_cli(matches, "clients")
        && let Some(clients) = config.clients
    {
        args.clients = PositiveUsize::try_from(clients).map_err(|err| invalid("clients", err))?;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method.clone()
    {
        args.method = method;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "output")
        && let Some(output) = config.output.clone()
    {
        args.output = Some(output);
    }

    if !is_cli(matches, "overwrite")
        && let Some(overwrite) = config.overwrite
    {
        args.overwrite = overwrite;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.clone()
    {
        args.headers = headers;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.req_timeout.as_ref()
    {
        args.request_timeout = timeout
            .to_duration()
            .map_err(|err| invalid("req_timeout", err))?;
    }

    if !is_cli(matches, "redirects")
        && let Some(redirects) = config.redirects
    {
        args.redirects =
            ensure_redirect_limit(redirects).map_err(|err| invalid("redirects", err))?;
    }

    if !is_cli(matches, "verify_tls")
        && let Some(verify_tls) = config.verify_tls
    {
        args.verify_tls = verify_tls;
    }

    if !is_cli(matches, "keep_alive")
        && let Some(keep_alive) = config.keep_alive.as_ref()
    {
        args.keep_alive = keep_alive
            .to_duration()
            .map_err(|err| invalid("keep_alive", err))?;
    }

    if !is_cli(matches, "max_idle_per_host")
        && let Some(max_idle) = config.max_idle_per_host
    {
        args.max_idle_per_host =
            PositiveUsize::try_from(max_idle).map_err(|err| invalid("max_idle_per_host", err))?;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn invalid(field: &'static str, source: ValidationError) -> AppError {
    AppError::Config(ConfigError::InvalidValue { field, source })
}
