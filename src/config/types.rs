use std::time::Duration;

use serde::Deserialize;

use crate::args::parsers::parse_duration_arg;
use crate::error::ValidationError;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub requests: Option<u64>,
    pub clients: Option<usize>,
    #[serde(alias = "type")]
    pub method: Option<String>,
    pub data: Option<String>,
    pub output: Option<String>,
    pub overwrite: Option<bool>,
    #[serde(alias = "header")]
    pub headers: Option<Vec<String>>,
    #[serde(alias = "reqTimeout", alias = "timeout")]
    pub req_timeout: Option<DurationValue>,
    pub redirects: Option<i64>,
    pub verify_tls: Option<bool>,
    pub keep_alive: Option<DurationValue>,
    pub max_idle_per_host: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => parse_duration_arg(text),
        }
    }
}
