mod app;
mod config;
mod http;
mod report;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use http::{HttpError, RedirectLimitExceeded};
pub use report::ReportError;
pub use validation::ValidationError;
