pub(crate) const DEFAULT_USER_AGENT: &str = concat!("spotter/", env!("CARGO_PKG_VERSION"));

/// Redirect hops followed per request unless overridden (-1 disables following).
pub(crate) const DEFAULT_REDIRECTS: i64 = 10;

/// Build identifier baked in at compile time; `dev` for local builds.
const BUILD_ID: Option<&str> = option_env!("SPOTTER_BUILD");

pub(crate) fn long_version() -> String {
    format!(
        "{}\nBuild: {}",
        env!("CARGO_PKG_VERSION"),
        BUILD_ID.unwrap_or("dev")
    )
}
