use clap::Parser;

use super::TesterArgs;

pub(crate) fn parse_test_args<I, T>(args: I) -> Result<TesterArgs, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TesterArgs::try_parse_from(args).map_err(|err| format!("parse failed: {}", err))
}
