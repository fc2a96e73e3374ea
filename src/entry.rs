use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_local;
use crate::args::{TesterArgs, long_version};
use crate::config::{RunConfig, apply_config, load_config};
use crate::error::AppResult;
use crate::system::banner;

/// Process entry: parses arguments, installs logging and drives the run on a
/// multi-thread runtime.
///
/// # Errors
///
/// Returns an error when startup validation fails or the run cannot finish.
pub fn run() -> AppResult<()> {
    let (args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(run_async(args, &matches));
    // An interrupted overwrite prompt leaves a blocking stdin read behind.
    runtime.shutdown_background();
    if let Err(err) = &result {
        tracing::error!("{}", err);
    }
    result
}

fn parse_args() -> AppResult<(TesterArgs, ArgMatches)> {
    let matches = TesterArgs::command()
        .long_version(long_version())
        .get_matches();
    let args = TesterArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

async fn run_async(mut args: TesterArgs, matches: &ArgMatches) -> AppResult<()> {
    if args.banner {
        banner::print_cli_banner(args.no_color);
        println!();
    }

    if let Some(config) = load_config(args.config.as_deref())? {
        apply_config(&mut args, matches, &config)?;
    }

    let config = RunConfig::from_args(&args)?;
    run_local(&config).await
}
