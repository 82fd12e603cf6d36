//! gvdb CLI
//!
//! Terminal browsing surface for the production catalog.

mod cli_types;
mod commands;
mod error;

use std::io::Write;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
use commands::Context;
pub(crate) use error::CliError;

/// Logger level and stream for one invocation.
///
/// Command output goes through the logger to stdout. With `--json` stdout
/// carries only the JSON document, so the logger drops to warnings on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LogSetup {
    level: log::LevelFilter,
    stderr: bool,
}

impl LogSetup {
    fn new(quiet: bool, verbose: bool, json: bool) -> Self {
        let level = if quiet || json {
            log::LevelFilter::Warn
        } else if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        Self { level, stderr: json }
    }
}

fn init_logger(quiet: bool, verbose: bool, json: bool) {
    let setup = LogSetup::new(quiet, verbose, json);

    let mut builder = env_logger::Builder::new();
    builder.filter_level(setup.level);
    builder.target(if setup.stderr {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    });
    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        });
    } else {
        // Normal output is the command's own text
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }
    // RUST_LOG overrides the flag-derived level
    builder.parse_env("RUST_LOG");
    builder.init();
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}

fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = Context::from_cli(&cli);

    match cli.command {
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => commands::config::run_config_show(&ctx),
                ConfigAction::Path => commands::config::run_config_path(),
                ConfigAction::SetDataDir { path } => {
                    commands::config::run_config_set_data_dir(path)?
                }
                ConfigAction::SetCacheDb { path } => {
                    commands::config::run_config_set_cache_db(path)?
                }
            }
            return Ok(());
        }
        Commands::Import => return commands::data::run_import(&ctx),
        _ => {}
    }

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {e}")))?;

    rt.block_on(dispatch(&ctx, cli.command))
}

async fn dispatch(ctx: &Context, command: Commands) -> Result<(), CliError> {
    let session = ctx.session();
    session.load_all().await?;

    match command {
        Commands::Stats { details } => commands::data::run_stats(ctx, &session, details),
        Commands::Actors(args) => commands::browse::run_actors(ctx, &session, args).await,
        Commands::Productions(args) => commands::browse::run_productions(ctx, &session, args).await,
        Commands::Production { id } => commands::detail::run_production(ctx, &session, id).await,
        Commands::Actor { id } => commands::detail::run_actor(ctx, &session, id).await,
        Commands::Segments { album_id } => {
            commands::browse::run_segments(ctx, &session, album_id).await
        }
        Commands::Suggest { query } => commands::lookup::run_suggest(ctx, &session, query).await,
        Commands::Filters => commands::lookup::run_filters(ctx, &session),
        Commands::Config { .. } | Commands::Import => Ok(()),
    }
}

fn main() {
    let cli = Cli::parse();
    // Config subcommands always print text
    let json_output = cli.json && !matches!(cli.command, Commands::Config { .. });
    init_logger(cli.quiet, cli.verbose, json_output);

    if let Err(e) = run(cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
