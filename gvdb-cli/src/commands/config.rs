use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gvdb_lib::settings;

use super::Context;
use crate::CliError;

/// Show the settings file and every resolved location.
pub(crate) fn run_config_show(ctx: &Context) {
    let path = settings::settings_path();

    log::info!(
        "{}",
        "gvdb Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("  Snapshot dir:  {}", ctx.data_dir.display());
    log::info!("  Cache db:      {}", ctx.cache_db().display());
    log::info!("  Page size:     {}", settings::resolve_page_size(None));

    if let Some(contents) = settings::load_settings_string() {
        crate::log_blank();
        for line in contents.lines() {
            log::info!("  {line}");
        }
    }
}

pub(crate) fn run_config_path() {
    log::info!("{}", settings::settings_path().display());
}

fn absolutize(path: Option<PathBuf>) -> Result<Option<PathBuf>, CliError> {
    Ok(match path {
        Some(p) if p.is_relative() => Some(std::env::current_dir()?.join(p)),
        other => other,
    })
}

/// Save or clear the snapshot directory.
pub(crate) fn run_config_set_data_dir(path: Option<PathBuf>) -> Result<(), CliError> {
    let absolute = absolutize(path)?;
    settings::save_snapshot_dir(absolute.as_deref())?;
    match absolute {
        Some(p) => log::info!(
            "Snapshot directory set to {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!("Snapshot directory cleared"),
    }
    Ok(())
}

/// Save or clear the SQLite cache path.
pub(crate) fn run_config_set_cache_db(path: Option<PathBuf>) -> Result<(), CliError> {
    let absolute = absolutize(path)?;
    settings::save_cache_db(absolute.as_deref())?;
    match absolute {
        Some(p) => log::info!(
            "Cache database set to {}",
            p.display().if_supports_color(Stdout, |t| t.cyan()),
        ),
        None => log::info!("Cache database cleared"),
    }
    Ok(())
}
