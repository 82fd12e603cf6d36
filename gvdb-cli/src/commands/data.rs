use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gvdb_lib::{BrowseSession, SqliteSource};

use super::Context;
use crate::CliError;

/// Replace the SQLite cache contents with the JSON snapshot.
pub(crate) fn run_import(ctx: &Context) -> Result<(), CliError> {
    let db_path = ctx.cache_db();
    log::info!(
        "Importing {} into {}",
        ctx.data_dir.display().if_supports_color(Stdout, |t| t.cyan()),
        db_path.display().if_supports_color(Stdout, |t| t.cyan()),
    );

    let stats = SqliteSource::new(&db_path, &ctx.data_dir).import()?;

    if ctx.json {
        return ctx.emit_json(&serde_json::json!({
            "studios": stats.studios,
            "actors": stats.actors,
            "stage_names": stats.stage_names,
            "productions": stats.productions,
            "performances": stats.performances,
            "tags": stats.tags,
            "production_tags": stats.production_tags,
        }));
    }

    log::info!("  Studios:          {:>8}", stats.studios);
    log::info!("  Actors:           {:>8}", stats.actors);
    log::info!("  Stage names:      {:>8}", stats.stage_names);
    log::info!("  Productions:      {:>8}", stats.productions);
    log::info!("  Performances:     {:>8}", stats.performances);
    log::info!("  Tags:             {:>8}", stats.tags);
    log::info!("  Production tags:  {:>8}", stats.production_tags);
    log::info!(
        "{} {} records imported",
        "Done:".if_supports_color(Stdout, |t| t.green()),
        stats.total(),
    );
    Ok(())
}

/// Record counts per collection, plus dangling references.
pub(crate) fn run_stats(
    ctx: &Context,
    session: &BrowseSession,
    details: bool,
) -> Result<(), CliError> {
    let catalog = session.catalog()?;
    let counts = catalog.counts();
    let dangling = catalog.integrity();

    if ctx.json {
        return ctx.emit_json(&serde_json::json!({
            "source": session.describe_source(),
            "counts": counts,
            "dangling_references": dangling,
        }));
    }

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Source: {}", session.describe_source());
    crate::log_blank();
    log::info!("  Studios:          {:>8}", counts.studios);
    log::info!("  Actors:           {:>8}", counts.actors);
    log::info!("  Stage names:      {:>8}", counts.stage_names);
    log::info!("  Productions:      {:>8}", counts.productions);
    log::info!("  Performances:     {:>8}", counts.performances);
    log::info!("  Tags:             {:>8}", counts.tags);
    log::info!("  Production tags:  {:>8}", counts.production_tags);

    if dangling.is_empty() {
        log::info!("  Dangling refs:    {:>8}", 0);
        return Ok(());
    }
    log::info!(
        "  Dangling refs:    {}",
        format!("{:>8}", dangling.len()).if_supports_color(Stdout, |t| t.yellow()),
    );
    if details {
        crate::log_blank();
        for reference in dangling {
            log::info!("  {reference}");
        }
    }
    Ok(())
}
