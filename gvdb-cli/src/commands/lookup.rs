use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gvdb_lib::{BrowseSession, TagOption};

use super::Context;
use crate::CliError;

pub(crate) async fn run_suggest(
    ctx: &Context,
    session: &BrowseSession,
    query: String,
) -> Result<(), CliError> {
    let suggestions = session.search_actor_suggestions(query).await?.value;

    if ctx.json {
        return ctx.emit_json(&suggestions);
    }

    if suggestions.is_empty() {
        log::info!("No stage names match.");
        return Ok(());
    }
    log::info!("  {:>8}  {:<24} {:<24} {}", "Stage ID", "Stage name", "Actor", "Studio");
    for s in &suggestions {
        log::info!(
            "  {:>8}  {} {:<24} {}",
            s.stage_name_id,
            format!("{:<24}", s.stage_name).if_supports_color(Stdout, |t| t.cyan()),
            s.actor_name,
            s.studio_name,
        );
    }
    Ok(())
}

pub(crate) fn run_filters(ctx: &Context, session: &BrowseSession) -> Result<(), CliError> {
    let options = session.catalog()?.filter_options();

    if ctx.json {
        return ctx.emit_json(&options);
    }

    log::info!("{}", "Studios".if_supports_color(Stdout, |t| t.bold()));
    for studio in &options.studios {
        log::info!("  {:>6}  {}", studio.id, studio.name);
    }
    crate::log_blank();

    for (label, tags) in [
        ("Sex acts", &options.tags.sex_acts),
        ("Styles", &options.tags.styles),
        ("Body types", &options.tags.body_types),
        ("Sources", &options.tags.sources),
    ] {
        log::info!("{}", label.if_supports_color(Stdout, |t| t.bold()));
        log::info!("  {}", join_labels(tags));
    }
    Ok(())
}

fn join_labels(tags: &[TagOption]) -> String {
    if tags.is_empty() {
        return "-".to_string();
    }
    tags.iter()
        .map(|t| t.display_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
