use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gvdb_lib::{BrowseSession, NotFoundError, QueryError, RoleCounts};

use super::{Context, or_dash};
use crate::CliError;

pub(crate) async fn run_production(
    ctx: &Context,
    session: &BrowseSession,
    id: i64,
) -> Result<(), CliError> {
    let detail = session.production_detail(id).await?.value;

    if ctx.json {
        return ctx.emit_json(&detail);
    }

    let catalog = session.catalog()?;
    let store = catalog.store();
    let production = store
        .production(id)
        .ok_or(QueryError::NotFound(NotFoundError::new("production", id)))?;

    log::info!(
        "{} {}",
        production.code.if_supports_color(Stdout, |t| t.bold()),
        or_dash(production.title.as_deref()),
    );
    log::info!(
        "  Type: {}   Studio: {}   Released: {}",
        production.production_type.as_str(),
        or_dash(store.studio(production.studio_id).map(|s| s.name.as_str())),
        or_dash(production.release_date.as_deref()),
    );
    if let Some(parent) = production.parent_id.and_then(|pid| store.production(pid)) {
        log::info!("  Album: {}", parent.code);
    }
    if let Some(comment) = production.comment.as_deref().filter(|c| !c.is_empty()) {
        log::info!("  Comment: {comment}");
    }
    crate::log_blank();

    log::info!("{}", "Cast".if_supports_color(Stdout, |t| t.bold()));
    if detail.actors.is_empty() {
        log::info!("  (none credited)");
    }
    for credit in &detail.actors {
        let role = credit.role.as_ref().map(|r| r.as_str()).unwrap_or("-");
        let performer = credit
            .performer_type
            .map(|p| p.as_str())
            .filter(|p| *p != "named");
        log::info!(
            "  {} ({}) @ {}  {}{}",
            credit.stage_name.if_supports_color(Stdout, |t| t.cyan()),
            credit.actor_name,
            credit.studio_name,
            role,
            performer.map(|p| format!(" [{p}]")).unwrap_or_default(),
        );
    }
    crate::log_blank();

    log::info!("{}", "Tags".if_supports_color(Stdout, |t| t.bold()));
    for (label, names) in [
        ("Sex acts", &detail.tags.sex_acts),
        ("Styles", &detail.tags.styles),
        ("Body types", &detail.tags.body_types),
        ("Sources", &detail.tags.sources),
    ] {
        let joined = names.join(", ");
        log::info!("  {:<11} {}", format!("{label}:"), or_dash(Some(joined.as_str())));
    }
    Ok(())
}

pub(crate) async fn run_actor(
    ctx: &Context,
    session: &BrowseSession,
    id: i64,
) -> Result<(), CliError> {
    let stats = session.actor_stats(id).await?.value;

    if ctx.json {
        return ctx.emit_json(&stats);
    }

    let catalog = session.catalog()?;
    let name = catalog
        .store()
        .actor(id)
        .map(|a| a.actor_tag.as_str())
        .unwrap_or("?");

    log::info!("{} (#{id})", name.if_supports_color(Stdout, |t| t.bold()));
    log::info!("  Productions: {}", stats.total_productions);
    log::info!(
        "  Latest:      {} {}",
        or_dash(stats.latest_code.as_deref()),
        or_dash(stats.latest_date.as_deref()),
    );
    log::info!("  Roles:       {}", format_roles(&stats.role_counts));
    crate::log_blank();

    for detail in &stats.studio_details {
        log::info!(
            "  {} as {}",
            detail.studio_name.if_supports_color(Stdout, |t| t.bold()),
            detail.stage_name.if_supports_color(Stdout, |t| t.cyan()),
        );
        log::info!("    Productions: {}", detail.productions);
        log::info!(
            "    Latest:      {} {}",
            or_dash(detail.latest_production_code.as_deref()),
            or_dash(detail.latest_date.as_deref()),
        );
        log::info!("    Roles:       {}", format_roles(&detail.role_breakdown));
        log::info!("    Percent:     {}", format_roles(&detail.role_percentage));
    }
    Ok(())
}

fn format_roles(roles: &RoleCounts) -> String {
    format!(
        "top {} / bottom {} / giver {} / receiver {} / other {}",
        roles.top, roles.bottom, roles.giver, roles.receiver, roles.other
    )
}
