use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use gvdb_catalog::ProductionType;
use gvdb_lib::settings;
use gvdb_lib::{
    ActorFilters, ActorRow, ActorSortField, BrowseSession, Page, Pagination, ProductionFilters,
    ProductionRow, ProductionSortField, Sort, SortOrder,
};

use super::{Context, or_dash, truncate_str};
use crate::CliError;
use crate::cli_types::{ActorArgs, PageArgs, ProductionArgs};

fn pagination(paging: &PageArgs) -> Pagination {
    Pagination::new(paging.page, settings::resolve_page_size(paging.page_size))
}

fn order(paging: &PageArgs) -> SortOrder {
    if paging.desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    }
}

fn actor_sort(args: &ActorArgs) -> Sort<ActorSortField> {
    let Some(name) = &args.sort else {
        return Sort::default();
    };
    let field = ActorSortField::from_str_loose(name);
    if field == ActorSortField::Unknown {
        log::warn!("Unknown sort field '{name}', keeping stored order");
    }
    Sort::new(field, order(&args.paging))
}

fn production_sort(args: &ProductionArgs) -> Sort<ProductionSortField> {
    let Some(name) = &args.sort else {
        return Sort::default();
    };
    let field = ProductionSortField::from_str_loose(name);
    if field == ProductionSortField::Unknown {
        log::warn!("Unknown sort field '{name}', keeping stored order");
    }
    Sort::new(field, order(&args.paging))
}

fn production_filters(args: &ProductionArgs) -> Result<ProductionFilters, CliError> {
    let types = args
        .types
        .iter()
        .map(|t| {
            ProductionType::from_str_loose(t).ok_or_else(|| {
                CliError::invalid_argument(format!(
                    "unknown production type '{t}' (expected single, album or segment)"
                ))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProductionFilters {
        studios: args.studios.clone(),
        types,
        actors: args.actors.clone(),
        date_from: args.from.clone(),
        date_to: args.to.clone(),
        sex_acts: args.sex_acts.clone(),
        styles: args.styles.clone(),
        body_types: args.body_types.clone(),
        sources: args.sources.clone(),
        keyword: args.keyword.clone(),
    })
}

fn page_header<T>(label: &str, page: &Page<T>) {
    log::info!(
        "{} {}",
        label.if_supports_color(Stdout, |t| t.bold()),
        format!(
            "(page {}/{}, {} total)",
            page.page,
            page.total_pages.max(1),
            page.total
        )
        .if_supports_color(Stdout, |t| t.dimmed()),
    );
    crate::log_blank();
}

pub(crate) async fn run_actors(
    ctx: &Context,
    session: &BrowseSession,
    args: ActorArgs,
) -> Result<(), CliError> {
    let filters = ActorFilters {
        studios: args.studios.clone(),
        search: args.search.clone(),
        show_anonymous: args.show_anonymous,
    };
    let page = session
        .query_actors(filters, actor_sort(&args), pagination(&args.paging))
        .await?
        .value;

    if ctx.json {
        return ctx.emit_json(&page);
    }

    page_header("Actors", &page);
    if page.data.is_empty() {
        log::info!("  No actors match.");
        return Ok(());
    }

    let catalog = session.catalog()?;
    log::info!(
        "  {:>6}  {:<24} {:>5}  {:<12} {}",
        "ID",
        "Actor",
        "Prods",
        "Latest",
        "Stage names"
    );
    for row in &page.data {
        print_actor_row(row, catalog.store());
    }
    Ok(())
}

fn print_actor_row(row: &ActorRow, store: &gvdb_lib::Store) {
    let stage_names: Vec<String> = store
        .stage_names_for_actor(row.actor.id)
        .map(|sn| {
            let studio = store.studio(sn.studio_id).map(|s| s.name.as_str());
            format!("{} @ {}", sn.stage_name, or_dash(studio))
        })
        .collect();
    log::info!(
        "  {:>6}  {} {:>5}  {:<12} {}",
        row.actor.id,
        format!("{:<24}", truncate_str(&row.actor.actor_tag, 24))
            .if_supports_color(Stdout, |t| t.bold()),
        row.stats.total_productions,
        or_dash(row.stats.latest_date.as_deref()),
        truncate_str(&stage_names.join(", "), 60).if_supports_color(Stdout, |t| t.cyan()),
    );
}

pub(crate) async fn run_productions(
    ctx: &Context,
    session: &BrowseSession,
    args: ProductionArgs,
) -> Result<(), CliError> {
    let filters = production_filters(&args)?;
    let page = session
        .query_productions(filters, production_sort(&args), pagination(&args.paging))
        .await?
        .value;

    if ctx.json {
        return ctx.emit_json(&page);
    }

    page_header("Productions", &page);
    if page.data.is_empty() {
        log::info!("  No productions match.");
        return Ok(());
    }
    print_production_table(&page.data);
    Ok(())
}

pub(crate) async fn run_segments(
    ctx: &Context,
    session: &BrowseSession,
    album_id: i64,
) -> Result<(), CliError> {
    let segments = session.segments(album_id).await?.value;

    if ctx.json {
        return ctx.emit_json(&segments);
    }

    let catalog = session.catalog()?;
    let album_code = catalog
        .store()
        .production(album_id)
        .map(|p| p.code.as_str())
        .unwrap_or("?");
    log::info!(
        "{} {}",
        "Segments of".if_supports_color(Stdout, |t| t.bold()),
        album_code.if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if segments.is_empty() {
        log::info!("  No segments.");
        return Ok(());
    }
    print_production_table(&segments);
    Ok(())
}

fn print_production_table(rows: &[ProductionRow]) {
    log::info!(
        "  {:>6}  {:<14} {:<8} {:<12} {:<10}  {:<28} {}",
        "ID",
        "Code",
        "Type",
        "Studio",
        "Date",
        "Title",
        "Cast"
    );
    for row in rows {
        let p = &row.production;
        let cast: Vec<&str> = row.actors.iter().map(|a| a.stage_name.as_str()).collect();
        log::info!(
            "  {:>6}  {} {:<8} {:<12} {:<10}  {:<28} {}",
            p.id,
            format!("{:<14}", truncate_str(&p.code, 14)).if_supports_color(Stdout, |t| t.bold()),
            p.production_type.as_str(),
            truncate_str(or_dash(row.studio_name.as_deref()), 12),
            or_dash(p.release_date.as_deref()),
            truncate_str(or_dash(p.title.as_deref()), 28),
            truncate_str(&cast.join(", "), 50).if_supports_color(Stdout, |t| t.cyan()),
        );
    }
}
