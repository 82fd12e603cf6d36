//! Choices offered by the browse filters: studios and curated tag lists.

use gvdb_catalog::types::{Tag, TagCategory};
use serde::Serialize;

use crate::store::Store;

pub const STYLE_ORDER: &[&str] = &["BDSM", "工作/西裝", "按摩", "軍警", "校園", "純愛", "迷藥", "運動"];
pub const BODY_TYPE_ORDER: &[&str] = &["大叔", "年輕", "熊", "壯碩", "肌肉", "精瘦", "纖瘦"];
pub const SOURCE_ORDER: &[&str] = &[
    "4horlover", "igay69", "javboys", "poapan", "notebook", "ssd", "pending", "removed", "unseen",
];

const STYLE_ICONS: &[(&str, &str)] = &[
    ("BDSM", "🔒"),
    ("工作/西裝", "🤵"),
    ("按摩", "💆"),
    ("軍警", "🪖"),
    ("校園", "🎓"),
    ("純愛", "❤️"),
    ("迷藥", "💊"),
    ("運動", "⚽"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudioOption {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOption {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagOptions {
    pub sex_acts: Vec<TagOption>,
    pub styles: Vec<TagOption>,
    pub body_types: Vec<TagOption>,
    pub sources: Vec<TagOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub studios: Vec<StudioOption>,
    pub tags: TagOptions,
}

pub fn filter_options(store: &Store) -> FilterOptions {
    let mut studios: Vec<StudioOption> = store
        .studios()
        .iter()
        .map(|s| StudioOption {
            id: s.id,
            name: s.name.clone(),
        })
        .collect();
    studios.sort_by(|a, b| a.name.cmp(&b.name));

    let mut sex_acts = in_category(store, TagCategory::SexAct);
    sex_acts.sort_by(|a, b| a.name.cmp(&b.name));

    FilterOptions {
        studios,
        tags: TagOptions {
            sex_acts: sex_acts.into_iter().map(option).collect(),
            styles: curated(in_category(store, TagCategory::Style), STYLE_ORDER),
            body_types: curated(in_category(store, TagCategory::BodyType), BODY_TYPE_ORDER),
            sources: curated(in_category(store, TagCategory::Source), SOURCE_ORDER),
        },
    }
}

fn in_category(store: &Store, category: TagCategory) -> Vec<&Tag> {
    store.tags().iter().filter(|t| t.category == category).collect()
}

/// Listed names first in list order, then the rest in stored order.
fn curated(mut tags: Vec<&Tag>, order: &[&str]) -> Vec<TagOption> {
    tags.sort_by_key(|t| {
        order
            .iter()
            .position(|name| *name == t.name)
            .unwrap_or(order.len())
    });
    tags.into_iter().map(option).collect()
}

fn option(tag: &Tag) -> TagOption {
    let display_name = match (&tag.display_name, style_icon(tag)) {
        (None, Some(icon)) => format!("{icon} {}", tag.name),
        _ => tag.label().to_string(),
    };
    TagOption {
        name: tag.name.clone(),
        display_name,
    }
}

fn style_icon(tag: &Tag) -> Option<&'static str> {
    if tag.category != TagCategory::Style {
        return None;
    }
    STYLE_ICONS
        .iter()
        .find(|(name, _)| *name == tag.name)
        .map(|(_, icon)| *icon)
}
