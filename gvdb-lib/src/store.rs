//! In-memory record store with primary-key and foreign-key indexes.
//!
//! Indexes are built once when the store is constructed, so every join in
//! the query engine is a hash lookup rather than a collection scan. Index
//! lists keep stored order, which the detail views rely on.

use std::collections::HashMap;

use gvdb_catalog::types::*;
use serde::Serialize;

/// A record type held by the [`Store`].
pub trait Record: Sized + 'static {
    /// Collection name, as used in snapshot files and log messages.
    const ENTITY: &'static str;

    /// Foreign-key fields that get a secondary index.
    const FOREIGN_KEYS: &'static [&'static str];

    /// Primary key, or `None` for link records with a composite key.
    fn primary_key(&self) -> Option<i64>;

    /// Value of a named foreign-key field.
    fn foreign_key(&self, field: &str) -> Option<i64>;

    fn table(store: &Store) -> &Table<Self>;
}

/// One indexed collection.
#[derive(Debug)]
pub struct Table<T> {
    rows: Vec<T>,
    by_id: HashMap<i64, usize>,
    by_field: HashMap<&'static str, HashMap<i64, Vec<usize>>>,
}

impl<T: Record> Table<T> {
    fn new(rows: Vec<T>) -> Self {
        let mut by_id = HashMap::with_capacity(rows.len());
        let mut by_field: HashMap<&'static str, HashMap<i64, Vec<usize>>> = T::FOREIGN_KEYS
            .iter()
            .map(|&field| (field, HashMap::new()))
            .collect();

        for (pos, row) in rows.iter().enumerate() {
            if let Some(id) = row.primary_key() {
                // First occurrence wins on duplicate ids
                by_id.entry(id).or_insert(pos);
            }
            for &field in T::FOREIGN_KEYS {
                if let (Some(value), Some(index)) =
                    (row.foreign_key(field), by_field.get_mut(field))
                {
                    index.entry(value).or_default().push(pos);
                }
            }
        }

        Self {
            rows,
            by_id,
            by_field,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&T> {
        self.by_id.get(&id).map(|&pos| &self.rows[pos])
    }

    fn positions(&self, field: &str, value: i64) -> &[usize] {
        self.by_field
            .get(field)
            .and_then(|index| index.get(&value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rows whose `field` equals `value`, in stored order.
    pub fn iter_by(&self, field: &'static str, value: i64) -> impl Iterator<Item = &T> + '_ {
        self.positions(field, value)
            .iter()
            .map(move |&pos| &self.rows[pos])
    }
}

macro_rules! impl_record {
    ($ty:ty, $entity:literal, $table:ident, pk = $pk:expr, fks = [$($field:literal => $get:expr),* $(,)?]) => {
        impl Record for $ty {
            const ENTITY: &'static str = $entity;
            const FOREIGN_KEYS: &'static [&'static str] = &[$($field),*];

            fn primary_key(&self) -> Option<i64> {
                let pk: fn(&Self) -> Option<i64> = $pk;
                pk(self)
            }

            #[allow(unused_variables)]
            fn foreign_key(&self, field: &str) -> Option<i64> {
                match field {
                    $($field => {
                        let get: fn(&Self) -> Option<i64> = $get;
                        get(self)
                    })*
                    _ => None,
                }
            }

            fn table(store: &Store) -> &Table<Self> {
                &store.$table
            }
        }
    };
}

impl_record!(Studio, "studios", studios, pk = |s| Some(s.id), fks = []);
impl_record!(Actor, "actors", actors, pk = |a| Some(a.id), fks = []);
impl_record!(StageName, "stage_names", stage_names, pk = |s| Some(s.id), fks = [
    "actor_id" => |s| Some(s.actor_id),
    "studio_id" => |s| Some(s.studio_id),
]);
impl_record!(Production, "productions", productions, pk = |p| Some(p.id), fks = [
    "studio_id" => |p| Some(p.studio_id),
    "parent_id" => |p| p.parent_id,
]);
impl_record!(Performance, "performances", performances, pk = |p| Some(p.id), fks = [
    "production_id" => |p| Some(p.production_id),
    "stage_name_id" => |p| Some(p.stage_name_id),
]);
impl_record!(Tag, "tags", tags, pk = |t| Some(t.id), fks = []);
impl_record!(ProductionTag, "production_tags", production_tags, pk = |_| None, fks = [
    "production_id" => |pt| Some(pt.production_id),
    "tag_id" => |pt| Some(pt.tag_id),
]);

/// Record counts per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub studios: usize,
    pub actors: usize,
    pub stage_names: usize,
    pub productions: usize,
    pub performances: usize,
    pub tags: usize,
    pub production_tags: usize,
}

/// The seven collections of a snapshot, indexed for joins.
///
/// Read-only once built. Construct one per loaded snapshot; nothing is
/// shared between instances.
#[derive(Debug)]
pub struct Store {
    studios: Table<Studio>,
    actors: Table<Actor>,
    stage_names: Table<StageName>,
    productions: Table<Production>,
    performances: Table<Performance>,
    tags: Table<Tag>,
    production_tags: Table<ProductionTag>,
}

impl Store {
    pub fn new(snapshot: Snapshot) -> Self {
        let store = Self {
            studios: Table::new(snapshot.studios),
            actors: Table::new(snapshot.actors),
            stage_names: Table::new(snapshot.stage_names),
            productions: Table::new(snapshot.productions),
            performances: Table::new(snapshot.performances),
            tags: Table::new(snapshot.tags),
            production_tags: Table::new(snapshot.production_tags),
        };
        log::debug!("Indexed store: {:?}", store.counts());
        store
    }

    pub fn empty() -> Self {
        Self::new(Snapshot::default())
    }

    // ── Generic contract ────────────────────────────────────────────────────

    /// All records of a type, in stored order.
    pub fn all<T: Record>(&self) -> &[T] {
        T::table(self).rows()
    }

    /// Point lookup by primary key.
    pub fn get<T: Record>(&self, id: i64) -> Option<&T> {
        T::table(self).get(id)
    }

    /// All records whose named foreign-key field equals `value`.
    ///
    /// Fields without an index (or unknown names) yield nothing.
    pub fn by_foreign_key<T: Record>(&self, field: &str, value: i64) -> Vec<&T> {
        let table = T::table(self);
        table
            .positions(field, value)
            .iter()
            .map(|&pos| &table.rows[pos])
            .collect()
    }

    // ── Typed lookups ───────────────────────────────────────────────────────

    pub fn studio(&self, id: i64) -> Option<&Studio> {
        self.studios.get(id)
    }

    pub fn actor(&self, id: i64) -> Option<&Actor> {
        self.actors.get(id)
    }

    pub fn stage_name(&self, id: i64) -> Option<&StageName> {
        self.stage_names.get(id)
    }

    pub fn production(&self, id: i64) -> Option<&Production> {
        self.productions.get(id)
    }

    pub fn tag(&self, id: i64) -> Option<&Tag> {
        self.tags.get(id)
    }

    pub fn studios(&self) -> &[Studio] {
        self.studios.rows()
    }

    pub fn actors(&self) -> &[Actor] {
        self.actors.rows()
    }

    pub fn stage_names(&self) -> &[StageName] {
        self.stage_names.rows()
    }

    pub fn productions(&self) -> &[Production] {
        self.productions.rows()
    }

    pub fn performances(&self) -> &[Performance] {
        self.performances.rows()
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.rows()
    }

    pub fn production_tags(&self) -> &[ProductionTag] {
        self.production_tags.rows()
    }

    pub fn stage_names_for_actor(&self, actor_id: i64) -> impl Iterator<Item = &StageName> + '_ {
        self.stage_names.iter_by("actor_id", actor_id)
    }

    pub fn performances_for_production(
        &self,
        production_id: i64,
    ) -> impl Iterator<Item = &Performance> + '_ {
        self.performances.iter_by("production_id", production_id)
    }

    pub fn performances_for_stage_name(
        &self,
        stage_name_id: i64,
    ) -> impl Iterator<Item = &Performance> + '_ {
        self.performances.iter_by("stage_name_id", stage_name_id)
    }

    /// Tag links of one production, in stored order.
    pub fn tag_links_for(&self, production_id: i64) -> impl Iterator<Item = &ProductionTag> + '_ {
        self.production_tags.iter_by("production_id", production_id)
    }

    /// Productions whose `parent_id` is the given album, in stored order.
    pub fn children_of(&self, album_id: i64) -> impl Iterator<Item = &Production> + '_ {
        self.productions.iter_by("parent_id", album_id)
    }

    pub fn counts(&self) -> StoreCounts {
        StoreCounts {
            studios: self.studios.len(),
            actors: self.actors.len(),
            stage_names: self.stage_names.len(),
            productions: self.productions.len(),
            performances: self.performances.len(),
            tags: self.tags.len(),
            production_tags: self.production_tags.len(),
        }
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
