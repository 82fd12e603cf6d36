//! Sort fields, single-key stable sorting, and the sort preference list.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Actor browse sort fields. Unrecognized names parse as `Unknown`, which
/// leaves the order untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorSortField {
    Name,
    Count,
    Latest,
    NewestEdit,
    #[serde(other)]
    Unknown,
}

impl ActorSortField {
    pub const ALL: [ActorSortField; 4] = [Self::Name, Self::Count, Self::Latest, Self::NewestEdit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Count => "count",
            Self::Latest => "latest",
            Self::NewestEdit => "newest_edit",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "name" => Self::Name,
            "count" => Self::Count,
            "latest" => Self::Latest,
            "newest_edit" => Self::NewestEdit,
            _ => Self::Unknown,
        }
    }
}

/// Production browse sort fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionSortField {
    Studio,
    Code,
    Title,
    Date,
    Updated,
    #[serde(other)]
    Unknown,
}

impl ProductionSortField {
    pub const ALL: [ProductionSortField; 5] =
        [Self::Studio, Self::Code, Self::Title, Self::Date, Self::Updated];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Studio => "studio",
            Self::Code => "code",
            Self::Title => "title",
            Self::Date => "date",
            Self::Updated => "updated",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "studio" => Self::Studio,
            "code" => Self::Code,
            "title" => Self::Title,
            "date" => Self::Date,
            "updated" => Self::Updated,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ActorSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ProductionSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sort request. No field means stored order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort<F> {
    pub field: Option<F>,
    #[serde(default)]
    pub order: SortOrder,
}

impl<F> Default for Sort<F> {
    fn default() -> Self {
        Self {
            field: None,
            order: SortOrder::Asc,
        }
    }
}

impl<F> Sort<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self {
            field: Some(field),
            order,
        }
    }

    pub fn asc(field: F) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: F) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Comparable value of one sort field. Missing strings compare as empty,
/// missing numbers as zero.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Number(i64),
    Text(Cow<'a, str>),
}

impl<'a> SortKey<'a> {
    pub fn text(value: Option<&'a str>) -> Self {
        Self::Text(Cow::Borrowed(value.unwrap_or("")))
    }
}

/// A row that can be ordered by fields of type `F`.
pub trait Sortable<F> {
    /// The value to compare, or `None` for a field that does not apply.
    fn sort_key(&self, field: F) -> Option<SortKey<'_>>;
}

/// Stable sort of `rows` by the requested field. Equal keys keep their
/// input order in both directions; unknown fields leave `rows` untouched.
pub fn sort_rows<F: Copy, T: Sortable<F>>(rows: &mut [T], sort: &Sort<F>) {
    let Some(field) = sort.field else {
        return;
    };
    let Some(first) = rows.first() else {
        return;
    };
    if first.sort_key(field).is_none() {
        return;
    }
    rows.sort_by(|a, b| {
        let ordering = a.sort_key(field).cmp(&b.sort_key(field));
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

/// Ordered sort preferences, as kept by a browsing view.
///
/// Clicking a field moves it to the front in ascending order; clicking the
/// current front field flips its direction. Only the front field is ever
/// applied; the rest are remembered for when they return to the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<F> {
    keys: Vec<(F, SortOrder)>,
}

impl<F: Copy + PartialEq> SortState<F> {
    pub fn new(keys: impl IntoIterator<Item = (F, SortOrder)>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn click(&mut self, field: F) {
        match self.keys.iter().position(|(f, _)| *f == field) {
            Some(0) => {
                self.keys[0].1 = self.keys[0].1.toggled();
            }
            Some(idx) => {
                self.keys.remove(idx);
                self.keys.insert(0, (field, SortOrder::Asc));
            }
            None => self.keys.insert(0, (field, SortOrder::Asc)),
        }
    }

    /// The sort actually applied.
    pub fn primary(&self) -> Sort<F> {
        match self.keys.first() {
            Some(&(field, order)) => Sort::new(field, order),
            None => Sort::default(),
        }
    }

    pub fn keys(&self) -> &[(F, SortOrder)] {
        &self.keys
    }
}

impl Default for SortState<ProductionSortField> {
    /// Studio, code, title, date; all ascending.
    fn default() -> Self {
        Self::new(
            [
                ProductionSortField::Studio,
                ProductionSortField::Code,
                ProductionSortField::Title,
                ProductionSortField::Date,
            ]
            .map(|f| (f, SortOrder::Asc)),
        )
    }
}

impl Default for SortState<ActorSortField> {
    fn default() -> Self {
        Self::new([(ActorSortField::Name, SortOrder::Asc)])
    }
}

#[cfg(test)]
#[path = "tests/sort_tests.rs"]
mod tests;
