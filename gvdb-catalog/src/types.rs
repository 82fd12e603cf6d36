//! Data model types for the production catalog.
//!
//! These types mirror the bulk snapshot schema: studios, actors, stage names,
//! productions, performances, tags, and production-tag links. Field names and
//! enum vocabularies are part of the wire format and serialize unchanged.

use serde::{Deserialize, Deserializer, Serialize};

// ── Studio ──────────────────────────────────────────────────────────────────

/// A studio (label) that releases productions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Studio {
    pub id: i64,
    pub name: String,
}

// ── Actor ───────────────────────────────────────────────────────────────────

/// Tag prefixes reserved for placeholder actors (pooled, anonymous, or
/// studio-level stand-ins).
pub const SYNTHETIC_ACTOR_PATTERNS: &[&str] =
    &["STUDIO_", "ANONYMOUS_POOL", "GIRL_POOL", "UNKNOWN_POOL"];

/// The only placeholder pattern hidden from production credits.
pub const STUDIO_PLACEHOLDER_PATTERN: &str = "STUDIO_";

/// A performer. Credited per studio through [`StageName`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    /// Display name / unique tag.
    pub actor_tag: String,
    #[serde(
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub gvdb_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Actor {
    /// Whether this actor is any kind of placeholder (studio, pool, unknown).
    pub fn is_synthetic(&self) -> bool {
        SYNTHETIC_ACTOR_PATTERNS
            .iter()
            .any(|p| self.actor_tag.contains(p))
    }

    /// Whether this actor is a studio-level placeholder row.
    pub fn is_studio_placeholder(&self) -> bool {
        self.actor_tag.contains(STUDIO_PLACEHOLDER_PATTERN)
    }
}

// ── Stage Name ──────────────────────────────────────────────────────────────

/// An actor's credited name at one studio. `(actor_id, studio_id)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageName {
    pub id: i64,
    pub actor_id: i64,
    pub studio_id: i64,
    pub stage_name: String,
}

// ── Production ──────────────────────────────────────────────────────────────

/// Kind of production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionType {
    Single,
    Album,
    Segment,
}

impl ProductionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Album => "album",
            Self::Segment => "segment",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "single" => Some(Self::Single),
            "album" => Some(Self::Album),
            "segment" => Some(Self::Segment),
            _ => None,
        }
    }
}

/// A single, an album, or a segment of an album.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Production {
    pub id: i64,
    pub code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub production_type: ProductionType,
    pub studio_id: i64,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Owning album; set only for segments.
    #[serde(default)]
    pub parent_id: Option<i64>,
    /// Denormalized cast (stage name ids); set only for albums.
    #[serde(default)]
    pub performer_ids: Option<Vec<i64>>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Production {
    pub fn is_segment(&self) -> bool {
        self.production_type == ProductionType::Segment
    }

    pub fn is_album(&self) -> bool {
        self.production_type == ProductionType::Album
    }

    /// Key used when counting "real" productions: segments collapse onto
    /// their album. A segment with no parent counts as itself.
    pub fn canonical_key(&self) -> i64 {
        match (self.production_type, self.parent_id) {
            (ProductionType::Segment, Some(parent)) => parent,
            _ => self.id,
        }
    }

    /// Album cast list, empty for non-albums.
    pub fn performer_ids(&self) -> &[i64] {
        self.performer_ids.as_deref().unwrap_or(&[])
    }
}

// ── Performance ─────────────────────────────────────────────────────────────

/// Role played in a performance.
///
/// Unrecognized strings are kept verbatim in `Other` so they serialize back
/// unchanged; they only tally as "other" in statistics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Top,
    Bottom,
    Giver,
    Receiver,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Giver => "giver",
            Self::Receiver => "receiver",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "top" => Self::Top,
            "bottom" => Self::Bottom,
            "giver" => Self::Giver,
            "receiver" => Self::Receiver,
            _ => Self::Other(s),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// How a performer appears on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformerType {
    Named,
    Anonymous,
    Masked,
    PovOnly,
}

impl Default for PerformerType {
    fn default() -> Self {
        Self::Named
    }
}

impl PerformerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Named => "named",
            Self::Anonymous => "anonymous",
            Self::Masked => "masked",
            Self::PovOnly => "pov_only",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "anonymous" => Self::Anonymous,
            "masked" => Self::Masked,
            "pov_only" | "pov" => Self::PovOnly,
            _ => Self::Named,
        }
    }
}

/// One stage name's participation in a single or segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub id: i64,
    pub production_id: i64,
    pub stage_name_id: i64,
    #[serde(default)]
    pub role: Option<Role>,
    /// Missing, null, or unrecognized values read as `Named`.
    #[serde(default, deserialize_with = "lenient_performer_type")]
    pub performer_type: PerformerType,
}

// ── Tag ─────────────────────────────────────────────────────────────────────

/// Tag vocabulary category.
///
/// `Scenario` exists in the editing vocabulary only; browsing views bucket
/// the other four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    SexAct,
    Style,
    BodyType,
    Source,
    Scenario,
}

impl TagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SexAct => "sex_act",
            Self::Style => "style",
            Self::BodyType => "body_type",
            Self::Source => "source",
            Self::Scenario => "scenario",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sex_act" => Some(Self::SexAct),
            "style" => Some(Self::Style),
            "body_type" => Some(Self::BodyType),
            "source" => Some(Self::Source),
            "scenario" => Some(Self::Scenario),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub category: TagCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Tag {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// Many-to-many link between a production and a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductionTag {
    pub production_id: i64,
    pub tag_id: i64,
}

// ── Snapshot ────────────────────────────────────────────────────────────────

/// All seven collections of a bulk export, in stored order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub studios: Vec<Studio>,
    pub actors: Vec<Actor>,
    pub stage_names: Vec<StageName>,
    pub productions: Vec<Production>,
    pub performances: Vec<Performance>,
    pub tags: Vec<Tag>,
    pub production_tags: Vec<ProductionTag>,
}

impl Snapshot {
    /// Total number of records across all collections.
    pub fn record_count(&self) -> usize {
        self.studios.len()
            + self.actors.len()
            + self.stage_names.len()
            + self.productions.len()
            + self.performances.len()
            + self.tags.len()
            + self.production_tags.len()
    }
}

fn lenient_performer_type<'de, D>(deserializer: D) -> Result<PerformerType, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .as_deref()
        .map(PerformerType::from_str_loose)
        .unwrap_or_default())
}

/// Accepts a string or a number (exports disagree on `gvdb_id`).
fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
