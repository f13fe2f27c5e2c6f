use serde::Deserialize;
use serde::Serialize;

/// Externally assigned, stable catalog identifier.
pub type EntityId = u32;

/// Category labels the upstream API knows about, in display order.
pub const CATEGORY_LABELS: &[&str] = &[
    "normal", "fire", "water", "electric", "grass", "ice", "fighting", "poison", "ground",
    "flying", "psychic", "bug", "rock", "ghost", "dragon", "dark", "steel", "fairy",
];

/// A `{name, url}` reference as returned by listing and category endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn entity_id(&self) -> Option<EntityId> {
        id_from_locator(&self.url)
    }
}

/// Lightweight index entry, created once when the index loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    pub name: String,
    pub locator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatEntry {
    pub name: String,
    pub value: u32,
}

/// Full attribute set for one entity.
///
/// Height and weight are kept in the upstream units (decimetres and
/// hectograms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: EntityId,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub stats: Vec<StatEntry>,
}

impl DetailRecord {
    pub fn height_meters(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    pub fn weight_kilograms(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    /// Catalog number padded to three digits, e.g. `#004`.
    pub fn display_number(&self) -> String {
        format!("#{:03}", self.id)
    }
}

/// Derives the numeric id from the trailing path segment of a locator,
/// e.g. `https://pokeapi.co/api/v2/pokemon/25/` -> `25`.
pub fn id_from_locator(locator: &str) -> Option<EntityId> {
    locator
        .split('/')
        .rev()
        .find(|segment| !segment.is_empty())
        .and_then(|segment| segment.parse().ok())
}
