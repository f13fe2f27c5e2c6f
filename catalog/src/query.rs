use crate::category_cache::normalize_label;
use crate::detail_cache::DetailCache;
use crate::error::CatalogError;
use crate::error::Result;
use crate::generation::Generation;
use crate::index::EntityIndex;
use crate::model::DetailRecord;
use crate::model::EntityId;
use crate::model::EntityRef;
use icu_collator::Collator;
use icu_collator::CollatorBorrowed;
use icu_collator::options::CollatorOptions;
use icu_locale_core::Locale;
use serde::Deserialize;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::str::FromStr;

/// Ordering applied as the last pipeline step.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Height,
    Weight,
}

impl SortKey {
    pub fn parse(value: &str) -> Result<Self> {
        SortKey::from_str(value.trim())
            .map_err(|_| CatalogError::InvalidSortKey(value.to_string()))
    }

    /// Whether ordering needs detail records for every candidate.
    pub fn needs_details(self) -> bool {
        matches!(self, SortKey::Height | SortKey::Weight)
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Height => "Height",
            SortKey::Weight => "Weight",
        }
    }
}

/// Filter/sort state. Every setter consumes the state and returns the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_text: String,
    pub category: Option<String>,
    pub generation: Option<Generation>,
    pub sort: SortKey,
}

impl FilterState {
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Select a category; `None` or a blank label clears it.
    pub fn with_category(mut self, label: Option<&str>) -> Self {
        self.category = label.map(normalize_label).filter(|label| !label.is_empty());
        self
    }

    /// Select `label`, or clear the selection when it is already active.
    pub fn toggle_category(self, label: &str) -> Self {
        let label = normalize_label(label);
        if self.category.as_deref() == Some(label.as_str()) {
            self.with_category(None)
        } else {
            self.with_category(Some(label.as_str()))
        }
    }

    pub fn with_generation(mut self, generation: Option<Generation>) -> Self {
        self.generation = generation;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn cleared(self) -> Self {
        Self::default()
    }

    /// Trimmed, lowercased search text, if any.
    pub fn search_needle(&self) -> Option<String> {
        let needle = self.search_text.trim().to_lowercase();
        (!needle.is_empty()).then_some(needle)
    }
}

/// Locale-aware name comparison.
pub struct NameCollator {
    inner: CollatorBorrowed<'static>,
}

impl std::fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameCollator").finish_non_exhaustive()
    }
}

impl NameCollator {
    pub fn new(locale: Locale) -> Result<Self> {
        let inner = Collator::try_new(locale.into(), CollatorOptions::default())
            .map_err(|err| CatalogError::InvalidConfig(format!("collator unavailable: {err}")))?;
        Ok(Self { inner })
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.inner.compare(left, right)
    }
}

/// Steps 1-3 of the pipeline: generation range, text, category.
///
/// When a category is active, `category_members` must hold its resolved
/// member set; `None` then yields an empty result rather than the whole
/// universe. Output keeps index order.
pub fn filter(
    index: &EntityIndex,
    state: &FilterState,
    category_members: Option<&HashSet<EntityId>>,
) -> Vec<EntityRef> {
    if state.category.is_some() && category_members.is_none() {
        return Vec::new();
    }
    let needle = state.search_needle();
    let range = state.generation.map(|generation| generation.range);

    index
        .entries()
        .iter()
        .filter(|entity| range.is_none_or(|range| range.contains(entity.id)))
        .filter(|entity| {
            needle
                .as_deref()
                .is_none_or(|needle| entity.name.to_lowercase().contains(needle))
        })
        .filter(|entity| {
            state.category.is_none()
                || category_members.is_some_and(|members| members.contains(&entity.id))
        })
        .cloned()
        .collect()
}

/// Step 4 of the pipeline.
///
/// For height/weight, entities without a cached detail record keep their
/// positions; the rest are stably sorted into the remaining slots.
pub fn sort(
    entities: &mut [EntityRef],
    key: SortKey,
    details: &DetailCache,
    collator: &NameCollator,
) {
    match key {
        SortKey::Id => entities.sort_by_key(|entity| entity.id),
        SortKey::Name => entities.sort_by(|a, b| collator.compare(&a.name, &b.name)),
        SortKey::Height => sort_by_detail(entities, details, |record| record.height),
        SortKey::Weight => sort_by_detail(entities, details, |record| record.weight),
    }
}

fn sort_by_detail(
    entities: &mut [EntityRef],
    details: &DetailCache,
    value: impl Fn(&DetailRecord) -> u32,
) {
    let mut slots = Vec::new();
    let mut orderable = Vec::new();
    for (slot, entity) in entities.iter().enumerate() {
        if let Some(record) = details.get(entity.id) {
            slots.push(slot);
            orderable.push((value(&record), entity.clone()));
        }
    }
    orderable.sort_by_key(|(value, _)| *value);
    for (slot, (_, entity)) in slots.into_iter().zip(orderable) {
        entities[slot] = entity;
    }
}

/// The full pipeline over explicit inputs. Performs no I/O.
pub fn apply(
    index: &EntityIndex,
    state: &FilterState,
    category_members: Option<&HashSet<EntityId>>,
    details: &DetailCache,
    collator: &NameCollator,
) -> Vec<EntityRef> {
    let mut entities = filter(index, state, category_members);
    sort(&mut entities, state.sort, details, collator);
    entities
}
