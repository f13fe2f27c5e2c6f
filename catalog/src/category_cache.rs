use crate::error::CatalogError;
use crate::error::Result;
use crate::index::EntityIndex;
use crate::model::EntityId;
use crate::model::NamedResource;
use crate::source::CatalogSource;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use tracing::info;

/// Normalized form of a category label: trimmed and lowercased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Lazily populated `label -> {id}` store.
///
/// Each label is fetched at most once successfully; sets are never evicted.
#[derive(Debug, Default)]
pub struct CategoryCache {
    sets: HashMap<String, Arc<HashSet<EntityId>>>,
}

impl CategoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<Arc<HashSet<EntityId>>> {
        self.sets.get(&normalize_label(label)).cloned()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Member ids of `label`, restricted to ids present in `index`.
    pub async fn ids_for<S>(
        &mut self,
        source: &S,
        label: &str,
        index: &EntityIndex,
    ) -> Result<Arc<HashSet<EntityId>>>
    where
        S: CatalogSource + ?Sized,
    {
        let label = normalize_label(label);
        if let Some(set) = self.sets.get(&label) {
            debug!(%label, "category membership cache hit");
            return Ok(set.clone());
        }

        let members = source
            .category_members(&label)
            .await
            .map_err(|source| CatalogError::CategoryFetch {
                label: label.clone(),
                source,
            })?;

        let ids: HashSet<EntityId> = members
            .iter()
            .filter_map(NamedResource::entity_id)
            .filter(|id| index.contains(*id))
            .collect();
        info!(%label, members = ids.len(), "category membership loaded");

        let set = Arc::new(ids);
        self.sets.insert(label, set.clone());
        Ok(set)
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, label: &str, ids: impl IntoIterator<Item = EntityId>) {
        self.sets
            .insert(normalize_label(label), Arc::new(ids.into_iter().collect()));
    }
}
