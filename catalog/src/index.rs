use crate::error::CatalogError;
use crate::error::Result;
use crate::error::StartupStage;
use crate::model::EntityId;
use crate::model::EntityRef;
use crate::model::NamedResource;
use crate::source::CatalogSource;
use std::collections::HashMap;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// The full lightweight `{id, name}` list, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct EntityIndex {
    entries: Vec<EntityRef>,
    positions: HashMap<EntityId, usize>,
}

impl EntityIndex {
    /// Load the universe from the listing endpoint.
    ///
    /// Any network failure is fatal: there is no partial index.
    pub async fn load<S>(source: &S, max_entity_id: EntityId) -> Result<Self>
    where
        S: CatalogSource + ?Sized,
    {
        let total = source
            .count()
            .await
            .map_err(|source| CatalogError::Startup {
                stage: StartupStage::Count,
                source,
            })?;
        debug!(total, "catalog universe size");

        let listing = source
            .listing(total)
            .await
            .map_err(|source| CatalogError::Startup {
                stage: StartupStage::Listing,
                source,
            })?;

        let index = Self::from_listing(listing, max_entity_id);
        info!(
            entities = index.len(),
            max_entity_id, "catalog index loaded"
        );
        Ok(index)
    }

    /// Build an index from raw listing entries, dropping entries above the
    /// ceiling, entries without a numeric locator and duplicate ids.
    pub fn from_listing(listing: Vec<NamedResource>, max_entity_id: EntityId) -> Self {
        let mut index = Self::default();
        for resource in listing {
            let Some(id) = resource.entity_id() else {
                warn!(locator = %resource.url, "skipping listing entry without numeric id");
                continue;
            };
            if id > max_entity_id || index.positions.contains_key(&id) {
                continue;
            }
            index.positions.insert(id, index.entries.len());
            index.entries.push(EntityRef {
                id,
                name: resource.name,
                locator: resource.url,
            });
        }
        index
    }

    pub fn get(&self, id: EntityId) -> Option<&EntityRef> {
        self.positions.get(&id).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.positions.contains_key(&id)
    }

    pub fn entries(&self) -> &[EntityRef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
