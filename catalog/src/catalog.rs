use crate::category_cache::CategoryCache;
use crate::config::CatalogConfig;
use crate::detail_cache::DetailCache;
use crate::detail_cache::EnsureReport;
use crate::error::CatalogError;
use crate::error::Result;
use crate::index::EntityIndex;
use crate::model::DetailRecord;
use crate::model::EntityId;
use crate::model::EntityRef;
use crate::pagination::PageView;
use crate::pagination::paginate;
use crate::query;
use crate::query::FilterState;
use crate::query::NameCollator;
use crate::source::CatalogSource;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;
use tracing::info;

/// Query/cache engine over one upstream source.
///
/// Fetching methods take `&mut self`, so cache fills are never interleaved
/// and each id is fetched at most once per `ensure`.
pub struct Catalog<S> {
    config: CatalogConfig,
    source: S,
    index: EntityIndex,
    details: DetailCache,
    categories: CategoryCache,
    collator: NameCollator,
}

impl<S> std::fmt::Debug for Catalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("entities", &self.index.len())
            .field("cached_details", &self.details.len())
            .field("cached_categories", &self.categories.len())
            .finish_non_exhaustive()
    }
}

impl<S: CatalogSource> Catalog<S> {
    /// Validate `config` and load the entity index. Index failures are fatal.
    pub async fn load(source: S, config: CatalogConfig) -> Result<Self> {
        config.validate().map_err(CatalogError::InvalidConfig)?;
        info!("Loading catalog index from {}", config.api_base_url);
        let index = EntityIndex::load(&source, config.max_entity_id).await?;
        Self::with_index(source, config, index)
    }

    /// Build a catalog around an already loaded index.
    pub fn with_index(source: S, config: CatalogConfig, index: EntityIndex) -> Result<Self> {
        let collator = NameCollator::new(config.locale().map_err(CatalogError::InvalidConfig)?)?;
        Ok(Self {
            details: DetailCache::new(config.detail_batch_size),
            categories: CategoryCache::new(),
            config,
            source,
            index,
            collator,
        })
    }

    /// Run the filter/sort pipeline for `state`.
    ///
    /// Fetches the category membership if a category is active, and details
    /// for every candidate when sorting by height or weight.
    pub async fn query(&mut self, state: &FilterState) -> Result<Vec<EntityRef>> {
        let start = Instant::now();

        let members = match state.category.as_deref() {
            Some(label) => Some(
                self.categories
                    .ids_for(&self.source, label, &self.index)
                    .await?,
            ),
            None => None,
        };

        let mut entities = query::filter(&self.index, state, members.as_deref());

        if state.sort.needs_details() {
            let ids: Vec<EntityId> = entities.iter().map(|entity| entity.id).collect();
            self.details.ensure(&self.source, &ids).await;
        }
        query::sort(&mut entities, state.sort, &self.details, &self.collator);

        debug!(
            results = entities.len(),
            sort = %state.sort,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "query completed"
        );
        Ok(entities)
    }

    /// Resolve page `page_number` of `ordered`, fetching details for exactly
    /// that slice.
    pub async fn page(&mut self, ordered: &[EntityRef], page_number: usize) -> PageView {
        let slice = paginate(ordered, page_number, self.config.page_size);
        let ids: Vec<EntityId> = slice.items.iter().map(|entity| entity.id).collect();
        self.details.ensure(&self.source, &ids).await;

        let mut records = Vec::with_capacity(ids.len());
        let mut missing = Vec::new();
        for id in ids {
            match self.details.get(id) {
                Some(record) => records.push(record),
                None => missing.push(id),
            }
        }

        PageView {
            records,
            missing,
            slice_len: slice.items.len(),
            page_number: slice.page_number,
            total_pages: slice.total_pages,
        }
    }

    pub async fn ensure_details(&mut self, ids: &[EntityId]) -> EnsureReport {
        self.details.ensure(&self.source, ids).await
    }

    /// Detail record for a single entity, fetching it if needed.
    pub async fn detail(&mut self, id: EntityId) -> Result<Arc<DetailRecord>> {
        if let Some(record) = self.details.get(id) {
            return Ok(record);
        }
        let record = self
            .source
            .detail(id)
            .await
            .map_err(|source| CatalogError::DetailFetch { id, source })?;
        if record.id != id {
            return Err(CatalogError::DetailFetch {
                id,
                source: anyhow::anyhow!("response carried id {}", record.id),
            });
        }
        Ok(self.details.insert(record))
    }

    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    pub fn details(&self) -> &DetailCache {
        &self.details
    }

    pub fn categories(&self) -> &CategoryCache {
        &self.categories
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
