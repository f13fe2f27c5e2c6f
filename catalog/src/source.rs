use crate::model::DetailRecord;
use crate::model::EntityId;
use crate::model::NamedResource;
use async_trait::async_trait;

/// Upstream data the engine reads from.
///
/// Implementations perform boundary I/O only; id derivation, ceiling
/// filtering and caching all happen in the engine.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Size of the catalog universe.
    async fn count(&self) -> anyhow::Result<usize>;

    /// The first `limit` entries of the full listing.
    async fn listing(&self, limit: usize) -> anyhow::Result<Vec<NamedResource>>;

    async fn detail(&self, id: EntityId) -> anyhow::Result<DetailRecord>;

    /// Every entity reference belonging to a category.
    async fn category_members(&self, label: &str) -> anyhow::Result<Vec<NamedResource>>;
}

#[async_trait]
impl<T> CatalogSource for std::sync::Arc<T>
where
    T: CatalogSource + ?Sized,
{
    async fn count(&self) -> anyhow::Result<usize> {
        (**self).count().await
    }

    async fn listing(&self, limit: usize) -> anyhow::Result<Vec<NamedResource>> {
        (**self).listing(limit).await
    }

    async fn detail(&self, id: EntityId) -> anyhow::Result<DetailRecord> {
        (**self).detail(id).await
    }

    async fn category_members(&self, label: &str) -> anyhow::Result<Vec<NamedResource>> {
        (**self).category_members(label).await
    }
}
