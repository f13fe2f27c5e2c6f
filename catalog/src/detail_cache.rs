use crate::model::DetailRecord;
use crate::model::EntityId;
use crate::source::CatalogSource;
use futures::future::join_all;
use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Outcome of a single [`DetailCache::ensure`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnsureReport {
    /// Distinct ids that were asked for
    pub requested: usize,
    /// Ids fetched and inserted by this call
    pub fetched: usize,
    /// Ids whose fetch failed; they stay absent
    pub failed: Vec<EntityId>,
    /// Size of each dispatched batch, in dispatch order
    pub batch_sizes: Vec<usize>,
}

impl EnsureReport {
    pub fn was_noop(&self) -> bool {
        self.batch_sizes.is_empty()
    }
}

/// Lazily populated `id -> DetailRecord` store.
///
/// Entries are never evicted or replaced. Ids that fail to load are left
/// absent so a later `ensure` may try them again.
#[derive(Debug)]
pub struct DetailCache {
    records: HashMap<EntityId, Arc<DetailRecord>>,
    batch_size: usize,
}

impl DetailCache {
    pub fn new(batch_size: usize) -> Self {
        Self {
            records: HashMap::new(),
            batch_size: batch_size.max(1),
        }
    }

    pub fn get(&self, id: EntityId) -> Option<Arc<DetailRecord>> {
        self.records.get(&id).cloned()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.records.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Insert a record unless one is already cached for its id.
    pub fn insert(&mut self, record: DetailRecord) -> Arc<DetailRecord> {
        self.records
            .entry(record.id)
            .or_insert_with(|| Arc::new(record))
            .clone()
    }

    /// Make sure every id in `ids` has a record, fetching the missing ones.
    ///
    /// Missing ids are fetched in batches of `batch_size`: concurrently within
    /// a batch, one batch after another. Individual failures are logged and
    /// skipped.
    pub async fn ensure<S>(&mut self, source: &S, ids: &[EntityId]) -> EnsureReport
    where
        S: CatalogSource + ?Sized,
    {
        let mut seen = HashSet::with_capacity(ids.len());
        let distinct: Vec<EntityId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();
        let missing: Vec<EntityId> = distinct
            .iter()
            .copied()
            .filter(|id| !self.records.contains_key(id))
            .collect();

        let mut report = EnsureReport {
            requested: distinct.len(),
            ..Default::default()
        };
        if missing.is_empty() {
            return report;
        }

        let total_batches = missing.len().div_ceil(self.batch_size);
        for (batch_idx, batch) in missing.chunks(self.batch_size).enumerate() {
            debug!(
                "Fetching detail batch {}/{} ({} ids)",
                batch_idx + 1,
                total_batches,
                batch.len()
            );
            report.batch_sizes.push(batch.len());

            let results = join_all(batch.iter().map(|&id| async move {
                (id, source.detail(id).await)
            }))
            .await;

            for (id, result) in results {
                match result {
                    Ok(record) if record.id == id => {
                        self.records.insert(id, Arc::new(record));
                        report.fetched += 1;
                    }
                    Ok(record) => {
                        warn!(
                            requested = id,
                            received = record.id,
                            "detail response id mismatch; discarding"
                        );
                        report.failed.push(id);
                    }
                    Err(err) => {
                        warn!(id, "detail fetch failed: {err:#}");
                        report.failed.push(id);
                    }
                }
            }
        }

        info!(
            fetched = report.fetched,
            failed = report.failed.len(),
            cached = self.records.len(),
            "detail cache filled"
        );
        report
    }
}
