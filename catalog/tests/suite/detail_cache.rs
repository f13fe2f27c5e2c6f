use catalog_test_support::FakeSource;
use catalog_test_support::height_of;
use pokedex_catalog::DetailCache;
use pokedex_catalog::EntityId;
use pretty_assertions::assert_eq;

#[test_log::test(tokio::test)]
async fn ensure_twice_fetches_each_id_once() {
    let source = FakeSource::pokedex(151);
    let mut cache = DetailCache::new(20);
    let ids: Vec<EntityId> = (1..=30).collect();

    let first = cache.ensure(&source, &ids).await;
    assert_eq!(first.fetched, 30);
    assert_eq!(source.detail_call_count(), 30);

    let second = cache.ensure(&source, &ids).await;
    assert!(second.was_noop());
    assert_eq!(second.fetched, 0);
    assert_eq!(source.detail_call_count(), 30);

    // Overlapping request only fetches the new ids.
    let overlap: Vec<EntityId> = (25..=40).collect();
    let third = cache.ensure(&source, &overlap).await;
    assert_eq!(third.requested, 16);
    assert_eq!(third.fetched, 10);
    assert_eq!(source.detail_call_count(), 40);
}

#[test_log::test(tokio::test)]
async fn duplicate_ids_in_one_request_are_fetched_once() {
    let source = FakeSource::pokedex(151);
    let mut cache = DetailCache::new(20);

    let report = cache.ensure(&source, &[25, 25, 26, 25, 26]).await;
    assert_eq!(report.requested, 2);
    assert_eq!(source.detail_calls(), vec![25, 26]);
}

#[tokio::test]
async fn forty_five_missing_ids_dispatch_three_sequential_batches() {
    let source = FakeSource::pokedex(151);
    let mut cache = DetailCache::new(20);
    let ids: Vec<EntityId> = (1..=45).collect();

    let report = cache.ensure(&source, &ids).await;
    assert_eq!(report.batch_sizes, vec![20, 20, 5]);
    assert_eq!(report.fetched, 45);
    assert_eq!(source.peak_in_flight(), 20);
    // Batches are dispatched in id order, one after another.
    assert_eq!(source.detail_calls(), ids);
}

#[tokio::test]
async fn batch_size_bounds_concurrency() {
    let source = FakeSource::pokedex(151);
    let mut cache = DetailCache::new(7);
    let ids: Vec<EntityId> = (1..=30).collect();

    let report = cache.ensure(&source, &ids).await;
    assert_eq!(report.batch_sizes, vec![7, 7, 7, 7, 2]);
    assert_eq!(source.peak_in_flight(), 7);
}

#[test_log::test(tokio::test)]
async fn failed_ids_stay_absent_without_aborting_siblings() {
    let source = FakeSource::pokedex(151).failing_details([3, 22, 41]);
    let mut cache = DetailCache::new(20);
    let ids: Vec<EntityId> = (1..=45).collect();

    let report = cache.ensure(&source, &ids).await;
    assert_eq!(report.failed, vec![3, 22, 41]);
    assert_eq!(report.fetched, 42);
    assert_eq!(report.batch_sizes, vec![20, 20, 5]);
    assert!(cache.get(3).is_none());
    assert!(cache.get(41).is_none());
    assert_eq!(cache.get(4).map(|record| record.height), Some(height_of(4)));

    // Failed ids are retried by a later ensure; cached ones are not.
    let retry = cache.ensure(&source, &ids).await;
    assert_eq!(retry.batch_sizes, vec![3]);
    assert_eq!(source.detail_call_count(), 48);
}

#[tokio::test]
async fn records_match_requested_ids() {
    let source = FakeSource::pokedex(151);
    let mut cache = DetailCache::new(20);
    cache.ensure(&source, &[1, 4, 150]).await;
    for id in [1, 4, 150] {
        assert_eq!(cache.get(id).map(|record| record.id), Some(id));
    }
}
