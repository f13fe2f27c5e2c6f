use catalog_test_support::FakeSource;
use pokedex_catalog::CatalogError;
use pokedex_catalog::CategoryCache;
use pokedex_catalog::EntityIndex;
use pretty_assertions::assert_eq;

async fn index(source: &FakeSource) -> EntityIndex {
    EntityIndex::load(source, 809).await.unwrap()
}

#[tokio::test]
async fn membership_is_fetched_once_per_label() {
    let source = FakeSource::pokedex(809);
    let index = index(&source).await;
    let mut cache = CategoryCache::new();

    let first = cache.ids_for(&source, "fire", &index).await.unwrap();
    let second = cache.ids_for(&source, " Fire ", &index).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(source.category_calls(), vec!["fire".to_string()]);

    cache.ids_for(&source, "water", &index).await.unwrap();
    assert_eq!(
        source.category_calls(),
        vec!["fire".to_string(), "water".to_string()]
    );
}

#[tokio::test]
async fn members_outside_the_index_are_dropped() {
    let source = FakeSource::pokedex(809);
    let index = index(&source).await;
    let mut cache = CategoryCache::new();

    let fire = cache.ids_for(&source, "fire", &index).await.unwrap();
    assert!(fire.contains(&4));
    assert!(fire.contains(&727));
    assert!(!fire.contains(&10034));
    assert!(fire.iter().all(|id| index.contains(*id)));
}

#[tokio::test]
async fn members_are_bounded_by_a_smaller_universe() {
    let source = FakeSource::pokedex(151);
    let index = index(&source).await;
    let mut cache = CategoryCache::new();

    let water = cache.ids_for(&source, "water", &index).await.unwrap();
    let mut ids: Vec<u32> = water.iter().copied().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![7, 8, 9, 54, 55, 60, 61, 62]);
}

#[tokio::test]
async fn failures_propagate_and_are_not_cached() {
    let source = FakeSource::pokedex(151).failing_category("ghost");
    let index = index(&source).await;
    let mut cache = CategoryCache::new();

    let err = cache.ids_for(&source, "ghost", &index).await.unwrap_err();
    assert!(matches!(err, CatalogError::CategoryFetch { ref label, .. } if label == "ghost"));
    assert!(cache.get("ghost").is_none());

    assert!(cache.ids_for(&source, "ghost", &index).await.is_err());
    assert_eq!(source.category_calls().len(), 2);
}
