use catalog_test_support::FakeSource;
use catalog_test_support::RecordingRenderer;
use pokedex_catalog::CatalogConfig;
use pokedex_catalog::Session;
use pokedex_catalog::UiEvent;
use pokedex_catalog::run_event_loop;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

async fn session() -> (Session<Arc<FakeSource>, RecordingRenderer>, RecordingRenderer) {
    let renderer = RecordingRenderer::default();
    let session = Session::start(
        Arc::new(FakeSource::pokedex(151)),
        CatalogConfig::default(),
        renderer.clone(),
    )
    .await
    .unwrap();
    (session, renderer)
}

fn search(text: &str) -> UiEvent {
    UiEvent::SearchChanged(text.to_string())
}

#[tokio::test(start_paused = true)]
async fn typing_burst_triggers_one_filter_pass() {
    let (mut session, renderer) = session().await;
    let (tx, rx) = mpsc::channel(16);

    let typing = async {
        tx.send(search("c")).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send(search("ch")).await.unwrap();
        sleep(Duration::from_millis(100)).await;
        tx.send(search("cha")).await.unwrap();

        sleep(Duration::from_millis(250)).await;
        assert_eq!(renderer.stats().len(), 1);
        sleep(Duration::from_millis(100)).await;
        assert_eq!(renderer.stats().len(), 2);
        drop(tx);
    };
    tokio::join!(run_event_loop(&mut session, rx), typing);

    assert_eq!(session.filter().search_text, "cha");
    assert_eq!(session.results().len(), 3);
    assert_eq!(renderer.stats().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn separate_pauses_produce_separate_passes() {
    let (mut session, renderer) = session().await;
    let (tx, rx) = mpsc::channel(16);

    let typing = async {
        tx.send(search("pi")).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        tx.send(search("pika")).await.unwrap();
        sleep(Duration::from_millis(400)).await;
        drop(tx);
    };
    tokio::join!(run_event_loop(&mut session, rx), typing);

    let searches: Vec<usize> = renderer
        .stats()
        .iter()
        .map(|stats| stats.result_count)
        .collect();
    // Initial render, then "pi" (caterpie, the pidgey line, pikachu), then "pika".
    assert_eq!(searches, vec![151, 5, 1]);
}

#[tokio::test(start_paused = true)]
async fn pending_search_is_flushed_when_channel_closes() {
    let (mut session, renderer) = session().await;
    let (tx, rx) = mpsc::channel(16);

    tx.send(search("sq")).await.unwrap();
    tx.send(search("squirt")).await.unwrap();
    drop(tx);
    run_event_loop(&mut session, rx).await;

    assert_eq!(session.filter().search_text, "squirt");
    assert_eq!(renderer.stats().len(), 2);
    assert_eq!(renderer.last_page_ids(), Some(vec![7]));
}

#[tokio::test(start_paused = true)]
async fn other_events_are_not_debounced() {
    let (mut session, renderer) = session().await;
    let (tx, rx) = mpsc::channel(16);

    let clicks = async {
        tx.send(UiEvent::NextPage).await.unwrap();
        sleep(Duration::from_millis(1)).await;
        assert_eq!(renderer.last_page_ids(), Some((13..=24).collect()));

        tx.send(search("bulba")).await.unwrap();
        tx.send(UiEvent::CardSelected(25)).await.unwrap();
        sleep(Duration::from_millis(1)).await;
        // The card opened while the search is still waiting out its pause.
        assert_eq!(renderer.stats().len(), 1);
        drop(tx);
    };
    tokio::join!(run_event_loop(&mut session, rx), clicks);

    assert_eq!(session.filter().search_text, "bulba");
    assert_eq!(renderer.stats().len(), 2);
}
