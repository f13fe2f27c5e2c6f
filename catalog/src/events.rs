use crate::debounce::Debouncer;
use crate::model::EntityId;
use crate::query::SortKey;
use crate::renderer::Renderer;
use crate::session::Session;
use crate::source::CatalogSource;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio::time::sleep_until;
use tracing::debug;

/// Interactions relayed from the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchChanged(String),
    CategoryToggled(String),
    GenerationChanged(Option<u8>),
    SortChanged(SortKey),
    ClearFilters,
    PrevPage,
    NextPage,
    CardSelected(EntityId),
}

/// Drive `session` from `events` until the channel closes.
///
/// Search edits are debounced using the session's configured quiet period;
/// every other event is dispatched as soon as it arrives. A search still
/// pending when the channel closes is dispatched before returning.
pub async fn run_event_loop<S, R>(session: &mut Session<S, R>, mut events: mpsc::Receiver<UiEvent>)
where
    S: CatalogSource,
    R: Renderer,
{
    let mut search = Debouncer::new(session.catalog().config().search_debounce());

    loop {
        let deadline = search.deadline();
        tokio::select! {
            event = events.recv() => match event {
                Some(UiEvent::SearchChanged(text)) => search.push(text, Instant::now()),
                Some(event) => dispatch(session, event).await,
                None => break,
            },
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                if let Some(text) = search.poll(Instant::now()) {
                    debug!(%text, "dispatching debounced search");
                    session.on_search_change(&text).await;
                }
            }
        }
    }

    if let Some(text) = search.flush() {
        session.on_search_change(&text).await;
    }
}

async fn dispatch<S, R>(session: &mut Session<S, R>, event: UiEvent)
where
    S: CatalogSource,
    R: Renderer,
{
    match event {
        UiEvent::SearchChanged(text) => session.on_search_change(&text).await,
        UiEvent::CategoryToggled(label) => session.on_category_toggle(&label).await,
        UiEvent::GenerationChanged(number) => session.on_generation_change(number).await,
        UiEvent::SortChanged(key) => session.on_sort_change(key).await,
        UiEvent::ClearFilters => session.on_clear_filters().await,
        UiEvent::PrevPage => session.on_prev_page().await,
        UiEvent::NextPage => session.on_next_page().await,
        UiEvent::CardSelected(id) => session.on_card_selected(id).await,
    }
}
