/*!
# Pokédex Catalog

In-memory query/cache engine for a creature catalog served by a public REST
API. Given a filter/sort state and a page number it decides which entities to
show, and makes sure their detail records are loaded at most once.

## Pipeline

```text
UI event
  └─> FilterState (pure setters)
        └─> generation range → name search → category membership → sort
              └─> pagination (fixed page size)
                    └─> detail cache fill for the visible slice
                          └─> Renderer
```

## Caches

- **Detail cache**: `id -> DetailRecord`, filled in bounded batches
  (20 concurrent fetches by default, batches run one after another). Failed
  ids are logged and left absent.
- **Category cache**: `label -> {id}`, one fetch per label.

Neither cache evicts: the upstream data is static for the process lifetime.

## Example

```rust,no_run
use pokedex_catalog::{Catalog, CatalogConfig, CatalogSource, FilterState, SortKey};

async fn first_page<S: CatalogSource>(source: S) -> pokedex_catalog::Result<()> {
    let mut catalog = Catalog::load(source, CatalogConfig::default()).await?;
    let state = FilterState::default().with_search("char").with_sort(SortKey::Weight);
    let results = catalog.query(&state).await?;
    let page = catalog.page(&results, 1).await;
    for record in &page.records {
        println!("{} {}", record.display_number(), record.name);
    }
    Ok(())
}
```
*/

mod catalog;
mod category_cache;
mod config;
mod debounce;
mod detail_cache;
mod error;
mod events;
mod generation;
mod index;
mod model;
mod pagination;
pub mod query;
mod renderer;
mod session;
mod source;

pub use catalog::Catalog;
pub use category_cache::{CategoryCache, normalize_label};
pub use config::CatalogConfig;
pub use debounce::Debouncer;
pub use detail_cache::{DetailCache, EnsureReport};
pub use error::{CatalogError, Result, StartupStage};
pub use events::{UiEvent, run_event_loop};
pub use generation::{GENERATIONS, Generation, GenerationRange};
pub use index::EntityIndex;
pub use model::{
    CATEGORY_LABELS, DetailRecord, EntityId, EntityRef, NamedResource, StatEntry, id_from_locator,
};
pub use pagination::{PageSlice, PageState, PageView, paginate, total_pages};
pub use query::{FilterState, NameCollator, SortKey};
pub use renderer::{Renderer, StatsView};
pub use session::Session;
pub use source::CatalogSource;
