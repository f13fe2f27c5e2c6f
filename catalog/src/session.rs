use crate::catalog::Catalog;
use crate::config::CatalogConfig;
use crate::error::Result;
use crate::generation::Generation;
use crate::model::EntityId;
use crate::model::EntityRef;
use crate::pagination::PageState;
use crate::query::FilterState;
use crate::query::SortKey;
use crate::renderer::Renderer;
use crate::renderer::StatsView;
use crate::source::CatalogSource;
use tracing::debug;
use tracing::warn;

/// UI-facing controller: owns the current filter and page state and turns
/// renderer events into engine calls.
///
/// Every render is derived from the state held *after* the awaited work
/// completes, never from a snapshot taken before it.
#[derive(Debug)]
pub struct Session<S, R> {
    catalog: Catalog<S>,
    renderer: R,
    filter: FilterState,
    page: PageState,
    results: Vec<EntityRef>,
}

impl<S: CatalogSource, R: Renderer> Session<S, R> {
    /// Load the catalog and render the initial view.
    ///
    /// A startup failure is shown through the renderer and returned.
    pub async fn start(source: S, config: CatalogConfig, mut renderer: R) -> Result<Self> {
        renderer.render_loading(true);
        match Catalog::load(source, config).await {
            Ok(catalog) => Ok(Self::with_catalog(catalog, renderer).await),
            Err(err) => {
                renderer.render_loading(false);
                renderer.render_error(&err);
                Err(err)
            }
        }
    }

    pub async fn with_catalog(catalog: Catalog<S>, renderer: R) -> Self {
        let page = PageState::new(catalog.config().page_size);
        let mut session = Self {
            catalog,
            renderer,
            filter: FilterState::default(),
            page,
            results: Vec::new(),
        };
        session.refresh().await;
        session
    }

    pub async fn on_search_change(&mut self, text: &str) {
        let filter = self.filter.clone().with_search(text);
        self.set_filter(filter).await;
    }

    pub async fn on_category_toggle(&mut self, label: &str) {
        let filter = self.filter.clone().toggle_category(label);
        self.set_filter(filter).await;
    }

    /// Select generation `number`, or the whole universe for `None`.
    pub async fn on_generation_change(&mut self, number: Option<u8>) {
        let generation = match number.map(Generation::by_number).transpose() {
            Ok(generation) => generation,
            Err(err) => {
                warn!("ignoring generation change: {err}");
                self.renderer.render_error(&err);
                return;
            }
        };
        let filter = self.filter.clone().with_generation(generation);
        self.set_filter(filter).await;
    }

    pub async fn on_sort_change(&mut self, key: SortKey) {
        let filter = self.filter.clone().with_sort(key);
        self.set_filter(filter).await;
    }

    pub async fn on_clear_filters(&mut self) {
        let filter = self.filter.clone().cleared();
        self.set_filter(filter).await;
    }

    pub async fn on_prev_page(&mut self) {
        if !self.page.has_prev() {
            return;
        }
        self.page = self.page.prev();
        self.render_current_page().await;
    }

    pub async fn on_next_page(&mut self) {
        if !self.page.has_next(self.results.len()) {
            return;
        }
        self.page = self.page.next(self.results.len());
        self.render_current_page().await;
    }

    /// Show the detail view for `id`.
    pub async fn on_card_selected(&mut self, id: EntityId) {
        match self.catalog.detail(id).await {
            Ok(record) => self.renderer.render_detail(&record),
            Err(err) => {
                warn!("detail view unavailable: {err}");
                self.renderer.render_error(&err);
            }
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page_state(&self) -> PageState {
        self.page
    }

    /// Current ordered result list.
    pub fn results(&self) -> &[EntityRef] {
        &self.results
    }

    pub fn stats(&self) -> StatsView {
        StatsView::new(&self.filter, self.results.len())
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    async fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        self.refresh().await;
    }

    /// Recompute results for the current filter and render page one.
    async fn refresh(&mut self) {
        self.page = self.page.first();
        match self.catalog.query(&self.filter).await {
            Ok(results) => self.results = results,
            Err(err) => {
                warn!("query failed: {err}");
                self.results.clear();
                self.renderer.render_error(&err);
            }
        }
        debug!(results = self.results.len(), "filters applied");
        let stats = self.stats();
        self.renderer.render_stats(&stats);
        self.render_current_page().await;
    }

    async fn render_current_page(&mut self) {
        self.renderer.render_loading(true);
        let view = self.catalog.page(&self.results, self.page.page_number).await;
        self.page.page_number = view.page_number;
        self.renderer.render_loading(false);
        if view.is_empty() {
            self.renderer.render_empty_state();
        } else {
            self.renderer.render_page(&view);
        }
    }
}
