use crate::error::CatalogError;
use crate::model::DetailRecord;
use crate::pagination::PageView;
use crate::query::FilterState;

/// Summary line shown above the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub result_count: usize,
    pub category_label: String,
    pub generation_label: String,
    pub sort_label: String,
}

impl StatsView {
    pub fn new(filter: &FilterState, result_count: usize) -> Self {
        Self {
            result_count,
            category_label: filter
                .category
                .as_deref()
                .map(capitalize)
                .unwrap_or_else(|| "—".to_string()),
            generation_label: filter
                .generation
                .map(|generation| generation.label())
                .unwrap_or_else(|| "All".to_string()),
            sort_label: filter.sort.label().to_string(),
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Visual output collaborator. The engine decides what to show; the renderer
/// decides how.
pub trait Renderer {
    fn render_page(&mut self, page: &PageView);

    fn render_empty_state(&mut self);

    fn render_loading(&mut self, loading: bool);

    fn render_stats(&mut self, stats: &StatsView);

    fn render_detail(&mut self, record: &DetailRecord);

    fn render_error(&mut self, error: &CatalogError);
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render_page(&mut self, page: &PageView) {
        (**self).render_page(page);
    }

    fn render_empty_state(&mut self) {
        (**self).render_empty_state();
    }

    fn render_loading(&mut self, loading: bool) {
        (**self).render_loading(loading);
    }

    fn render_stats(&mut self, stats: &StatsView) {
        (**self).render_stats(stats);
    }

    fn render_detail(&mut self, record: &DetailRecord) {
        (**self).render_detail(record);
    }

    fn render_error(&mut self, error: &CatalogError) {
        (**self).render_error(error);
    }
}
