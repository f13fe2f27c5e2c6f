mod category_cache;
mod detail_cache;
mod event_loop;
