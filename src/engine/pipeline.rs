use crate::dom::LinkList;
use crate::net::cache::CacheStore;
use crate::net::fetch::LinkSource;
use crate::ui::{Presenter, Severity};

/// Link pipeline: cache check → fetch → persist → serve.
///
/// Each access makes at most one network attempt.
pub struct LinkProvider<S: LinkSource> {
    cache: CacheStore,
    source: S,
}

impl<S: LinkSource> LinkProvider<S> {
    pub fn new(cache: CacheStore, source: S) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Links for `url`, from cache when fresh.
    ///
    /// Network failures are reported through `presenter` and yield an
    /// empty list. Empty results are not cached.
    pub fn get_links(&self, url: &str, presenter: &mut dyn Presenter) -> LinkList {
        let (cached, fresh) = self.cache.load();
        if fresh {
            log::debug!("Serving {} links from cache", cached.len());
            return cached;
        }

        log::info!("Requesting AceStream links from {}", url);
        match self.source.fetch(url) {
            Ok(links) => {
                if !links.is_empty() {
                    self.cache.save(&links);
                }
                links
            }
            Err(e) => {
                log::error!("Error requesting links: {}", e);
                presenter.notify("Error", &format!("Network error: {}", e), Severity::Error);
                Vec::new()
            }
        }
    }

    /// Drop the cache regardless of freshness and ask the host to re-render.
    pub fn force_refresh(&self, presenter: &mut dyn Presenter) {
        log::info!("Updating AceStream links and clearing cache");
        self.cache.clear();
        presenter.refresh();
    }
}
