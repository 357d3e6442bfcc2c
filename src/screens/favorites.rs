//! Watchlist screen

use std::sync::Arc;

use super::{ListState, LoadState, Overlay, TrailerRequest};
use crate::models::CatalogItem;
use crate::store::{FavoritesStore, KeyValueStore};

#[derive(Debug)]
pub struct FavoritesBrowser {
    pub state: LoadState,
    pub list: ListState,
    pub overlay: Overlay,
    pub notice: Option<String>,
    store: Option<FavoritesStore>,
}

impl FavoritesBrowser {
    /// Mount with a fresh copy of the watchlist read from `backend`
    pub fn mount(backend: Arc<dyn KeyValueStore>) -> Self {
        let mut browser = Self {
            state: LoadState::Loading,
            list: ListState::default(),
            overlay: Overlay::new(),
            notice: None,
            store: None,
        };
        match FavoritesStore::load(backend) {
            Ok(store) => {
                browser.list.reset(store.len());
                browser.state = settled(&store);
                browser.store = Some(store);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Watchlist failed to load");
                browser.state = LoadState::Failed(e.to_string());
            }
        }
        browser
    }

    pub fn items(&self) -> &[CatalogItem] {
        self.store.as_ref().map(|s| s.items()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.items().get(self.list.selected)
    }

    /// Remove the selected entry. Returns whether the list changed.
    pub fn remove_selected(&mut self) -> bool {
        let Some(id) = self.selected_item().map(|m| m.id) else {
            return false;
        };
        let Some(store) = self.store.as_mut() else {
            return false;
        };
        match store.remove(id) {
            Ok(changed) => {
                let len = store.len();
                self.state = settled(store);
                self.list.set_len(len);
                changed
            }
            Err(e) => {
                tracing::error!(error = %e, "Watchlist write failed");
                self.notice = Some(format!("Could not save watchlist: {}", e));
                false
            }
        }
    }

    pub fn open_selected(&mut self) -> Option<TrailerRequest> {
        let item = self.selected_item()?.clone();
        Some(self.overlay.open(item))
    }
}

fn settled(store: &FavoritesStore) -> LoadState {
    if store.is_empty() {
        LoadState::Empty
    } else {
        LoadState::Populated
    }
}
