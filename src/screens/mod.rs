//! Screen controllers
//!
//! Each screen owns its own view state and never touches the network itself.
//! Queries are issued as tickets; the app shell turns them into commands and
//! hands the responses back. A response whose ticket is no longer the
//! screen's latest is dropped, so a slow superseded request cannot overwrite
//! a newer result.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::Fetch;

pub mod catalog;
pub mod favorites;
pub mod input;
pub mod login;
pub mod overlay;
pub mod sports;

pub use catalog::{BrowseRequest, CatalogBrowser, CatalogFocus};
pub use favorites::FavoritesBrowser;
pub use input::TextInput;
pub use login::{LoginField, LoginScreen};
pub use overlay::{Overlay, TrailerRequest};
pub use sports::SportsBrowser;

// =============================================================================
// Request Tickets
// =============================================================================

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one issued request. Unique for the life of the process, so a
/// remounted screen can never mistake an old response for its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn next() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

// =============================================================================
// Load State
// =============================================================================

/// Lifecycle of a screen's data: `Idle → Loading → {Populated, Empty, Failed}`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Populated,
    Empty,
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadState::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// Settled state for a gateway outcome
    pub fn settled<T>(outcome: &Fetch<T>) -> Self {
        match outcome {
            Fetch::Loaded(_) => LoadState::Populated,
            Fetch::Empty => LoadState::Empty,
            Fetch::Failed(e) => LoadState::Failed(e.clone()),
        }
    }
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected + 1 - visible_height;
        }
    }

    /// Replace the list wholesale (new results): back to the top
    pub fn reset(&mut self, len: usize) {
        self.len = len;
        self.selected = 0;
        self.offset = 0;
    }

    /// Update length in place, clamping the selection
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        if self.offset > self.selected {
            self.offset = self.selected;
        }
    }
}
