//! Sports highlights screen

use super::{ListState, LoadState, Ticket};
use crate::models::{Fetch, Highlight};

#[derive(Debug, Default)]
pub struct SportsBrowser {
    pub highlights: Vec<Highlight>,
    pub state: LoadState,
    pub list: ListState,
    ticket: Option<Ticket>,
    /// (highlight index, video index) last picked with `next_video`
    video_cursor: (usize, usize),
}

impl SportsBrowser {
    pub fn mount() -> Self {
        Self::default()
    }

    /// Request the feed (on mount and on refresh)
    pub fn load(&mut self) -> Ticket {
        let ticket = Ticket::next();
        self.ticket = Some(ticket);
        self.state = LoadState::Loading;
        ticket
    }

    pub fn apply_highlights(&mut self, ticket: Ticket, outcome: Fetch<Vec<Highlight>>) -> bool {
        if self.ticket != Some(ticket) {
            tracing::debug!(ticket = ticket.value(), "Dropping stale highlights");
            return false;
        }
        self.ticket = None;
        self.video_cursor = (0, 0);
        self.state = LoadState::settled(&outcome);
        match outcome {
            Fetch::Loaded(highlights) => {
                self.list.reset(highlights.len());
                self.highlights = highlights;
            }
            Fetch::Empty => {
                self.highlights.clear();
                self.list.reset(0);
            }
            Fetch::Failed(_) => {}
        }
        true
    }

    pub fn selected(&self) -> Option<&Highlight> {
        self.highlights.get(self.list.selected)
    }

    /// Video picked within the selected highlight. Moving the list resets it.
    pub fn selected_video(&self) -> usize {
        if self.video_cursor.0 == self.list.selected {
            self.video_cursor.1
        } else {
            0
        }
    }

    /// Cycle through the selected highlight's videos
    pub fn next_video(&mut self) {
        let count = self.selected().map(|h| h.videos.len()).unwrap_or(0);
        if count > 0 {
            self.video_cursor = (self.list.selected, (self.selected_video() + 1) % count);
        }
    }

    /// URL of the picked video, or the match page when it has no player
    pub fn play_selected(&self) -> Option<String> {
        let highlight = self.selected()?;
        highlight
            .videos
            .get(self.selected_video())
            .and_then(|v| v.source_url())
            .or_else(|| highlight.matchview())
            .map(str::to_string)
    }

    pub fn open_matchview(&self) -> Option<String> {
        self.selected()?.matchview().map(str::to_string)
    }
}
