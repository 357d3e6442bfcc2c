//! Trailer/video overlay state
//!
//! Opens immediately on selection with no video, then fills in once trailer
//! resolution comes back. Clicks inside the content box never close it.

use ratatui::layout::{Position, Rect};

use super::Ticket;
use crate::models::{CatalogItem, MediaKind, PlaybackTarget};

/// Trailer lookup the overlay is waiting on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerRequest {
    pub ticket: Ticket,
    pub kind: MediaKind,
    pub id: u64,
}

#[derive(Debug, Default)]
pub struct Overlay {
    target: Option<PlaybackTarget>,
    ticket: Option<Ticket>,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn target(&self) -> Option<&PlaybackTarget> {
        self.target.as_ref()
    }

    /// Show an item and request its trailer
    pub fn open(&mut self, item: CatalogItem) -> TrailerRequest {
        let ticket = Ticket::next();
        let request = TrailerRequest {
            ticket,
            kind: item.media_type,
            id: item.id,
        };
        self.target = Some(PlaybackTarget::new(item));
        self.ticket = Some(ticket);
        request
    }

    /// Apply a trailer lookup. Ignored when the overlay was closed or has
    /// moved on to another item since the request went out.
    pub fn apply_trailer(&mut self, ticket: Ticket, url: Option<String>) -> bool {
        if self.ticket != Some(ticket) {
            tracing::debug!(ticket = ticket.value(), "Dropping stale trailer result");
            return false;
        }
        match self.target.as_mut() {
            Some(target) => {
                target.resolve(url);
                self.ticket = None;
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.target = None;
        self.ticket = None;
    }

    /// Mouse click at `pos` with the overlay covering `area`.
    /// Closes when the click lands outside the content box; returns whether
    /// the overlay closed.
    pub fn click(&mut self, pos: Position, area: Rect) -> bool {
        if !self.is_open() || content_area(area).contains(pos) {
            return false;
        }
        self.close();
        true
    }
}

/// Centered content box of the overlay within `area`
pub fn content_area(area: Rect) -> Rect {
    let width = 90.min(area.width.saturating_sub(4));
    let height = 18.min(area.height.saturating_sub(2));
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaybackSource;

    fn bunny() -> CatalogItem {
        CatalogItem::new(10378, MediaKind::Movie, "Big Buck Bunny")
    }

    #[test]
    fn test_open_starts_resolving() {
        let mut overlay = Overlay::new();
        let req = overlay.open(bunny());
        assert_eq!(req.kind, MediaKind::Movie);
        assert_eq!(req.id, 10378);
        let target = overlay.target().unwrap();
        assert!(target.resolving);
        assert_eq!(target.source(), PlaybackSource::Unavailable);
    }

    #[test]
    fn test_fallback_when_no_trailer() {
        let mut overlay = Overlay::new();
        let req = overlay.open(bunny());
        assert!(overlay.apply_trailer(req.ticket, None));
        assert_eq!(
            overlay.target().unwrap().source(),
            PlaybackSource::Fallback(
                "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                    .into()
            )
        );
    }

    #[test]
    fn test_stale_trailer_ignored() {
        let mut overlay = Overlay::new();
        let first = overlay.open(bunny());
        let second = overlay.open(CatalogItem::new(2, MediaKind::Series, "Dark"));
        assert!(!overlay.apply_trailer(first.ticket, Some("https://www.youtube.com/embed/a".into())));
        assert!(overlay.target().unwrap().resolving);
        assert!(overlay.apply_trailer(second.ticket, None));
        assert_eq!(overlay.target().unwrap().item.title, "Dark");
    }

    #[test]
    fn test_result_after_close_ignored() {
        let mut overlay = Overlay::new();
        let req = overlay.open(bunny());
        overlay.close();
        assert!(!overlay.apply_trailer(req.ticket, None));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_click_inside_keeps_open() {
        let area = Rect::new(0, 0, 120, 40);
        let content = content_area(area);
        let mut overlay = Overlay::new();
        overlay.open(bunny());
        let inside = Position::new(content.x + 1, content.y + 1);
        assert!(!overlay.click(inside, area));
        assert!(overlay.is_open());
    }

    #[test]
    fn test_click_outside_closes() {
        let area = Rect::new(0, 0, 120, 40);
        let mut overlay = Overlay::new();
        overlay.open(bunny());
        assert!(overlay.click(Position::new(0, 0), area));
        assert!(!overlay.is_open());
    }

    #[test]
    fn test_content_area_centered() {
        let area = Rect::new(0, 0, 120, 40);
        let content = content_area(area);
        assert_eq!(content.width, 90);
        assert_eq!(content.height, 18);
        assert_eq!(content.x, 15);
        assert_eq!(content.y, 11);
    }
}
