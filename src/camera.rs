//! Camera holding the single board pan offset.
//!
//! Handles the transformation between grid space and screen space, centering
//! on cards and visibility queries against the current viewport.

use crate::types::*;

/// Owns the pan offset applied to every card and the size of the viewport it
/// is projected into.
#[derive(Debug, Clone, Default)]
pub struct Camera {
    offset: Offset,
    viewport: ViewportSize,
}

impl Camera {
    /// Creates a camera at the origin for the given viewport.
    pub fn new(viewport: ViewportSize) -> Self {
        Self {
            offset: Offset::ZERO,
            viewport,
        }
    }

    /// Current pan offset.
    pub fn offset(&self) -> Offset {
        self.offset
    }

    /// Replaces the pan offset.
    pub fn set_offset(&mut self, offset: Offset) {
        self.offset = offset;
    }

    /// Current viewport size.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Updates the viewport size. The offset is left untouched.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
    }

    /// Converts a grid position to screen coordinates.
    pub fn project(&self, grid_x: f64, grid_y: f64) -> (f64, f64) {
        (grid_x + self.offset.x, grid_y + self.offset.y)
    }

    /// Offset that puts the center of `card` in the center of the viewport.
    pub fn centering_offset(&self, card: &Card) -> Offset {
        self.viewport.center() - card.center()
    }

    /// Offset that puts the center of the bounding box of `cards` in the
    /// center of the viewport, or `None` when there are no cards.
    pub fn centering_offset_all(&self, cards: &[Card]) -> Option<Offset> {
        let first = cards.first()?;
        let mut min = Offset::new(first.grid_x, first.grid_y);
        let mut max = Offset::new(first.grid_x + first.width, first.grid_y + first.height);
        for card in &cards[1..] {
            min.x = min.x.min(card.grid_x);
            min.y = min.y.min(card.grid_y);
            max.x = max.x.max(card.grid_x + card.width);
            max.y = max.y.max(card.grid_y + card.height);
        }
        let mid = Offset::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
        Some(self.viewport.center() - mid)
    }

    /// Centers the viewport on `card`.
    pub fn center_on(&mut self, card: &Card) {
        self.offset = self.centering_offset(card);
    }

    /// Centers the viewport on all `cards`. Keeps the current offset when the
    /// list is empty.
    pub fn center_on_all(&mut self, cards: &[Card]) {
        if let Some(offset) = self.centering_offset_all(cards) {
            self.offset = offset;
        }
    }

    /// Whether any part of the (unrotated) card box is on screen.
    pub fn overlaps_viewport(&self, card: &Card) -> bool {
        let (x, y) = self.project(card.grid_x, card.grid_y);
        x < self.viewport.width
            && x + card.width > 0.0
            && y < self.viewport.height
            && y + card.height > 0.0
    }

    /// Whether the whole (unrotated) card box is on screen.
    pub fn fully_visible(&self, card: &Card) -> bool {
        let (x, y) = self.project(card.grid_x, card.grid_y);
        x >= 0.0
            && y >= 0.0
            && x + card.width <= self.viewport.width
            && y + card.height <= self.viewport.height
    }

    /// Whether every card is fully on screen at once.
    pub fn all_visible(&self, cards: &[Card]) -> bool {
        cards.iter().all(|card| self.fully_visible(card))
    }

    /// Whether at least one card overlaps the viewport.
    pub fn any_visible(&self, cards: &[Card]) -> bool {
        cards.iter().any(|card| self.overlaps_viewport(card))
    }
}
