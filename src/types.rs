//! Core data types for the quote board.
//!
//! This module defines the records loaded from the quotes file, the cards the
//! layout engine derives from them, the camera offset and the viewport
//! classification that drives card sizing.

use crate::constants::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A single quote as loaded from the quotes file. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The quote itself
    #[serde(rename = "quote")]
    pub text: String,
    /// GitHub handle of the person quoted
    #[serde(rename = "githubUsername")]
    pub author: String,
    /// Free-form date string, if the quote has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Record {
    /// Creates a record without a date.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            date: None,
        }
    }

    /// Returns a copy of this record with the given date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Parses the JSON array format of the quotes file.
    pub fn list_from_json(json: &str) -> Result<Vec<Record>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// A pan offset or any other 2D vector in grid/screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    /// Horizontal component
    pub x: f64,
    /// Vertical component
    pub y: f64,
}

impl Offset {
    /// The zero offset.
    pub const ZERO: Offset = Offset { x: 0.0, y: 0.0 };

    /// Creates a new offset.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl std::ops::Add for Offset {
    type Output = Offset;

    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Offset {
    type Output = Offset;

    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of the visible board area in screen units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportSize {
    /// Width of the viewport
    pub width: f64,
    /// Height of the viewport
    pub height: f64,
}

impl ViewportSize {
    /// Creates a new viewport size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The screen-space center of the viewport.
    pub fn center(self) -> Offset {
        Offset::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Coarse classification of the window width that selects card sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    /// Phone-sized windows
    Narrow,
    /// Tablet-sized windows
    Medium,
    /// Desktop windows
    Wide,
}

impl ViewportClass {
    /// Classifies a window by its width.
    pub fn from_width(width: f64) -> Self {
        if width < NARROW_MAX_WIDTH {
            ViewportClass::Narrow
        } else if width < MEDIUM_MAX_WIDTH {
            ViewportClass::Medium
        } else {
            ViewportClass::Wide
        }
    }

    /// Number of grid columns.
    pub fn columns(self) -> usize {
        match self {
            ViewportClass::Narrow | ViewportClass::Medium => 2,
            ViewportClass::Wide => 4,
        }
    }

    /// Distance between neighbouring card origins.
    pub fn spacing(self) -> f64 {
        match self {
            ViewportClass::Narrow => NARROW_GRID_SPACING,
            ViewportClass::Medium => MEDIUM_GRID_SPACING,
            ViewportClass::Wide => WIDE_GRID_SPACING,
        }
    }

    /// Card width and height.
    pub fn card_size(self) -> (f64, f64) {
        match self {
            ViewportClass::Narrow => (NARROW_CARD_WIDTH, NARROW_CARD_HEIGHT),
            ViewportClass::Medium => (MEDIUM_CARD_WIDTH, MEDIUM_CARD_HEIGHT),
            ViewportClass::Wide => (WIDE_CARD_WIDTH, WIDE_CARD_HEIGHT),
        }
    }
}

/// A positioned quote card produced by the layout engine.
///
/// Cards are recreated on every layout pass and carry no reference to whatever
/// the presentation layer draws for them; the presentation layer associates its
/// own state with a card by index.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// Grid-space x coordinate of the top-left corner
    pub grid_x: f64,
    /// Grid-space y coordinate of the top-left corner
    pub grid_y: f64,
    /// Decorative rotation in radians
    pub rotation: f64,
    /// Card width in grid units
    pub width: f64,
    /// Card height in grid units
    pub height: f64,
    /// The quote shown on this card
    pub record: Arc<Record>,
}

/// Where and how to draw a card for the current camera offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    /// Screen-space x coordinate of the top-left corner
    pub screen_x: f64,
    /// Screen-space y coordinate of the top-left corner
    pub screen_y: f64,
    /// Rotation in degrees
    pub rotation_degrees: f64,
}

impl Card {
    /// Grid-space center of the card.
    pub fn center(&self) -> Offset {
        Offset::new(
            self.grid_x + self.width / 2.0,
            self.grid_y + self.height / 2.0,
        )
    }

    /// Projects the card onto the screen for the given camera offset.
    pub fn transform(&self, offset: Offset) -> CardTransform {
        CardTransform {
            screen_x: self.grid_x + offset.x,
            screen_y: self.grid_y + offset.y,
            rotation_degrees: self.rotation.to_degrees(),
        }
    }
}
