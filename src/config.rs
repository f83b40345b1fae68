//! Board configuration.

use crate::auto_scroll::AutoScrollSettings;
use crate::constants::*;
use serde::{Deserialize, Serialize};

/// How the view is reset after the card set is regenerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecenterMode {
    /// Center a uniformly random card
    RandomCard,
    /// Center the bounding box of all cards
    AllCards,
}

/// Tunable behaviour of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Path (native) or page-relative URL (web) of the quotes file
    pub quotes_source: String,
    /// Delay between auto-scroll focus changes
    pub auto_scroll_interval_ms: f64,
    /// Quiet period after interaction before auto-scroll resumes
    pub auto_scroll_resume_ms: f64,
    /// Auto-scroll runs only with more cards than this
    pub auto_scroll_min_cards: usize,
    /// Duration of the animated focus on a card
    pub focus_duration_ms: f64,
    /// Duration of the animated return after dragging into empty space
    pub snap_back_duration_ms: f64,
    /// Distance moved per arrow key press
    pub key_pan_step: f64,
    /// How the view is reset when the cards change
    pub recenter: RecenterMode,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            quotes_source: DEFAULT_QUOTES_SOURCE.to_string(),
            auto_scroll_interval_ms: AUTO_SCROLL_INTERVAL_MS,
            auto_scroll_resume_ms: AUTO_SCROLL_RESUME_MS,
            auto_scroll_min_cards: AUTO_SCROLL_MIN_CARDS,
            focus_duration_ms: FOCUS_DURATION_MS,
            snap_back_duration_ms: SNAP_BACK_DURATION_MS,
            key_pan_step: KEY_PAN_STEP,
            recenter: RecenterMode::RandomCard,
        }
    }
}

impl BoardConfig {
    /// Deserializes a configuration; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads a configuration file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Auto-scroll timing derived from this configuration.
    pub fn auto_scroll(&self) -> AutoScrollSettings {
        AutoScrollSettings {
            interval_ms: self.auto_scroll_interval_ms,
            resume_ms: self.auto_scroll_resume_ms,
            min_cards: self.auto_scroll_min_cards,
        }
    }
}
