//! # Quote Board
//!
//! A pannable, searchable board of quote cards. Each quote is loaded from a
//! static JSON file and enriched with GitHub profile statistics for its author.
//!
//! The heart of the crate is the view engine:
//! - **Layout**: turns the filtered quotes into a deterministic grid of cards
//! - **Camera**: owns the single pan offset and projects grid space onto the screen
//! - **Animator**: eases the offset toward a target, one animation at a time
//! - **Input**: drag, touch and keyboard navigation
//! - **Auto-scroll**: cycles through the cards while the board is idle
//!
//! ## Features
//! - Drag or swipe to pan, arrow keys to nudge the view
//! - Space jumps to a random card, `/` focuses search, Escape clears it
//! - Click an avatar or name to open the author's GitHub profile
//! - Responsive card sizing for narrow, medium and wide windows
//! - Dark and light themes, remembered between sessions

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod animator;
pub mod auto_scroll;
pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod github;
pub mod input;
pub mod layout;
pub mod profile;
pub mod random;
pub mod search;
pub mod source;
pub mod timer;
mod types;
mod ui;
pub mod view;

// Re-export public types and functions
pub use config::{BoardConfig, RecenterMode};
pub use error::BoardError;
pub use types::*;
pub use ui::{profile_lines, profile_url, search_field_id, BoardApp, LoadState, Preferences, SearchState, APP_STATE_KEY};
pub use view::{ViewRequest, ViewState};

/// Runs the quote board with the given configuration.
///
/// This function initializes the egui application window and starts the main event loop.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use quote_board::{run_app, BoardConfig};
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app(BoardConfig::default())
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app(config: BoardConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Quote Board",
        options,
        Box::new(|cc| Ok(Box::new(BoardApp::new(cc, config)))),
    )
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Browser entry point: mounts the board on the `quote_board_canvas` element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    eframe::WebLogger::init(log::LevelFilter::Info).ok();

    let web_options = eframe::WebOptions::default();
    wasm_bindgen_futures::spawn_local(async {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no document to mount the board on");
            return;
        };
        let canvas = match document
            .get_element_by_id("quote_board_canvas")
            .map(|element| element.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("no canvas element with id 'quote_board_canvas'");
                return;
            }
        };

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(BoardApp::new(cc, BoardConfig::default())))),
            )
            .await;
        if let Err(e) = start_result {
            log::error!("Failed to start eframe: {e:?}");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = BoardConfig::default();
        assert_eq!(config.recenter, RecenterMode::RandomCard);
        assert_eq!(config.auto_scroll_min_cards, 2);
        assert_eq!(config.quotes_source, "quotes.json");
    }

    #[test]
    fn test_offset_arithmetic() {
        let a = Offset::new(1.5, -2.0);
        let b = Offset::new(0.5, 4.0);
        assert_eq!(a + b, Offset::new(2.0, 2.0));
        assert_eq!(a - b, Offset::new(1.0, -6.0));
    }
}
