//! Application state management structures.
//!
//! This module contains the state the board UI keeps around the core
//! [`ViewState`]: quote loading, profile lookups, the search field and the
//! persisted theme preference.

use crate::config::BoardConfig;
use crate::error::Result;
use crate::github::GithubFetcher;
use crate::profile::{ProfileDirectory, ProfileFetcher, UnavailableFetcher};
use crate::random::{RandomSource, SystemRandom};
use crate::source::load_quotes;
use crate::types::{Record, ViewportSize};
use crate::view::ViewState;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver};

/// Storage key under which preferences are persisted.
pub const APP_STATE_KEY: &str = "app_state";

/// Viewport assumed until the first frame reports the real one.
const INITIAL_VIEWPORT: ViewportSize = ViewportSize::new(1280.0, 720.0);

/// Progress of the one-time quote load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Waiting for the quotes file
    Loading,
    /// Quotes are on the board
    Loaded,
    /// The quotes file could not be loaded; holds the reason
    Failed(String),
}

/// Settings that survive restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Whether dark mode visuals are enabled
    pub dark_mode: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

impl Preferences {
    /// Serializes the preferences to JSON.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes preferences from JSON.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// State of the search field.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Text currently in the search field
    pub query: String,
    /// Focus should move into the search field on the next frame
    pub focus_requested: bool,
}

/// The main application structure.
///
/// This struct implements the `eframe::App` trait and wires the core view
/// state to egui input and painting.
pub struct BoardApp {
    /// Camera, layout and interaction state
    pub view: ViewState,
    /// Quote loading progress
    pub load: LoadState,
    /// Cached GitHub profiles
    pub profiles: ProfileDirectory,
    /// Search field state
    pub search: SearchState,
    /// Persisted preferences
    pub preferences: Preferences,
    /// Receives the result of the quote load
    pub(crate) load_receiver: Option<Receiver<Result<Vec<Record>>>>,
    /// Layout generation whose profiles have been requested
    pub(crate) profiles_requested_for: Option<u64>,
    /// Touch points currently on the screen
    pub(crate) active_touches: HashSet<u64>,
    /// Touch that is dragging the board, if any
    pub(crate) drag_touch: Option<u64>,
    /// Top-left corner of the board area in window coordinates
    pub(crate) board_origin: egui::Pos2,
    /// Whether avatar images are painted; needs egui image loaders
    pub(crate) avatars: bool,
}

impl std::fmt::Debug for BoardApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardApp")
            .field("view", &self.view)
            .field("load", &self.load)
            .field("preferences", &self.preferences)
            .finish_non_exhaustive()
    }
}

impl BoardApp {
    /// Creates the app from its collaborators without starting any I/O.
    pub fn from_parts(
        config: BoardConfig,
        fetcher: Box<dyn ProfileFetcher>,
        random: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            view: ViewState::new(config, INITIAL_VIEWPORT, random),
            load: LoadState::Loading,
            profiles: ProfileDirectory::new(fetcher),
            search: SearchState::default(),
            preferences: Preferences::default(),
            load_receiver: None,
            profiles_requested_for: None,
            active_touches: HashSet::new(),
            drag_touch: None,
            board_origin: egui::Pos2::ZERO,
            avatars: false,
        }
    }

    /// Creates the app for eframe: restores preferences and starts loading quotes.
    pub fn new(cc: &eframe::CreationContext<'_>, config: BoardConfig) -> Self {
        let ctx = cc.egui_ctx.clone();
        let fetcher: Box<dyn ProfileFetcher> = match GithubFetcher::new(Some(ctx.clone())) {
            Ok(fetcher) => Box::new(fetcher),
            Err(err) => {
                log::error!("profile lookups disabled: {err}");
                Box::new(UnavailableFetcher)
            }
        };

        let source = config.quotes_source.clone();
        let mut app = Self::from_parts(config, fetcher, Box::new(SystemRandom));
        egui_extras::install_image_loaders(&ctx);
        app.avatars = true;

        if let Some(json) = cc.storage.and_then(|s| s.get_string(APP_STATE_KEY)) {
            match Preferences::from_json(&json) {
                Ok(preferences) => app.preferences = preferences,
                Err(err) => log::warn!("ignoring stored preferences: {err}"),
            }
        }

        app.start_loading(&source, Some(ctx));
        app
    }

    /// Starts the one-time quote load.
    pub fn start_loading(&mut self, source: &str, repaint: Option<egui::Context>) {
        log::info!("loading quotes from {source}");
        let (sender, receiver) = channel();
        self.load = LoadState::Loading;
        self.load_receiver = Some(receiver);
        load_quotes(source, sender, repaint);
    }

    /// Puts `records` on the board.
    pub fn load_records(&mut self, records: Vec<Record>, now: f64) {
        self.view.set_records(records, now);
        self.load = LoadState::Loaded;
    }

    /// Applies the result of the quote load once it arrives.
    pub fn handle_load_results(&mut self, now: f64) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.load_receiver = None;
        match result {
            Ok(records) => self.load_records(records, now),
            Err(err) => {
                log::error!("error loading quotes: {err}");
                self.load = LoadState::Failed(err.to_string());
            }
        }
    }

    /// Requests profiles for every card of a freshly generated layout.
    pub fn request_card_profiles(&mut self) {
        let generation = self.view.layout_generation();
        if self.profiles_requested_for == Some(generation) {
            return;
        }
        self.profiles_requested_for = Some(generation);
        for card in self.view.cards() {
            self.profiles.request(&card.record.author);
        }
    }

    /// Status line shown in place of the board, if any.
    pub fn status_message(&self) -> Option<&'static str> {
        match &self.load {
            LoadState::Loading => Some("Loading quotes..."),
            LoadState::Failed(_) => Some("Error loading quotes"),
            LoadState::Loaded if self.view.cards().is_empty() => Some("No quotes match"),
            LoadState::Loaded => None,
        }
    }

    /// Flips between dark and light visuals.
    pub fn toggle_theme(&mut self) {
        self.preferences.dark_mode = !self.preferences.dark_mode;
        log::debug!("dark mode: {}", self.preferences.dark_mode);
    }
}
