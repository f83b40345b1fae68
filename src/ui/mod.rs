//! User interface components and rendering logic for the quote board.
//!
//! This module contains the UI-related code: the main application struct,
//! the toolbar, translation of egui input into board input and card painting.
//!
//! # Module Organization
//!
//! - `state` - Application state structures and the main BoardApp
//! - `canvas` - Board area: resize detection, pointer, touch and keyboard input
//! - `rendering` - Drawing cards, profile lines and status messages

mod canvas;
mod rendering;
mod state;

pub use rendering::{profile_lines, profile_url};
pub use state::{BoardApp, LoadState, Preferences, SearchState, APP_STATE_KEY};

use eframe::egui;

/// Id of the search text field, used to move keyboard focus into it.
pub fn search_field_id() -> egui::Id {
    egui::Id::new("board_search")
}

impl eframe::App for BoardApp {
    /// Persist the theme preference between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        match self.preferences.to_json() {
            Ok(json) => {
                storage.set_string(APP_STATE_KEY, json);
            }
            Err(err) => {
                log::error!("Failed to serialize preferences: {err}");
            }
        }
    }

    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl BoardApp {
    /// Runs one UI frame: drains background results, draws the toolbar and the board.
    pub fn show(&mut self, ctx: &egui::Context) {
        let visuals = if self.preferences.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        let now = ctx.input(|i| i.time) * 1000.0;

        self.handle_load_results(now);
        self.profiles.poll();

        egui::TopBottomPanel::top("top_toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, now);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_board(ui, now);
        });

        self.request_card_profiles();
    }

    /// Draws the search field, the card count and the theme toggle.
    fn draw_toolbar(&mut self, ui: &mut egui::Ui, now: f64) {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search.query)
                    .id(search_field_id())
                    .hint_text("Search quotes, handles or dates ( / )")
                    .desired_width(320.0),
            );

            if self.search.focus_requested {
                response.request_focus();
                self.search.focus_requested = false;
            }

            if response.changed() {
                self.view.set_query(&self.search.query, now);
            }
            self.view.set_search_focused(response.has_focus());

            if self.load == LoadState::Loaded {
                ui.label(format!("{} of {} quotes", self.view.cards().len(), self.view.records().len()));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.preferences.dark_mode {
                    "Light mode"
                } else {
                    "Dark mode"
                };
                if ui.button(label).clicked() {
                    self.toggle_theme();
                }
            });
        });
    }
}

#[cfg(test)]
mod tests;
