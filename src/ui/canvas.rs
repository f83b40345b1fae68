//! Board area interaction.
//!
//! This module detects viewport size changes, turns egui pointer, touch and
//! keyboard events into [`InputEvent`]s for the view, advances the view's
//! timers and animation and schedules the next repaint.

use super::state::BoardApp;
use crate::input::{BoardKey, InputEvent};
use crate::types::{Offset, ViewportSize};
use crate::view::ViewRequest;
use eframe::egui;

/// egui keys the board listens to.
const KEY_BINDINGS: [(egui::Key, BoardKey); 7] = [
    (egui::Key::ArrowLeft, BoardKey::Left),
    (egui::Key::ArrowRight, BoardKey::Right),
    (egui::Key::ArrowUp, BoardKey::Up),
    (egui::Key::ArrowDown, BoardKey::Down),
    (egui::Key::Space, BoardKey::Space),
    (egui::Key::Slash, BoardKey::Slash),
    (egui::Key::Escape, BoardKey::Escape),
];

impl BoardApp {
    /// Converts a window position into board coordinates.
    pub fn screen_to_board(&self, pos: egui::Pos2) -> Offset {
        let local = pos - self.board_origin;
        Offset::new(local.x as f64, local.y as f64)
    }

    /// Renders the board area and handles its interactions.
    ///
    /// # Arguments
    ///
    /// * `ui` - The egui UI context
    /// * `now` - Frame time in milliseconds
    pub fn draw_board(&mut self, ui: &mut egui::Ui, now: f64) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;
        self.board_origin = rect.min;

        self.view.resize(
            ViewportSize::new(rect.width() as f64, rect.height() as f64),
            now,
        );

        if self.load == super::LoadState::Loaded {
            self.handle_touch_and_pointer(ui, rect, now);
            self.handle_board_keys(ui, now);
            self.handle_profile_links(ui, &response);
        }

        let animating = self.view.tick(now);
        if animating {
            ui.ctx().request_repaint();
        } else if let Some(ms) = self.view.next_deadline_in(now) {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_secs_f64(ms / 1000.0));
        }

        self.render_board(ui, &painter, rect);
    }

    /// Feeds touch and mouse events to the view.
    ///
    /// Only the touch that started a drag moves or ends it; other fingers are
    /// tracked but otherwise ignored. Browsers report a touch both as a touch
    /// and as an emulated pointer, so pointer events are ignored while any
    /// touch is active.
    fn handle_touch_and_pointer(&mut self, ui: &egui::Ui, rect: egui::Rect, now: f64) {
        let events = ui.input(|i| i.events.clone());
        let mut touched = !self.active_touches.is_empty();

        for event in &events {
            if let egui::Event::Touch { id, phase, pos, .. } = event {
                touched = true;
                let board_pos = self.screen_to_board(*pos);
                let dragging_this = self.drag_touch == Some(id.0);
                match phase {
                    egui::TouchPhase::Start => {
                        self.active_touches.insert(id.0);
                        if rect.contains(*pos) {
                            let was_dragging = self.view.is_dragging();
                            self.view.handle_input(
                                InputEvent::TouchStart {
                                    pos: board_pos,
                                    touches: self.active_touches.len(),
                                },
                                now,
                            );
                            if !was_dragging && self.view.is_dragging() {
                                self.drag_touch = Some(id.0);
                            }
                        }
                    }
                    egui::TouchPhase::Move if dragging_this => {
                        self.view.handle_input(InputEvent::TouchMove(board_pos), now);
                    }
                    egui::TouchPhase::Move => {}
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => {
                        self.active_touches.remove(&id.0);
                        if dragging_this {
                            self.drag_touch = None;
                            self.view.handle_input(InputEvent::TouchEnd, now);
                        }
                    }
                }
            }
        }

        if touched {
            return;
        }

        for event in &events {
            let input = match event {
                egui::Event::PointerButton {
                    pos,
                    button: egui::PointerButton::Primary,
                    pressed: true,
                    ..
                } if rect.contains(*pos) => Some(InputEvent::PointerDown(self.screen_to_board(*pos))),
                egui::Event::PointerButton {
                    button: egui::PointerButton::Primary,
                    pressed: false,
                    ..
                }
                | egui::Event::PointerGone => Some(InputEvent::PointerUp),
                egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove(self.screen_to_board(*pos))),
                _ => None,
            };
            if let Some(input) = input {
                self.view.handle_input(input, now);
            }
        }
    }

    /// Opens the author's GitHub page when an avatar or name is clicked
    /// without dragging.
    fn handle_profile_links(&self, ui: &egui::Ui, response: &egui::Response) {
        if response
            .hover_pos()
            .is_some_and(|pos| self.profile_link_at(pos).is_some())
        {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }

        if !response.clicked() {
            return;
        }
        if let Some(url) = response
            .interact_pointer_pos()
            .or_else(|| response.hover_pos())
            .and_then(|pos| self.profile_link_at(pos))
        {
            log::info!("opening {url}");
            ui.ctx().open_url(egui::OpenUrl::new_tab(url));
        }
    }

    /// Feeds the board's keyboard shortcuts to the view.
    fn handle_board_keys(&mut self, ui: &egui::Ui, now: f64) {
        let pressed: Vec<BoardKey> = ui.input(|i| {
            KEY_BINDINGS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, board_key)| *board_key)
                .collect()
        });

        for key in pressed {
            match self.view.handle_input(InputEvent::Key(key), now) {
                Some(ViewRequest::FocusSearch) => {
                    self.search.focus_requested = true;
                    ui.ctx().request_repaint();
                }
                Some(ViewRequest::SearchCleared) => {
                    self.search.query.clear();
                }
                None => {}
            }
        }
    }
}
