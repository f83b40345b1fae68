//! The board's view state.
//!
//! [`ViewState`] owns everything that moves the view: the records and current
//! filter, the generated cards, the camera, the animator, the input controller
//! and the auto-scroll controller. It is the only writer of the camera offset,
//! and it upholds the rule that at most one animation and at most one of
//! {drag, auto-scroll} is active at a time.
//!
//! Time is passed in explicitly as milliseconds so the whole state machine can
//! be driven deterministically.

use crate::animator::{Animator, Frame, FrameRequest};
use crate::auto_scroll::{AutoScroll, AutoScrollState};
use crate::camera::Camera;
use crate::config::{BoardConfig, RecenterMode};
use crate::input::{InputAction, InputController, InputEvent};
use crate::layout::layout;
use crate::random::RandomSource;
use crate::search::filter_records;
use crate::types::*;
use std::sync::Arc;

/// Requests the view hands back to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewRequest {
    /// Move keyboard focus into the search field
    FocusSearch,
    /// The search text was cleared; the search field should be emptied
    SearchCleared,
}

/// Owned state of the board view.
pub struct ViewState {
    config: BoardConfig,
    records: Vec<Arc<Record>>,
    query: String,
    viewport_class: ViewportClass,
    cards: Vec<Card>,
    camera: Camera,
    animator: Animator,
    pending_frame: Option<FrameRequest>,
    input: InputController,
    auto_scroll: AutoScroll,
    random: Box<dyn RandomSource>,
    generation: u64,
}

impl std::fmt::Debug for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewState")
            .field("records", &self.records.len())
            .field("query", &self.query)
            .field("viewport_class", &self.viewport_class)
            .field("cards", &self.cards.len())
            .field("offset", &self.camera.offset())
            .field("auto_scroll", &self.auto_scroll.state())
            .finish()
    }
}

impl ViewState {
    /// Creates an empty view for the given viewport.
    pub fn new(config: BoardConfig, viewport: ViewportSize, random: Box<dyn RandomSource>) -> Self {
        let input = InputController::new(config.key_pan_step);
        let auto_scroll = AutoScroll::new(config.auto_scroll());
        Self {
            config,
            records: Vec::new(),
            query: String::new(),
            viewport_class: ViewportClass::from_width(viewport.width),
            cards: Vec::new(),
            camera: Camera::new(viewport),
            animator: Animator::new(),
            pending_frame: None,
            input,
            auto_scroll,
            random,
            generation: 0,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// All loaded records, unfiltered.
    pub fn records(&self) -> &[Arc<Record>] {
        &self.records
    }

    /// Cards of the current layout pass.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Current search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current camera offset.
    pub fn offset(&self) -> Offset {
        self.camera.offset()
    }

    /// The camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current viewport classification.
    pub fn viewport_class(&self) -> ViewportClass {
        self.viewport_class
    }

    /// Current auto-scroll state.
    pub fn auto_scroll_state(&self) -> AutoScrollState {
        self.auto_scroll.state()
    }

    /// Whether a camera animation is in flight.
    pub fn is_animating(&self) -> bool {
        self.pending_frame.is_some() && self.animator.is_active()
    }

    /// Whether the user is dragging the board.
    pub fn is_dragging(&self) -> bool {
        self.input.is_dragging()
    }

    /// Counter bumped on every layout regeneration.
    pub fn layout_generation(&self) -> u64 {
        self.generation
    }

    /// Screen transforms for all cards, in card order.
    pub fn card_transforms(&self) -> Vec<CardTransform> {
        let offset = self.camera.offset();
        self.cards.iter().map(|card| card.transform(offset)).collect()
    }

    /// Replaces the record set and regenerates the layout.
    pub fn set_records(&mut self, records: Vec<Record>, now: f64) {
        self.records = records.into_iter().map(Arc::new).collect();
        log::info!("loaded {} quotes", self.records.len());
        self.regenerate(now, true);
    }

    /// Changes the search text and regenerates the layout if it changed.
    pub fn set_query(&mut self, query: &str, now: f64) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.regenerate(now, true);
    }

    /// Tells the view whether the search field has keyboard focus.
    pub fn set_search_focused(&mut self, focused: bool) {
        self.input.set_search_focused(focused);
    }

    /// Adapts the view to a new viewport size.
    ///
    /// The layout is always regenerated, cancelling the running animation and
    /// pending auto-scroll timers. When the viewport class changes the cards
    /// change size and position, so the view is recentered. Otherwise the
    /// offset follows the viewport center, keeping whatever was centered
    /// before the resize centered after it.
    pub fn resize(&mut self, viewport: ViewportSize, now: f64) {
        let previous = self.camera.viewport();
        if viewport == previous {
            return;
        }
        self.camera.set_viewport(viewport);
        let class = ViewportClass::from_width(viewport.width);
        let class_changed = class != self.viewport_class;
        if class_changed {
            log::debug!("viewport class changed from {:?} to {:?}", self.viewport_class, class);
        }
        self.viewport_class = class;
        self.regenerate(now, class_changed);
        if !class_changed {
            let shift = viewport.center() - previous.center();
            self.camera.set_offset(self.camera.offset() + shift);
        }
    }

    fn regenerate(&mut self, now: f64, recenter: bool) {
        self.stop_animation();
        let filtered = filter_records(&self.records, &self.query);
        self.cards = layout(&filtered, self.viewport_class);
        self.generation = self.generation.wrapping_add(1);
        if recenter {
            self.recenter();
        }
        self.auto_scroll.evaluate(self.cards.len(), now);
        log::debug!(
            "layout regenerated: {} cards, auto-scroll {:?}",
            self.cards.len(),
            self.auto_scroll.state()
        );
    }

    fn recenter(&mut self) {
        match self.config.recenter {
            RecenterMode::AllCards => self.camera.center_on_all(&self.cards),
            RecenterMode::RandomCard => self.focus_random_card(),
        }
    }

    fn focus_random_card(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let index = self.random.next_index(self.cards.len());
        self.camera.center_on(&self.cards[index]);
    }

    fn stop_animation(&mut self) {
        self.animator.cancel();
        self.pending_frame = None;
    }

    fn start_animation(&mut self, target: Offset, duration_ms: f64, now: f64) {
        let from = self.camera.offset();
        self.pending_frame = Some(self.animator.animate(from, target, duration_ms, now));
    }

    /// Animates the camera onto the card at `index`.
    pub fn focus_card(&mut self, index: usize, now: f64) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        let target = self.camera.centering_offset(card);
        self.start_animation(target, self.config.focus_duration_ms, now);
    }

    /// Handles a user input event.
    pub fn handle_input(&mut self, event: InputEvent, now: f64) -> Option<ViewRequest> {
        let action = self.input.handle(event, self.camera.offset())?;
        if action.interrupts() {
            self.stop_animation();
            self.auto_scroll.suspend(now);
        }
        match action {
            InputAction::DragStarted | InputAction::FocusSearch => {}
            InputAction::DragMoved(offset) => self.camera.set_offset(offset),
            InputAction::DragEnded => {
                self.auto_scroll.suspend(now);
                self.snap_back(now);
            }
            InputAction::Pan(delta) => self.camera.set_offset(self.camera.offset() + delta),
            InputAction::FocusRandomCard => self.focus_random_card(),
            InputAction::ClearSearch => {
                self.query.clear();
                self.regenerate(now, true);
                // The clear itself was an interaction.
                self.auto_scroll.suspend(now);
                return Some(ViewRequest::SearchCleared);
            }
        }
        match action {
            InputAction::FocusSearch => Some(ViewRequest::FocusSearch),
            _ => None,
        }
    }

    fn snap_back(&mut self, now: f64) {
        if self.cards.is_empty() || self.camera.any_visible(&self.cards) {
            return;
        }
        if let Some(target) = self.camera.centering_offset_all(&self.cards) {
            log::debug!("board dragged out of view, snapping back");
            self.start_animation(target, self.config.snap_back_duration_ms, now);
        }
    }

    /// Advances timers and the running animation to `now`.
    ///
    /// Returns `true` while an animation is running and another frame is needed.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.input.is_dragging() {
            let cards = &self.cards;
            let camera = &self.camera;
            let due = self.auto_scroll.poll(now, || camera.all_visible(cards));
            if let Some(index) = due {
                self.focus_card(index, now);
            }
        }

        if let Some(request) = self.pending_frame.take() {
            match self.animator.tick(request, now) {
                Frame::Running(offset, next) => {
                    self.camera.set_offset(offset);
                    self.pending_frame = Some(next);
                }
                Frame::Finished(offset) => self.camera.set_offset(offset),
                Frame::Stale => {}
            }
        }
        self.pending_frame.is_some()
    }

    /// Milliseconds from `now` until the next timer deadline, if one is pending.
    pub fn next_deadline_in(&self, now: f64) -> Option<f64> {
        self.auto_scroll
            .deadline()
            .map(|deadline| (deadline - now).max(0.0))
    }
}
