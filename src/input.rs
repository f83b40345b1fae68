//! Translation of pointer, touch and keyboard input into board actions.

use crate::types::Offset;

/// Keys the board reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardKey {
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Space bar
    Space,
    /// Forward slash
    Slash,
    /// Escape
    Escape,
}

/// A user input event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary pointer button pressed
    PointerDown(Offset),
    /// Pointer moved
    PointerMove(Offset),
    /// Primary pointer button released
    PointerUp,
    /// A finger touched the screen; `touches` counts all active touches
    TouchStart {
        /// Position of the new touch
        pos: Offset,
        /// Number of touches now on the screen
        touches: usize,
    },
    /// A touch moved
    TouchMove(Offset),
    /// A touch was lifted or cancelled
    TouchEnd,
    /// A key was pressed
    Key(BoardKey),
}

/// What the board should do in response to an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// A drag began; the view stops any automatic movement
    DragStarted,
    /// The drag moved; the offset is absolute
    DragMoved(Offset),
    /// The drag ended; the board may need to be brought back into view
    DragEnded,
    /// Move the view by a fixed amount
    Pan(Offset),
    /// Jump to a random card
    FocusRandomCard,
    /// Give keyboard focus to the search field
    FocusSearch,
    /// Clear the search filter
    ClearSearch,
}

impl InputAction {
    /// Whether the action is a fresh user interaction that must cancel
    /// animations and suspend auto-scroll.
    pub fn interrupts(&self) -> bool {
        !matches!(self, InputAction::DragMoved(_) | InputAction::DragEnded)
    }
}

/// Drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    /// No drag in progress
    Idle,
    /// A pointer or single touch is dragging the board
    Dragging {
        /// Pointer position when the drag started
        start_pointer: Offset,
        /// Camera offset when the drag started
        start_offset: Offset,
    },
}

/// Turns raw input into [`InputAction`]s.
#[derive(Debug, Clone)]
pub struct InputController {
    state: DragState,
    search_focused: bool,
    pan_step: f64,
}

impl InputController {
    /// Creates an idle controller that pans by `pan_step` per arrow key.
    pub fn new(pan_step: f64) -> Self {
        Self {
            state: DragState::Idle,
            search_focused: false,
            pan_step,
        }
    }

    /// Current drag state.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Tells the controller whether the search field has keyboard focus.
    pub fn set_search_focused(&mut self, focused: bool) {
        self.search_focused = focused;
    }

    /// Whether the search field has keyboard focus.
    pub fn search_focused(&self) -> bool {
        self.search_focused
    }

    /// Handles one event. `offset` is the camera offset at this moment.
    pub fn handle(&mut self, event: InputEvent, offset: Offset) -> Option<InputAction> {
        match event {
            InputEvent::PointerDown(pos) => self.begin_drag(pos, offset),
            InputEvent::TouchStart { pos, touches } => {
                if touches == 1 {
                    self.begin_drag(pos, offset)
                } else {
                    None
                }
            }
            InputEvent::PointerMove(pos) | InputEvent::TouchMove(pos) => match self.state {
                DragState::Dragging {
                    start_pointer,
                    start_offset,
                } => Some(InputAction::DragMoved(start_offset + (pos - start_pointer))),
                DragState::Idle => None,
            },
            InputEvent::PointerUp | InputEvent::TouchEnd => {
                if self.is_dragging() {
                    self.state = DragState::Idle;
                    Some(InputAction::DragEnded)
                } else {
                    None
                }
            }
            InputEvent::Key(key) => self.handle_key(key),
        }
    }

    fn begin_drag(&mut self, pos: Offset, offset: Offset) -> Option<InputAction> {
        if self.is_dragging() {
            return None;
        }
        self.state = DragState::Dragging {
            start_pointer: pos,
            start_offset: offset,
        };
        Some(InputAction::DragStarted)
    }

    fn handle_key(&mut self, key: BoardKey) -> Option<InputAction> {
        if key == BoardKey::Escape {
            return Some(InputAction::ClearSearch);
        }
        if self.search_focused {
            return None;
        }
        let step = self.pan_step;
        let action = match key {
            BoardKey::Left => InputAction::Pan(Offset::new(step, 0.0)),
            BoardKey::Right => InputAction::Pan(Offset::new(-step, 0.0)),
            BoardKey::Up => InputAction::Pan(Offset::new(0.0, step)),
            BoardKey::Down => InputAction::Pan(Offset::new(0.0, -step)),
            BoardKey::Space => InputAction::FocusRandomCard,
            BoardKey::Slash => InputAction::FocusSearch,
            BoardKey::Escape => InputAction::ClearSearch,
        };
        Some(action)
    }
}
