//! Shared application-wide constants.
//! Centralizes tweakable values used by the layout, camera and controllers.

// Viewport classes
/// Windows narrower than this (in points) use the narrow layout.
pub const NARROW_MAX_WIDTH: f64 = 640.0;
/// Windows narrower than this (in points) use the medium layout.
pub const MEDIUM_MAX_WIDTH: f64 = 1024.0;

// Card dimensions per viewport class, in grid units
/// Card width on wide viewports.
pub const WIDE_CARD_WIDTH: f64 = 450.0;
/// Card height on wide viewports.
pub const WIDE_CARD_HEIGHT: f64 = 380.0;
/// Distance between neighbouring card origins on wide viewports.
pub const WIDE_GRID_SPACING: f64 = 500.0;
/// Card width on medium viewports.
pub const MEDIUM_CARD_WIDTH: f64 = 360.0;
/// Card height on medium viewports.
pub const MEDIUM_CARD_HEIGHT: f64 = 320.0;
/// Distance between neighbouring card origins on medium viewports.
pub const MEDIUM_GRID_SPACING: f64 = 420.0;
/// Card width on narrow viewports.
pub const NARROW_CARD_WIDTH: f64 = 280.0;
/// Card height on narrow viewports.
pub const NARROW_CARD_HEIGHT: f64 = 300.0;
/// Distance between neighbouring card origins on narrow viewports.
pub const NARROW_GRID_SPACING: f64 = 320.0;

// Auto-scroll
/// Delay between two auto-scroll focus changes.
pub const AUTO_SCROLL_INTERVAL_MS: f64 = 4000.0;
/// Quiet period after the last interaction before auto-scroll resumes.
pub const AUTO_SCROLL_RESUME_MS: f64 = 5000.0;
/// Auto-scroll only runs when more cards than this are on the board.
pub const AUTO_SCROLL_MIN_CARDS: usize = 2;

// Transitions
/// Duration of the animated move onto a focused card.
pub const FOCUS_DURATION_MS: f64 = 2000.0;
/// Duration of the animated move back onto the board after a drag into empty space.
pub const SNAP_BACK_DURATION_MS: f64 = 1000.0;

// Keyboard
/// Distance the view moves per arrow key press.
pub const KEY_PAN_STEP: f64 = 100.0;

// Data
/// Default location of the quotes file.
pub const DEFAULT_QUOTES_SOURCE: &str = "quotes.json";
/// Base URL of the GitHub REST API.
pub const GITHUB_API_BASE: &str = "https://api.github.com";
/// Base URL of GitHub profile pages and avatars.
pub const GITHUB_WEB_BASE: &str = "https://github.com";
/// Maximum number of languages shown per profile.
pub const MAX_TOP_LANGUAGES: usize = 3;
