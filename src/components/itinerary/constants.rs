//! Fixed layout dimensions, palette and candidate pools.

// ── Cards ───────────────────────────────────────────────────────────

/// Card width in canvas units.
pub const EVENT_CARD_WIDTH: f64 = 208.0;
/// Card height in canvas units.
pub const EVENT_CARD_HEIGHT: f64 = 128.0;
pub const EVENT_CARD_CORNER_RADIUS: f64 = 8.0;
pub const EVENT_CARD_BORDER_WIDTH: f64 = 2.0;

/// How close to the container edge (screen pixels) a card must come to arm deletion.
pub const DANGER_ZONE_PADDING: f64 = 40.0;

// ── Zoom ────────────────────────────────────────────────────────────

pub const ZOOM_MIN: f64 = 0.2;
pub const ZOOM_MAX: f64 = 3.0;
/// Scale change per wheel delta unit.
pub const ZOOM_SENSITIVITY: f64 = 0.001;

// ── Connections ─────────────────────────────────────────────────────

/// Distance of the curved route's control points from each endpoint, before scaling.
pub const CONTROL_POINT_OFFSET: f64 = 50.0;
pub const CONNECTION_LINE_WIDTH: f64 = 3.0;
pub const CONNECTION_LINE_COLOR: &str = "rgba(135, 206, 250, 0.7)";
pub const CONNECTION_GLOW_BLUR: f64 = 7.0;
pub const TRANSPORT_ICON_RADIUS: f64 = 25.0;
pub const TRANSPORT_ICON_GLYPH_SIZE: f64 = 32.0;
pub const TRANSPORT_ICON_RING_WIDTH: f64 = 1.5;
pub const TRANSPORT_ICON_BG_COLOR: &str = "#FFFFFF";
pub const TRANSPORT_ICON_RING_COLOR: &str = "rgba(173, 216, 230, 0.5)";

// ── Card palette ────────────────────────────────────────────────────

pub const CANVAS_BG: &str = "#000000";
pub const DEFAULT_CARD_BG: &str = "#FFFFFF";
pub const DEFAULT_CARD_TEXT: &str = "#000000";
pub const CARD_TIME_TEXT: &str = "rgb(55, 65, 81)";
pub const CARD_LOCATION_TEXT: &str = "rgb(107, 114, 128)";
pub const SELECTED_CARD_BORDER_COLOR: &str = "rgba(135, 206, 250, 0.85)";
pub const SELECTED_CARD_GLOW_COLOR: &str = "rgba(135, 206, 250, 0.6)";
pub const SELECTED_CARD_GLOW_BLUR: f64 = 20.0;
pub const DELETE_INDICATOR_CARD_BG: &str = "rgba(254, 202, 202, 1)";
pub const DELETE_INDICATOR_CARD_TEXT: &str = "rgba(153, 27, 27, 1)";
pub const DELETE_INDICATOR_GLOW_COLOR: &str = "rgba(255, 80, 80, 0.7)";
pub const DELETE_INDICATOR_GLOW_BLUR: f64 = 15.0;

// ── Generic data pools ──────────────────────────────────────────────

pub const GENERIC_LOCATIONS: &[&str] = &[
	"Park",
	"Cafe",
	"Library",
	"Online",
	"Meeting Point",
	"Venue A",
	"Venue B",
];

pub const GENERIC_MINUTES: &[&str] = &["00", "15", "30", "45"];
