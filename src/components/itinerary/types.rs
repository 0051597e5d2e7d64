use std::fmt;

use super::constants::{EVENT_CARD_HEIGHT, EVENT_CARD_WIDTH};
use super::geometry::{Point, Rect, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "evt-{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "conn-{}", self.0)
	}
}

/// An itinerary card placed on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
	pub id: EventId,
	pub title: String,
	/// `HH:MM`
	pub time: String,
	pub location: Option<String>,
	pub group: Option<String>,
	/// Top-left corner, canvas units.
	pub x: f64,
	pub y: f64,
}

impl Event {
	pub fn position(&self) -> Point {
		Point::new(self.x, self.y)
	}
}

/// Canvas-space rectangle of a card whose top-left corner sits at `origin`.
pub fn card_rect(origin: Point) -> Rect {
	Rect::new(origin, Size::new(EVENT_CARD_WIDTH, EVENT_CARD_HEIGHT))
}

/// A transport link between two events.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	pub id: ConnectionId,
	pub from_id: EventId,
	pub to_id: EventId,
	/// Bumped whenever an endpoint is repositioned; replays the line's entry animation.
	pub version: u32,
	pub transport: Transport,
	pub distance: Option<String>,
	pub estimated_time: Option<String>,
}

impl Connection {
	pub fn touches(&self, id: EventId) -> bool {
		self.from_id == id || self.to_id == id
	}

	/// Unordered endpoint match.
	pub fn joins(&self, a: EventId, b: EventId) -> bool {
		(self.from_id == a && self.to_id == b) || (self.from_id == b && self.to_id == a)
	}

	pub fn transport_emoji(&self) -> &'static str {
		self.transport.glyph()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transport {
	Walk,
	Run,
	Bike,
	Car,
	Bus,
	Train,
	Gondola,
	Plane,
	Ship,
}

impl Transport {
	pub const ALL: [Transport; 9] = [
		Transport::Walk,
		Transport::Run,
		Transport::Bike,
		Transport::Car,
		Transport::Bus,
		Transport::Train,
		Transport::Gondola,
		Transport::Plane,
		Transport::Ship,
	];

	pub fn glyph(self) -> &'static str {
		match self {
			Transport::Walk => "🚶",
			Transport::Run => "🏃",
			Transport::Bike => "🚲",
			Transport::Car => "🚗",
			Transport::Bus => "🚌",
			Transport::Train => "🚆",
			Transport::Gondola => "🚠",
			Transport::Plane => "✈️",
			Transport::Ship => "🚢",
		}
	}

	pub fn description(self) -> &'static str {
		match self {
			Transport::Walk => "Walk",
			Transport::Run => "Run",
			Transport::Bike => "Bike",
			Transport::Car => "Car",
			Transport::Bus => "Bus",
			Transport::Train => "Train",
			Transport::Gondola => "Gondola",
			Transport::Plane => "Plane",
			Transport::Ship => "Ship",
		}
	}

	/// Highlight color of the connection line.
	pub fn color(self) -> &'static str {
		match self {
			Transport::Walk => "rgba(144, 238, 144, 0.8)",
			Transport::Run => "rgba(255, 215, 0, 0.8)",
			Transport::Bike => "rgba(0, 255, 255, 0.8)",
			Transport::Car => "rgba(173, 216, 230, 0.8)",
			Transport::Bus => "rgba(221, 160, 221, 0.8)",
			Transport::Train => "rgba(175, 238, 238, 0.8)",
			Transport::Gondola => "rgba(255, 182, 193, 0.8)",
			Transport::Plane => "rgba(135, 206, 250, 0.8)",
			Transport::Ship => "rgba(127, 255, 212, 0.8)",
		}
	}

	pub fn from_glyph(glyph: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.glyph() == glyph)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DistanceUnit {
	#[default]
	Feet,
	Meters,
	Kilometers,
	Miles,
}

impl DistanceUnit {
	pub const ALL: [DistanceUnit; 4] = [
		DistanceUnit::Feet,
		DistanceUnit::Meters,
		DistanceUnit::Kilometers,
		DistanceUnit::Miles,
	];

	/// Short form used in the display string.
	pub fn value(self) -> &'static str {
		match self {
			DistanceUnit::Feet => "ft",
			DistanceUnit::Meters => "m",
			DistanceUnit::Kilometers => "km",
			DistanceUnit::Miles => "miles",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			DistanceUnit::Feet => "feet",
			DistanceUnit::Meters => "meters",
			DistanceUnit::Kilometers => "kilometers",
			DistanceUnit::Miles => "miles",
		}
	}

	pub fn from_value(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|u| u.value() == value)
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeUnit {
	#[default]
	Seconds,
	Minutes,
	Hours,
	Days,
}

impl TimeUnit {
	pub const ALL: [TimeUnit; 4] = [
		TimeUnit::Seconds,
		TimeUnit::Minutes,
		TimeUnit::Hours,
		TimeUnit::Days,
	];

	pub fn value(self) -> &'static str {
		match self {
			TimeUnit::Seconds => "s",
			TimeUnit::Minutes => "min",
			TimeUnit::Hours => "hr",
			TimeUnit::Days => "days",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			TimeUnit::Seconds => "seconds",
			TimeUnit::Minutes => "minutes",
			TimeUnit::Hours => "hours",
			TimeUnit::Days => "days",
		}
	}

	pub fn from_value(value: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|u| u.value() == value)
	}
}

/// Form draft behind the event dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDraft {
	pub title: String,
	pub time: String,
	pub location: String,
	pub group: Option<String>,
}

impl EventDraft {
	pub fn is_complete(&self) -> bool {
		!self.title.trim().is_empty() && !self.time.is_empty()
	}
}

/// Form draft behind the connection dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionDraft {
	pub transport: Option<Transport>,
	pub distance_value: Option<f64>,
	pub distance_unit: Option<DistanceUnit>,
	pub time_value: Option<f64>,
	pub time_unit: Option<TimeUnit>,
}

impl Default for ConnectionDraft {
	fn default() -> Self {
		Self {
			transport: Some(Transport::Walk),
			distance_value: None,
			distance_unit: Some(DistanceUnit::default()),
			time_value: None,
			time_unit: Some(TimeUnit::default()),
		}
	}
}

impl ConnectionDraft {
	pub fn distance_label(&self) -> Option<String> {
		measure_label(self.distance_value, self.distance_unit.map(DistanceUnit::value))
	}

	pub fn time_label(&self) -> Option<String> {
		measure_label(self.time_value, self.time_unit.map(TimeUnit::value))
	}
}

/// `"{value} {unit}"`, only when both parts are present. Zero and non-finite values count as absent.
fn measure_label(value: Option<f64>, unit: Option<&str>) -> Option<String> {
	match (value, unit) {
		(Some(v), Some(u)) if v != 0.0 && v.is_finite() => Some(format!("{v} {u}")),
		_ => None,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn glyph_lookup_is_total_over_transports() {
		for t in Transport::ALL {
			assert_eq!(Transport::from_glyph(t.glyph()), Some(t));
		}
		assert_eq!(Transport::from_glyph("🛸"), None);
	}

	#[test]
	fn measure_labels_need_value_and_unit() {
		let mut draft = ConnectionDraft {
			distance_value: Some(5.0),
			distance_unit: Some(DistanceUnit::Kilometers),
			time_value: Some(12.5),
			time_unit: None,
			..ConnectionDraft::default()
		};
		assert_eq!(draft.distance_label().as_deref(), Some("5 km"));
		assert_eq!(draft.time_label(), None);

		draft.time_unit = Some(TimeUnit::Minutes);
		assert_eq!(draft.time_label().as_deref(), Some("12.5 min"));

		draft.distance_value = Some(0.0);
		assert_eq!(draft.distance_label(), None);
	}

	#[test]
	fn connection_join_is_unordered() {
		let conn = Connection {
			id: ConnectionId(1),
			from_id: EventId(1),
			to_id: EventId(2),
			version: 0,
			transport: Transport::Bus,
			distance: None,
			estimated_time: None,
		};
		assert!(conn.joins(EventId(1), EventId(2)));
		assert!(conn.joins(EventId(2), EventId(1)));
		assert!(!conn.joins(EventId(1), EventId(3)));
		assert!(conn.touches(EventId(2)));
		assert_eq!(conn.id.to_string(), "conn-1");
	}

	#[test]
	fn blank_title_draft_is_incomplete() {
		let draft = EventDraft {
			title: "   ".into(),
			time: "10:00".into(),
			..EventDraft::default()
		};
		assert!(!draft.is_complete());
	}
}
