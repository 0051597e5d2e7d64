//! Per-gesture state for card drags, canvas pans and double-click selection.
//!
//! Offsets live here until the gesture ends; nothing is written to an
//! [`Event`](super::types::Event) before [`DragSession::finish`].

use log::debug;

use super::geometry::{Point, Size, ViewTransform};
use super::types::{EventId, card_rect};

/// True when the card at canvas position `origin` intrudes on the padding band
/// along any of the container's four edges.
pub fn in_danger_zone(origin: Point, view: &ViewTransform, bounds: Size, padding: f64) -> bool {
	let r = view.rect_to_screen(card_rect(origin));
	r.origin.x < padding
		|| r.right() > bounds.width - padding
		|| r.origin.y < padding
		|| r.bottom() > bounds.height - padding
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragOutcome {
	/// Press and release without movement.
	Released { event_id: EventId },
	Repositioned { event_id: EventId, position: Point },
	Deleted { event_id: EventId },
}

#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
	pub event_id: EventId,
	/// Committed card position when the drag began.
	pub origin: Point,
	pointer_start: Point,
	pointer_last: Point,
	/// Pointer travel in canvas units.
	pub offset: Point,
	pub armed: bool,
}

impl DragSession {
	pub fn begin(event_id: EventId, origin: Point, pointer: Point) -> Self {
		debug!("drag start {event_id}");
		Self {
			event_id,
			origin,
			pointer_start: pointer,
			pointer_last: pointer,
			offset: Point::ZERO,
			armed: false,
		}
	}

	pub fn candidate(&self) -> Point {
		self.origin + self.offset
	}

	pub fn last_pointer(&self) -> Point {
		self.pointer_last
	}

	/// Moves the card with the pointer and re-evaluates the danger zone. Returns the armed flag.
	pub fn update(&mut self, pointer: Point, view: &ViewTransform, bounds: Size, padding: f64) -> bool {
		self.pointer_last = pointer;
		self.offset = (pointer - self.pointer_start) * (1.0 / view.scale);
		let armed = in_danger_zone(self.candidate(), view, bounds, padding);
		if armed != self.armed {
			debug!("{} delete-armed: {armed}", self.event_id);
		}
		self.armed = armed;
		armed
	}

	pub fn finish(mut self, pointer: Point, view: &ViewTransform, bounds: Size, padding: f64) -> DragOutcome {
		let was_armed = self.armed;
		self.update(pointer, view, bounds, padding);
		let event_id = self.event_id;
		if was_armed && self.armed {
			DragOutcome::Deleted { event_id }
		} else if self.offset == Point::ZERO {
			DragOutcome::Released { event_id }
		} else {
			DragOutcome::Repositioned {
				event_id,
				position: self.candidate(),
			}
		}
	}
}

/// Dragging on empty canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSession {
	pointer_last: Point,
}

impl PanSession {
	pub fn begin(pointer: Point) -> Self {
		Self {
			pointer_last: pointer,
		}
	}

	/// Screen travel since the previous step.
	pub fn step(&mut self, pointer: Point) -> Point {
		let delta = pointer - self.pointer_last;
		self.pointer_last = pointer;
		delta
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Interaction {
	#[default]
	Idle,
	DraggingCard(DragSession),
	Panning(PanSession),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionOutcome {
	/// The card is now the pending connection source.
	Pending(EventId),
	Deselected,
	/// Open the connection dialog for this pair.
	ConnectionRequested { from: EventId, to: EventId },
	/// The pair is already connected; selection is cleared.
	AlreadyConnected,
}

pub fn resolve_double_click(
	first: Option<EventId>,
	clicked: EventId,
	connected: impl Fn(EventId, EventId) -> bool,
) -> SelectionOutcome {
	match first {
		None => SelectionOutcome::Pending(clicked),
		Some(first) if first == clicked => SelectionOutcome::Deselected,
		Some(first) if connected(first, clicked) => SelectionOutcome::AlreadyConnected,
		Some(first) => SelectionOutcome::ConnectionRequested {
			from: first,
			to: clicked,
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const BOUNDS: Size = Size::new(1000.0, 800.0);
	const PADDING: f64 = 40.0;

	#[test]
	fn danger_zone_covers_all_four_edges() {
		let view = ViewTransform::default();
		assert!(!in_danger_zone(Point::new(400.0, 300.0), &view, BOUNDS, PADDING));
		assert!(in_danger_zone(Point::new(39.0, 300.0), &view, BOUNDS, PADDING));
		assert!(in_danger_zone(Point::new(400.0, 39.0), &view, BOUNDS, PADDING));
		// right: 1000 - 40 - 208 = 752
		assert!(!in_danger_zone(Point::new(752.0, 300.0), &view, BOUNDS, PADDING));
		assert!(in_danger_zone(Point::new(753.0, 300.0), &view, BOUNDS, PADDING));
		// bottom: 800 - 40 - 128 = 632
		assert!(in_danger_zone(Point::new(400.0, 633.0), &view, BOUNDS, PADDING));
	}

	#[test]
	fn danger_zone_uses_screen_space_under_zoom() {
		let view = ViewTransform {
			pan: Point::ZERO,
			scale: 2.0,
		};
		// card at x=350 spans screen 700..1116
		assert!(in_danger_zone(Point::new(350.0, 100.0), &view, BOUNDS, PADDING));
		assert!(!in_danger_zone(Point::new(100.0, 100.0), &view, BOUNDS, PADDING));
	}

	#[test]
	fn drag_arms_and_disarms() {
		let view = ViewTransform::default();
		let mut drag = DragSession::begin(EventId(1), Point::new(300.0, 300.0), Point::new(350.0, 350.0));
		assert!(drag.update(Point::new(80.0, 350.0), &view, BOUNDS, PADDING));
		assert_eq!(drag.candidate(), Point::new(30.0, 300.0));
		assert!(!drag.update(Point::new(300.0, 350.0), &view, BOUNDS, PADDING));
	}

	#[test]
	fn armed_release_in_zone_deletes() {
		let view = ViewTransform::default();
		let mut drag = DragSession::begin(EventId(4), Point::new(300.0, 300.0), Point::ZERO);
		drag.update(Point::new(-280.0, 0.0), &view, BOUNDS, PADDING);
		let outcome = drag.finish(Point::new(-280.0, 0.0), &view, BOUNDS, PADDING);
		assert_eq!(outcome, DragOutcome::Deleted { event_id: EventId(4) });
	}

	#[test]
	fn release_outside_zone_repositions_even_if_armed_earlier() {
		let view = ViewTransform::default();
		let mut drag = DragSession::begin(EventId(4), Point::new(300.0, 300.0), Point::ZERO);
		drag.update(Point::new(-280.0, 0.0), &view, BOUNDS, PADDING);
		let outcome = drag.finish(Point::new(-100.0, 0.0), &view, BOUNDS, PADDING);
		assert_eq!(
			outcome,
			DragOutcome::Repositioned {
				event_id: EventId(4),
				position: Point::new(200.0, 300.0),
			}
		);
	}

	#[test]
	fn release_into_zone_without_prior_arming_repositions() {
		let view = ViewTransform::default();
		let drag = DragSession::begin(EventId(2), Point::new(300.0, 300.0), Point::ZERO);
		let outcome = drag.finish(Point::new(-280.0, 0.0), &view, BOUNDS, PADDING);
		assert!(matches!(outcome, DragOutcome::Repositioned { .. }));
	}

	#[test]
	fn click_without_motion_is_a_plain_release() {
		let view = ViewTransform::default();
		let drag = DragSession::begin(EventId(9), Point::new(300.0, 300.0), Point::new(5.0, 5.0));
		let outcome = drag.finish(Point::new(5.0, 5.0), &view, BOUNDS, PADDING);
		assert_eq!(outcome, DragOutcome::Released { event_id: EventId(9) });
	}

	#[test]
	fn pointer_travel_is_divided_by_zoom() {
		let view = ViewTransform {
			pan: Point::ZERO,
			scale: 2.0,
		};
		let mut drag = DragSession::begin(EventId(1), Point::new(100.0, 100.0), Point::ZERO);
		drag.update(Point::new(40.0, 20.0), &view, BOUNDS, PADDING);
		assert_eq!(drag.candidate(), Point::new(120.0, 110.0));
	}

	#[test]
	fn pan_steps_are_incremental() {
		let mut pan = PanSession::begin(Point::new(100.0, 100.0));
		assert_eq!(pan.step(Point::new(130.0, 90.0)), Point::new(30.0, -10.0));
		assert_eq!(pan.step(Point::new(130.0, 90.0)), Point::ZERO);
		assert_eq!(pan.step(Point::new(120.0, 95.0)), Point::new(-10.0, 5.0));
	}

	#[test]
	fn double_click_rules() {
		let (a, b) = (EventId(1), EventId(2));
		let never = |_: EventId, _: EventId| false;
		assert_eq!(resolve_double_click(None, a, never), SelectionOutcome::Pending(a));
		assert_eq!(resolve_double_click(Some(a), a, never), SelectionOutcome::Deselected);
		assert_eq!(
			resolve_double_click(Some(a), b, never),
			SelectionOutcome::ConnectionRequested { from: a, to: b }
		);
		let linked = |x: EventId, y: EventId| (x, y) == (b, a) || (x, y) == (a, b);
		assert_eq!(resolve_double_click(Some(a), b, linked), SelectionOutcome::AlreadyConnected);
	}
}
