//! Connection line routing between two card centers.
//!
//! All inputs are screen-space, so card extents and offsets are multiplied by
//! the current zoom before they are compared against endpoint deltas.

use super::constants::{
	CONNECTION_LINE_COLOR, CONNECTION_LINE_WIDTH, CONTROL_POINT_OFFSET, EVENT_CARD_HEIGHT,
	EVENT_CARD_WIDTH, TRANSPORT_ICON_GLYPH_SIZE, TRANSPORT_ICON_RADIUS, TRANSPORT_ICON_RING_WIDTH,
};
use super::geometry::{Point, approx_cubic_length, point_on_cubic_bezier};
use super::types::Transport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteKind {
	/// Cards side by side: the curve bends vertically through the horizontal midpoint.
	VerticalElbow,
	/// Cards stacked: the curve bends horizontally through the vertical midpoint.
	HorizontalElbow,
	Curved,
}

/// Cubic Bezier from `start` to `end`. A straight segment is the case of collinear controls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConnectionPath {
	pub start: Point,
	pub c1: Point,
	pub c2: Point,
	pub end: Point,
	pub kind: RouteKind,
}

impl ConnectionPath {
	pub fn point_at(&self, t: f64) -> Point {
		point_on_cubic_bezier(self.start, self.c1, self.c2, self.end, t)
	}

	/// Where the transport icon sits.
	pub fn icon_anchor(&self) -> Point {
		self.point_at(0.5)
	}

	pub fn approx_length(&self) -> f64 {
		approx_cubic_length(self.start, self.c1, self.c2, self.end, 24)
	}

}

pub fn route(p0: Point, p1: Point, scale: f64) -> ConnectionPath {
	let (card_w, card_h) = (EVENT_CARD_WIDTH * scale, EVENT_CARD_HEIGHT * scale);
	let (dx, dy) = ((p0.x - p1.x).abs(), (p0.y - p1.y).abs());

	let (c1, c2, kind) = if dy < card_h / 2.0 && dx > card_w {
		let mid_x = (p0.x + p1.x) / 2.0;
		(
			Point::new(mid_x, p0.y),
			Point::new(mid_x, p1.y),
			RouteKind::VerticalElbow,
		)
	} else if dx < card_w / 2.0 && dy > card_h {
		let mid_y = (p0.y + p1.y) / 2.0;
		(
			Point::new(p0.x, mid_y),
			Point::new(p1.x, mid_y),
			RouteKind::HorizontalElbow,
		)
	} else {
		let angle = (p1.y - p0.y).atan2(p1.x - p0.x);
		let offset = Point::new(angle.cos(), angle.sin()) * (CONTROL_POINT_OFFSET * scale);
		(p0 + offset, p1 - offset, RouteKind::Curved)
	};

	ConnectionPath {
		start: p0,
		c1,
		c2,
		end: p1,
		kind,
	}
}

/// Stroke and icon dimensions at a given zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
	pub color: &'static str,
	pub stroke_width: f64,
	pub icon_radius: f64,
	pub icon_ring_width: f64,
	pub glyph_size: f64,
}

impl LineStyle {
	pub fn new(transport: Option<Transport>, scale: f64) -> Self {
		Self {
			color: transport.map_or(CONNECTION_LINE_COLOR, Transport::color),
			stroke_width: CONNECTION_LINE_WIDTH * scale,
			icon_radius: TRANSPORT_ICON_RADIUS * scale,
			icon_ring_width: TRANSPORT_ICON_RING_WIDTH * scale,
			glyph_size: TRANSPORT_ICON_GLYPH_SIZE * scale,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn side_by_side_cards_get_vertical_elbow() {
		let path = route(Point::new(0.0, 100.0), Point::new(500.0, 130.0), 1.0);
		assert_eq!(path.kind, RouteKind::VerticalElbow);
		assert_eq!(path.c1, Point::new(250.0, 100.0));
		assert_eq!(path.c2, Point::new(250.0, 130.0));
	}

	#[test]
	fn stacked_cards_get_horizontal_elbow() {
		let path = route(Point::new(100.0, 0.0), Point::new(140.0, 400.0), 1.0);
		assert_eq!(path.kind, RouteKind::HorizontalElbow);
		assert_eq!(path.c1, Point::new(100.0, 200.0));
		assert_eq!(path.c2, Point::new(140.0, 200.0));
	}

	#[test]
	fn diagonal_cards_get_symmetric_curve() {
		let path = route(Point::new(0.0, 0.0), Point::new(300.0, 300.0), 2.0);
		assert_eq!(path.kind, RouteKind::Curved);
		let reach = 100.0 / 2f64.sqrt();
		assert_relative_eq!(path.c1.x, reach, epsilon = 1e-9);
		assert_relative_eq!(path.c1.y, reach, epsilon = 1e-9);
		assert_relative_eq!(path.c2.x, 300.0 - reach, epsilon = 1e-9);
		assert_relative_eq!(path.c2.y, 300.0 - reach, epsilon = 1e-9);
	}

	#[test]
	fn zoom_changes_which_route_applies() {
		let (p0, p1) = (Point::new(0.0, 0.0), Point::new(300.0, 20.0));
		assert_eq!(route(p0, p1, 1.0).kind, RouteKind::VerticalElbow);
		// at 2x the scaled card is wider than the horizontal gap
		assert_eq!(route(p0, p1, 2.0).kind, RouteKind::Curved);
	}

	#[test]
	fn icon_anchor_lies_between_elbow_endpoints() {
		let path = route(Point::new(0.0, 100.0), Point::new(500.0, 140.0), 1.0);
		let anchor = path.icon_anchor();
		assert_relative_eq!(anchor.x, 250.0);
		assert_relative_eq!(anchor.y, 120.0);
	}

	#[test]
	fn style_scales_linearly_and_falls_back_to_sky_blue() {
		let style = LineStyle::new(Some(Transport::Car), 2.0);
		assert_eq!(style.color, Transport::Car.color());
		assert_relative_eq!(style.stroke_width, 6.0);
		assert_relative_eq!(style.icon_radius, 50.0);
		assert_relative_eq!(style.glyph_size, 64.0);
		assert_eq!(LineStyle::new(None, 1.0).color, CONNECTION_LINE_COLOR);
	}
}
