//! Point arithmetic, canvas/screen mapping and cubic Bezier helpers.

use std::ops::{Add, Mul, Sub};

/// A 2D point or offset. Canvas or screen space depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn distance(self, other: Self) -> f64 {
		let (dx, dy) = (other.x - self.x, other.y - self.y);
		(dx * dx + dy * dy).sqrt()
	}
}

impl Add for Point {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl Sub for Point {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Self;

	fn mul(self, k: f64) -> Self {
		Self::new(self.x * k, self.y * k)
	}
}

/// Width/height pair, used for the container and for card extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn scaled(self, k: f64) -> Self {
		Self::new(self.width * k, self.height * k)
	}
}

/// Axis-aligned rectangle given by its top-left corner and extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub origin: Point,
	pub size: Size,
}

impl Rect {
	pub const fn new(origin: Point, size: Size) -> Self {
		Self { origin, size }
	}

	pub fn right(&self) -> f64 {
		self.origin.x + self.size.width
	}

	pub fn bottom(&self) -> f64 {
		self.origin.y + self.size.height
	}

	pub fn center(&self) -> Point {
		Point::new(
			self.origin.x + self.size.width / 2.0,
			self.origin.y + self.size.height / 2.0,
		)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.origin.x && p.x <= self.right() && p.y >= self.origin.y && p.y <= self.bottom()
	}
}

/// Maps canvas coordinates to screen coordinates: `screen = pan + canvas * scale`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub pan: Point,
	pub scale: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			pan: Point::ZERO,
			scale: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn to_screen(&self, p: Point) -> Point {
		self.pan + p * self.scale
	}

	pub fn to_canvas(&self, p: Point) -> Point {
		(p - self.pan) * (1.0 / self.scale)
	}

	/// Screen-space rectangle of a canvas-space rectangle.
	pub fn rect_to_screen(&self, r: Rect) -> Rect {
		Rect::new(self.to_screen(r.origin), r.size.scaled(self.scale))
	}
}

/// Evaluates a cubic Bezier curve at `t` in `[0, 1]`.
pub fn point_on_cubic_bezier(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
	let inv = 1.0 - t;
	let (inv_sq, t_sq) = (inv * inv, t * t);
	p0 * (inv_sq * inv) + c1 * (3.0 * inv_sq * t) + c2 * (3.0 * inv * t_sq) + p1 * (t_sq * t)
}

/// Polyline approximation of a cubic Bezier's arc length.
pub fn approx_cubic_length(p0: Point, c1: Point, c2: Point, p1: Point, samples: usize) -> f64 {
	let samples = samples.max(1);
	let mut prev = p0;
	let mut length = 0.0;
	for i in 1..=samples {
		let p = point_on_cubic_bezier(p0, c1, c2, p1, i as f64 / samples as f64);
		length += prev.distance(p);
		prev = p;
	}
	length
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;
	use proptest::prelude::*;

	fn coord() -> impl Strategy<Value = f64> {
		-5000.0f64..5000.0
	}

	proptest! {
		#[test]
		fn bezier_hits_its_endpoints(
			ax in coord(), ay in coord(), bx in coord(), by in coord(),
			cx in coord(), cy in coord(), dx in coord(), dy in coord(),
		) {
			let (p0, c1, c2, p1) = (
				Point::new(ax, ay),
				Point::new(bx, by),
				Point::new(cx, cy),
				Point::new(dx, dy),
			);
			prop_assert_eq!(point_on_cubic_bezier(p0, c1, c2, p1, 0.0), p0);
			prop_assert_eq!(point_on_cubic_bezier(p0, c1, c2, p1, 1.0), p1);
		}
	}

	#[test]
	fn bezier_midpoint_of_symmetric_curve() {
		let mid = point_on_cubic_bezier(
			Point::new(0.0, 0.0),
			Point::new(0.0, 100.0),
			Point::new(100.0, 100.0),
			Point::new(100.0, 0.0),
			0.5,
		);
		assert_relative_eq!(mid.x, 50.0);
		assert_relative_eq!(mid.y, 75.0);
	}

	#[test]
	fn straight_curve_length_matches_distance() {
		let (p0, p1) = (Point::new(0.0, 0.0), Point::new(300.0, 400.0));
		let c1 = p0 + (p1 - p0) * (1.0 / 3.0);
		let c2 = p0 + (p1 - p0) * (2.0 / 3.0);
		assert_relative_eq!(approx_cubic_length(p0, c1, c2, p1, 16), 500.0, epsilon = 1e-9);
	}

	#[test]
	fn view_transform_round_trips() {
		let view = ViewTransform {
			pan: Point::new(30.0, -12.0),
			scale: 2.5,
		};
		let p = Point::new(17.0, 42.0);
		let back = view.to_canvas(view.to_screen(p));
		assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
		assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
	}

	#[test]
	fn rect_contains_its_edges() {
		let r = Rect::new(Point::new(10.0, 10.0), Size::new(20.0, 5.0));
		assert!(r.contains(Point::new(10.0, 10.0)));
		assert!(r.contains(Point::new(30.0, 15.0)));
		assert!(!r.contains(Point::new(30.1, 15.0)));
		assert_eq!(r.center(), Point::new(20.0, 12.5));
	}
}
