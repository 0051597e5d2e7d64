use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::constants::*;
use super::geometry::Point;
use super::interaction::Interaction;
use super::routing::{ConnectionPath, LineStyle, route};
use super::state::PlannerState;
use super::types::{Connection, ConnectionId, Event};

/// Seconds for a connection line to draw itself in.
const LINE_REVEAL_SECS: f64 = 0.5;
/// Seconds for the line and its icon to fade in.
const LINE_FADE_SECS: f64 = 0.3;
/// Magnification of the card under the pointer.
const DRAG_LIFT: f64 = 1.05;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Animation clock plus the moment each connection's current version first appeared.
#[derive(Clone, Debug, Default)]
pub struct FrameState {
	pub time: f64,
	reveals: HashMap<ConnectionId, (u32, f64)>,
}

impl FrameState {
	pub fn tick(&mut self, dt: f64) {
		self.time += dt;
	}

	/// Seconds since this connection (at this version) entered. A new version restarts the clock.
	pub fn age(&mut self, id: ConnectionId, version: u32) -> f64 {
		let now = self.time;
		let entry = self.reveals.entry(id).or_insert((version, now));
		if entry.0 != version {
			*entry = (version, now);
		}
		now - entry.1
	}

	/// Forget connections that no longer exist.
	pub fn retain(&mut self, live: impl Fn(ConnectionId) -> bool) {
		self.reveals.retain(|id, _| live(*id));
	}
}

pub fn render(state: &PlannerState, frame: &mut FrameState, ctx: &CanvasRenderingContext2d) {
	let viewport = state.viewport();
	ctx.set_fill_style_str(CANVAS_BG);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

	draw_connections(state, frame, ctx);

	let view = state.view();
	ctx.save();
	let _ = ctx.translate(view.pan.x, view.pan.y);
	let _ = ctx.scale(view.scale, view.scale);
	draw_cards(state, ctx);
	ctx.restore();

	if state.hovering_edge().is_some() {
		draw_danger_frame(ctx, viewport.width, viewport.height);
	}
}

fn draw_connections(state: &PlannerState, frame: &mut FrameState, ctx: &CanvasRenderingContext2d) {
	frame.retain(|id| state.connections().iter().any(|c| c.id == id));
	let view = state.view();

	for conn in state.connections() {
		let (Some(a), Some(b)) = (
			state.display_center(conn.from_id),
			state.display_center(conn.to_id),
		) else {
			continue;
		};
		let path = route(view.to_screen(a), view.to_screen(b), view.scale);
		let style = LineStyle::new(Some(conn.transport), view.scale);
		let age = frame.age(conn.id, conn.version);
		let fade = (age / LINE_FADE_SECS).min(1.0);
		let reveal = ease_out_cubic((age / LINE_REVEAL_SECS).min(1.0));

		draw_line(ctx, &path, &style, fade, reveal);
		draw_icon(ctx, conn, &path, &style, fade);
	}
}

fn draw_line(
	ctx: &CanvasRenderingContext2d,
	path: &ConnectionPath,
	style: &LineStyle,
	alpha: f64,
	reveal: f64,
) {
	ctx.save();
	ctx.set_global_alpha(alpha);
	ctx.set_stroke_style_str(style.color);
	ctx.set_line_width(style.stroke_width);
	ctx.set_shadow_color(style.color);
	ctx.set_shadow_blur(CONNECTION_GLOW_BLUR);
	if reveal < 1.0 {
		let length = path.approx_length();
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(length * reveal),
			&JsValue::from_f64(length),
		));
	}

	ctx.begin_path();
	ctx.move_to(path.start.x, path.start.y);
	ctx.bezier_curve_to(
		path.c1.x, path.c1.y, path.c2.x, path.c2.y, path.end.x, path.end.y,
	);
	ctx.stroke();
	ctx.restore();
}

fn draw_icon(
	ctx: &CanvasRenderingContext2d,
	conn: &Connection,
	path: &ConnectionPath,
	style: &LineStyle,
	t: f64,
) {
	let Point { x, y } = path.icon_anchor();
	let pop = 0.5 + 0.5 * ease_out_cubic(t);
	let radius = style.icon_radius * pop;

	ctx.save();
	ctx.set_global_alpha(t);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(TRANSPORT_ICON_BG_COLOR);
	ctx.fill();
	ctx.set_stroke_style_str(TRANSPORT_ICON_RING_COLOR);
	ctx.set_line_width(style.icon_ring_width);
	ctx.stroke();

	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(DEFAULT_CARD_TEXT);
	ctx.set_font(&format!("{}px sans-serif", style.glyph_size * pop * 0.75));
	let _ = ctx.fill_text(conn.transport_emoji(), x, y);

	let caption: Vec<&str> = [conn.distance.as_deref(), conn.estimated_time.as_deref()]
		.into_iter()
		.flatten()
		.collect();
	if !caption.is_empty() {
		ctx.set_fill_style_str(style.color);
		ctx.set_font(&format!("{}px sans-serif", 12.0 * style.glyph_size / TRANSPORT_ICON_GLYPH_SIZE));
		let _ = ctx.fill_text(&caption.join(" · "), x, y + radius + style.glyph_size * 0.4);
	}
	ctx.restore();
}

struct CardLook {
	background: &'static str,
	text: &'static str,
	time: &'static str,
	secondary: &'static str,
	border: Option<&'static str>,
	glow: Option<(&'static str, f64)>,
}

impl CardLook {
	fn new(armed: bool, selected: bool) -> Self {
		if armed {
			Self {
				background: DELETE_INDICATOR_CARD_BG,
				text: DELETE_INDICATOR_CARD_TEXT,
				time: DELETE_INDICATOR_CARD_TEXT,
				secondary: DELETE_INDICATOR_CARD_TEXT,
				border: Some(DELETE_INDICATOR_CARD_BG),
				glow: Some((DELETE_INDICATOR_GLOW_COLOR, DELETE_INDICATOR_GLOW_BLUR)),
			}
		} else if selected {
			Self {
				background: DEFAULT_CARD_BG,
				text: DEFAULT_CARD_TEXT,
				time: CARD_TIME_TEXT,
				secondary: CARD_LOCATION_TEXT,
				border: Some(SELECTED_CARD_BORDER_COLOR),
				glow: Some((SELECTED_CARD_GLOW_COLOR, SELECTED_CARD_GLOW_BLUR)),
			}
		} else {
			Self {
				background: DEFAULT_CARD_BG,
				text: DEFAULT_CARD_TEXT,
				time: CARD_TIME_TEXT,
				secondary: CARD_LOCATION_TEXT,
				border: None,
				glow: None,
			}
		}
	}
}

/// Cards in insertion order; the dragged card is drawn last so it stays on top.
fn draw_cards(state: &PlannerState, ctx: &CanvasRenderingContext2d) {
	let dragged = match state.interaction() {
		Interaction::DraggingCard(drag) => Some(drag.event_id),
		_ => None,
	};
	for event in state.events().iter().filter(|e| Some(e.id) != dragged) {
		draw_card(state, event, false, ctx);
	}
	if let Some(event) = dragged.and_then(|id| state.event(id)) {
		draw_card(state, event, true, ctx);
	}
}

fn draw_card(state: &PlannerState, event: &Event, lifted: bool, ctx: &CanvasRenderingContext2d) {
	let origin = state.display_position(event.id).unwrap_or(event.position());
	let look = CardLook::new(
		state.hovering_edge() == Some(event.id),
		state.first_selected() == Some(event.id),
	);
	let (w, h) = (EVENT_CARD_WIDTH, EVENT_CARD_HEIGHT);
	let cx = w / 2.0;

	ctx.save();
	let _ = ctx.translate(origin.x, origin.y);
	if lifted {
		let _ = ctx.scale(DRAG_LIFT, DRAG_LIFT);
	}

	// shadow blur is in device pixels, not affected by the transform
	if let Some((color, blur)) = look.glow {
		ctx.set_shadow_color(color);
		ctx.set_shadow_blur(blur * state.scale());
	}
	rounded_rect(ctx, 0.0, 0.0, w, h, EVENT_CARD_CORNER_RADIUS);
	ctx.set_fill_style_str(look.background);
	ctx.fill();
	ctx.set_shadow_blur(0.0);
	if let Some(border) = look.border {
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(EVENT_CARD_BORDER_WIDTH);
		ctx.stroke();
	}

	draw_clock(ctx, cx - 26.0, 28.0, look.time);
	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(look.time);
	ctx.set_font("500 12px sans-serif");
	let _ = ctx.fill_text(&event.time, cx - 16.0, 28.0);

	let text_width = w - 32.0;
	ctx.set_text_align("center");
	ctx.set_fill_style_str(look.text);
	ctx.set_font("600 14px sans-serif");
	let _ = ctx.fill_text_with_max_width(&event.title, cx, h / 2.0 + 2.0, text_width);

	if let Some(location) = &event.location {
		ctx.set_fill_style_str(look.secondary);
		ctx.set_font("12px sans-serif");
		let _ = ctx.fill_text_with_max_width(&format!("• {location}"), cx, h / 2.0 + 22.0, text_width);
	}
	ctx.restore();
}

fn draw_clock(ctx: &CanvasRenderingContext2d, x: f64, y: f64, color: &str) {
	ctx.set_stroke_style_str(color);
	ctx.set_line_width(1.0);
	ctx.begin_path();
	let _ = ctx.arc(x, y, 6.0, 0.0, 2.0 * PI);
	ctx.stroke();
	ctx.begin_path();
	ctx.move_to(x, y - 3.5);
	ctx.line_to(x, y);
	ctx.line_to(x + 2.5, y + 2.5);
	ctx.stroke();
}

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

fn draw_danger_frame(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.save();
	ctx.set_shadow_color(DELETE_INDICATOR_GLOW_COLOR);
	ctx.set_shadow_blur(DELETE_INDICATOR_GLOW_BLUR);
	ctx.set_stroke_style_str(DELETE_INDICATOR_GLOW_COLOR);
	ctx.set_line_width(5.0);
	ctx.stroke_rect(0.0, 0.0, width, height);
	ctx.restore();
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn new_version_restarts_the_entry_clock() {
		let mut frame = FrameState::default();
		let id = ConnectionId(3);
		assert_eq!(frame.age(id, 0), 0.0);
		frame.tick(0.4);
		assert_eq!(frame.age(id, 0), 0.4);
		assert_eq!(frame.age(id, 1), 0.0);
		frame.tick(0.1);
		assert_relative_eq!(frame.age(id, 1), 0.1, epsilon = 1e-12);
	}

	#[test]
	fn retain_drops_dead_connections() {
		let mut frame = FrameState::default();
		frame.age(ConnectionId(1), 0);
		frame.tick(1.0);
		frame.age(ConnectionId(2), 0);
		frame.retain(|id| id == ConnectionId(2));
		// a forgotten connection starts over
		assert_eq!(frame.age(ConnectionId(1), 0), 0.0);
		assert_eq!(frame.age(ConnectionId(2), 0), 0.0);
	}

	#[test]
	fn ease_out_cubic_hits_endpoints() {
		assert_eq!(ease_out_cubic(0.0), 0.0);
		assert_eq!(ease_out_cubic(1.0), 1.0);
		assert!(ease_out_cubic(0.5) > 0.5);
	}
}
