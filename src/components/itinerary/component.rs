use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::error::PlannerError;
use super::geometry::{Point, Size};
use super::interaction::Interaction;
use super::render::{self, FrameState};
use super::state::{PlannerAction, PlannerState};

const FRAME_SECS: f64 = 0.016;

/// Feeds an action into the session. Rejected actions raise a blocking notice.
pub fn send(state: RwSignal<PlannerState>, action: PlannerAction) {
	if let Some(Err(err)) = state.try_update(|s| s.dispatch(action)) {
		notify(&err);
	}
}

fn notify(err: &PlannerError) {
	warn!("{err}");
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(&err.to_string());
	}
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

fn viewport_size(window: &Window, canvas: &HtmlCanvasElement, fullscreen: bool) -> Size {
	if fullscreen {
		let dim = |v: Result<JsValue, JsValue>, fallback| v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback);
		Size::new(
			dim(window.inner_width(), 800.0),
			dim(window.inner_height(), 600.0),
		)
	} else {
		canvas
			.parent_element()
			.map(|p| Size::new(p.client_width() as f64, p.client_height() as f64))
			.unwrap_or(Size::new(800.0, 600.0))
	}
}

/// The planning surface: cards, connection lines, drag, pan and wheel zoom.
#[component]
pub fn ItineraryCanvas(
	state: RwSignal<PlannerState>,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let frame: Rc<RefCell<FrameState>> = Rc::new(RefCell::new(FrameState::default()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let size = viewport_size(&window, &canvas, fullscreen);
		canvas.set_width(size.width as u32);
		canvas.set_height(size.height as u32);
		send(state, PlannerAction::Resize(size));

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas 2d context unavailable");
			return;
		};

		let canvas_resize = canvas.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let size = viewport_size(&win, &canvas_resize, fullscreen);
			canvas_resize.set_width(size.width as u32);
			canvas_resize.set_height(size.height as u32);
			send(state, PlannerAction::Resize(size));
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (frame_anim, animate_inner) = (frame.clone(), animate.clone());
		*animate.borrow_mut() = Some(Closure::new(move || {
			let mut frame = frame_anim.borrow_mut();
			frame.tick(FRAME_SECS);
			state.with_untracked(|s| render::render(s, &mut frame, &ctx));
			if let (Some(cb), Some(win)) = (animate_inner.borrow().as_ref(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(p) = canvas_point(canvas_ref, &ev) {
			send(state, PlannerAction::PointerDown(p));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		// plain hover does not touch the session
		if state.with_untracked(|s| *s.interaction() == Interaction::Idle) {
			return;
		}
		if let Some(p) = canvas_point(canvas_ref, &ev) {
			send(state, PlannerAction::PointerMove(p));
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		if let Some(p) = canvas_point(canvas_ref, &ev) {
			send(state, PlannerAction::PointerUp(p));
		}
	};

	let on_mouseleave = move |_: MouseEvent| send(state, PlannerAction::PointerLeave);

	let on_dblclick = move |ev: MouseEvent| {
		let hit = canvas_point(canvas_ref, &ev).and_then(|p| state.with_untracked(|s| s.card_at(p)));
		if let Some(id) = hit {
			send(state, PlannerAction::CardDoubleClicked(id));
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(focus) = canvas_point(canvas_ref, &ev) {
			send(
				state,
				PlannerAction::Wheel {
					delta_y: ev.delta_y(),
					focus,
				},
			);
		}
	};

	let style = move || {
		let cursor = state.with(|s| match s.interaction() {
			Interaction::Idle => "grab",
			_ => "grabbing",
		});
		format!("display: block; cursor: {cursor};")
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="itinerary-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style=style
		/>
	}
}
