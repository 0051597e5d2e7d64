use leptos::prelude::*;
use log::{info, warn};

use crate::components::itinerary::geometry::Size;
use crate::components::itinerary::{
	ConnectionModal, EventModal, ItineraryCanvas, PlannerAction, PlannerConfig, PlannerState, send,
};

/// Id of the `<script type="application/json">` block carrying planner settings.
const CONFIG_ELEMENT_ID: &str = "planner-config";

/// Reads settings from the page, falling back to defaults when absent or invalid.
fn load_config() -> PlannerConfig {
	let raw = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
		.and_then(|el| el.text_content());
	let Some(raw) = raw else {
		return PlannerConfig::default();
	};
	match PlannerConfig::from_json(&raw) {
		Ok(config) => {
			info!("loaded planner config from #{CONFIG_ELEMENT_ID}");
			config
		}
		Err(err) => {
			warn!("{err}; using default planner config");
			PlannerConfig::default()
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = load_config();
	let seed = js_sys::Date::now() as u64;
	let state = RwSignal::new(PlannerState::new(config, Size::default(), seed));

	let zoom_label = move || format!("{:.0}%", state.with(|s| s.scale()) * 100.0);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-planner">
				<ItineraryCanvas state=state fullscreen=true />
				<div class="planner-overlay">
					<h1>"Trip Planner"</h1>
					<p class="subtitle">
						"Drag cards to move them, or to the edge to delete. Double-click two cards to connect them. Scroll to zoom. Drag background to pan."
					</p>
				</div>
				<button
					class="reset-view"
					title="Reset view"
					on:click=move |_| send(state, PlannerAction::ResetView)
				>
					{zoom_label}
				</button>
				<button
					class="add-event"
					aria-label="Add new event"
					on:click=move |_| send(state, PlannerAction::OpenEventModal)
				>
					"+"
				</button>
				<EventModal state=state />
				<ConnectionModal state=state />
			</div>
		</ErrorBoundary>
	}
}
