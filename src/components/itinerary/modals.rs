//! Dialogs for creating events and describing connections.
//!
//! Both dialogs edit the drafts held by [`PlannerState`] and submit through
//! [`PlannerAction`], so validation lives in one place.

use leptos::prelude::*;

use super::component::send;
use super::state::{PlannerAction, PlannerState};
use super::types::{ConnectionDraft, DistanceUnit, EventDraft, TimeUnit, Transport};

fn edit_event(state: RwSignal<PlannerState>, edit: impl FnOnce(&mut EventDraft)) {
	let mut draft = state.with_untracked(|s| s.event_draft().clone());
	edit(&mut draft);
	send(state, PlannerAction::EditEventDraft(draft));
}

fn edit_connection(state: RwSignal<PlannerState>, edit: impl FnOnce(&mut ConnectionDraft)) {
	let mut draft = state.with_untracked(|s| s.connection_draft().clone());
	edit(&mut draft);
	send(state, PlannerAction::EditConnectionDraft(draft));
}

fn parse_measure(raw: &str) -> Option<f64> {
	raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[component]
pub fn EventModal(state: RwSignal<PlannerState>) -> impl IntoView {
	let open = Memo::new(move |_| state.with(|s| s.event_modal_open()));
	let complete = move || state.with(|s| s.event_draft().is_complete());

	view! {
		<Show when=move || open.get()>
			<div class="modal-overlay" on:click=move |_| send(state, PlannerAction::CloseEventModal)>
				<div class="modal" on:click=|ev| ev.stop_propagation()>
					<h3>"Create Event"</h3>

					<label for="event-title">"Event Title " <span class="required">"*"</span></label>
					<input
						id="event-title"
						type="text"
						placeholder="e.g., Museum Visit"
						prop:value=move || state.with(|s| s.event_draft().title.clone())
						on:input=move |ev| {
							let value = event_target_value(&ev);
							edit_event(state, |d| d.title = value);
						}
					/>

					<label for="event-time">"Time " <span class="required">"*"</span></label>
					<input
						id="event-time"
						type="time"
						prop:value=move || state.with(|s| s.event_draft().time.clone())
						on:input=move |ev| {
							let value = event_target_value(&ev);
							edit_event(state, |d| d.time = value);
						}
					/>

					<label for="event-location">"Location"</label>
					<input
						id="event-location"
						type="text"
						placeholder="e.g., Louvre, Paris"
						prop:value=move || state.with(|s| s.event_draft().location.clone())
						on:input=move |ev| {
							let value = event_target_value(&ev);
							edit_event(state, |d| d.location = value);
						}
					/>

					<div class="modal-actions">
						<button
							type="button"
							class="btn-generic"
							on:click=move |_| send(state, PlannerAction::CreateGenericEvent)
						>
							"Create Generic"
						</button>
						<button
							type="button"
							class="btn-cancel"
							on:click=move |_| send(state, PlannerAction::CloseEventModal)
						>
							"Cancel"
						</button>
						<button
							type="button"
							class="btn-save"
							class:incomplete=move || !complete()
							on:click=move |_| send(state, PlannerAction::SaveEvent)
						>
							"Save Event"
						</button>
					</div>
				</div>
			</div>
		</Show>
	}
}

#[component]
pub fn ConnectionModal(state: RwSignal<PlannerState>) -> impl IntoView {
	let open = Memo::new(move |_| state.with(|s| s.connection_modal_open()));
	let route = move || {
		state.with(|s| {
			s.pending_connection()
				.and_then(|(from, to)| Some(format!("{} → {}", s.event(from)?.title, s.event(to)?.title)))
				.unwrap_or_default()
		})
	};
	let has_transport = move || state.with(|s| s.connection_draft().transport.is_some());

	// number inputs are not value-bound so partial input like "2." survives
	view! {
		<Show when=move || open.get()>
			<div class="modal-overlay" on:click=move |_| send(state, PlannerAction::CloseConnectionModal)>
				<div class="modal" on:click=|ev| ev.stop_propagation()>
					<h3>"Connection Details"</h3>
					<p class="modal-route">{route}</p>

					<label for="transport">"Transport " <span class="required">"*"</span></label>
					<select
						id="transport"
						prop:value=move || {
							state
								.with(|s| s.connection_draft().transport.map(Transport::glyph))
								.unwrap_or_default()
								.to_string()
						}
						on:change=move |ev| {
							let glyph = event_target_value(&ev);
							edit_connection(state, |d| d.transport = Transport::from_glyph(&glyph));
						}
					>
						{Transport::ALL
							.into_iter()
							.map(|t| {
								view! {
									<option value=t.glyph()>{format!("{} - {}", t.glyph(), t.description())}</option>
								}
							})
							.collect_view()}
					</select>

					<label for="distance-value">"Distance"</label>
					<div class="measure-row">
						<input
							id="distance-value"
							type="number"
							min="0"
							step="any"
							placeholder="e.g., 2.5"
							on:input=move |ev| {
								let value = parse_measure(&event_target_value(&ev));
								edit_connection(state, |d| d.distance_value = value);
							}
						/>
						<select
							id="distance-unit"
							prop:value=move || {
								state
									.with(|s| s.connection_draft().distance_unit.map(DistanceUnit::value))
									.unwrap_or_default()
									.to_string()
							}
							on:change=move |ev| {
								let unit = DistanceUnit::from_value(&event_target_value(&ev));
								edit_connection(state, |d| d.distance_unit = unit);
							}
						>
							{DistanceUnit::ALL
								.into_iter()
								.map(|u| view! { <option value=u.value()>{u.label()}</option> })
								.collect_view()}
						</select>
					</div>

					<label for="time-value">"Estimated Time"</label>
					<div class="measure-row">
						<input
							id="time-value"
							type="number"
							min="0"
							step="any"
							placeholder="e.g., 15"
							on:input=move |ev| {
								let value = parse_measure(&event_target_value(&ev));
								edit_connection(state, |d| d.time_value = value);
							}
						/>
						<select
							id="time-unit"
							prop:value=move || {
								state
									.with(|s| s.connection_draft().time_unit.map(TimeUnit::value))
									.unwrap_or_default()
									.to_string()
							}
							on:change=move |ev| {
								let unit = TimeUnit::from_value(&event_target_value(&ev));
								edit_connection(state, |d| d.time_unit = unit);
							}
						>
							{TimeUnit::ALL
								.into_iter()
								.map(|u| view! { <option value=u.value()>{u.label()}</option> })
								.collect_view()}
						</select>
					</div>

					<div class="modal-actions">
						<button
							type="button"
							class="btn-generic"
							on:click=move |_| send(state, PlannerAction::CreateGenericConnection)
						>
							"Create Generic"
						</button>
						<button
							type="button"
							class="btn-cancel"
							on:click=move |_| send(state, PlannerAction::CloseConnectionModal)
						>
							"Cancel"
						</button>
						<button
							type="button"
							class="btn-save"
							class:incomplete=move || !has_transport()
							on:click=move |_| send(state, PlannerAction::SaveConnection)
						>
							"Save Connection"
						</button>
					</div>
				</div>
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::parse_measure;

	#[test]
	fn measure_input_parsing() {
		assert_eq!(parse_measure(" 2.5 "), Some(2.5));
		assert_eq!(parse_measure(""), None);
		assert_eq!(parse_measure("abc"), None);
		assert_eq!(parse_measure("inf"), None);
	}
}
