use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::config::PlannerConfig;
use super::constants::{EVENT_CARD_HEIGHT, EVENT_CARD_WIDTH, GENERIC_LOCATIONS, GENERIC_MINUTES};
use super::error::PlannerError;
use super::geometry::{Point, Size, ViewTransform};
use super::interaction::{
	DragOutcome, DragSession, Interaction, PanSession, SelectionOutcome, resolve_double_click,
};
use super::types::{
	Connection, ConnectionDraft, ConnectionId, DistanceUnit, Event, EventDraft, EventId, TimeUnit,
	Transport, card_rect,
};

/// Every input the UI can feed into [`PlannerState::dispatch`].
#[derive(Clone, Debug, PartialEq)]
pub enum PlannerAction {
	OpenEventModal,
	CloseEventModal,
	EditEventDraft(EventDraft),
	SaveEvent,
	CreateGenericEvent,
	CardDoubleClicked(EventId),
	CloseConnectionModal,
	EditConnectionDraft(ConnectionDraft),
	SaveConnection,
	CreateGenericConnection,
	/// Screen position relative to the canvas.
	PointerDown(Point),
	PointerMove(Point),
	PointerUp(Point),
	PointerLeave,
	/// Zoom around `focus`, which stays fixed on screen.
	Wheel { delta_y: f64, focus: Point },
	Resize(Size),
	ResetView,
}

/// The whole editing session: events, connections, selection, dialogs and view.
#[derive(Clone, Debug)]
pub struct PlannerState {
	config: PlannerConfig,
	events: Vec<Event>,
	connections: Vec<Connection>,
	view: ViewTransform,
	viewport: Size,
	interaction: Interaction,
	hovering_edge: Option<EventId>,
	first_selected: Option<EventId>,
	pending_connection: Option<(EventId, EventId)>,
	event_modal_open: bool,
	event_draft: EventDraft,
	connection_modal_open: bool,
	connection_draft: ConnectionDraft,
	next_id: u64,
	rng: SmallRng,
}

impl PlannerState {
	/// `seed` is used unless the config pins one.
	pub fn new(config: PlannerConfig, viewport: Size, seed: u64) -> Self {
		let rng = SmallRng::seed_from_u64(config.seed.unwrap_or(seed));
		Self {
			view: home_view(&config),
			config,
			events: Vec::new(),
			connections: Vec::new(),
			viewport,
			interaction: Interaction::Idle,
			hovering_edge: None,
			first_selected: None,
			pending_connection: None,
			event_modal_open: false,
			event_draft: EventDraft::default(),
			connection_modal_open: false,
			connection_draft: ConnectionDraft::default(),
			next_id: 0,
			rng,
		}
	}

	pub fn dispatch(&mut self, action: PlannerAction) -> Result<(), PlannerError> {
		match action {
			PlannerAction::OpenEventModal => self.open_event_modal(),
			PlannerAction::CloseEventModal => self.close_event_modal(),
			PlannerAction::EditEventDraft(draft) => self.event_draft = draft,
			PlannerAction::SaveEvent => {
				self.save_event()?;
			}
			PlannerAction::CreateGenericEvent => {
				self.create_generic_event();
			}
			PlannerAction::CardDoubleClicked(id) => {
				self.select_card(id)?;
			}
			PlannerAction::CloseConnectionModal => self.close_connection_modal(),
			PlannerAction::EditConnectionDraft(draft) => self.connection_draft = draft,
			PlannerAction::SaveConnection => {
				self.save_connection()?;
			}
			PlannerAction::CreateGenericConnection => {
				self.create_generic_connection()?;
			}
			PlannerAction::PointerDown(p) => self.pointer_down(p),
			PlannerAction::PointerMove(p) => self.pointer_move(p),
			PlannerAction::PointerUp(p) => {
				self.pointer_up(p);
			}
			PlannerAction::PointerLeave => self.pointer_leave(),
			PlannerAction::Wheel { delta_y, focus } => {
				self.zoom_at(delta_y, focus);
			}
			PlannerAction::Resize(size) => self.resize(size),
			PlannerAction::ResetView => self.reset_view(),
		}
		Ok(())
	}

	// ── Read access ─────────────────────────────────────────────────

	pub fn events(&self) -> &[Event] {
		&self.events
	}

	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	pub fn event(&self, id: EventId) -> Option<&Event> {
		self.events.iter().find(|e| e.id == id)
	}

	pub fn connection_between(&self, a: EventId, b: EventId) -> Option<&Connection> {
		self.connections.iter().find(|c| c.joins(a, b))
	}

	pub fn view(&self) -> &ViewTransform {
		&self.view
	}

	pub fn scale(&self) -> f64 {
		self.view.scale
	}

	pub fn viewport(&self) -> Size {
		self.viewport
	}

	pub fn interaction(&self) -> &Interaction {
		&self.interaction
	}

	/// Card currently armed for deletion, if any.
	pub fn hovering_edge(&self) -> Option<EventId> {
		self.hovering_edge
	}

	pub fn first_selected(&self) -> Option<EventId> {
		self.first_selected
	}

	pub fn pending_connection(&self) -> Option<(EventId, EventId)> {
		self.pending_connection
	}

	pub fn event_modal_open(&self) -> bool {
		self.event_modal_open
	}

	pub fn connection_modal_open(&self) -> bool {
		self.connection_modal_open
	}

	pub fn event_draft(&self) -> &EventDraft {
		&self.event_draft
	}

	pub fn connection_draft(&self) -> &ConnectionDraft {
		&self.connection_draft
	}

	/// Committed position, or the in-flight position while the card is being dragged.
	pub fn display_position(&self, id: EventId) -> Option<Point> {
		match &self.interaction {
			Interaction::DraggingCard(drag) if drag.event_id == id => Some(drag.candidate()),
			_ => self.event(id).map(Event::position),
		}
	}

	/// Card center in canvas units.
	pub fn display_center(&self, id: EventId) -> Option<Point> {
		self.display_position(id).map(|p| card_rect(p).center())
	}

	pub fn screen_to_canvas(&self, p: Point) -> Point {
		self.view.to_canvas(p)
	}

	/// Topmost card under a screen point.
	pub fn card_at(&self, screen: Point) -> Option<EventId> {
		self.events
			.iter()
			.rev()
			.find(|e| {
				let origin = self.display_position(e.id).unwrap_or(e.position());
				self.view.rect_to_screen(card_rect(origin)).contains(screen)
			})
			.map(|e| e.id)
	}

	fn any_modal_open(&self) -> bool {
		self.event_modal_open || self.connection_modal_open
	}

	fn next_id(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	// ── Events ──────────────────────────────────────────────────────

	pub fn open_event_modal(&mut self) {
		self.event_draft = EventDraft::default();
		self.event_modal_open = true;
	}

	pub fn close_event_modal(&mut self) {
		self.event_modal_open = false;
		self.event_draft = EventDraft::default();
	}

	pub fn create_event(&mut self, draft: &EventDraft) -> Result<Event, PlannerError> {
		let title = draft.title.trim();
		if title.is_empty() {
			warn!("event rejected: missing title");
			return Err(PlannerError::MissingTitle);
		}
		if draft.time.is_empty() {
			warn!("event rejected: missing time");
			return Err(PlannerError::MissingTime);
		}
		let location = Some(draft.location.trim())
			.filter(|l| !l.is_empty())
			.map(str::to_string);
		Ok(self.place_event(title.to_string(), draft.time.clone(), location, draft.group.clone()))
	}

	pub fn save_event(&mut self) -> Result<Event, PlannerError> {
		let draft = self.event_draft.clone();
		self.create_event(&draft)
	}

	/// Sample event with a generated title, time and location.
	pub fn create_generic_event(&mut self) -> Event {
		let hour = self.rng.random_range(0..24u32);
		let minute = GENERIC_MINUTES.choose(&mut self.rng).copied().unwrap_or("00");
		let location = GENERIC_LOCATIONS.choose(&mut self.rng).map(|l| l.to_string());
		let title = format!("Event {}", self.events.len() + 1);
		self.place_event(title, format!("{hour:02}:{minute}"), location, None)
	}

	fn place_event(
		&mut self,
		title: String,
		time: String,
		location: Option<String>,
		group: Option<String>,
	) -> Event {
		let position = self.random_position();
		let event = Event {
			id: EventId(self.next_id()),
			title,
			time,
			location,
			group,
			x: position.x,
			y: position.y,
		};
		info!("created {} '{}' at {}", event.id, event.title, event.time);
		self.events.push(event.clone());
		self.close_event_modal();
		event
	}

	/// Random top-left corner inside the visible part of the canvas, leaving room for a whole card.
	fn random_position(&mut self) -> Point {
		let origin = self.view.to_canvas(Point::ZERO);
		let visible = self.viewport.scaled(1.0 / self.view.scale);
		let span = Size::new(
			(visible.width - EVENT_CARD_WIDTH).max(0.0),
			(visible.height - EVENT_CARD_HEIGHT).max(0.0),
		);
		Point::new(
			origin.x + self.rng.random::<f64>() * span.width,
			origin.y + self.rng.random::<f64>() * span.height,
		)
	}

	/// Removes the event and every connection touching it.
	pub fn remove_event(&mut self, id: EventId) -> Option<Event> {
		let idx = self.events.iter().position(|e| e.id == id)?;
		let event = self.events.remove(idx);
		let before = self.connections.len();
		self.connections.retain(|c| !c.touches(id));
		if self.first_selected == Some(id) {
			self.first_selected = None;
		}
		if self
			.pending_connection
			.is_some_and(|(from, to)| from == id || to == id)
		{
			self.close_connection_modal();
		}
		info!(
			"deleted {} '{}' and {} connection(s)",
			id,
			event.title,
			before - self.connections.len()
		);
		Some(event)
	}

	// ── Selection & connections ─────────────────────────────────────

	pub fn select_card(&mut self, id: EventId) -> Result<SelectionOutcome, PlannerError> {
		if self.event(id).is_none() {
			return Err(PlannerError::UnknownEvent(id));
		}
		let outcome = resolve_double_click(self.first_selected, id, |a, b| {
			self.connection_between(a, b).is_some()
		});
		match outcome {
			SelectionOutcome::Pending(id) => self.first_selected = Some(id),
			SelectionOutcome::Deselected | SelectionOutcome::AlreadyConnected => {
				self.first_selected = None
			}
			SelectionOutcome::ConnectionRequested { from, to } => {
				self.open_connection_modal(from, to)
			}
		}
		debug!("double-click {id}: {outcome:?}");
		Ok(outcome)
	}

	fn open_connection_modal(&mut self, from: EventId, to: EventId) {
		self.pending_connection = Some((from, to));
		self.connection_draft = ConnectionDraft::default();
		self.connection_modal_open = true;
	}

	pub fn close_connection_modal(&mut self) {
		self.connection_modal_open = false;
		self.pending_connection = None;
		self.first_selected = None;
		self.connection_draft = ConnectionDraft::default();
	}

	pub fn create_connection(&mut self, draft: &ConnectionDraft) -> Result<Connection, PlannerError> {
		let Some((from_id, to_id)) = self.pending_connection else {
			warn!("connection rejected: nothing pending");
			return Err(PlannerError::NoPendingConnection);
		};
		let Some(transport) = draft.transport else {
			warn!("connection rejected: missing transport");
			return Err(PlannerError::MissingTransport);
		};
		for id in [from_id, to_id] {
			if self.event(id).is_none() {
				return Err(PlannerError::UnknownEvent(id));
			}
		}
		let connection = Connection {
			id: ConnectionId(self.next_id()),
			from_id,
			to_id,
			version: 0,
			transport,
			distance: draft.distance_label(),
			estimated_time: draft.time_label(),
		};
		info!(
			"connected {from_id} -> {to_id} by {}",
			transport.description()
		);
		self.connections.push(connection.clone());
		self.close_connection_modal();
		Ok(connection)
	}

	pub fn save_connection(&mut self) -> Result<Connection, PlannerError> {
		let draft = self.connection_draft.clone();
		self.create_connection(&draft)
	}

	/// Sample connection with random transport, distance and travel time.
	pub fn create_generic_connection(&mut self) -> Result<Connection, PlannerError> {
		if self.pending_connection.is_none() {
			return Err(PlannerError::NoPendingConnection);
		}
		let draft = ConnectionDraft {
			transport: Transport::ALL.choose(&mut self.rng).copied(),
			distance_value: Some(self.rng.random_range(1..=100u32) as f64),
			distance_unit: DistanceUnit::ALL.choose(&mut self.rng).copied(),
			time_value: Some(self.rng.random_range(10..=59u32) as f64),
			time_unit: TimeUnit::ALL.choose(&mut self.rng).copied(),
		};
		self.create_connection(&draft)
	}

	// ── Pointer ─────────────────────────────────────────────────────

	/// Starts a card drag on a hit, otherwise a pan. Ignored while a dialog is open.
	pub fn pointer_down(&mut self, screen: Point) {
		if self.any_modal_open() {
			return;
		}
		match self.card_at(screen) {
			Some(id) => {
				if let Err(err) = self.begin_drag(id, screen) {
					warn!("{err}");
				}
			}
			None => self.interaction = Interaction::Panning(PanSession::begin(screen)),
		}
	}

	pub fn begin_drag(&mut self, id: EventId, pointer: Point) -> Result<(), PlannerError> {
		let origin = self
			.event(id)
			.map(Event::position)
			.ok_or(PlannerError::UnknownEvent(id))?;
		self.hovering_edge = None;
		self.interaction = Interaction::DraggingCard(DragSession::begin(id, origin, pointer));
		Ok(())
	}

	pub fn pointer_move(&mut self, screen: Point) {
		let padding = self.config.danger_zone_padding;
		match &mut self.interaction {
			Interaction::DraggingCard(drag) => {
				let armed = drag.update(screen, &self.view, self.viewport, padding);
				self.hovering_edge = armed.then_some(drag.event_id);
			}
			Interaction::Panning(pan) => {
				let delta = pan.step(screen);
				self.pan_by(delta);
			}
			Interaction::Idle => {}
		}
	}

	/// Ends the current gesture. Returns the drag outcome when a card was being dragged.
	pub fn pointer_up(&mut self, screen: Point) -> Option<DragOutcome> {
		let Interaction::DraggingCard(drag) = std::mem::take(&mut self.interaction) else {
			return None;
		};
		self.hovering_edge = None;
		let outcome = drag.finish(
			screen,
			&self.view,
			self.viewport,
			self.config.danger_zone_padding,
		);
		match outcome {
			DragOutcome::Deleted { event_id } => {
				self.remove_event(event_id);
			}
			DragOutcome::Repositioned { event_id, position } => {
				self.commit_position(event_id, position)
			}
			DragOutcome::Released { .. } => {}
		}
		Some(outcome)
	}

	/// Pointer left the canvas: release any drag where the pointer was last seen.
	pub fn pointer_leave(&mut self) {
		if let Interaction::DraggingCard(drag) = &self.interaction {
			let last = drag.last_pointer();
			self.pointer_up(last);
		} else {
			self.interaction = Interaction::Idle;
		}
	}

	fn commit_position(&mut self, id: EventId, position: Point) {
		let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
			return;
		};
		event.x = position.x;
		event.y = position.y;
		for conn in self.connections.iter_mut().filter(|c| c.touches(id)) {
			conn.version += 1;
		}
		debug!("moved {id} to ({:.0}, {:.0})", position.x, position.y);
	}

	// ── View ────────────────────────────────────────────────────────

	/// Adjusts the zoom from a wheel delta. Returns the new scale.
	pub fn zoom(&mut self, delta_y: f64) -> f64 {
		let focus = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
		self.zoom_at(delta_y, focus)
	}

	pub fn zoom_at(&mut self, delta_y: f64, focus: Point) -> f64 {
		if !delta_y.is_finite() {
			return self.view.scale;
		}
		let k = self.view.scale;
		let new_k = (k - delta_y * self.config.zoom_sensitivity)
			.clamp(self.config.zoom_min, self.config.zoom_max);
		let ratio = new_k / k;
		self.view.pan = focus - (focus - self.view.pan) * ratio;
		self.view.scale = new_k;
		new_k
	}

	pub fn pan_by(&mut self, delta: Point) {
		self.view.pan = self.view.pan + delta;
	}

	pub fn resize(&mut self, viewport: Size) {
		self.viewport = viewport;
	}

	pub fn reset_view(&mut self) {
		self.view = home_view(&self.config);
	}
}

/// Unpanned view at unit zoom, pulled into the configured zoom range.
fn home_view(config: &PlannerConfig) -> ViewTransform {
	ViewTransform {
		pan: Point::ZERO,
		scale: 1.0_f64.clamp(config.zoom_min, config.zoom_max),
	}
}
