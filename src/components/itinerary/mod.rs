mod component;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod interaction;
mod modals;
mod render;
pub mod routing;
pub mod state;
pub mod types;

pub use component::{ItineraryCanvas, send};
pub use config::PlannerConfig;
pub use error::PlannerError;
pub use modals::{ConnectionModal, EventModal};
pub use state::{PlannerAction, PlannerState};
pub use types::{Connection, ConnectionDraft, Event, EventDraft, EventId, Transport};
