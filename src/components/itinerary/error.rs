use thiserror::Error;

use super::types::EventId;

/// A rejected user action. Every variant is recoverable by correcting the input and retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
	#[error("Event title is required.")]
	MissingTitle,
	#[error("Event time is required.")]
	MissingTime,
	#[error("Transportation type is required.")]
	MissingTransport,
	#[error("No connection is pending.")]
	NoPendingConnection,
	#[error("Unknown event {0}.")]
	UnknownEvent(EventId),
	#[error("Invalid planner configuration: {0}")]
	InvalidConfig(String),
}
