use thiserror::Error;

use super::lifecycle::Phase;

/// Everything that can go wrong while mounting or driving the field. None of
/// it is fatal to the page: the embedding component logs the error and leaves
/// the field out.
#[derive(Debug, Error)]
pub enum FieldError {
	#[error("no global window")]
	NoWindow,

	#[error("no document or root element")]
	NoDocument,

	#[error("canvas has no drawing surface yet")]
	SurfaceUnavailable,

	#[error("2d context unavailable: {0}")]
	ContextUnavailable(String),

	#[error("cannot go from {from:?} to {to:?}")]
	InvalidTransition { from: Phase, to: Phase },

	#[error("failed to listen for '{event}': {reason}")]
	Listener { event: &'static str, reason: String },

	#[error("scheduler error: {0}")]
	Scheduler(String),
}
