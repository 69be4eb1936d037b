//! Error taxonomy shared by every cefd crate.

use cefd_protocol::UnsupportedLocatorError;
use thiserror::Error;

/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the driver.
///
/// The first five variants are the driver's contract with its callers;
/// [`Transport`](Self::Transport) and [`Input`](Self::Input) carry
/// collaborator failures from beneath that contract. No operation ever
/// substitutes a default value for one of these.
#[derive(Debug, Error)]
pub enum Error {
	/// Malformed or unrecognized locator wire string.
	///
	/// Raised at the parse boundary, before any script is compiled or sent.
	#[error(transparent)]
	UnsupportedLocator(#[from] UnsupportedLocatorError),

	/// A singular find produced zero matches. Carries the locator's wire
	/// form.
	#[error("no such element: {0}")]
	NoSuchElement(String),

	/// The remote runtime raised while evaluating a script. Carries the
	/// remote error message. Distinct from a successful evaluation that
	/// returned no value.
	#[error("script execution failed: {0}")]
	ScriptExecution(String),

	/// A decoded value does not fit any recognized result variant, or does
	/// not match the shape the caller expected.
	#[error("unsupported result type: {0}")]
	UnsupportedResultType(String),

	/// Operation against an element whose issuing epoch has been superseded
	/// by a navigation.
	#[error("stale element reference: entry {id} was issued in epoch {issued_epoch}, session is at epoch {current_epoch}")]
	StaleElement {
		id: u32,
		issued_epoch: u64,
		current_epoch: u64,
	},

	/// The script channel itself failed.
	#[error("transport error: {0}")]
	Transport(String),

	/// The input-synthesis collaborator failed.
	#[error("input synthesis error: {0}")]
	Input(String),
}

impl Error {
	/// Returns `true` for [`Error::StaleElement`].
	pub fn is_stale(&self) -> bool {
		matches!(self, Self::StaleElement { .. })
	}

	/// Returns `true` for [`Error::NoSuchElement`].
	pub fn is_no_such_element(&self) -> bool {
		matches!(self, Self::NoSuchElement(_))
	}
}
