//! Session contracts and the built-in session backend for pending logins.

pub mod memory;

pub use memory::MemorySessionStore;

// self
use crate::_prelude::*;

/// Default session key under which pending handshake state is stashed.
pub const DEFAULT_SESSION_KEY: &str = "oauth2:state";

/// Future type returned by [`SessionStore`] operations.
pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, SessionError>> + 'a + Send>>;

/// Session backend contract for stashing per-login handshake state.
///
/// Implementations bridge to whatever session mechanism the host application
/// already has (cookie sessions, server-side stores). The strategy reads and
/// writes exactly one key per login attempt; scoping keys to the end user is
/// the implementation's job.
pub trait SessionStore
where
	Self: Send + Sync,
{
	/// Stores or replaces the pending handshake state under `key`.
	fn put<'a>(&'a self, key: &'a str, state: HandshakeState) -> SessionFuture<'a, ()>;

	/// Fetches the pending handshake state without consuming it.
	fn get<'a>(&'a self, key: &'a str) -> SessionFuture<'a, Option<HandshakeState>>;

	/// Removes and returns the pending handshake state, if any.
	fn take<'a>(&'a self, key: &'a str) -> SessionFuture<'a, Option<HandshakeState>>;
}

/// Pending handshake state stashed between the authorize redirect and the callback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandshakeState {
	/// Anti-forgery state parameter mirrored into the authorize redirect.
	pub state: String,
	/// Instant the authorize redirect was issued.
	pub issued_at: OffsetDateTime,
}
impl HandshakeState {
	/// Creates a state record stamped with the current instant.
	pub fn new(state: impl Into<String>) -> Self {
		Self { state: state.into(), issued_at: OffsetDateTime::now_utc() }
	}

	/// Whether the callback's state parameter matches the stashed one.
	pub fn matches(&self, returned_state: &str) -> bool {
		self.state == returned_state
	}
}

/// Error type produced by [`SessionStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum SessionError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the session engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}
