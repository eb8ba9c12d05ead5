//! Optional observability helpers for login handshakes.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `boxyhq_sso.handshake` with the `strategy`
//!   (variant name) and `stage` (handshake leg) fields.
//! - Enable `metrics` to increment the `boxyhq_sso_handshake_total` counter for every
//!   attempt/success/failure, labeled by `stage` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Handshake legs observed by the strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeKind {
	/// First leg, issuing the authorize redirect.
	Authorize,
	/// Second leg, exchanging the callback code and loading the profile.
	Exchange,
}
impl HandshakeKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeKind::Authorize => "authorize",
			HandshakeKind::Exchange => "exchange",
		}
	}
}
impl Display for HandshakeKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandshakeOutcome {
	/// Entry to a handshake leg.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl HandshakeOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			HandshakeOutcome::Attempt => "attempt",
			HandshakeOutcome::Success => "success",
			HandshakeOutcome::Failure => "failure",
		}
	}
}
impl Display for HandshakeOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
