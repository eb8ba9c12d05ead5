//! Error types shared across the login strategy.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Session-layer failure.
	#[error("{0}")]
	Session(
		#[from]
		#[source]
		crate::session::SessionError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Authorization-code handshake failure.
	#[error(transparent)]
	Handshake(#[from] HandshakeError),
	/// User-info retrieval or parsing failure.
	#[error(transparent)]
	Profile(#[from] ProfileError),
	/// Application-level verification rejected the sign-in.
	#[error(transparent)]
	Verification(#[from] VerificationError),
}

/// Configuration and validation failures raised while wiring endpoints.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// Callback URL cannot be parsed.
	#[error("Callback URL is invalid.")]
	InvalidCallback {
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
	/// Issuer-derived endpoint is not a valid URL.
	#[error("Issuer yields an invalid {endpoint} endpoint URL.")]
	InvalidEndpoint {
		/// Endpoint label (`authorization`, `token`, or `userinfo`).
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: oauth2::url::ParseError,
	},
}

/// Authorization-code handshake failures.
#[derive(Debug, ThisError)]
pub enum HandshakeError {
	/// Authorization server redirected back with an error instead of a code.
	#[error("Provider denied the authorization request: {error}.")]
	ProviderDenied {
		/// OAuth 2.0 error code carried by the callback query.
		error: String,
		/// Human-readable description carried by the callback query, if any.
		description: Option<String>,
	},
	/// Callback query carries neither a code nor an error.
	#[error("Callback is missing the authorization code.")]
	MissingCode,
	/// Callback query carries no state parameter.
	#[error("Callback is missing the state parameter.")]
	MissingState,
	/// No pending handshake state was found in the session.
	#[error("No pending login was found in the session.")]
	SessionStateMissing,
	/// Returned state does not match the stored state.
	#[error("Callback state does not match the pending login.")]
	StateMismatch,

	/// Token endpoint rejected the code exchange.
	#[error("Token endpoint rejected the exchange: {error}.")]
	TokenRejected {
		/// OAuth 2.0 error code from the token response.
		error: String,
		/// Human-readable description from the token response, if any.
		description: Option<String>,
	},
	/// Token endpoint responded with JSON that could not be parsed.
	#[error("Token endpoint returned malformed JSON.")]
	TokenResponseParse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
	/// Transport failure while calling the token endpoint.
	#[error("Network error occurred while calling the token endpoint.")]
	TokenTransport {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Token endpoint returned an unexpected response.
	#[error("Token endpoint returned an unexpected response: {message}.")]
	TokenEndpoint {
		/// Message summarizing the failure.
		message: String,
	},
}
impl HandshakeError {
	/// Wraps a transport-specific failure from the token exchange.
	pub fn transport(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::TokenTransport { source: Box::new(src) }
	}
}

/// User-info retrieval and parsing failures.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while fetching the user profile.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// User-info body could not be parsed into the strategy's profile type.
	#[error("User-info response returned malformed JSON.")]
	Malformed {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
	},
}
impl ProfileError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Application-level rejection raised by a [`VerifyUser`](crate::flows::VerifyUser) hook.
#[derive(Debug, ThisError)]
#[error("Verification rejected the sign-in: {reason}.")]
pub struct VerificationError {
	/// Application-supplied reason string.
	pub reason: String,
	/// Underlying failure, if any.
	#[source]
	pub source: Option<BoxError>,
}
impl VerificationError {
	/// Creates a verification failure carrying a reason only.
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into(), source: None }
	}

	/// Attaches an underlying failure to the verification error.
	pub fn with_source(mut self, src: impl 'static + Send + Sync + std::error::Error) -> Self {
		self.source = Some(Box::new(src));

		self
	}
}
