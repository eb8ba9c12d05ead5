//! Shared request/response surface for the login handshake (options, overrides, outcomes).

// self
use crate::{_prelude::*, session::DEFAULT_SESSION_KEY, token::TokenSecret};

/// Per-call options controlling redirects, session keying, and credentials.
#[derive(Clone, Debug)]
pub struct AuthenticateOptions {
	/// Redirect target applied after a verified sign-in.
	pub success_redirect: Option<String>,
	/// Redirect target applied when the handshake fails, instead of surfacing the error.
	pub failure_redirect: Option<String>,
	/// Session key under which the pending handshake state is stashed.
	pub session_key: String,
	/// Request-scoped tenant credentials for this call only.
	pub context: Option<CredentialOverride>,
}
impl AuthenticateOptions {
	/// Creates options with the default session key and no redirects.
	pub fn new() -> Self {
		Self {
			success_redirect: None,
			failure_redirect: None,
			session_key: DEFAULT_SESSION_KEY.to_owned(),
			context: None,
		}
	}

	/// Sets the redirect issued after a verified sign-in.
	pub fn with_success_redirect(mut self, redirect: impl Into<String>) -> Self {
		self.success_redirect = Some(redirect.into());

		self
	}

	/// Sets the redirect issued when the handshake fails.
	pub fn with_failure_redirect(mut self, redirect: impl Into<String>) -> Self {
		self.failure_redirect = Some(redirect.into());

		self
	}

	/// Overrides the session key (defaults to [`DEFAULT_SESSION_KEY`]).
	pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
		self.session_key = key.into();

		self
	}

	/// Attaches request-scoped tenant credentials.
	pub fn with_context(mut self, context: CredentialOverride) -> Self {
		self.context = Some(context);

		self
	}
}
impl Default for AuthenticateOptions {
	fn default() -> Self {
		Self::new()
	}
}

/// Tenant credentials supplied for a single `authenticate` call.
///
/// Multi-tenant hosts resolve credentials per incoming request (the client
/// identifier is usually a `tenant=...&product=...` pair understood by the
/// issuer). The pair takes effect only when both halves are present and
/// non-empty; otherwise the authenticator falls back to its base credentials.
#[derive(Clone, Default)]
pub struct CredentialOverride {
	/// Tenant-scoped client identifier.
	pub client_id: Option<String>,
	/// Tenant-scoped client secret.
	pub client_secret: Option<TokenSecret>,
}
impl CredentialOverride {
	/// Creates an override carrying both credential halves.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: Some(client_id.into()),
			client_secret: Some(TokenSecret::new(client_secret)),
		}
	}

	/// Effective credential pair, present only when both halves are non-empty.
	pub fn credentials(&self) -> Option<(&str, &str)> {
		match (self.client_id.as_deref(), self.client_secret.as_ref()) {
			(Some(id), Some(secret)) if !id.is_empty() && !secret.expose().is_empty() =>
				Some((id, secret.expose())),
			_ => None,
		}
	}
}
impl Debug for CredentialOverride {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CredentialOverride")
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.finish()
	}
}

/// Incoming request URL examined by the authenticator.
///
/// Wraps the full request URL so the handshake leg can be decided from the
/// query alone: callbacks carry a `code` or `error` parameter, fresh logins
/// carry neither.
#[derive(Clone, Debug)]
pub struct LoginRequest(Url);
impl LoginRequest {
	/// Wraps a request URL.
	pub fn new(url: Url) -> Self {
		Self(url)
	}

	/// Whether this request is the provider callback.
	pub fn is_callback(&self) -> bool {
		self.query("code").is_some() || self.query("error").is_some()
	}

	/// Authorization code returned by the provider, if present.
	pub fn authorization_code(&self) -> Option<String> {
		self.query("code")
	}

	/// Anti-forgery state mirrored back by the provider, if present.
	pub fn state(&self) -> Option<String> {
		self.query("state")
	}

	/// Error code reported by the provider, if present.
	pub fn provider_error(&self) -> Option<String> {
		self.query("error")
	}

	/// Human-readable error description accompanying [`provider_error`](Self::provider_error).
	pub fn provider_error_description(&self) -> Option<String> {
		self.query("error_description")
	}

	/// First query parameter value under `name`, if present.
	pub fn query(&self, name: &str) -> Option<String> {
		self.0.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
	}

	/// Underlying request URL.
	pub fn url(&self) -> &Url {
		&self.0
	}
}
impl From<Url> for LoginRequest {
	fn from(url: Url) -> Self {
		Self::new(url)
	}
}

/// Result of one `authenticate` call.
#[derive(Debug)]
pub enum Outcome<U> {
	/// First leg: send the end user to this authorize URL.
	Authorize(Url),
	/// Second leg: the callback was exchanged and the user admitted.
	Authenticated {
		/// Session user produced by the verification hook.
		user: U,
		/// Redirect target from [`AuthenticateOptions::success_redirect`], if set.
		redirect: Option<String>,
	},
	/// The handshake failed and a failure redirect was configured.
	Failed {
		/// Redirect target from [`AuthenticateOptions::failure_redirect`].
		redirect: String,
		/// Failure that triggered the redirect.
		error: Error,
	},
}
impl<U> Outcome<U> {
	/// Authorize URL when this outcome is the first handshake leg.
	pub fn authorize_url(&self) -> Option<&Url> {
		match self {
			Outcome::Authorize(url) => Some(url),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn override_requires_both_halves_to_be_non_empty() {
		let full = CredentialOverride::new("tenant=acme.com&product=demo", "tenant-secret");

		assert_eq!(full.credentials(), Some(("tenant=acme.com&product=demo", "tenant-secret")));

		let id_only =
			CredentialOverride { client_id: Some("tenant".into()), client_secret: None };
		let secret_only =
			CredentialOverride { client_id: None, client_secret: Some(TokenSecret::new("s")) };
		let empty_id = CredentialOverride::new("", "tenant-secret");
		let empty_secret = CredentialOverride::new("tenant", "");

		assert_eq!(id_only.credentials(), None);
		assert_eq!(secret_only.credentials(), None);
		assert_eq!(empty_id.credentials(), None);
		assert_eq!(empty_secret.credentials(), None);
	}

	#[test]
	fn override_debug_never_prints_the_secret() {
		let rendered = format!("{:?}", CredentialOverride::new("tenant", "super-secret"));

		assert!(rendered.contains("client_secret_set"));
		assert!(!rendered.contains("super-secret"));
	}

	#[test]
	fn callback_detection_keys_off_code_and_error() {
		let initial = LoginRequest::from(
			Url::parse("https://app.example.com/auth/saml").expect("Request URL should parse."),
		);
		let with_code = LoginRequest::from(
			Url::parse("https://app.example.com/auth/saml/callback?code=abc&state=xyz")
				.expect("Callback URL should parse."),
		);
		let with_error = LoginRequest::from(
			Url::parse("https://app.example.com/auth/saml/callback?error=access_denied")
				.expect("Error callback URL should parse."),
		);

		assert!(!initial.is_callback());
		assert!(with_code.is_callback());
		assert!(with_error.is_callback());
		assert_eq!(with_code.authorization_code().as_deref(), Some("abc"));
		assert_eq!(with_code.state().as_deref(), Some("xyz"));
		assert_eq!(with_error.provider_error().as_deref(), Some("access_denied"));
		assert_eq!(with_error.provider_error_description(), None);
		assert_eq!(initial.authorization_code(), None);
	}

	#[test]
	fn options_default_to_the_standard_session_key() {
		let options = AuthenticateOptions::default();

		assert_eq!(options.session_key, DEFAULT_SESSION_KEY);
		assert!(options.success_redirect.is_none());
		assert!(options.failure_redirect.is_none());
		assert!(options.context.is_none());
	}
}
