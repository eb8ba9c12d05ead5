//! Strategy configuration and endpoint derivation for Jackson-compatible issuers.

// self
use crate::{_prelude::*, error::ConfigError, token::TokenSecret};

/// Immutable configuration captured once at strategy construction.
///
/// The issuer is the base URL of the identity provider deployment with no
/// trailing slash; endpoint paths are appended to it verbatim, so the issuer's
/// own format is deliberately left unchecked beyond parsing the derived URLs.
#[derive(Clone, Debug, Deserialize)]
pub struct StrategyConfig {
	/// Base URL of the identity provider deployment.
	pub issuer: String,
	/// OAuth 2.0 client identifier (the issuer also accepts `tenant`/`product`
	/// tuples encoded into this value).
	pub client_id: String,
	/// OAuth 2.0 client secret.
	pub client_secret: TokenSecret,
	/// Absolute callback URL registered with the issuer.
	pub callback_url: String,
}
impl StrategyConfig {
	/// Creates a configuration from the four required values.
	pub fn new(
		issuer: impl Into<String>,
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		callback_url: impl Into<String>,
	) -> Self {
		Self {
			issuer: issuer.into(),
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			callback_url: callback_url.into(),
		}
	}
}

/// Issuer-derived endpoint set, computed once at construction and never recomputed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Authorize endpoint the end-user's browser is redirected to.
	pub authorization: Url,
	/// Token endpoint used for the code exchange.
	pub token: Url,
	/// User-info endpoint queried after the exchange.
	pub userinfo: Url,
	/// Callback URL the provider redirects back to.
	pub callback: Url,
}
impl Endpoints {
	/// Derives the `/api/oauth/*` endpoints from the issuer and parses the callback URL.
	///
	/// Paths are appended by plain string concatenation: an issuer carrying a
	/// trailing slash yields a double-slash path rather than being corrected.
	pub fn derive(config: &StrategyConfig) -> Result<Self, ConfigError> {
		let authorization = parse_endpoint(&config.issuer, "/api/oauth/authorize", "authorization")?;
		let token = parse_endpoint(&config.issuer, "/api/oauth/token", "token")?;
		let userinfo = parse_endpoint(&config.issuer, "/api/oauth/userinfo", "userinfo")?;
		let callback = Url::parse(&config.callback_url)
			.map_err(|source| ConfigError::InvalidCallback { source })?;

		Ok(Self { authorization, token, userinfo, callback })
	}
}

fn parse_endpoint(issuer: &str, path: &str, endpoint: &'static str) -> Result<Url, ConfigError> {
	Url::parse(&format!("{issuer}{path}"))
		.map_err(|source| ConfigError::InvalidEndpoint { endpoint, source })
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn config_for(issuer: &str) -> StrategyConfig {
		StrategyConfig::new(issuer, "client-id", "client-secret", "https://app.example.com/callback")
	}

	#[test]
	fn derives_endpoints_from_issuer() {
		let endpoints = Endpoints::derive(&config_for("https://sso.eu.boxyhq.com"))
			.expect("Endpoint derivation should succeed for a plain issuer.");

		assert_eq!(endpoints.authorization.host_str(), Some("sso.eu.boxyhq.com"));
		assert_eq!(endpoints.authorization.path(), "/api/oauth/authorize");
		assert_eq!(endpoints.token.path(), "/api/oauth/token");
		assert_eq!(endpoints.userinfo.path(), "/api/oauth/userinfo");
		assert_eq!(endpoints.callback.as_str(), "https://app.example.com/callback");
	}

	#[test]
	fn trailing_slash_is_not_corrected() {
		let endpoints = Endpoints::derive(&config_for("https://sso.example.com/"))
			.expect("Endpoint derivation should succeed even with a trailing slash.");

		assert_eq!(endpoints.authorization.path(), "//api/oauth/authorize");
	}

	#[test]
	fn malformed_issuer_fails_fast() {
		let err = Endpoints::derive(&config_for("not a base url"))
			.expect_err("A relative issuer should fail endpoint derivation.");

		assert!(matches!(err, ConfigError::InvalidEndpoint { endpoint: "authorization", .. }));
	}

	#[test]
	fn malformed_callback_fails_fast() {
		let config =
			StrategyConfig::new("https://sso.example.com", "client-id", "client-secret", "not a url");
		let err = Endpoints::derive(&config)
			.expect_err("A relative callback URL should fail endpoint derivation.");

		assert!(matches!(err, ConfigError::InvalidCallback { .. }));
	}
}
