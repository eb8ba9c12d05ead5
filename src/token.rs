//! Secret-bearing token types produced by the code exchange.

// self
use crate::_prelude::*;

/// Redacted secret wrapper keeping credential material out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Token material returned by a successful authorization-code exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
	/// Bearer access token issued by the token endpoint.
	pub access_token: TokenSecret,
	/// Refresh token, when the provider issues one.
	pub refresh_token: Option<TokenSecret>,
	/// Expiry instant derived from the response's `expires_in`, when present.
	pub expires_at: Option<OffsetDateTime>,
}
impl TokenGrant {
	/// Returns whether the grant is expired at the provided instant.
	///
	/// Grants without an expiry never report as expired.
	pub fn is_expired_at(&self, now: OffsetDateTime) -> bool {
		self.expires_at.is_some_and(|expires_at| expires_at <= now)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn grant_expiry_compares_against_now() {
		let now = OffsetDateTime::now_utc();
		let grant = TokenGrant {
			access_token: TokenSecret::new("access"),
			refresh_token: None,
			expires_at: Some(now + Duration::seconds(300)),
		};

		assert!(!grant.is_expired_at(now));
		assert!(grant.is_expired_at(now + Duration::seconds(301)));

		let without_expiry = TokenGrant { expires_at: None, ..grant };

		assert!(!without_expiry.is_expired_at(now + Duration::days(365)));
	}
}
