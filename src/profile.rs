//! Canonical user-profile shapes returned by the user-info endpoint.

// self
use crate::{_prelude::*, error::ProfileError, http::UserInfoResponse};

/// Profile returned by the SAML-branded strategy variant.
///
/// The issuer only forwards name attributes when the upstream SAML assertion
/// carries them, so both are optional here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamlProfile {
	/// Stable subject identifier assigned by the issuer.
	pub id: String,
	/// Email address asserted by the identity provider.
	pub email: String,
	/// Given name, when the assertion includes one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	/// Family name, when the assertion includes one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	/// Fixed strategy name tag, stamped after parsing and never read from the
	/// response body.
	#[serde(default)]
	pub provider: String,
}

/// Profile returned by the generic SSO strategy variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SsoProfile {
	/// Stable subject identifier assigned by the issuer.
	pub id: String,
	/// Email address asserted by the identity provider.
	pub email: String,
	/// Given name asserted by the identity provider.
	pub first_name: String,
	/// Family name asserted by the identity provider.
	pub last_name: String,
	/// Attribute passthrough requested from the identity provider.
	pub requested: BTreeMap<String, String>,
	/// Fixed strategy name tag, stamped after parsing and never read from the
	/// response body.
	#[serde(default)]
	pub provider: String,
}

/// Deserializes a user-info body into a profile shape, never consulting the
/// HTTP status.
pub(crate) fn parse_json_profile<T>(response: &UserInfoResponse) -> Result<T, ProfileError>
where
	T: for<'de> Deserialize<'de>,
{
	let mut deserializer = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut deserializer)
		.map_err(|source| ProfileError::Malformed { source })
}
