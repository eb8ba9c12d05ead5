//! BoxyHQ SSO login strategy for Rust web apps: SAML and generic SSO sign-in through a
//! Jackson-compatible OAuth 2.0 handshake, with per-request tenant credentials.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod session;
pub mod strategy;
pub mod token;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		config::StrategyConfig,
		flows::{Authenticator, VerifyUser},
		http::ReqwestHttpClient,
		session::{MemorySessionStore, SessionStore},
		strategy::LoginStrategy,
	};

	/// Authenticator type alias used by reqwest-backed integration tests.
	pub type ReqwestTestAuthenticator<S, V> = Authenticator<S, V, ReqwestHttpClient>;

	/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_http_client() -> ReqwestHttpClient {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestHttpClient::with_client(client)
	}

	/// Constructs an [`Authenticator`] backed by an in-memory session store and the insecure
	/// reqwest transport used across integration tests.
	pub fn build_test_authenticator<S, V>(
		config: StrategyConfig,
		strategy: S,
		verify: V,
	) -> Result<(ReqwestTestAuthenticator<S, V>, Arc<MemorySessionStore>)>
	where
		S: LoginStrategy,
		V: VerifyUser<S::Profile>,
	{
		let session_backend = Arc::new(MemorySessionStore::default());
		let session: Arc<dyn SessionStore> = session_backend.clone();
		let authenticator = Authenticator::with_http_client(
			session,
			config,
			strategy,
			verify,
			test_reqwest_http_client(),
		)?;

		Ok((authenticator, session_backend))
	}

}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
