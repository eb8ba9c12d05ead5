//! High-level login orchestration powered by the exchange facade.

pub mod common;

mod handshake;

pub use common::*;

// self
use crate::{
	_prelude::*,
	config::{Endpoints, StrategyConfig},
	error::VerificationError,
	http::HandshakeHttpClient,
	session::SessionStore,
	strategy::LoginStrategy,
	token::TokenGrant,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Authenticator specialized for the crate's default reqwest transport stack.
#[cfg(feature = "reqwest")]
pub type ReqwestAuthenticator<S, V> = Authenticator<S, V, ReqwestHttpClient>;

/// Future type returned by [`VerifyUser`] hooks.
pub type VerifyFuture<'a, U> =
	Pin<Box<dyn Future<Output = Result<U, VerificationError>> + 'a + Send>>;

/// Application hook that admits a provider profile as a session user.
///
/// The hook runs after the code exchange and profile parse succeed. It decides
/// whether the sign-in is acceptable (account lookup, provisioning, tenant
/// checks) and produces whatever user value the host application stores in its
/// session. Closures returning [`VerifyFuture`] implement this automatically.
pub trait VerifyUser<P>
where
	Self: 'static + Send + Sync,
	P: 'static + Send,
{
	/// Session user type produced on success.
	type User: 'static + Send;

	/// Validates the profile + grant pair and produces the session user.
	fn verify(&self, params: VerifyParams<P>) -> VerifyFuture<'_, Self::User>;
}
impl<P, U, F> VerifyUser<P> for F
where
	F: 'static + Send + Sync + Fn(VerifyParams<P>) -> VerifyFuture<'static, U>,
	P: 'static + Send,
	U: 'static + Send,
{
	type User = U;

	fn verify(&self, params: VerifyParams<P>) -> VerifyFuture<'_, U> {
		self(params)
	}
}

/// Inputs handed to a [`VerifyUser`] hook after a successful code exchange.
#[derive(Clone, Debug)]
pub struct VerifyParams<P> {
	/// Parsed provider profile.
	pub profile: P,
	/// Token grant returned by the exchange.
	pub grant: TokenGrant,
}

/// Coordinates the delegated login handshake for one issuer + strategy pair.
///
/// The authenticator owns the HTTP client, session store, verification hook,
/// and endpoints derived from the issuer so the handshake legs can focus on
/// wire behavior. Base credentials live in the shared config; per-request
/// overrides travel through call options and are never written back.
pub struct Authenticator<S, V, C>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
	C: ?Sized + HandshakeHttpClient,
{
	/// HTTP client used for both handshake legs.
	pub http_client: Arc<C>,
	/// Variant-specific login strategy.
	pub strategy: Arc<S>,
	/// Application hook that admits verified users.
	pub verify: Arc<V>,
	/// Session backend stashing per-login handshake state.
	pub session: Arc<dyn SessionStore>,
	/// Issuer-level configuration shared by every login.
	pub config: StrategyConfig,
	/// Endpoint URLs derived from the issuer at construction time.
	pub endpoints: Endpoints,
}
impl<S, V, C> Authenticator<S, V, C>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
	C: ?Sized + HandshakeHttpClient,
{
	/// Creates an authenticator that reuses the caller-provided transport.
	///
	/// Endpoint URLs are derived from the issuer once, here, so a malformed
	/// issuer or callback URL fails construction rather than the first login.
	pub fn with_http_client(
		session: Arc<dyn SessionStore>,
		config: StrategyConfig,
		strategy: impl Into<Arc<S>>,
		verify: impl Into<Arc<V>>,
		http_client: impl Into<Arc<C>>,
	) -> Result<Self> {
		let endpoints = Endpoints::derive(&config)?;

		Ok(Self {
			http_client: http_client.into(),
			strategy: strategy.into(),
			verify: verify.into(),
			session,
			config,
			endpoints,
		})
	}

	/// Name of the underlying strategy variant.
	pub fn strategy_name(&self) -> &'static str {
		self.strategy.name()
	}
}
#[cfg(feature = "reqwest")]
impl<S, V> Authenticator<S, V, ReqwestHttpClient>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
{
	/// Creates a new authenticator backed by the crate's default reqwest transport.
	///
	/// Use [`Authenticator::with_http_client`] to supply a customized client,
	/// for example one carrying proxy settings or a private certificate store.
	pub fn new(
		session: Arc<dyn SessionStore>,
		config: StrategyConfig,
		strategy: impl Into<Arc<S>>,
		verify: impl Into<Arc<V>>,
	) -> Result<Self> {
		Self::with_http_client(session, config, strategy, verify, ReqwestHttpClient::default())
	}
}
// Derived `Clone` would demand `V: Clone` even though only the `Arc` is copied.
impl<S, V, C> Clone for Authenticator<S, V, C>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
	C: ?Sized + HandshakeHttpClient,
{
	fn clone(&self) -> Self {
		Self {
			http_client: self.http_client.clone(),
			strategy: self.strategy.clone(),
			verify: self.verify.clone(),
			session: self.session.clone(),
			config: self.config.clone(),
			endpoints: self.endpoints.clone(),
		}
	}
}
impl<S, V, C> Debug for Authenticator<S, V, C>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
	C: ?Sized + HandshakeHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator")
			.field("strategy", &self.strategy.name())
			.field("issuer", &self.config.issuer)
			.field("client_id", &self.config.client_id)
			.finish()
	}
}
