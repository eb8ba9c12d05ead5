//! The two-leg authorization-code handshake behind `Authenticator::authenticate`.
//!
//! Leg one stashes a fresh anti-forgery state in the session and hands back
//! the authorize redirect. Leg two validates the callback, exchanges the code
//! for a token grant (honoring per-request credentials), loads the user
//! profile, and runs the application's verification hook.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	error::HandshakeError,
	flows::{
		AuthenticateOptions, Authenticator, CredentialOverride, LoginRequest, Outcome,
		VerifyParams, VerifyUser,
	},
	http::HandshakeHttpClient,
	oauth::ExchangeFacade,
	obs::{self, HandshakeKind, HandshakeOutcome, HandshakeSpan},
	session::HandshakeState,
	strategy::LoginStrategy,
};

const STATE_LEN: usize = 32;

impl<S, V, C> Authenticator<S, V, C>
where
	S: LoginStrategy,
	V: ?Sized + VerifyUser<S::Profile>,
	C: ?Sized + HandshakeHttpClient,
{
	/// Runs one step of the delegated login handshake.
	///
	/// Requests without a `code` or `error` query parameter start a new login
	/// and resolve to [`Outcome::Authorize`]. Provider callbacks resolve to
	/// [`Outcome::Authenticated`] once the code exchange, profile load, and
	/// verification hook all succeed. When `options.failure_redirect` is set,
	/// failures resolve to [`Outcome::Failed`] instead of `Err`.
	pub async fn authenticate(
		&self,
		request: LoginRequest,
		options: AuthenticateOptions,
	) -> Result<Outcome<V::User>> {
		let kind = if request.is_callback() {
			HandshakeKind::Exchange
		} else {
			HandshakeKind::Authorize
		};
		let span = HandshakeSpan::new(self.strategy.name(), kind);

		obs::record_handshake_outcome(kind, HandshakeOutcome::Attempt);

		let failure_redirect = options.failure_redirect.clone();
		let result = span
			.instrument(async move {
				match kind {
					HandshakeKind::Authorize => self.begin(&options).await,
					HandshakeKind::Exchange => self.finish(&request, &options).await,
				}
			})
			.await;
		let result = match (result, failure_redirect) {
			(Err(error), Some(redirect)) => Ok(Outcome::Failed { redirect, error }),
			(result, _) => result,
		};

		match &result {
			Ok(Outcome::Failed { .. }) | Err(_) =>
				obs::record_handshake_outcome(kind, HandshakeOutcome::Failure),
			Ok(_) => obs::record_handshake_outcome(kind, HandshakeOutcome::Success),
		}

		result
	}

	/// Fetches and parses the user profile for a previously obtained access token.
	///
	/// The user-info response body is parsed whatever the status code; a
	/// non-JSON error page surfaces as a profile parse failure rather than a
	/// transport error.
	pub async fn user_profile(&self, access_token: &str) -> Result<S::Profile> {
		let response =
			self.http_client.fetch_userinfo(&self.endpoints.userinfo, access_token).await?;

		Ok(self.strategy.parse_profile(&response)?)
	}

	async fn begin(&self, options: &AuthenticateOptions) -> Result<Outcome<V::User>> {
		let state = random_string(STATE_LEN);
		let (client_id, _) = self.effective_credentials(options.context.as_ref());

		// Stash before handing out the redirect so a fast callback always finds it.
		self.session.put(&options.session_key, HandshakeState::new(state.clone())).await?;

		Ok(Outcome::Authorize(self.build_authorize_url(client_id, &state)))
	}

	async fn finish(
		&self,
		request: &LoginRequest,
		options: &AuthenticateOptions,
	) -> Result<Outcome<V::User>> {
		if let Some(error) = request.provider_error() {
			return Err(HandshakeError::ProviderDenied {
				error,
				description: request.provider_error_description(),
			}
			.into());
		}

		let code = request.authorization_code().ok_or(HandshakeError::MissingCode)?;
		let returned_state = request.state().ok_or(HandshakeError::MissingState)?;
		// Taking (not reading) makes the pending state single-use; a replayed
		// callback fails even when its state would otherwise match.
		let pending = self
			.session
			.take(&options.session_key)
			.await?
			.ok_or(HandshakeError::SessionStateMissing)?;

		if !pending.matches(&returned_state) {
			return Err(HandshakeError::StateMismatch.into());
		}

		let (client_id, client_secret) = self.effective_credentials(options.context.as_ref());
		let facade = ExchangeFacade::from_endpoints(
			&self.endpoints,
			client_id,
			client_secret,
			self.http_client.clone(),
		)?;
		let grant = facade.exchange_authorization_code(&code).await?;
		let profile = self.user_profile(grant.access_token.expose()).await?;
		let user = self.verify.verify(VerifyParams { profile, grant }).await?;

		Ok(Outcome::Authenticated { user, redirect: options.success_redirect.clone() })
	}

	fn build_authorize_url(&self, client_id: &str, state: &str) -> Url {
		let mut extra = BTreeMap::new();

		self.strategy.augment_authorize_request(&mut extra);

		let mut url = self.endpoints.authorization.clone();
		let mut pairs = url.query_pairs_mut();

		pairs.append_pair("response_type", "code");
		pairs.append_pair("client_id", client_id);
		pairs.append_pair("redirect_uri", self.endpoints.callback.as_str());
		pairs.append_pair("state", state);

		for (key, value) in &extra {
			pairs.append_pair(key, value);
		}

		drop(pairs);

		url
	}

	fn effective_credentials<'a>(
		&'a self,
		context: Option<&'a CredentialOverride>,
	) -> (&'a str, &'a str) {
		context
			.and_then(CredentialOverride::credentials)
			.unwrap_or((&self.config.client_id, self.config.client_secret.expose()))
	}
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}
