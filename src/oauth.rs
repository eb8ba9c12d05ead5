//! Internal OAuth client facade abstractions.

pub use oauth2;

// crates.io
use oauth2::{
	AuthType, AuthUrl, AuthorizationCode, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RedirectUrl, RequestTokenError, TokenResponse, TokenUrl,
	basic::{BasicClient, BasicErrorResponse, BasicRequestTokenError},
};
// self
use crate::{
	_prelude::*,
	config::Endpoints,
	error::{ConfigError, HandshakeError},
	http::HandshakeHttpClient,
	token::{TokenGrant, TokenSecret},
};

type ConfiguredBasicClient =
	BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;
type FacadeTokenResponse = oauth2::basic::BasicTokenResponse;
type FacadeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Facade over the `oauth2` crate scoped to one authorization-code exchange.
///
/// Built per call so request-scoped credentials never leak into shared state.
pub(crate) struct ExchangeFacade<C>
where
	C: ?Sized + HandshakeHttpClient,
{
	oauth_client: ConfiguredBasicClient,
	http_client: Arc<C>,
}
impl<C> ExchangeFacade<C>
where
	C: ?Sized + HandshakeHttpClient,
{
	pub(crate) fn from_endpoints(
		endpoints: &Endpoints,
		client_id: &str,
		client_secret: &str,
		http_client: Arc<C>,
	) -> Result<Self> {
		let auth_url = AuthUrl::new(endpoints.authorization.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "authorization", source })?;
		let token_url = TokenUrl::new(endpoints.token.to_string())
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source })?;
		let redirect_url = RedirectUrl::new(endpoints.callback.to_string())
			.map_err(|source| ConfigError::InvalidCallback { source })?;
		// Jackson reads client credentials from the POST body, not the Authorization header.
		let oauth_client = BasicClient::new(ClientId::new(client_id.to_owned()))
			.set_auth_uri(auth_url)
			.set_token_uri(token_url)
			.set_client_secret(ClientSecret::new(client_secret.to_owned()))
			.set_redirect_uri(redirect_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client })
	}

	pub(crate) fn exchange_authorization_code<'a>(
		&'a self,
		code: &str,
	) -> FacadeFuture<'a, TokenGrant> {
		let code = AuthorizationCode::new(code.to_owned());

		Box::pin(async move {
			let handle = self.http_client.token_handle();
			let response = self
				.oauth_client
				.exchange_code(code)
				.request_async(&handle)
				.await
				.map_err(map_request_error)?;

			Ok(map_token_response(response))
		})
	}
}

fn map_token_response(response: FacadeTokenResponse) -> TokenGrant {
	let expires_at = response.expires_in().and_then(|ttl| {
		let secs = i64::try_from(ttl.as_secs()).ok()?;

		Some(OffsetDateTime::now_utc() + Duration::seconds(secs))
	});

	TokenGrant {
		access_token: TokenSecret::new(response.access_token().secret().to_owned()),
		refresh_token: response
			.refresh_token()
			.map(|token| TokenSecret::new(token.secret().to_owned())),
		expires_at,
	}
}

fn map_request_error<E>(err: BasicRequestTokenError<HttpClientError<E>>) -> Error
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(response),
		RequestTokenError::Request(HttpClientError::Http(inner)) => ConfigError::from(inner).into(),
		RequestTokenError::Request(error) => HandshakeError::transport(error).into(),
		RequestTokenError::Parse(source, _body) =>
			HandshakeError::TokenResponseParse { source }.into(),
		RequestTokenError::Other(message) => HandshakeError::TokenEndpoint { message }.into(),
	}
}

fn map_server_response_error(response: BasicErrorResponse) -> Error {
	HandshakeError::TokenRejected {
		error: response.error().as_ref().to_string(),
		description: response.error_description().cloned(),
	}
	.into()
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::{config::StrategyConfig, http::ReqwestHttpClient};

	#[test]
	fn builds_exchange_client_from_endpoints() {
		let config = StrategyConfig::new(
			"https://sso.example.com",
			"client-id",
			"client-secret",
			"https://app.example.com/callback",
		);
		let endpoints = Endpoints::derive(&config)
			.expect("Endpoint derivation should succeed for the fixture.");
		let result = ExchangeFacade::from_endpoints(
			&endpoints,
			&config.client_id,
			config.client_secret.expose(),
			Arc::new(ReqwestHttpClient::default()),
		);

		assert!(result.is_ok());
	}
}
