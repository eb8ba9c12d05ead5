//! Transport primitives for the two handshake legs.
//!
//! [`HandshakeHttpClient`] is the strategy's only dependency on an HTTP stack.
//! The token exchange needs an [`AsyncHttpClient`] handle that the `oauth2`
//! crate drives, and the user-info fetch needs a bearer-authorized GET that
//! hands back the raw body without interpreting the status code. Both legs
//! share one client so connection pools and TLS configuration live in a
//! single place.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{AsyncHttpClient, HttpClientError, HttpResponse};
#[cfg(feature = "reqwest")] use oauth2::HttpRequest;
// self
use crate::{_prelude::*, error::ProfileError};

/// Abstraction over HTTP transports capable of serving both handshake legs.
///
/// Implementations must be `Send + Sync + 'static` so they can sit behind the
/// authenticator's `Arc` without additional wrappers, and the token handles
/// they return must own whatever state their request futures need so those
/// futures remain `Send` for the lifetime of the in-flight exchange.
pub trait HandshakeHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// [`AsyncHttpClient`] handle consumed by the `oauth2` code exchange.
	///
	/// The request future returned by [`AsyncHttpClient::call`] must be `Send`
	/// so the facade's boxed futures inherit the same guarantee.
	type Handle: for<'c> AsyncHttpClient<
			'c,
			Error = HttpClientError<Self::TransportError>,
			Future: 'c + Send,
		>
		+ 'static
		+ Send
		+ Sync;

	/// Builds a fresh handle for one token exchange.
	fn token_handle(&self) -> Self::Handle;

	/// Performs the bearer-authorized user-info GET.
	///
	/// Implementations hand back the status and raw body untouched; callers
	/// parse the body regardless of the status code.
	fn fetch_userinfo<'a>(&'a self, url: &'a Url, access_token: &'a str) -> UserInfoFuture<'a>;
}

/// Boxed future returned by [`HandshakeHttpClient::fetch_userinfo`].
pub type UserInfoFuture<'a> =
	Pin<Box<dyn Future<Output = Result<UserInfoResponse, ProfileError>> + 'a + Send>>;

/// Raw user-info response handed to a [`LoginStrategy`](crate::strategy::LoginStrategy) parser.
#[derive(Clone, Debug)]
pub struct UserInfoResponse {
	/// HTTP status code returned by the user-info endpoint.
	///
	/// Recorded for observability only; parsing never consults it.
	pub status: u16,
	/// Raw response body.
	pub body: Vec<u8>,
}

/// Default transport backed by a shared [`ReqwestClient`].
///
/// Both handshake legs reuse the wrapped client, so pool limits, proxies, and
/// TLS settings configured once apply to the token exchange and the user-info
/// fetch alike.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

/// Handle returned by [`ReqwestHttpClient`] that satisfies the `oauth2` client contract.
#[cfg(feature = "reqwest")]
#[derive(Clone)]
pub struct ReqwestHandle(ReqwestClient);
#[cfg(feature = "reqwest")]
impl<'c> AsyncHttpClient<'c> for ReqwestHandle {
	type Error = HttpClientError<ReqwestError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'c + Send + Sync>>;

	fn call(&'c self, request: HttpRequest) -> Self::Future {
		let client = self.0.clone();

		Box::pin(async move {
			let response =
				client.execute(request.try_into().map_err(Box::new)?).await.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}
#[cfg(feature = "reqwest")]
impl HandshakeHttpClient for ReqwestHttpClient {
	type Handle = ReqwestHandle;
	type TransportError = ReqwestError;

	fn token_handle(&self) -> Self::Handle {
		ReqwestHandle(self.0.clone())
	}

	fn fetch_userinfo<'a>(&'a self, url: &'a Url, access_token: &'a str) -> UserInfoFuture<'a> {
		let request = self.0.get(url.as_str()).bearer_auth(access_token);

		Box::pin(async move {
			let response = request.send().await.map_err(ProfileError::network)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(ProfileError::network)?.to_vec();

			Ok(UserInfoResponse { status, body })
		})
	}
}
