// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	future::Future,
	pin::Pin,
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
use url::Url;
// self
use boxyhq_sso::{
	config::StrategyConfig,
	error::{Error, HandshakeError},
	flows::{
		AuthenticateOptions, Authenticator, CredentialOverride, LoginRequest, Outcome, VerifyFuture,
		VerifyParams,
	},
	http::{HandshakeHttpClient, UserInfoFuture, UserInfoResponse},
	oauth::oauth2::{
		AsyncHttpClient, HttpClientError, HttpRequest, HttpResponse,
		http::header::{CONTENT_TYPE, HeaderValue},
	},
	profile::SamlProfile,
	session::{DEFAULT_SESSION_KEY, MemorySessionStore, SessionStore},
	strategy::SamlStrategy,
};

const ISSUER: &str = "https://sso.eu.boxyhq.com";
const CLIENT_ID: &str = "client-it";
const CLIENT_SECRET: &str = "secret-it";
const CALLBACK: &str = "https://app.example.com/auth/saml/callback";

type SamlVerifier = fn(VerifyParams<SamlProfile>) -> VerifyFuture<'static, SessionUser>;

#[derive(Debug)]
enum FakeTransportError {
	Refused,
}
impl Display for FakeTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::Refused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for FakeTransportError {}

#[derive(Clone, Default)]
struct RecordingHttpClient {
	fail_exchange: bool,
	token_bodies: Arc<Mutex<Vec<String>>>,
	bearer_tokens: Arc<Mutex<Vec<String>>>,
}
impl RecordingHttpClient {
	fn failing() -> Self {
		Self { fail_exchange: true, ..Self::default() }
	}

	fn token_body(&self) -> String {
		self.token_bodies.lock().first().cloned().expect("A token request should be recorded.")
	}

	fn bearer_token(&self) -> String {
		self.bearer_tokens.lock().first().cloned().expect("A user-info request should be recorded.")
	}
}
impl HandshakeHttpClient for RecordingHttpClient {
	type Handle = RecordingHandle;
	type TransportError = FakeTransportError;

	fn token_handle(&self) -> Self::Handle {
		RecordingHandle {
			fail_exchange: self.fail_exchange,
			token_bodies: self.token_bodies.clone(),
		}
	}

	fn fetch_userinfo<'a>(&'a self, _url: &'a Url, access_token: &'a str) -> UserInfoFuture<'a> {
		let bearer_tokens = self.bearer_tokens.clone();
		let access_token = access_token.to_owned();

		Box::pin(async move {
			bearer_tokens.lock().push(access_token);

			Ok(UserInfoResponse {
				status: 200,
				body: b"{\"id\":\"saml-007\",\"email\":\"jackson@example.com\"}".to_vec(),
			})
		})
	}
}

struct RecordingHandle {
	fail_exchange: bool,
	token_bodies: Arc<Mutex<Vec<String>>>,
}
impl<'a> AsyncHttpClient<'a> for RecordingHandle {
	type Error = HttpClientError<FakeTransportError>;
	type Future =
		Pin<Box<dyn Future<Output = Result<HttpResponse, Self::Error>> + 'a + Send + Sync>>;

	fn call(&'a self, request: HttpRequest) -> Self::Future {
		let fail_exchange = self.fail_exchange;
		let token_bodies = self.token_bodies.clone();

		Box::pin(async move {
			if fail_exchange {
				return Err(HttpClientError::Reqwest(Box::new(FakeTransportError::Refused)));
			}

			token_bodies.lock().push(String::from_utf8_lossy(request.body()).into_owned());

			let mut response = HttpResponse::new(
				b"{\"access_token\":\"access-recorded\",\"token_type\":\"bearer\",\"expires_in\":3600}"
					.to_vec(),
			);

			response
				.headers_mut()
				.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

			Ok(response)
		})
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct SessionUser {
	email: String,
	access_token: String,
}

fn admit(params: VerifyParams<SamlProfile>) -> VerifyFuture<'static, SessionUser> {
	Box::pin(async move {
		Ok(SessionUser {
			email: params.profile.email,
			access_token: params.grant.access_token.expose().to_owned(),
		})
	})
}

fn recording_authenticator(
	http_client: RecordingHttpClient,
) -> (Authenticator<SamlStrategy, SamlVerifier, RecordingHttpClient>, Arc<MemorySessionStore>) {
	let session = Arc::new(MemorySessionStore::default());
	let authenticator = Authenticator::with_http_client(
		session.clone(),
		StrategyConfig::new(ISSUER, CLIENT_ID, CLIENT_SECRET, CALLBACK),
		SamlStrategy,
		admit as SamlVerifier,
		http_client,
	)
	.expect("Authenticator should build from a well-formed issuer.");

	(authenticator, session)
}

fn initial_request() -> LoginRequest {
	LoginRequest::new(
		Url::parse("https://app.example.com/auth/saml").expect("Static request URL should parse."),
	)
}

fn callback_request(code: &str, state: &str) -> LoginRequest {
	LoginRequest::new(
		Url::parse(&format!("{CALLBACK}?code={code}&state={state}"))
			.expect("Callback URL should parse."),
	)
}

async fn begin_login(
	authenticator: &Authenticator<SamlStrategy, SamlVerifier, RecordingHttpClient>,
	session: &MemorySessionStore,
) -> String {
	let _ = authenticator
		.authenticate(initial_request(), AuthenticateOptions::default())
		.await
		.expect("The authorize leg should succeed.");

	session
		.get(DEFAULT_SESSION_KEY)
		.await
		.expect("Reading the session should succeed.")
		.expect("A pending login should be stashed.")
		.state
}

#[tokio::test]
async fn base_credentials_reach_the_token_request_body() {
	let http_client = RecordingHttpClient::default();
	let (authenticator, session) = recording_authenticator(http_client.clone());
	let state = begin_login(&authenticator, &session).await;
	let outcome = authenticator
		.authenticate(callback_request("recorded-code", &state), AuthenticateOptions::default())
		.await
		.expect("The callback leg should complete the handshake.");

	match outcome {
		Outcome::Authenticated { user, .. } => assert_eq!(user.access_token, "access-recorded"),
		other => panic!("Unexpected outcome variant: {other:?}."),
	}

	let body = http_client.token_body();

	assert!(body.contains("grant_type=authorization_code"));
	assert!(body.contains("code=recorded-code"));
	assert!(body.contains(&format!("client_id={CLIENT_ID}")));
	assert!(body.contains(&format!("client_secret={CLIENT_SECRET}")));
	assert!(body.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fauth%2Fsaml%2Fcallback"));
}

#[tokio::test]
async fn override_credentials_replace_the_base_pair() {
	let http_client = RecordingHttpClient::default();
	let (authenticator, session) = recording_authenticator(http_client.clone());
	let state = begin_login(&authenticator, &session).await;
	let options = AuthenticateOptions::default()
		.with_context(CredentialOverride::new("tenant=boxyhq.com&product=demo", "override-secret"));
	let _ = authenticator
		.authenticate(callback_request("recorded-code", &state), options)
		.await
		.expect("The callback leg should complete the handshake.");
	let body = http_client.token_body();

	assert!(body.contains("client_id=tenant%3Dboxyhq.com%26product%3Ddemo"));
	assert!(body.contains("client_secret=override-secret"));
	assert!(!body.contains(CLIENT_ID));
	assert!(!body.contains(CLIENT_SECRET));
}

#[tokio::test]
async fn the_userinfo_fetch_carries_the_fresh_access_token() {
	let http_client = RecordingHttpClient::default();
	let (authenticator, session) = recording_authenticator(http_client.clone());
	let state = begin_login(&authenticator, &session).await;
	let _ = authenticator
		.authenticate(callback_request("recorded-code", &state), AuthenticateOptions::default())
		.await
		.expect("The callback leg should complete the handshake.");

	assert_eq!(http_client.bearer_token(), "access-recorded");
}

#[tokio::test]
async fn no_token_request_is_sent_before_state_validation() {
	let http_client = RecordingHttpClient::default();
	let (authenticator, session) = recording_authenticator(http_client.clone());
	let _state = begin_login(&authenticator, &session).await;
	let _ = authenticator
		.authenticate(
			callback_request("recorded-code", "forged-state"),
			AuthenticateOptions::default(),
		)
		.await
		.expect_err("A forged state should be rejected.");

	assert!(http_client.token_bodies.lock().is_empty());
	assert!(http_client.bearer_tokens.lock().is_empty());
}

#[tokio::test]
async fn transport_failures_surface_as_handshake_errors() {
	let http_client = RecordingHttpClient::failing();
	let (authenticator, session) = recording_authenticator(http_client);
	let state = begin_login(&authenticator, &session).await;
	let err = authenticator
		.authenticate(callback_request("recorded-code", &state), AuthenticateOptions::default())
		.await
		.expect_err("A transport failure should fail the handshake.");

	assert!(matches!(&err, Error::Handshake(HandshakeError::TokenTransport { .. })));
	assert!(format!("{err:?}").contains("Refused"));
}
