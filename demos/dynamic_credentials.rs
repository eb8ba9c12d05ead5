//! Demonstrates per-request tenant credentials with one shared authenticator.
//!
//! A multi-tenant host keeps a single `Authenticator` and attaches each
//! tenant's Jackson client ID and secret to the call that serves that tenant;
//! the configured base credentials stay untouched. The issuer here is an
//! in-process mock so the example runs offline.

// std
use std::{collections::HashMap, sync::Arc};
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use boxyhq_sso::{
	config::StrategyConfig,
	flows::{
		AuthenticateOptions, Authenticator, CredentialOverride, LoginRequest, Outcome, VerifyFuture,
		VerifyParams,
	},
	http::ReqwestHttpClient,
	profile::SamlProfile,
	reqwest::Client,
	session::{MemorySessionStore, SessionStore},
	strategy::SamlStrategy,
};

type DemoVerifier = fn(VerifyParams<SamlProfile>) -> VerifyFuture<'static, String>;

fn admit(params: VerifyParams<SamlProfile>) -> VerifyFuture<'static, String> {
	Box::pin(async move { Ok(params.profile.email) })
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let userinfo_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/oauth/userinfo");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"id\":\"demo-1\",\"email\":\"crew@acme.com\"}");
		})
		.await;
	let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let authenticator = Authenticator::with_http_client(
		session,
		StrategyConfig::new(
			server.base_url(),
			"tenant=boxyhq.com&product=demo",
			"base-secret",
			"http://localhost:3366/sso/callback",
		),
		SamlStrategy,
		admit as DemoVerifier,
		http_client,
	)?;
	let login = LoginRequest::new(Url::parse("http://localhost:3366/sso/login")?);
	let tenants = [
		("tenant=acme.com&product=demo", "acme-secret"),
		("tenant=initech.com&product=demo", "initech-secret"),
	];

	for (tenant_client_id, tenant_secret) in tenants {
		let options = AuthenticateOptions::default()
			.with_context(CredentialOverride::new(tenant_client_id, tenant_secret));
		let outcome = authenticator.authenticate(login.clone(), options).await?;

		if let Some(url) = outcome.authorize_url() {
			let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();

			println!(
				"Tenant `{tenant_client_id}` redirects with client_id `{}`.",
				pairs.get("client_id").map(String::as_str).unwrap_or("<missing>")
			);
		}
	}

	let outcome = authenticator.authenticate(login.clone(), AuthenticateOptions::default()).await?;

	if let Some(url) = outcome.authorize_url() {
		let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();

		println!(
			"Without an override the redirect keeps the base client_id `{}`.",
			pairs.get("client_id").map(String::as_str).unwrap_or("<missing>")
		);
	}

	// Complete one handshake end to end for the first tenant. The same override
	// is attached to both legs of the call.
	let options = AuthenticateOptions::default()
		.with_context(CredentialOverride::new("tenant=acme.com&product=demo", "acme-secret"));
	let outcome = authenticator.authenticate(login.clone(), options.clone()).await?;
	let authorize_url = match &outcome {
		Outcome::Authorize(url) => url.clone(),
		other => {
			println!("Unexpected outcome for the login leg: {other:?}");
			return Ok(());
		},
	};
	let pairs: HashMap<String, String> = authorize_url.query_pairs().into_owned().collect();
	let state = pairs.get("state").cloned().unwrap_or_default();
	let request = LoginRequest::new(Url::parse(&format!(
		"http://localhost:3366/sso/callback?code=demo-code&state={state}"
	))?);

	match authenticator.authenticate(request, options).await? {
		Outcome::Authenticated { user, .. } =>
			println!("Admitted `{user}` with the acme.com tenant credentials."),
		other => println!("Unexpected outcome for the callback leg: {other:?}"),
	}

	token_mock.assert_async().await;
	userinfo_mock.assert_async().await;

	Ok(())
}
