//! Interactive SAML login walkthrough against a BoxyHQ Jackson deployment.
//!
//! The example prints the authorize URL for your issuer, waits for you to sign
//! in through the identity provider, and completes the handshake once you paste
//! the callback URL the provider redirected you back to.

// std
use std::{
	io::{self, Write},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
use url::Url;
// self
use boxyhq_sso::{
	config::StrategyConfig,
	flows::{AuthenticateOptions, Authenticator, LoginRequest, Outcome, VerifyFuture, VerifyParams},
	profile::SamlProfile,
	session::{MemorySessionStore, SessionStore},
	strategy::SamlStrategy,
};

type DemoVerifier = fn(VerifyParams<SamlProfile>) -> VerifyFuture<'static, DemoUser>;

#[derive(Debug)]
struct DemoUser {
	email: String,
	provider: String,
	access_token: String,
}

fn admit(params: VerifyParams<SamlProfile>) -> VerifyFuture<'static, DemoUser> {
	Box::pin(async move {
		Ok(DemoUser {
			email: params.profile.email,
			provider: params.profile.provider,
			access_token: params.grant.access_token.expose().to_owned(),
		})
	})
}

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let issuer =
		prompt_with_default("Enter your Jackson issuer", Some("https://sso.eu.boxyhq.com"))?;
	let client_id = prompt_with_default(
		"Enter the client ID (tenant=...&product=... for multi-tenant setups)",
		Some("tenant=boxyhq.com&product=demo"),
	)?;
	let client_secret = prompt_with_default("Enter the client secret", Some("dummy"))?;
	let callback = prompt_with_default(
		"Enter the callback URL registered with Jackson",
		Some("http://localhost:3366/sso/callback"),
	)?;
	let session: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::default());
	let authenticator = Authenticator::new(
		session,
		StrategyConfig::new(issuer, client_id, client_secret, callback),
		SamlStrategy,
		admit as DemoVerifier,
	)?;
	let login = LoginRequest::new(Url::parse("http://localhost:3366/sso/login")?);
	let outcome = authenticator.authenticate(login, AuthenticateOptions::default()).await?;
	let authorize_url = match &outcome {
		Outcome::Authorize(url) => url.clone(),
		other => {
			println!("Unexpected outcome for the login leg: {other:?}");
			return Ok(());
		},
	};

	println!("Authorize URL: {authorize_url}");
	println!(
		"Open it in a browser, sign in through your identity provider, then paste the full callback URL here."
	);

	if let Some(pasted) =
		prompt_optional("Callback URL (leave blank to stop before the token exchange)")?
	{
		let request = LoginRequest::new(Url::parse(&pasted)?);
		let outcome = authenticator.authenticate(request, AuthenticateOptions::default()).await?;

		match outcome {
			Outcome::Authenticated { user, .. } => {
				println!("Signed in as {} via {}.", user.email, user.provider);
				println!("Access token: {}", user.access_token);
			},
			other => println!("Unexpected outcome for the callback leg: {other:?}"),
		}

		return Ok(());
	}

	println!("Callback not provided; stopping before the token exchange.");
	println!("Run the example again to start a fresh login, or wire the callback into your app.");

	Ok(())
}

fn prompt_with_default(message: &str, default: Option<&str>) -> Result<String> {
	loop {
		if let Some(value) = default {
			print!("{message} [{value}]: ");
		} else {
			print!("{message}: ");
		}

		io::stdout().flush()?;

		let mut input = String::new();

		io::stdin().read_line(&mut input)?;

		let trimmed = input.trim();

		if trimmed.is_empty() {
			if let Some(value) = default {
				return Ok(value.to_owned());
			}
		} else {
			return Ok(trimmed.to_owned());
		}
	}
}

fn prompt_optional(message: &str) -> Result<Option<String>> {
	print!("{message}: ");

	io::stdout().flush()?;

	let mut input = String::new();

	io::stdin().read_line(&mut input)?;

	let trimmed = input.trim();

	if trimmed.is_empty() { Ok(None) } else { Ok(Some(trimmed.to_owned())) }
}
