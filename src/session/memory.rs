//! Thread-safe in-memory [`SessionStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	session::{HandshakeState, SessionError, SessionFuture, SessionStore},
};

type SessionMap = Arc<RwLock<HashMap<String, HandshakeState>>>;

/// Thread-safe session backend that keeps pending logins in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore(SessionMap);
impl MemorySessionStore {
	fn put_now(map: SessionMap, key: String, state: HandshakeState) -> Result<(), SessionError> {
		map.write().insert(key, state);

		Ok(())
	}

	fn get_now(map: SessionMap, key: String) -> Option<HandshakeState> {
		map.read().get(&key).cloned()
	}

	fn take_now(map: SessionMap, key: String) -> Option<HandshakeState> {
		map.write().remove(&key)
	}
}
impl SessionStore for MemorySessionStore {
	fn put<'a>(&'a self, key: &'a str, state: HandshakeState) -> SessionFuture<'a, ()> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Self::put_now(map, key, state) })
	}

	fn get<'a>(&'a self, key: &'a str) -> SessionFuture<'a, Option<HandshakeState>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn take<'a>(&'a self, key: &'a str) -> SessionFuture<'a, Option<HandshakeState>> {
		let map = self.0.clone();
		let key = key.to_owned();

		Box::pin(async move { Ok(Self::take_now(map, key)) })
	}
}
