// std
use std::sync::Arc;
// self
use boxyhq_sso::session::{DEFAULT_SESSION_KEY, HandshakeState, MemorySessionStore, SessionStore};

#[tokio::test]
async fn the_store_works_behind_a_trait_object() {
	let backend = Arc::new(MemorySessionStore::default());
	let store: Arc<dyn SessionStore> = backend.clone();

	store
		.put(DEFAULT_SESSION_KEY, HandshakeState::new("pending-state"))
		.await
		.expect("Putting handshake state through the trait object should succeed.");

	let stored = backend
		.get(DEFAULT_SESSION_KEY)
		.await
		.expect("Reading the session should succeed.")
		.expect("The stashed state should remain present.");

	assert!(stored.matches("pending-state"));
}

#[tokio::test]
async fn concurrent_takes_admit_a_single_winner() {
	let store = Arc::new(MemorySessionStore::default());

	store
		.put(DEFAULT_SESSION_KEY, HandshakeState::new("contended-state"))
		.await
		.expect("Putting handshake state should succeed.");

	let store_a = store.clone();
	let store_b = store.clone();
	let task_a = tokio::spawn(async move {
		store_a.take(DEFAULT_SESSION_KEY).await.expect("Take task A should complete successfully.")
	});
	let task_b = tokio::spawn(async move {
		store_b.take(DEFAULT_SESSION_KEY).await.expect("Take task B should complete successfully.")
	});
	let (taken_a, taken_b) = tokio::join!(task_a, task_b);
	let taken_a = taken_a.expect("Take task A should not panic.");
	let taken_b = taken_b.expect("Take task B should not panic.");
	let winners = [&taken_a, &taken_b].iter().filter(|taken| taken.is_some()).count();

	assert_eq!(winners, 1, "only one take should win the pending state");

	let winner = taken_a.or(taken_b).expect("One take should have returned the state.");

	assert!(winner.matches("contended-state"));
	assert!(
		store
			.get(DEFAULT_SESSION_KEY)
			.await
			.expect("Reading the session should succeed.")
			.is_none()
	);
}

#[tokio::test]
async fn issued_at_orders_successive_states() {
	let first = HandshakeState::new("a");
	let second = HandshakeState::new("b");

	assert!(second.issued_at >= first.issued_at);
}
