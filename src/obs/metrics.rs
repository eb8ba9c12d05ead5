// self
use crate::obs::{HandshakeKind, HandshakeOutcome};

/// Records a handshake outcome via the global metrics recorder (when enabled).
pub fn record_handshake_outcome(kind: HandshakeKind, outcome: HandshakeOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"boxyhq_sso_handshake_total",
			"stage" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn record_handshake_outcome_noop_without_metrics() {
		record_handshake_outcome(HandshakeKind::Exchange, HandshakeOutcome::Failure);
	}
}
