// self
use crate::{_prelude::*, obs::HandshakeKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedHandshake<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedHandshake<F> = F;

/// A span builder used by the handshake legs.
#[derive(Clone, Debug)]
pub struct HandshakeSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl HandshakeSpan {
	/// Creates a new span tagged with the strategy name and handshake leg.
	pub fn new(strategy: &'static str, kind: HandshakeKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("boxyhq_sso.handshake", strategy, stage = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (strategy, kind);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedHandshake<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn instrument_passes_the_future_through() {
		let span = HandshakeSpan::new("boxyhq-sso", HandshakeKind::Exchange);
		let value = span.instrument(async { 42 }).await;

		assert_eq!(value, 42);
	}
}
