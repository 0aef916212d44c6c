//! First-success-wins race across provider adapters.

use std::{sync::Arc, time::Duration};

use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use crate::{
    channel::{result_channel, ResultSender},
    errors::LookupError,
    key::LookupKey,
    outcome::{Failure, Outcome, RaceResult, Success},
    provider::ProviderAdapter,
    transport::Transport,
};

/// Races lookups across adapters through a shared transport.
///
/// A coordinator holds no per-race state; every call to
/// [`resolve`](Self::resolve) builds its own channel and cancellation scope.
#[derive(Clone)]
pub struct RaceCoordinator {
    transport: Arc<dyn Transport>,
}

impl RaceCoordinator {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Looks up `key` on every adapter at once and returns the first success.
    ///
    /// Never fails: an invalid key, failing providers and an elapsed deadline
    /// are all reported through the returned [`RaceResult`]. `deadline`
    /// bounds the whole race, measured from this call.
    ///
    /// Tasks still running when the race settles are signalled to stop and
    /// then abandoned; they are not awaited.
    pub async fn resolve(
        &self,
        key: &str,
        adapters: &[Arc<dyn ProviderAdapter>],
        deadline: Duration,
    ) -> RaceResult {
        let start = Instant::now();

        let key = match LookupKey::parse(key) {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!(%err, "rejecting lookup before dispatch");
                return RaceResult::rejected(err, deadline);
            }
        };

        let dispatched = adapters.len();
        if dispatched == 0 {
            tracing::warn!(%key, "no providers to race");
            return RaceResult::lost(Vec::new(), false, 0, deadline, start.elapsed());
        }

        // Cancelled on every exit path, including when this future is dropped.
        let scope = CancellationToken::new();
        let _scope_guard = scope.clone().drop_guard();

        let (tx, mut rx) = result_channel(dispatched);
        for adapter in adapters {
            self.spawn_provider(adapter.clone(), key.clone(), scope.clone(), tx.clone(), start);
        }
        drop(tx);

        tracing::debug!(%key, providers = dispatched, ?deadline, "race started");

        let expires = time::sleep_until(expiry(start, deadline));
        tokio::pin!(expires);

        let mut failures = Vec::with_capacity(dispatched);

        loop {
            tokio::select! {
                biased;

                next = rx.recv() => match next {
                    Some(Outcome::Success(winner)) => {
                        scope.cancel();
                        tracing::info!(
                            %key,
                            provider = %winner.provider,
                            elapsed = ?winner.elapsed,
                            "race won"
                        );
                        return RaceResult::won(winner, dispatched, deadline);
                    }
                    Some(Outcome::Failure(failure)) => {
                        tracing::debug!(
                            provider = ?failure.provider,
                            error = %failure.error,
                            "provider failed"
                        );
                        failures.push(failure);
                        if failures.len() == dispatched {
                            break;
                        }
                    }
                    // Every task has finished; some may have reported nothing.
                    None => break,
                },
                _ = &mut expires => {
                    scope.cancel();
                    tracing::warn!(
                        %key,
                        ?deadline,
                        failures = failures.len(),
                        "race timed out"
                    );
                    return RaceResult::lost(failures, true, dispatched, deadline, start.elapsed());
                }
            }
        }

        tracing::warn!(%key, failures = failures.len(), "all providers failed");
        RaceResult::lost(failures, false, dispatched, deadline, start.elapsed())
    }

    fn spawn_provider(
        &self,
        adapter: Arc<dyn ProviderAdapter>,
        key: LookupKey,
        scope: CancellationToken,
        tx: ResultSender,
        start: Instant,
    ) {
        let transport = self.transport.clone();

        tokio::spawn(async move {
            let provider = adapter.id();
            let request = adapter.build_request(&key);

            let sent = tokio::select! {
                biased;
                _ = scope.cancelled() => None,
                res = transport.send(&request, &scope) => Some(res),
            };

            // Once the race is settled nobody reads the outcome.
            let Some(sent) = sent.filter(|_| !scope.is_cancelled()) else {
                tracing::trace!(%provider, "abandoned after race settled");
                return;
            };

            let elapsed = start.elapsed();
            let outcome = match sent
                .map_err(LookupError::from)
                .and_then(|resp| adapter.normalize(&resp).map_err(LookupError::from))
            {
                Ok(address) => Outcome::Success(Success {
                    address,
                    provider,
                    elapsed,
                }),
                Err(error) => Outcome::Failure(Failure {
                    provider: Some(provider),
                    error,
                    elapsed,
                }),
            };

            tx.push(outcome);
        });
    }
}

/// Roughly 30 years; stands in for deadlines too large to represent.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Instant at which a race started at `start` with `deadline` expires.
fn expiry(start: Instant, deadline: Duration) -> Instant {
    start
        .checked_add(deadline)
        .unwrap_or_else(|| start + FAR_FUTURE)
}
