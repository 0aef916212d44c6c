//! Hand-off of outcomes from provider tasks to the race.

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::outcome::Outcome;

/// Creates a channel that can hold one outcome per provider without blocking.
pub fn result_channel(providers: usize) -> (ResultSender, ResultReceiver) {
    let (tx, rx) = mpsc::channel(providers.max(1));
    (ResultSender { tx }, ResultReceiver { rx })
}

/// Producer half, cloned into every provider task.
#[derive(Debug, Clone)]
pub struct ResultSender {
    tx: mpsc::Sender<Outcome>,
}

impl ResultSender {
    /// Pushes an outcome without waiting.
    ///
    /// Returns `false` if the outcome was dropped because the race is over or
    /// the channel is full.
    pub fn push(&self, outcome: Outcome) -> bool {
        match self.tx.try_send(outcome) {
            Ok(()) => true,
            Err(TrySendError::Closed(outcome)) => {
                tracing::trace!(provider = ?outcome.provider(), "race already settled, dropping outcome");
                false
            }
            Err(TrySendError::Full(outcome)) => {
                tracing::warn!(provider = ?outcome.provider(), "result channel full, dropping outcome");
                false
            }
        }
    }
}

/// Consumer half, owned by the race.
#[derive(Debug)]
pub struct ResultReceiver {
    rx: mpsc::Receiver<Outcome>,
}

impl ResultReceiver {
    /// Waits for the next outcome in completion order.
    ///
    /// Returns `None` once every sender is gone and the buffer is empty.
    pub async fn recv(&mut self) -> Option<Outcome> {
        self.rx.recv().await
    }
}
