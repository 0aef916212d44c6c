use std::time::Duration;

use crate::{config::ProviderId, outcome::Failure};

/// A lookup key was rejected before any provider was contacted.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The key was empty after trimming.
    #[error("postal code is empty")]
    Empty,

    /// The key is not made of exactly eight digits.
    #[error("postal code {0:?} must have exactly 8 digits")]
    Format(String),

    /// The key is well formed but lies outside the assigned CEP range.
    #[error("postal code {0} is outside the valid range (01000-000 to 99999-999)")]
    OutOfRange(String),
}

/// Failures raised while talking to a provider.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The connection could not be established or was dropped.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The provider did not answer within the per-request timeout.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {0}")]
    Status(u16),

    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(String),

    /// The race was settled before this request finished.
    #[error("request cancelled")]
    Cancelled,
}

/// A provider answered, but its payload cannot become a `NormalizedAddress`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    /// The provider answered with a non-success status.
    #[error("unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The payload is not valid JSON for the provider's schema.
    #[error("failed to decode payload: {0}")]
    Decode(String),

    /// The payload decoded but lacks a mandatory field.
    #[error("payload is missing mandatory field `{0}`")]
    MissingField(&'static str),

    /// The provider explicitly reported that the postal code does not exist.
    #[error("postal code not found")]
    NotFound,
}

/// Coarse classification of a [`LookupError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Transport,
    Normalization,
    Cancelled,
}

/// Any failure recorded for a single lookup attempt.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("invalid postal code: {0}")]
    Validation(#[from] ValidationError),

    #[error("transport error: {0}")]
    Transport(TransportError),

    #[error("normalization error: {0}")]
    Normalization(NormalizationError),

    #[error("cancelled")]
    Cancelled,
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LookupError::Validation(_) => ErrorKind::Validation,
            LookupError::Transport(_) => ErrorKind::Transport,
            LookupError::Normalization(_) => ErrorKind::Normalization,
            LookupError::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<TransportError> for LookupError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Cancelled => LookupError::Cancelled,
            other => LookupError::Transport(other),
        }
    }
}

impl From<NormalizationError> for LookupError {
    // A bad status is a status-level failure of the provider, not of its payload.
    fn from(err: NormalizationError) -> Self {
        match err {
            NormalizationError::UnexpectedStatus(code) => {
                LookupError::Transport(TransportError::Status(code))
            }
            other => LookupError::Normalization(other),
        }
    }
}

/// Errors returned by the `Result` view of a race.
#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    /// The postal code was rejected before dispatch.
    #[error("invalid postal code: {0}")]
    InvalidKey(ValidationError),

    /// No providers were configured.
    #[error("no providers configured")]
    NoProviders,

    /// All configured providers returned errors.
    ///
    /// Contains one failure per provider.
    #[error("all providers failed: {0:?}")]
    AllFailed(Vec<Failure>),

    /// No provider answered successfully within the deadline.
    ///
    /// Carries the failures that did arrive before the deadline.
    #[error("lookup timed out after {after:?}")]
    Timeout {
        after: Duration,
        failures: Vec<Failure>,
    },
}

impl RaceError {
    /// Providers that reported a failure, in arrival order.
    pub fn failed_providers(&self) -> Vec<ProviderId> {
        match self {
            RaceError::AllFailed(failures) | RaceError::Timeout { failures, .. } => {
                failures.iter().filter_map(|f| f.provider).collect()
            }
            RaceError::InvalidKey(_) | RaceError::NoProviders => Vec::new(),
        }
    }
}
