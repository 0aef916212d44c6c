use std::time::Duration;

use crate::{
    address::NormalizedAddress,
    config::ProviderId,
    errors::{ErrorKind, LookupError, RaceError, ValidationError},
};

/// A provider that produced a normalized address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Success {
    pub address: NormalizedAddress,
    pub provider: ProviderId,
    /// Time from the start of the race until this provider answered.
    pub elapsed: Duration,
}

/// A failed lookup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// `None` for failures raised before any provider was contacted.
    pub provider: Option<ProviderId>,
    pub error: LookupError,
    pub elapsed: Duration,
}

impl Failure {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

/// What one provider task reports back to the race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Success),
    Failure(Failure),
}

impl Outcome {
    pub fn provider(&self) -> Option<ProviderId> {
        match self {
            Outcome::Success(s) => Some(s.provider),
            Outcome::Failure(f) => f.provider,
        }
    }
}

/// Final answer of a race.
///
/// Either `winner` is set and `failures` is empty, or there is no winner and
/// `failures` holds everything that arrived before the race ended.
#[derive(Debug, Clone)]
pub struct RaceResult {
    pub winner: Option<Success>,
    pub failures: Vec<Failure>,
    /// The deadline fired before any provider succeeded.
    pub timed_out: bool,
    /// Number of provider tasks started.
    pub dispatched: usize,
    pub deadline: Duration,
    pub elapsed: Duration,
}

impl RaceResult {
    pub(crate) fn won(winner: Success, dispatched: usize, deadline: Duration) -> Self {
        let elapsed = winner.elapsed;
        Self {
            winner: Some(winner),
            failures: Vec::new(),
            timed_out: false,
            dispatched,
            deadline,
            elapsed,
        }
    }

    pub(crate) fn lost(
        failures: Vec<Failure>,
        timed_out: bool,
        dispatched: usize,
        deadline: Duration,
        elapsed: Duration,
    ) -> Self {
        Self {
            winner: None,
            failures,
            timed_out,
            dispatched,
            deadline,
            elapsed,
        }
    }

    pub(crate) fn rejected(err: ValidationError, deadline: Duration) -> Self {
        let failure = Failure {
            provider: None,
            error: LookupError::Validation(err),
            elapsed: Duration::ZERO,
        };
        Self::lost(vec![failure], false, 0, deadline, Duration::ZERO)
    }

    pub fn is_success(&self) -> bool {
        self.winner.is_some()
    }

    pub fn winner(&self) -> Option<&Success> {
        self.winner.as_ref()
    }

    /// The validation error, if the key was rejected before dispatch.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        if self.dispatched != 0 {
            return None;
        }
        self.failures.iter().find_map(|f| match &f.error {
            LookupError::Validation(err) => Some(err),
            _ => None,
        })
    }

    /// Converts the race into a `Result`, for callers that prefer `?`.
    pub fn into_result(mut self) -> Result<Success, RaceError> {
        if let Some(winner) = self.winner.take() {
            return Ok(winner);
        }
        if let Some(err) = self.validation_error() {
            return Err(RaceError::InvalidKey(err.clone()));
        }
        if self.timed_out {
            return Err(RaceError::Timeout {
                after: self.deadline,
                failures: self.failures,
            });
        }
        if self.dispatched == 0 {
            return Err(RaceError::NoProviders);
        }
        Err(RaceError::AllFailed(self.failures))
    }
}
