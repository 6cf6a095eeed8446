//! Per-operation request lifecycle with stale-completion discard.

use tracing::debug;

/// Phase of a tracked request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No request started yet.
    Idle,
    /// A request is in flight.
    Running,
    /// The most recent request completed with a result.
    Succeeded,
    /// The most recent request failed (or was rejected locally).
    Failed,
}

/// Token identifying one started request.
///
/// Completions must present the token handed out by [`RequestLifecycle::start`];
/// a token from a superseded generation is rejected, which is how logical
/// cancellation works: superseded responses are received but discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// State holder for a single asynchronous operation slot.
///
/// `start()` supersedes any in-flight request: the generation counter is
/// bumped and the previous request's eventual completion no longer matches.
/// There is never more than one "live" generation, so within one controller
/// only the most recently started request can mutate visible state.
#[derive(Debug)]
pub struct RequestLifecycle<T> {
    generation: u64,
    phase: Phase,
    value: Option<T>,
    error: Option<String>,
}

impl<T> Default for RequestLifecycle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestLifecycle<T> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: Phase::Idle,
            value: None,
            error: None,
        }
    }

    /// Begin a new request: clears any previous result/error, moves to
    /// `Running`, and returns the token the completion must present.
    pub fn start(&mut self) -> Generation {
        self.generation += 1;
        self.phase = Phase::Running;
        self.value = None;
        self.error = None;
        Generation(self.generation)
    }

    /// Record a successful completion. Returns `false` (state untouched)
    /// when `token` is stale, i.e. a newer request has started since.
    pub fn succeed(&mut self, token: Generation, value: T) -> bool {
        if !self.accepts(token) {
            debug!(
                stale = token.0,
                current = self.generation,
                "discarding stale success"
            );
            return false;
        }
        self.phase = Phase::Succeeded;
        self.value = Some(value);
        self.error = None;
        true
    }

    /// Record a failed completion. Returns `false` when `token` is stale.
    pub fn fail(&mut self, token: Generation, error: impl Into<String>) -> bool {
        if !self.accepts(token) {
            debug!(
                stale = token.0,
                current = self.generation,
                "discarding stale failure"
            );
            return false;
        }
        self.phase = Phase::Failed;
        self.value = None;
        self.error = Some(error.into());
        true
    }

    /// Fail immediately without a request, e.g. for local validation errors.
    ///
    /// Bumps the generation so any in-flight completion becomes stale.
    pub fn fail_now(&mut self, error: impl Into<String>) {
        self.generation += 1;
        self.phase = Phase::Failed;
        self.value = None;
        self.error = Some(error.into());
    }

    fn accepts(&self, token: Generation) -> bool {
        token.0 == self.generation && self.phase == Phase::Running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// The result of the last succeeded request, if the slot currently
    /// holds one.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The error of the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
