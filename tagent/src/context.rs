//! Per-call cancellation and deadline context.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use tagent::CallContext;
//!
//! let context = CallContext::new().with_timeout(Duration::from_secs(30));
//! assert!(context.check().is_ok());
//!
//! context.cancellation().cancel();
//! assert!(context.check().is_err());
//! ```

use std::time::{Duration, Instant};

use tcommon::TraceId;
use tokio_util::sync::CancellationToken;

use crate::AgentError;

pub type CallCancellationToken = CancellationToken;

/// Signals observed by the orchestration loop before each round trip.
#[derive(Debug, Clone, Default)]
pub struct CallContext {
    cancellation: CancellationToken,
    deadline: Option<Instant>,
    trace_id: Option<TraceId>,
}

impl CallContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(mut self, cancellation: CancellationToken) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<TraceId>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Fails when the call has been cancelled or its deadline has passed.
    pub fn check(&self) -> Result<(), AgentError> {
        if self.cancellation.is_cancelled() {
            return Err(AgentError::cancelled());
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AgentError::deadline_exceeded()),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::CallContext;
    use crate::AgentErrorKind;

    #[test]
    fn fresh_context_passes_check() {
        assert!(CallContext::new().check().is_ok());
    }

    #[test]
    fn cancellation_wins_over_deadline() {
        let context = CallContext::new().with_deadline(Instant::now());
        context.cancellation().cancel();

        let error = context.check().expect_err("cancelled");
        assert_eq!(error.kind, AgentErrorKind::Cancelled);
    }

    #[test]
    fn elapsed_deadline_is_reported() {
        let context = CallContext::new().with_timeout(Duration::ZERO);
        let error = context.check().expect_err("deadline elapsed");
        assert_eq!(error.kind, AgentErrorKind::DeadlineExceeded);
    }

    #[test]
    fn child_tokens_observe_parent_cancellation() {
        let parent = CallContext::new();
        let child = CallContext::new().with_cancellation(parent.cancellation().child_token());

        parent.cancellation().cancel();
        assert!(child.check().is_err());
    }
}
