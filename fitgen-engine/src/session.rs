use crate::error::RelayError;
use crate::traits::RelayClient;
use fitgen_core::prompt::{PromptText, build_prompt};
use fitgen_core::request::GenerationRequest;
use fitgen_core::types::Flow;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub const FAILURE_FALLBACK: &str = "Failed to generate plan";

/// What the output panel shows. Exactly one variant holds at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum GenerationState {
    #[default]
    Idle,
    Pending,
    Success {
        text: String,
    },
    Failure {
        message: String,
    },
}

impl GenerationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn result(&self) -> Option<&str> {
        match self {
            Self::Success { text } => Some(text),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure { message } => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success { .. } => "success",
            Self::Failure { .. } => "failure",
        }
    }

    fn from_outcome(outcome: Result<String, RelayError>) -> Self {
        match outcome {
            Ok(text) => Self::Success { text },
            Err(e) => {
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    FAILURE_FALLBACK.to_string()
                } else {
                    message
                };
                Self::Failure { message }
            }
        }
    }
}

/// Identifies one accepted `generate` call. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("a {0} plan is already being generated")]
    AlreadyPending(Flow),
}

#[derive(Debug, Default)]
struct Inner {
    request: GenerationRequest,
    state: GenerationState,
    issued: u64,
    // Only the response for this ticket may change `state`.
    active: Option<Ticket>,
}

/// Form state and output state machine for one flow.
///
/// `generate` while a request is pending is rejected rather than queued. A
/// response whose ticket was invalidated by `cancel`/`reset` is dropped.
pub struct FormSession {
    flow: Flow,
    relay: Arc<dyn RelayClient>,
    inner: Mutex<Inner>,
}

impl FormSession {
    pub fn new(flow: Flow, relay: Arc<dyn RelayClient>) -> Self {
        Self {
            flow,
            relay,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    // A panic while holding the lock cannot leave `Inner` half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_field(&self, name: impl Into<String>, value: impl Into<String>) {
        self.lock().request.set(name, value);
    }

    pub fn request(&self) -> GenerationRequest {
        self.lock().request.clone()
    }

    pub fn state(&self) -> GenerationState {
        self.lock().state.clone()
    }

    /// The prompt `generate` would send right now.
    pub fn prompt(&self) -> PromptText {
        build_prompt(self.flow, &self.lock().request)
    }

    /// Moves to `Pending` and hands out the prompt to send.
    pub fn begin(&self) -> Result<(Ticket, PromptText), SessionError> {
        let mut inner = self.lock();
        if inner.state.is_pending() {
            return Err(SessionError::AlreadyPending(self.flow));
        }

        inner.issued += 1;
        let ticket = Ticket(inner.issued);
        inner.active = Some(ticket);
        inner.state = GenerationState::Pending;

        let prompt = build_prompt(self.flow, &inner.request);
        log::debug!(
            "{} generation #{} started (prompt_len={})",
            self.flow,
            ticket.seq(),
            prompt.as_str().len()
        );
        Ok((ticket, prompt))
    }

    /// Applies a relay outcome. Returns `false` if the ticket is stale and the
    /// outcome was discarded.
    pub fn complete(&self, ticket: Ticket, outcome: Result<String, RelayError>) -> bool {
        let mut inner = self.lock();
        if inner.active != Some(ticket) {
            log::info!(
                "{} generation #{} finished after being superseded; discarding",
                self.flow,
                ticket.seq()
            );
            return false;
        }

        inner.active = None;
        inner.state = GenerationState::from_outcome(outcome);
        match &inner.state {
            GenerationState::Failure { message } => {
                log::warn!("{} generation #{} failed: {message}", self.flow, ticket.seq())
            }
            _ => log::info!("{} generation #{} succeeded", self.flow, ticket.seq()),
        }
        true
    }

    /// Builds the prompt, sends it through the relay once, and records the outcome.
    pub async fn generate(&self) -> Result<GenerationState, SessionError> {
        self.generate_with_hook(|_state| async {}).await
    }

    /// Same as `generate`, but reports each state the session enters.
    ///
    /// The hook is intended for UI progress and must be fast.
    pub async fn generate_with_hook<F, Fut>(
        &self,
        on_state: F,
    ) -> Result<GenerationState, SessionError>
    where
        F: Fn(GenerationState) -> Fut,
        Fut: Future<Output = ()>,
    {
        let (ticket, prompt) = self.begin()?;
        on_state(GenerationState::Pending).await;

        let outcome = self.relay.relay(prompt.as_str()).await;
        if self.complete(ticket, outcome) {
            on_state(self.state()).await;
        }
        Ok(self.state())
    }

    /// Abandons a pending request. Its response will be ignored when it lands.
    pub fn cancel(&self) -> bool {
        let mut inner = self.lock();
        if !inner.state.is_pending() {
            return false;
        }
        inner.active = None;
        inner.state = GenerationState::Idle;
        true
    }

    /// Clears every field and the output, abandoning any pending request.
    pub fn reset(&self) {
        let mut inner = self.lock();
        inner.request.clear();
        inner.active = None;
        inner.state = GenerationState::Idle;
    }
}
