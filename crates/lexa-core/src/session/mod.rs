//! Submission session state.
//!
//! A session owns the current input, the phase of the current submission
//! cycle and the sequence counter used to drop responses that arrive after a
//! newer submission has started.
//!
//! `Idle -> Submitting -> {Succeeded | Failed}`; the next `begin` starts over.

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::interpret::DisplayState;

/// What `begin` does when a submission is already in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Refuse the new submission.
    #[default]
    Reject,
    /// Start the new submission and invalidate the in-flight one.
    Supersede,
}

/// Phase of the current submission cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "data", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Submitting,
    Succeeded(Box<DisplayState>),
    Failed(String),
}

/// Proof of a started submission. Outcomes are only accepted for the
/// current ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Per-view submission state.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    policy: SubmitPolicy,
    input: String,
    phase: Phase,
    seq: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SubmitPolicy::default())
    }
}

impl Session {
    pub fn new(policy: SubmitPolicy) -> Self {
        Self {
            id: Uuid::new_v4(),
            policy,
            input: String::new(),
            phase: Phase::Idle,
            seq: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn policy(&self) -> SubmitPolicy {
        self.policy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Start a submission cycle.
    ///
    /// Clears the previous result or error before anything else happens.
    pub fn begin(&mut self, input: &str) -> CoreResult<Ticket> {
        if self.is_loading() {
            match self.policy {
                SubmitPolicy::Reject => return Err(CoreError::SubmissionInFlight),
                SubmitPolicy::Supersede => {
                    debug!(session = %self.id, superseded = self.seq, "Superseding in-flight submission");
                }
            }
        }

        self.seq += 1;
        self.input = input.to_string();
        self.phase = Phase::Submitting;
        debug!(session = %self.id, seq = self.seq, "Submission started");

        Ok(Ticket { seq: self.seq })
    }

    /// Record a successful analysis. Returns `false` if the ticket is stale.
    pub fn succeed(&mut self, ticket: Ticket, state: DisplayState) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.phase = Phase::Succeeded(Box::new(state));
        true
    }

    /// Record a transport or server failure. Returns `false` if the ticket is stale.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.phase = Phase::Failed(message.into());
        true
    }

    fn accepts(&self, ticket: Ticket) -> bool {
        let current = ticket.seq == self.seq && self.is_loading();
        if !current {
            debug!(
                session = %self.id,
                ticket = ticket.seq,
                current = self.seq,
                "Discarding stale submission outcome"
            );
        }
        current
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    pub fn result(&self) -> Option<&DisplayState> {
        match &self.phase {
            Phase::Succeeded(state) => Some(state.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Whether any analysis has completed in this session's current cycle.
    pub fn has_run(&self) -> bool {
        matches!(self.phase, Phase::Succeeded(_) | Phase::Failed(_))
    }
}
