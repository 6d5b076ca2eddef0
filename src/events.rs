use chrono::{DateTime, Utc};

/// Author of a transcript turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

/// One message unit in the transcript.
#[derive(Debug, Clone)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            role: Role::Bot,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Events delivered from request and reveal tasks back to the controller.
///
/// Every event carries the generation of the submit that produced it. The
/// controller drops events from superseded generations, which is what cancels
/// an in-flight reveal when the user submits again.
#[derive(Debug, Clone)]
pub enum TurnEvent {
    /// Next typewriter prefix of the reply being revealed.
    RevealStep { generation: u64, prefix: String },

    /// The reveal pass finished; the trailing bot turn holds the full reply.
    RevealDone { generation: u64 },

    /// The request failed (transport error, non-2xx, or malformed body).
    RequestFailed { generation: u64 },
}

/// Lifecycle phase of the chat widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No turns yet, compact layout. Never re-entered once left.
    Idle,
    /// A submit is in flight, waiting on the response service.
    Waiting,
    /// The reply is being revealed prefix by prefix.
    Revealing,
    /// Reveal complete or error turn appended, awaiting the next input.
    Settled,
}
