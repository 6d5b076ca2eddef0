use crate::events::{Phase, Role, Turn, TurnEvent};

/// Fixed reply shown for any request failure, regardless of the cause.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your request.";

/// Request descriptor handed to the IO layer when a submit is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    pub generation: u64,
    pub user_input: String,
}

/// The chat turn state machine.
///
/// Owns the transcript and the widget lifecycle phase. It performs no IO:
/// `submit` returns a [`PendingRequest`] for the caller to dispatch, and the
/// results come back through [`apply`](ChatController::apply) as
/// [`TurnEvent`]s. Each submit bumps the generation counter, so events from a
/// superseded request or reveal pass are dropped instead of racing the
/// transcript.
pub struct ChatController {
    transcript: Vec<Turn>,
    expanded: bool,
    phase: Phase,
    generation: u64,
    reveal_started: bool,
}

impl ChatController {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            expanded: false,
            phase: Phase::Idle,
            generation: 0,
            reveal_started: false,
        }
    }

    /// Commit a user turn.
    ///
    /// Whitespace-only input is silently ignored. Otherwise the user turn is
    /// appended, the widget expands immediately (without waiting on the
    /// network), and the caller receives the request to dispatch.
    pub fn submit(&mut self, input: &str) -> Option<PendingRequest> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(Turn::user(text));
        self.expanded = true;
        self.phase = Phase::Waiting;
        self.generation += 1;
        self.reveal_started = false;

        Some(PendingRequest {
            generation: self.generation,
            user_input: text.to_string(),
        })
    }

    /// Apply an event from a request or reveal task.
    pub fn apply(&mut self, event: TurnEvent) {
        match event {
            TurnEvent::RevealStep { generation, prefix } => {
                if generation != self.generation {
                    tracing::debug!(generation, current = self.generation, "dropping stale reveal step");
                    return;
                }
                if self.reveal_started {
                    // Trailing bot turn belongs to this pass; replace in place.
                    if let Some(last) = self.transcript.last_mut() {
                        last.text = prefix;
                    }
                } else {
                    self.transcript.push(Turn::bot(prefix));
                    self.reveal_started = true;
                    self.phase = Phase::Revealing;
                }
            }
            TurnEvent::RevealDone { generation } => {
                if generation != self.generation {
                    return;
                }
                self.phase = Phase::Settled;
            }
            TurnEvent::RequestFailed { generation } => {
                if generation != self.generation {
                    return;
                }
                self.transcript.push(Turn::bot(ERROR_REPLY));
                self.phase = Phase::Settled;
            }
        }
    }

    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    /// Whether the widget has left its compact idle layout. One-way: once
    /// true it never reverts within a session.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True while a submit is in flight or its reply is still being revealed.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Waiting | Phase::Revealing)
    }
}

impl Default for ChatController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::prefixes;

    fn run_successful_turn(controller: &mut ChatController, input: &str, reply: &str) {
        let request = controller.submit(input).expect("submit accepted");
        for prefix in prefixes(reply) {
            controller.apply(TurnEvent::RevealStep {
                generation: request.generation,
                prefix,
            });
        }
        controller.apply(TurnEvent::RevealDone {
            generation: request.generation,
        });
    }

    #[test]
    fn transcript_alternates_after_successful_submits() {
        let mut controller = ChatController::new();
        for k in 0..3 {
            run_successful_turn(&mut controller, &format!("question {k}"), "an answer");
        }

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 6);
        for (index, turn) in transcript.iter().enumerate() {
            let expected = if index % 2 == 0 { Role::User } else { Role::Bot };
            assert_eq!(turn.role, expected, "turn {index}");
        }
        assert_eq!(controller.phase(), Phase::Settled);
    }

    #[test]
    fn reveal_passes_through_every_prefix_in_order() {
        let mut controller = ChatController::new();
        let request = controller.submit("hello").unwrap();

        let reply = "hi there";
        let mut observed = Vec::new();
        for prefix in prefixes(reply) {
            controller.apply(TurnEvent::RevealStep {
                generation: request.generation,
                prefix,
            });
            observed.push(controller.transcript().last().unwrap().text.clone());
        }
        controller.apply(TurnEvent::RevealDone {
            generation: request.generation,
        });

        assert_eq!(
            observed,
            vec!["", "h", "hi", "hi ", "hi t", "hi th", "hi the", "hi ther", "hi there"]
        );
        assert_eq!(controller.transcript().len(), 2);
        assert_eq!(controller.transcript()[0].text, "hello");
        assert_eq!(controller.transcript()[1].text, "hi there");
        assert!(controller.expanded());
    }

    #[test]
    fn expansion_is_one_way() {
        let mut controller = ChatController::new();
        assert!(!controller.expanded());

        let request = controller.submit("hello").unwrap();
        assert!(controller.expanded());

        controller.apply(TurnEvent::RequestFailed {
            generation: request.generation,
        });
        assert!(controller.expanded());

        run_successful_turn(&mut controller, "again", "ok");
        assert!(controller.expanded());
    }

    #[test]
    fn whitespace_only_input_is_ignored() {
        let mut controller = ChatController::new();
        assert!(controller.submit("").is_none());
        assert!(controller.submit("   ").is_none());
        assert!(controller.submit("\t\n").is_none());

        assert!(controller.transcript().is_empty());
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.expanded());
    }

    #[test]
    fn input_is_trimmed_before_append() {
        let mut controller = ChatController::new();
        controller.submit("  hello  ").unwrap();
        assert_eq!(controller.transcript()[0].text, "hello");
    }

    #[test]
    fn failure_appends_exactly_one_fixed_error_turn() {
        let mut controller = ChatController::new();
        let request = controller.submit("hello").unwrap();
        assert_eq!(controller.phase(), Phase::Waiting);

        controller.apply(TurnEvent::RequestFailed {
            generation: request.generation,
        });

        let transcript = controller.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].role, Role::User);
        assert_eq!(transcript[1].role, Role::Bot);
        assert_eq!(transcript[1].text, ERROR_REPLY);
        assert_eq!(controller.phase(), Phase::Settled);
    }

    #[test]
    fn stale_generation_events_are_dropped() {
        let mut controller = ChatController::new();
        let first = controller.submit("first").unwrap();
        controller.apply(TurnEvent::RevealStep {
            generation: first.generation,
            prefix: "par".to_string(),
        });

        // Second submit supersedes the in-flight reveal.
        let second = controller.submit("second").unwrap();
        assert_eq!(controller.transcript().len(), 3);

        // Late events from the first pass must not touch the transcript.
        controller.apply(TurnEvent::RevealStep {
            generation: first.generation,
            prefix: "part".to_string(),
        });
        controller.apply(TurnEvent::RevealDone {
            generation: first.generation,
        });
        controller.apply(TurnEvent::RequestFailed {
            generation: first.generation,
        });

        assert_eq!(controller.transcript().len(), 3);
        assert_eq!(controller.transcript()[1].text, "par");
        assert_eq!(controller.transcript()[2].text, "second");
        assert_eq!(controller.phase(), Phase::Waiting);

        // The superseding turn proceeds normally.
        controller.apply(TurnEvent::RevealStep {
            generation: second.generation,
            prefix: "ok".to_string(),
        });
        controller.apply(TurnEvent::RevealDone {
            generation: second.generation,
        });
        assert_eq!(controller.transcript().len(), 4);
        assert_eq!(controller.transcript()[3].text, "ok");
        assert_eq!(controller.phase(), Phase::Settled);
    }

    #[test]
    fn phase_walks_the_turn_lifecycle() {
        let mut controller = ChatController::new();
        assert_eq!(controller.phase(), Phase::Idle);

        let request = controller.submit("hello").unwrap();
        assert_eq!(controller.phase(), Phase::Waiting);
        assert!(controller.is_busy());

        controller.apply(TurnEvent::RevealStep {
            generation: request.generation,
            prefix: String::new(),
        });
        assert_eq!(controller.phase(), Phase::Revealing);

        controller.apply(TurnEvent::RevealDone {
            generation: request.generation,
        });
        assert_eq!(controller.phase(), Phase::Settled);
        assert!(!controller.is_busy());

        // Settled loops back to Waiting; Idle is never re-entered.
        controller.submit("next").unwrap();
        assert_eq!(controller.phase(), Phase::Waiting);
    }
}
