//! The playback controller: a state machine over one scene graph.
//!
//! States: `Idle`, `Revealing`, `AwaitingChoice`, `Ended`. Every rejected
//! operation leaves the controller exactly as it was; "is typing" is part
//! of the authoritative state, not a view-only flag.

use std::sync::Arc;

use serde::Serialize;

use casevault_core::error::DomainError;
use casevault_core::ids::{CaseId, NodeId};
use casevault_content::scene::SceneGraph;

/// Completion signal emitted to the progress collaborator when a terminal
/// node is acknowledged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseCompleted {
    /// The completed case.
    pub case_id: CaseId,
    /// What the consumer should mark as unlocked.
    pub unlock_reward: String,
}

#[derive(Debug)]
enum Phase {
    Revealing { revealed: usize },
    AwaitingChoice,
    Ended,
}

#[derive(Debug)]
struct ActivePlayback {
    case_id: CaseId,
    graph: Arc<SceneGraph>,
    node_id: NodeId,
    phase: Phase,
}

/// Read-only snapshot handed to the view. Safe to re-render on every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RenderState {
    /// No active case.
    Idle,
    /// Text is being revealed; choices are suppressed.
    Revealing {
        /// The active case.
        case_id: CaseId,
        /// Title of the current node.
        title: String,
        /// The revealed prefix of the node's body.
        revealed_text: String,
    },
    /// Full text shown; the reader picks a choice by index.
    AwaitingChoice {
        /// The active case.
        case_id: CaseId,
        /// Title of the current node.
        title: String,
        /// The full body text.
        text: String,
        /// Choice labels in display (= selection) order.
        choices: Vec<String>,
    },
    /// A terminal node is fully revealed and awaits acknowledgement.
    Ended {
        /// The active case.
        case_id: CaseId,
        /// Title of the terminal node.
        title: String,
        /// The full body text.
        text: String,
        /// The unlock payload.
        unlock_reward: String,
    },
}

/// Drives traversal and reveal for exactly one active case at a time.
///
/// The `generation` counter increments on every transition that resets the
/// reveal; timer tasks carry the generation they were armed for and stand
/// down when it moves on, so a stale tick can never touch a newer reveal.
#[derive(Debug, Default)]
pub struct PlaybackController {
    active: Option<ActivePlayback>,
    generation: u64,
}

impl PlaybackController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the current state, for diagnostics and error reporting.
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        match &self.active {
            None => "idle",
            Some(active) => match active.phase {
                Phase::Revealing { .. } => "revealing",
                Phase::AwaitingChoice => "awaiting_choice",
                Phase::Ended => "ended",
            },
        }
    }

    /// The reveal generation fencing stale timer ticks.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a reveal is currently in progress.
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        matches!(
            &self.active,
            Some(ActivePlayback {
                phase: Phase::Revealing { .. },
                ..
            })
        )
    }

    /// The active case, if any.
    #[must_use]
    pub fn case_id(&self) -> Option<CaseId> {
        self.active.as_ref().map(|a| a.case_id)
    }

    /// Starts playback of a case at its graph's entry node.
    ///
    /// Valid from any state; starting a new case always resets, and the
    /// generation bump invalidates any timer armed for the previous reveal.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownNode` if the entry node cannot be
    /// resolved, which a validated graph rules out.
    pub fn start(&mut self, case_id: CaseId, graph: Arc<SceneGraph>) -> Result<(), DomainError> {
        let entry = graph.entry().clone();
        graph.lookup(&entry)?;
        self.generation += 1;
        self.active = Some(ActivePlayback {
            case_id,
            graph,
            node_id: entry,
            phase: Phase::Revealing { revealed: 0 },
        });
        self.settle();
        Ok(())
    }

    /// Advances the reveal by one character.
    ///
    /// Exactly `body_chars()` ticks take a node from an empty prefix to the
    /// full text, at which point the controller moves to `AwaitingChoice`
    /// or `Ended` on its own. Returns whether the reveal is still in
    /// progress afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when not in `Revealing`.
    pub fn tick(&mut self) -> Result<bool, DomainError> {
        let state = self.state_name();
        let Some(active) = self.active.as_mut() else {
            return Err(invalid_state("tick", state));
        };
        let Phase::Revealing { revealed } = &mut active.phase else {
            return Err(invalid_state("tick", state));
        };
        *revealed += 1;
        self.settle();
        Ok(self.is_revealing())
    }

    /// Follows the choice at `index` out of the current node.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when not in `AwaitingChoice` and
    /// `DomainError::InvalidChoice` for an out-of-range index; both leave
    /// the controller unchanged.
    pub fn select_choice(&mut self, index: usize) -> Result<(), DomainError> {
        let state = self.state_name();
        let Some(active) = self.active.as_mut() else {
            return Err(invalid_state("select_choice", state));
        };
        if !matches!(active.phase, Phase::AwaitingChoice) {
            return Err(invalid_state("select_choice", state));
        }

        let graph = Arc::clone(&active.graph);
        let node = graph.lookup(&active.node_id)?;
        let Some(choice) = node.choices.get(index) else {
            return Err(DomainError::InvalidChoice {
                index,
                available: node.choices.len(),
            });
        };
        let target = choice.target.clone();
        graph.lookup(&target)?;

        active.node_id = target;
        active.phase = Phase::Revealing { revealed: 0 };
        self.generation += 1;
        self.settle();
        Ok(())
    }

    /// Acknowledges a fully revealed ending, returning the completion
    /// signal and resetting the controller to `Idle`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when not in `Ended`.
    pub fn acknowledge_ending(&mut self) -> Result<CaseCompleted, DomainError> {
        let state = self.state_name();
        let Some(active) = self.active.as_ref() else {
            return Err(invalid_state("acknowledge_ending", state));
        };
        if !matches!(active.phase, Phase::Ended) {
            return Err(invalid_state("acknowledge_ending", state));
        }

        let node = active.graph.lookup(&active.node_id)?;
        let ending = node.ending.as_ref().ok_or_else(|| {
            DomainError::InvalidGraph(format!("ended on non-terminal node {}", active.node_id))
        })?;
        let completed = CaseCompleted {
            case_id: active.case_id,
            unlock_reward: ending.unlock_reward.clone(),
        };

        self.active = None;
        self.generation += 1;
        Ok(completed)
    }

    /// Aborts the active case without completing it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when already `Idle`.
    pub fn abort(&mut self) -> Result<(), DomainError> {
        if self.active.is_none() {
            return Err(invalid_state("abort", "idle"));
        }
        self.active = None;
        self.generation += 1;
        Ok(())
    }

    /// Snapshot of the current state for the view.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownNode` if the current node cannot be
    /// resolved, which a validated graph rules out.
    pub fn render(&self) -> Result<RenderState, DomainError> {
        let Some(active) = self.active.as_ref() else {
            return Ok(RenderState::Idle);
        };
        let node = active.graph.lookup(&active.node_id)?;
        Ok(match &active.phase {
            Phase::Revealing { revealed } => RenderState::Revealing {
                case_id: active.case_id,
                title: node.title.clone(),
                revealed_text: reveal_prefix(&node.body, *revealed).to_owned(),
            },
            Phase::AwaitingChoice => RenderState::AwaitingChoice {
                case_id: active.case_id,
                title: node.title.clone(),
                text: node.body.clone(),
                choices: node.choices.iter().map(|c| c.label.clone()).collect(),
            },
            Phase::Ended => RenderState::Ended {
                case_id: active.case_id,
                title: node.title.clone(),
                text: node.body.clone(),
                unlock_reward: node
                    .ending
                    .as_ref()
                    .map(|e| e.unlock_reward.clone())
                    .unwrap_or_default(),
            },
        })
    }

    /// Moves a finished reveal to `AwaitingChoice` or `Ended`. A node with
    /// an empty body completes in zero ticks.
    fn settle(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Phase::Revealing { revealed } = active.phase else {
            return;
        };
        let graph = Arc::clone(&active.graph);
        let Ok(node) = graph.lookup(&active.node_id) else {
            return;
        };
        if revealed >= node.body_chars() {
            active.phase = if node.is_terminal() {
                Phase::Ended
            } else {
                Phase::AwaitingChoice
            };
        }
    }
}

fn invalid_state(operation: &'static str, state: &'static str) -> DomainError {
    DomainError::InvalidState { operation, state }
}

/// The first `revealed` characters of `body`, sliced on a char boundary.
fn reveal_prefix(body: &str, revealed: usize) -> &str {
    match body.char_indices().nth(revealed) {
        Some((i, _)) => &body[..i],
        None => body,
    }
}
