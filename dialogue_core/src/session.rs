//! Conversation sessions - one interactive walk through an NPC's dialogue tree.
//!
//! A session is a small state machine:
//!
//! 1. **SelectingEntry**: the NPC's entry points are scanned in source order and
//!    the first whose condition holds is delivered. No match ends the session
//!    without output.
//! 2. **Active**: the current line has been delivered (text emitted, then its
//!    action dispatched) and the session waits for the player to pick one of
//!    its responses.
//! 3. **Terminated**: nothing more is emitted or dispatched.
//!
//! The game loop drives the machine with [`ConversationSession::begin`] and
//! [`ConversationSession::advance`], or hands it a [`ResponseSource`] and lets
//! [`ConversationSession::run`] block until the conversation is over.

use std::sync::Arc;

use game_rules::{ItemCatalog, Npc, Player};

use crate::action::ActionDispatcher;
use crate::channel::{MessageSink, ResponseSource, Selection};
use crate::condition::ConditionEvaluator;
use crate::error::ConversationError;
use crate::line::Line;
use crate::registry::ConversationRegistry;

/// Where a session is in its traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    SelectingEntry,
    /// Waiting for the player's response to this line.
    Active(Arc<Line>),
    Terminated,
}

/// The live game state and collaborators a session works against.
pub struct Interaction<'a> {
    pub player: &'a mut Player,
    pub conditions: ConditionEvaluator<'a>,
    pub actions: ActionDispatcher<'a>,
    pub output: &'a mut dyn MessageSink,
}

impl<'a> Interaction<'a> {
    pub fn new(
        player: &'a mut Player,
        items: &'a dyn ItemCatalog,
        actions: ActionDispatcher<'a>,
        output: &'a mut dyn MessageSink,
    ) -> Self {
        Self {
            player,
            conditions: ConditionEvaluator::new(items),
            actions,
            output,
        }
    }
}

/// One conversation between the player and an NPC.
pub struct ConversationSession<'r> {
    npc: &'r Npc,
    entry_points: &'r [Arc<Line>],
    state: SessionState,
}

impl<'r> ConversationSession<'r> {
    /// Prepare a conversation with `npc` using the entry points in `registry`.
    pub fn new(registry: &'r ConversationRegistry, npc: &'r Npc) -> Self {
        Self {
            npc,
            entry_points: registry.entry_points(&npc.name),
            state: SessionState::SelectingEntry,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == SessionState::Terminated
    }

    /// The line awaiting a response, if any.
    pub fn current_line(&self) -> Option<&Arc<Line>> {
        match &self.state {
            SessionState::Active(line) => Some(line),
            _ => None,
        }
    }

    /// Responses the player can pick from right now.
    pub fn options(&self) -> &[Arc<Line>] {
        self.current_line()
            .map(|line| line.responses.as_slice())
            .unwrap_or(&[])
    }

    /// Select and deliver the entry point.
    ///
    /// # Errors
    ///
    /// A condition that cannot be evaluated, or the player dying during the
    /// entry line's action. Either error terminates the session.
    pub fn begin(&mut self, io: &mut Interaction<'_>) -> Result<&SessionState, ConversationError> {
        if self.state != SessionState::SelectingEntry {
            return Err(ConversationError::AlreadyStarted);
        }

        let entry_points = self.entry_points;
        let mut start = None;
        for line in entry_points {
            let matches = io
                .conditions
                .matches(self.npc, &*io.player, line)
                .map_err(|err| self.abort(err))?;
            if matches {
                start = Some(Arc::clone(line));
                break;
            }
        }

        match start {
            Some(line) => self.deliver(line, io)?,
            None => {
                tracing::debug!(npc = %self.npc.name, "no entry point applies");
                self.state = SessionState::Terminated;
            }
        }
        Ok(&self.state)
    }

    /// Apply the player's answer to the current line.
    ///
    /// Advancing a terminated session does nothing. An out-of-range response
    /// is rejected and leaves the session where it was.
    pub fn advance(
        &mut self,
        selection: Selection,
        io: &mut Interaction<'_>,
    ) -> Result<&SessionState, ConversationError> {
        let current = match &self.state {
            SessionState::SelectingEntry => return Err(ConversationError::NotStarted),
            SessionState::Active(line) => Some(Arc::clone(line)),
            SessionState::Terminated => None,
        };
        let Some(current) = current else {
            return Ok(&self.state);
        };

        match selection {
            Selection::End => {
                tracing::debug!(npc = %self.npc.name, line = current.index, "player left conversation");
                self.state = SessionState::Terminated;
            }
            Selection::Respond(choice) => {
                let next = current.responses.get(choice).cloned().ok_or(
                    ConversationError::InvalidSelection {
                        choice,
                        options: current.responses.len(),
                    },
                )?;
                self.deliver(next, io)?;
            }
        }
        Ok(&self.state)
    }

    /// Stop the conversation where it stands.
    pub fn cancel(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// Drive the conversation to the end, asking `input` for every response.
    pub fn run(
        &mut self,
        io: &mut Interaction<'_>,
        input: &mut dyn ResponseSource,
    ) -> Result<(), ConversationError> {
        if self.state == SessionState::SelectingEntry {
            self.begin(io)?;
        }
        while let Some(line) = self.current_line().cloned() {
            let selection = input.select(&line, &mut *io.output);
            self.advance(selection, io)?;
        }
        Ok(())
    }

    fn deliver(&mut self, line: Arc<Line>, io: &mut Interaction<'_>) -> Result<(), ConversationError> {
        tracing::debug!(npc = %self.npc.name, line = line.index, "delivering line");
        io.output.offer(line.text.clone());

        let npc = self.npc;
        io.actions
            .dispatch(line.action, npc, &mut *io.player, &mut *io.output)
            .map_err(|death| {
                tracing::info!(npc = %npc.name, %death, "player died during conversation");
                self.abort(death)
            })?;

        self.state = if line.is_terminal() {
            SessionState::Terminated
        } else {
            SessionState::Active(line)
        };
        Ok(())
    }

    fn abort(&mut self, err: impl Into<ConversationError>) -> ConversationError {
        self.state = SessionState::Terminated;
        err.into()
    }
}

/// Hold a whole conversation between `player` and `npc`, blocking on `input`.
///
/// Does nothing if the NPC has no conversation or none of its entry points apply.
pub fn start_conversation(
    registry: &ConversationRegistry,
    npc: &Npc,
    io: &mut Interaction<'_>,
    input: &mut dyn ResponseSource,
) -> Result<(), ConversationError> {
    ConversationSession::new(registry, npc).run(io, input)
}
