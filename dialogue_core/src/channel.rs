//! Output and input channels between a conversation and the player.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::line::Line;

/// Append-only sink of text messages shown to the player.
pub trait MessageSink {
    fn offer(&mut self, message: String);
}

/// FIFO message queue consumed by a presentation layer.
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: VecDeque<String>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest message.
    pub fn poll(&mut self) -> Option<String> {
        self.messages.pop_front()
    }

    /// Take every queued message, oldest first.
    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl MessageSink for MessageQueue {
    fn offer(&mut self, message: String) {
        self.messages.push_back(message);
    }
}

/// The player's answer to a line with responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Index into the line's responses.
    Respond(usize),
    /// Leave the conversation.
    End,
}

/// Supplies the player's choice among a line's responses.
pub trait ResponseSource {
    /// Pick one of `line.responses`, which is never empty, or end the conversation.
    fn select(&mut self, line: &Line, output: &mut dyn MessageSink) -> Selection;
}

/// Replays a fixed list of selections, then ends the conversation.
#[derive(Debug, Clone, Default)]
pub struct ScriptedResponses {
    selections: VecDeque<Selection>,
    asked: usize,
}

impl ScriptedResponses {
    pub fn new(selections: impl IntoIterator<Item = Selection>) -> Self {
        Self {
            selections: selections.into_iter().collect(),
            asked: 0,
        }
    }

    /// How many times a selection was requested.
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl ResponseSource for ScriptedResponses {
    fn select(&mut self, _line: &Line, _output: &mut dyn MessageSink) -> Selection {
        self.asked += 1;
        self.selections.pop_front().unwrap_or(Selection::End)
    }
}

/// Numbered text menu read from a line-based reader such as stdin.
///
/// Each response is listed by its player prompt, followed by an exit option.
/// Unreadable or out-of-range input re-prompts; end of input ends the
/// conversation.
pub struct TextMenu<R> {
    reader: R,
    exit_label: String,
}

impl<R: BufRead> TextMenu<R> {
    pub fn new(reader: R, exit_label: impl Into<String>) -> Self {
        Self {
            reader,
            exit_label: exit_label.into(),
        }
    }

    fn read_choice(&mut self) -> Option<String> {
        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => None,
            Ok(_) => Some(input.trim().to_string()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read response selection");
                None
            }
        }
    }
}

impl<R: BufRead> ResponseSource for TextMenu<R> {
    fn select(&mut self, line: &Line, output: &mut dyn MessageSink) -> Selection {
        let options = line.responses.len();
        for (i, response) in line.responses.iter().enumerate() {
            output.offer(format!("{}) {}", i + 1, response.player_prompt));
        }
        output.offer(format!("{}) {}", options + 1, self.exit_label));

        loop {
            let Some(input) = self.read_choice() else {
                return Selection::End;
            };
            match input.parse::<usize>() {
                Ok(n) if (1..=options).contains(&n) => return Selection::Respond(n - 1),
                Ok(n) if n == options + 1 => return Selection::End,
                _ => output.offer(format!("Please enter a number between 1 and {}.", options + 1)),
            }
        }
    }
}
