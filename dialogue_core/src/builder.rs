//! Dialogue tree construction from flat per-NPC line records.
//!
//! Conversation data stores each NPC's lines as an array; a record names its
//! responses by array index. Building resolves those indices into owned child
//! lines, memoizing every record so that a line reached along several paths is
//! built once, and rejecting cycles instead of recursing forever.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DialogueError;
use crate::line::{parse_condition, ActionType, ConditionType, Line};

/// One line record as it appears in the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawLine {
    /// Player prompt; empty marks an entry point.
    pub player: String,
    pub text: String,
    /// `"type"` or `"type=parameter"`.
    pub condition: String,
    pub action: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub response: Vec<usize>,
}

impl RawLine {
    pub fn new(
        player: impl Into<String>,
        text: impl Into<String>,
        condition: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            player: player.into(),
            text: text.into(),
            condition: condition.into(),
            action: action.into(),
            response: Vec::new(),
        }
    }

    /// Set the response indices.
    pub fn with_responses(mut self, response: impl IntoIterator<Item = usize>) -> Self {
        self.response = response.into_iter().collect();
        self
    }
}

#[derive(Debug, Clone)]
enum Slot {
    Unbuilt,
    InProgress,
    Built(Arc<Line>),
}

/// Builds the dialogue tree for one NPC.
pub struct DialogueTreeBuilder<'a> {
    records: &'a [RawLine],
    slots: Vec<Slot>,
}

impl<'a> DialogueTreeBuilder<'a> {
    pub fn new(records: &'a [RawLine]) -> Self {
        Self {
            records,
            slots: vec![Slot::Unbuilt; records.len()],
        }
    }

    /// Build every entry point, in array order.
    pub fn build_entry_points(mut self) -> Result<Vec<Arc<Line>>, DialogueError> {
        let records = self.records;
        let mut entries = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if record.player.is_empty() {
                entries.push(self.line(index)?);
            }
        }
        Ok(entries)
    }

    /// Resolve the record at `root` into a line, building its responses first.
    ///
    /// Walks the tree with an explicit stack so deep conversations cannot
    /// exhaust the call stack.
    fn line(&mut self, root: usize) -> Result<Arc<Line>, DialogueError> {
        match &self.slots[root] {
            Slot::Built(line) => return Ok(Arc::clone(line)),
            Slot::InProgress => return Err(DialogueError::CyclicResponse { index: root }),
            Slot::Unbuilt => {}
        }

        let records = self.records;
        let mut stack = vec![root];
        self.slots[root] = Slot::InProgress;

        loop {
            let index = stack[stack.len() - 1];

            let mut unbuilt = None;
            for &response in &records[index].response {
                if response >= records.len() {
                    return Err(DialogueError::ResponseOutOfRange {
                        index,
                        response,
                        len: records.len(),
                    });
                }
                match &self.slots[response] {
                    Slot::Built(_) => {}
                    Slot::InProgress => {
                        return Err(DialogueError::CyclicResponse { index: response })
                    }
                    Slot::Unbuilt => {
                        unbuilt = Some(response);
                        break;
                    }
                }
            }

            if let Some(response) = unbuilt {
                self.slots[response] = Slot::InProgress;
                stack.push(response);
                continue;
            }

            let line = self.assemble(index)?;
            self.slots[index] = Slot::Built(Arc::clone(&line));
            stack.pop();
            if stack.is_empty() {
                return Ok(line);
            }
        }
    }

    /// Turn the record at `index` into a line. Every response must already be built.
    fn assemble(&self, index: usize) -> Result<Arc<Line>, DialogueError> {
        let record = &self.records[index];

        let responses = record
            .response
            .iter()
            .map(|&response| match &self.slots[response] {
                Slot::Built(line) => Ok(Arc::clone(line)),
                _ => Err(DialogueError::CyclicResponse { index: response }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if record.text.is_empty() {
            return Err(DialogueError::EmptyText { index });
        }

        let (condition, condition_parameter) = parse_condition(&record.condition)?;
        if condition == ConditionType::Level && condition_parameter.parse::<i32>().is_err() {
            return Err(DialogueError::MalformedConditionParameter {
                index,
                parameter: condition_parameter,
            });
        }
        let action: ActionType = record.action.parse()?;

        Ok(Arc::new(Line {
            index,
            player_prompt: record.player.clone(),
            text: record.text.clone(),
            condition,
            condition_parameter,
            action,
            responses,
        }))
    }
}

/// Build the entry points of one NPC's conversation.
pub fn build_conversation(records: &[RawLine]) -> Result<Vec<Arc<Line>>, DialogueError> {
    DialogueTreeBuilder::new(records).build_entry_points()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard_records() -> Vec<RawLine> {
        vec![
            RawLine::new("", "Halt! Who goes there?", "level=5", "no action").with_responses([1, 2]),
            RawLine::new("A friend.", "Pass, friend.", "none", "no action"),
            RawLine::new("None of your business.", "Then die!", "none", "attack"),
            RawLine::new("", "Move along.", "none", "no action"),
        ]
    }

    #[test]
    fn test_responses_in_order() {
        let entries = build_conversation(&guard_records()).unwrap();
        let start = &entries[0];

        assert_eq!(start.responses.len(), 2);
        assert_eq!(start.responses[0].index, 1);
        assert_eq!(start.responses[0].text, "Pass, friend.");
        assert_eq!(start.responses[1].index, 2);
        assert_eq!(start.responses[1].action, ActionType::Attack);
        assert!(start.responses[0].is_terminal());
    }

    #[test]
    fn test_entry_points_use_their_own_index() {
        let entries = build_conversation(&guard_records()).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].index, 0);
        assert_eq!(entries[1].index, 3);
        assert_eq!(entries[1].text, "Move along.");
    }

    #[test]
    fn test_condition_parameter_split() {
        let entries = build_conversation(&guard_records()).unwrap();
        assert_eq!(entries[0].condition, ConditionType::Level);
        assert_eq!(entries[0].condition_parameter, "5");
        assert_eq!(entries[1].condition_parameter, "");
    }

    #[test]
    fn test_shared_response_built_once() {
        let records = vec![
            RawLine::new("", "Hello.", "none", "no action").with_responses([1, 2]),
            RawLine::new("Hi.", "What do you want?", "none", "no action").with_responses([3]),
            RawLine::new("Hey.", "Speak up.", "none", "no action").with_responses([3]),
            RawLine::new("Nothing.", "Goodbye.", "none", "no action"),
        ];
        let entries = build_conversation(&records).unwrap();
        let a = &entries[0].responses[0].responses[0];
        let b = &entries[0].responses[1].responses[0];
        assert!(Arc::ptr_eq(a, b));
    }

    #[test]
    fn test_cycle_rejected() {
        let records = vec![
            RawLine::new("", "Round and round.", "none", "no action").with_responses([1]),
            RawLine::new("Again?", "Again.", "none", "no action").with_responses([0]),
        ];
        assert!(matches!(
            build_conversation(&records),
            Err(DialogueError::CyclicResponse { index: 0 })
        ));
    }

    #[test]
    fn test_response_out_of_range() {
        let records = vec![RawLine::new("", "Hello.", "none", "no action").with_responses([7])];
        assert!(matches!(
            build_conversation(&records),
            Err(DialogueError::ResponseOutOfRange { index: 0, response: 7, len: 1 })
        ));
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        let bad_condition = vec![RawLine::new("", "Hello.", "mood=grim", "no action")];
        assert!(matches!(
            build_conversation(&bad_condition),
            Err(DialogueError::UnknownConditionType(t)) if t == "mood"
        ));

        let bad_action = vec![RawLine::new("", "Hello.", "none", "dance")];
        assert!(matches!(
            build_conversation(&bad_action),
            Err(DialogueError::UnknownActionType(t)) if t == "dance"
        ));
    }

    #[test]
    fn test_malformed_level_rejected() {
        let records = vec![RawLine::new("", "Hello.", "level=high", "no action")];
        assert!(matches!(
            build_conversation(&records),
            Err(DialogueError::MalformedConditionParameter { index: 0, .. })
        ));
    }

    #[test]
    fn test_empty_text_rejected() {
        let records = vec![RawLine::new("", "", "none", "no action")];
        assert!(matches!(
            build_conversation(&records),
            Err(DialogueError::EmptyText { index: 0 })
        ));
    }

    #[test]
    fn test_self_response_rejected() {
        let records = vec![RawLine::new("", "Echo.", "none", "no action").with_responses([0])];
        assert!(matches!(
            build_conversation(&records),
            Err(DialogueError::CyclicResponse { index: 0 })
        ));
    }

    #[test]
    fn test_deep_chain_builds() {
        const DEPTH: usize = 20_000;
        let records: Vec<RawLine> = (0..DEPTH)
            .map(|i| {
                let player = if i == 0 { "" } else { "Go on." };
                let record = RawLine::new(player, format!("Step {i}."), "none", "no action");
                if i + 1 < DEPTH {
                    record.with_responses([i + 1])
                } else {
                    record
                }
            })
            .collect();

        let entries = build_conversation(&records).unwrap();
        assert_eq!(entries.len(), 1);

        let mut line = Arc::clone(&entries[0]);
        let mut depth = 1;
        while let Some(next) = line.responses.first().cloned() {
            assert_eq!(next.index, line.index + 1);
            line = next;
            depth += 1;
        }
        assert_eq!(depth, DEPTH);
        assert_eq!(line.text, format!("Step {}.", DEPTH - 1));
    }

    #[test]
    fn test_missing_response_field() {
        let record: RawLine = serde_json::from_str(
            r#"{"player": "", "text": "Hello.", "condition": "none", "action": "no action"}"#,
        )
        .unwrap();
        assert!(record.response.is_empty());

        let entries = build_conversation(&[record]).unwrap();
        assert!(entries[0].is_terminal());
    }
}
