//! Line definitions - the nodes of a dialogue tree.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::DialogueError;

/// Precondition gating whether a line may open a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionType {
    None,
    /// Player's character type is one of the NPC's allies.
    Ally,
    /// Player's character type is one of the NPC's enemies.
    Enemy,
    /// Player level is at least the parameter.
    Level,
    /// Player holds the item named by the parameter.
    Item,
}

impl ConditionType {
    /// The token used for this condition in conversation data.
    pub fn token(&self) -> &'static str {
        match self {
            ConditionType::None => "none",
            ConditionType::Ally => "ally",
            ConditionType::Enemy => "enemy",
            ConditionType::Level => "level",
            ConditionType::Item => "item",
        }
    }
}

impl FromStr for ConditionType {
    type Err = DialogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(ConditionType::None),
            "ally" => Ok(ConditionType::Ally),
            "enemy" => Ok(ConditionType::Enemy),
            "level" => Ok(ConditionType::Level),
            "item" => Ok(ConditionType::Item),
            other => Err(DialogueError::UnknownConditionType(other.to_string())),
        }
    }
}

/// Side effect triggered when a line is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    NoAction,
    Attack,
    Buy,
    Sell,
    Trade,
    Give,
    Take,
}

impl ActionType {
    /// The token used for this action in conversation data.
    pub fn token(&self) -> &'static str {
        match self {
            ActionType::NoAction => "no action",
            ActionType::Attack => "attack",
            ActionType::Buy => "buy",
            ActionType::Sell => "sell",
            ActionType::Trade => "trade",
            ActionType::Give => "give",
            ActionType::Take => "take",
        }
    }
}

impl FromStr for ActionType {
    type Err = DialogueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no action" => Ok(ActionType::NoAction),
            "attack" => Ok(ActionType::Attack),
            "buy" => Ok(ActionType::Buy),
            "sell" => Ok(ActionType::Sell),
            "trade" => Ok(ActionType::Trade),
            "give" => Ok(ActionType::Give),
            "take" => Ok(ActionType::Take),
            other => Err(DialogueError::UnknownActionType(other.to_string())),
        }
    }
}

/// One utterance in a conversation.
///
/// Lines are immutable once built and shared through `Arc`; a line's responses
/// are the options the player picks from after hearing its text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Position of the record in the NPC's conversation array.
    pub index: usize,

    /// What the player says to reach this line. Empty for entry points.
    pub player_prompt: String,

    /// What the NPC says.
    pub text: String,

    pub condition: ConditionType,

    /// Empty for `None`, `Ally` and `Enemy`.
    pub condition_parameter: String,

    pub action: ActionType,

    pub responses: Vec<Arc<Line>>,
}

impl Line {
    /// Create an unconditional, action-free terminal line.
    pub fn new(index: usize, player_prompt: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index,
            player_prompt: player_prompt.into(),
            text: text.into(),
            condition: ConditionType::None,
            condition_parameter: String::new(),
            action: ActionType::NoAction,
            responses: Vec::new(),
        }
    }

    /// Set the condition and its parameter.
    pub fn with_condition(mut self, condition: ConditionType, parameter: impl Into<String>) -> Self {
        self.condition = condition;
        self.condition_parameter = parameter.into();
        self
    }

    /// Set the action.
    pub fn with_action(mut self, action: ActionType) -> Self {
        self.action = action;
        self
    }

    /// Append a response.
    pub fn with_response(mut self, response: Line) -> Self {
        self.responses.push(Arc::new(response));
        self
    }

    /// Whether this line can open a conversation.
    pub fn is_entry_point(&self) -> bool {
        self.player_prompt.is_empty()
    }

    /// Whether the conversation ends after this line.
    pub fn is_terminal(&self) -> bool {
        self.responses.is_empty()
    }
}

// Unwind deep trees iteratively; the derived drop would recurse once per level.
impl Drop for Line {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.responses);
        while let Some(response) = pending.pop() {
            if let Ok(mut line) = Arc::try_unwrap(response) {
                pending.append(&mut line.responses);
            }
        }
    }
}

/// Split a raw condition string such as `"level=5"` on its first `=`.
///
/// The parameter is empty when there is no `=`.
pub fn parse_condition(raw: &str) -> Result<(ConditionType, String), DialogueError> {
    let (token, parameter) = raw.split_once('=').unwrap_or((raw, ""));
    Ok((token.parse()?, parameter.to_string()))
}
