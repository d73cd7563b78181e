//! Error types for loading, evaluating, and running conversations.

use std::path::PathBuf;

use game_rules::PlayerDeath;
use thiserror::Error;

/// Data-format errors raised while turning raw records into dialogue trees.
#[derive(Debug, Error)]
pub enum DialogueError {
    #[error("unknown condition type `{0}`")]
    UnknownConditionType(String),

    #[error("unknown action type `{0}`")]
    UnknownActionType(String),

    #[error("line {index} has no text")]
    EmptyText { index: usize },

    #[error("line {index}: condition parameter `{parameter}` is not a valid level")]
    MalformedConditionParameter { index: usize, parameter: String },

    #[error("line {index} responds with line {response}, but the conversation has {len} lines")]
    ResponseOutOfRange {
        index: usize,
        response: usize,
        len: usize,
    },

    #[error("line {index} is reachable from itself")]
    CyclicResponse { index: usize },

    #[error("data source has no `npcs` object")]
    MissingNpcs,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors raised while deciding whether a line's precondition holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    #[error("condition parameter `{0}` is not a valid level")]
    MalformedConditionParameter(String),

    #[error("unknown item `{0}`")]
    UnknownItem(String),
}

/// Errors that end a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error(transparent)]
    PlayerDied(#[from] PlayerDeath),

    #[error("response {choice} selected, but only {options} are available")]
    InvalidSelection { choice: usize, options: usize },

    #[error("conversation has not started yet")]
    NotStarted,

    #[error("conversation has already started")]
    AlreadyStarted,
}

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}
