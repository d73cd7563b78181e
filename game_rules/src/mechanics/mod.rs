//! Game mechanics shared by characters: allegiance tags and fatal outcomes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A character-type tag such as `"Recruit"` or `"Brotherhood Member"`.
///
/// NPCs list the tags they consider allies or enemies, and the player carries
/// exactly one current tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterType(pub String);

impl CharacterType {
    /// Create a new character type tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CharacterType {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

impl std::fmt::Display for CharacterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fatal gameplay signal: the player died.
///
/// Raised by combat or trading and carried out of whatever interaction was
/// running at the time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{player} was killed by {cause}")]
pub struct PlayerDeath {
    pub player: String,
    pub cause: String,
}

impl PlayerDeath {
    pub fn new(player: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            cause: cause.into(),
        }
    }
}
