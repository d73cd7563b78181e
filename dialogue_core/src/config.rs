//! Conversation configuration, read from TOML.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "json/npcs.json";
pub const DEFAULT_HOSTILITY_NOTICE: &str = "\n{npc} is now attacking you!\n";
pub const DEFAULT_EXIT_LABEL: &str = "Exit the conversation";

/// Settings for loading and presenting conversations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationConfig {
    /// Location of the NPC data document.
    pub data_path: PathBuf,

    /// Shown when a line makes its NPC attack. `{npc}` is replaced by the NPC name.
    pub hostility_notice: String,

    /// Label of the menu option that leaves a conversation.
    pub exit_label: String,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            hostility_notice: DEFAULT_HOSTILITY_NOTICE.to_string(),
            exit_label: DEFAULT_EXIT_LABEL.to_string(),
        }
    }
}

impl ConversationConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ConversationConfig::from_toml_str("").unwrap();
        assert_eq!(config, ConversationConfig::default());
        assert_eq!(config.data_path, PathBuf::from("json/npcs.json"));
    }

    #[test]
    fn test_partial_override() {
        let config = ConversationConfig::from_toml_str(
            r#"
            data_path = "data/town.json"
            exit_label = "Walk away"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_path, PathBuf::from("data/town.json"));
        assert_eq!(config.exit_label, "Walk away");
        assert_eq!(config.hostility_notice, DEFAULT_HOSTILITY_NOTICE);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conversations.toml");
        std::fs::write(&path, "hostility_notice = \"{npc} attacks!\"\n").unwrap();

        let config = ConversationConfig::from_file(&path).unwrap();
        assert_eq!(config.hostility_notice, "{npc} attacks!");

        assert!(matches!(
            ConversationConfig::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            ConversationConfig::from_toml_str("data_path = ["),
            Err(ConfigError::Toml(_))
        ));
    }
}
