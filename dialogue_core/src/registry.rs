//! Conversation registry - each NPC's entry points, built once from the data source.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Deserialize;
use serde_json::Value;

use crate::builder::{build_conversation, RawLine};
use crate::config::ConversationConfig;
use crate::error::DialogueError;
use crate::line::Line;

/// Maps NPC names to the entry points of their conversation, in source order.
///
/// The registry is read-only once built; sessions only borrow it.
#[derive(Debug, Clone, Default)]
pub struct ConversationRegistry {
    entries: HashMap<String, Vec<Arc<Line>>>,
}

impl ConversationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the data source at `path`.
    ///
    /// Never fails: an unreadable or malformed document is logged and yields an
    /// empty registry.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(registry) => registry,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "conversations not loaded");
                Self::new()
            }
        }
    }

    /// Load the data source at `path`, reporting document-level failures.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, DialogueError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DialogueError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Build a registry from an `{"npcs": {...}}` document.
    ///
    /// An NPC whose conversation is malformed is logged and left out; the rest
    /// still load.
    pub fn from_json_str(json: &str) -> Result<Self, DialogueError> {
        let document: Value = serde_json::from_str(json)?;
        let npcs = document
            .get("npcs")
            .and_then(Value::as_object)
            .ok_or(DialogueError::MissingNpcs)?;

        let mut registry = Self::new();
        for (name, details) in npcs {
            let Some(conversation) = details.get("conversations") else {
                continue;
            };
            match parse_conversation(conversation) {
                Ok(entries) => registry.insert(name.clone(), entries),
                Err(err) => {
                    tracing::warn!(npc = %name, error = %err, "skipping malformed conversation");
                }
            }
        }

        tracing::info!(
            npcs = registry.npc_count(),
            entry_points = registry.entries.values().map(Vec::len).sum::<usize>(),
            "conversations loaded"
        );
        Ok(registry)
    }

    /// Register (or replace) the entry points of an NPC.
    pub fn insert(&mut self, npc: impl Into<String>, entries: Vec<Arc<Line>>) {
        self.entries.insert(npc.into(), entries);
    }

    /// Entry points for `npc`, empty if it has no conversation.
    pub fn entry_points(&self, npc: &str) -> &[Arc<Line>] {
        self.entries.get(npc).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn has_conversation(&self, npc: &str) -> bool {
        self.entries.contains_key(npc)
    }

    pub fn npc_count(&self) -> usize {
        self.entries.len()
    }

    pub fn npc_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

fn parse_conversation(conversation: &Value) -> Result<Vec<Arc<Line>>, DialogueError> {
    let records = Vec::<RawLine>::deserialize(conversation)?;
    build_conversation(&records)
}

/// A registry loaded on first access from the configured data source.
///
/// Owned by whatever holds the game session and passed to the code that starts
/// conversations.
#[derive(Debug, Default)]
pub struct LazyConversationRegistry {
    config: ConversationConfig,
    registry: OnceCell<ConversationRegistry>,
}

impl LazyConversationRegistry {
    pub fn new(config: ConversationConfig) -> Self {
        Self {
            config,
            registry: OnceCell::new(),
        }
    }

    /// The registry, loading it if this is the first access.
    pub fn get(&self) -> &ConversationRegistry {
        self.registry
            .get_or_init(|| ConversationRegistry::load(&self.config.data_path))
    }

    pub fn is_loaded(&self) -> bool {
        self.registry.get().is_some()
    }

    pub fn config(&self) -> &ConversationConfig {
        &self.config
    }
}
