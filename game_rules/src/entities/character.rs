//! Character definitions: the NPCs a player can talk to, and the player.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{EntityId, HealthComponent, InventoryComponent};
use crate::items::{Item, ItemId};
use crate::mechanics::CharacterType;

/// A non-player character. Identified by name in conversation data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub allies: HashSet<CharacterType>,
    #[serde(default)]
    pub enemies: HashSet<CharacterType>,
}

impl Npc {
    /// Create a new NPC with the given name and no allegiances.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            allies: HashSet::new(),
            enemies: HashSet::new(),
        }
    }

    /// Add an allied character type.
    pub fn with_ally(mut self, tag: impl Into<String>) -> Self {
        self.allies.insert(CharacterType::new(tag));
        self
    }

    /// Add an enemy character type.
    pub fn with_enemy(mut self, tag: impl Into<String>) -> Self {
        self.enemies.insert(CharacterType::new(tag));
        self
    }
}

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub name: String,
    pub level: i32,
    pub current_character_type: CharacterType,
    pub health: HealthComponent,
    pub inventory: InventoryComponent,
}

impl Player {
    /// Create a level 1 player of the given character type.
    pub fn new(name: impl Into<String>, character_type: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            level: 1,
            current_character_type: CharacterType::new(character_type),
            health: HealthComponent::default(),
            inventory: InventoryComponent::default(),
        }
    }

    /// Set the level.
    pub fn with_level(mut self, level: i32) -> Self {
        self.level = level;
        self
    }

    /// Give the player one of an item.
    pub fn with_item(mut self, item_id: impl Into<String>) -> Self {
        self.inventory.add(ItemId::new(item_id), 1);
        self
    }

    pub fn has_item(&self, item: &Item) -> bool {
        self.inventory.contains(item)
    }

    pub fn is_alive(&self) -> bool {
        self.health.current_hp > 0
    }
}
