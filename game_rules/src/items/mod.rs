//! Items and the catalog that resolves item identifiers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of an item definition, e.g. `"healing_potion"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Resolves item identifiers to item definitions.
pub trait ItemCatalog {
    /// Look up an item by identifier. `None` if the identifier is unknown.
    fn get_item(&self, id: &str) -> Option<&Item>;
}

/// In-memory item catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRepository {
    items: HashMap<ItemId, Item>,
}

#[derive(Deserialize)]
struct ItemsDocument {
    items: Vec<Item>,
}

impl ItemRepository {
    /// Create a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"items": [...]}` document.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let document: ItemsDocument = serde_json::from_str(json)?;
        let mut repository = Self::new();
        for item in document.items {
            repository.add_item(item);
        }
        Ok(repository)
    }

    /// Add or replace an item definition.
    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for ItemRepository {
    fn get_item(&self, id: &str) -> Option<&Item> {
        self.items.get(&ItemId::new(id))
    }
}
