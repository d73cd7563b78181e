//! Component definitions for entities.

use serde::{Deserialize, Serialize};

use crate::items::{Item, ItemId};

/// Health component for characters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthComponent {
    pub current_hp: i32,
    pub max_hp: i32,
}

impl Default for HealthComponent {
    fn default() -> Self {
        Self {
            current_hp: 100,
            max_hp: 100,
        }
    }
}

impl HealthComponent {
    /// Apply damage, clamping at zero. Returns the remaining hit points.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        self.current_hp = (self.current_hp - amount.max(0)).max(0);
        self.current_hp
    }
}

/// Inventory component for entities that can hold items.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InventoryComponent {
    pub items: Vec<ItemStack>,
}

/// A stack of items in inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemStack {
    pub item_id: ItemId,
    pub quantity: u32,
}

impl InventoryComponent {
    /// Add `quantity` of an item, merging into an existing stack.
    pub fn add(&mut self, item_id: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|s| s.item_id == item_id) {
            Some(stack) => stack.quantity += quantity,
            None => self.items.push(ItemStack { item_id, quantity }),
        }
    }

    /// Remove up to `quantity` of an item. Returns how many were removed.
    pub fn remove(&mut self, item_id: &ItemId, quantity: u32) -> u32 {
        let Some(pos) = self.items.iter().position(|s| &s.item_id == item_id) else {
            return 0;
        };
        let stack = &mut self.items[pos];
        let removed = stack.quantity.min(quantity);
        stack.quantity -= removed;
        if stack.quantity == 0 {
            self.items.remove(pos);
        }
        removed
    }

    pub fn quantity(&self, item_id: &ItemId) -> u32 {
        self.items
            .iter()
            .find(|s| &s.item_id == item_id)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    /// Check whether at least one of the item is held.
    pub fn contains(&self, item: &Item) -> bool {
        self.quantity(&item.id) > 0
    }
}
