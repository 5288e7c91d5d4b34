//! Inventory system
//!
//! A capacity-bounded bag of rolled items plus the character's gold.

use serde::{Deserialize, Serialize};

use super::item::{ItemId, ItemInstance};
use crate::error::ItemError;

/// Default number of items a character can carry
pub const DEFAULT_CAPACITY: usize = 40;

/// Sort orders for the item list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortMode {
    /// Highest grade first
    Rarity,
    /// Most valuable first
    Value,
    /// Highest item level first
    Level,
}

/// Character inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    items: Vec<ItemInstance>,
    capacity: usize,
    gold: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
            gold: 0,
        }
    }

    /// Get current number of items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Add an item; a full inventory hands the item back inside the error
    pub fn add_item(&mut self, item: ItemInstance) -> Result<(), ItemError> {
        if self.is_full() {
            return Err(ItemError::InventoryFull {
                capacity: self.capacity,
                item: Box::new(item),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by ID
    pub fn remove_by_id(&mut self, id: ItemId) -> Option<ItemInstance> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    /// Get item by ID
    pub fn get_by_id(&self, id: ItemId) -> Option<&ItemInstance> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn get_by_id_mut(&mut self, id: ItemId) -> Option<&mut ItemInstance> {
        self.items.iter_mut().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[ItemInstance] {
        &self.items
    }

    /// Identify every item, returning how many were newly identified
    pub fn identify_all(&mut self) -> usize {
        let mut identified = 0;
        for item in &mut self.items {
            if item.identify() {
                identified += 1;
            }
        }
        identified
    }

    /// Sell an item, crediting its value. Returns the gold received.
    pub fn sell(&mut self, id: ItemId) -> Result<u32, ItemError> {
        let item = self.remove_by_id(id).ok_or(ItemError::NotFound(id))?;
        let value = item.value();
        self.add_gold(value);
        log::info!("Sold {} for {} gold", item.display_name(), value);
        Ok(value)
    }

    /// Sum of item values
    pub fn total_value(&self) -> u64 {
        self.items.iter().map(|i| i.value() as u64).sum()
    }

    pub fn sort_by(&mut self, mode: SortMode) {
        match mode {
            SortMode::Rarity => self.items.sort_by(|a, b| b.rarity.cmp(&a.rarity)),
            SortMode::Value => self.items.sort_by_key(|i| std::cmp::Reverse(i.value())),
            SortMode::Level => self.items.sort_by_key(|i| std::cmp::Reverse(i.level)),
        }
    }

    /// Get current gold
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Add gold
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, returns false if not enough
    pub fn spend_gold(&mut self, amount: u32) -> bool {
        if self.gold >= amount {
            self.gold -= amount;
            true
        } else {
            false
        }
    }
}
