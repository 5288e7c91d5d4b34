//! Equipment system
//!
//! Manages equipped items and totals their identified modifiers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::affix::ItemSubType;
use super::item::ItemInstance;
use super::library::{self, Element};
use crate::error::ItemError;

/// Damage range used when nothing is in the main hand
pub const UNARMED_DAMAGE: (i32, i32) = (1, 2);

/// Character equipment slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    MainHand,
    OffHand,
    Head,
    Body,
    Hands,
    Feet,
    Amulet,
    Ring1,
    Ring2,
    Belt,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::MainHand => "Main Hand",
            EquipSlot::OffHand => "Off Hand",
            EquipSlot::Head => "Head",
            EquipSlot::Body => "Body",
            EquipSlot::Hands => "Hands",
            EquipSlot::Feet => "Feet",
            EquipSlot::Amulet => "Amulet",
            EquipSlot::Ring1 => "Ring 1",
            EquipSlot::Ring2 => "Ring 2",
            EquipSlot::Belt => "Belt",
        }
    }

    /// Get all slots in display order
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::MainHand,
            EquipSlot::OffHand,
            EquipSlot::Head,
            EquipSlot::Body,
            EquipSlot::Hands,
            EquipSlot::Feet,
            EquipSlot::Amulet,
            EquipSlot::Ring1,
            EquipSlot::Ring2,
            EquipSlot::Belt,
        ]
    }

    /// Default slot for a base kind (rings start in Ring1)
    pub fn for_subtype(subtype: ItemSubType) -> EquipSlot {
        match subtype {
            ItemSubType::Sword
            | ItemSubType::Axe
            | ItemSubType::Dagger
            | ItemSubType::Bow
            | ItemSubType::Staff => EquipSlot::MainHand,
            ItemSubType::Shield => EquipSlot::OffHand,
            ItemSubType::Helmet => EquipSlot::Head,
            ItemSubType::Chest => EquipSlot::Body,
            ItemSubType::Gloves => EquipSlot::Hands,
            ItemSubType::Boots => EquipSlot::Feet,
            ItemSubType::Ring => EquipSlot::Ring1,
            ItemSubType::Amulet => EquipSlot::Amulet,
            ItemSubType::Belt => EquipSlot::Belt,
        }
    }
}

/// Character equipment slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Equipment {
    slots: HashMap<EquipSlot, ItemInstance>,
}

impl Equipment {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Equip an item, returning the previously equipped item if any
    ///
    /// Rings go to the first free ring slot, replacing Ring1 when both are taken.
    pub fn equip(&mut self, item: ItemInstance, character_level: u32) -> Result<Option<ItemInstance>, ItemError> {
        let required = item.base.required_level;
        if character_level < required {
            return Err(ItemError::LevelTooLow {
                name: item.display_name(),
                required,
                level: character_level,
                item: Box::new(item),
            });
        }

        let slot = match EquipSlot::for_subtype(item.base.subtype) {
            EquipSlot::Ring1 if !self.is_empty(EquipSlot::Ring1) && self.is_empty(EquipSlot::Ring2) => EquipSlot::Ring2,
            slot => slot,
        };

        log::debug!("Equipped {} in {}", item.display_name(), slot.name());
        Ok(self.slots.insert(slot, item))
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<ItemInstance> {
        self.slots.remove(&slot)
    }

    /// Get item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&ItemInstance> {
        self.slots.get(&slot)
    }

    /// Get mutable reference to item in a slot
    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut ItemInstance> {
        self.slots.get_mut(&slot)
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Get all equipped items
    pub fn all_items(&self) -> impl Iterator<Item = &ItemInstance> {
        self.slots.values()
    }

    /// Total of a stat across equipped items (unidentified rolls excluded)
    pub fn stat_total(&self, stat: &str) -> i32 {
        self.slots
            .values()
            .map(|item| library::effective_stat(item, stat))
            .sum()
    }

    /// Calculate total armour from all equipment
    pub fn total_armour(&self) -> i32 {
        self.slots.values().map(library::item_armour).sum()
    }

    /// Main hand damage range, or unarmed
    pub fn weapon_damage(&self) -> (i32, i32) {
        self.get(EquipSlot::MainHand)
            .and_then(library::weapon_damage)
            .unwrap_or(UNARMED_DAMAGE)
    }

    /// Resistance to an element, clamped to the allowed band
    pub fn resistance(&self, element: Element) -> i32 {
        library::clamp_resistance(self.stat_total(element.resistance_stat()))
    }

    /// Physical damage taken after equipment armour
    pub fn mitigate_physical(&self, raw: f32) -> f32 {
        library::mitigate_damage(raw, self.total_armour())
    }

    /// Elemental damage taken after equipment resistance
    pub fn mitigate_elemental(&self, element: Element, raw: f32) -> f32 {
        library::resisted_damage(raw, self.resistance(element))
    }
}
