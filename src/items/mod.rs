//! Item system
//!
//! Affix templates, the weighted affix generator, rolled item instances,
//! and the containers that hold them.

pub mod affix;
pub mod rarity;
pub mod stats;
pub mod item;
pub mod generator;
pub mod library;
pub mod inventory;
pub mod equipment;
pub mod loot;

pub use affix::{AffixId, AffixSlot, AffixTemplate, ItemSubType, ItemType, RolledAffix, ValueFormat};
pub use rarity::{AffixCounts, Rarity, roll_rarity, roll_rarity_with_minimum};
pub use stats::ItemStats;
pub use item::{ItemBase, ItemId, ItemInstance, next_item_id};
pub use generator::{AffixGenerator, GeneratorConfig};
pub use library::Element;
pub use inventory::{Inventory, SortMode};
pub use equipment::{Equipment, EquipSlot};
pub use loot::{generate_boss_loot, generate_drop, generate_enemy_loot, generate_gold_drop, minimum_rarity_for_level};
