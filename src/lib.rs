//! Hunter Loot - procedural item affixes for the Project Hunter action RPG
//!
//! Rolls prefixes and suffixes onto base items by rarity grade (F to SS),
//! with corrupted negative affixes, crafting, and the value and combat
//! formulas derived from the rolls.

pub mod error;
pub mod items;
pub mod progression;
pub mod data;

// Re-export commonly used types
pub use error::{AffixError, DataError, ItemError};
pub use items::{AffixGenerator, AffixTemplate, GeneratorConfig, ItemBase, ItemInstance, ItemStats, Rarity};
pub use data::DataManager;
