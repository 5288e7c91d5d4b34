//! Data loading and external loot content
//!
//! This module handles loading affix pools, base items and generator
//! tunables from external RON files, allowing for data-driven content
//! and easy balancing.

pub mod loader;
pub mod affixes;
pub mod bases;

pub use loader::{DataManager, export_default_data};
pub use affixes::{AffixPool, default_affix_pool};
pub use bases::{BaseCatalogue, default_base_catalogue};
