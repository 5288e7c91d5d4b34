//! Error types
//!
//! Generation and crafting failures live in [`AffixError`]; data file
//! loading and export failures in [`DataError`]; inventory and equipment
//! moves in [`ItemError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::items::affix::AffixSlot;
use crate::items::item::{ItemId, ItemInstance};

/// Errors raised by the affix engine
#[derive(Debug, Error)]
pub enum AffixError {
    #[error("invalid affix template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },

    #[error("duplicate affix template id '{0}'")]
    DuplicateTemplate(String),

    #[error("unknown affix template '{0}'")]
    UnknownTemplate(String),

    #[error("template '{id}' has slot {slot:?}, expected {expected}")]
    WrongSlot {
        id: String,
        slot: AffixSlot,
        expected: &'static str,
    },

    #[error("cannot craft onto item: {0}")]
    CraftRejected(String),

    #[error("candidate weights rejected: {0}")]
    Weights(#[from] rand::distributions::WeightedError),
}

/// Errors raised while reading or writing data files
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: ron::Error,
    },

    #[error(transparent)]
    Affix(#[from] AffixError),
}

/// Errors raised when moving items into or out of containers
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("inventory is full ({capacity} items)")]
    InventoryFull {
        capacity: usize,
        item: Box<ItemInstance>,
    },

    #[error("no item with id {0}")]
    NotFound(ItemId),

    #[error("{name} requires level {required}, character is level {level}")]
    LevelTooLow {
        name: String,
        required: u32,
        level: u32,
        item: Box<ItemInstance>,
    },
}

impl ItemError {
    /// Recover the item a failed move handed back
    pub fn into_item(self) -> Option<ItemInstance> {
        match self {
            ItemError::InventoryFull { item, .. } | ItemError::LevelTooLow { item, .. } => Some(*item),
            ItemError::NotFound(_) => None,
        }
    }
}
