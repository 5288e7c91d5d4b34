//! Progression systems

pub mod xp;

pub use xp::{Experience, MAX_LEVEL, drop_item_level, level_title, total_xp_for_level, xp_for_level};
