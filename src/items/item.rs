//! Item definitions
//!
//! Base item rows and the rolled item instances built from them.

use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::affix::{AffixSlot, AffixTemplate, ItemSubType, ItemType};
use super::library;
use super::rarity::Rarity;
use super::stats::ItemStats;
use crate::error::AffixError;

/// Unique item ID for tracking
pub type ItemId = u64;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Get next unique item ID
pub fn next_item_id() -> ItemId {
    NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed)
}

/// A base item row: what an item is before any affixes roll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemBase {
    /// Catalogue id (e.g. "iron_sword")
    pub id: String,
    pub name: String,
    pub subtype: ItemSubType,
    /// Character level needed to equip
    #[serde(default)]
    pub required_level: u32,
    /// Gold value before rarity and affixes
    pub base_value: u32,
    /// Physical damage range (weapons only)
    #[serde(default)]
    pub damage: Option<(i32, i32)>,
    #[serde(default)]
    pub armour: i32,
    /// Modifiers always present on this base
    #[serde(default)]
    pub implicits: Vec<AffixTemplate>,
}

impl ItemBase {
    pub fn new(id: impl Into<String>, name: impl Into<String>, subtype: ItemSubType, base_value: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subtype,
            required_level: 0,
            base_value,
            damage: None,
            armour: 0,
            implicits: Vec::new(),
        }
    }

    pub fn item_type(&self) -> ItemType {
        self.subtype.item_type()
    }

    fn item_type_name(&self) -> &'static str {
        match self.item_type() {
            ItemType::Weapon => "Weapon",
            ItemType::Armour => "Armour",
            ItemType::Jewellery => "Jewellery",
        }
    }

    /// Check the base and its implicit rows
    pub fn validate(&self) -> Result<(), AffixError> {
        if let Some((min, max)) = self.damage {
            if min > max {
                return Err(AffixError::InvalidTemplate {
                    id: self.id.clone(),
                    reason: format!("damage min {} exceeds max {}", min, max),
                });
            }
        }
        for implicit in &self.implicits {
            implicit.validate()?;
            if implicit.slot != AffixSlot::Implicit {
                return Err(AffixError::WrongSlot {
                    id: implicit.id.clone(),
                    slot: implicit.slot,
                    expected: "Implicit",
                });
            }
        }
        Ok(())
    }

    /// Roll this base's implicit modifiers
    pub fn roll_implicits(&self, stats: &mut ItemStats, rng: &mut impl Rng) {
        for implicit in &self.implicits {
            stats.push(implicit.roll(rng));
        }
    }
}

/// One concrete item with its rolled modifiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemId,
    pub base: ItemBase,
    /// Item level the affixes were rolled at
    pub level: u32,
    pub rarity: Rarity,
    pub stats: ItemStats,
    /// Unidentified items hide their rolled affixes
    pub identified: bool,
}

impl ItemInstance {
    /// Wrap freshly rolled stats; low grades drop identified
    pub fn new(base: ItemBase, level: u32, rarity: Rarity, stats: ItemStats) -> Self {
        Self {
            id: next_item_id(),
            base,
            level,
            rarity,
            stats,
            identified: rarity.drops_identified(),
        }
    }

    /// Reveal affixes. Returns false if already identified.
    pub fn identify(&mut self) -> bool {
        if self.identified {
            false
        } else {
            self.identified = true;
            true
        }
    }

    pub fn is_corrupted(&self) -> bool {
        self.stats.is_corrupted()
    }

    /// Name including the first named prefix and suffix
    pub fn display_name(&self) -> String {
        if !self.identified {
            return format!("Unidentified {}", self.base.name);
        }

        let prefix = self.stats.prefixes.iter().find_map(|a| a.name.as_deref());
        let suffix = self.stats.suffixes.iter().find_map(|a| a.name.as_deref());

        let name = match (prefix, suffix) {
            (None, None) => self.base.name.clone(),
            (Some(p), None) => format!("{} {}", p, self.base.name),
            (None, Some(s)) => format!("{} {}", self.base.name, s),
            (Some(p), Some(s)) => format!("{} {} {}", p, self.base.name, s),
        };

        if self.is_corrupted() {
            format!("Corrupted {}", name)
        } else {
            name
        }
    }

    /// Gold value
    pub fn value(&self) -> u32 {
        library::item_value(self)
    }

    /// Tooltip body: header, implicits, then rolled and crafted lines
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = vec![
            self.display_name(),
            format!("{} {} (grade {}, item level {})", self.base.item_type_name(), self.base.subtype.name(), self.rarity, self.level),
        ];

        if let Some((min, max)) = library::weapon_damage(self) {
            lines.push(format!("Physical Damage: {}-{}", min, max));
        }
        let armour = library::item_armour(self);
        if armour > 0 {
            lines.push(format!("Armour: {}", armour));
        }

        lines.extend(self.stats.implicits.iter().map(library::format_affix));

        if self.identified {
            lines.extend(self.stats.rolled().map(library::format_affix));
        } else if self.stats.rolled().next().is_some() {
            lines.push("Unidentified".to_string());
        }

        lines.extend(self.stats.crafted.iter().map(|a| format!("{} (crafted)", library::format_affix(a))));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::affix::RolledAffix;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sword() -> ItemBase {
        let mut base = ItemBase::new("iron_sword", "Iron Sword", ItemSubType::Sword, 40);
        base.damage = Some((4, 9));
        base
    }

    fn named(stat: &str, slot: AffixSlot, name: &str, value: i32, rng: &mut StdRng) -> RolledAffix {
        let mut t = AffixTemplate::new(stat, stat, slot, value, value, 1).with_name(name);
        t.corrupted = value < 0;
        t.roll(rng)
    }

    #[test]
    fn test_ids_unique() {
        let a = next_item_id();
        let b = next_item_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_display_name() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = ItemStats::new();
        stats.push(named("Fire Damage", AffixSlot::Prefix, "Flaming", 5, &mut rng));
        stats.push(named("Strength", AffixSlot::Suffix, "of the Bear", 8, &mut rng));

        let mut item = ItemInstance::new(sword(), 10, Rarity::C, stats);
        assert_eq!(item.display_name(), "Unidentified Iron Sword");
        assert!(item.identify());
        assert!(!item.identify());
        assert_eq!(item.display_name(), "Flaming Iron Sword of the Bear");
    }

    #[test]
    fn test_corrupted_name() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = ItemStats::new();
        stats.push(named("Strength", AffixSlot::Suffix, "of Frailty", -4, &mut rng));
        let mut item = ItemInstance::new(sword(), 10, Rarity::B, stats);
        item.identify();
        assert_eq!(item.display_name(), "Corrupted Iron Sword of Frailty");
    }

    #[test]
    fn test_grade_f_drops_identified() {
        let item = ItemInstance::new(sword(), 1, Rarity::F, ItemStats::new());
        assert!(item.identified);
        assert_eq!(item.display_name(), "Iron Sword");
    }

    #[test]
    fn test_base_validation() {
        let mut base = sword();
        base.implicits.push(AffixTemplate::new("acc", "Accuracy", AffixSlot::Prefix, 5, 10, 1));
        assert!(matches!(base.validate(), Err(AffixError::WrongSlot { .. })));

        let mut base = sword();
        base.damage = Some((10, 2));
        assert!(base.validate().is_err());
    }

    #[test]
    fn test_tooltip_hides_rolled_until_identified() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = ItemStats::new();
        stats.push(named("Strength", AffixSlot::Suffix, "of the Bear", 8, &mut rng));
        let mut item = ItemInstance::new(sword(), 5, Rarity::D, stats);

        let lines = item.tooltip_lines();
        assert!(lines.iter().any(|l| l == "Unidentified"));
        assert!(!lines.iter().any(|l| l.contains("Strength")));

        item.identify();
        let lines = item.tooltip_lines();
        assert!(lines.iter().any(|l| l == "+8 Strength"));
    }
}
