//! Affix pool definitions
//!
//! The authored prefix/suffix rows the generator draws from, loadable from
//! `affixes.ron`.

use serde::{Deserialize, Serialize};

use crate::items::affix::{AffixSlot, AffixTemplate, ItemType};
use crate::items::library::stat;

/// Collection of affix templates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AffixPool {
    pub affixes: Vec<AffixTemplate>,
}

impl AffixPool {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&AffixTemplate> {
        self.affixes.iter().find(|a| a.id == id)
    }

    /// Templates for one slot
    pub fn by_slot(&self, slot: AffixSlot) -> Vec<&AffixTemplate> {
        self.affixes.iter().filter(|a| a.slot == slot).collect()
    }

    pub fn corrupted(&self) -> Vec<&AffixTemplate> {
        self.affixes.iter().filter(|a| a.corrupted).collect()
    }
}

const WEAPON: &[ItemType] = &[ItemType::Weapon];
const ARMOUR: &[ItemType] = &[ItemType::Armour];
const WORN: &[ItemType] = &[ItemType::Armour, ItemType::Jewellery];
const JEWELLERY: &[ItemType] = &[ItemType::Jewellery];

fn prefix(id: &str, stat: &str, name: &str, level: u32, range: (i32, i32), weight: u32, types: &[ItemType]) -> AffixTemplate {
    AffixTemplate::new(id, stat, AffixSlot::Prefix, range.0, range.1, weight)
        .with_types(types)
        .with_levels(level, u32::MAX)
        .with_name(name)
}

fn suffix(id: &str, stat: &str, name: &str, level: u32, range: (i32, i32), weight: u32, types: &[ItemType]) -> AffixTemplate {
    AffixTemplate::new(id, stat, AffixSlot::Suffix, range.0, range.1, weight)
        .with_types(types)
        .with_levels(level, u32::MAX)
        .with_name(name)
}

/// Create the built-in affix pool
pub fn default_affix_pool() -> AffixPool {
    let affixes = vec![
        // ===== PREFIXES =====
        prefix("phys_flat_1", stat::PHYSICAL_DAMAGE, "Sharp", 1, (2, 5), 1000, WEAPON),
        prefix("phys_flat_2", stat::PHYSICAL_DAMAGE, "Honed", 15, (6, 12), 800, WEAPON),
        prefix("phys_flat_3", stat::PHYSICAL_DAMAGE, "Razor", 35, (13, 22), 500, WEAPON),
        prefix("phys_flat_4", stat::PHYSICAL_DAMAGE, "Tyrannical", 60, (23, 35), 250, WEAPON),
        prefix("phys_pct_1", stat::INCREASED_PHYSICAL_DAMAGE, "Heavy", 1, (10, 19), 1000, WEAPON).percent(),
        prefix("phys_pct_2", stat::INCREASED_PHYSICAL_DAMAGE, "Serrated", 20, (20, 34), 700, WEAPON).percent(),
        prefix("phys_pct_3", stat::INCREASED_PHYSICAL_DAMAGE, "Merciless", 45, (35, 59), 300, WEAPON).percent(),
        prefix("fire_flat_1", "Fire Damage", "Flaming", 5, (3, 7), 800, WEAPON),
        prefix("fire_flat_2", "Fire Damage", "Searing", 30, (8, 16), 400, WEAPON),
        prefix("cold_flat_1", "Cold Damage", "Chilling", 5, (3, 7), 800, WEAPON),
        prefix("cold_flat_2", "Cold Damage", "Freezing", 30, (8, 16), 400, WEAPON),
        prefix("lightning_flat_1", "Lightning Damage", "Humming", 8, (1, 10), 700, WEAPON),
        prefix("life_1", stat::MAXIMUM_LIFE, "Healthy", 1, (10, 24), 1000, WORN),
        prefix("life_2", stat::MAXIMUM_LIFE, "Vigorous", 25, (25, 49), 700, WORN),
        prefix("life_3", stat::MAXIMUM_LIFE, "Virile", 50, (50, 79), 300, WORN),
        prefix("armour_flat_1", stat::ARMOUR, "Reinforced", 1, (5, 15), 1000, ARMOUR),
        prefix("armour_flat_2", stat::ARMOUR, "Fortified", 25, (16, 40), 600, ARMOUR),
        prefix("armour_pct_1", stat::INCREASED_ARMOUR, "Sturdy", 3, (10, 25), 900, ARMOUR).percent(),
        prefix("armour_pct_2", stat::INCREASED_ARMOUR, "Adamantine", 35, (26, 50), 400, ARMOUR).percent(),
        prefix("mana_1", "Maximum Mana", "Mystic", 1, (10, 30), 800, JEWELLERY),
        prefix("rarity_1", "Increased Item Rarity", "Lucky", 10, (5, 15), 400, JEWELLERY).percent(),
        // ===== SUFFIXES =====
        suffix("str_1", stat::STRENGTH, "of the Brute", 1, (3, 8), 1000, &[]),
        suffix("str_2", stat::STRENGTH, "of the Bear", 20, (9, 18), 600, &[]),
        suffix("str_3", stat::STRENGTH, "of the Titan", 50, (19, 30), 250, &[]),
        suffix("dex_1", stat::DEXTERITY, "of the Fox", 1, (3, 8), 1000, &[]),
        suffix("dex_2", stat::DEXTERITY, "of the Lynx", 20, (9, 18), 600, &[]),
        suffix("int_1", stat::INTELLIGENCE, "of the Pupil", 1, (3, 8), 1000, &[]),
        suffix("int_2", stat::INTELLIGENCE, "of the Sage", 20, (9, 18), 600, &[]),
        suffix("fire_res_1", "Fire Resistance", "of the Ember", 1, (6, 15), 900, WORN).percent(),
        suffix("fire_res_2", "Fire Resistance", "of the Furnace", 30, (16, 30), 500, WORN).percent(),
        suffix("cold_res_1", "Cold Resistance", "of the Seal", 1, (6, 15), 900, WORN).percent(),
        suffix("cold_res_2", "Cold Resistance", "of the Yeti", 30, (16, 30), 500, WORN).percent(),
        suffix("lightning_res_1", "Lightning Resistance", "of the Cloud", 1, (6, 15), 900, WORN).percent(),
        suffix("poison_res_1", "Poison Resistance", "of the Antidote", 10, (6, 15), 600, WORN).percent(),
        suffix("crit_1", "Critical Strike Chance", "of Precision", 10, (5, 10), 600, WEAPON).percent(),
        suffix("speed_1", "Attack Speed", "of Skill", 5, (5, 9), 700, WEAPON).percent(),
        suffix("regen_1", "Life Regeneration", "of Mending", 5, (1, 4), 600, WORN),
        // ===== CORRUPTED =====
        prefix("cursed_life", stat::MAXIMUM_LIFE, "Withered", 1, (-30, -10), 500, WORN).corrupted(),
        prefix("cursed_armour", stat::ARMOUR, "Brittle", 1, (-20, -5), 500, ARMOUR).corrupted(),
        prefix("cursed_phys", stat::INCREASED_PHYSICAL_DAMAGE, "Dull", 1, (-20, -8), 500, WEAPON)
            .percent()
            .corrupted(),
        suffix("cursed_str", stat::STRENGTH, "of Frailty", 1, (-8, -2), 500, &[]).corrupted(),
        suffix("cursed_dex", stat::DEXTERITY, "of Clumsiness", 1, (-8, -2), 500, &[]).corrupted(),
        suffix("cursed_fire_res", "Fire Resistance", "of Kindling", 1, (-30, -10), 400, WORN)
            .percent()
            .corrupted(),
        suffix("cursed_cold_res", "Cold Resistance", "of the Thaw", 1, (-30, -10), 400, WORN)
            .percent()
            .corrupted(),
    ];

    AffixPool { affixes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_pool_valid() {
        let pool = default_affix_pool();
        let mut ids = HashSet::new();
        for affix in &pool.affixes {
            assert!(affix.validate().is_ok(), "{} failed validation", affix.id);
            assert!(ids.insert(affix.id.clone()), "duplicate id {}", affix.id);
            assert!(affix.name.is_some());
        }
    }

    #[test]
    fn test_pool_has_both_slots_and_corruption() {
        let pool = default_affix_pool();
        assert!(!pool.by_slot(AffixSlot::Prefix).is_empty());
        assert!(!pool.by_slot(AffixSlot::Suffix).is_empty());
        assert!(pool.corrupted().iter().all(|a| a.max <= 0));
        assert!(pool.find("str_2").is_some());
    }
}
