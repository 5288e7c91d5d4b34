//! Base item catalogue
//!
//! Base items loadable from `bases.ron`.

use serde::{Deserialize, Serialize};

use crate::items::affix::{AffixSlot, AffixTemplate, ItemSubType};
use crate::items::item::ItemBase;
use crate::items::library::stat;

/// Collection of base items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseCatalogue {
    pub bases: Vec<ItemBase>,
}

impl BaseCatalogue {
    /// Find a base by ID
    pub fn find(&self, id: &str) -> Option<&ItemBase> {
        self.bases.iter().find(|b| b.id == id)
    }

    pub fn by_subtype(&self, subtype: ItemSubType) -> Vec<&ItemBase> {
        self.bases.iter().filter(|b| b.subtype == subtype).collect()
    }

    /// Bases a character of `level` can equip
    pub fn usable_at(&self, level: u32) -> Vec<&ItemBase> {
        self.bases.iter().filter(|b| b.required_level <= level).collect()
    }
}

fn implicit(id: &str, stat: &str, range: (i32, i32)) -> AffixTemplate {
    AffixTemplate::new(id, stat, AffixSlot::Implicit, range.0, range.1, 1)
}

fn weapon(id: &str, name: &str, subtype: ItemSubType, level: u32, value: u32, damage: (i32, i32)) -> ItemBase {
    let mut base = ItemBase::new(id, name, subtype, value);
    base.required_level = level;
    base.damage = Some(damage);
    base
}

fn armour(id: &str, name: &str, subtype: ItemSubType, level: u32, value: u32, armour: i32) -> ItemBase {
    let mut base = ItemBase::new(id, name, subtype, value);
    base.required_level = level;
    base.armour = armour;
    base
}

fn jewellery(id: &str, name: &str, subtype: ItemSubType, level: u32, value: u32, implicits: Vec<AffixTemplate>) -> ItemBase {
    let mut base = ItemBase::new(id, name, subtype, value);
    base.required_level = level;
    base.implicits = implicits;
    base
}

/// Create the built-in base catalogue, covering every subtype
pub fn default_base_catalogue() -> BaseCatalogue {
    let mut rusty_dagger = weapon("rusty_dagger", "Rusty Dagger", ItemSubType::Dagger, 1, 20, (2, 6));
    rusty_dagger.implicits.push(implicit("dagger_crit", "Critical Strike Chance", (3, 5)).percent());

    let mut iron_sword = weapon("iron_sword", "Iron Sword", ItemSubType::Sword, 1, 40, (4, 9));
    iron_sword.implicits.push(implicit("sword_accuracy", "Accuracy Rating", (10, 20)));

    let mut oak_staff = weapon("oak_staff", "Oak Staff", ItemSubType::Staff, 3, 45, (5, 11));
    oak_staff.implicits.push(implicit("staff_mana", "Maximum Mana", (15, 25)));

    let mut kite_shield = armour("kite_shield", "Kite Shield", ItemSubType::Shield, 8, 50, 18);
    kite_shield.implicits.push(implicit("shield_block", "Block Chance", (5, 8)).percent());

    let mut leather_boots = armour("leather_boots", "Leather Boots", ItemSubType::Boots, 1, 25, 5);
    leather_boots.implicits.push(implicit("boots_speed", "Movement Speed", (3, 5)).percent());

    let bases = vec![
        // Weapons
        iron_sword,
        weapon("broad_axe", "Broad Axe", ItemSubType::Axe, 5, 55, (6, 13)),
        weapon("war_axe", "War Axe", ItemSubType::Axe, 30, 140, (18, 34)),
        rusty_dagger,
        weapon("short_bow", "Short Bow", ItemSubType::Bow, 1, 35, (3, 10)),
        oak_staff,
        // Armour
        armour("leather_cap", "Leather Cap", ItemSubType::Helmet, 1, 20, 6),
        armour("chain_hauberk", "Chain Hauberk", ItemSubType::Chest, 10, 70, 24),
        armour("plate_cuirass", "Plate Cuirass", ItemSubType::Chest, 30, 150, 45),
        armour("wool_gloves", "Wool Gloves", ItemSubType::Gloves, 1, 15, 4),
        leather_boots,
        kite_shield,
        // Jewellery
        jewellery("iron_ring", "Iron Ring", ItemSubType::Ring, 1, 30, vec![implicit("ring_life", stat::MAXIMUM_LIFE, (5, 10))]),
        jewellery(
            "coral_amulet",
            "Coral Amulet",
            ItemSubType::Amulet,
            5,
            45,
            vec![implicit("amulet_regen", "Life Regeneration", (1, 2))],
        ),
        jewellery(
            "leather_belt",
            "Leather Belt",
            ItemSubType::Belt,
            1,
            25,
            vec![implicit("belt_life", stat::MAXIMUM_LIFE, (10, 20))],
        ),
    ];

    BaseCatalogue { bases }
}
