//! Item function library
//!
//! Pure helpers deriving display strings, sell values, and combat numbers
//! from rolled items.

use serde::{Deserialize, Serialize};

use super::affix::{RolledAffix, ValueFormat};
use super::item::ItemInstance;
use super::rarity::{AffixCounts, Rarity};

/// Stat names the library formulas read
pub mod stat {
    pub const PHYSICAL_DAMAGE: &str = "Physical Damage";
    pub const INCREASED_PHYSICAL_DAMAGE: &str = "Increased Physical Damage";
    pub const ARMOUR: &str = "Armour";
    pub const INCREASED_ARMOUR: &str = "Increased Armour";
    pub const MAXIMUM_LIFE: &str = "Maximum Life";
    pub const STRENGTH: &str = "Strength";
    pub const DEXTERITY: &str = "Dexterity";
    pub const INTELLIGENCE: &str = "Intelligence";
}

/// Resistances never mitigate more than this (percent)
pub const MAX_RESISTANCE: i32 = 75;
/// Resistances never drop below this (percent)
pub const MIN_RESISTANCE: i32 = -100;

/// Damage elements with a matching resistance stat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Cold,
    Lightning,
    Poison,
}

impl Element {
    pub fn resistance_stat(&self) -> &'static str {
        match self {
            Element::Fire => "Fire Resistance",
            Element::Cold => "Cold Resistance",
            Element::Lightning => "Lightning Resistance",
            Element::Poison => "Poison Resistance",
        }
    }

    pub fn all() -> &'static [Element] {
        &[Element::Fire, Element::Cold, Element::Lightning, Element::Poison]
    }
}

/// Tooltip line for one affix, e.g. "+12 Strength" or "+15% Fire Resistance"
pub fn format_affix(affix: &RolledAffix) -> String {
    let sign = if affix.value < 0 { "-" } else { "+" };
    let percent = match affix.format {
        ValueFormat::Flat => "",
        ValueFormat::Percent => "%",
    };
    let line = format!("{}{}{} {}", sign, affix.value.unsigned_abs(), percent, affix.stat);
    if affix.corrupted {
        format!("{} (corrupted)", line)
    } else {
        line
    }
}

/// Prefix/suffix count bounds for a grade
pub fn affix_counts(rarity: Rarity) -> AffixCounts {
    rarity.affix_counts()
}

pub fn value_multiplier(rarity: Rarity) -> f32 {
    rarity.value_multiplier()
}

/// Stat total as the owner experiences it: rolled affixes only count once identified
pub fn effective_stat(item: &ItemInstance, stat: &str) -> i32 {
    let stats = &item.stats;
    let fixed: i32 = stats
        .implicits
        .iter()
        .chain(stats.crafted.iter())
        .filter(|a| a.stat == stat)
        .map(|a| a.value)
        .sum();
    if item.identified {
        fixed + stats.rolled().filter(|a| a.stat == stat).map(|a| a.value).sum::<i32>()
    } else {
        fixed
    }
}

/// Gold value of an item
///
/// `base * grade multiplier * (1 + 2% per item level) * (1 + 10% per positive
/// affix) * 0.85 per corrupted affix`, halved while unidentified. Never below 1.
pub fn item_value(item: &ItemInstance) -> u32 {
    let positive = item.stats.positive_affix_count() as f32;
    let corrupted = item.stats.corrupted_count() as i32;

    let mut value = item.base.base_value as f32
        * value_multiplier(item.rarity)
        * (1.0 + 0.02 * item.level as f32)
        * (1.0 + 0.1 * positive)
        * 0.85f32.powi(corrupted);

    if !item.identified {
        value *= 0.5;
    }

    (value.floor() as u32).max(1)
}

/// Weapon damage range after flat and percent physical modifiers
pub fn weapon_damage(item: &ItemInstance) -> Option<(i32, i32)> {
    let (min, max) = item.base.damage?;
    let flat = effective_stat(item, stat::PHYSICAL_DAMAGE);
    let increased = effective_stat(item, stat::INCREASED_PHYSICAL_DAMAGE);
    let scale = (1.0 + increased as f32 / 100.0).max(0.0);

    let min = (((min + flat) as f32) * scale).floor().max(0.0) as i32;
    let max = (((max + flat) as f32) * scale).floor().max(0.0) as i32;
    Some((min, max.max(min)))
}

/// Armour rating after flat and percent armour modifiers
pub fn item_armour(item: &ItemInstance) -> i32 {
    let flat = item.base.armour + effective_stat(item, stat::ARMOUR);
    let increased = effective_stat(item, stat::INCREASED_ARMOUR);
    let scale = (1.0 + increased as f32 / 100.0).max(0.0);
    ((flat as f32) * scale).floor().max(0.0) as i32
}

/// Physical damage left after armour
///
/// Armour absorbs `raw * armour / (armour + 10 * raw)`, so it is strong
/// against small hits and weak against big ones.
pub fn mitigate_damage(raw: f32, armour: i32) -> f32 {
    if raw <= 0.0 {
        return 0.0;
    }
    if armour <= 0 {
        return raw;
    }
    let armour = armour as f32;
    let reduction = raw * armour / (armour + 10.0 * raw);
    (raw - reduction).max(0.0)
}

/// Clamp a resistance into the allowed band
pub fn clamp_resistance(resistance: i32) -> i32 {
    resistance.clamp(MIN_RESISTANCE, MAX_RESISTANCE)
}

/// Elemental damage left after resistance; negative resistance amplifies
pub fn resisted_damage(raw: f32, resistance: i32) -> f32 {
    if raw <= 0.0 {
        return 0.0;
    }
    raw * (1.0 - clamp_resistance(resistance) as f32 / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::affix::{AffixSlot, AffixTemplate, ItemSubType};
    use crate::items::item::ItemBase;
    use crate::items::stats::ItemStats;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fixed(stat: &str, slot: AffixSlot, value: i32, rng: &mut StdRng) -> RolledAffix {
        let mut t = AffixTemplate::new(stat, stat, slot, value, value, 1);
        t.corrupted = value < 0;
        t.roll(rng)
    }

    fn sword() -> ItemBase {
        let mut base = ItemBase::new("iron_sword", "Iron Sword", ItemSubType::Sword, 100);
        base.damage = Some((10, 20));
        base
    }

    #[test]
    fn test_format_affix() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(format_affix(&fixed("Strength", AffixSlot::Suffix, 12, &mut rng)), "+12 Strength");
        assert_eq!(format_affix(&fixed("Dexterity", AffixSlot::Suffix, -4, &mut rng)), "-4 Dexterity (corrupted)");

        let t = AffixTemplate::new("fr", "Fire Resistance", AffixSlot::Suffix, 15, 15, 1).percent();
        assert_eq!(format_affix(&t.roll(&mut rng)), "+15% Fire Resistance");
    }

    #[test]
    fn test_item_value() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut item = ItemInstance::new(sword(), 0, Rarity::F, ItemStats::new());
        assert_eq!(item_value(&item), 100);

        item.rarity = Rarity::C;
        assert_eq!(item_value(&item), 200);

        item.stats.push(fixed("Strength", AffixSlot::Suffix, 5, &mut rng));
        // 100 * 2.0 * 1.1
        assert_eq!(item_value(&item), 220);

        item.stats.push(fixed("Dexterity", AffixSlot::Prefix, -5, &mut rng));
        // 220 * 0.85
        assert_eq!(item_value(&item), 187);

        item.identified = false;
        assert_eq!(item_value(&item), 93);
    }

    #[test]
    fn test_item_value_floor() {
        let base = ItemBase::new("rag", "Rag", ItemSubType::Belt, 0);
        let item = ItemInstance::new(base, 1, Rarity::F, ItemStats::new());
        assert_eq!(item_value(&item), 1);
    }

    #[test]
    fn test_weapon_damage() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut stats = ItemStats::new();
        stats.push(fixed(stat::PHYSICAL_DAMAGE, AffixSlot::Prefix, 5, &mut rng));
        stats.push(fixed(stat::INCREASED_PHYSICAL_DAMAGE, AffixSlot::Prefix, 20, &mut rng));
        let mut item = ItemInstance::new(sword(), 10, Rarity::C, stats);

        // Unidentified rolls don't count yet
        assert_eq!(weapon_damage(&item), Some((10, 20)));
        item.identify();
        // (10+5)*1.2, (20+5)*1.2
        assert_eq!(weapon_damage(&item), Some((18, 30)));

        let helm = ItemInstance::new(ItemBase::new("cap", "Cap", ItemSubType::Helmet, 5), 1, Rarity::F, ItemStats::new());
        assert_eq!(weapon_damage(&helm), None);
    }

    #[test]
    fn test_item_armour() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut base = ItemBase::new("plate", "Plate", ItemSubType::Chest, 50);
        base.armour = 40;
        let mut stats = ItemStats::new();
        stats.push(fixed(stat::ARMOUR, AffixSlot::Implicit, 10, &mut rng));
        stats.push(fixed(stat::INCREASED_ARMOUR, AffixSlot::Suffix, 50, &mut rng));
        let mut item = ItemInstance::new(base, 1, Rarity::D, stats);

        assert_eq!(item_armour(&item), 50);
        item.identify();
        assert_eq!(item_armour(&item), 75);
    }

    #[test]
    fn test_mitigation() {
        assert_eq!(mitigate_damage(100.0, 0), 100.0);
        assert_eq!(mitigate_damage(-5.0, 100), 0.0);
        // 10 raw vs 100 armour: reduction 10*100/(100+100) = 5
        assert!((mitigate_damage(10.0, 100) - 5.0).abs() < f32::EPSILON);
        // Big hits are barely reduced
        assert!(mitigate_damage(1000.0, 100) > 990.0);
    }

    #[test]
    fn test_resistance() {
        assert_eq!(resisted_damage(100.0, 0), 100.0);
        assert_eq!(resisted_damage(100.0, 50), 50.0);
        assert_eq!(resisted_damage(100.0, 90), 25.0);
        assert_eq!(resisted_damage(100.0, -50), 150.0);
        assert_eq!(resisted_damage(100.0, -500), 200.0);
        assert_eq!(clamp_resistance(80), MAX_RESISTANCE);
    }
}
