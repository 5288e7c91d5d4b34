//! Loot drops
//!
//! Picks a base item and rarity for a kill and hands both to the affix
//! generator.

use rand::seq::SliceRandom;
use rand::Rng;

use super::generator::AffixGenerator;
use super::item::ItemInstance;
use super::rarity::{roll_rarity_with_minimum, Rarity};
use crate::data::BaseCatalogue;
use crate::error::AffixError;
use crate::progression::drop_item_level;

/// Chance (0.0-1.0) that a regular kill drops an item
pub const ITEM_DROP_CHANCE: f64 = 0.30;

/// Extra item levels on boss drops
pub const BOSS_ITEM_LEVEL_BONUS: u32 = 2;

/// Get minimum rarity based on character level
/// Level 1-19: F
/// Level 20-39: Minimum E
/// Level 40-59: Minimum D
/// Level 60+: Minimum C
pub fn minimum_rarity_for_level(level: u32) -> Rarity {
    match level {
        0..=19 => Rarity::F,
        20..=39 => Rarity::E,
        40..=59 => Rarity::D,
        _ => Rarity::C,
    }
}

/// Roll one item for a character of `level`
///
/// The base is any catalogue entry the character could equip, rolled at
/// `level + item_level_bonus`; returns `None` when the catalogue has
/// nothing usable.
pub fn generate_drop(
    generator: &AffixGenerator,
    catalogue: &BaseCatalogue,
    level: u32,
    item_level_bonus: u32,
    min_rarity: Rarity,
    rng: &mut impl Rng,
) -> Result<Option<ItemInstance>, AffixError> {
    let usable = catalogue.usable_at(level);
    let Some(base) = usable.choose(rng) else {
        log::warn!("No base items usable at level {}", level);
        return Ok(None);
    };

    let item_level = drop_item_level(level, item_level_bonus);
    let min_rarity = min_rarity.max(minimum_rarity_for_level(level));
    let rarity = roll_rarity_with_minimum(item_level, min_rarity, rng);
    generator.roll_item(base, item_level, rarity, rng).map(Some)
}

/// Generate random loot for an enemy kill
pub fn generate_enemy_loot(
    generator: &AffixGenerator,
    catalogue: &BaseCatalogue,
    level: u32,
    rng: &mut impl Rng,
) -> Result<Vec<ItemInstance>, AffixError> {
    if !rng.gen_bool(ITEM_DROP_CHANCE) {
        return Ok(Vec::new());
    }
    Ok(generate_drop(generator, catalogue, level, 0, Rarity::F, rng)?.into_iter().collect())
}

/// Generate boss loot - guaranteed drops one grade above the level minimum
/// Bosses always drop:
/// - 1 item at minimum rarity+1 for the level, rolled 2 levels higher
/// - 50% chance for a second one
pub fn generate_boss_loot(
    generator: &AffixGenerator,
    catalogue: &BaseCatalogue,
    level: u32,
    rng: &mut impl Rng,
) -> Result<Vec<ItemInstance>, AffixError> {
    let base_min = minimum_rarity_for_level(level);
    let boss_min = base_min.next().unwrap_or(base_min);

    let mut loot = Vec::new();
    loot.extend(generate_drop(generator, catalogue, level, BOSS_ITEM_LEVEL_BONUS, boss_min, rng)?);
    if rng.gen_bool(0.5) {
        loot.extend(generate_drop(generator, catalogue, level, BOSS_ITEM_LEVEL_BONUS, boss_min, rng)?);
    }
    Ok(loot)
}

/// Generate gold drop amount based on level
pub fn generate_gold_drop(level: u32, rng: &mut impl Rng) -> u32 {
    let base = level.saturating_mul(3).saturating_add(5);
    let variance = rng.gen_range(0..=base / 2);
    base.saturating_add(variance)
}

/// Generate gold drop for boss (more generous)
pub fn generate_boss_gold_drop(level: u32, rng: &mut impl Rng) -> u32 {
    let base = level.saturating_mul(20).saturating_add(50);
    let variance = rng.gen_range(0..=base / 2);
    base.saturating_add(variance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataManager;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_minimum_rarity() {
        assert_eq!(minimum_rarity_for_level(1), Rarity::F);
        assert_eq!(minimum_rarity_for_level(45), Rarity::D);
        assert_eq!(minimum_rarity_for_level(90), Rarity::C);
    }

    #[test]
    fn test_drop_respects_level_requirements() {
        let data = DataManager::default();
        let generator = data.affix_generator().unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..100 {
            let item = generate_drop(&generator, &data.bases, 5, 0, Rarity::F, &mut rng)
                .unwrap()
                .unwrap();
            assert!(item.base.required_level <= 5);
            assert_eq!(item.level, 5);
        }
    }

    #[test]
    fn test_drop_minimum_rarity() {
        let data = DataManager::default();
        let generator = data.affix_generator().unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..100 {
            let item = generate_drop(&generator, &data.bases, 70, 0, Rarity::B, &mut rng)
                .unwrap()
                .unwrap();
            assert!(item.rarity >= Rarity::B);
        }
    }

    #[test]
    fn test_empty_catalogue() {
        let data = DataManager::default();
        let generator = data.affix_generator().unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let empty = BaseCatalogue::default();
        assert!(generate_drop(&generator, &empty, 10, 0, Rarity::F, &mut rng).unwrap().is_none());
    }

    #[test]
    fn test_boss_loot() {
        let data = DataManager::default();
        let generator = data.affix_generator().unwrap();
        let mut rng = StdRng::seed_from_u64(10);

        for _ in 0..50 {
            let loot = generate_boss_loot(&generator, &data.bases, 25, &mut rng).unwrap();
            assert!(!loot.is_empty() && loot.len() <= 2);
            assert!(loot.iter().all(|i| i.rarity >= Rarity::D && i.level == 27));
        }
    }

    #[test]
    fn test_boss_loot_is_equippable() {
        let data = DataManager::default();
        let generator = data.affix_generator().unwrap();
        let mut rng = StdRng::seed_from_u64(28);

        // war_axe and plate_cuirass need level 30
        for _ in 0..300 {
            let loot = generate_boss_loot(&generator, &data.bases, 28, &mut rng).unwrap();
            for item in &loot {
                assert!(item.base.required_level <= 28, "{} needs level {}", item.base.id, item.base.required_level);
                assert_eq!(item.level, 30);
            }
        }
    }

    #[test]
    fn test_gold_saturates() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(generate_gold_drop(u32::MAX, &mut rng), u32::MAX);
        assert_eq!(generate_boss_gold_drop(u32::MAX, &mut rng), u32::MAX);
    }

    #[test]
    fn test_gold() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            let gold = generate_gold_drop(10, &mut rng);
            assert!((35..=52).contains(&gold));
            assert!(generate_boss_gold_drop(10, &mut rng) >= 250);
        }
    }
}
