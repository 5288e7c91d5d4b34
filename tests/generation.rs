//! Rolling items end to end over the built-in data

use rand::rngs::StdRng;
use rand::SeedableRng;

use hunter_loot::data::DataManager;
use hunter_loot::items::{Equipment, Inventory, Rarity};
use hunter_loot::progression::Experience;

#[test]
fn test_every_base_rolls_at_every_grade() {
    let data = DataManager::default();
    let generator = data.affix_generator().unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for base in &data.bases.bases {
        for &rarity in Rarity::all() {
            for level in [1, 25, 60, 100] {
                let item = generator.roll_item(base, level, rarity, &mut rng).unwrap();
                let counts = rarity.affix_counts();
                assert!(item.stats.prefixes.len() <= counts.max_prefixes);
                assert!(item.stats.suffixes.len() <= counts.max_suffixes);
                assert!(item.stats.has_unique_rolled_stats());
                assert_eq!(item.stats.implicits.len(), base.implicits.len());
                assert!(item.value() >= 1);
            }
        }
    }
}

#[test]
fn test_default_pool_satisfies_minimum_counts() {
    let data = DataManager::default();
    let generator = data.affix_generator().unwrap();

    for base in &data.bases.bases {
        for seed in 0..20 {
            let stats = generator.generate(base, 60, Rarity::SS, seed).unwrap();
            assert_eq!(stats.prefixes.len(), 3, "{} seed {}", base.id, seed);
            assert_eq!(stats.suffixes.len(), 3, "{} seed {}", base.id, seed);
        }
    }
}

#[test]
fn test_same_seed_same_item() {
    let data = DataManager::default();
    let generator = data.affix_generator().unwrap();
    let base = data.bases.find("iron_sword").unwrap();

    let a = generator.generate(base, 40, Rarity::A, 77).unwrap();
    let b = generator.generate(base, 40, Rarity::A, 77).unwrap();
    let c = generator.generate(base, 40, Rarity::A, 78).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_drop_identify_equip_sell() {
    let data = DataManager::default();
    let generator = data.affix_generator().unwrap();
    let mut rng = StdRng::seed_from_u64(5);

    let mut exp = Experience::new();
    exp.add_xp(5_000);
    assert!(exp.level > 1);

    let mut inventory = Inventory::new();
    let ring = data.bases.find("iron_ring").unwrap();
    let item = generator.roll_item(ring, exp.level, Rarity::B, &mut rng).unwrap();
    assert!(!item.identified);
    let unidentified_value = item.value();
    let id = item.id;
    inventory.add_item(item).unwrap();

    assert_eq!(inventory.identify_all(), 1);
    let identified = inventory.get_by_id(id).unwrap();
    assert!(identified.value() > unidentified_value);
    assert!(!identified.display_name().starts_with("Unidentified"));

    let mut equipment = Equipment::new();
    let item = inventory.remove_by_id(id).unwrap();
    let life = item.stats.stat_total("Maximum Life");
    equipment.equip(item, exp.level).unwrap();
    assert_eq!(equipment.stat_total("Maximum Life"), life);

    let sword = data.bases.find("iron_sword").unwrap();
    let item = generator.roll_item(sword, exp.level, Rarity::C, &mut rng).unwrap();
    let id = item.id;
    let value = item.value();
    inventory.add_item(item).unwrap();
    assert_eq!(inventory.sell(id).unwrap(), value);
    assert_eq!(inventory.gold(), value);
}
