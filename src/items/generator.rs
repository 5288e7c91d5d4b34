//! Affix generation
//!
//! Rolls prefixes and suffixes onto items by weighted selection from a
//! pool of authored templates. Each pick is filtered by slot, item kind,
//! item level and corruption, and a stat name can only be rolled once per
//! item.

use std::collections::{HashMap, HashSet};

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::affix::{AffixId, AffixSlot, AffixTemplate, ItemSubType};
use super::item::{ItemBase, ItemInstance};
use super::rarity::{AffixCounts, Rarity};
use super::stats::ItemStats;
use crate::error::AffixError;

fn default_max_corrupted() -> usize {
    1
}

fn default_max_crafted() -> usize {
    1
}

fn default_corruption_scale() -> f64 {
    1.0
}

/// Tunables for the generator, loaded from `generator.ron`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Corrupted affixes allowed on one item
    #[serde(default = "default_max_corrupted")]
    pub max_corrupted: usize,
    /// Crafted affixes allowed on one item
    #[serde(default = "default_max_crafted")]
    pub max_crafted: usize,
    /// Multiplier applied to each grade's corruption chance
    #[serde(default = "default_corruption_scale")]
    pub corruption_chance_scale: f64,
    /// Replacement count bounds for specific grades
    #[serde(default)]
    pub count_overrides: HashMap<Rarity, AffixCounts>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_corrupted: default_max_corrupted(),
            max_crafted: default_max_crafted(),
            corruption_chance_scale: default_corruption_scale(),
            count_overrides: HashMap::new(),
        }
    }
}

/// Weighted affix roller over a validated template pool
#[derive(Debug, Clone)]
pub struct AffixGenerator {
    pool: Vec<AffixTemplate>,
    config: GeneratorConfig,
}

impl AffixGenerator {
    /// Build a generator, rejecting invalid or duplicate templates
    pub fn new(pool: Vec<AffixTemplate>, config: GeneratorConfig) -> Result<Self, AffixError> {
        let mut ids = HashSet::new();
        for template in &pool {
            template.validate()?;
            if !template.slot.is_rolled() {
                return Err(AffixError::WrongSlot {
                    id: template.id.clone(),
                    slot: template.slot,
                    expected: "Prefix or Suffix",
                });
            }
            if !ids.insert(template.id.as_str()) {
                return Err(AffixError::DuplicateTemplate(template.id.clone()));
            }
        }

        for (rarity, counts) in &config.count_overrides {
            if counts.min_prefixes > counts.max_prefixes || counts.min_suffixes > counts.max_suffixes {
                return Err(AffixError::InvalidTemplate {
                    id: format!("count_overrides[{}]", rarity),
                    reason: "minimum count exceeds maximum".to_string(),
                });
            }
        }

        log::debug!("Affix generator ready with {} templates", pool.len());
        Ok(Self { pool, config })
    }

    pub fn pool(&self) -> &[AffixTemplate] {
        &self.pool
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Look up a template by id
    pub fn template(&self, id: &str) -> Option<&AffixTemplate> {
        self.pool.iter().find(|t| t.id == id)
    }

    /// Count bounds for a grade, honoring config overrides
    pub fn counts_for(&self, rarity: Rarity) -> AffixCounts {
        self.config
            .count_overrides
            .get(&rarity)
            .copied()
            .unwrap_or_else(|| rarity.affix_counts())
    }

    /// Per-slot corruption chance for a grade, clamped to [0, 1]
    pub fn corruption_chance(&self, rarity: Rarity) -> f64 {
        (rarity.corruption_chance() * self.config.corruption_chance_scale).clamp(0.0, 1.0)
    }

    /// Templates eligible for one slot pick
    pub fn candidate_pool(
        &self,
        slot: AffixSlot,
        subtype: ItemSubType,
        level: u32,
        corrupted: bool,
        excluded: &HashSet<String>,
    ) -> Vec<&AffixTemplate> {
        self.pool
            .iter()
            .filter(|t| t.slot == slot)
            .filter(|t| t.corrupted == corrupted)
            .filter(|t| t.weight > 0)
            .filter(|t| t.matches(subtype, level))
            .filter(|t| !excluded.contains(&t.stat))
            .collect()
    }

    /// Weighted pick from the candidate pool, `None` when nothing qualifies
    fn pick(
        &self,
        slot: AffixSlot,
        subtype: ItemSubType,
        level: u32,
        corrupted: bool,
        excluded: &HashSet<String>,
        rng: &mut impl Rng,
    ) -> Result<Option<&AffixTemplate>, AffixError> {
        let candidates = self.candidate_pool(slot, subtype, level, corrupted, excluded);
        if candidates.is_empty() {
            return Ok(None);
        }
        // Summed as u64 so large authored weights cannot overflow
        let weights = WeightedIndex::new(candidates.iter().map(|t| u64::from(t.weight)))?;
        Ok(Some(candidates[weights.sample(rng)]))
    }

    /// Roll affixes for a base at an item level and grade from a seed
    ///
    /// The same inputs always produce the same stats.
    pub fn generate(&self, base: &ItemBase, level: u32, rarity: Rarity, seed: u64) -> Result<ItemStats, AffixError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_with_rng(base, level, rarity, &mut rng)
    }

    /// Roll implicits, prefixes and suffixes using the caller's RNG
    pub fn generate_with_rng(
        &self,
        base: &ItemBase,
        level: u32,
        rarity: Rarity,
        rng: &mut impl Rng,
    ) -> Result<ItemStats, AffixError> {
        let mut stats = ItemStats::new();
        base.roll_implicits(&mut stats, rng);
        self.roll_affixes(&mut stats, base.subtype, level, rarity, rng)?;
        Ok(stats)
    }

    /// Roll a complete item instance
    pub fn roll_item(
        &self,
        base: &ItemBase,
        level: u32,
        rarity: Rarity,
        rng: &mut impl Rng,
    ) -> Result<ItemInstance, AffixError> {
        let stats = self.generate_with_rng(base, level, rarity, rng)?;
        let item = ItemInstance::new(base.clone(), level, rarity, stats);
        log::info!(
            "Rolled {} (grade {}, ilvl {}): {} prefixes, {} suffixes, {} corrupted",
            base.name,
            rarity,
            level,
            item.stats.prefixes.len(),
            item.stats.suffixes.len(),
            item.stats.corrupted_count()
        );
        Ok(item)
    }

    /// Fill prefix and suffix slots on `stats`
    ///
    /// Stat names already on the item (rolled or crafted) are excluded up
    /// front so a reroll never duplicates a crafted stat.
    fn roll_affixes(
        &self,
        stats: &mut ItemStats,
        subtype: ItemSubType,
        level: u32,
        rarity: Rarity,
        rng: &mut impl Rng,
    ) -> Result<(), AffixError> {
        let counts = self.counts_for(rarity);
        let (prefixes, suffixes) = counts.roll(rng);
        let chance = self.corruption_chance(rarity);

        let mut excluded = stats.exclusive_stat_names();
        let mut corrupted = stats.corrupted_count();

        for (slot, wanted) in [(AffixSlot::Prefix, prefixes), (AffixSlot::Suffix, suffixes)] {
            for _ in 0..wanted {
                let corrupt = corrupted < self.config.max_corrupted && chance > 0.0 && rng.gen_bool(chance);

                let mut template = self.pick(slot, subtype, level, corrupt, &excluded, rng)?;
                if template.is_none() && corrupt {
                    log::debug!("No corrupted {:?} candidates for {:?} at ilvl {}, using positive pool", slot, subtype, level);
                    template = self.pick(slot, subtype, level, false, &excluded, rng)?;
                }

                let Some(template) = template else {
                    log::debug!("No {:?} candidates left for {:?} at ilvl {}", slot, subtype, level);
                    continue;
                };

                let affix = template.roll(rng);
                if affix.corrupted {
                    corrupted += 1;
                }
                excluded.insert(affix.stat.clone());
                stats.push(affix);
            }
        }

        if stats.prefixes.len() < counts.min_prefixes || stats.suffixes.len() < counts.min_suffixes {
            log::warn!(
                "Grade {} {:?} at ilvl {} rolled {}/{} prefixes and {}/{} suffixes (pool exhausted)",
                rarity,
                subtype,
                level,
                stats.prefixes.len(),
                counts.min_prefixes,
                stats.suffixes.len(),
                counts.min_suffixes
            );
        }

        Ok(())
    }

    /// Replace an item's prefixes and suffixes with a fresh roll
    ///
    /// Implicits and crafted affixes survive.
    pub fn reroll(&self, item: &mut ItemInstance, rng: &mut impl Rng) -> Result<(), AffixError> {
        item.stats.clear_rolled();
        self.roll_affixes(&mut item.stats, item.base.subtype, item.level, item.rarity, rng)?;
        log::debug!("Rerolled item {} ({})", item.id, item.base.name);
        Ok(())
    }

    /// Add a crafted affix from a named template
    pub fn craft(&self, item: &mut ItemInstance, template_id: &str, rng: &mut impl Rng) -> Result<AffixId, AffixError> {
        let template = self
            .template(template_id)
            .ok_or_else(|| AffixError::UnknownTemplate(template_id.to_string()))?;

        if !item.identified {
            return Err(AffixError::CraftRejected("item is unidentified".to_string()));
        }
        if template.corrupted {
            return Err(AffixError::CraftRejected(format!("'{}' is a corrupted affix", template.id)));
        }
        if item.stats.crafted.len() >= self.config.max_crafted {
            return Err(AffixError::CraftRejected(format!(
                "item already has {} crafted affix(es)",
                item.stats.crafted.len()
            )));
        }
        if !template.matches(item.base.subtype, item.level) {
            return Err(AffixError::CraftRejected(format!(
                "'{}' cannot apply to {:?} at item level {}",
                template.id, item.base.subtype, item.level
            )));
        }
        if item.stats.exclusive_stat_names().contains(&template.stat) {
            return Err(AffixError::CraftRejected(format!("item already has {}", template.stat)));
        }

        let affix = template.roll_into(AffixSlot::Crafted, rng);
        let id = affix.id;
        log::debug!("Crafted {} onto item {}", affix.stat, item.id);
        item.stats.push(affix);
        Ok(id)
    }
}
