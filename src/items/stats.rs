//! Per-item bag of rolled modifiers

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::affix::{AffixId, AffixSlot, RolledAffix};

/// Implicit, prefix, suffix and crafted modifiers of one item instance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub implicits: Vec<RolledAffix>,
    pub prefixes: Vec<RolledAffix>,
    pub suffixes: Vec<RolledAffix>,
    pub crafted: Vec<RolledAffix>,
}

impl ItemStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an affix to the collection matching its slot
    pub fn push(&mut self, affix: RolledAffix) {
        match affix.slot {
            AffixSlot::Implicit => self.implicits.push(affix),
            AffixSlot::Prefix => self.prefixes.push(affix),
            AffixSlot::Suffix => self.suffixes.push(affix),
            AffixSlot::Crafted => self.crafted.push(affix),
        }
    }

    /// All affixes: implicits, prefixes, suffixes, then crafted
    pub fn iter(&self) -> impl Iterator<Item = &RolledAffix> {
        self.implicits
            .iter()
            .chain(self.prefixes.iter())
            .chain(self.suffixes.iter())
            .chain(self.crafted.iter())
    }

    /// Randomly rolled affixes only (prefixes then suffixes)
    pub fn rolled(&self) -> impl Iterator<Item = &RolledAffix> {
        self.prefixes.iter().chain(self.suffixes.iter())
    }

    /// Sum of every affix targeting `stat`
    pub fn stat_total(&self, stat: &str) -> i32 {
        self.iter().filter(|a| a.stat == stat).map(|a| a.value).sum()
    }

    /// Sum of `stat` over implicits only
    pub fn implicit_total(&self, stat: &str) -> i32 {
        self.implicits.iter().filter(|a| a.stat == stat).map(|a| a.value).sum()
    }

    pub fn has_stat(&self, stat: &str) -> bool {
        self.iter().any(|a| a.stat == stat)
    }

    /// Stat names already taken by prefixes and suffixes
    pub fn rolled_stat_names(&self) -> HashSet<String> {
        self.rolled().map(|a| a.stat.clone()).collect()
    }

    /// Stat names across rolled and crafted affixes
    pub fn exclusive_stat_names(&self) -> HashSet<String> {
        self.rolled()
            .chain(self.crafted.iter())
            .map(|a| a.stat.clone())
            .collect()
    }

    pub fn corrupted_count(&self) -> usize {
        self.iter().filter(|a| a.corrupted).count()
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted_count() > 0
    }

    /// Number of non-implicit affixes
    pub fn affix_count(&self) -> usize {
        self.prefixes.len() + self.suffixes.len() + self.crafted.len()
    }

    /// Number of positive, non-implicit affixes
    pub fn positive_affix_count(&self) -> usize {
        self.rolled()
            .chain(self.crafted.iter())
            .filter(|a| !a.corrupted)
            .count()
    }

    pub fn get(&self, id: AffixId) -> Option<&RolledAffix> {
        self.iter().find(|a| a.id == id)
    }

    /// Remove an affix by id from whichever collection holds it
    pub fn remove(&mut self, id: AffixId) -> Option<RolledAffix> {
        for list in [
            &mut self.implicits,
            &mut self.prefixes,
            &mut self.suffixes,
            &mut self.crafted,
        ] {
            if let Some(index) = list.iter().position(|a| a.id == id) {
                return Some(list.remove(index));
            }
        }
        None
    }

    /// Drop all prefixes and suffixes, keeping implicits and crafted
    pub fn clear_rolled(&mut self) {
        self.prefixes.clear();
        self.suffixes.clear();
    }

    /// Whether prefix+suffix stat names are all distinct
    pub fn has_unique_rolled_stats(&self) -> bool {
        let mut seen = HashSet::new();
        self.rolled().all(|a| seen.insert(a.stat.as_str()))
    }
}
