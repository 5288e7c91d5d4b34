//! Affix templates and rolled affixes
//!
//! An [`AffixTemplate`] is an authored row describing one possible modifier.
//! Rolling it produces a [`RolledAffix`] carrying a sampled value and a
//! unique id, owned by the item it was rolled onto.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AffixError;

/// Broad item category used for affix filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armour,
    Jewellery,
}

/// Concrete base item kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemSubType {
    // Weapons
    Sword,
    Axe,
    Dagger,
    Bow,
    Staff,
    // Armour
    Helmet,
    Chest,
    Gloves,
    Boots,
    Shield,
    // Jewellery
    Ring,
    Amulet,
    Belt,
}

impl ItemSubType {
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemSubType::Sword
            | ItemSubType::Axe
            | ItemSubType::Dagger
            | ItemSubType::Bow
            | ItemSubType::Staff => ItemType::Weapon,
            ItemSubType::Helmet
            | ItemSubType::Chest
            | ItemSubType::Gloves
            | ItemSubType::Boots
            | ItemSubType::Shield => ItemType::Armour,
            ItemSubType::Ring | ItemSubType::Amulet | ItemSubType::Belt => ItemType::Jewellery,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemSubType::Sword => "Sword",
            ItemSubType::Axe => "Axe",
            ItemSubType::Dagger => "Dagger",
            ItemSubType::Bow => "Bow",
            ItemSubType::Staff => "Staff",
            ItemSubType::Helmet => "Helmet",
            ItemSubType::Chest => "Chest",
            ItemSubType::Gloves => "Gloves",
            ItemSubType::Boots => "Boots",
            ItemSubType::Shield => "Shield",
            ItemSubType::Ring => "Ring",
            ItemSubType::Amulet => "Amulet",
            ItemSubType::Belt => "Belt",
        }
    }

    pub fn all() -> &'static [ItemSubType] {
        &[
            ItemSubType::Sword,
            ItemSubType::Axe,
            ItemSubType::Dagger,
            ItemSubType::Bow,
            ItemSubType::Staff,
            ItemSubType::Helmet,
            ItemSubType::Chest,
            ItemSubType::Gloves,
            ItemSubType::Boots,
            ItemSubType::Shield,
            ItemSubType::Ring,
            ItemSubType::Amulet,
            ItemSubType::Belt,
        ]
    }
}

/// Which collection of an item's stats an affix belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffixSlot {
    Implicit,
    Prefix,
    Suffix,
    Crafted,
}

impl AffixSlot {
    /// Slots the generator rolls randomly
    pub fn is_rolled(&self) -> bool {
        matches!(self, AffixSlot::Prefix | AffixSlot::Suffix)
    }
}

/// How a rolled value is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueFormat {
    #[default]
    Flat,
    Percent,
}

/// Unique id of a rolled affix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AffixId(pub Uuid);

impl AffixId {
    /// Build an id from RNG bytes so seeded generation stays reproducible
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for AffixId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_max_level() -> u32 {
    u32::MAX
}

fn default_min_level() -> u32 {
    1
}

/// An authored affix row. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffixTemplate {
    /// Unique template id (e.g. "flat_life_1")
    pub id: String,
    /// Target stat name (e.g. "Maximum Life")
    pub stat: String,
    pub slot: AffixSlot,
    /// Inclusive roll range
    pub min: i32,
    pub max: i32,
    /// Relative selection weight; 0 never rolls
    pub weight: u32,
    /// Allowed item types, empty = any
    #[serde(default)]
    pub item_types: Vec<ItemType>,
    /// Allowed item subtypes, empty = any
    #[serde(default)]
    pub item_subtypes: Vec<ItemSubType>,
    #[serde(default = "default_min_level")]
    pub min_level: u32,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    /// Negative affix drawn only from the corrupted pool
    #[serde(default)]
    pub corrupted: bool,
    #[serde(default)]
    pub format: ValueFormat,
    /// Word used when naming the item ("Flaming", "of the Bear")
    #[serde(default)]
    pub name: Option<String>,
}

impl AffixTemplate {
    /// Minimal constructor; filters default to "any item, any level"
    pub fn new(id: impl Into<String>, stat: impl Into<String>, slot: AffixSlot, min: i32, max: i32, weight: u32) -> Self {
        Self {
            id: id.into(),
            stat: stat.into(),
            slot,
            min,
            max,
            weight,
            item_types: Vec::new(),
            item_subtypes: Vec::new(),
            min_level: default_min_level(),
            max_level: default_max_level(),
            corrupted: false,
            format: ValueFormat::Flat,
            name: None,
        }
    }

    pub fn with_types(mut self, types: &[ItemType]) -> Self {
        self.item_types = types.to_vec();
        self
    }

    pub fn with_subtypes(mut self, subtypes: &[ItemSubType]) -> Self {
        self.item_subtypes = subtypes.to_vec();
        self
    }

    pub fn with_levels(mut self, min_level: u32, max_level: u32) -> Self {
        self.min_level = min_level;
        self.max_level = max_level;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn percent(mut self) -> Self {
        self.format = ValueFormat::Percent;
        self
    }

    pub fn corrupted(mut self) -> Self {
        self.corrupted = true;
        self
    }

    fn invalid(&self, reason: impl Into<String>) -> AffixError {
        AffixError::InvalidTemplate {
            id: self.id.clone(),
            reason: reason.into(),
        }
    }

    /// Check the authored row for internal consistency
    pub fn validate(&self) -> Result<(), AffixError> {
        if self.id.trim().is_empty() {
            return Err(self.invalid("empty id"));
        }
        if self.stat.trim().is_empty() {
            return Err(self.invalid("empty stat name"));
        }
        if self.min > self.max {
            return Err(self.invalid(format!("min {} exceeds max {}", self.min, self.max)));
        }
        if self.min_level > self.max_level {
            return Err(self.invalid(format!(
                "min level {} exceeds max level {}",
                self.min_level, self.max_level
            )));
        }
        if self.corrupted && self.max > 0 {
            return Err(self.invalid("corrupted affix must roll non-positive values"));
        }
        if !self.corrupted && self.max < 0 {
            return Err(self.invalid("negative range requires the corrupted flag"));
        }
        if self.corrupted && self.slot == AffixSlot::Crafted {
            return Err(self.invalid("crafted affixes cannot be corrupted"));
        }
        Ok(())
    }

    /// Whether this template may roll on the given base kind at the given item level
    pub fn matches(&self, subtype: ItemSubType, level: u32) -> bool {
        let type_ok = self.item_types.is_empty() || self.item_types.contains(&subtype.item_type());
        let subtype_ok = self.item_subtypes.is_empty() || self.item_subtypes.contains(&subtype);
        let level_ok = (self.min_level..=self.max_level).contains(&level);
        type_ok && subtype_ok && level_ok
    }

    /// Roll a concrete affix; the value is uniform in `[min, max]`
    pub fn roll(&self, rng: &mut impl Rng) -> RolledAffix {
        self.roll_into(self.slot, rng)
    }

    /// Roll into a specific slot (used for crafting, which re-homes prefix/suffix rows)
    pub fn roll_into(&self, slot: AffixSlot, rng: &mut impl Rng) -> RolledAffix {
        let value = rng.gen_range(self.min..=self.max);
        RolledAffix {
            id: AffixId::random(rng),
            template_id: self.id.clone(),
            stat: self.stat.clone(),
            slot,
            value,
            corrupted: self.corrupted,
            format: self.format,
            name: self.name.clone(),
        }
    }
}

/// A concrete modifier on one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolledAffix {
    pub id: AffixId,
    pub template_id: String,
    pub stat: String,
    pub slot: AffixSlot,
    pub value: i32,
    pub corrupted: bool,
    pub format: ValueFormat,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strength() -> AffixTemplate {
        AffixTemplate::new("str_1", "Strength", AffixSlot::Suffix, 5, 10, 100)
    }

    #[test]
    fn test_validate_ok() {
        assert!(strength().validate().is_ok());
        let curse = AffixTemplate::new("curse", "Strength", AffixSlot::Suffix, -10, -2, 10).corrupted();
        assert!(curse.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_rows() {
        let mut t = strength();
        t.min = 20;
        assert!(matches!(t.validate(), Err(AffixError::InvalidTemplate { .. })));

        let t = strength().with_levels(30, 10);
        assert!(t.validate().is_err());

        let t = AffixTemplate::new("bad", "Strength", AffixSlot::Suffix, -5, -1, 10);
        assert!(t.validate().is_err(), "negative range without corruption flag");

        let t = strength().corrupted();
        assert!(t.validate().is_err(), "corrupted flag with positive range");

        let t = AffixTemplate::new("empty", " ", AffixSlot::Prefix, 1, 2, 1);
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_matches_filters() {
        let t = strength().with_types(&[ItemType::Weapon]).with_levels(10, 20);
        assert!(t.matches(ItemSubType::Sword, 15));
        assert!(!t.matches(ItemSubType::Helmet, 15));
        assert!(!t.matches(ItemSubType::Sword, 9));
        assert!(!t.matches(ItemSubType::Sword, 21));

        let t = strength().with_subtypes(&[ItemSubType::Bow]);
        assert!(t.matches(ItemSubType::Bow, 1));
        assert!(!t.matches(ItemSubType::Sword, 1));
    }

    #[test]
    fn test_roll_in_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let t = strength();
        let mut ids = std::collections::HashSet::new();
        for _ in 0..100 {
            let rolled = t.roll(&mut rng);
            assert!((5..=10).contains(&rolled.value));
            assert_eq!(rolled.stat, "Strength");
            assert!(ids.insert(rolled.id));
        }
    }

    #[test]
    fn test_item_types() {
        assert_eq!(ItemSubType::Bow.item_type(), ItemType::Weapon);
        assert_eq!(ItemSubType::Shield.item_type(), ItemType::Armour);
        assert_eq!(ItemSubType::Belt.item_type(), ItemType::Jewellery);
    }
}
