//! Rarity grades
//!
//! Grades F through SS control how many affixes an item rolls, how likely
//! a slot is to come up corrupted, and how much the item sells for.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Item rarity grade, ordered from F (lowest) to SS (highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    F,
    E,
    D,
    C,
    B,
    A,
    S,
    SS,
}

/// Inclusive prefix/suffix count bounds for a rarity grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixCounts {
    pub min_prefixes: usize,
    pub max_prefixes: usize,
    pub min_suffixes: usize,
    pub max_suffixes: usize,
}

impl AffixCounts {
    pub const fn new(prefixes: (usize, usize), suffixes: (usize, usize)) -> Self {
        Self {
            min_prefixes: prefixes.0,
            max_prefixes: prefixes.1,
            min_suffixes: suffixes.0,
            max_suffixes: suffixes.1,
        }
    }

    /// Roll a concrete (prefixes, suffixes) pair within the bounds
    pub fn roll(&self, rng: &mut impl Rng) -> (usize, usize) {
        let prefixes = rng.gen_range(self.min_prefixes..=self.max_prefixes.max(self.min_prefixes));
        let suffixes = rng.gen_range(self.min_suffixes..=self.max_suffixes.max(self.min_suffixes));
        (prefixes, suffixes)
    }

    /// Largest number of rolled affixes an item with these bounds can carry
    pub fn max_total(&self) -> usize {
        self.max_prefixes + self.max_suffixes
    }
}

impl Rarity {
    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::F => "F",
            Rarity::E => "E",
            Rarity::D => "D",
            Rarity::C => "C",
            Rarity::B => "B",
            Rarity::A => "A",
            Rarity::S => "S",
            Rarity::SS => "SS",
        }
    }

    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rarity::F => (160, 160, 160),
            Rarity::E => (220, 220, 220),
            Rarity::D => (100, 255, 100),
            Rarity::C => (100, 150, 255),
            Rarity::B => (200, 100, 255),
            Rarity::A => (255, 180, 50),
            Rarity::S => (255, 90, 60),
            Rarity::SS => (100, 255, 255),
        }
    }

    /// All grades, lowest first
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::F,
            Rarity::E,
            Rarity::D,
            Rarity::C,
            Rarity::B,
            Rarity::A,
            Rarity::S,
            Rarity::SS,
        ]
    }

    /// The next grade up, or `None` at SS
    pub fn next(&self) -> Option<Rarity> {
        let all = Self::all();
        let index = all.iter().position(|r| r == self)?;
        all.get(index + 1).copied()
    }

    /// Prefix/suffix count table
    pub fn affix_counts(&self) -> AffixCounts {
        match self {
            Rarity::F => AffixCounts::new((0, 0), (0, 0)),
            Rarity::E => AffixCounts::new((0, 1), (0, 1)),
            Rarity::D => AffixCounts::new((1, 1), (0, 1)),
            Rarity::C => AffixCounts::new((1, 2), (1, 1)),
            Rarity::B => AffixCounts::new((1, 2), (1, 2)),
            Rarity::A => AffixCounts::new((2, 3), (1, 2)),
            Rarity::S => AffixCounts::new((2, 3), (2, 3)),
            Rarity::SS => AffixCounts::new((3, 3), (3, 3)),
        }
    }

    /// Sell value multiplier
    pub fn value_multiplier(&self) -> f32 {
        match self {
            Rarity::F => 1.0,
            Rarity::E => 1.25,
            Rarity::D => 1.5,
            Rarity::C => 2.0,
            Rarity::B => 3.0,
            Rarity::A => 5.0,
            Rarity::S => 8.0,
            Rarity::SS => 12.0,
        }
    }

    /// Chance (0.0-1.0) that a single rolled slot is drawn from the corrupted pool
    pub fn corruption_chance(&self) -> f64 {
        match self {
            Rarity::F | Rarity::E => 0.0,
            Rarity::D => 0.05,
            Rarity::C => 0.08,
            Rarity::B => 0.10,
            Rarity::A => 0.12,
            Rarity::S => 0.15,
            Rarity::SS => 0.20,
        }
    }

    /// Whether items of this grade drop already identified
    pub fn drops_identified(&self) -> bool {
        matches!(self, Rarity::F)
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Rarity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rarity::all()
            .iter()
            .copied()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown rarity grade '{}' (expected F, E, D, C, B, A, S or SS)", s))
    }
}

/// Roll a rarity grade for a drop of the given item level
pub fn roll_rarity(level: u32, rng: &mut impl Rng) -> Rarity {
    // 1000 for finer granularity on the top grades
    let roll = rng.gen_range(0..1000);

    let tier = match level {
        0..=10 => 0,
        11..=25 => 1,
        26..=45 => 2,
        46..=70 => 3,
        _ => 4,
    };

    // Roll must reach the threshold to earn the grade; 1000 means unreachable
    const SS: [u32; 5] = [1000, 1000, 999, 998, 996];
    const S: [u32; 5] = [1000, 998, 995, 990, 985];
    const A: [u32; 5] = [997, 990, 980, 970, 960];
    const B: [u32; 5] = [985, 970, 950, 930, 910];
    const C: [u32; 5] = [950, 920, 880, 850, 800];
    const D: [u32; 5] = [850, 800, 750, 700, 650];
    const E: [u32; 5] = [600, 550, 500, 450, 400];

    if roll >= SS[tier] {
        Rarity::SS
    } else if roll >= S[tier] {
        Rarity::S
    } else if roll >= A[tier] {
        Rarity::A
    } else if roll >= B[tier] {
        Rarity::B
    } else if roll >= C[tier] {
        Rarity::C
    } else if roll >= D[tier] {
        Rarity::D
    } else if roll >= E[tier] {
        Rarity::E
    } else {
        Rarity::F
    }
}

/// Roll rarity but never below `min`
pub fn roll_rarity_with_minimum(level: u32, min: Rarity, rng: &mut impl Rng) -> Rarity {
    roll_rarity(level, rng).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_counts_table() {
        assert_eq!(Rarity::F.affix_counts().max_total(), 0);
        assert_eq!(Rarity::SS.affix_counts(), AffixCounts::new((3, 3), (3, 3)));
        for rarity in Rarity::all() {
            let counts = rarity.affix_counts();
            assert!(counts.min_prefixes <= counts.max_prefixes);
            assert!(counts.min_suffixes <= counts.max_suffixes);
        }
    }

    #[test]
    fn test_counts_grow_with_grade() {
        let totals: Vec<usize> = Rarity::all().iter().map(|r| r.affix_counts().max_total()).collect();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_rolled_counts_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let counts = Rarity::A.affix_counts();
        for _ in 0..200 {
            let (p, s) = counts.roll(&mut rng);
            assert!((2..=3).contains(&p));
            assert!((1..=2).contains(&s));
        }
    }

    #[test]
    fn test_ordering_and_next() {
        assert!(Rarity::SS > Rarity::S);
        assert!(Rarity::F < Rarity::E);
        assert_eq!(Rarity::B.next(), Some(Rarity::A));
        assert_eq!(Rarity::SS.next(), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("ss".parse::<Rarity>(), Ok(Rarity::SS));
        assert_eq!(" b ".parse::<Rarity>(), Ok(Rarity::B));
        assert!("Z".parse::<Rarity>().is_err());
    }

    #[test]
    fn test_low_level_never_rolls_top_grades() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..5000 {
            let rarity = roll_rarity(1, &mut rng);
            assert!(rarity < Rarity::S);
        }
    }

    #[test]
    fn test_minimum_rarity() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert!(roll_rarity_with_minimum(1, Rarity::B, &mut rng) >= Rarity::B);
        }
    }
}
