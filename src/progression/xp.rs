//! Experience and leveling
//!
//! XP curve, level ups, and the item level a character's drops roll at.

use serde::{Deserialize, Serialize};

/// Highest reachable character level
pub const MAX_LEVEL: u32 = 100;

/// Calculate XP needed to go from `level - 1` to `level`
///
/// Levels past `MAX_LEVEL` cost the same as `MAX_LEVEL`.
pub fn xp_for_level(level: u32) -> u32 {
    let level = level.min(MAX_LEVEL);
    if level <= 1 {
        0
    } else {
        // 100 XP for level 2, growing by 10% of the previous step plus 25
        let steps = level - 2;
        (0..steps).fold(100u32, |xp, _| xp.saturating_add(xp / 10 + 25))
    }
}

/// Calculate total XP needed from level 1 to reach a given level
pub fn total_xp_for_level(level: u32) -> u64 {
    (2..=level.min(MAX_LEVEL)).map(|l| xp_for_level(l) as u64).sum()
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        0..=4 => "Novice",
        5..=14 => "Tracker",
        15..=29 => "Hunter",
        30..=49 => "Veteran Hunter",
        50..=74 => "Elite Hunter",
        75..=99 => "Master Hunter",
        _ => "Legend",
    }
}

/// Item level for drops earned by a character of `level`
pub fn drop_item_level(level: u32, bonus: u32) -> u32 {
    level.saturating_add(bonus).clamp(1, MAX_LEVEL)
}

/// Character level and progress towards the next one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    /// XP earned within the current level
    pub xp: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self { level: 1, xp: 0 }
    }
}

impl Experience {
    pub fn new() -> Self {
        Self::default()
    }

    /// XP still needed for the next level (0 at the cap)
    pub fn xp_to_next(&self) -> u32 {
        if self.level >= MAX_LEVEL {
            0
        } else {
            xp_for_level(self.level + 1).saturating_sub(self.xp)
        }
    }

    /// Add XP, returning how many levels were gained
    pub fn add_xp(&mut self, amount: u32) -> u32 {
        if self.level >= MAX_LEVEL {
            return 0;
        }

        let start = self.level;
        self.xp = self.xp.saturating_add(amount);

        while self.level < MAX_LEVEL {
            let needed = xp_for_level(self.level + 1);
            if self.xp < needed {
                break;
            }
            self.xp -= needed;
            self.level += 1;
        }

        if self.level >= MAX_LEVEL {
            self.xp = 0;
        }

        let gained = self.level - start;
        if gained > 0 {
            log::info!("Reached level {} ({})", self.level, level_title(self.level));
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xp_for_level() {
        assert_eq!(xp_for_level(1), 0);
        assert_eq!(xp_for_level(2), 100); // Need 100 to go from 1 -> 2
        assert_eq!(xp_for_level(3), 135); // 100 + 10 + 25
        assert_eq!(xp_for_level(4), 173); // 135 + 13 + 25
        assert!(xp_for_level(50) > xp_for_level(49));
    }

    #[test]
    fn test_total_xp() {
        assert_eq!(total_xp_for_level(1), 0);
        assert_eq!(total_xp_for_level(3), 235);
    }

    #[test]
    fn test_curve_stops_at_level_cap() {
        assert_eq!(xp_for_level(MAX_LEVEL + 1), xp_for_level(MAX_LEVEL));
        assert_eq!(xp_for_level(u32::MAX), xp_for_level(MAX_LEVEL));
        assert_eq!(total_xp_for_level(u32::MAX), total_xp_for_level(MAX_LEVEL));
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Novice");
        assert_eq!(level_title(20), "Hunter");
        assert_eq!(level_title(100), "Legend");
    }

    #[test]
    fn test_add_xp_multiple_levels() {
        let mut exp = Experience::new();
        assert_eq!(exp.add_xp(99), 0);
        assert_eq!(exp.xp_to_next(), 1);
        assert_eq!(exp.add_xp(1 + 135 + 5), 2);
        assert_eq!(exp.level, 3);
        assert_eq!(exp.xp, 5);
    }

    #[test]
    fn test_level_cap() {
        let mut exp = Experience::new();
        exp.add_xp(u32::MAX);
        exp.add_xp(u32::MAX);
        assert!(exp.level <= MAX_LEVEL);
        exp.level = MAX_LEVEL;
        assert_eq!(exp.add_xp(1000), 0);
        assert_eq!(exp.xp_to_next(), 0);
    }

    #[test]
    fn test_drop_item_level() {
        assert_eq!(drop_item_level(0, 0), 1);
        assert_eq!(drop_item_level(10, 2), 12);
        assert_eq!(drop_item_level(99, 5), MAX_LEVEL);
    }
}
