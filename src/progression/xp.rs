//! Experience and leveling
//!
//! XP thresholds grow by half of the previous threshold each level.

use serde::{Deserialize, Serialize};

/// XP needed to go from level 1 to level 2, and the floor for every threshold
pub const INITIAL_XP_THRESHOLD: u32 = 10;

/// Stat points granted for each level gained
pub const POINTS_PER_LEVEL: u32 = 3;

/// Threshold for the level after one that needed `current`
pub fn next_threshold(current: u32) -> u32 {
    (current.saturating_mul(3) / 2).max(INITIAL_XP_THRESHOLD)
}

/// Experience and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub level: u32,
    pub current_xp: u32,
    pub xp_to_next: u32,
}

impl Experience {
    pub fn new() -> Self {
        Self {
            level: 1,
            current_xp: 0,
            xp_to_next: INITIAL_XP_THRESHOLD,
        }
    }

    /// Add XP and return every level reached, in order
    pub fn add_xp(&mut self, amount: u32) -> Vec<u32> {
        let mut reached = Vec::new();
        if amount == 0 {
            return reached;
        }
        self.current_xp = self.current_xp.saturating_add(amount);
        while self.current_xp >= self.xp_to_next {
            self.current_xp -= self.xp_to_next;
            self.level += 1;
            self.xp_to_next = next_threshold(self.xp_to_next);
            reached.push(self.level);
        }
        reached
    }

    /// Fraction of the way to the next level (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        self.current_xp as f32 / self.xp_to_next as f32
    }
}

impl Default for Experience {
    fn default() -> Self {
        Self::new()
    }
}

/// Get a title/rank based on level
pub fn level_title(level: u32) -> &'static str {
    match level {
        1..=2 => "Fledgling",
        3..=4 => "Initiate",
        5..=9 => "Stalker",
        10..=19 => "Slayer",
        20..=34 => "Elder",
        35..=49 => "Ancient",
        _ => "Ascendant",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_curve() {
        assert_eq!(next_threshold(10), 15);
        assert_eq!(next_threshold(15), 22);
        assert_eq!(next_threshold(22), 33);
        assert_eq!(next_threshold(33), 49);
        assert_eq!(next_threshold(0), INITIAL_XP_THRESHOLD);
    }

    #[test]
    fn test_single_level_up() {
        let mut xp = Experience::new();
        assert_eq!(xp.add_xp(12), vec![2]);
        assert_eq!(xp.level, 2);
        assert_eq!(xp.current_xp, 2);
        assert_eq!(xp.xp_to_next, 15);
    }

    #[test]
    fn test_multiple_levels_from_one_award() {
        let mut xp = Experience::new();
        // 10 + 15 + 22 = 47 needed for level 4
        assert_eq!(xp.add_xp(50), vec![2, 3, 4]);
        assert_eq!(xp.current_xp, 3);
        assert_eq!(xp.xp_to_next, 33);
    }

    #[test]
    fn test_zero_xp_is_ignored() {
        let mut xp = Experience::new();
        assert!(xp.add_xp(0).is_empty());
        assert_eq!(xp, Experience::new());
    }

    #[test]
    fn test_progress_resets_on_level_up() {
        let mut xp = Experience::new();
        xp.add_xp(5);
        assert_eq!(xp.progress(), 0.5);
        xp.add_xp(5);
        assert_eq!(xp.progress(), 0.0);
    }

    #[test]
    fn test_level_title() {
        assert_eq!(level_title(1), "Fledgling");
        assert_eq!(level_title(12), "Slayer");
        assert_eq!(level_title(80), "Ascendant");
    }
}
