//! Damage calculation
//!
//! Flat mitigation: defense is subtracted from the incoming hit.

use serde::{Deserialize, Serialize};

/// Every landed hit deals at least this much
pub const MIN_DAMAGE: i32 = 1;

/// Basic attack strength tiers, shared by players and enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTier {
    Light,
    Medium,
    Heavy,
}

impl AttackTier {
    pub const ALL: [AttackTier; 3] = [AttackTier::Light, AttackTier::Medium, AttackTier::Heavy];

    pub fn name(&self) -> &'static str {
        match self {
            AttackTier::Light => "Light",
            AttackTier::Medium => "Medium",
            AttackTier::Heavy => "Heavy",
        }
    }
}

/// Damage that gets through `defense`
pub fn mitigate(amount: i32, defense: i32) -> i32 {
    (amount - defense.max(0)).max(MIN_DAMAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mitigation() {
        assert_eq!(mitigate(20, 5), 15);
        assert_eq!(mitigate(5, 5), MIN_DAMAGE);
        assert_eq!(mitigate(3, 50), MIN_DAMAGE);
        // Negative defense never amplifies a hit
        assert_eq!(mitigate(10, -4), 10);
    }
}
