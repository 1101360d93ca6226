//! Enemy instances
//!
//! A live enemy is a copy of an `EnemyTemplate` with its own health and
//! status effects.

use serde::{Deserialize, Serialize};

use crate::combat::{AttackTier, Combatant, StatusEffects};
use crate::progression::Skill;

/// An enemy in the current encounter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub max_health: i32,
    pub current_health: i32,
    pub attack_light: i32,
    pub attack_medium: i32,
    pub attack_heavy: i32,
    pub defense: i32,
    pub reward_wealth: u64,
    pub reward_xp: u32,
    pub level_requirement: u32,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub status: StatusEffects,
}

impl Combatant for Enemy {
    fn name(&self) -> &str { &self.name }
    fn current_health(&self) -> i32 { self.current_health }
    fn max_health(&self) -> i32 { self.max_health }

    fn set_current_health(&mut self, value: i32) {
        self.current_health = value.max(0).min(self.max_health.max(0));
    }

    fn base_attack(&self, tier: AttackTier) -> i32 {
        match tier {
            AttackTier::Light => self.attack_light,
            AttackTier::Medium => self.attack_medium,
            AttackTier::Heavy => self.attack_heavy,
        }
    }

    fn base_defense(&self) -> i32 { self.defense }
    fn status(&self) -> &StatusEffects { &self.status }
    fn status_mut(&mut self) -> &mut StatusEffects { &mut self.status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_enemy_templates;

    #[test]
    fn test_instance_starts_at_full_health() {
        let scout = default_enemy_templates().find("goblin_scout").unwrap().instantiate();
        assert_eq!(scout.current_health, scout.max_health);
        assert!(scout.status.is_empty());
    }

    #[test]
    fn test_defense_reduces_damage() {
        let mut skeleton = default_enemy_templates().find("skeleton_warrior").unwrap().instantiate();
        assert_eq!(skeleton.take_damage(14), 9);
        assert_eq!(skeleton.current_health, 61);
        assert_eq!(skeleton.take_damage(1), 1);
        skeleton.take_damage(500);
        assert!(skeleton.is_defeated());
        assert_eq!(skeleton.current_health, 0);
    }

    #[test]
    fn test_heal_is_capped_at_max() {
        let mut troll = default_enemy_templates().find("troll_scrapper").unwrap().instantiate();
        troll.take_damage(16);
        assert_eq!(troll.heal(15), 10);
        assert_eq!(troll.current_health, troll.max_health);
    }

    #[test]
    fn test_broken_max_health_does_not_panic() {
        let mut template = default_enemy_templates().find("goblin_scout").unwrap().clone();
        template.max_health = -1;
        let mut scout = template.instantiate();
        scout.take_damage(10);
        assert_eq!(scout.current_health, 0);
        assert!(scout.is_defeated());
    }
}
