//! Shared combat behavior of players and enemies

use super::damage::{mitigate, AttackTier};
use super::status::StatusEffects;

/// Anything that can trade blows in a one-on-one fight
pub trait Combatant {
    fn name(&self) -> &str;
    fn current_health(&self) -> i32;
    fn max_health(&self) -> i32;
    fn set_current_health(&mut self, value: i32);
    /// Attack value of a tier before modifiers
    fn base_attack(&self, tier: AttackTier) -> i32;
    /// Defense before modifiers
    fn base_defense(&self) -> i32;
    fn status(&self) -> &StatusEffects;
    fn status_mut(&mut self) -> &mut StatusEffects;

    /// Attack value of a tier including active modifiers
    fn attack(&self, tier: AttackTier) -> i32 {
        (self.base_attack(tier) + self.status().attack_modifier()).max(0)
    }

    /// Defense including active modifiers
    fn defense(&self) -> i32 {
        (self.base_defense() + self.status().defense_modifier()).max(0)
    }

    /// Apply an incoming hit, returning the damage actually dealt
    fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = mitigate(amount, self.defense());
        let remaining = (self.current_health() - dealt).max(0);
        self.set_current_health(remaining);
        log::debug!(
            "{} took {} damage (reduced by {} defense). HP: {}/{}",
            self.name(), dealt, self.defense(), remaining, self.max_health()
        );
        dealt
    }

    /// Restore health up to the maximum, returning the amount restored
    fn heal(&mut self, amount: i32) -> i32 {
        let actual = amount.max(0).min(self.max_health() - self.current_health()).max(0);
        self.set_current_health(self.current_health() + actual);
        actual
    }

    fn is_defeated(&self) -> bool {
        self.current_health() <= 0
    }

    /// Current health as a fraction of the maximum
    fn health_fraction(&self) -> f32 {
        if self.max_health() <= 0 {
            return 0.0;
        }
        self.current_health() as f32 / self.max_health() as f32
    }
}
