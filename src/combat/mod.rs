//! Combat system

pub mod damage;
pub mod status;
pub mod combatant;
pub mod abilities;
pub mod ai;

pub use damage::{mitigate, AttackTier, MIN_DAMAGE};
pub use status::{StatusEffect, StatusEffectType, StatusEffects};
pub use combatant::Combatant;
pub use abilities::apply_skill;
pub use ai::{candidate_actions, decide_enemy_action, EnemyAction};
