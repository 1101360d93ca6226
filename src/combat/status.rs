//! Status effects system
//!
//! Timed attack/defense modifiers applied by buff and debuff skills.
//! Effects tick at the start of their owner's turn and expire when their
//! remaining turns reach zero.

use serde::{Deserialize, Serialize};

use crate::progression::SkillEffectType;

/// Kinds of timed modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectType {
    AttackUp,
    DefenseUp,
    AttackDown,
    DefenseDown,
}

impl StatusEffectType {
    /// The modifier a buff/debuff skill applies, if any
    pub fn from_skill(effect: SkillEffectType) -> Option<Self> {
        match effect {
            SkillEffectType::BuffAttack => Some(StatusEffectType::AttackUp),
            SkillEffectType::BuffDefense => Some(StatusEffectType::DefenseUp),
            SkillEffectType::DebuffAttack => Some(StatusEffectType::AttackDown),
            SkillEffectType::DebuffDefense => Some(StatusEffectType::DefenseDown),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StatusEffectType::AttackUp => "attack boost",
            StatusEffectType::DefenseUp => "defense boost",
            StatusEffectType::AttackDown => "weakness",
            StatusEffectType::DefenseDown => "exposed guard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub effect_type: StatusEffectType,
    pub amount: i32,
    pub turns_remaining: u32,
}

/// Active modifiers on a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Add an effect. Re-applying refreshes the duration and keeps the stronger amount.
    pub fn add_effect(&mut self, effect_type: StatusEffectType, amount: i32, turns: u32) {
        if turns == 0 {
            return;
        }
        if let Some(existing) = self.effects.iter_mut().find(|e| e.effect_type == effect_type) {
            existing.turns_remaining = existing.turns_remaining.max(turns);
            existing.amount = existing.amount.max(amount);
        } else {
            self.effects.push(StatusEffect {
                effect_type,
                amount,
                turns_remaining: turns,
            });
        }
    }

    /// Check if an effect is active
    pub fn has_effect(&self, effect_type: StatusEffectType) -> bool {
        self.effects.iter().any(|e| e.effect_type == effect_type)
    }

    fn amount_of(&self, effect_type: StatusEffectType) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.effect_type == effect_type)
            .map(|e| e.amount)
            .sum()
    }

    /// Net change to attack values
    pub fn attack_modifier(&self) -> i32 {
        self.amount_of(StatusEffectType::AttackUp) - self.amount_of(StatusEffectType::AttackDown)
    }

    /// Net change to defense
    pub fn defense_modifier(&self) -> i32 {
        self.amount_of(StatusEffectType::DefenseUp) - self.amount_of(StatusEffectType::DefenseDown)
    }

    /// Count down every effect by one turn, returning the ones that expired
    pub fn tick(&mut self) -> Vec<StatusEffectType> {
        let mut expired = Vec::new();
        for effect in &mut self.effects {
            effect.turns_remaining = effect.turns_remaining.saturating_sub(1);
            if effect.turns_remaining == 0 {
                expired.push(effect.effect_type);
            }
        }
        self.effects.retain(|e| e.turns_remaining > 0);
        expired
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
