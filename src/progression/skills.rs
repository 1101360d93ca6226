//! Skill system
//!
//! Abilities usable in combat by both the player and enemies, plus the
//! level-based unlock rules for player skills.

use serde::{Deserialize, Serialize};

/// Unique skill ID
pub type SkillId = String;

/// What a skill does when it resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkillEffectType {
    /// Deal `power` damage to the opponent
    Damage,
    /// Restore `power` health
    Heal,
    /// Deal `power` damage and recover a third of `power`
    Drain,
    /// Raise the user's attack by `power`
    BuffAttack,
    /// Raise the user's defense by `power`
    BuffDefense,
    /// Lower the opponent's attack by `power`
    DebuffAttack,
    /// Lower the opponent's defense by `power`
    DebuffDefense,
}

impl SkillEffectType {
    /// Effects that hurt the opponent directly
    pub fn is_offensive(&self) -> bool {
        matches!(self, SkillEffectType::Damage | SkillEffectType::Drain)
    }

    /// Timed attack/defense modifiers
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            SkillEffectType::BuffAttack
                | SkillEffectType::BuffDefense
                | SkillEffectType::DebuffAttack
                | SkillEffectType::DebuffDefense
        )
    }
}

/// Targeting type for skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SkillTarget {
    #[default]
    Enemy,
    SelfTarget,
    AllEnemies,
    AllAllies,
}

impl SkillTarget {
    /// Whether the skill lands on its user (one-on-one fights have no allies)
    pub fn is_user(&self) -> bool {
        matches!(self, SkillTarget::SelfTarget | SkillTarget::AllAllies)
    }
}

/// A skill definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub level_requirement: u32,
    #[serde(default)]
    pub is_unique: bool,
    pub effect: SkillEffectType,
    pub power: i32,
    #[serde(default)]
    pub target: SkillTarget,
    /// Stamina cost (players only)
    #[serde(default)]
    pub cost: i32,
    /// Turns a buff/debuff lasts; the configured default when absent
    #[serde(default)]
    pub duration: Option<u32>,
}

impl Skill {
    pub fn new(
        id: &str,
        name: &str,
        description: &str,
        level_requirement: u32,
        effect: SkillEffectType,
        power: i32,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            level_requirement,
            is_unique: false,
            effect,
            power,
            target: SkillTarget::Enemy,
            cost: 0,
            duration: None,
        }
    }

    pub fn targeting(mut self, target: SkillTarget) -> Self {
        self.target = target;
        self
    }

    pub fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    pub fn lasting(mut self, turns: u32) -> Self {
        self.duration = Some(turns);
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Self-targeted healing, the AI's recovery option
    pub fn is_self_heal(&self) -> bool {
        self.effect == SkillEffectType::Heal && self.target.is_user()
    }

    /// Self-targeted defense buff, the AI's defend option
    pub fn is_self_defend(&self) -> bool {
        self.effect == SkillEffectType::BuffDefense && self.target.is_user()
    }
}

/// Skills that a character reaching `level` may unlock, in priority order.
///
/// Every 50th level offers the role's unique skill for that level; every 5th
/// level offers a regular one. The caller learns the first it doesn't know.
pub fn unlock_candidates(available: &[Skill], level: u32) -> Vec<&Skill> {
    let mut candidates = Vec::new();
    if level % 50 == 0 {
        candidates.extend(available.iter().find(|s| s.is_unique && s.level_requirement == level));
    }
    if level % 5 == 0 {
        candidates.extend(available.iter().find(|s| !s.is_unique && s.level_requirement == level));
    }
    candidates
}

// =============================================================================
// Enemy skills
// =============================================================================

pub fn skill_heavy_strike() -> Skill {
    Skill::new("enemy_heavy_strike", "Heavy Strike", "A powerful blow.", 1, SkillEffectType::Damage, 15)
}

pub fn skill_quick_heal() -> Skill {
    Skill::new("enemy_quick_heal", "Quick Heal", "Restores a small amount of health.", 1, SkillEffectType::Heal, 20)
        .targeting(SkillTarget::SelfTarget)
}

pub fn skill_defend() -> Skill {
    Skill::new("enemy_defend", "Defend", "Braces for the next blow.", 1, SkillEffectType::BuffDefense, 50)
        .targeting(SkillTarget::SelfTarget)
        .lasting(1)
}

pub fn skill_bone_armor() -> Skill {
    Skill::new("skel_bone_armor", "Bone Armor", "+Def for a few turns.", 3, SkillEffectType::BuffDefense, 10)
        .targeting(SkillTarget::SelfTarget)
}

pub fn skill_multi_attack() -> Skill {
    Skill::new("enemy_multi_attack", "Multi-Attack", "A flurry of quick hits.", 5, SkillEffectType::Damage, 8)
}

pub fn skill_poison_sting() -> Skill {
    Skill::new("enemy_poison", "Poison Sting", "A venomous jab.", 4, SkillEffectType::Damage, 5)
}

pub fn skill_weaken() -> Skill {
    Skill::new("enemy_weaken", "Weaken", "Lowers the target's attack.", 6, SkillEffectType::DebuffAttack, 5)
}

pub fn skill_frost_bolt() -> Skill {
    Skill::new("enemy_frostbolt", "Frost Bolt", "Deals cold damage.", 7, SkillEffectType::Damage, 20)
}

pub fn skill_goblin_rage() -> Skill {
    Skill::new("goblin_boss_rage", "Rage", "+Atk briefly.", 1, SkillEffectType::BuffAttack, 5)
        .targeting(SkillTarget::SelfTarget)
}

pub fn skill_drain_life() -> Skill {
    Skill::new("lich_drain_life", "Drain Life", "Damages the target and heals the caster.", 3, SkillEffectType::Drain, 25)
}

pub fn skill_troll_regen() -> Skill {
    Skill::new("troll_regen", "Regeneration", "Knits wounds shut.", 8, SkillEffectType::Heal, 15)
        .targeting(SkillTarget::SelfTarget)
}

pub fn skill_golem_slam() -> Skill {
    Skill::new("golem_slam", "Golem Slam", "A crushing, ground-shaking blow.", 15, SkillEffectType::Damage, 40)
        .targeting(SkillTarget::AllEnemies)
}

// =============================================================================
// Player skills
// =============================================================================

/// Skills a Hunter can learn over a run
pub fn hunter_skills() -> Vec<Skill> {
    vec![
        Skill::new("aimed_shot", "Aimed Shot", "Deals a powerful ranged attack.", 1, SkillEffectType::Damage, 18)
            .with_cost(12),
        Skill::new("hunters_mark", "Hunter's Mark", "Exposes weak points in the prey's hide.", 5, SkillEffectType::DebuffDefense, 4)
            .with_cost(10),
        Skill::new("silver_volley", "Silver Volley", "A hail of silvered bolts.", 10, SkillEffectType::Damage, 35)
            .with_cost(30),
        Skill::new("monster_slayer", "Monster Slayer", "The culmination of a lifetime of hunting.", 50, SkillEffectType::Damage, 120)
            .with_cost(40)
            .unique(),
    ]
}

/// Skills a Vampire can learn over a run
pub fn vampire_skills() -> Vec<Skill> {
    vec![
        Skill::new("vampire_bite", "Vampire Bite", "Drains health from the enemy.", 1, SkillEffectType::Drain, 15)
            .with_cost(12),
        Skill::new("blood_shield", "Blood Shield", "Hardens blood into armor.", 5, SkillEffectType::BuffDefense, 6)
            .targeting(SkillTarget::SelfTarget)
            .with_cost(10),
        Skill::new("crimson_drain", "Crimson Drain", "Tears the life out of the prey.", 10, SkillEffectType::Drain, 30)
            .with_cost(25),
        Skill::new("night_sovereign", "Night Sovereign", "Awakens the blood of the first lineage.", 50, SkillEffectType::BuffAttack, 20)
            .targeting(SkillTarget::SelfTarget)
            .with_cost(30)
            .unique(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlock_candidates_every_fifth_level() {
        let skills = hunter_skills();
        assert!(unlock_candidates(&skills, 4).is_empty());
        let at_five = unlock_candidates(&skills, 5);
        assert_eq!(at_five.len(), 1);
        assert_eq!(at_five[0].id, "hunters_mark");
        // Level 15 is a multiple of five but nothing is defined there
        assert!(unlock_candidates(&skills, 15).is_empty());
    }

    #[test]
    fn test_unique_skill_comes_first_at_fiftieth_level() {
        let mut skills = vampire_skills();
        skills.push(Skill::new("fifty_regular", "Regular", "", 50, SkillEffectType::Damage, 1));
        let candidates = unlock_candidates(&skills, 50);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].id, "night_sovereign");
        assert_eq!(candidates[1].id, "fifty_regular");
    }

    #[test]
    fn test_ai_role_predicates() {
        assert!(skill_quick_heal().is_self_heal());
        assert!(skill_troll_regen().is_self_heal());
        assert!(skill_defend().is_self_defend());
        assert!(!skill_heavy_strike().is_self_heal());
        assert!(skill_drain_life().effect.is_offensive());
        assert!(skill_weaken().effect.is_modifier());
        assert!(!SkillTarget::AllEnemies.is_user());
    }
}
