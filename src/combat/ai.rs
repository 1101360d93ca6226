//! Enemy decision making
//!
//! Every enemy turn builds a list of weighted candidate actions from the
//! enemy's skills and basic attacks, re-weighted by both combatants' health,
//! and makes a single weighted draw.

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::entities::Enemy;
use crate::progression::Skill;
use super::combatant::Combatant;
use super::damage::AttackTier;

/// What an enemy does on its turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnemyAction {
    Attack(AttackTier),
    Skill(Skill),
}

impl EnemyAction {
    pub fn describe(&self) -> String {
        match self {
            EnemyAction::Attack(tier) => format!("{} attack", tier.name()),
            EnemyAction::Skill(skill) => format!("skill {}", skill.name),
        }
    }
}

/// The action taken when no weighted draw is possible
pub const FALLBACK_ACTION: EnemyAction = EnemyAction::Attack(AttackTier::Medium);

/// Weight of the heal option by the enemy's own health fraction
fn heal_weight(enemy_hp: f32) -> u32 {
    if enemy_hp < 0.3 {
        80
    } else if enemy_hp < 0.6 {
        40
    } else {
        5
    }
}

/// Build the weighted candidate list for `enemy` facing `target`
pub fn candidate_actions(enemy: &Enemy, target: &impl Combatant) -> Vec<(EnemyAction, u32)> {
    let mut candidates = Vec::new();
    let enemy_hp = enemy.health_fraction();
    let target_hp = target.health_fraction();

    if let Some(heal) = enemy.skills.iter().find(|s| s.is_self_heal()) {
        candidates.push((EnemyAction::Skill(heal.clone()), heal_weight(enemy_hp)));
    }

    if enemy_hp < 0.5 {
        if let Some(defend) = enemy.skills.iter().find(|s| s.is_self_defend()) {
            candidates.push((EnemyAction::Skill(defend.clone()), 25));
        }
    }

    for skill in enemy.skills.iter().filter(|s| s.effect.is_offensive()) {
        let weight = if target_hp < 0.4 { 35 } else { 20 };
        candidates.push((EnemyAction::Skill(skill.clone()), weight));
    }

    // Buffs that aren't the defend option, and debuffs
    for skill in enemy.skills.iter().filter(|s| s.effect.is_modifier() && !s.is_self_defend()) {
        candidates.push((EnemyAction::Skill(skill.clone()), 15));
    }

    let (mut light, medium, mut heavy) = (25i32, 35i32, 20i32);
    if target_hp < 0.25 {
        heavy += 15;
        light -= 10;
    } else if enemy_hp > 0.8 {
        light += 10;
        heavy -= 5;
    }
    candidates.push((EnemyAction::Attack(AttackTier::Light), light.max(5) as u32));
    candidates.push((EnemyAction::Attack(AttackTier::Medium), medium.max(10) as u32));
    candidates.push((EnemyAction::Attack(AttackTier::Heavy), heavy.max(5) as u32));

    candidates
}

/// Pick the enemy's action with a single weighted draw
pub fn decide_enemy_action(enemy: &Enemy, target: &impl Combatant, rng: &mut impl Rng) -> EnemyAction {
    let candidates = candidate_actions(enemy, target);
    match WeightedIndex::new(candidates.iter().map(|(_, weight)| *weight)) {
        Ok(dist) => candidates[dist.sample(rng)].0.clone(),
        Err(e) => {
            log::warn!("{} has no valid action weights ({}), falling back", enemy.name, e);
            FALLBACK_ACTION
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_enemy_templates;
    use crate::entities::{Player, Role};
    use rand::rngs::StdRng;

    fn enemy(id: &str) -> Enemy {
        default_enemy_templates().find(id).unwrap().instantiate()
    }

    fn weight_of(candidates: &[(EnemyAction, u32)], action: &EnemyAction) -> Option<u32> {
        candidates.iter().find(|(a, _)| a == action).map(|(_, w)| *w)
    }

    #[test]
    fn test_plain_enemy_only_attacks() {
        let rat = enemy("giant_rat");
        let hero = Player::new("Hero", Role::Hunter);
        let candidates = candidate_actions(&rat, &hero);
        assert_eq!(candidates.len(), 3);
        // Full health enemy favours light attacks
        assert_eq!(weight_of(&candidates, &EnemyAction::Attack(AttackTier::Light)), Some(35));
        assert_eq!(weight_of(&candidates, &EnemyAction::Attack(AttackTier::Medium)), Some(35));
        assert_eq!(weight_of(&candidates, &EnemyAction::Attack(AttackTier::Heavy)), Some(15));
    }

    #[test]
    fn test_low_player_health_favours_heavy_hits() {
        let mut wolf = enemy("dire_wolf");
        wolf.current_health = 30;
        let mut hero = Player::new("Hero", Role::Hunter);
        let max = hero.max_health();
        hero.set_current_health(max / 5);
        let candidates = candidate_actions(&wolf, &hero);
        assert_eq!(weight_of(&candidates, &EnemyAction::Attack(AttackTier::Light)), Some(15));
        assert_eq!(weight_of(&candidates, &EnemyAction::Attack(AttackTier::Heavy)), Some(35));
        assert_eq!(weight_of(&candidates, &EnemyAction::Skill(crate::progression::skills::skill_heavy_strike())), Some(35));
    }

    #[test]
    fn test_heal_weight_tracks_enemy_health() {
        let mut shaman = enemy("goblin_shaman");
        let hero = Player::new("Hero", Role::Vampire);
        let heal = EnemyAction::Skill(crate::progression::skills::skill_quick_heal());

        assert_eq!(weight_of(&candidate_actions(&shaman, &hero), &heal), Some(5));
        shaman.current_health = 40; // 50%
        assert_eq!(weight_of(&candidate_actions(&shaman, &hero), &heal), Some(40));
        shaman.current_health = 16; // 20%
        assert_eq!(weight_of(&candidate_actions(&shaman, &hero), &heal), Some(80));
    }

    #[test]
    fn test_defend_only_below_half_health() {
        let mut chieftain = enemy("orc_chieftain");
        let hero = Player::new("Hero", Role::Hunter);
        let defend = EnemyAction::Skill(crate::progression::skills::skill_defend());
        assert_eq!(weight_of(&candidate_actions(&chieftain, &hero), &defend), None);
        chieftain.current_health = 100;
        assert_eq!(weight_of(&candidate_actions(&chieftain, &hero), &defend), Some(25));
    }

    #[test]
    fn test_decision_is_deterministic_for_a_seed() {
        let lich = enemy("lich_apprentice");
        let hero = Player::new("Hero", Role::Vampire);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20).map(|_| decide_enemy_action(&lich, &hero, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_every_candidate_can_be_drawn() {
        let lich = enemy("lich_apprentice");
        let hero = Player::new("Hero", Role::Hunter);
        let candidates = candidate_actions(&lich, &hero);
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2000 {
            seen.insert(decide_enemy_action(&lich, &hero, &mut rng).describe());
        }
        assert_eq!(seen.len(), candidates.len());
    }
}
