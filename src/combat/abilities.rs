//! Skill resolution
//!
//! Applies a skill between its user and the opponent and describes the
//! outcome as combat log lines.

use crate::progression::{Skill, SkillEffectType};
use super::combatant::Combatant;
use super::status::StatusEffectType;

/// Resolve `skill` used by `user` against `opponent`.
///
/// `default_duration` is used for buffs/debuffs that don't set their own.
pub fn apply_skill<U, T>(skill: &Skill, user: &mut U, opponent: &mut T, default_duration: u32) -> Vec<String>
where
    U: Combatant + ?Sized,
    T: Combatant + ?Sized,
{
    let mut lines = Vec::new();
    match skill.effect {
        SkillEffectType::Damage | SkillEffectType::Drain => {
            let power = (skill.power + user.status().attack_modifier()).max(0);
            let dealt = opponent.take_damage(power);
            lines.push(format!(
                "{} uses {} on {} for {} damage! ({}/{})",
                user.name(), skill.name, opponent.name(), dealt,
                opponent.current_health(), opponent.max_health()
            ));
            if skill.effect == SkillEffectType::Drain {
                let healed = user.heal(skill.power / 3);
                lines.push(format!("{} drains {} health. ({}/{})",
                    user.name(), healed, user.current_health(), user.max_health()));
            }
        }
        SkillEffectType::Heal => {
            if skill.target.is_user() {
                let healed = user.heal(skill.power);
                lines.push(format!(
                    "{} uses {}, healing for {}. ({}/{})",
                    user.name(), skill.name, healed, user.current_health(), user.max_health()
                ));
            } else {
                lines.push(format!("{} fumbles {}: it cannot heal a foe.", user.name(), skill.name));
            }
        }
        SkillEffectType::BuffAttack | SkillEffectType::BuffDefense
        | SkillEffectType::DebuffAttack | SkillEffectType::DebuffDefense => {
            let Some(status) = StatusEffectType::from_skill(skill.effect) else {
                return lines;
            };
            let turns = skill.duration.unwrap_or(default_duration);
            let buff = matches!(skill.effect, SkillEffectType::BuffAttack | SkillEffectType::BuffDefense);
            let (recipient, sign) = if buff {
                user.status_mut().add_effect(status, skill.power, turns);
                (user.name().to_string(), '+')
            } else {
                opponent.status_mut().add_effect(status, skill.power, turns);
                (opponent.name().to_string(), '-')
            };
            let stat = match skill.effect {
                SkillEffectType::BuffAttack | SkillEffectType::DebuffAttack => "ATK",
                _ => "DEF",
            };
            lines.push(format!(
                "{} uses {}: {} {}{} {} for {} turn{}.",
                user.name(), skill.name, recipient, sign, skill.power, stat,
                turns, if turns == 1 { "" } else { "s" }
            ));
        }
    }
    lines
}
