//! Progression systems

pub mod xp;
pub mod skills;

pub use xp::{Experience, level_title, next_threshold, INITIAL_XP_THRESHOLD, POINTS_PER_LEVEL};
pub use skills::{Skill, SkillId, SkillEffectType, SkillTarget, unlock_candidates, hunter_skills, vampire_skills};
