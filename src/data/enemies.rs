//! Enemy templates for data-driven enemy creation
//!
//! These templates are loaded from RON files and copied into live enemies.

use serde::{Deserialize, Serialize};

use crate::combat::StatusEffects;
use crate::entities::Enemy;
use crate::progression::Skill;
use crate::progression::skills::*;

/// A template for creating enemies from external data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    /// Unique template ID for reference
    pub id: String,
    /// Display name
    pub name: String,
    pub max_health: i32,
    pub attack_light: i32,
    pub attack_medium: i32,
    pub attack_heavy: i32,
    #[serde(default)]
    pub defense: i32,
    /// Wealth awarded on defeat
    #[serde(default)]
    pub reward_wealth: u64,
    /// XP awarded on defeat
    #[serde(default)]
    pub reward_xp: u32,
    #[serde(default = "default_level_requirement")]
    pub level_requirement: u32,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

fn default_level_requirement() -> u32 {
    1
}

impl EnemyTemplate {
    /// A fresh enemy at full health
    pub fn instantiate(&self) -> Enemy {
        Enemy {
            id: self.id.clone(),
            name: self.name.clone(),
            max_health: self.max_health,
            current_health: self.max_health,
            attack_light: self.attack_light,
            attack_medium: self.attack_medium,
            attack_heavy: self.attack_heavy,
            defense: self.defense,
            reward_wealth: self.reward_wealth,
            reward_xp: self.reward_xp,
            level_requirement: self.level_requirement,
            skills: self.skills.clone(),
            status: StatusEffects::default(),
        }
    }
}

/// Collection of enemy templates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplates {
    pub templates: Vec<EnemyTemplate>,
}

impl EnemyTemplates {
    /// Find a template by ID
    pub fn find(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    hp: i32,
    attacks: (i32, i32, i32),
    defense: i32,
    reward_wealth: u64,
    reward_xp: u32,
    level_requirement: u32,
    skills: Vec<Skill>,
) -> EnemyTemplate {
    EnemyTemplate {
        id: id.to_string(),
        name: name.to_string(),
        max_health: hp,
        attack_light: attacks.0,
        attack_medium: attacks.1,
        attack_heavy: attacks.2,
        defense,
        reward_wealth,
        reward_xp,
        level_requirement,
        skills,
    }
}

/// Create default enemy templates (hardcoded fallback)
pub fn default_enemy_templates() -> EnemyTemplates {
    EnemyTemplates {
        templates: vec![
            // === Floors 1-3 ===
            template("goblin_scout", "Goblin Scout", 30, (4, 5, 6), 0, 10, 15, 1, vec![]),
            template("giant_rat", "Giant Rat", 25, (3, 4, 5), 1, 8, 12, 1, vec![]),
            template("goblin_boss", "Goblorg the Annoying", 80, (6, 8, 10), 2, 50, 75, 1,
                vec![skill_goblin_rage(), skill_heavy_strike()]),
            template("skeleton_warrior", "Skeleton Warrior", 70, (9, 10, 11), 5, 40, 50, 3,
                vec![skill_bone_armor()]),
            template("dire_wolf", "Dire Wolf", 50, (7, 8, 10), 2, 25, 30, 2,
                vec![skill_heavy_strike()]),
            template("crypt_crawler", "Crypt Crawler", 60, (8, 9, 9), 4, 35, 45, 3,
                vec![skill_poison_sting()]),
            template("lich_apprentice", "Lich Apprentice", 150, (10, 12, 14), 6, 100, 150, 3,
                vec![skill_drain_life(), skill_heavy_strike(), skill_frost_bolt()]),

            // === Floors 4-7 ===
            template("orc_grunt", "Orc Grunt", 100, (12, 15, 18), 3, 75, 80, 5, vec![]),
            template("goblin_shaman", "Goblin Shaman", 80, (7, 9, 10), 2, 60, 70, 4,
                vec![skill_quick_heal(), skill_weaken()]),
            template("orc_berserker", "Orc Berserker", 120, (14, 17, 22), 1, 90, 100, 6,
                vec![skill_heavy_strike()]),
            template("orc_chieftain", "Orc Chieftain", 250, (15, 18, 24), 5, 200, 250, 6,
                vec![skill_heavy_strike(), skill_defend()]),

            // === Floors 8-12 ===
            template("troll_scrapper", "Troll Scrapper", 200, (16, 19, 23), 6, 150, 180, 8,
                vec![skill_troll_regen()]),
            template("dark_elf_mage", "Dark Elf Mage", 130, (11, 14, 17), 4, 140, 170, 9,
                vec![skill_frost_bolt(), skill_weaken()]),
            template("imp_trickster", "Imp Trickster", 90, (13, 16, 16), 3, 120, 150, 7,
                vec![skill_multi_attack()]),
            template("troll_shaman", "Troll Shaman", 220, (14, 17, 20), 7, 180, 220, 10,
                vec![skill_troll_regen(), skill_quick_heal()]),
            template("spider_queen", "Spider Queen", 350, (18, 21, 25), 8, 300, 400, 10,
                vec![skill_poison_sting(), skill_multi_attack()]),

            // === Floors 13-17 ===
            template("stone_golem", "Stone Golem", 300, (15, 18, 28), 15, 250, 300, 13,
                vec![skill_defend()]),
            template("fire_elemental", "Fire Elemental", 200, (20, 24, 26), 10, 280, 350, 14,
                vec![skill_heavy_strike()]),
            template("dark_knight", "Dark Knight", 280, (22, 26, 30), 12, 320, 400, 15,
                vec![skill_heavy_strike(), skill_defend()]),
            template("elemental_lord", "Elemental Lord", 500, (25, 30, 35), 14, 500, 600, 15,
                vec![skill_frost_bolt(), skill_heavy_strike()]),

            // === Floors 18-20 ===
            template("shadow_assassin", "Shadow Assassin", 250, (30, 35, 32), 8, 400, 500, 18,
                vec![skill_multi_attack(), skill_poison_sting()]),
            template("iron_golem", "Iron Golem", 450, (20, 25, 38), 20, 450, 550, 19,
                vec![skill_golem_slam(), skill_defend()]),
            template("abyssal_demon", "Abyssal Demon", 400, (28, 33, 38), 16, 500, 650, 20, vec![]),
            template("demon_lord", "Azgaroth the Tormentor", 800, (35, 40, 48), 18, 1000, 1500, 20,
                vec![skill_heavy_strike(), skill_weaken(), skill_frost_bolt()]),
        ],
    }
}
