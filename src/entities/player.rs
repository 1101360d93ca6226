//! Player character
//!
//! Role-specific base values, stat allocation, stamina, and leveling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::combat::{AttackTier, Combatant, StatusEffects};
use crate::progression::{unlock_candidates, Experience, Skill, POINTS_PER_LEVEL};
use crate::progression::skills::{hunter_skills, vampire_skills};

/// HP gained per Vitality point
pub const VITALITY_HP_BONUS: i32 = 8;
/// HP gained per Blood Potency point
pub const BLOOD_POTENCY_HP_BONUS: i32 = 10;
/// Added to every attack tier per Attack Power point
pub const ATTACK_POINT_BOOST: i32 = 1;
/// Defense gained per Defense Rating point
pub const DEFENSE_PER_POINT: i32 = 2;
pub const BASE_MAX_STAMINA: i32 = 100;
/// Stamina recovered at the end of each player turn
pub const STAMINA_REGEN_PER_TURN: i32 = 12;
pub const STARTING_WEALTH: u64 = 100;

// =============================================================================
// Roles
// =============================================================================

/// Playable bloodlines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Vampire,
    Hunter,
}

/// Starting values of a role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub base_health: i32,
    pub attack_light: i32,
    pub attack_medium: i32,
    pub attack_heavy: i32,
    pub defense: i32,
    pub vitality: i32,
    pub blood_potency: i32,
}

impl Role {
    /// Map a menu choice to a role; anything but 1 picks Hunter
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => Role::Vampire,
            _ => Role::Hunter,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Role::Vampire => "Vampire",
            Role::Hunter => "Hunter",
        }
    }

    pub fn profile(&self) -> RoleProfile {
        match self {
            Role::Vampire => RoleProfile {
                base_health: 100,
                attack_light: 8,
                attack_medium: 12,
                attack_heavy: 16,
                defense: 5,
                vitality: 7,
                blood_potency: 10,
            },
            Role::Hunter => RoleProfile {
                base_health: 120,
                attack_light: 10,
                attack_medium: 14,
                attack_heavy: 20,
                defense: 3,
                vitality: 10,
                blood_potency: 0,
            },
        }
    }

    /// Max HP gained per character level
    pub fn health_per_level(&self) -> i32 {
        match self {
            Role::Vampire => 5,
            Role::Hunter => 8,
        }
    }

    /// Which stat raises this role's health
    pub fn can_allocate(&self, stat: StatType) -> bool {
        match stat {
            StatType::Vitality => *self == Role::Hunter,
            StatType::BloodPotency => *self == Role::Vampire,
            StatType::AttackPower | StatType::DefenseRating => true,
        }
    }

    /// Every skill this role can learn
    pub fn available_skills(&self) -> Vec<Skill> {
        match self {
            Role::Vampire => vampire_skills(),
            Role::Hunter => hunter_skills(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}' (expected vampire or hunter)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "vampire" | "1" => Ok(Role::Vampire),
            "hunter" | "2" => Ok(Role::Hunter),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Stats that accept allocated points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatType {
    /// Hunter health
    Vitality,
    /// Vampire health
    BloodPotency,
    /// All attack tiers
    AttackPower,
    DefenseRating,
}

impl StatType {
    pub fn name(&self) -> &'static str {
        match self {
            StatType::Vitality => "Vitality",
            StatType::BloodPotency => "Blood Potency",
            StatType::AttackPower => "Attack Power",
            StatType::DefenseRating => "Defense Rating",
        }
    }
}

/// Why a stat point could not be spent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("no active player")]
    NoPlayer,
    #[error("no stat points available")]
    NoPointsAvailable,
    #[error("a {} cannot raise {}", .role.name(), .stat.name())]
    WrongRole { role: Role, stat: StatType },
}

/// Stamina pool for attacks and skills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamina {
    pub current: i32,
    pub max: i32,
}

impl Stamina {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Spend stamina if enough is available; leaves the pool untouched otherwise
    pub fn spend(&mut self, amount: i32) -> bool {
        if self.current >= amount {
            self.current -= amount;
            true
        } else {
            false
        }
    }

    pub fn restore(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

/// Outcome of an XP award
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    /// Levels reached, in order
    pub levels: Vec<u32>,
    /// Skills unlocked along the way
    pub skills_learned: Vec<Skill>,
    pub points_gained: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        !self.levels.is_empty()
    }
}

// =============================================================================
// Player
// =============================================================================

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    role: Role,
    base: RoleProfile,
    vitality: i32,
    blood_potency: i32,
    /// Points put into Attack
    attack_power: i32,
    /// Points put into Defense
    defense_rating: i32,
    max_health: i32,
    current_health: i32,
    stamina: Stamina,
    experience: Experience,
    wealth: u64,
    stat_points: u32,
    learned_skills: Vec<Skill>,
    status: StatusEffects,
}

impl Player {
    /// Create a fresh level 1 character. Starting skills are known from the outset.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() { role.name().to_string() } else { name.trim().to_string() };
        let base = role.profile();
        let mut player = Self {
            name,
            role,
            base,
            vitality: base.vitality,
            blood_potency: base.blood_potency,
            attack_power: 0,
            defense_rating: 0,
            max_health: 0,
            current_health: 0,
            stamina: Stamina::new(BASE_MAX_STAMINA),
            experience: Experience::new(),
            wealth: STARTING_WEALTH,
            stat_points: 0,
            learned_skills: Vec::new(),
            status: StatusEffects::default(),
        };
        player.max_health = player.compute_max_health();
        player.current_health = player.max_health;
        for skill in role.available_skills().into_iter().filter(|s| s.level_requirement <= 1) {
            player.learn_skill(skill);
        }
        player
    }

    fn compute_max_health(&self) -> i32 {
        let level = self.experience.level as i32;
        let mut health = self.base.base_health
            + self.vitality * VITALITY_HP_BONUS
            + level * self.role.health_per_level();
        if self.role == Role::Vampire {
            health += self.blood_potency * BLOOD_POTENCY_HP_BONUS;
        }
        health
    }

    /// Recompute max HP, raising current HP by any increase
    fn refresh_max_health(&mut self) {
        let old = self.max_health;
        self.max_health = self.compute_max_health();
        self.current_health = (self.current_health + (self.max_health - old).max(0)).min(self.max_health);
    }

    // --- Accessors ---

    pub fn role(&self) -> Role { self.role }
    pub fn level(&self) -> u32 { self.experience.level }
    pub fn experience(&self) -> &Experience { &self.experience }
    pub fn wealth(&self) -> u64 { self.wealth }
    pub fn stat_points(&self) -> u32 { self.stat_points }
    pub fn stamina(&self) -> Stamina { self.stamina }
    pub fn vitality(&self) -> i32 { self.vitality }
    pub fn blood_potency(&self) -> i32 { self.blood_potency }
    pub fn attack_power(&self) -> i32 { self.attack_power }
    pub fn defense_rating(&self) -> i32 { self.defense_rating }
    pub fn learned_skills(&self) -> &[Skill] { &self.learned_skills }

    pub fn learned_skill(&self, id: &str) -> Option<&Skill> {
        self.learned_skills.iter().find(|s| s.id == id)
    }

    // --- Resources ---

    pub fn restore_full_health(&mut self) {
        log::debug!("{} restoring health. Before: {}/{}", self.name, self.current_health, self.max_health);
        self.current_health = self.max_health;
    }

    /// Spend stamina; false (and no change) when the pool is too low
    pub fn consume_stamina(&mut self, amount: i32) -> bool {
        if self.stamina.spend(amount) {
            log::debug!("{} consumed {} stamina. Remaining: {}/{}", self.name, amount, self.stamina.current, self.stamina.max);
            true
        } else {
            log::warn!("{} tried to use {} stamina, but only has {}.", self.name, amount, self.stamina.current);
            false
        }
    }

    pub fn regenerate_stamina(&mut self) {
        self.stamina.restore(STAMINA_REGEN_PER_TURN);
        log::debug!("{} recovered stamina. Current: {}/{}", self.name, self.stamina.current, self.stamina.max);
    }

    pub fn can_afford(&self, cost: i32) -> bool {
        self.stamina.current >= cost
    }

    // --- Progression ---

    pub fn gain_wealth(&mut self, amount: u64) {
        self.wealth = self.wealth.saturating_add(amount);
    }

    /// Award XP, applying every level-up it causes.
    ///
    /// Each level grants stat points and may unlock a skill. When at least
    /// one level was gained, health and stamina are fully restored.
    pub fn gain_xp(&mut self, amount: u32) -> LevelUpReport {
        let mut report = LevelUpReport::default();
        let levels = self.experience.add_xp(amount);
        log::debug!("{} gained {} XP. Total: {}/{}", self.name, amount, self.experience.current_xp, self.experience.xp_to_next);

        for level in levels {
            self.stat_points += POINTS_PER_LEVEL;
            report.points_gained += POINTS_PER_LEVEL;
            self.refresh_max_health();
            if let Some(skill) = self.check_skill_unlocks(level) {
                log::info!("{} unlocked skill: {}", self.name, skill.name);
                report.skills_learned.push(skill);
            }
            log::info!("{} leveled up to {}! HP: {}", self.name, level, self.max_health);
            report.levels.push(level);
        }

        if report.leveled_up() {
            self.restore_full_health();
            self.stamina.refill();
        }
        report
    }

    fn check_skill_unlocks(&mut self, level: u32) -> Option<Skill> {
        let available = self.role.available_skills();
        let candidates: Vec<Skill> = unlock_candidates(&available, level).into_iter().cloned().collect();
        candidates.into_iter().find(|skill| self.learn_skill(skill.clone()))
    }

    /// Learn a skill; false if already known
    pub fn learn_skill(&mut self, skill: Skill) -> bool {
        if self.learned_skills.iter().any(|s| s.id == skill.id) {
            return false;
        }
        self.learned_skills.push(skill);
        true
    }

    // --- Stat allocation ---

    /// Spend one stat point on `stat`
    pub fn allocate(&mut self, stat: StatType) -> Result<(), AllocationError> {
        if !self.role.can_allocate(stat) {
            return Err(AllocationError::WrongRole { role: self.role, stat });
        }
        if self.stat_points == 0 {
            return Err(AllocationError::NoPointsAvailable);
        }
        self.stat_points -= 1;
        match stat {
            StatType::Vitality => {
                self.vitality += 1;
                self.refresh_max_health();
            }
            StatType::BloodPotency => {
                self.blood_potency += 1;
                self.refresh_max_health();
            }
            StatType::AttackPower => self.attack_power += 1,
            StatType::DefenseRating => self.defense_rating += 1,
        }
        log::debug!("{} allocated a point to {}. Points left: {}", self.name, stat.name(), self.stat_points);
        Ok(())
    }

    // --- Display ---

    pub fn display_stats(&self) -> String {
        let points = if self.stat_points > 0 { format!(" ({} Avail)", self.stat_points) } else { String::new() };
        format!(
            "Lvl:{}{} HP:{}/{} ATK:{} DEF:{} W:{} XP:{}/{}",
            self.level(), points, self.current_health, self.max_health,
            self.attack(AttackTier::Medium), self.defense(), self.wealth,
            self.experience.current_xp, self.experience.xp_to_next
        )
    }

    pub fn display_role(&self) -> &'static str {
        self.role.name()
    }
}

impl Combatant for Player {
    fn name(&self) -> &str { &self.name }
    fn current_health(&self) -> i32 { self.current_health }
    fn max_health(&self) -> i32 { self.max_health }

    fn set_current_health(&mut self, value: i32) {
        self.current_health = value.clamp(0, self.max_health);
    }

    fn base_attack(&self, tier: AttackTier) -> i32 {
        let base = match tier {
            AttackTier::Light => self.base.attack_light,
            AttackTier::Medium => self.base.attack_medium,
            AttackTier::Heavy => self.base.attack_heavy,
        };
        base + self.attack_power * ATTACK_POINT_BOOST
    }

    fn base_defense(&self) -> i32 {
        self.base.defense + self.defense_rating * DEFENSE_PER_POINT
    }

    fn status(&self) -> &StatusEffects { &self.status }
    fn status_mut(&mut self) -> &mut StatusEffects { &mut self.status }
}
