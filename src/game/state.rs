//! Game state machine
//!
//! Owns the player, the current enemy and the dungeon progress, and turns
//! player commands into state transitions and combat log entries.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::combat::{apply_skill, decide_enemy_action, AttackTier, Combatant, EnemyAction, StatusEffectType};
use crate::config::GameConfig;
use crate::data::DataManager;
use crate::entities::{enemy_for_floor, AllocationError, Enemy, Player, Role, StatType};
use super::log::{CombatLog, LogEntry, MessageCategory};
use super::time::EnemyTurnTimer;
use super::turn::{Phase, TurnManager};

/// Commands the player can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack(AttackTier),
    Flee,
    NextBattle,
    AdvanceFloor,
}

impl PlayerAction {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerAction::Attack(AttackTier::Light) => "Light Attack",
            PlayerAction::Attack(AttackTier::Medium) => "Medium Attack",
            PlayerAction::Attack(AttackTier::Heavy) => "Heavy Attack",
            PlayerAction::Flee => "Flee",
            PlayerAction::NextBattle => "Next Battle",
            PlayerAction::AdvanceFloor => "Advance Floor",
        }
    }
}

/// Character choices made before a run starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSelection {
    pub name: String,
    pub role: Role,
}

impl Default for PlayerSelection {
    fn default() -> Self {
        Self {
            name: String::new(),
            role: Role::Hunter,
        }
    }
}

/// Read-only view of the game for the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub player: Option<Player>,
    pub enemy: Option<Enemy>,
    pub phase: Phase,
    pub round: u32,
    pub floor: u32,
    pub floor_name: Option<String>,
    pub enemies_cleared_on_floor: u32,
    pub enemies_to_clear_for_boss: u32,
    pub is_boss_encounter: bool,
    pub can_advance_floor: bool,
    pub is_player_turn: bool,
    pub is_game_over: bool,
    /// Combat actions the player can currently pay for
    pub affordable_actions: Vec<PlayerAction>,
    /// Fraction of the way to the next level (0.0 - 1.0)
    pub xp_progress: f32,
    pub log: Vec<LogEntry>,
}

/// The main game struct that holds all run state
pub struct Game {
    config: GameConfig,
    /// External game data (enemy templates, dungeon layout)
    data: DataManager,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    selection: PlayerSelection,
    player: Option<Player>,
    current_enemy: Option<Enemy>,
    log: CombatLog,
    turns: TurnManager,
    enemy_timer: EnemyTurnTimer,
    /// Current floor number
    floor: u32,
    enemies_cleared_on_floor: u32,
    is_boss_encounter: bool,
    can_advance_floor: bool,
}

impl Game {
    /// Create a game, loading dungeon data from the configured directory
    pub fn new(config: GameConfig) -> Self {
        let data = match &config.data_dir {
            Some(dir) => DataManager::load_from_dir(dir),
            None => DataManager::default(),
        };
        Self::with_data(config, data)
    }

    /// Create a game with explicit dungeon data
    pub fn with_data(config: GameConfig, data: DataManager) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let enemy_timer = EnemyTurnTimer::new(config.enemy_turn_delay());
        Self {
            config,
            data,
            rng,
            selection: PlayerSelection::default(),
            player: None,
            current_enemy: None,
            log: CombatLog::new(),
            turns: TurnManager::new(),
            enemy_timer,
            floor: 1,
            enemies_cleared_on_floor: 0,
            is_boss_encounter: false,
            can_advance_floor: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &GameConfig { &self.config }
    pub fn data(&self) -> &DataManager { &self.data }
    pub fn selection(&self) -> &PlayerSelection { &self.selection }
    pub fn player(&self) -> Option<&Player> { self.player.as_ref() }
    pub fn current_enemy(&self) -> Option<&Enemy> { self.current_enemy.as_ref() }
    pub fn log(&self) -> &CombatLog { &self.log }
    pub fn phase(&self) -> Phase { self.turns.phase() }
    pub fn round(&self) -> u32 { self.turns.round() }
    pub fn floor(&self) -> u32 { self.floor }
    pub fn enemies_cleared_on_floor(&self) -> u32 { self.enemies_cleared_on_floor }
    pub fn is_boss_encounter(&self) -> bool { self.is_boss_encounter }
    pub fn can_advance_floor(&self) -> bool { self.can_advance_floor }
    pub fn is_player_turn(&self) -> bool { self.turns.is_player_turn() }
    pub fn is_game_over(&self) -> bool { self.turns.is_game_over() }

    /// Whether the enemy's delayed answer is still pending
    pub fn enemy_turn_pending(&self) -> bool {
        self.enemy_timer.is_armed()
    }

    // =========================================================================
    // Character selection
    // =========================================================================

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.selection.name = name.into();
        log::debug!("Name updated: {:?}", self.selection);
    }

    pub fn update_role(&mut self, role: Role) {
        self.selection.role = role;
        log::debug!("Role updated: {:?}", self.selection);
    }

    /// Start a run with the current selection
    pub fn start_from_selection(&mut self) {
        let PlayerSelection { name, role } = self.selection.clone();
        self.initialize_player(name, role);
    }

    /// Forget the selection and the whole run
    pub fn reset(&mut self) {
        self.selection = PlayerSelection::default();
        self.clear_run();
        log::debug!("Game reset.");
    }

    fn clear_run(&mut self) {
        self.player = None;
        self.current_enemy = None;
        self.log = CombatLog::new();
        self.turns = TurnManager::new();
        self.enemy_timer.disarm();
        self.floor = 1;
        self.enemies_cleared_on_floor = 0;
        self.is_boss_encounter = false;
        self.can_advance_floor = false;
    }

    /// Create the player and start a run on floor 1
    pub fn initialize_player(&mut self, name: impl Into<String>, role: Role) {
        self.clear_run();
        let player = Player::new(name, role);
        log::info!("Initializing player: {} the {}", player.name, role);
        self.player = Some(player);
        self.log.push("Game Started! You are on Floor 1.", MessageCategory::System);
    }

    // =========================================================================
    // Dungeon flow
    // =========================================================================

    /// Start the next encounter on the current floor
    pub fn find_next_battle(&mut self) {
        if self.player.is_none() || self.turns.is_game_over() {
            return;
        }
        if self.current_enemy.is_some() {
            log::warn!("Already in battle!");
            self.log.push("Already in combat!", MessageCategory::Warning);
            return;
        }
        if self.can_advance_floor {
            self.log.push("Floor cleared! Advance to the next floor.", MessageCategory::Warning);
            return;
        }

        let Some(floor) = self.data.floors.find(self.floor).cloned() else {
            log::error!("Could not find data for floor {}", self.floor);
            self.log.push("Error: Dungeon floor data missing.", MessageCategory::Warning);
            return;
        };

        let fight_boss = floor.has_boss() && self.enemies_cleared_on_floor >= floor.enemies_to_clear_for_boss;

        match enemy_for_floor(&self.data, self.floor, fight_boss, &mut self.rng) {
            Ok(enemy) => {
                let message = if fight_boss {
                    format!("The Floor Boss appears: {}!", enemy.name)
                } else {
                    format!("You encounter a {}!", enemy.name)
                };
                log::debug!("Starting battle with {}. Boss: {}", enemy.name, fight_boss);
                self.log.push(message, MessageCategory::Combat);
                self.current_enemy = Some(enemy);
                self.is_boss_encounter = fight_boss;
                self.turns.begin_battle();
            }
            Err(e) => {
                log::error!("{}", e);
                if fight_boss {
                    self.log.push(format!("Error finding boss for floor {}.", self.floor), MessageCategory::Warning);
                    log::error!("Boss should spawn but wasn't found! Marking floor clear as fallback.");
                    self.can_advance_floor = true;
                    self.log.push("Error finding boss, floor marked clear.", MessageCategory::Warning);
                } else {
                    self.log.push(format!("No enemies found on floor {}.", self.floor), MessageCategory::Warning);
                }
            }
        }
    }

    /// Descend once the current floor is cleared
    pub fn advance_floor(&mut self) {
        if self.player.is_none() || self.turns.is_game_over() {
            return;
        }
        if !self.can_advance_floor {
            log::warn!("Attempted to advance floor when not allowed.");
            self.log.push("You must clear the current floor first!", MessageCategory::Warning);
            return;
        }
        if self.current_enemy.is_some() {
            log::warn!("Attempted to advance floor during combat.");
            self.log.push("Cannot advance during combat!", MessageCategory::Warning);
            return;
        }

        let next = self.floor + 1;
        let Some(next_floor) = self.data.floors.find(next).cloned() else {
            log::info!("Player cleared the last available floor.");
            self.log.push("You have cleared the deepest depths... for now!", MessageCategory::System);
            return;
        };

        log::info!("Advancing player to floor {}.", next);
        self.floor = next;
        self.enemies_cleared_on_floor = 0;
        self.is_boss_encounter = false;
        self.can_advance_floor = false;
        self.turns.end_battle();
        self.log.push(
            format!("You descend deeper... Now on Floor {}: {}.", next, next_floor.name),
            MessageCategory::System,
        );

        if let Some(player) = &self.player {
            if player.level() < next_floor.min_player_level {
                self.log.push(
                    format!("The air grows heavy. Foes here expect level {}.", next_floor.min_player_level),
                    MessageCategory::Warning,
                );
            }
        }
    }

    // =========================================================================
    // Player turn
    // =========================================================================

    /// Whether the player could pay for `action` right now
    pub fn can_afford(&self, action: PlayerAction) -> bool {
        let Some(player) = &self.player else {
            return false;
        };
        match action {
            PlayerAction::Attack(tier) => player.can_afford(self.config.attack_cost(tier)),
            PlayerAction::Flee => player.can_afford(self.config.flee_cost),
            PlayerAction::NextBattle | PlayerAction::AdvanceFloor => true,
        }
    }

    fn ready_for_combat_action(&self, what: &str) -> bool {
        if self.player.is_none() || self.current_enemy.is_none() {
            return false;
        }
        if !self.turns.is_player_turn() {
            log::warn!("Invalid state for {} ({:?})", what, self.turns.phase());
            return false;
        }
        true
    }

    /// Handle a player command
    pub fn process_player_action(&mut self, action: PlayerAction) {
        let tier = match action {
            PlayerAction::NextBattle => return self.find_next_battle(),
            PlayerAction::AdvanceFloor => return self.advance_floor(),
            PlayerAction::Attack(tier) => Some(tier),
            PlayerAction::Flee => None,
        };
        if !self.ready_for_combat_action(action.label()) {
            return;
        }
        let cost = match tier {
            Some(tier) => self.config.attack_cost(tier),
            None => self.config.flee_cost,
        };
        let (Some(player), Some(enemy)) = (self.player.as_mut(), self.current_enemy.as_mut()) else {
            return;
        };

        if !player.consume_stamina(cost) {
            self.log.push(format!("Not enough stamina for {}!", action.label()), MessageCategory::Warning);
            return;
        }

        match tier {
            Some(tier) => {
                let dealt = enemy.take_damage(player.attack(tier));
                self.log.push(
                    format!(
                        "{} uses {} Attack (-{} Sta) for {} damage. ({}/{})",
                        player.name, tier.name(), cost, dealt, enemy.current_health, enemy.max_health
                    ),
                    MessageCategory::Combat,
                );
                if enemy.is_defeated() {
                    self.handle_enemy_defeat();
                    return;
                }
            }
            None if self.is_boss_encounter => {
                self.log.push("You cannot flee from the Floor Boss!", MessageCategory::Combat);
            }
            None => {
                if self.rng.gen_range(0..100) < self.config.flee_chance_percent {
                    player.status_mut().clear();
                    self.log.push("You successfully fled!", MessageCategory::Combat);
                    self.current_enemy = None;
                    self.is_boss_encounter = false;
                    self.turns.end_battle();
                    return;
                }
                self.log.push("You failed to flee!", MessageCategory::Combat);
            }
        }

        self.end_player_turn();
    }

    /// Use a learned skill against the current enemy
    pub fn process_player_skill(&mut self, skill_id: &str) {
        if !self.ready_for_combat_action(skill_id) {
            return;
        }
        let default_duration = self.config.status_duration;
        let (Some(player), Some(enemy)) = (self.player.as_mut(), self.current_enemy.as_mut()) else {
            return;
        };

        let Some(skill) = player.learned_skill(skill_id).cloned() else {
            log::warn!("{} tried unknown skill {}", player.name, skill_id);
            self.log.push("You have not learned that skill.", MessageCategory::Warning);
            return;
        };

        if !player.consume_stamina(skill.cost) {
            self.log.push(format!("Not enough stamina for {}!", skill.name), MessageCategory::Warning);
            return;
        }

        log::debug!("Processing skill: {} (-{} Sta)", skill.name, skill.cost);
        let lines = apply_skill(&skill, player, enemy, default_duration);
        self.log.extend(lines, MessageCategory::Combat);

        if enemy.is_defeated() {
            self.handle_enemy_defeat();
        } else {
            self.end_player_turn();
        }
    }

    fn end_player_turn(&mut self) {
        if let Some(player) = self.player.as_mut() {
            player.regenerate_stamina();
        }
        self.turns.end_player_turn();
        self.enemy_timer.arm();
        log::debug!("Action finished, ending player turn.");
    }

    // =========================================================================
    // Enemy turn
    // =========================================================================

    /// Advance the clock; the enemy acts once its delay has elapsed
    pub fn update(&mut self, delta: Duration) {
        if self.enemy_timer.update(delta) {
            self.resolve_enemy_turn();
        }
    }

    /// Run the enemy's turn immediately
    pub fn resolve_enemy_turn(&mut self) {
        self.enemy_timer.disarm();
        if self.turns.phase() != Phase::EnemyTurn {
            return;
        }
        let default_duration = self.config.status_duration;
        let (Some(player), Some(enemy)) = (self.player.as_mut(), self.current_enemy.as_mut()) else {
            return;
        };

        for expired in enemy.status_mut().tick() {
            self.log.push(wears_off(&enemy.name, expired), MessageCategory::Combat);
        }

        let action = decide_enemy_action(&*enemy, &*player, &mut self.rng);
        log::debug!("Enemy {} decided action: {}", enemy.name, action.describe());

        let lines = match &action {
            EnemyAction::Attack(tier) => {
                let dealt = player.take_damage(enemy.attack(*tier));
                vec![format!(
                    "{} uses {} Attack on {} for {} damage. ({}/{})",
                    enemy.name, tier.name(), player.name, dealt,
                    player.current_health(), player.max_health()
                )]
            }
            EnemyAction::Skill(skill) => apply_skill(skill, enemy, player, default_duration),
        };
        self.log.extend(lines, MessageCategory::Combat);

        if player.is_defeated() {
            self.handle_player_defeat();
            return;
        }

        for expired in player.status_mut().tick() {
            self.log.push(wears_off(&player.name, expired), MessageCategory::Combat);
        }
        self.turns.end_enemy_turn();
        log::debug!("Enemy turn ended. Player turn now.");
    }

    // =========================================================================
    // Outcomes
    // =========================================================================

    fn handle_enemy_defeat(&mut self) {
        let Some(enemy) = self.current_enemy.take() else {
            return;
        };
        let was_boss = self.is_boss_encounter;
        self.is_boss_encounter = false;
        self.turns.end_battle();
        self.enemy_timer.disarm();

        log::debug!("Handling enemy defeat: {}", enemy.name);
        self.log.push(format!("{} has been defeated!", enemy.name), MessageCategory::Combat);
        self.log.push(
            format!("You gained {} Wealth and {} XP.", enemy.reward_wealth, enemy.reward_xp),
            MessageCategory::Progress,
        );

        if let Some(player) = self.player.as_mut() {
            player.gain_wealth(enemy.reward_wealth);
            let report = player.gain_xp(enemy.reward_xp);
            for level in &report.levels {
                self.log.push(format!("{} reached level {}!", player.name, level), MessageCategory::Progress);
            }
            if report.points_gained > 0 {
                self.log.push(
                    format!("{} stat points available.", player.stat_points()),
                    MessageCategory::Progress,
                );
            }
            for skill in &report.skills_learned {
                self.log.push(format!("{} learned {}!", player.name, skill.name), MessageCategory::Progress);
            }
            player.restore_full_health();
            player.status_mut().clear();
            self.log.push(format!("{} restored health!", player.name), MessageCategory::Progress);
        }

        self.enemies_cleared_on_floor += 1;
        let cleared = self.enemies_cleared_on_floor;

        let Some(floor) = self.data.floors.find(self.floor) else {
            log::error!("Floor data missing during enemy defeat!");
            return;
        };

        if was_boss {
            log::info!("Floor {} boss defeated!", self.floor);
            self.log.push(format!("Floor {} Cleared!", self.floor), MessageCategory::Progress);
            self.can_advance_floor = true;
        } else {
            self.log.push(
                format!("Enemies cleared on floor: {} / {}", cleared, floor.enemies_to_clear_for_boss),
                MessageCategory::Progress,
            );
            if cleared >= floor.enemies_to_clear_for_boss {
                if floor.has_boss() {
                    self.log.push("The Floor Boss is now available!", MessageCategory::Progress);
                } else {
                    log::info!("Floor {} cleared (no boss).", self.floor);
                    self.log.push(format!("Floor {} Cleared!", self.floor), MessageCategory::Progress);
                    self.can_advance_floor = true;
                }
            }
        }
    }

    fn handle_player_defeat(&mut self) {
        let name = self.player.as_ref().map(|p| p.name.clone()).unwrap_or_else(|| "Player".to_string());
        log::info!("Handling player defeat: {}", name);
        self.turns.game_over();
        self.enemy_timer.disarm();
        self.log.push(format!("{} has been defeated! Game Over.", name), MessageCategory::System);
    }

    // =========================================================================
    // Stat allocation
    // =========================================================================

    /// Spend a stat point on the player
    pub fn allocate_stat_point(&mut self, stat: StatType) -> Result<(), AllocationError> {
        let player = self.player.as_mut().ok_or(AllocationError::NoPlayer)?;
        match player.allocate(stat) {
            Ok(()) => {
                log::debug!("Stat point allocated to {:?}.", stat);
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to allocate point for {:?}: {}", stat, e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Rendering support
    // =========================================================================

    pub fn snapshot(&self) -> GameSnapshot {
        let floor = self.data.floors.find(self.floor);
        let affordable_actions = [
            PlayerAction::Attack(AttackTier::Light),
            PlayerAction::Attack(AttackTier::Medium),
            PlayerAction::Attack(AttackTier::Heavy),
            PlayerAction::Flee,
        ]
        .into_iter()
        .filter(|action| self.can_afford(*action))
        .collect();

        GameSnapshot {
            player: self.player.clone(),
            enemy: self.current_enemy.clone(),
            phase: self.turns.phase(),
            round: self.turns.round(),
            floor: self.floor,
            floor_name: floor.map(|f| f.name.clone()),
            enemies_cleared_on_floor: self.enemies_cleared_on_floor,
            enemies_to_clear_for_boss: floor.map(|f| f.enemies_to_clear_for_boss).unwrap_or(0),
            is_boss_encounter: self.is_boss_encounter,
            can_advance_floor: self.can_advance_floor,
            is_player_turn: self.turns.is_player_turn(),
            is_game_over: self.turns.is_game_over(),
            affordable_actions,
            xp_progress: self.player.as_ref().map(|p| p.experience().progress()).unwrap_or(0.0),
            log: self.log.entries().to_vec(),
        }
    }
}

fn wears_off(name: &str, effect: StatusEffectType) -> String {
    format!("{}'s {} wears off.", name, effect.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DungeonFloor, DungeonLayout, EnemyTemplate, EnemyTemplates};
    use crate::progression::skills::{skill_defend, skill_weaken};

    fn config() -> GameConfig {
        GameConfig::default().with_seed(1234)
    }

    fn dummy_template(id: &str, hp: i32, attack: i32, xp: u32) -> EnemyTemplate {
        EnemyTemplate {
            id: id.to_string(),
            name: id.to_string(),
            max_health: hp,
            attack_light: attack,
            attack_medium: attack,
            attack_heavy: attack,
            defense: 0,
            reward_wealth: 5,
            reward_xp: xp,
            level_requirement: 1,
            skills: vec![],
        }
    }

    /// Two small floors: floor 1 has a boss after 2 kills, floor 2 has none
    fn tiny_data() -> DataManager {
        DataManager {
            enemies: EnemyTemplates {
                templates: vec![
                    dummy_template("dummy", 5, 1, 1),
                    dummy_template("brute", 10_000, 1, 1),
                    dummy_template("boss", 5, 1, 3),
                    dummy_template("killer", 10_000, 10_000, 0),
                ],
            },
            floors: DungeonLayout {
                floors: vec![
                    DungeonFloor {
                        number: 1,
                        name: "Cellar".to_string(),
                        enemy_pool: vec!["dummy".to_string()],
                        boss: Some("boss".to_string()),
                        enemies_to_clear_for_boss: 2,
                        min_player_level: 1,
                    },
                    DungeonFloor {
                        number: 2,
                        name: "Crypt".to_string(),
                        enemy_pool: vec!["dummy".to_string()],
                        boss: None,
                        enemies_to_clear_for_boss: 1,
                        min_player_level: 5,
                    },
                ],
            },
        }
    }

    fn started(data: DataManager) -> Game {
        let mut game = Game::with_data(config(), data);
        game.initialize_player("Van", Role::Hunter);
        game
    }

    fn win_battle(game: &mut Game) {
        game.find_next_battle();
        game.process_player_action(PlayerAction::Attack(AttackTier::Heavy));
        assert!(game.current_enemy().is_none(), "battle should be over: {:?}", game.log().last());
    }

    #[test]
    fn test_initialize_player() {
        let game = started(tiny_data());
        assert_eq!(game.floor(), 1);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.log().lines().collect::<Vec<_>>(), vec!["Game Started! You are on Floor 1."]);
    }

    #[test]
    fn test_selection_and_reset() {
        let mut game = Game::with_data(config(), tiny_data());
        game.update_name("Mina");
        game.update_role(Role::Vampire);
        game.start_from_selection();
        assert_eq!(game.player().unwrap().role(), Role::Vampire);
        assert_eq!(game.player().unwrap().name, "Mina");

        game.reset();
        assert!(game.player().is_none());
        assert!(game.log().is_empty());
        assert_eq!(game.selection(), &PlayerSelection::default());
    }

    #[test]
    fn test_encounter_starts_player_turn() {
        let mut game = started(tiny_data());
        game.process_player_action(PlayerAction::NextBattle);
        assert!(game.is_player_turn());
        assert_eq!(game.round(), 1);
        assert_eq!(game.log().last(), Some("You encounter a dummy!"));

        game.find_next_battle();
        assert_eq!(game.log().last(), Some("Already in combat!"));
    }

    #[test]
    fn test_combat_actions_need_an_enemy() {
        let mut game = started(tiny_data());
        let before = game.log().len();
        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        assert_eq!(game.log().len(), before);
        assert_eq!(game.player().unwrap().stamina().current, 100);
    }

    #[test]
    fn test_attack_spends_stamina_and_hands_over_turn() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        game.process_player_action(PlayerAction::Attack(AttackTier::Medium));

        assert_eq!(game.phase(), Phase::EnemyTurn);
        // 100 - 15 + 12
        assert_eq!(game.player().unwrap().stamina().current, 97);
        assert_eq!(game.current_enemy().unwrap().current_health, 10_000 - 14);
        assert!(game.log().last().unwrap().starts_with("Van uses Medium Attack (-15 Sta) for 14 damage."));

        // Acting again before the enemy answers is ignored
        game.process_player_action(PlayerAction::Attack(AttackTier::Medium));
        assert_eq!(game.player().unwrap().stamina().current, 97);
    }

    #[test]
    fn test_enemy_answers_after_delay() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        assert!(game.enemy_turn_pending());

        game.update(Duration::from_millis(400));
        assert_eq!(game.phase(), Phase::EnemyTurn);
        game.update(Duration::from_millis(600));
        assert!(game.is_player_turn());
        assert_eq!(game.round(), 2);
        let hero = game.player().unwrap();
        // Attack 1 against 3 defense still deals 1
        assert_eq!(hero.current_health(), hero.max_health() - 1);
        assert!(game.log().last().unwrap().starts_with("brute uses"));
    }

    #[test]
    fn test_insufficient_stamina_keeps_turn() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        // Heavy attacks: 100 -> 87 -> 74 -> 61 -> 48 -> 35 -> 22, then 22 < 25
        for _ in 0..6 {
            game.process_player_action(PlayerAction::Attack(AttackTier::Heavy));
            game.resolve_enemy_turn();
        }
        assert_eq!(game.player().unwrap().stamina().current, 22);
        assert!(!game.can_afford(PlayerAction::Attack(AttackTier::Heavy)));

        game.process_player_action(PlayerAction::Attack(AttackTier::Heavy));
        assert_eq!(game.log().last(), Some("Not enough stamina for Heavy Attack!"));
        assert!(game.is_player_turn());
        assert_eq!(game.player().unwrap().stamina().current, 22);
    }

    #[test]
    fn test_boss_gating_and_floor_clear() {
        let mut game = started(tiny_data());
        win_battle(&mut game);
        assert_eq!(game.log().last(), Some("Enemies cleared on floor: 1 / 2"));
        assert!(!game.can_advance_floor());

        game.process_player_action(PlayerAction::AdvanceFloor);
        assert_eq!(game.log().last(), Some("You must clear the current floor first!"));

        win_battle(&mut game);
        assert_eq!(game.log().last(), Some("The Floor Boss is now available!"));

        game.find_next_battle();
        assert!(game.is_boss_encounter());
        assert_eq!(game.log().last(), Some("The Floor Boss appears: boss!"));
        game.process_player_action(PlayerAction::Attack(AttackTier::Heavy));
        assert!(game.can_advance_floor());
        assert!(!game.is_boss_encounter());
        assert_eq!(game.log().last(), Some("Floor 1 Cleared!"));

        game.find_next_battle();
        assert_eq!(game.log().last(), Some("Floor cleared! Advance to the next floor."));

        game.advance_floor();
        assert_eq!(game.floor(), 2);
        assert_eq!(game.enemies_cleared_on_floor(), 0);
        assert!(!game.can_advance_floor());
        let lines: Vec<_> = game.log().lines().collect();
        assert!(lines.contains(&"You descend deeper... Now on Floor 2: Crypt."));
        assert_eq!(game.log().last(), Some("The air grows heavy. Foes here expect level 5."));
    }

    #[test]
    fn test_floor_without_boss_clears_on_quota() {
        let mut game = started(tiny_data());
        game.can_advance_floor = true;
        game.advance_floor();
        win_battle(&mut game);
        assert!(game.can_advance_floor());
        assert_eq!(game.log().last(), Some("Floor 2 Cleared!"));

        game.advance_floor();
        assert_eq!(game.floor(), 2);
        assert_eq!(game.log().last(), Some("You have cleared the deepest depths... for now!"));
    }

    #[test]
    fn test_victory_rewards_and_full_heal() {
        let mut game = started(tiny_data());
        game.find_next_battle();
        game.player.as_mut().unwrap().take_damage(50);
        game.process_player_action(PlayerAction::Attack(AttackTier::Heavy));

        let hero = game.player().unwrap();
        assert_eq!(hero.current_health(), hero.max_health());
        assert_eq!(hero.wealth(), 105);
        assert_eq!(hero.experience().current_xp, 1);
        assert_eq!(game.phase(), Phase::Idle);
        let lines: Vec<_> = game.log().lines().collect();
        assert!(lines.contains(&"dummy has been defeated!"));
        assert!(lines.contains(&"You gained 5 Wealth and 1 XP."));
        assert!(lines.contains(&"Van restored health!"));
    }

    #[test]
    fn test_level_up_is_logged() {
        let mut data = tiny_data();
        data.enemies.templates[0].reward_xp = 10;
        let mut game = started(data);
        win_battle(&mut game);
        let lines: Vec<_> = game.log().lines().collect();
        assert!(lines.contains(&"Van reached level 2!"));
        assert!(lines.contains(&"3 stat points available."));
        assert_eq!(game.allocate_stat_point(StatType::AttackPower), Ok(()));
        assert_eq!(game.player().unwrap().stat_points(), 2);
    }

    #[test]
    fn test_cannot_flee_from_boss() {
        let mut data = tiny_data();
        data.floors.floors[0].enemies_to_clear_for_boss = 0;
        data.enemies.templates[2].max_health = 10_000;
        let mut game = started(data);
        game.find_next_battle();
        assert!(game.is_boss_encounter());

        game.process_player_action(PlayerAction::Flee);
        assert!(game.log().lines().any(|l| l == "You cannot flee from the Floor Boss!"));
        assert_eq!(game.phase(), Phase::EnemyTurn);
        // Flee cost 5, then regen 12 (capped at 100)
        assert_eq!(game.player().unwrap().stamina().current, 100);
        assert!(game.current_enemy().is_some());
    }

    #[test]
    fn test_flee_eventually_succeeds() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        let mut attempts = 0;
        while game.current_enemy().is_some() && attempts < 100 {
            game.process_player_action(PlayerAction::Flee);
            game.resolve_enemy_turn();
            attempts += 1;
        }
        assert!(game.current_enemy().is_none());
        assert_eq!(game.log().last(), Some("You successfully fled!"));
        assert_eq!(game.phase(), Phase::Idle);
        // Fleeing doesn't count towards the floor quota
        assert_eq!(game.enemies_cleared_on_floor(), 0);
    }

    #[test]
    fn test_player_defeat_ends_run() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["killer".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        game.resolve_enemy_turn();

        assert!(game.is_game_over());
        assert!(!game.is_player_turn());
        assert_eq!(game.log().last(), Some("Van has been defeated! Game Over."));

        let before = game.log().len();
        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        game.find_next_battle();
        assert_eq!(game.log().len(), before);
    }

    #[test]
    fn test_skill_use() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();

        game.process_player_skill("silver_volley");
        assert_eq!(game.log().last(), Some("You have not learned that skill."));
        assert!(game.is_player_turn());

        game.process_player_skill("aimed_shot");
        assert_eq!(game.current_enemy().unwrap().current_health, 10_000 - 18);
        // 100 - 12 + 12
        assert_eq!(game.player().unwrap().stamina().current, 100);
        assert_eq!(game.phase(), Phase::EnemyTurn);
    }

    #[test]
    fn test_missing_boss_marks_floor_clear() {
        let mut data = tiny_data();
        data.floors.floors[0].boss = Some("nobody".to_string());
        data.floors.floors[0].enemies_to_clear_for_boss = 0;
        let mut game = started(data);
        game.find_next_battle();
        assert!(game.current_enemy().is_none());
        assert!(game.can_advance_floor());
        assert_eq!(game.log().last(), Some("Error finding boss, floor marked clear."));
    }

    #[test]
    fn test_allocation_without_player() {
        let mut game = Game::with_data(config(), tiny_data());
        assert_eq!(game.allocate_stat_point(StatType::AttackPower), Err(AllocationError::NoPlayer));
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut game = started(tiny_data());
        game.find_next_battle();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.floor_name.as_deref(), Some("Cellar"));
        assert_eq!(snapshot.enemies_to_clear_for_boss, 2);
        assert!(snapshot.is_player_turn);
        assert_eq!(snapshot.affordable_actions.len(), 4);
        assert_eq!(snapshot.log.last().map(|e| e.category), Some(MessageCategory::Combat));

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_tracks_xp_progress() {
        let mut game = started(tiny_data());
        assert_eq!(game.snapshot().xp_progress, 0.0);
        win_battle(&mut game);
        assert_eq!(game.snapshot().xp_progress, 0.1);
        assert_eq!(game.snapshot().log.first().map(|e| e.category), Some(MessageCategory::System));
    }

    fn with_caster(skill: crate::progression::Skill) -> Game {
        let mut data = tiny_data();
        let mut caster = dummy_template("caster", 10_000, 1, 1);
        caster.skills = vec![skill];
        data.enemies.templates.push(caster);
        data.floors.floors[0].enemy_pool = vec!["caster".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        game
    }

    /// Play light attacks until the enemy's turn produces `line`
    fn play_until_enemy_says(game: &mut Game, line: &str) {
        for _ in 0..200 {
            game.process_player_action(PlayerAction::Attack(AttackTier::Light));
            let start = game.log().len();
            game.resolve_enemy_turn();
            if game.log().since(start).iter().any(|e| e.text == line) {
                return;
            }
        }
        panic!("enemy never logged {:?}", line);
    }

    #[test]
    fn test_enemy_defend_wears_off_on_its_next_turn() {
        let mut game = with_caster(skill_defend());
        // Below half health, so the defend option is on the table
        game.current_enemy.as_mut().unwrap().current_health = 4_000;
        play_until_enemy_says(&mut game, "caster uses Defend: caster +50 DEF for 1 turn.");
        assert_eq!(game.current_enemy().unwrap().defense(), 50);

        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        assert!(game.log().last().unwrap().starts_with("Van uses Light Attack (-10 Sta) for 1 damage."));

        let start = game.log().len();
        game.resolve_enemy_turn();
        assert_eq!(game.log().since(start)[0].text, "caster's defense boost wears off.");
    }

    #[test]
    fn test_weaken_lasts_for_its_duration_in_enemy_turns() {
        let mut game = with_caster(skill_weaken());
        play_until_enemy_says(&mut game, "caster uses Weaken: Van -5 ATK for 3 turns.");
        // Keep the enemy from refreshing the debuff
        game.current_enemy.as_mut().unwrap().skills.clear();

        let weakened = |game: &Game| game.player().unwrap().status().has_effect(StatusEffectType::AttackDown);
        assert!(weakened(&game));
        assert_eq!(game.player().unwrap().attack(AttackTier::Light), 5);

        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        game.resolve_enemy_turn();
        assert!(weakened(&game));

        game.process_player_action(PlayerAction::Attack(AttackTier::Light));
        game.resolve_enemy_turn();
        assert!(!weakened(&game));
        assert_eq!(game.log().last(), Some("Van's weakness wears off."));
        assert_eq!(game.player().unwrap().attack(AttackTier::Light), 10);
    }

    #[test]
    fn test_skill_needs_stamina() {
        let mut data = tiny_data();
        data.floors.floors[0].enemy_pool = vec!["brute".to_string()];
        let mut game = started(data);
        game.find_next_battle();
        game.player.as_mut().unwrap().consume_stamina(95);

        game.process_player_skill("aimed_shot");
        assert_eq!(game.log().last(), Some("Not enough stamina for Aimed Shot!"));
        assert_eq!(game.phase(), Phase::PlayerTurn);
        assert_eq!(game.player().unwrap().stamina().current, 5);
        assert_eq!(game.current_enemy().unwrap().current_health, 10_000);
    }
}
