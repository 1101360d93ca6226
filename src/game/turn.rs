//! Turn management for combat
//!
//! Tracks whose turn it is and the round number of the current battle.

use serde::{Deserialize, Serialize};

/// Where the run currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No battle in progress
    Idle,
    /// Waiting for the player's action
    PlayerTurn,
    /// The enemy acts next
    EnemyTurn,
    /// The player has been defeated
    GameOver,
}

/// Manages turn order during combat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnManager {
    phase: Phase,
    /// Current round number (0 outside battle)
    round: u32,
}

impl TurnManager {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            round: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// A battle starts with the player's move
    pub fn begin_battle(&mut self) {
        if self.phase == Phase::GameOver {
            return;
        }
        self.phase = Phase::PlayerTurn;
        self.round = 1;
    }

    pub fn end_player_turn(&mut self) {
        if self.phase == Phase::PlayerTurn {
            self.phase = Phase::EnemyTurn;
        }
    }

    /// Hand the turn back to the player, starting a new round
    pub fn end_enemy_turn(&mut self) {
        if self.phase == Phase::EnemyTurn {
            self.phase = Phase::PlayerTurn;
            self.round += 1;
        }
    }

    pub fn end_battle(&mut self) {
        if self.phase != Phase::GameOver {
            self.phase = Phase::Idle;
            self.round = 0;
        }
    }

    pub fn game_over(&mut self) {
        self.phase = Phase::GameOver;
    }

    pub fn is_player_turn(&self) -> bool {
        self.phase == Phase::PlayerTurn
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

impl Default for TurnManager {
    fn default() -> Self {
        Self::new()
    }
}
