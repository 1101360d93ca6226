//! Game module - Run state, turn flow and the combat log

mod state;
mod turn;
mod time;
mod log;

pub use state::{Game, GameSnapshot, PlayerAction, PlayerSelection};
pub use turn::{Phase, TurnManager};
pub use time::EnemyTurnTimer;
pub use self::log::{CombatLog, LogEntry, MessageCategory};
