//! Bloodline Ascension - A turn-based dungeon RPG core
//!
//! Choose a bloodline, descend floor by floor, and trade stamina for blows
//! against the things that live below.

pub mod config;
pub mod game;
pub mod entities;
pub mod combat;
pub mod progression;
pub mod data;

// Re-export commonly used types
pub use config::GameConfig;
pub use game::{Game, GameSnapshot, Phase, PlayerAction};
pub use entities::{Enemy, Player, Role, StatType};
pub use combat::AttackTier;
