//! Entity creation and management

pub mod player;
pub mod enemies;
pub mod spawner;

pub use player::{Player, Role, StatType, Stamina, AllocationError, LevelUpReport, UnknownRole};
pub use enemies::Enemy;
pub use spawner::{enemy_for_floor, SpawnError};
