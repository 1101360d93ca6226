//! Encounter generation
//!
//! Picks the next enemy for a floor: its boss, or a uniform draw from the
//! regular pool.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use crate::data::DataManager;
use super::enemies::Enemy;

/// Why no enemy could be produced
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("cannot find dungeon floor data: {0}")]
    UnknownFloor(u32),
    #[error("no boss enemy ID found for floor {0}")]
    NoBoss(u32),
    #[error("no regular enemy ID found for floor {0}")]
    EmptyPool(u32),
    #[error("enemy template not found for ID: {0}")]
    UnknownTemplate(String),
}

/// Spawn a fresh enemy for `floor`
pub fn enemy_for_floor(
    data: &DataManager,
    floor: u32,
    boss: bool,
    rng: &mut impl Rng,
) -> Result<Enemy, SpawnError> {
    let floor_data = data.dungeon().find(floor).ok_or(SpawnError::UnknownFloor(floor))?;

    let id = if boss {
        floor_data.boss.as_deref().ok_or(SpawnError::NoBoss(floor))?
    } else {
        floor_data
            .enemy_pool
            .choose(rng)
            .map(String::as_str)
            .ok_or(SpawnError::EmptyPool(floor))?
    };

    let template = data
        .enemy_templates()
        .find(id)
        .ok_or_else(|| SpawnError::UnknownTemplate(id.to_string()))?;

    log::debug!("Spawning enemy '{}' (ID: {}) for floor {}. Boss: {}", template.name, id, floor, boss);
    Ok(template.instantiate())
}
