//! RON data loader
//!
//! Loads game data from external RON files, with fallback to hardcoded defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use super::enemies::{default_enemy_templates, EnemyTemplates};
use super::floors::{default_dungeon_layout, DungeonLayout};

pub const ENEMIES_FILE: &str = "enemies.ron";
pub const FLOORS_FILE: &str = "floors.ron";

/// Errors raised while reading, writing or checking game data
#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: ron::Error,
    },
    #[error("dungeon layout has no floors")]
    EmptyLayout,
    #[error("floor {floor} references unknown enemy '{id}'")]
    UnknownEnemy { floor: u32, id: String },
    #[error("enemy '{id}': {reason}")]
    InvalidEnemy { id: String, reason: &'static str },
}

/// Manages all external game data
#[derive(Debug, Clone, PartialEq)]
pub struct DataManager {
    /// Enemy templates
    pub enemies: EnemyTemplates,
    /// Dungeon floors
    pub floors: DungeonLayout,
}

impl DataManager {
    /// Load data from `dir`, falling back to defaults per file
    pub fn load_from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let data = Self {
            enemies: load_or_default(&dir.join(ENEMIES_FILE), default_enemy_templates),
            floors: load_or_default(&dir.join(FLOORS_FILE), default_dungeon_layout),
        };
        if let Err(e) = data.validate() {
            log::warn!("Loaded data is inconsistent ({}). Using defaults.", e);
            return Self::default();
        }
        data
    }

    /// Check that the templates are playable and the layout only uses known ones
    pub fn validate(&self) -> Result<(), DataError> {
        for template in &self.enemies.templates {
            let reason = if template.max_health <= 0 {
                "max health must be positive"
            } else if [template.attack_light, template.attack_medium, template.attack_heavy, template.defense]
                .iter()
                .any(|value| *value < 0)
            {
                "attacks and defense must not be negative"
            } else {
                continue;
            };
            return Err(DataError::InvalidEnemy { id: template.id.clone(), reason });
        }
        if self.floors.floors.is_empty() {
            return Err(DataError::EmptyLayout);
        }
        for floor in &self.floors.floors {
            if let Some(id) = floor.referenced_enemies().find(|id| !self.enemy_templates().contains(id)) {
                return Err(DataError::UnknownEnemy { floor: floor.number, id: id.to_string() });
            }
        }
        Ok(())
    }

    /// Get enemy templates
    pub fn enemy_templates(&self) -> &EnemyTemplates {
        &self.enemies
    }

    /// Get the dungeon layout
    pub fn dungeon(&self) -> &DungeonLayout {
        &self.floors
    }
}

impl Default for DataManager {
    fn default() -> Self {
        Self {
            enemies: default_enemy_templates(),
            floors: default_dungeon_layout(),
        }
    }
}

/// Read and parse one RON file
pub fn load_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataError> {
    let content = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&content).map_err(|source| DataError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn load_or_default<T: DeserializeOwned>(path: &Path, default: fn() -> T) -> T {
    if !path.exists() {
        return default();
    }
    match load_ron(path) {
        Ok(value) => {
            log::info!("Loaded {}", path.display());
            value
        }
        Err(e) => {
            log::warn!("{}. Using built-in defaults.", e);
            default()
        }
    }
}

fn write_ron<T: Serialize>(path: &Path, value: &T, what: &'static str) -> Result<(), DataError> {
    let content = ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())
        .map_err(|source| DataError::Serialize { what, source })?;
    fs::write(path, content).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(dir: impl AsRef<Path>) -> Result<(), DataError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|source| DataError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    write_ron(&dir.join(ENEMIES_FILE), &default_enemy_templates(), "enemies")?;
    write_ron(&dir.join(FLOORS_FILE), &default_dungeon_layout(), "floors")?;
    Ok(())
}
