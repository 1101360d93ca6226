//! Data loading and external game content
//!
//! Enemy templates and the dungeon layout, loadable from RON files so the
//! dungeon can be rebalanced without recompiling.

pub mod loader;
pub mod enemies;
pub mod floors;

pub use loader::{DataManager, DataError, export_default_data, load_ron};
pub use enemies::{EnemyTemplate, EnemyTemplates, default_enemy_templates};
pub use floors::{DungeonFloor, DungeonLayout, default_dungeon_layout};
