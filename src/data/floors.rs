//! Dungeon layout
//!
//! The ordered list of floors, each with its enemy pool and optional boss.

use serde::{Deserialize, Serialize};

/// A single dungeon floor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonFloor {
    /// 1-indexed floor number
    pub number: u32,
    pub name: String,
    /// Template IDs of regular enemies found here
    pub enemy_pool: Vec<String>,
    /// Template ID of the floor boss, if any
    #[serde(default)]
    pub boss: Option<String>,
    /// Regular kills needed before the boss appears (or the floor clears)
    #[serde(default = "default_enemies_to_clear")]
    pub enemies_to_clear_for_boss: u32,
    /// Recommended player level
    #[serde(default = "default_min_level")]
    pub min_player_level: u32,
}

fn default_enemies_to_clear() -> u32 {
    5
}

fn default_min_level() -> u32 {
    1
}

impl DungeonFloor {
    pub fn has_boss(&self) -> bool {
        self.boss.is_some()
    }

    /// Every template ID this floor refers to
    pub fn referenced_enemies(&self) -> impl Iterator<Item = &str> {
        self.enemy_pool.iter().map(String::as_str).chain(self.boss.as_deref())
    }
}

/// All floors in descending order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub floors: Vec<DungeonFloor>,
}

impl DungeonLayout {
    /// Find a floor by number
    pub fn find(&self, number: u32) -> Option<&DungeonFloor> {
        self.floors.iter().find(|f| f.number == number)
    }

    /// Deepest floor number
    pub fn last_floor(&self) -> u32 {
        self.floors.iter().map(|f| f.number).max().unwrap_or(0)
    }
}

fn floor(number: u32, name: &str, pool: &[&str], boss: Option<&str>, to_clear: u32, min_level: u32) -> DungeonFloor {
    DungeonFloor {
        number,
        name: name.to_string(),
        enemy_pool: pool.iter().map(|id| id.to_string()).collect(),
        boss: boss.map(str::to_string),
        enemies_to_clear_for_boss: to_clear,
        min_player_level: min_level,
    }
}

/// Create the default 20-floor dungeon (hardcoded fallback)
pub fn default_dungeon_layout() -> DungeonLayout {
    DungeonLayout {
        floors: vec![
            // 1-5
            floor(1, "Forgotten Cellar", &["goblin_scout", "giant_rat"], Some("goblin_boss"), 3, 1),
            floor(2, "Decrepit Crypt", &["skeleton_warrior", "giant_rat", "crypt_crawler"], None, 4, 2),
            floor(3, "Moldy Catacombs", &["skeleton_warrior", "crypt_crawler"], Some("lich_apprentice"), 4, 3),
            floor(4, "Goblin Warrens", &["goblin_scout", "goblin_shaman"], None, 5, 4),
            floor(5, "Orc Outpost", &["orc_grunt", "goblin_shaman"], Some("orc_berserker"), 5, 5),
            // 6-10
            floor(6, "Flooded Passage", &["crypt_crawler", "orc_grunt"], Some("orc_chieftain"), 4, 6),
            floor(7, "Spider Nest", &["crypt_crawler", "imp_trickster"], None, 6, 7),
            floor(8, "Troll Cave", &["troll_scrapper", "orc_grunt"], None, 5, 8),
            floor(9, "Dark Elf Enclave", &["dark_elf_mage", "imp_trickster"], None, 6, 9),
            floor(10, "Arachnid Lair", &["crypt_crawler", "dark_elf_mage"], Some("spider_queen"), 5, 10),
            // 11-15
            floor(11, "Ancient Ruins", &["skeleton_warrior", "troll_scrapper"], None, 6, 11),
            floor(12, "Troll Stronghold", &["troll_scrapper", "orc_berserker"], Some("troll_shaman"), 5, 12),
            floor(13, "Golem Workshop", &["stone_golem", "imp_trickster"], None, 5, 13),
            floor(14, "Elemental Plane (Fire)", &["fire_elemental", "imp_trickster"], None, 6, 14),
            floor(15, "Haunted Armoury", &["dark_knight", "skeleton_warrior"], Some("elemental_lord"), 5, 15),
            // 16-20
            floor(16, "Shadowy Cloister", &["dark_elf_mage", "shadow_assassin"], None, 6, 16),
            floor(17, "Forgotten Forge", &["stone_golem", "fire_elemental"], Some("iron_golem"), 5, 17),
            floor(18, "Knight's Burial Ground", &["dark_knight", "skeleton_warrior", "lich_apprentice"], None, 7, 18),
            floor(19, "Abyssal Breach", &["abyssal_demon", "shadow_assassin"], None, 6, 19),
            floor(20, "Throne of Torment", &["abyssal_demon", "dark_knight"], Some("demon_lord"), 5, 20),
        ],
    }
}
