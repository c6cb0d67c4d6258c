//! Curated base tables for reference data

use super::{Cost, TroopStats};

pub(super) struct BuildingBase {
    pub key: &'static str,
    pub id: u32,
    pub name: &'static str,
}

pub(super) const BUILDING_MAX_LEVEL: u32 = 10;

pub(super) const BUILDINGS: &[BuildingBase] = &[
    BuildingBase { key: "townhall", id: 1, name: "Town Hall" },
    BuildingBase { key: "barracks", id: 2, name: "Barracks" },
    BuildingBase { key: "cottage", id: 3, name: "Cottage" },
    BuildingBase { key: "sawmill", id: 4, name: "Sawmill" },
    BuildingBase { key: "quarry", id: 5, name: "Quarry" },
    BuildingBase { key: "ironmine", id: 6, name: "Ironmine" },
    BuildingBase { key: "farm", id: 7, name: "Farm" },
    BuildingBase { key: "warehouse", id: 8, name: "Warehouse" },
    BuildingBase { key: "granary", id: 9, name: "Granary" },
    BuildingBase { key: "stable", id: 20, name: "Stable" },
    BuildingBase { key: "inn", id: 21, name: "Inn" },
    BuildingBase { key: "forge", id: 22, name: "Forge" },
    BuildingBase { key: "marketplace", id: 23, name: "Marketplace" },
    BuildingBase { key: "relief_station", id: 24, name: "Relief Station" },
    BuildingBase { key: "academy", id: 25, name: "Academy" },
    BuildingBase { key: "workshop", id: 26, name: "Workshop" },
    BuildingBase { key: "feasting_hall", id: 27, name: "Feasting Hall" },
    BuildingBase { key: "embassy", id: 28, name: "Embassy" },
    BuildingBase { key: "rally_spot", id: 29, name: "Rally Spot" },
    BuildingBase { key: "beacon_tower", id: 30, name: "Beacon Tower" },
    BuildingBase { key: "walls", id: 31, name: "Walls" },
];

pub(super) struct TroopBase {
    pub key: &'static str,
    pub id: u32,
    pub name: &'static str,
    pub tier: u32,
    pub kind: &'static str,
    pub stats: TroopStats,
    pub food: u64,
    pub population: u32,
    pub train_time: u32,
    pub overflow_threshold: u64,
}

const fn stats(attack: u32, defense: u32, life: u32, speed: u32, range: u32, load: u32) -> TroopStats {
    TroopStats { attack, defense, life, speed, range, load }
}

pub(super) const TROOPS: &[TroopBase] = &[
    TroopBase {
        key: "worker", id: 2, name: "Worker", tier: 1, kind: "support",
        stats: stats(5, 5, 50, 180, 20, 200),
        food: 50, population: 1, train_time: 15, overflow_threshold: 42_949_673,
    },
    TroopBase {
        key: "warrior", id: 3, name: "Warrior", tier: 1, kind: "infantry",
        stats: stats(10, 10, 100, 200, 30, 20),
        food: 100, population: 1, train_time: 30, overflow_threshold: 21_474_837,
    },
    TroopBase {
        key: "scout", id: 4, name: "Scout", tier: 1, kind: "cavalry",
        stats: stats(5, 5, 50, 3000, 20, 5),
        food: 150, population: 1, train_time: 30, overflow_threshold: 14_316_558,
    },
    TroopBase {
        key: "pikeman", id: 5, name: "Pikeman", tier: 2, kind: "infantry",
        stats: stats(25, 30, 150, 200, 50, 30),
        food: 200, population: 1, train_time: 45, overflow_threshold: 10_737_419,
    },
    TroopBase {
        key: "swordsman", id: 6, name: "Swordsman", tier: 3, kind: "infantry",
        stats: stats(50, 50, 250, 220, 30, 35),
        food: 250, population: 1, train_time: 60, overflow_threshold: 8_589_935,
    },
    TroopBase {
        key: "archer", id: 7, name: "Archer", tier: 2, kind: "ranged",
        stats: stats(35, 15, 100, 250, 1200, 25),
        food: 350, population: 1, train_time: 45, overflow_threshold: 6_135_037,
    },
    TroopBase {
        key: "cavalry", id: 8, name: "Cavalry", tier: 3, kind: "cavalry",
        stats: stats(75, 50, 350, 1000, 100, 50),
        food: 500, population: 2, train_time: 90, overflow_threshold: 4_294_967,
    },
    TroopBase {
        key: "cataphract", id: 9, name: "Cataphract", tier: 4, kind: "cavalry",
        stats: stats(100, 100, 500, 750, 80, 70),
        food: 700, population: 3, train_time: 120, overflow_threshold: 3_067_833,
    },
    TroopBase {
        key: "transporter", id: 10, name: "Transporter", tier: 1, kind: "support",
        stats: stats(5, 5, 50, 150, 20, 5000),
        food: 500, population: 1, train_time: 60, overflow_threshold: 4_294_967,
    },
    TroopBase {
        key: "ballista", id: 11, name: "Ballista", tier: 3, kind: "siege",
        stats: stats(200, 50, 600, 100, 1400, 100),
        food: 2500, population: 4, train_time: 180, overflow_threshold: 858_993,
    },
    TroopBase {
        key: "battering_ram", id: 12, name: "Battering Ram", tier: 3, kind: "siege",
        stats: stats(150, 100, 800, 120, 20, 150),
        food: 5000, population: 5, train_time: 240, overflow_threshold: 429_496,
    },
    TroopBase {
        key: "catapult", id: 13, name: "Catapult", tier: 4, kind: "siege",
        stats: stats(450, 30, 400, 80, 1500, 200),
        food: 30000, population: 8, train_time: 360, overflow_threshold: 71_582,
    },
];

impl TroopBase {
    pub fn cost(&self) -> Cost {
        Cost {
            food: self.food,
            wood: 0,
            stone: 0,
            iron: 0,
            gold: 0,
        }
    }
}

pub(super) const RESEARCH_MAX_LEVEL: u32 = 10;

/// (key, id, name, category)
pub(super) const RESEARCH: &[(&str, u32, &str, &str)] = &[
    ("military_science", 1, "Military Science", "military"),
    ("military_tradition", 2, "Military Tradition", "military"),
    ("iron_working", 3, "Iron Working", "military"),
    ("archery", 4, "Archery", "military"),
    ("horseback_riding", 5, "Horseback Riding", "military"),
    ("compass", 6, "Compass", "military"),
    ("medicine", 7, "Medicine", "military"),
    ("construction", 8, "Construction", "military"),
    ("engineering", 9, "Engineering", "military"),
    ("logistics", 10, "Logistics", "military"),
    ("agriculture", 11, "Agriculture", "economic"),
    ("lumbering", 12, "Lumbering", "economic"),
    ("masonry", 13, "Masonry", "economic"),
    ("mining", 14, "Mining", "economic"),
    ("metal_casting", 15, "Metal Casting", "economic"),
    ("informatics", 16, "Informatics", "economic"),
    ("stockpile", 17, "Stockpile", "economic"),
    ("privateering", 18, "Privateering", "economic"),
];

/// (key, id, name, seconds saved)
pub(super) const SPEEDUPS: &[(&str, u32, &str, u64)] = &[
    ("speedup_5m", 1, "5-Minute Speed Up", 300),
    ("speedup_15m", 2, "15-Minute Speed Up", 900),
    ("speedup_30m", 3, "30-Minute Speed Up", 1800),
    ("speedup_1h", 4, "1-Hour Speed Up", 3600),
    ("speedup_8h", 5, "8-Hour Speed Up", 28800),
];

/// (key, id, name, resource, amount)
pub(super) const RESOURCE_PACKAGES: &[(&str, u32, &str, &str, u64)] = &[
    ("food_10k", 101, "Food Package (10k)", "food", 10_000),
    ("food_100k", 102, "Food Package (100k)", "food", 100_000),
    ("wood_10k", 111, "Wood Package (10k)", "wood", 10_000),
    ("wood_100k", 112, "Wood Package (100k)", "wood", 100_000),
    ("stone_10k", 121, "Stone Package (10k)", "stone", 10_000),
    ("iron_10k", 131, "Iron Package (10k)", "iron", 10_000),
    ("gold_1k", 141, "Gold Package (1k)", "gold", 1_000),
];

pub(super) const NPC_MAX_LEVEL: u32 = 10;
