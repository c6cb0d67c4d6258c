//! Deterministic reference tables for domains with no extractable source
//!
//! Every table is a pure function of the curated base data in [`tables`]
//! and the scaling formulas below, so repeated runs serialize identically.

mod tables;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelCost {
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub iron: u64,
    /// Seconds; fractional above level 1
    pub time: f64,
    pub population: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: u32,
    pub name: String,
    pub max_level: u32,
    pub levels: BTreeMap<u32, LevelCost>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TroopStats {
    pub attack: u32,
    pub defense: u32,
    pub life: u32,
    pub speed: u32,
    pub range: u32,
    pub load: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub iron: u64,
    pub gold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Troop {
    pub id: u32,
    pub name: String,
    pub tier: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub stats: TroopStats,
    pub cost: Cost,
    pub population: u32,
    pub train_time: u32,
    /// Largest count whose aggregate stays within a 32-bit signed total
    pub overflow_threshold: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Research {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub max_level: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u32,
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcTroops {
    pub warrior: u64,
    pub scout: u64,
    pub pikeman: u64,
    pub swordsman: u64,
    pub archer: u64,
    pub cavalry: u64,
    pub cataphract: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcRewards {
    pub food: u64,
    pub wood: u64,
    pub stone: u64,
    pub iron: u64,
    pub gold: u64,
    pub exp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Npc {
    pub level: u32,
    pub troops: NpcTroops,
    pub rewards: NpcRewards,
}

/// All reference domains, each a flat name -> object map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub buildings: BTreeMap<String, Building>,
    pub troops: BTreeMap<String, Troop>,
    pub research: BTreeMap<String, Research>,
    pub items: BTreeMap<String, Item>,
    pub npcs: BTreeMap<String, Npc>,
}

impl ReferenceData {
    pub fn total_entries(&self) -> usize {
        self.buildings.len() + self.troops.len() + self.research.len() + self.items.len() + self.npcs.len()
    }
}

/// Upgrade cost of a structure at `level`: quadratic resources, `L^1.5` time
pub fn building_level_cost(level: u32) -> LevelCost {
    let l = u64::from(level);
    LevelCost {
        food: 100 * l * l,
        wood: 150 * l * l,
        stone: 50 * l * l,
        iron: 25 * l * l,
        time: 60.0 * f64::from(level).powf(1.5),
        population: 10 * l,
    }
}

/// Garrison of an opponent tier; heavier units appear from fixed tiers on
pub fn npc_troops(level: u32) -> NpcTroops {
    let l = u64::from(level);
    let from = |min: u32, per_level: u64| if level >= min { per_level * l } else { 0 };
    NpcTroops {
        warrior: 100 * l,
        scout: 50 * l,
        pikeman: from(3, 75),
        swordsman: from(5, 50),
        archer: 100 * l,
        cavalry: from(4, 25),
        cataphract: from(6, 10),
    }
}

pub fn npc_rewards(level: u32) -> NpcRewards {
    let l = u64::from(level);
    NpcRewards {
        food: 10_000 * l,
        wood: 8_000 * l,
        stone: 6_000 * l,
        iron: 4_000 * l,
        gold: 1_000 * l,
        exp: 100 * l,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ReferenceDataSynthesizer;

impl ReferenceDataSynthesizer {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self) -> ReferenceData {
        let data = ReferenceData {
            buildings: self.buildings(),
            troops: self.troops(),
            research: self.research(),
            items: self.items(),
            npcs: self.npcs(),
        };
        debug!(entries = data.total_entries(), "Synthesized reference data");
        data
    }

    pub fn buildings(&self) -> BTreeMap<String, Building> {
        tables::BUILDINGS
            .iter()
            .map(|b| {
                let levels = (1..=tables::BUILDING_MAX_LEVEL)
                    .map(|l| (l, building_level_cost(l)))
                    .collect();
                let building = Building {
                    id: b.id,
                    name: b.name.to_string(),
                    max_level: tables::BUILDING_MAX_LEVEL,
                    levels,
                };
                (b.key.to_string(), building)
            })
            .collect()
    }

    pub fn troops(&self) -> BTreeMap<String, Troop> {
        tables::TROOPS
            .iter()
            .map(|t| {
                let troop = Troop {
                    id: t.id,
                    name: t.name.to_string(),
                    tier: t.tier,
                    kind: t.kind.to_string(),
                    stats: t.stats,
                    cost: t.cost(),
                    population: t.population,
                    train_time: t.train_time,
                    overflow_threshold: t.overflow_threshold,
                };
                (t.key.to_string(), troop)
            })
            .collect()
    }

    pub fn research(&self) -> BTreeMap<String, Research> {
        tables::RESEARCH
            .iter()
            .map(|(key, id, name, category)| {
                let research = Research {
                    id: *id,
                    name: name.to_string(),
                    category: category.to_string(),
                    max_level: tables::RESEARCH_MAX_LEVEL,
                };
                (key.to_string(), research)
            })
            .collect()
    }

    pub fn items(&self) -> BTreeMap<String, Item> {
        let speedups = tables::SPEEDUPS.iter().map(|(key, id, name, seconds)| {
            let item = Item {
                id: *id,
                name: name.to_string(),
                category: "speedup".to_string(),
                value: Some(*seconds),
                resource: None,
                amount: None,
            };
            (key.to_string(), item)
        });
        let packages = tables::RESOURCE_PACKAGES
            .iter()
            .map(|(key, id, name, resource, amount)| {
                let item = Item {
                    id: *id,
                    name: name.to_string(),
                    category: "resource".to_string(),
                    value: None,
                    resource: Some(resource.to_string()),
                    amount: Some(*amount),
                };
                (key.to_string(), item)
            });
        speedups.chain(packages).collect()
    }

    pub fn npcs(&self) -> BTreeMap<String, Npc> {
        (1..=tables::NPC_MAX_LEVEL)
            .map(|level| {
                let npc = Npc {
                    level,
                    troops: npc_troops(level),
                    rewards: npc_rewards(level),
                };
                (format!("level_{}", level), npc)
            })
            .collect()
    }
}
