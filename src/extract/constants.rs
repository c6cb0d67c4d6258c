//! Symbolic constant tables, one per domain

use crate::corpus::CorpusIndex;
use crate::error::{ExtractionError, ExtractionResult};
use crate::fs::FileSystem;
use crate::output::ConstantTables;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

pub type ConstantTable = BTreeMap<String, String>;

type BuiltinTable = (&'static str, &'static [(&'static str, &'static str)]);

const ERROR_CODE_PREFIX: &str = "ErrorCode";

const BUILDING_TYPES: &[(&str, &str)] = &[
    ("1", "TOWNHALL"),
    ("2", "BARRACKS"),
    ("3", "COTTAGE"),
    ("4", "SAWMILL"),
    ("5", "QUARRY"),
    ("6", "IRONMINE"),
    ("7", "FARM"),
    ("8", "WAREHOUSE"),
    ("9", "GRANARY"),
    ("20", "STABLE"),
    ("21", "INN"),
    ("22", "FORGE"),
    ("23", "MARKETPLACE"),
    ("24", "RELIEF_STATION"),
    ("25", "ACADEMY"),
    ("26", "WORKSHOP"),
    ("27", "FEASTING_HALL"),
    ("28", "EMBASSY"),
    ("29", "RALLY_SPOT"),
    ("30", "BEACON_TOWER"),
    ("31", "WALLS"),
];

const TROOP_TYPES: &[(&str, &str)] = &[
    ("2", "WORKER"),
    ("3", "WARRIOR"),
    ("4", "SCOUT"),
    ("5", "PIKEMAN"),
    ("6", "SWORDSMAN"),
    ("7", "ARCHER"),
    ("8", "CAVALRY"),
    ("9", "CATAPHRACT"),
    ("10", "TRANSPORTER"),
    ("11", "BALLISTA"),
    ("12", "BATTERING_RAM"),
    ("13", "CATAPULT"),
];

const HERO_STATUS: &[(&str, &str)] = &[
    ("0", "FREE"),
    ("1", "MAYOR"),
    ("2", "DEFENDING"),
    ("3", "MARCHING"),
    ("4", "CAPTIVE"),
    ("5", "REINFORCING"),
    ("6", "FLEEING"),
    ("7", "FLED"),
];

const ARMY_MISSIONS: &[(&str, &str)] = &[
    ("1", "TRANSPORT"),
    ("2", "REINFORCE"),
    ("3", "OCCUPY"),
    ("4", "SCOUT"),
    ("5", "ATTACK"),
    ("6", "COLONIZE"),
];

/// Used only when no error-code declarations can be extracted
const ERROR_CODES_FALLBACK: &[(&str, &str)] = &[
    ("0", "OK"),
    ("-1", "UNKNOWN_ERROR"),
    ("-2", "INVALID_PARAMETER"),
    ("-3", "NOT_LOGGED_IN"),
    ("-4", "RESOURCE_NOT_ENOUGH"),
];

/// Domains without a reliable source convention
pub fn builtin_tables() -> &'static [BuiltinTable] {
    &[
        ("building_types", BUILDING_TYPES),
        ("troop_types", TROOP_TYPES),
        ("hero_status", HERO_STATUS),
        ("army_missions", ARMY_MISSIONS),
    ]
}

fn const_decl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"public\s+static\s+const\s+(\w+)\s*:\s*int\s*=\s*(-?\d+)").expect("valid regex")
    })
}

fn table_from(entries: &[(&str, &str)]) -> ConstantTable {
    entries
        .iter()
        .map(|(v, n)| (v.to_string(), n.to_string()))
        .collect()
}

/// Invert `NAME:int = value` declarations into `table`.
///
/// The literal integer text is the key, so `-1` and `1` never collide. When
/// a value is already mapped the first name is kept. Returns the number of
/// entries added.
pub fn collect_int_constants(domain: &str, text: &str, table: &mut ConstantTable) -> usize {
    let mut added = 0;
    for caps in const_decl_re().captures_iter(text) {
        let (name, value) = (&caps[1], &caps[2]);
        match table.get(value) {
            None => {
                table.insert(value.to_string(), name.to_string());
                added += 1;
            }
            Some(existing) if existing != name => {
                warn!(
                    domain = %domain,
                    value = %value,
                    kept = %existing,
                    discarded = %name,
                    "Constant value collision, keeping first name"
                );
            }
            Some(_) => {}
        }
    }
    added
}

pub struct ConstantConsolidator<'a> {
    fs: &'a dyn FileSystem,
    index: &'a CorpusIndex,
}

impl<'a> ConstantConsolidator<'a> {
    pub fn new(fs: &'a dyn FileSystem, index: &'a CorpusIndex) -> Self {
        Self { fs, index }
    }

    /// Build every domain table; each domain is derived independently.
    pub fn consolidate(&self) -> ConstantTables {
        let mut tables = ConstantTables::new();

        let error_codes = match self.extract_error_codes() {
            Ok(table) if !table.is_empty() => table,
            Ok(_) => {
                warn!(domain = "error_codes", "No error codes extracted, using curated table");
                table_from(ERROR_CODES_FALLBACK)
            }
            Err(e) => {
                warn!(domain = "error_codes", kind = e.kind(), "{}, using curated table", e);
                table_from(ERROR_CODES_FALLBACK)
            }
        };
        info!(domain = "error_codes", entries = error_codes.len(), "Consolidated constants");
        tables.insert("error_codes".to_string(), error_codes);

        for (domain, entries) in builtin_tables() {
            let table = table_from(entries);
            debug!(domain = %domain, entries = table.len(), "Built-in constant table");
            tables.insert(domain.to_string(), table);
        }

        tables
    }

    /// Error codes declared in `ErrorCode*` source files, in scan order
    pub fn extract_error_codes(&self) -> ExtractionResult<ConstantTable> {
        let files = self.index.find_by_prefix(ERROR_CODE_PREFIX);
        if files.is_empty() {
            return Err(ExtractionError::NotFound(format!("{}* files", ERROR_CODE_PREFIX)));
        }

        let mut table = ConstantTable::new();
        for file in files {
            match file.read_text(self.fs) {
                Ok(text) => {
                    let added = collect_int_constants("error_codes", &text, &mut table);
                    debug!(path = %file.display_path(), added, "Scanned error-code file");
                }
                Err(e) => warn!(domain = "error_codes", kind = e.kind(), "{}", e),
            }
        }
        Ok(table)
    }
}
