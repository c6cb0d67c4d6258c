//! Closed sets the pipeline works against.

/// Bean classes whose fields are extracted
pub const TARGET_SYMBOLS: &[&str] = &[
    "CastleBean",
    "HeroBean",
    "ArmyBean",
    "PlayerInfoBean",
    "BuildingBean",
    "TroopBean",
    "TroopStrBean",
    "ResourceBean",
    "EquipmentBean",
    "ItemBean",
    "QuestBean",
    "ReportBean",
    "TradeBean",
    "TechBean",
    "ColonyBean",
    "BuffBean",
    "MailBean",
    "MapCastleBean",
    "FieldBean",
    "FortificationsBean",
];

/// Protocol command categories
pub const COMMAND_CATEGORIES: &[&str] = &[
    "alliance",
    "army",
    "castle",
    "city",
    "colony",
    "common",
    "field",
    "fortifications",
    "gameclient",
    "hero",
    "interior",
    "quest",
    "report",
    "resource",
    "shop",
    "tech",
    "trade",
    "troop",
];

/// Extensions of the two recognized source-file families
pub const SOURCE_EXTENSIONS: &[&str] = &["as", "py"];

/// Generated, compiled, and test-double artifacts that never belong in the dataset
pub const EXCLUDE_PATTERNS: &[&str] = &[
    r"topics\.py$",
    r"^mx\.",
    r"^flash\.",
    r"_Tests\.as$",
    r"\.pyc$",
    r"\.swf$",
    r"__pycache__",
];

/// Output artifact extensions swept for zero-length files
pub const ARTIFACT_EXTENSIONS: &[&str] = &["json", "md"];

/// Parent class recorded when a bean declares none
pub const DEFAULT_PARENT_CLASS: &str = "BaseBean";

/// Public method names retained per symbol
pub const METHOD_CAP: usize = 20;

pub fn is_source_extension(ext: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_sets_have_no_duplicates() {
        let mut symbols = TARGET_SYMBOLS.to_vec();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), TARGET_SYMBOLS.len());

        let mut categories = COMMAND_CATEGORIES.to_vec();
        categories.sort();
        categories.dedup();
        assert_eq!(categories.len(), COMMAND_CATEGORIES.len());
    }

    #[test]
    fn test_exclusion_patterns_compile() {
        for pattern in EXCLUDE_PATTERNS {
            assert!(regex::Regex::new(pattern).is_ok(), "bad pattern {}", pattern);
        }
    }

    #[test]
    fn test_source_extension_is_case_insensitive() {
        assert!(is_source_extension("as"));
        assert!(is_source_extension("PY"));
        assert!(!is_source_extension("swf"));
    }
}
