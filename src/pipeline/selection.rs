use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline phases; declaration order is execution order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Every phase below, in order
    All,
    /// Field maps of the target symbols
    Beans,
    /// Command registry
    Protocols,
    /// Reference tables
    Gamedata,
    /// Constant tables
    Constants,
    /// Markdown references
    Docs,
    /// Quality audit
    Qa,
}

impl Phase {
    /// Concrete phases in dependency order
    pub const ORDERED: [Phase; 6] = [
        Phase::Beans,
        Phase::Protocols,
        Phase::Gamedata,
        Phase::Constants,
        Phase::Docs,
        Phase::Qa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::All => "all",
            Phase::Beans => "beans",
            Phase::Protocols => "protocols",
            Phase::Gamedata => "gamedata",
            Phase::Constants => "constants",
            Phase::Docs => "docs",
            Phase::Qa => "qa",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expand a user selection into the phases to run, in fixed order.
///
/// An empty selection or one containing `all` runs everything; repeated
/// phases run once.
pub fn resolve_phases(selection: &[Phase]) -> Vec<Phase> {
    if selection.is_empty() || selection.contains(&Phase::All) {
        return Phase::ORDERED.to_vec();
    }
    Phase::ORDERED
        .into_iter()
        .filter(|p| selection.contains(p))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        empty = { &[], &Phase::ORDERED },
        all = { &[Phase::All], &Phase::ORDERED },
        all_with_others = { &[Phase::Qa, Phase::All], &Phase::ORDERED },
        reordered = { &[Phase::Qa, Phase::Beans], &[Phase::Beans, Phase::Qa] },
        repeated = { &[Phase::Docs, Phase::Docs], &[Phase::Docs] },
    )]
    fn test_resolve_phases(selection: &[Phase], expected: &[Phase]) {
        assert_eq!(resolve_phases(selection), expected);
    }

    #[test]
    fn test_value_names_match_display() {
        for phase in Phase::value_variants() {
            let value = phase.to_possible_value().unwrap();
            assert_eq!(value.get_name(), phase.as_str());
        }
    }
}
