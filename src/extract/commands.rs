//! Categorized protocol command extraction with a static fallback path

use super::params::parse_parameter_list;
use crate::catalog::COMMAND_CATEGORIES;
use crate::corpus::{decode_lossy, CorpusIndex, SourceFile};
use crate::error::{ExtractionError, ExtractionResult};
use crate::fs::FileSystem;
use crate::output::{Command, CommandRegistry};
use crate::search::SearchBackend;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

const DESCRIPTION_MAX_CHARS: usize = 160;

fn dispatch_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // A function whose body reaches a Sender call before its first closing brace
    RE.get_or_init(|| {
        Regex::new(r"(?s)public\s+function\s+(\w+)\s*\(([^)]*)\)[^{]*\{[^}]*Sender")
            .expect("valid regex")
    })
}

fn mapping_entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?s)['"](\w+)['"]\s*:\s*\[(.*?)\]"#).expect("valid regex"))
}

fn mapping_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"['"](\w+)['"]"#).expect("valid regex"))
}

/// Static category -> command-name table used when a category has no definition files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackMapping {
    categories: BTreeMap<String, Vec<String>>,
}

/// Parse a dict literal of the form `'category': ['cmdA', "cmdB"]`.
pub fn parse_fallback_mapping(text: &str) -> FallbackMapping {
    let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for caps in mapping_entry_re().captures_iter(text) {
        let names = categories.entry(caps[1].to_string()).or_default();
        for name in mapping_name_re().captures_iter(&caps[2]) {
            if !names.iter().any(|n| n == &name[1]) {
                names.push(name[1].to_string());
            }
        }
    }
    FallbackMapping { categories }
}

impl FallbackMapping {
    pub fn load(fs: &dyn FileSystem, path: &Path) -> ExtractionResult<Self> {
        if !fs.is_file(path) {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }
        let bytes = fs.read_bytes(path).map_err(|e| ExtractionError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(parse_fallback_mapping(&decode_lossy(path, bytes)))
    }

    pub fn commands_for(&self, category: &str) -> &[String] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Commands defined in one category file's text, in source order
pub fn extract_commands_text(category: &str, text: &str) -> Vec<Command> {
    dispatch_re()
        .captures_iter(text)
        .map(|caps| Command::bare(category, &caps[1]).with_parameters(parse_parameter_list(&caps[2])))
        .collect()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// First line of a snippet, bounded for use as a description
fn snippet_summary(snippet: &str) -> Option<String> {
    let line = snippet.lines().map(str::trim).find(|l| !l.is_empty())?;
    Some(line.chars().take(DESCRIPTION_MAX_CHARS).collect())
}

pub struct CommandExtractor<'a> {
    fs: &'a dyn FileSystem,
    index: &'a CorpusIndex,
    categories: Vec<String>,
    fallback: FallbackMapping,
    search: SearchBackend,
    top_k: usize,
}

impl<'a> CommandExtractor<'a> {
    pub fn new(fs: &'a dyn FileSystem, index: &'a CorpusIndex) -> Self {
        Self {
            fs,
            index,
            categories: COMMAND_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            fallback: FallbackMapping::default(),
            search: SearchBackend::unavailable("not configured"),
            top_k: 3,
        }
    }

    pub fn with_categories(mut self, categories: &[&str]) -> Self {
        self.categories = categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Load the fallback mapping; a missing or unreadable file leaves it empty.
    pub fn with_fallback_file(mut self, path: &Path) -> Self {
        match FallbackMapping::load(self.fs, path) {
            Ok(mapping) => {
                debug!(path = %path.display(), "Loaded fallback command mapping");
                self.fallback = mapping;
            }
            Err(e) => warn!(kind = e.kind(), "Fallback mapping unavailable: {}", e),
        }
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackMapping) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_search(mut self, search: SearchBackend, top_k: usize) -> Self {
        self.search = search;
        self.top_k = top_k;
        self
    }

    /// Definition files for `category`, in scan order.
    ///
    /// Both `<Category>Commands*` and `<category>Commands*` are matched.
    /// A duplicate-suffixed copy is dropped when its unmarked sibling is
    /// also present.
    pub fn category_files(&self, category: &str) -> Vec<&'a SourceFile> {
        let mut files: Vec<&SourceFile> = Vec::new();
        for prefix in [format!("{}Commands", capitalize(category)), format!("{}Commands", category)] {
            for file in self.index.find_by_prefix(&prefix) {
                if !files.iter().any(|f| f.path == file.path) {
                    files.push(file);
                }
            }
        }

        let canonical: Vec<String> = files
            .iter()
            .filter(|f| !f.is_duplicate_variant())
            .map(|f| f.variant_key.clone())
            .collect();
        files.retain(|f| !f.is_duplicate_variant() || !canonical.contains(&f.variant_key));
        files
    }

    pub fn extract_all(&self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for category in &self.categories {
            let before = registry.len();
            self.extract_category(category, &mut registry);
            info!(category = %category, commands = registry.len() - before, "Extracted category");
        }

        let enriched = self.enrich(&mut registry);
        if enriched > 0 {
            info!(enriched, "Commands described from semantic search");
        }
        registry
    }

    /// Add one category's commands to `registry`.
    pub fn extract_category(&self, category: &str, registry: &mut CommandRegistry) {
        let files = self.category_files(category);
        if files.is_empty() {
            self.apply_fallback(category, registry);
            return;
        }

        for file in files {
            match file.read_text(self.fs) {
                Ok(text) => {
                    for command in extract_commands_text(category, &text) {
                        registry.insert(command);
                    }
                }
                Err(e) => warn!(category = %category, kind = e.kind(), "{}", e),
            }
        }
    }

    fn apply_fallback(&self, category: &str, registry: &mut CommandRegistry) {
        let names = self.fallback.commands_for(category);
        if names.is_empty() {
            let e = ExtractionError::NotFound(format!("category {}", category));
            warn!(category = %category, kind = e.kind(), "{}, no fallback entries", e);
            return;
        }
        debug!(category = %category, names = names.len(), "Using fallback mapping");
        for name in names {
            if registry.get(category, name).is_none() {
                registry.insert(Command::bare(category, name));
            }
        }
    }

    /// Fill empty descriptions from the search backend.
    ///
    /// The first collaborator error stops enrichment for the rest of the run.
    pub fn enrich(&self, registry: &mut CommandRegistry) -> usize {
        let SearchBackend::Available(client) = &self.search else {
            return 0;
        };

        let mut enriched = 0;
        for command in registry.commands_mut() {
            if !command.description.is_empty() {
                continue;
            }
            let query = command.key();
            match client.search(&query, self.top_k) {
                Ok(hits) => {
                    if let Some(summary) = hits.first().and_then(|h| snippet_summary(&h.snippet)) {
                        command.description = summary;
                        enriched += 1;
                    }
                }
                Err(e) => {
                    let e = ExtractionError::CollaboratorUnavailable(e.to_string());
                    warn!(kind = e.kind(), "{}, continuing pattern-only", e);
                    break;
                }
            }
        }
        enriched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::search::{MockSearch, SearchError};
    use std::sync::Arc;

    const ARMY_COMMANDS: &str = r#"
public class ArmyCommands {
    public function newArmy(castleId:int, heroId:int, count:int = 0):void {
        Sender.send("army.newArmy", [castleId, heroId, count]);
    }

    public function helper(x:int):int {
        return x * 2;
    }

    public function callBackArmy(armyId:int):void
    {
        ActionFactory.getInstance().getSender().sendMessage("army.callBackArmy", armyId);
    }
}
"#;

    fn index_with(fs: &MockFileSystem, files: &[(&str, &str)]) -> CorpusIndex {
        for (path, text) in files {
            fs.add_file(path, text);
        }
        CorpusIndex::scan(fs, Path::new("/mock"))
    }

    #[test]
    fn test_only_dispatching_functions_are_commands() {
        let commands = extract_commands_text("army", ARMY_COMMANDS);
        let names: Vec<&str> = commands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["newArmy", "callBackArmy"]);

        let new_army = &commands[0];
        assert_eq!(new_army.parameters.len(), 3);
        assert!(new_army.parameters[0].required);
        assert!(!new_army.parameters[2].required);
    }

    #[test]
    fn test_parse_fallback_mapping_quotes() {
        let mapping = parse_fallback_mapping(
            r#"COMMANDS = {
    'shop': ['buy', 'sell'],
    "trade": ["getMyTradeList",
              'cancelTrade'],
}"#,
        );
        assert_eq!(mapping.commands_for("shop"), ["buy", "sell"]);
        assert_eq!(mapping.commands_for("trade"), ["getMyTradeList", "cancelTrade"]);
        assert!(mapping.commands_for("army").is_empty());
    }

    #[test]
    fn test_fallback_yields_bare_entries() {
        let fs = MockFileSystem::new();
        let index = index_with(&fs, &[]);
        let fallback = parse_fallback_mapping("{'shop': ['buy', 'sell']}");

        let registry = CommandExtractor::new(&fs, &index)
            .with_categories(&["shop"])
            .with_fallback(fallback)
            .extract_all();

        assert_eq!(registry.len(), 2);
        let buy = registry.get("shop", "buy").unwrap();
        assert!(buy.parameters.is_empty());
        assert_eq!(buy.category, "shop");
    }

    #[test]
    fn test_case_variants_and_duplicate_skipping() {
        let fs = MockFileSystem::new();
        let index = index_with(
            &fs,
            &[
                ("/mock/a/ArmyCommands.as", ARMY_COMMANDS),
                ("/mock/a/ArmyCommands_1.as", "stale copy"),
                ("/mock/b/armyCommandsExtra.as", "x"),
                ("/mock/c/TroopCommands_2.as", "only copy"),
            ],
        );
        let extractor = CommandExtractor::new(&fs, &index);

        let army: Vec<String> = extractor
            .category_files("army")
            .iter()
            .map(|f| f.display_path())
            .collect();
        assert_eq!(army, vec!["a/ArmyCommands.as", "b/armyCommandsExtra.as"]);

        let troop = extractor.category_files("troop");
        assert_eq!(troop.len(), 1);
    }

    #[test]
    fn test_rescan_does_not_truncate_parameters() {
        let fs = MockFileSystem::new();
        let index = index_with(&fs, &[("/mock/ArmyCommands.as", ARMY_COMMANDS)]);
        let extractor = CommandExtractor::new(&fs, &index)
            .with_categories(&["army"])
            .with_fallback(parse_fallback_mapping("{'army': ['newArmy']}"));

        let mut registry = CommandRegistry::new();
        extractor.extract_category("army", &mut registry);
        extractor.extract_category("army", &mut registry);
        registry.insert(Command::bare("army", "newArmy"));

        assert_eq!(registry.get("army", "newArmy").unwrap().parameters.len(), 3);
    }

    #[test]
    fn test_enrichment_fills_empty_descriptions() {
        let fs = MockFileSystem::new();
        let index = index_with(&fs, &[]);
        let search = MockSearch::new();
        search.add_hit("shop.buy", "ShopCommands.as", "\n  Purchase an item from the shop\nmore", 0.8);

        let registry = CommandExtractor::new(&fs, &index)
            .with_categories(&["shop"])
            .with_fallback(parse_fallback_mapping("{'shop': ['buy', 'sell']}"))
            .with_search(SearchBackend::Available(Arc::new(search)), 3)
            .extract_all();

        assert_eq!(
            registry.get("shop", "buy").unwrap().description,
            "Purchase an item from the shop"
        );
        assert_eq!(registry.get("shop", "sell").unwrap().description, "");
    }

    #[test]
    fn test_first_search_error_disables_enrichment() {
        let fs = MockFileSystem::new();
        let index = index_with(&fs, &[]);
        let search = Arc::new(MockSearch::failing(SearchError::Status(503)));

        let registry = CommandExtractor::new(&fs, &index)
            .with_categories(&["shop"])
            .with_fallback(parse_fallback_mapping("{'shop': ['buy', 'sell', 'gift']}"))
            .with_search(SearchBackend::Available(search.clone()), 3)
            .extract_all();

        assert_eq!(registry.len(), 3);
        assert_eq!(search.calls(), 1);
    }

    #[test]
    fn test_summary_is_bounded() {
        let long = "x".repeat(400);
        assert_eq!(snippet_summary(&long).unwrap().chars().count(), DESCRIPTION_MAX_CHARS);
        assert_eq!(snippet_summary("  \n\n"), None);
    }
}
