//! Typed member field and method inventory extraction for target symbols

use crate::catalog::METHOD_CAP;
use crate::corpus::CorpusIndex;
use crate::error::{ExtractionError, ExtractionResult};
use crate::fs::FileSystem;
use crate::output::{Access, Field, FieldRegistry, Symbol};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

struct FieldPatterns {
    public_var: Regex,
    private_var: Regex,
    obfuscated: Regex,
    getter: Regex,
    method: Regex,
    extends: Regex,
}

fn patterns() -> &'static FieldPatterns {
    static PATTERNS: OnceLock<FieldPatterns> = OnceLock::new();
    PATTERNS.get_or_init(|| FieldPatterns {
        public_var: Regex::new(r"public\s+var\s+(\w+)\s*:\s*([\w.<>*]+)").expect("valid regex"),
        private_var: Regex::new(r"private\s+var\s+(\w+)\s*:\s*([\w.<>*]+)").expect("valid regex"),
        obfuscated: Regex::new(r"^_(?:\d\w*|[A-Za-z]{1,3}\d\w*)$").expect("valid regex"),
        getter: Regex::new(r"function\s+get\s+(\w+)\s*\([^)]*\)\s*:\s*([\w.<>*]+)")
            .expect("valid regex"),
        method: Regex::new(r"public\s+function\s+(\w+)\s*\(").expect("valid regex"),
        extends: Regex::new(r"class\s+(\w+)\s+extends\s+([\w.]+)").expect("valid regex"),
    })
}

/// Whether `name` is an opaque, non-semantic identifier such as `_12` or `_a1`
pub fn is_obfuscated_identifier(name: &str) -> bool {
    patterns().obfuscated.is_match(name)
}

/// Extract one symbol's structure from its source text.
///
/// Pure function of `text`: the same input always yields the same field
/// order (public declarations, then obfuscated private ones, each in
/// source order).
pub fn extract_symbol_text(symbol: &str, text: &str, source_file: &str) -> Symbol {
    let p = patterns();
    let mut out = Symbol::new(source_file);

    for caps in p.public_var.captures_iter(text) {
        push_field(symbol, &mut out.fields, Field::new(&caps[1], &caps[2], Access::Public));
    }

    for caps in p.private_var.captures_iter(text) {
        let name = &caps[1];
        if !is_obfuscated_identifier(name) {
            continue;
        }
        push_field(
            symbol,
            &mut out.fields,
            Field::new(name, &caps[2], Access::Private).obfuscated(),
        );
    }

    // Each accessor describes at most one field: the first undescribed
    // private field of the same declared type, in declaration order.
    for caps in p.getter.captures_iter(text) {
        let (accessor, ty) = (&caps[1], &caps[2]);
        if let Some(field) = out
            .fields
            .iter_mut()
            .find(|f| f.access == Access::Private && f.field_type == ty && f.description.is_empty())
        {
            field.description = format!("Property: {}", accessor);
        }
    }

    out.methods = p
        .method
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .take(METHOD_CAP)
        .collect();

    let declared_parent = p
        .extends
        .captures_iter(text)
        .find(|c| &c[1] == symbol)
        .or_else(|| p.extends.captures(text))
        .map(|c| c[2].to_string());
    if let Some(parent) = declared_parent {
        out.parent_class = parent;
    }

    out
}

/// First extraction of a name wins; a later conflicting type is discarded.
fn push_field(symbol: &str, fields: &mut Vec<Field>, field: Field) {
    match fields.iter().find(|f| f.name == field.name) {
        None => fields.push(field),
        Some(existing) if existing.field_type != field.field_type => {
            warn!(
                symbol = %symbol,
                field = %field.name,
                kept = %existing.field_type,
                discarded = %field.field_type,
                "Conflicting field type, keeping first declaration"
            );
        }
        Some(_) => {}
    }
}

pub struct FieldExtractor<'a> {
    fs: &'a dyn FileSystem,
    index: &'a CorpusIndex,
}

impl<'a> FieldExtractor<'a> {
    pub fn new(fs: &'a dyn FileSystem, index: &'a CorpusIndex) -> Self {
        Self { fs, index }
    }

    /// Extract every symbol in `symbols`; unresolvable symbols are skipped.
    pub fn extract_all(&self, symbols: &[&str]) -> FieldRegistry {
        let mut registry = FieldRegistry::new();
        for symbol in symbols {
            match self.extract(symbol) {
                Ok(extracted) => {
                    info!(symbol = %symbol, fields = extracted.fields.len(), "Extracted symbol");
                    registry.insert(symbol.to_string(), extracted);
                }
                Err(e) => warn!(symbol = %symbol, kind = e.kind(), "{}", e),
            }
        }
        registry
    }

    /// Extract a single symbol.
    ///
    /// Fails only with [`ExtractionError::NotFound`]. A canonical file that
    /// cannot be read still yields the symbol, with no fields.
    pub fn extract(&self, symbol: &str) -> ExtractionResult<Symbol> {
        let file = self.index.resolve(symbol)?;
        debug!(symbol = %symbol, path = %file.path.display(), "Resolved canonical file");
        let source_file = file.display_path();

        match file.read_text(self.fs) {
            Ok(text) => Ok(extract_symbol_text(symbol, &text, &source_file)),
            Err(e @ ExtractionError::Decode { .. }) => {
                warn!(symbol = %symbol, kind = e.kind(), "{}", e);
                Ok(Symbol::new(source_file))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::path::Path;
    use yare::parameterized;

    const WIDGET: &str = r#"
package com.example {
    public class WidgetClass extends BaseWidget {
        public var count:int;
        private var _a1:String;
        private var label_cache:String;

        public function get label():String { return _a1; }
        public function refresh(force:Boolean):void {}
    }
}
"#;

    #[parameterized(
        digits = { "_12", true },
        digits_then_letters = { "_3abc", true },
        short_letters_digit = { "_a1", true },
        three_letters_digit = { "_abc9", true },
        plain_underscore = { "_name", false },
        human = { "castleId", false },
        long_prefix = { "_abcd1", false },
    )]
    fn test_obfuscated_shape(name: &str, expected: bool) {
        assert_eq!(is_obfuscated_identifier(name), expected);
    }

    #[test]
    fn test_widget_fields() {
        let symbol = extract_symbol_text("WidgetClass", WIDGET, "WidgetClass.as");

        assert_eq!(symbol.fields.len(), 2);
        assert_eq!(symbol.fields[0].name, "count");
        assert_eq!(symbol.fields[0].access, Access::Public);
        assert!(!symbol.fields[0].is_obfuscated());

        let private = &symbol.fields[1];
        assert_eq!(private.name, "_a1");
        assert_eq!(private.access, Access::Private);
        assert!(private.is_obfuscated());
        assert_eq!(private.description, "Property: label");

        assert_eq!(symbol.parent_class, "BaseWidget");
        assert_eq!(symbol.methods, vec!["refresh"]);
    }

    #[test]
    fn test_getter_describes_first_undescribed_match_only() {
        let text = r#"
            private var _1:int;
            private var _2:int;
            private var _3:String;
            function get level():int { return _1; }
            function get power():int { return _2; }
            function get extra():int { return 0; }
        "#;
        let symbol = extract_symbol_text("X", text, "X.as");
        assert_eq!(symbol.fields[0].description, "Property: level");
        assert_eq!(symbol.fields[1].description, "Property: power");
        assert_eq!(symbol.fields[2].description, "");
    }

    #[test]
    fn test_conflicting_type_keeps_first() {
        let text = "public var _7:int; private var _7:String;";
        let symbol = extract_symbol_text("X", text, "X.as");
        assert_eq!(symbol.fields.len(), 1);
        assert_eq!(symbol.fields[0].field_type, "int");
        assert_eq!(symbol.fields[0].access, Access::Public);
    }

    #[test]
    fn test_method_inventory_is_capped() {
        let text: String = (0..30)
            .map(|i| format!("public function m{}():void {{}}\n", i))
            .collect();
        let symbol = extract_symbol_text("X", &text, "X.as");
        assert_eq!(symbol.methods.len(), METHOD_CAP);
        assert_eq!(symbol.methods[0], "m0");
        assert_eq!(symbol.methods[19], "m19");
    }

    #[test]
    fn test_default_parent_class() {
        let symbol = extract_symbol_text("X", "public class X {}", "X.as");
        assert_eq!(symbol.parent_class, "BaseBean");
    }

    #[test]
    fn test_generic_types_are_kept_verbatim() {
        let symbol = extract_symbol_text("X", "public var heroes:Vector.<HeroBean>;", "X.as");
        assert_eq!(symbol.fields[0].field_type, "Vector.<HeroBean>");
    }

    #[test]
    fn test_extract_all_skips_missing_symbols() {
        let fs = MockFileSystem::new();
        fs.add_file("/mock/beans/WidgetClass.as", WIDGET);
        fs.add_file("/mock/beans/WidgetClass_1.as", "public var stale:int;");
        let index = CorpusIndex::scan(&fs, Path::new("/mock"));

        let registry = FieldExtractor::new(&fs, &index).extract_all(&["WidgetClass", "GhostBean"]);

        assert_eq!(registry.len(), 1);
        let widget = &registry["WidgetClass"];
        assert_eq!(widget.source_file, "beans/WidgetClass.as");
        assert_eq!(widget.fields.len(), 2);
    }

    #[test]
    fn test_stray_latin1_byte_keeps_fields() {
        let fs = MockFileSystem::new();
        fs.add_bytes(
            "/mock/HeroBean.as",
            b"public class HeroBean {\n    // r\xe9sum\xe9 of the hero\n    public var name:String;\n    public var level:int;\n}\n",
        );
        let index = CorpusIndex::scan(&fs, Path::new("/mock"));

        let hero = FieldExtractor::new(&fs, &index).extract("HeroBean").unwrap();
        let names: Vec<&str> = hero.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "level"]);
    }

    #[test]
    fn test_binary_file_yields_empty_symbol() {
        let fs = MockFileSystem::new();
        fs.add_bytes("/mock/HeroBean.as", &[0xff, 0xfe, 0x00]);
        let index = CorpusIndex::scan(&fs, Path::new("/mock"));

        let hero = FieldExtractor::new(&fs, &index).extract("HeroBean").unwrap();
        assert!(hero.fields.is_empty());
        assert_eq!(hero.source_file, "HeroBean.as");
    }
}
