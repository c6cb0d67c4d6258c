//! Textual parsing of declared parameter lists

use crate::error::{ExtractionError, ExtractionResult};
use crate::output::Parameter;
use tracing::warn;

/// Split on commas that are not nested inside brackets or string literals.
pub fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = (depth - 1).max(0),
            ',' if depth == 0 => {
                parts.push(list[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(list[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

/// Parse one `name:Type` or `name:Type = default` declaration.
pub fn parse_parameter(text: &str) -> ExtractionResult<Parameter> {
    let (decl, default) = match text.find('=') {
        Some(i) => (&text[..i], Some(text[i + 1..].trim())),
        None => (text, None),
    };
    let (name, ty) = decl.split_once(':').ok_or_else(|| ExtractionError::PatternMismatch {
        what: "parameter",
        text: text.to_string(),
    })?;
    let (name, ty) = (name.trim(), ty.trim());
    if name.is_empty() || ty.is_empty() {
        return Err(ExtractionError::PatternMismatch {
            what: "parameter",
            text: text.to_string(),
        });
    }

    Ok(Parameter {
        name: name.to_string(),
        param_type: ty.to_string(),
        required: default.is_none(),
    })
}

/// Parse a full parameter list, skipping declarations that do not fit.
pub fn parse_parameter_list(list: &str) -> Vec<Parameter> {
    split_top_level(list)
        .into_iter()
        .filter_map(|p| match parse_parameter(p) {
            Ok(param) => Some(param),
            Err(e) => {
                warn!(kind = e.kind(), "{}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        with_default = { "count:int=0", "count", "int", false },
        without_default = { "count:int", "count", "int", true },
        spaced_default = { "name : String = \"a:b\"", "name", "String", false },
        generic = { "ids:Vector.<int>", "ids", "Vector.<int>", true },
    )]
    fn test_parse_parameter(text: &str, name: &str, ty: &str, required: bool) {
        let param = parse_parameter(text).unwrap();
        assert_eq!(param.name, name);
        assert_eq!(param.param_type, ty);
        assert_eq!(param.required, required);
    }

    #[test]
    fn test_untyped_parameter_is_a_mismatch() {
        let err = parse_parameter("...rest").unwrap_err();
        assert_eq!(err.kind(), "pattern_mismatch");
    }

    #[test]
    fn test_split_respects_nesting_and_quotes() {
        let parts = split_top_level(r#"a:Array = [1, 2], b:String = "x, y", c:Object = {k: 1}, d:int"#);
        assert_eq!(
            parts,
            vec![
                "a:Array = [1, 2]",
                r#"b:String = "x, y""#,
                "c:Object = {k: 1}",
                "d:int",
            ]
        );
    }

    #[test]
    fn test_list_skips_bad_items_and_keeps_siblings() {
        let params = parse_parameter_list("castleId:int, ...rest, count:int = 1");
        assert_eq!(params.len(), 2);
        assert!(params[0].required);
        assert!(!params[1].required);
    }

    #[test]
    fn test_empty_list() {
        assert!(parse_parameter_list("   ").is_empty());
    }
}
