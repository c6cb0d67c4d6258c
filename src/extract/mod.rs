//! Pattern-based extraction over the corpus

pub mod commands;
pub mod constants;
pub mod fields;
pub mod params;

pub use commands::{parse_fallback_mapping, CommandExtractor, FallbackMapping};
pub use constants::{builtin_tables, ConstantConsolidator};
pub use fields::{extract_symbol_text, FieldExtractor};
pub use params::{parse_parameter, parse_parameter_list, split_top_level};
