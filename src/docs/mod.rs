//! Markdown references rendered from the registries
//!
//! Rendering is a pure function of its inputs. Empty registries produce an
//! empty section, never an error.

use crate::output::{Command, CommandRegistry, ConstantTables, FieldRegistry};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

const EMPTY_SYMBOLS: &str = "_No symbols extracted._";
const EMPTY_CONSTANTS: &str = "_No constant tables available._";
const EMPTY_COMMANDS: &str = "_No commands extracted._";

/// Keep table layout intact when a cell contains a pipe
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentationRenderer;

impl DocumentationRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Per-symbol field tables followed by the constant tables
    pub fn render_data_model(&self, symbols: &FieldRegistry, constants: &ConstantTables) -> Result<String> {
        let mut out = String::new();
        write_data_model(&mut out, symbols, constants).context("Failed to render data model reference")?;
        Ok(out)
    }

    /// Per-category command tables, sorted by category then name
    pub fn render_api_reference(&self, commands: &CommandRegistry) -> Result<String> {
        let mut out = String::new();
        write_api_reference(&mut out, commands).context("Failed to render API reference")?;
        Ok(out)
    }
}

fn write_data_model(out: &mut String, symbols: &FieldRegistry, constants: &ConstantTables) -> fmt::Result {
    writeln!(out, "# Evony Data Model Reference")?;
    writeln!(out, "## Auto-Generated from Source Analysis\n\n---\n")?;

    writeln!(out, "## Bean Classes\n")?;
    if symbols.is_empty() {
        writeln!(out, "{}\n", EMPTY_SYMBOLS)?;
    }
    for (name, symbol) in symbols {
        writeln!(out, "### {}", name)?;
        writeln!(out, "**Source:** `{}`  ", symbol.source_file)?;
        writeln!(out, "**Extends:** `{}`\n", symbol.parent_class)?;

        if symbol.fields.is_empty() {
            writeln!(out, "_No fields extracted._\n")?;
        } else {
            writeln!(out, "| Field | Type | Access | Description |")?;
            writeln!(out, "|-------|------|--------|-------------|")?;
            for field in &symbol.fields {
                writeln!(
                    out,
                    "| {} | {} | {} | {} |",
                    cell(&field.name),
                    cell(&field.field_type),
                    field.access,
                    cell(&field.description)
                )?;
            }
            writeln!(out)?;
        }

        if !symbol.methods.is_empty() {
            let methods: Vec<String> = symbol.methods.iter().map(|m| format!("`{}`", m)).collect();
            writeln!(out, "**Methods:** {}\n", methods.join(", "))?;
        }
    }

    writeln!(out, "## Constants\n")?;
    if constants.is_empty() {
        writeln!(out, "{}\n", EMPTY_CONSTANTS)?;
    }
    for (domain, table) in constants {
        writeln!(out, "### {}\n", domain)?;
        writeln!(out, "| Value | Name |")?;
        writeln!(out, "|-------|------|")?;
        for (value, name) in table {
            writeln!(out, "| {} | {} |", cell(value), cell(name))?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn write_api_reference(out: &mut String, commands: &CommandRegistry) -> fmt::Result {
    writeln!(out, "# Evony Protocol API Reference")?;
    writeln!(out, "## Auto-Generated Command Documentation\n\n---\n")?;

    if commands.is_empty() {
        return writeln!(out, "{}", EMPTY_COMMANDS);
    }

    let mut by_category: BTreeMap<&str, Vec<&Command>> = BTreeMap::new();
    for command in commands.commands() {
        by_category.entry(command.category.as_str()).or_default().push(command);
    }

    for (category, mut cmds) in by_category {
        cmds.sort_by(|a, b| a.name.cmp(&b.name));
        writeln!(out, "## {} Commands\n", category.to_uppercase())?;
        for command in cmds {
            write_command(out, command)?;
        }
    }

    Ok(())
}

/// Parameters carry no default value, only whether one was declared
fn write_command(out: &mut String, command: &Command) -> fmt::Result {
    writeln!(out, "### `{}`", command.key())?;
    if !command.description.is_empty() {
        writeln!(out, "{}", command.description)?;
    }
    writeln!(out)?;

    if command.parameters.is_empty() {
        writeln!(out, "_No parameters._")?;
    } else {
        writeln!(out, "| Parameter | Type | Required | Default |")?;
        writeln!(out, "|-----------|------|----------|---------|")?;
        for p in &command.parameters {
            let (required, default) = if p.required { ("yes", "-") } else { ("no", "declared") };
            writeln!(
                out,
                "| `{}` | {} | {} | {} |",
                cell(&p.name),
                cell(&p.param_type),
                required,
                default
            )?;
        }
    }

    if !command.response_type.is_empty() {
        writeln!(out, "\n**Response:** `{}`", command.response_type)?;
    }
    writeln!(out)
}
