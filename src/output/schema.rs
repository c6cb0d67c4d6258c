//! Knowledge-base schema data structures
//!
//! These types are both the in-memory registries passed between phases and
//! the on-disk JSON artifact shapes. All maps are ordered so that two
//! serializations of equal registries are byte-identical.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

fn default_parent_class() -> String {
    crate::catalog::DEFAULT_PARENT_CLASS.to_string()
}

/// Member visibility as declared in source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Private,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Public => write!(f, "public"),
            Access::Private => write!(f, "private"),
        }
    }
}

/// A typed member field of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    /// Declared type as written in source (e.g., "int", "Vector.<String>")
    #[serde(rename = "type")]
    pub field_type: String,
    pub access: Access,
    /// Inferred from an accessor, empty when none matched
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,
    /// The opaque source name, empty for human-named fields
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub obfuscated_name: String,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>, access: Access) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            access,
            description: String::new(),
            obfuscated_name: String::new(),
        }
    }

    pub fn obfuscated(mut self) -> Self {
        self.obfuscated_name = self.name.clone();
        self
    }

    pub fn is_obfuscated(&self) -> bool {
        !self.obfuscated_name.is_empty()
    }
}

/// Extracted structure of one class-like definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub fields: Vec<Field>,
    /// Public method names in source order, capped
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub methods: Vec<String>,
    /// Canonical file, relative to the corpus root
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub source_file: String,
    #[serde(default = "default_parent_class")]
    pub parent_class: String,
}

impl Symbol {
    pub fn new(source_file: impl Into<String>) -> Self {
        Self {
            fields: Vec::new(),
            methods: Vec::new(),
            source_file: source_file.into(),
            parent_class: default_parent_class(),
        }
    }
}

/// Symbol name -> extracted structure; this is the field-map artifact
pub type FieldRegistry = BTreeMap<String, Symbol>;

/// One parameter of a command signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    /// False exactly when the declaration carries a default value
    pub required: bool,
}

/// An outgoing protocol command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub name: String,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub parameters: Vec<Parameter>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub response_type: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub error_codes: Vec<i64>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,
}

impl Command {
    pub fn bare(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            parameters: Vec::new(),
            response_type: String::new(),
            error_codes: Vec::new(),
            description: String::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn key(&self) -> String {
        CommandRegistry::key(&self.category, &self.name)
    }
}

/// What happened when a command was registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// Key existed; the stored command was kept and only gaps were filled
    Merged { parameters_added: usize },
}

/// All commands of a run keyed by `category.name`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandRegistry {
    commands: BTreeMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(category: &str, name: &str) -> String {
        format!("{}.{}", category, name)
    }

    /// Register `command`, merging into an existing entry with the same key.
    ///
    /// A second definition never replaces or truncates the stored parameter
    /// list: parameters whose names are not yet present are appended, and
    /// empty response type / description fields are filled in.
    pub fn insert(&mut self, command: Command) -> MergeOutcome {
        let key = command.key();
        match self.commands.get_mut(&key) {
            None => {
                self.commands.insert(key, command);
                MergeOutcome::Inserted
            }
            Some(existing) => {
                let mut parameters_added = 0;
                for param in command.parameters {
                    if !existing.parameters.iter().any(|p| p.name == param.name) {
                        existing.parameters.push(param);
                        parameters_added += 1;
                    }
                }
                if existing.response_type.is_empty() {
                    existing.response_type = command.response_type;
                }
                if existing.description.is_empty() {
                    existing.description = command.description;
                }
                for code in command.error_codes {
                    if !existing.error_codes.contains(&code) {
                        existing.error_codes.push(code);
                    }
                }
                debug!(key = %key, parameters_added, "Merged duplicate command definition");
                MergeOutcome::Merged { parameters_added }
            }
        }
    }

    pub fn get(&self, category: &str, name: &str) -> Option<&Command> {
        self.commands.get(&Self::key(category, name))
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn commands_mut(&mut self) -> impl Iterator<Item = &mut Command> {
        self.commands.values_mut()
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Command> {
        self.commands.values().filter(move |c| c.category == category)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn to_artifact(&self, categories: &[&str]) -> CommandRegistryArtifact {
        CommandRegistryArtifact {
            commands: self.commands.clone(),
            categories: categories.iter().map(|c| c.to_string()).collect(),
            total_commands: self.commands.len(),
        }
    }

    pub fn from_artifact(artifact: CommandRegistryArtifact) -> Self {
        let mut registry = Self::new();
        for command in artifact.commands.into_values() {
            registry.insert(command);
        }
        registry
    }
}

/// On-disk shape of the command registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRegistryArtifact {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub commands: BTreeMap<String, Command>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub categories: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub total_commands: usize,
}

/// Domain -> raw integer text -> symbolic name
pub type ConstantTables = BTreeMap<String, BTreeMap<String, String>>;
