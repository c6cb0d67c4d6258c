//! Knowledge-base artifact schema

pub mod schema;

pub use schema::{
    Access, Command, CommandRegistry, CommandRegistryArtifact, ConstantTables, Field,
    FieldRegistry, MergeOutcome, Parameter, Symbol,
};
