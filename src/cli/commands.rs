use crate::config::DataforgeConfig;
use crate::pipeline::Phase;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Knowledge-base extraction and dataset assembly
#[derive(Parser, Debug)]
#[command(
    name = "dataforge",
    about = "Extract a structured knowledge base from a decompiled client corpus",
    version,
    author,
    long_about = "dataforge scans a corpus of decompiled client sources and writes typed \
                  field maps, a categorized command registry, constant tables, reference \
                  data and generated documentation, followed by a data-quality report.\n\n\
                  Examples:\n  \
                  dataforge\n  \
                  dataforge --phase beans protocols\n  \
                  dataforge --source ./dump --output ./dataset --format json"
)]
pub struct CliArgs {
    #[arg(
        short = 'p',
        long = "phase",
        value_enum,
        num_args = 1..,
        default_value = "all",
        help = "Phases to run, in any order"
    )]
    pub phases: Vec<Phase>,

    #[arg(long, value_name = "DIR", help = "Corpus root (overrides DATAFORGE_SOURCE_DIR)")]
    pub source: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Artifact root (overrides DATAFORGE_OUTPUT_DIR)")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "FILE",
        help = "Fallback category mapping (overrides DATAFORGE_MAPPING_FILE)"
    )]
    pub mapping: Option<PathBuf>,

    #[arg(
        long,
        value_name = "URL",
        help = "Semantic-search service (overrides DATAFORGE_SEARCH_URL)"
    )]
    pub search_url: Option<String>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Summary output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// Apply command-line overrides on top of an environment-derived config
    pub fn apply_to(&self, mut config: DataforgeConfig) -> DataforgeConfig {
        if let Some(source) = &self.source {
            // The default mapping lives inside the corpus; follow the new root
            if self.mapping.is_none() && std::env::var("DATAFORGE_MAPPING_FILE").is_err() {
                config.mapping_file = source.join("protocol.py");
            }
            config.source_dir = source.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        if let Some(mapping) = &self.mapping {
            config.mapping_file = mapping.clone();
        }
        if let Some(url) = &self.search_url {
            config.search_url = Some(url.clone()).filter(|u| !u.trim().is_empty());
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.to_lowercase();
        } else if self.verbose {
            config.log_level = "debug".to_string();
        } else if self.quiet {
            config.log_level = "error".to_string();
        }
        config
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
