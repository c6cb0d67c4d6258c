use super::commands::CliArgs;
use super::output::{OutputFormat, OutputFormatter};
use crate::config::DataforgeConfig;
use crate::fs::RealFileSystem;
use crate::pipeline::PipelineOrchestrator;
use crate::search::select_search_backend;
use std::sync::Arc;
use tracing::{debug, error};

/// Run the selected phases over `config` and print the summary to stdout.
///
/// Returns the process exit code: 1 when the configuration is invalid or
/// when every selected phase failed, 0 otherwise.
pub fn handle_run(args: &CliArgs, config: DataforgeConfig) -> i32 {
    if let Err(e) = config.validate() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        return 1;
    }
    debug!("{}", config);

    let search = select_search_backend(&config);
    let orchestrator = PipelineOrchestrator::new(Arc::new(RealFileSystem::new()), config, search);
    let summary = orchestrator.run(&args.phases);

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format(&summary) {
        Ok(text) => {
            if !args.quiet || summary.failed() > 0 {
                println!("{}", text);
            }
        }
        Err(e) => {
            error!("Failed to format run summary: {:#}", e);
            return 1;
        }
    }

    if summary.all_failed() {
        error!("No phase produced output");
        1
    } else {
        0
    }
}
