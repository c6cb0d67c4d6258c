use dataforge::cli::{handle_run, CliArgs};
use dataforge::config::DataforgeConfig;
use dataforge::util::logging::{init_logging, LoggingConfig};
use dataforge::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = args.apply_to(DataforgeConfig::default());
    init_logging(LoggingConfig::from_config(&config));

    debug!("dataforge v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_run(&args, config));
}
