use clap::Parser;
use std::process;

use reeltrack::cli::{self, Cli, Commands};
use reeltrack::config::Config;
use reeltrack::db::connection;
use reeltrack::logging;

fn main() {
    let cli_args = Cli::parse();
    let json_output = cli_args.json;

    let log_filter = connection::config_path()
        .ok()
        .and_then(|path| Config::load(&path).ok())
        .unwrap_or_default()
        .log_filter;
    if let Err(e) = logging::init(&log_filter) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let exit_code = match cli_args.command {
        Commands::Init { empty } => cli::init::run(empty, json_output),
        Commands::Project(cmd) => cli::project::run(cmd, json_output),
        Commands::Step(cmd) => cli::step::run(cmd, json_output),
        Commands::Template(cmd) => cli::template::run(cmd, json_output),
        Commands::Team(cmd) => cli::team::run(cmd, json_output),
        Commands::Status => cli::status::run(json_output),
    };

    process::exit(exit_code);
}
