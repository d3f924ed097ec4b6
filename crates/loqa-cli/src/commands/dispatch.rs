use loqa_config::LoqaConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: &Commands, config: &LoqaConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Scan(args) => commands::scan::handle(args, config, flags),
        Commands::Fix(args) => commands::fix::handle(args, config, flags),
        Commands::Verify(args) => commands::verify::handle(args, config, flags),
        Commands::Restore(args) => commands::restore::handle(args, config, flags),
        Commands::Config => commands::config::handle(config),
    }
}
