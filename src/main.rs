//! mediasync command-line entry point

mod commands;

use anyhow::Result;
use clap::Parser;

use mediasync::cli::{Cli, Commands, ConfigCommands};
use mediasync::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_override = cli.config.as_deref();

    // Config commands resolve the file themselves; path and migrate work on a broken file
    if let Commands::Config(command) = &cli.command {
        logging::init(cli.verbose, &Default::default());
        return match command {
            ConfigCommands::Show => commands::config::handle_show(config_override),
            ConfigCommands::Path => commands::config::handle_path(config_override),
            ConfigCommands::Migrate { yes } => {
                commands::config::handle_migrate(config_override, *yes)
            }
        };
    }

    let config = commands::load_config(config_override)?;
    logging::init(cli.verbose, &config.logging);

    match &cli.command {
        Commands::Replay(args) => commands::replay::handle(args, &config),
        Commands::Check { files } => commands::check::handle(files, &config.sync),
        Commands::Completions { shell } => {
            commands::completions::handle(*shell);
            Ok(())
        }
        Commands::Config(_) => Ok(()),
    }
}
