use clap::Parser;
use std::process::ExitCode;

use order_board::cli::{Cli, Commands};
use order_board::commands::{ReplayOptions, cmd_page, cmd_replay, load_config};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Page => cmd_page(config),
        Commands::Replay { script, json, html } => {
            cmd_replay(config, ReplayOptions { script, json, html })
        }
    });

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
