use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "order-board")]
#[command(about = "Kanban-style order board")]
#[command(version)]
pub struct Cli {
    /// Board configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the initial page markup
    Page,

    /// Replay a scripted session and print the resulting board
    Replay {
        /// Script file (YAML or JSON)
        script: PathBuf,

        /// Output step results and the board as JSON
        #[arg(long)]
        json: bool,

        /// Print the final page markup instead of the column summary
        #[arg(long, conflicts_with = "json")]
        html: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_replay_with_global_config() {
        let cli = Cli::parse_from([
            "order-board",
            "replay",
            "session.yaml",
            "--config",
            "board.yaml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("board.yaml")));
        match cli.command {
            Commands::Replay { script, json, html } => {
                assert_eq!(script, PathBuf::from("session.yaml"));
                assert!(!json);
                assert!(!html);
            }
            Commands::Page => panic!("expected replay"),
        }
    }

    #[test]
    fn test_json_and_html_conflict() {
        let result = Cli::try_parse_from(["order-board", "replay", "s.yaml", "--json", "--html"]);
        assert!(result.is_err());
    }
}
