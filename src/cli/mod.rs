pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pyq-harvester")]
#[command(about = "Collects previous-year board exam question papers", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/pyq-harvester/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Scrape all boards, compute statistics and print a summary
    Run,
    /// Scrape boards without computing statistics
    Scrape {
        /// Only scrape this board (CBSE, ICSE or WB)
        #[arg(short, long)]
        board: Option<String>,
    },
    /// Recompute statistics from stored metadata
    Analyze,
    /// List configured sources
    Sources,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["pyq-harvester"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_scrape_with_board_and_config() {
        let cli = Cli::try_parse_from(["pyq-harvester", "scrape", "--board", "WB", "-c", "x.toml"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Scrape {
                board: Some("WB".into())
            })
        );
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }
}
