use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(subcommand_value_name = "SUBCOMMAND")]
#[command(subcommand_help_heading = "Subcommands")]
pub struct Cli {
    /// Path to config file (default: built-in defaults).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Sub,
}

#[derive(Subcommand)]
pub enum Sub {
    /// Validate the config file.
    Validate,
    /// Replay a recorded pointer trace against a demo board.
    Replay {
        /// JSON file with the trace steps.
        trace: PathBuf,
        /// Number of columns on the demo board.
        #[arg(long, default_value_t = 3)]
        columns: usize,
        /// Number of items in every column.
        #[arg(long, default_value_t = 5)]
        items: usize,
        /// Width of the board view in logical pixels.
        #[arg(long, default_value_t = 400.)]
        width: f64,
        /// Height of the board view in logical pixels.
        #[arg(long, default_value_t = 800.)]
        height: f64,
        /// Scale factor of the output the board is shown on.
        #[arg(long, default_value_t = 1.)]
        scale: f64,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dragboard",
            "replay",
            "trace.json",
            "--columns",
            "4",
            "-c",
            "board.kdl",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("board.kdl")));
        match cli.subcommand {
            Sub::Replay {
                trace,
                columns,
                items,
                ..
            } => {
                assert_eq!(trace, PathBuf::from("trace.json"));
                assert_eq!(columns, 4);
                assert_eq!(items, 5);
            }
            Sub::Validate => panic!("expected replay"),
        }
    }
}
