use std::rc::Rc;

use anyhow::anyhow;
use clap::Parser;
use dragboard::cli::{Cli, Sub};
use dragboard::layout::Options;
use dragboard::replay::{self, BoardSetup};
use dragboard_config::Config;
use glam::DVec2;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "dragboard=debug";

fn main() -> anyhow::Result<()> {
    let directives = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).map_err(|err| anyhow!("{err:?}"))?,
        None => Config::default(),
    };

    match cli.subcommand {
        Sub::Validate => {
            info!("config is valid");
        }
        Sub::Replay {
            trace,
            columns,
            items,
            width,
            height,
            scale,
        } => {
            let steps = replay::load_trace(&trace)?;
            let setup = BoardSetup {
                columns,
                items_per_column: items,
                view_size: DVec2::new(width, height),
                scale,
            };

            let outcome = replay::replay(&setup, Rc::new(Options::from_config(&config)), steps)?;
            for event in &outcome.events {
                println!("{}", serde_json::to_string(event)?);
            }
            println!("{}", serde_json::to_string(&outcome)?);
        }
    }

    Ok(())
}
