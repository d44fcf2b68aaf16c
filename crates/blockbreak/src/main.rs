//! Block Break - chunked block sandbox

use std::path::PathBuf;

use blockbreak::{App, GameConfig};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding world saves
    #[arg(long)]
    worlds_dir: Option<PathBuf>,

    /// Directory with block textures and character_animation/
    #[arg(long)]
    assets_dir: Option<PathBuf>,

    /// Seed for newly generated worlds
    #[arg(long)]
    seed: Option<u64>,

    /// Open (or create) this world directly, skipping the selection screen
    #[arg(long)]
    world: Option<String>,

    /// Print the effective configuration as RON and exit
    #[arg(long)]
    print_config: bool,
}

impl Args {
    /// Command-line values win over every config layer
    fn apply(&self, config: &mut GameConfig) {
        if let Some(dir) = &self.worlds_dir {
            config.world.worlds_dir = dir.clone();
        }
        if let Some(dir) = &self.assets_dir {
            config.ui.assets_dir = dir.clone();
        }
        if let Some(seed) = self.seed {
            config.world.seed = Some(seed);
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = GameConfig::load()?;
    args.apply(&mut config);

    if args.print_config {
        println!("{}", config.to_ron()?);
        return Ok(());
    }

    log::info!("Starting Block Break");

    pollster::block_on(run(config, args.world))
}

async fn run(config: GameConfig, world: Option<String>) -> anyhow::Result<()> {
    let (app, event_loop) = App::new(config, world).await?;
    App::run(event_loop, app)
}
