//! Tilestate command line entry point.
//!
//! Loads a tileset descriptor into the tile engine and reports on it:
//!
//! - a summary of declared, destructible, collectable and animated types
//! - `--inspect ID` prints the resolved definition of a tile type
//! - `--frames-at MS` prints the frame every animated type shows at `MS`
//! - `--ticks N` runs the tick schedule `N` times and prints the published
//!   frames
//!
//! Configuration comes from `config.ini` (see
//! [`EngineConfig`](tilestate::resources::engineconfig::EngineConfig));
//! command line flags override it.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --inspect 98 --frames-at 250
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use tilestate::components::tileattributes::{CasePolicy, TileTypeId};
use tilestate::engine;
use tilestate::error::TileError;
use tilestate::resources::engineconfig::EngineConfig;
use tilestate::resources::renderframes::RenderFrames;
use tilestate::resources::tiledefinitions::{TileDefinition, TileDefinitionTable};
use tilestate::resources::tileinstances::TileInstanceStore;
use tilestate::resources::tilesetdescriptor::TilesetDescriptor;
use tilestate::systems::resolver::TileResolver;
use tilestate::systems::time::advance_sim_clock;

/// Tile attribute and state engine
#[derive(Parser)]
#[command(version, about = "Load a tileset descriptor and inspect tile attributes and animations")]
struct Cli {
    /// Configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Tileset descriptor, overrides the configured one.
    #[arg(long, value_name = "PATH")]
    descriptor: Option<PathBuf>,

    /// Reject declared values that only match after case normalization.
    #[arg(long)]
    strict_case: bool,

    /// Print the resolved definition of a tile type. Repeatable.
    #[arg(long, value_name = "ID")]
    inspect: Vec<TileTypeId>,

    /// Print the current frame of every animated type at this elapsed time.
    #[arg(long, value_name = "MS")]
    frames_at: Option<u64>,

    /// Run the tick schedule this many times and print the published frames.
    #[arg(long, value_name = "N")]
    ticks: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = EngineConfig::with_path(&cli.config);
    if let Err(err) = config.load_from_file() {
        warn!("{}; using defaults", err);
    }
    if let Some(descriptor) = &cli.descriptor {
        config.descriptor_path = descriptor.clone();
    }
    if cli.strict_case {
        config.case_policy = CasePolicy::Strict;
    }

    let table = match TilesetDescriptor::load_from_file(&config.descriptor_path)
        .and_then(|descriptor| descriptor.build_table(config.case_policy))
    {
        Ok(table) => table,
        Err(err) => {
            error!(
                "Failed to load tileset {:?}: {}",
                config.descriptor_path, err
            );
            return ExitCode::FAILURE;
        }
    };

    print_summary(&table);

    for tile in &cli.inspect {
        if let Err(err) = print_definition(&table, *tile) {
            error!("{}", err);
            return ExitCode::FAILURE;
        }
    }

    if let Some(elapsed_ms) = cli.frames_at {
        let instances = TileInstanceStore::new();
        let resolver = TileResolver::new(&table, &instances, elapsed_ms);
        println!("frames at {} ms:", elapsed_ms);
        for (tile, _) in table.animated() {
            if let Ok(frame) = resolver.render_frame(tile) {
                println!("  {:>5} -> {}", tile, frame);
            }
        }
    }

    if let Some(ticks) = cli.ticks {
        run_ticks(table, &config, ticks);
    }

    ExitCode::SUCCESS
}

fn print_summary(table: &TileDefinitionTable) {
    let declared: Vec<_> = table.iter_declared().collect();
    let count = |pred: fn(&TileDefinition) -> bool| {
        declared.iter().filter(|(_, def)| pred(def)).count()
    };
    println!("tile types:   {}", table.tile_count());
    println!("declared:     {}", declared.len());
    println!("destructible: {}", count(|def| def.is_destructible()));
    println!("collectable:  {}", count(|def| def.is_collectable()));
    println!("damaging:     {}", count(|def| def.damage() > 0.0));
    println!("animated:     {}", table.animated().count());
}

fn print_definition(
    table: &TileDefinitionTable,
    tile: TileTypeId,
) -> Result<(), TileError> {
    let definition = table.lookup(tile)?;
    println!("tile {}:", tile);
    if let Some(tier) = definition.breakability {
        match tier.hit_threshold() {
            Some(hits) => println!("  breakability:    {} (breaks after {} hits)", tier, hits),
            None => println!("  breakability:    {} (never breaks)", tier),
        }
    }
    println!(
        "  collision layer: {}",
        definition.collision_layer.unwrap_or_default()
    );
    if let Some(kind) = definition.collectable {
        println!("  collectable:     {}", kind);
    }
    println!("  contact damage:  {}", definition.damage());
    if let Some(clip) = &definition.animation {
        let frames: Vec<String> = clip
            .frames()
            .iter()
            .map(|frame| format!("{}@{}ms", frame.tile, frame.duration_ms))
            .collect();
        println!(
            "  animation:       {} ({} ms loop)",
            frames.join(" "),
            clip.total_duration_ms()
        );
    }
    Ok(())
}

fn run_ticks(table: TileDefinitionTable, config: &EngineConfig, ticks: u64) {
    let mut world = World::new();
    engine::install(&mut world, table, config);
    let mut schedule = engine::tick_schedule();

    for _ in 0..ticks {
        advance_sim_clock(&mut world, 1);
        schedule.run(&mut world);
    }

    let frames = world.resource::<RenderFrames>();
    info!("Ran {} ticks ({} ms)", ticks, frames.elapsed_ms);
    let mut published: Vec<_> = frames.frames.iter().collect();
    published.sort_unstable();
    println!("frames after {} ticks ({} ms):", ticks, frames.elapsed_ms);
    for (tile, frame) in published {
        println!("  {:>5} -> {}", tile, frame);
    }
    println!(
        "instance entries: {}",
        world.resource::<TileInstanceStore>().len()
    );
}
