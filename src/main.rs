use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use floorplan::{
    dump, load_from_path, Direction, DumpFormat, FloorPlan, Settings, SettingsLoader, TilePos,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Floor plan loader and adjacency inspector")]
struct Cli {
    /// Path to a YAML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `floorplan=debug` (overrides the settings file)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Summarise every floor of a plan
    Inspect {
        /// Floor plan XML (defaults to `plan` from the settings file)
        plan: Option<PathBuf>,
    },
    /// Show the path codes and resolved neighbors of one tile
    Neighbors {
        plan: Option<PathBuf>,
        #[arg(long, allow_hyphen_values = true)]
        level: i32,
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
    },
    /// Write the loaded plan as XML or as a JSON snapshot
    Dump {
        plan: Option<PathBuf>,
        #[arg(long, value_enum)]
        format: Option<DumpFormat>,
        /// Output file (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => SettingsLoader::new(".").load(path)?,
        None => Settings::default(),
    };

    let filter = cli
        .log_level
        .clone()
        .unwrap_or_else(|| settings.log_level.clone());
    env_logger::Builder::new().parse_filters(&filter).init();

    match cli.command {
        Command::Inspect { plan } => {
            let plan = load(plan, &settings)?;
            inspect(&plan);
        }
        Command::Neighbors { plan, level, x, y } => {
            let plan = load(plan, &settings)?;
            neighbors(&plan, level, TilePos::new(x, y))?;
        }
        Command::Dump {
            plan,
            format,
            output,
        } => {
            let plan = load(plan, &settings)?;
            let format = format.unwrap_or(settings.dump_format);
            match output {
                Some(path) => {
                    dump::save(&plan, &path, format)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("wrote {:?} dump to {}", format, path.display());
                }
                None => println!("{}", dump::render(&plan, format)?),
            }
        }
    }
    Ok(())
}

fn load(plan: Option<PathBuf>, settings: &Settings) -> Result<FloorPlan> {
    let path = plan
        .or_else(|| settings.plan.clone())
        .context("No floor plan given on the command line or in the settings file")?;
    let floor_plan = load_from_path(&path)
        .with_context(|| format!("Failed to load floor plan {}", path.display()))?;
    info!(
        "loaded {} floors from {}",
        floor_plan.len(),
        path.display()
    );
    Ok(floor_plan)
}

fn inspect(plan: &FloorPlan) {
    println!("{} floors, {} tiles", plan.len(), plan.tile_count());
    for floor in plan.floors() {
        let home = floor
            .home_tile()
            .map(|tile| tile.pos().to_string())
            .unwrap_or_else(|| "none".to_string());
        let links: usize = floor
            .tiles()
            .map(|tile| floor.neighbors(tile.pos()).len())
            .sum();
        println!(
            "  level {}: {} tiles, {} links, home {}, dirt {}",
            floor.level(),
            floor.len(),
            links,
            home,
            floor.total_dirt()
        );
    }
}

fn neighbors(plan: &FloorPlan, level: i32, pos: TilePos) -> Result<()> {
    let floor = plan
        .floor(level)
        .with_context(|| format!("Plan has no floor at level {level}"))?;
    let tile = floor
        .tile(pos.x, pos.y)
        .with_context(|| format!("Floor {level} has no tile at {pos}"))?;

    println!(
        "tile {} on level {}: surface {}, dirt {}{}",
        pos,
        level,
        tile.surface(),
        tile.dirt(),
        if tile.is_charger() { ", charger" } else { "" }
    );
    for direction in Direction::ALL {
        let code = tile.path(direction);
        let target = floor
            .neighbor(pos, direction)
            .map(|neighbor| neighbor.pos().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<5} code {} -> {}", direction.to_string(), code.value(), target);
    }
    Ok(())
}
