//! Gridstead - Entry Point
//!
//! Sets up the simulation from command-line arguments, seeds a small
//! starting world, and runs an interactive loop for advancing ticks,
//! spawning beings, and adjusting role allocations.

use clap::Parser;

use gridstead::core::config::SimulationConfig;
use gridstead::core::error::Result;
use gridstead::core::types::TileCoord;
use gridstead::roles::Role;
use gridstead::simulation::Simulation;
use gridstead::world::objects::{ResourceKind, StructureKind};

use std::io::{self, Write};

/// Seconds of simulated time per tick
const TICK_SECONDS: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "gridstead", about = "Tile-based colony simulation")]
struct Args {
    /// World width in tiles
    #[arg(long, default_value_t = 48)]
    width: i32,

    /// World height in tiles
    #[arg(long, default_value_t = 48)]
    height: i32,

    /// RNG seed for reproducible worlds
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Starting population
    #[arg(long, default_value_t = 6)]
    beings: usize,
}

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("gridstead=debug")
        .init();

    tracing::info!("Gridstead starting...");

    let args = Args::parse();
    let mut sim = Simulation::new(SimulationConfig::default(), args.width, args.height, args.seed)?;

    seed_starting_world(&mut sim)?;
    for _ in 0..args.beings {
        sim.spawn_being()?;
    }

    println!("\n=== GRIDSTEAD ===");
    println!("A tile-based colony of autonomous role-driven beings");
    println!();
    println!("Commands:");
    println!("  tick / t           - Advance simulation by one tick");
    println!("  run <n>            - Run n simulation ticks");
    println!("  spawn              - Spawn a new being");
    println!("  status / s         - Show detailed status");
    println!("  role + <name>      - Allocate one being to a role");
    println!("  role - <name>      - Release one being from a role");
    println!("  snapshot           - Print the render snapshot as JSON");
    println!("  quit / q           - Exit");
    println!();

    loop {
        display_status(&sim);

        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tick" || input == "t" {
            let report = sim.run_tick(TICK_SECONDS);
            println!("Tick {} complete ({} deaths).", sim.current_tick, report.deaths.len());
            continue;
        }

        if input == "status" || input == "s" {
            display_detailed_status(&sim);
            continue;
        }

        if let Some(rest) = input.strip_prefix("run ") {
            if let Ok(n) = rest.parse::<u32>() {
                println!("Running {} ticks...", n);
                for _ in 0..n {
                    sim.run_tick(TICK_SECONDS);
                }
                println!("Completed {} ticks. Now at tick {}.", n, sim.current_tick);
            } else {
                println!("Usage: run <number>");
            }
            continue;
        }

        if input == "spawn" {
            match sim.spawn_being() {
                Ok(id) => println!("Spawned being {:?}", id),
                Err(e) => println!("Could not spawn: {}", e),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("role ") {
            handle_role_command(&mut sim, rest);
            continue;
        }

        if input == "snapshot" {
            match serde_json::to_string_pretty(&sim.snapshot()) {
                Ok(json) => println!("{}", json),
                Err(e) => println!("Snapshot failed: {}", e),
            }
            continue;
        }

        println!("Unknown command. Available: tick, run <n>, spawn, status, role +/- <name>, snapshot, quit");
    }

    println!(
        "\nGoodbye! Final state: {} beings, {} ticks elapsed.",
        sim.colony.population(),
        sim.current_tick
    );
    Ok(())
}

/// A small hand-placed starting layout: some trees and rocks to work,
/// food sources, and one unfinished storehouse for builders.
fn seed_starting_world(sim: &mut Simulation) -> Result<()> {
    let placements = [
        (ResourceKind::Tree, TileCoord::new(8, 8), 20),
        (ResourceKind::Tree, TileCoord::new(9, 12), 20),
        (ResourceKind::Tree, TileCoord::new(14, 9), 20),
        (ResourceKind::Rock, TileCoord::new(30, 30), 15),
        (ResourceKind::Rock, TileCoord::new(33, 28), 15),
        (ResourceKind::BerryBush, TileCoord::new(20, 20), 30),
        (ResourceKind::BerryBush, TileCoord::new(22, 18), 30),
        (ResourceKind::FishingSpot, TileCoord::new(40, 10), 50),
    ];
    for (kind, coord, stock) in placements {
        sim.world.place_resource(kind, coord, stock)?;
    }
    sim.world.place_structure(StructureKind::Storehouse, TileCoord::new(24, 24))?;
    Ok(())
}

fn parse_role(name: &str) -> Option<Role> {
    match name.to_ascii_lowercase().as_str() {
        "builder" => Some(Role::Builder),
        "farmer" => Some(Role::Farmer),
        "fisher" => Some(Role::Fisher),
        "guard" => Some(Role::Guard),
        "lumberjack" => Some(Role::Lumberjack),
        "miner" => Some(Role::Miner),
        _ => None,
    }
}

fn handle_role_command(sim: &mut Simulation, rest: &str) {
    let (op, name) = match rest.split_once(' ') {
        Some(parts) => parts,
        None => {
            println!("Usage: role +/- <name>");
            return;
        }
    };
    let Some(role) = parse_role(name.trim()) else {
        println!("Unknown role: {}", name);
        return;
    };
    let ok = match op {
        "+" => sim.colony.try_increase_allocation(role),
        "-" => sim.colony.try_decrease_allocation(role),
        _ => {
            println!("Usage: role +/- <name>");
            return;
        }
    };
    if ok {
        println!(
            "{:?}: {} beings",
            role,
            sim.colony.count_beings_with_role(role)
        );
    } else {
        println!("Cannot change allocation for {:?}", role);
    }
}

fn display_status(sim: &Simulation) {
    println!(
        "[tick {} | beings {} | idle {}]",
        sim.current_tick,
        sim.colony.population(),
        sim.colony.count_beings_with_role(Role::Idle)
    );
}

fn display_detailed_status(sim: &Simulation) {
    println!("--- Colony ---");
    for role in Role::ALLOCATABLE {
        let count = sim.colony.count_beings_with_role(role);
        if count > 0 {
            println!("  {:?}: {}", role, count);
        }
    }
    println!("  Idle: {}", sim.colony.count_beings_with_role(Role::Idle));
    println!("--- Beings ---");
    for being in sim.colony.beings() {
        println!(
            "  {:?} at ({:.1}, {:.1}) role {:?} hp {:.0} hunger {:.0} carrying {}",
            being.id(),
            being.position.x,
            being.position.y,
            being.role,
            being.health,
            being.hunger,
            being.inventory.total()
        );
    }
    println!("--- World ---");
    println!(
        "  {} resources, {} structures",
        sim.world.resources().len(),
        sim.world.structures().len()
    );
}
