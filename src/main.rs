//! Soroban Sim entry point
//!
//! Headless driver: replays recorded move scripts or soaks the simulation
//! with seeded random drags.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use soroban_sim::LayoutSize;
use soroban_sim::script::{Script, random_script};
use soroban_sim::sim::Abacus;

#[derive(Parser, Debug)]
#[command(name = "soroban-sim", version, about = "Headless soroban bead simulation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON move script and print the resulting digits
    Replay {
        /// Script file
        path: PathBuf,
        /// Print the digits after every tick that changed a rod
        #[arg(long)]
        each_tick: bool,
    },
    /// Run seeded random drags and check stacking invariants after every tick
    Soak {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        #[arg(long, default_value_t = 10_000)]
        ticks: usize,
        /// small, medium, large or big
        #[arg(long, default_value = "medium", value_parser = parse_size)]
        size: LayoutSize,
        /// Visible rods
        #[arg(long, default_value_t = 13)]
        rods: usize,
        /// Write the generated script to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn parse_size(s: &str) -> Result<LayoutSize, String> {
    LayoutSize::from_str(&s.to_lowercase()).ok_or_else(|| format!("unknown size '{s}'"))
}

/// Digits left to right, `-` for an indeterminate rod
fn render_digits(abacus: &Abacus) -> String {
    abacus
        .digits()
        .values()
        .rev()
        .map(|digit| match digit {
            Some(d) => d.to_string(),
            None => "-".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn replay(path: PathBuf, each_tick: bool) -> Result<()> {
    let script = Script::load(&path)?;
    log::info!(
        "Replaying {} ticks on {} {} rods",
        script.ticks.len(),
        script.rods,
        script.size.as_str()
    );
    let mut abacus = script.abacus();
    for (tick, batch) in script.ticks.iter().enumerate() {
        let changed = abacus.tick(batch);
        if each_tick && !changed.is_empty() {
            println!("{tick:>6}: {}", render_digits(&abacus));
        }
    }
    println!("{}", render_digits(&abacus));
    match abacus.value() {
        Some(value) => println!("value: {value}"),
        None => println!("value: indeterminate"),
    }
    Ok(())
}

fn soak(seed: u64, ticks: usize, size: LayoutSize, rods: usize, save: Option<PathBuf>) -> Result<()> {
    let script = random_script(seed, ticks, size, rods);
    if let Some(path) = save {
        std::fs::write(&path, script.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("Script saved to {}", path.display());
    }
    let abacus = script
        .run_checked()
        .with_context(|| format!("soak failed (seed {seed})"))?;
    log::info!("Soak passed: {} ticks, seed {}", abacus.ticks(), seed);
    println!("{}", render_digits(&abacus));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Replay { path, each_tick } => replay(path, each_tick),
        Command::Soak {
            seed,
            ticks,
            size,
            rods,
            save,
        } => soak(seed, ticks, size, rods, save),
    }
}
