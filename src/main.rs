//! Hunter Loot - Entry Point
//!
//! Command line front end for rolling and inspecting items.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use hunter_loot::data::DataManager;
use hunter_loot::items::loot::{generate_boss_gold_drop, generate_boss_loot, generate_enemy_loot, generate_gold_drop};
use hunter_loot::items::{roll_rarity, AffixSlot, ItemInstance, Rarity};

#[derive(Parser)]
#[command(name = "hunter-loot", version, about = "Roll and inspect Project Hunter loot")]
struct Cli {
    /// Directory holding affixes.ron, bases.ron and generator.ron
    #[arg(long, global = true, default_value = "assets/data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Roll one or more items from a base
    Roll {
        /// Base item id (see `bases`)
        #[arg(long)]
        base: String,

        /// Item level to roll at
        #[arg(long, default_value_t = 1)]
        level: u32,

        /// Rarity grade (F, E, D, C, B, A, S, SS); rolled from the level when omitted
        #[arg(long)]
        rarity: Option<Rarity>,

        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Number of items to roll
        #[arg(long, default_value_t = 1)]
        count: usize,

        /// Identify items before printing
        #[arg(long)]
        identify: bool,

        /// Print items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Simulate the loot from a kill
    Drop {
        /// Character level
        #[arg(long, default_value_t = 1)]
        level: u32,

        /// Roll boss loot
        #[arg(long)]
        boss: bool,

        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,

        /// Number of kills to simulate
        #[arg(long, default_value_t = 1)]
        kills: usize,
    },

    /// List base items
    Bases,

    /// List affix templates
    Affixes {
        /// Only corrupted templates
        #[arg(long)]
        corrupted: bool,
    },

    /// Write the loaded data as RON files
    Export {
        /// Output directory
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Starting hunter-loot v{}", env!("CARGO_PKG_VERSION"));

    let data = DataManager::load(&cli.data);

    match cli.command {
        Command::Roll {
            base,
            level,
            rarity,
            seed,
            count,
            identify,
            json,
        } => {
            let generator = data.affix_generator().context("invalid loot data")?;
            let base = data
                .bases
                .find(&base)
                .with_context(|| format!("unknown base item '{}'", base))?;

            let seed = seed.unwrap_or_else(rand::random);
            log::info!("Rolling {} x{} at ilvl {} with seed {}", base.id, count, level, seed);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                let rarity = rarity.unwrap_or_else(|| roll_rarity(level, &mut rng));
                let mut item = generator.roll_item(base, level, rarity, &mut rng)?;
                if identify {
                    item.identify();
                }
                items.push(item);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                items.iter().for_each(print_item);
            }
        }
        Command::Drop { level, boss, seed, kills } => {
            let generator = data.affix_generator().context("invalid loot data")?;
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = StdRng::seed_from_u64(seed);

            let mut gold = 0;
            let mut items = Vec::new();
            for _ in 0..kills {
                if boss {
                    gold = generate_boss_gold_drop(level, &mut rng).saturating_add(gold);
                    items.extend(generate_boss_loot(&generator, &data.bases, level, &mut rng)?);
                } else {
                    gold = generate_gold_drop(level, &mut rng).saturating_add(gold);
                    items.extend(generate_enemy_loot(&generator, &data.bases, level, &mut rng)?);
                }
            }

            log::info!("{} kills at level {} dropped {} items (seed {})", kills, level, items.len(), seed);
            items.iter().for_each(print_item);
            println!("Gold: {}", gold);
        }
        Command::Bases => {
            for base in &data.bases.bases {
                println!(
                    "{:<16} {:<16} {:<8} req {:>3}  {:>4}g",
                    base.id,
                    base.name,
                    base.subtype.name(),
                    base.required_level,
                    base.base_value
                );
            }
        }
        Command::Affixes { corrupted } => {
            for affix in data.affixes.affixes.iter().filter(|a| !corrupted || a.corrupted) {
                let slot = match affix.slot {
                    AffixSlot::Prefix => "prefix",
                    AffixSlot::Suffix => "suffix",
                    AffixSlot::Implicit => "implicit",
                    AffixSlot::Crafted => "crafted",
                };
                println!(
                    "{:<18} {:<6} {:<28} {:>4}..={:<4} w{:<5} ilvl {}+{}",
                    affix.id,
                    slot,
                    affix.stat,
                    affix.min,
                    affix.max,
                    affix.weight,
                    affix.min_level,
                    if affix.corrupted { "  (corrupted)" } else { "" }
                );
            }
        }
        Command::Export { dir } => {
            data.export(&dir)
                .with_context(|| format!("failed to export data to {}", dir.display()))?;
            println!("Wrote loot data to {}", dir.display());
        }
    }

    Ok(())
}

fn print_item(item: &ItemInstance) {
    for line in item.tooltip_lines() {
        println!("{}", line);
    }
    println!("Value: {} gold", item.value());
    println!();
}
