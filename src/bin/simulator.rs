//! Luckbox Headless Balance Simulator
//!
//! Runs seeded offer rounds and PRD trial batches without any game attached,
//! collecting the distribution metrics a designer needs to sanity-check
//! tuning: rarity mix, tag drift, pity peaks, trigger rate, and worst miss
//! streaks vs. a flat Bernoulli baseline.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --rounds N      Offer rounds to simulate (default: 1000)
//!   --offers N      Options per offer (default: 3)
//!   --trials N      PRD trials (default: 100000)
//!   --prob P        PRD target probability (default: 0.1)
//!   --seed N        RNG seed (default: 42)
//!   --quiet         Only summary lines

use luckbox::{DynamicWeightEngine, PerkOption, PrdEngine, Rarity};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

// ── CLI Configuration ────────────────────────────────────────────────

struct SimConfig {
    rounds: u64,
    offers: usize,
    trials: u64,
    prob: f64,
    seed: u64,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rounds: 1_000,
            offers: 3,
            trials: 100_000,
            prob: 0.1,
            seed: 42,
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rounds" => {
                i += 1;
                config.rounds = args[i].parse().expect("--rounds requires a number");
            }
            "--offers" => {
                i += 1;
                config.offers = args[i].parse().expect("--offers requires a number");
            }
            "--trials" => {
                i += 1;
                config.trials = args[i].parse().expect("--trials requires a number");
            }
            "--prob" => {
                i += 1;
                config.prob = args[i].parse().expect("--prob requires a probability");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("--seed requires a number");
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }
    config
}

fn print_usage() {
    eprintln!(
        "Luckbox Headless Balance Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --rounds N      Offer rounds to simulate (default: 1000)\n\
         \x20 --offers N      Options per offer (default: 3)\n\
         \x20 --trials N      PRD trials (default: 100000)\n\
         \x20 --prob P        PRD target probability (default: 0.1)\n\
         \x20 --seed N        RNG seed (default: 42)\n\
         \x20 --quiet         Only summary lines\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Demo candidate pool ──────────────────────────────────────────────

fn demo_pool() -> Vec<PerkOption> {
    vec![
        PerkOption::new("sharp_blade", Rarity::Common, &["damage", "melee"]),
        PerkOption::new("thick_hide", Rarity::Common, &["defense"]),
        PerkOption::new("fleet_foot", Rarity::Common, &["mobility"]),
        PerkOption::new("hunter_eye", Rarity::Common, &["ranged"]),
        PerkOption::new("keen_mind", Rarity::Common, &["utility"]),
        PerkOption::new("flame_edge", Rarity::Rare, &["damage", "fire"]),
        PerkOption::new("frost_ward", Rarity::Rare, &["defense", "ice"]),
        PerkOption::new("wind_step", Rarity::Rare, &["mobility", "lightning"]),
        PerkOption::new("stone_skin", Rarity::Epic, &["defense"]),
        PerkOption::new("storm_call", Rarity::Epic, &["damage", "lightning"]),
        PerkOption::new("phoenix_heart", Rarity::Legendary, &["fire", "revive"]),
        PerkOption::new("void_walker", Rarity::Legendary, &["mobility", "void"]),
    ]
}

// ── Offer-round simulation ───────────────────────────────────────────

fn run_offer_rounds(config: &SimConfig) {
    let pool = demo_pool();
    let mut engine = DynamicWeightEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut offered_by_rarity: HashMap<Rarity, u64> = HashMap::new();
    let mut picked_by_rarity: HashMap<Rarity, u64> = HashMap::new();
    let mut pity_peaks: HashMap<Rarity, u32> = HashMap::new();

    for _ in 0..config.rounds {
        let offer = engine.generate_weighted_options(&pool, config.offers, &mut rng);
        if offer.is_empty() {
            continue;
        }
        for option in &offer {
            *offered_by_rarity.entry(option.rarity).or_insert(0) += 1;
        }

        // Player model: pick uniformly among the offered options
        let pick = &offer[rng.gen_range(0..offer.len())];
        *picked_by_rarity.entry(pick.rarity).or_insert(0) += 1;
        engine.record_selection(pick);

        for rarity in Rarity::all() {
            let miss = engine.pity().miss_count(rarity);
            let peak = pity_peaks.entry(rarity).or_insert(0);
            *peak = (*peak).max(miss);
        }
    }

    let stats = engine.stats();
    println!("── Offer rounds ({} rounds, {} offers each) ──", config.rounds, config.offers);
    let total_offered: u64 = offered_by_rarity.values().sum();
    for rarity in Rarity::all() {
        let offered = offered_by_rarity.get(&rarity).copied().unwrap_or(0);
        let picked = picked_by_rarity.get(&rarity).copied().unwrap_or(0);
        let peak = pity_peaks.get(&rarity).copied().unwrap_or(0);
        println!(
            "  {:<10} offered {:>6} ({:>5.2}%)  picked {:>5}  pity peak {:>3}",
            rarity.name(),
            offered,
            100.0 * offered as f64 / total_offered as f64,
            picked,
            peak
        );
    }

    if !config.quiet {
        println!("  tag histogram:");
        let mut tags: Vec<(&String, &u32)> = stats.tag_selection_counts.iter().collect();
        tags.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (tag, count) in tags {
            println!("    {tag:<12} {count:>5}");
        }
        println!(
            "  most selected tag: {}, least: {}",
            stats.most_selected_tag.as_deref().unwrap_or("-"),
            stats.least_selected_tag.as_deref().unwrap_or("-")
        );
    }
}

// ── PRD trial batch ──────────────────────────────────────────────────

fn run_prd_trials(config: &SimConfig) {
    let mut engine = PrdEngine::new();
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let mut triggers = 0u64;
    let mut streak = 0u32;
    let mut max_streak = 0u32;
    for _ in 0..config.trials {
        if engine.try_trigger("sim", config.prob, &mut rng) {
            triggers += 1;
            streak = 0;
        } else {
            streak += 1;
            max_streak = max_streak.max(streak);
        }
    }

    // Flat Bernoulli baseline on a fresh stream for comparison
    let mut naive_rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(1));
    let mut naive_streak = 0u32;
    let mut naive_max_streak = 0u32;
    for _ in 0..config.trials {
        if naive_rng.gen::<f64>() <= config.prob {
            naive_streak = 0;
        } else {
            naive_streak += 1;
            naive_max_streak = naive_max_streak.max(naive_streak);
        }
    }

    let rate = triggers as f64 / config.trials as f64;
    println!("── PRD trials ({} trials at p = {}) ──", config.trials, config.prob);
    println!("  observed rate   {rate:.4}");
    println!("  max miss streak {max_streak} (flat Bernoulli baseline: {naive_max_streak})");
}

fn main() {
    env_logger::init();
    let config = parse_args();
    run_offer_rounds(&config);
    run_prd_trials(&config);
}
