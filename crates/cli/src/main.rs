mod report;

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use crewgen_core::{
    catalog::{load_modifiers, MissionCatalog, MissionSetDiscovery},
    config::{self, AppConfig},
    generator::{rng_from_seed, GenerationRequest, MissionGenerator},
    GeneratorError, PlayerCount, SelectionStrategy,
};
use tracing::warn;
use tracing_subscriber::{prelude::*, EnvFilter};

#[derive(Copy, Clone, ValueEnum)]
enum Strategy {
    /// Draw cards one by one from a shuffled deck
    DeckDraw,
    /// Single greedy pass over a shuffled list
    Legacy,
}

impl From<Strategy> for SelectionStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::DeckDraw => SelectionStrategy::DeckDraw,
            Strategy::Legacy => SelectionStrategy::LegacyGreedy,
        }
    }
}

#[derive(Parser)]
#[command(name = "crewgen")]
#[command(version)]
#[command(about = "Draw a set of missions whose difficulty adds up to a target")]
struct Cli {
    /// Number of players (3, 4 or 5)
    #[arg(short, long, required_unless_present = "list_sets", value_parser = clap::value_parser!(u8).range(3..=5))]
    players: Option<u8>,

    /// Target total difficulty, including modifiers
    #[arg(short, long, required_unless_present = "list_sets", allow_negative_numbers = true)]
    difficulty: Option<i32>,

    /// Mission set to draw from, "all", or a path to a mission .json file
    #[arg(short, long, visible_alias = "file")]
    missions: Option<String>,

    /// Selection strategy
    #[arg(short, long, value_enum, default_value_t = Strategy::DeckDraw)]
    strategy: Strategy,

    /// Number of modifier cards to draw
    #[arg(long = "modifiers", default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=3))]
    modifier_count: u8,

    /// Attempt budget, overriding the configured value for the strategy
    #[arg(long)]
    attempts: Option<u32>,

    /// RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// List the available mission sets and exit
    #[arg(long)]
    list_sets: bool,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            config::ensure_default_config()?;
            AppConfig::load()?
        }
    };
    init_logging(cli.verbose, config.log_dir.as_deref())?;

    if cli.list_sets {
        let sets = MissionSetDiscovery::discover(&config.missions_dir)?;
        report::print_mission_sets(&config.missions_dir, &sets);
        return Ok(ExitCode::SUCCESS);
    }

    let (Some(players), Some(difficulty)) = (cli.players, cli.difficulty) else {
        anyhow::bail!("--players and --difficulty are required");
    };
    let players = PlayerCount::try_from(players)?;

    let set_name = cli
        .missions
        .clone()
        .unwrap_or_else(|| config.default_mission_set.clone());
    let sets = MissionSetDiscovery::resolve(&config.missions_dir, &set_name)?;
    let catalog = MissionCatalog::load(&sets)?;

    let modifiers = match load_modifiers(&config.modifiers_file)? {
        Some(modifiers) => modifiers,
        None => {
            warn!(
                "modifier file {} not found, continuing without modifiers",
                config.modifiers_file.display()
            );
            if cli.modifier_count > 0 {
                report::print_warning(&format!(
                    "Modifier file {} not found; drawing no modifiers.",
                    config.modifiers_file.display()
                ));
            }
            Vec::new()
        }
    };

    let strategy = SelectionStrategy::from(cli.strategy);
    let request = GenerationRequest::new(players, difficulty)
        .with_strategy(strategy)
        .with_modifiers(usize::from(cli.modifier_count))
        .with_max_attempts(
            cli.attempts
                .unwrap_or_else(|| config.attempts_for(strategy)),
        );

    let mut rng = rng_from_seed(cli.seed);
    let generator = MissionGenerator::new(catalog.missions(), &modifiers);
    match generator.generate(&request, &mut rng) {
        Ok(generation) => {
            report::print_generation(&generation, catalog.sets());
            Ok(ExitCode::SUCCESS)
        }
        Err(err @ GeneratorError::NonPositiveTarget { .. }) => {
            report::print_configuration_error(&err);
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err.into()),
    }
}

fn init_logging(verbose: bool, log_dir: Option<&Path>) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let log_path = dir.join("crewgen.log");
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_ansi(false)
                    .compact()
                    .with_writer(std::sync::Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
