//! Train command - self-play round robin between weighted players

use std::{fs::File, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;
use tracing::info;

use super::{PolicyKind, build_player, load_store, lock, save_store};
use crate::{
    cli::output::{format_number, print_kv, print_section, print_standings},
    config::ExperimentConfig,
    pipeline::{LoggingObserver, ProgressObserver, Standings, Tournament},
    ports::{Observer, Policy},
    store::SharedStore,
};

#[derive(Parser, Debug)]
#[command(about = "Train weighted players through round-robin self-play")]
pub struct TrainArgs {
    /// Experiment configuration file (JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Training rounds per ordered pair of players
    #[arg(long, short = 'r')]
    pub rounds: Option<usize>,

    /// Evaluation rounds with learning switched off
    #[arg(long)]
    pub eval_rounds: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Resume from a saved store (`.json` or MessagePack)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Where to save the first player's trained store
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Skip successors symmetric to one already scored
    #[arg(long)]
    pub dedupe: bool,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Log progress instead of drawing a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummary {
    training_rounds: usize,
    evaluation_rounds: usize,
    seed: Option<u64>,
    training: Standings,
    evaluation: Standings,
    states_learned: usize,
}

const FIRST: &str = "player1";
const SECOND: &str = "player2";
const BASELINE: &str = "random";

pub fn execute(args: TrainArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ExperimentConfig::default(),
    };
    if let Some(rounds) = args.rounds {
        config.training_rounds = rounds;
    }
    if let Some(rounds) = args.eval_rounds {
        config.evaluation_rounds = rounds;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.dedupe {
        config.policy.dedupe_successors = true;
    }

    let base = match &args.store {
        Some(path) => load_store(path)?,
        None => config.store.build(),
    };
    info!(states = base.len(), "starting from store");

    // Each weighted player learns into its own table.
    let first_store = base.clone().shared();
    let second_store = base.shared();

    print_section("Training");
    print_kv("Rounds", &format_number(config.training_rounds));
    print_kv("Seed", &format!("{:?}", config.seed));
    let learning = config.policy.clone().with_learning(true);
    let mut players = build_players(&first_store, &second_store, &learning)?;
    let training = tournament(config.training_rounds, config.seed, args.no_progress)
        .run(&mut players)
        .context("training tournament failed")?;
    print_standings(&training);

    print_section("Evaluation");
    print_kv("Rounds", &format_number(config.evaluation_rounds));
    let frozen = config.policy.clone().with_learning(false);
    let mut players = build_players(&first_store, &second_store, &frozen)?;
    let evaluation = tournament(
        config.evaluation_rounds,
        config.seed.map(|seed| seed.wrapping_add(1_000)),
        args.no_progress,
    )
    .run(&mut players)
    .context("evaluation tournament failed")?;
    print_standings(&evaluation);

    let states_learned = lock(&first_store)?.len();
    print_kv("States learned", &format_number(states_learned));

    if let Some(path) = &args.output {
        save_store(&*lock(&first_store)?, path)?;
        println!("\nSaved store to {}", path.display());
    }

    if let Some(path) = &args.summary {
        let summary = TrainingSummary {
            training_rounds: config.training_rounds,
            evaluation_rounds: config.evaluation_rounds,
            seed: config.seed,
            training,
            evaluation,
            states_learned,
        };
        let file = File::create(path)
            .with_context(|| format!("failed to create summary {}", path.display()))?;
        to_writer_pretty(file, &summary).context("failed to write summary")?;
        println!("Saved summary to {}", path.display());
    }

    Ok(())
}

fn build_players(
    first_store: &SharedStore,
    second_store: &SharedStore,
    config: &crate::config::PolicyConfig,
) -> Result<Vec<Box<dyn Policy>>> {
    Ok(vec![
        build_player(PolicyKind::Weighted, FIRST, first_store, config)?,
        build_player(PolicyKind::Weighted, SECOND, second_store, config)?,
        build_player(PolicyKind::Random, BASELINE, first_store, config)?,
    ])
}

fn tournament(rounds: usize, seed: Option<u64>, no_progress: bool) -> Tournament {
    let observer: Box<dyn Observer> = if no_progress {
        Box::new(LoggingObserver::default())
    } else {
        Box::new(ProgressObserver::new())
    };
    let tournament = Tournament::new(rounds).with_observer(observer);
    match seed {
        Some(seed) => tournament.with_seed(seed),
        None => tournament,
    }
}
