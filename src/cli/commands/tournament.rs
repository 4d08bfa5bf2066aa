//! Tournament command - frozen weighted players against a random baseline

use std::{
    fs::File,
    path::PathBuf,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;

use super::{PolicyKind, build_player, load_store};
use crate::{
    cli::output::{format_number, print_kv, print_section, print_standings, print_subsection},
    config::PolicyConfig,
    pipeline::{MetricsObserver, ProgressObserver, Tournament, match_count},
    ports::Policy,
    store::StateStore,
};

#[derive(Parser, Debug)]
#[command(about = "Run a round-robin tournament without learning")]
pub struct TournamentArgs {
    /// Trained store file; weighted players start empty without one
    #[arg(long, short = 's')]
    pub store: Option<PathBuf>,

    /// Rounds per ordered pair of players
    #[arg(long, short = 'r', default_value_t = 10)]
    pub rounds: usize,

    /// Number of weighted players
    #[arg(long, short = 'w', default_value_t = 2)]
    pub weighted: usize,

    /// Number of random players
    #[arg(long, default_value_t = 1)]
    pub random: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip successors symmetric to one already scored
    #[arg(long)]
    pub dedupe: bool,

    /// Export standings as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: TournamentArgs) -> Result<()> {
    if args.weighted + args.random < 2 {
        bail!("a tournament needs at least two players");
    }

    let store = match &args.store {
        Some(path) => load_store(path)?,
        None => StateStore::new(),
    }
    .shared();

    let config = PolicyConfig::new()
        .with_learning(false)
        .with_dedupe(args.dedupe);
    let mut players: Vec<Box<dyn Policy>> = Vec::new();
    for index in 1..=args.weighted {
        players.push(build_player(
            PolicyKind::Weighted,
            &format!("weighted{index}"),
            &store,
            &config,
        )?);
    }
    for index in 1..=args.random {
        players.push(build_player(
            PolicyKind::Random,
            &format!("random{index}"),
            &store,
            &config,
        )?);
    }

    print_section("Tournament");
    print_kv("Players", &players.len().to_string());
    print_kv(
        "Games",
        &format_number(match_count(args.rounds, players.len())),
    );

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut tournament = Tournament::new(args.rounds)
        .with_observer(Box::new(ProgressObserver::new()))
        .with_observer(Box::new(Arc::clone(&metrics)));
    if let Some(seed) = args.seed {
        tournament = tournament.with_seed(seed);
    }
    let standings = tournament
        .run(&mut players)
        .context("tournament failed")?;

    println!();
    print_standings(&standings);

    let summary = metrics
        .lock()
        .map_err(|_| anyhow!("metrics observer lock poisoned"))?
        .summary();
    print_subsection("Outcomes");
    print_kv("X win rate", &format!("{:.1}%", summary.x_win_rate * 100.0));
    print_kv("O win rate", &format!("{:.1}%", summary.o_win_rate * 100.0));
    print_kv("Draw rate", &format!("{:.1}%", summary.draw_rate * 100.0));
    print_kv("Avg game length", &format!("{:.2}", summary.avg_game_length));

    if let Some(path) = &args.export {
        let file = File::create(path)
            .with_context(|| format!("failed to create export {}", path.display()))?;
        serde_json::to_writer_pretty(file, &standings).context("failed to write standings")?;
        println!("\nExported standings to {}", path.display());
    }

    Ok(())
}
