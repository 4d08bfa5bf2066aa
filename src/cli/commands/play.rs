//! Play-one command - show a single game move by move

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{PolicyKind, build_player, load_store, lock, save_store};
use crate::{
    cli::output::{print_board, print_section},
    config::PolicyConfig,
    pipeline::GameRunner,
    store::StateStore,
    tictactoe::Outcome,
};

#[derive(Parser, Debug)]
#[command(about = "Play and print one game")]
pub struct PlayArgs {
    /// Policy playing X
    #[arg(long, value_enum, default_value = "weighted")]
    pub x: PolicyKind,

    /// Policy playing O
    #[arg(long, value_enum, default_value = "random")]
    pub o: PolicyKind,

    /// Store read by weighted players
    #[arg(long, short = 's')]
    pub store: Option<PathBuf>,

    /// Credit the game to the store and save it back
    #[arg(long, requires = "store")]
    pub learn: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let store = match &args.store {
        Some(path) => load_store(path)?,
        None => StateStore::new(),
    }
    .shared();

    let mut x_config = PolicyConfig::new().with_learning(args.learn);
    let mut o_config = PolicyConfig::new().with_learning(false);
    if let Some(seed) = args.seed {
        x_config = x_config.with_seed(seed);
        o_config = o_config.with_seed(seed.wrapping_add(1));
    }
    let mut x = build_player(args.x, "X", &store, &x_config)?;
    let mut o = build_player(args.o, "O", &store, &o_config)?;

    let record = GameRunner::new()
        .play(x.as_mut(), o.as_mut())
        .context("game failed")?;

    print_section(&format!("{:?} (X) vs {:?} (O)", args.x, args.o));
    for (index, board) in record.history.iter().enumerate() {
        println!("\nMove {index}:");
        print_board(board);
    }
    println!("\n{}", Outcome::from(record.result));

    if args.learn
        && let Some(path) = &args.store
    {
        save_store(&*lock(&store)?, path)?;
        println!("Saved store to {}", path.display());
    }
    Ok(())
}
