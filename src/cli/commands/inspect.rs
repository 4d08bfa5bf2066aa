//! Inspect command - summarize a saved store

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use super::load_store;
use crate::{
    cli::output::{format_number, print_board, print_kv, print_section, print_subsection},
    tictactoe::Board,
    types::BUCKET_COUNT,
};

#[derive(Parser, Debug)]
#[command(about = "Show bucket sizes and the strongest states of a store")]
pub struct InspectArgs {
    /// Store file (`.json` or MessagePack)
    pub store: PathBuf,

    /// Move count whose states to list
    #[arg(long, short = 'b')]
    pub bucket: Option<usize>,

    /// How many states to list
    #[arg(long, short = 't', default_value_t = 10)]
    pub top: usize,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let store = load_store(&args.store)?;

    print_section(&format!("Store {}", args.store.display()));
    print_kv("States", &format_number(store.len()));
    print_kv("Default weight", &format!("{:.3}", store.default_weight()));
    let adjustments = store.adjustments();
    print_kv(
        "Adjustments",
        &format!(
            "X won {:.2}, O won {:.2}, draw {:.2}",
            adjustments.x_won, adjustments.o_won, adjustments.draw
        ),
    );

    print_subsection("Buckets");
    for moves in 0..BUCKET_COUNT {
        print_kv(&format!("{moves} moves"), &format_number(store.bucket_len(moves)));
    }

    let Some(bucket) = args.bucket else {
        return Ok(());
    };
    if bucket >= BUCKET_COUNT {
        bail!("bucket must be between 0 and {}", BUCKET_COUNT - 1);
    }

    let mut states = store.known_states(&[bucket]);
    states.sort_by(|(a_key, a), (b_key, b)| {
        b.weight
            .total_cmp(&a.weight)
            .then(b.play_count.cmp(&a.play_count))
            .then(a_key.cmp(b_key))
    });

    print_subsection(&format!("Top states after {bucket} moves"));
    for (key, record) in states.iter().take(args.top) {
        println!(
            "  weight {:.4}  plays {}",
            record.weight,
            format_number(record.play_count as usize)
        );
        let board = Board::from_flat(key.cells())?;
        print_board(&board);
    }
    Ok(())
}
