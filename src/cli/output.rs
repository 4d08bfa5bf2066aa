//! Output formatting for CLI

use crate::{
    pipeline::Standings,
    tictactoe::Board,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print one row per player: wins, draws, losses
pub fn print_standings(standings: &Standings) {
    println!("  {:16} {:>8} {:>8} {:>8}", "player", "wins", "draws", "losses");
    for (name, record) in standings.iter() {
        println!(
            "  {:16} {:>8} {:>8} {:>8}",
            name,
            format_number(record.wins),
            format_number(record.draws),
            format_number(record.losses)
        );
    }
}

/// Print a board indented, one row per line
pub fn print_board(board: &Board) {
    for line in board.to_string().lines() {
        println!("    {line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }
}
