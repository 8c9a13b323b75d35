//! Example demonstrating synthetic puzzle generation.
//!
//! This example shows how to:
//! - Create a `PuzzleGenerator` for a given order
//! - Generate a puzzle from a random or fixed seed
//! - Print the puzzle in the line and compact wire forms solvers read
//!
//! # Usage
//!
//! ```sh
//! cargo run --example generate_puzzle
//! ```
//!
//! Generate a 16x16 puzzle with 128 empty cells:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --base 4 --remove 128
//! ```
//!
//! Reproduce a puzzle from its seed:
//!
//! ```sh
//! cargo run --example generate_puzzle -- --seed c1d44bd6afaf8af64f126546884e19298acbdc33c3924a28136715de946ef3f1
//! ```

use std::process;

use clap::Parser;
use solverbench_core::{Order, encoding};
use solverbench_generator::{PuzzleGenerator, PuzzleSeed};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Box size of the puzzle (3 for 9x9, 4 for 16x16, ...).
    #[arg(long, value_name = "BASE", default_value_t = 3)]
    base: usize,

    /// Number of cells to empty.
    #[arg(long, value_name = "COUNT", default_value_t = 35)]
    remove: usize,

    /// Seed to generate from (64 hex digits). Random when omitted.
    #[arg(long, value_name = "HEX")]
    seed: Option<PuzzleSeed>,
}

fn main() {
    let args = Args::parse();
    let order = match Order::new(args.base) {
        Ok(order) => order,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    let generator = PuzzleGenerator::new(order);
    let seed = args.seed.unwrap_or_else(PuzzleSeed::random);
    let puzzle = match generator.generate_with_seed(args.remove, seed) {
        Ok(puzzle) => puzzle,
        Err(err) => {
            eprintln!("{err}");
            process::exit(2);
        }
    };

    println!("Seed:");
    println!("  {}", puzzle.seed);
    println!();
    println!("Problem ({order}, {} empty):", puzzle.problem.empty_count());
    println!("{}", puzzle.problem);
    println!();
    println!("Solution:");
    println!("{}", puzzle.solution);
    println!();

    match encoding::encode_compact(&puzzle.problem) {
        Ok(compact) => {
            println!("Compact:");
            println!("  {compact}");
        }
        Err(err) => println!("Compact: unavailable ({err})"),
    }
}
