//! CLI front-end: `lempel_ziv <file> <cost>` factorizes `file` under the
//! reuse-cost ceiling `cost` and prints one phrase per line to stdout,
//! followed by the total phrase count. Argument parsing, error context and
//! progress diagnostics follow the same `structopt`/`anyhow`/`console`
//! pattern the reference workspace's `cli` and `data_normalizer` binaries
//! use.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;
use structopt::StructOpt;

use lempel_ziv::factorizer;
use suffix_tree::SuffixTree;

#[derive(StructOpt)]
#[structopt(
    name = "lempel_ziv",
    about = "Bounded-cost Lempel-Ziv-like factorization of a byte file."
)]
struct CliInput {
    /// Path to the byte file to factorize.
    #[structopt(parse(from_os_str))]
    file: PathBuf,

    /// Reuse-cost ceiling: a position may be copied at most this many times
    /// before it is exhausted.
    cost: usize,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{} {:#}", style("error:").red().bold(), err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliInput::from_args();

    if args.cost == 0 {
        return Err(lempel_ziv::Error::InvalidCost(args.cost.to_string()).into());
    }

    let input = fs::read(&args.file)
        .with_context(|| format!("could not read `{}`", args.file.display()))?;

    eprintln!(
        "{} read {} bytes from `{}`, COST = {}",
        style("[1/2]").bold().dim(),
        input.len(),
        args.file.display(),
        args.cost,
    );

    let mut tree = SuffixTree::new(&input, args.cost)
        .with_context(|| "failed to build the annotated suffix tree")?;

    eprintln!(
        "{} factorizing ({} nodes in the suffix tree)...",
        style("[2/2]").bold().dim(),
        tree.node_count(),
    );

    let pb = ProgressBar::new_spinner();
    pb.set_message("walking the annotated tree");
    pb.enable_steady_tick(100);
    let phrases = factorizer::factorize(&mut tree).with_context(|| "factorization failed")?;
    pb.finish_and_clear();

    for phrase in &phrases {
        println!("{}", phrase);
    }
    eprintln!("{} z = {}", style("done:").green().bold(), phrases.len());

    Ok(())
}
