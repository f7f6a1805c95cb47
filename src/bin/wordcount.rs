//! Counts words in a file (or stdin) and prints `word: count` lines.

use chained_hashmap::word_count::{count_words_with_buckets, DEFAULT_BUCKETS};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "wordcount")]
#[command(about = "Count alphanumeric words using a chained hash table")]
struct Args {
    /// Input file; reads stdin when omitted
    path: Option<PathBuf>,

    /// Number of hash buckets
    #[arg(short, long, default_value_t = DEFAULT_BUCKETS)]
    buckets: usize,

    /// Print words in lexical order instead of table order
    #[arg(long, default_value_t = false)]
    sort: bool,
}

fn open(path: Option<&PathBuf>) -> io::Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(p) => Box::new(BufReader::new(File::open(p)?)),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let reader = open(args.path.as_ref())?;
    let counts = count_words_with_buckets(reader, args.buckets)?;
    log::info!("{} distinct words, {} total", counts.len(), counts.total());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.sort {
        for (word, n) in counts.sorted() {
            writeln!(out, "{}: {}", word, n)?;
        }
    } else {
        write!(out, "{}", counts)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wordcount: {}", e);
            ExitCode::FAILURE
        }
    }
}
