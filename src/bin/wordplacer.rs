//! Thin, non-interactive CLI driver exercising the library end to end. Not a game:
//! no turn management, scoring, or persistence.
//!
//! Usage:
//!   wordplacer build <wordlist> [--out <path>]
//!   wordplacer bench <wordlist>
//!   wordplacer search <wordlist> --board-x <n> --board-y <n> \
//!       --seed <word>@<x>,<y>[:across|down] (--rack <letters> | --seed-rack <n>)

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use rand::Rng;
use wordplacer::{build_dawg, search_board, Board, Dawg, Rack};

fn usage() -> ! {
    eprintln!(
        "usage:\n  \
         wordplacer build <wordlist> [--out <path>]\n  \
         wordplacer bench <wordlist>\n  \
         wordplacer search <wordlist> --board-x <n> --board-y <n> \
         --seed <word>@<x>,<y>[:across|down] (--rack <letters> | --seed-rack <n>)"
    );
    std::process::exit(2);
}

/// Fills a rack with `count` letters drawn at random from the dawg's letter-frequency
/// distribution, for demo/bench runs that don't want to type out a rack by hand.
/// Mirrors the teacher's own `rand::thread_rng()` shuffle of its letter bag in
/// `game.rs` — unseeded, since reproducibility only matters for the favorite-letters
/// move-selection strategy, not for filling a demo rack.
fn random_rack(dawg: &Dawg, count: usize) -> Rack {
    let mut rng = rand::thread_rng();
    let distribution = dawg.distribution();
    let mut rack = Rack::new();
    for _ in 0..count {
        rack.push(distribution.random_letter(rng.gen_range(0.0..1.0)));
    }
    rack
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args_os().skip(1);
    let command = match args.next() {
        Some(c) => c,
        None => usage(),
    };

    match command.to_str() {
        Some("build") => run_build(args.collect()),
        Some("bench") => run_bench(args.collect()),
        Some("search") => run_search(args.collect()),
        _ => usage(),
    }
}

fn run_build(args: Vec<std::ffi::OsString>) -> ExitCode {
    let mut wordlist: Option<PathBuf> = None;
    let mut out: Option<PathBuf> = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.to_str() {
            Some("--out") => out = it.next().map(PathBuf::from),
            _ if wordlist.is_none() => wordlist = Some(PathBuf::from(arg)),
            _ => usage(),
        }
    }
    let Some(wordlist) = wordlist else { usage() };

    match build_dawg(&wordlist) {
        Ok((dawg, accepted)) => {
            println!(
                "accepted {accepted} words, {} nodes in the minimized DAWG",
                dawg.node_count()
            );
            if let Some(out) = out {
                let summary = format!(
                    "wordlist: {}\naccepted_words: {accepted}\nnode_count: {}\n",
                    wordlist.display(),
                    dawg.node_count()
                );
                if let Err(e) = std::fs::write(&out, summary) {
                    eprintln!("could not write summary to {}: {e}", out.display());
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("build failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_bench(args: Vec<std::ffi::OsString>) -> ExitCode {
    let Some(wordlist) = args.into_iter().next().map(PathBuf::from) else {
        usage()
    };

    let start = Instant::now();
    match build_dawg(&wordlist) {
        Ok((dawg, accepted)) => {
            let elapsed = start.elapsed();
            println!(
                "built {accepted} words into {} nodes in {:.3}s",
                dawg.node_count(),
                elapsed.as_secs_f64()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("build failed: {e}");
            ExitCode::FAILURE
        }
    }
}

struct SeedSpec {
    word: String,
    x: usize,
    y: usize,
    across: bool,
}

fn parse_seed(spec: &str) -> Option<SeedSpec> {
    let (word, rest) = spec.split_once('@')?;
    let (coords, direction) = match rest.split_once(':') {
        Some((coords, dir)) => (coords, dir),
        None => (rest, "across"),
    };
    let (x_str, y_str) = coords.split_once(',')?;
    let x: usize = x_str.parse().ok()?;
    let y: usize = y_str.parse().ok()?;
    let across = match direction {
        "across" => true,
        "down" => false,
        _ => return None,
    };
    Some(SeedSpec {
        word: word.to_string(),
        x,
        y,
        across,
    })
}

fn run_search(args: Vec<std::ffi::OsString>) -> ExitCode {
    let mut wordlist: Option<PathBuf> = None;
    let mut board_x: usize = 15;
    let mut board_y: usize = 15;
    let mut seed: Option<String> = None;
    let mut rack_letters: Option<String> = None;
    let mut seed_rack_count: Option<usize> = None;

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.to_str() {
            Some("--board-x") => board_x = it.next().and_then(|s| s.to_str()?.parse().ok()).unwrap_or(15),
            Some("--board-y") => board_y = it.next().and_then(|s| s.to_str()?.parse().ok()).unwrap_or(15),
            Some("--seed") => seed = it.next().and_then(|s| s.to_str().map(str::to_string)),
            Some("--rack") => rack_letters = it.next().and_then(|s| s.to_str().map(str::to_string)),
            Some("--seed-rack") => {
                seed_rack_count = it.next().and_then(|s| s.to_str()?.parse().ok());
            }
            _ if wordlist.is_none() => wordlist = Some(PathBuf::from(arg)),
            _ => usage(),
        }
    }
    let (Some(wordlist), Some(seed)) = (wordlist, seed) else {
        usage()
    };
    if rack_letters.is_none() && seed_rack_count.is_none() {
        usage();
    }
    let Some(seed) = parse_seed(&seed) else {
        eprintln!("invalid --seed, expected <word>@<x>,<y>[:across|down]");
        return ExitCode::FAILURE;
    };

    let (dawg, accepted) = match build_dawg(&wordlist) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("build failed: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("loaded {accepted} words");

    let mut board = Board::init(board_x, board_y);
    let start = board.index(seed.x, seed.y);
    if let Err(e) = board.write(&dawg, start, seed.across, seed.word.as_bytes()) {
        eprintln!("could not seed board: {e}");
        return ExitCode::FAILURE;
    }

    let rack = match rack_letters {
        Some(letters) => Rack::from_letters(letters.bytes()),
        None => random_rack(&dawg, seed_rack_count.unwrap()),
    };
    let (count, mv) = search_board(&dawg, &board, &rack);
    if count == 0 {
        println!("no legal moves found");
    } else {
        let (x, y) = board.coord(mv.start);
        println!(
            "considered {count} candidate(s); best: \"{}\" at ({x},{y}) {}",
            String::from_utf8_lossy(&mv.word),
            if mv.offset == board.offset(true) { "across" } else { "down" }
        );
    }
    ExitCode::SUCCESS
}
