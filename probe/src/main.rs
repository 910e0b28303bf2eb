//! Freezes the lines of a file, reports the chosen representation and times lookups.
use std::{hash::BuildHasherDefault, hint::black_box, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::WrapErr;
use frozen_set::{
    config, freeze_map, freeze_set, Comparer, DefaultComparer, Ordinal, OrdinalIgnoreCase,
    Strategy,
};
use hashbrown::HashSet;
use quanta::Instant;
use zwohash::ZwoHasher;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File with one key per line.
    keys: PathBuf,
    /// Compare keys ignoring case.
    #[clap(short = 'i', long, conflicts_with = "ordinal")]
    ignore_case: bool,
    /// Compare keys with the ordinal comparer instead of the default one.
    #[clap(short = 'o', long)]
    ordinal: bool,
    /// Build a map from each key to its line number instead of a set.
    #[clap(short = 'm', long)]
    map: bool,
    /// Keys to look up and report.
    #[clap(short = 'p', long = "probe")]
    probes: Vec<String>,
    /// Number of passes over all keys when timing lookups, 0 to skip timing.
    #[clap(short = 'r', long, default_value = "100")]
    rounds: usize,
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;
    frozen_logger::setup();

    let text = std::fs::read_to_string(&args.keys)
        .wrap_err_with(|| format!("failed to read keys from {}", args.keys.display()))?;
    let keys: Vec<String> = text.lines().map(str::to_owned).collect();

    if args.ignore_case {
        run(&args, &keys, OrdinalIgnoreCase);
    } else if args.ordinal {
        run(&args, &keys, Ordinal);
    } else {
        run(&args, &keys, DefaultComparer);
    }
    Ok(())
}

fn run<C>(args: &Args, keys: &[String], comparer: C)
where
    C: Comparer<String> + Comparer<str>,
{
    let misses: Vec<String> = keys.iter().map(|key| format!("{key}\u{1}")).collect();

    let start_time = Instant::now();
    if args.map {
        let lines = keys.iter().cloned().zip(1usize..);
        let map = freeze_map(lines, comparer);
        report(keys.len(), map.len(), map.strategy(), start_time);

        for probe in &args.probes {
            match map.get_key_value(probe.as_str()) {
                Some((key, line)) => log::info!("{probe:?}: found {key:?} (line {line})"),
                None => log::info!("{probe:?}: missing"),
            }
        }
        time_lookups("frozen map hits", args.rounds, keys, |key| map.contains_key(key));
        time_lookups("frozen map misses", args.rounds, &misses, |key| {
            map.contains_key(key)
        });
    } else {
        let set = freeze_set(keys.iter().cloned(), comparer);
        report(keys.len(), set.len(), set.strategy(), start_time);

        for probe in &args.probes {
            match set.get(probe.as_str()) {
                Some(key) => log::info!("{probe:?}: found {key:?}"),
                None => log::info!("{probe:?}: missing"),
            }
        }
        time_lookups("frozen set hits", args.rounds, keys, |key| set.contains(key));
        time_lookups("frozen set misses", args.rounds, &misses, |key| set.contains(key));
    }

    if args.rounds > 0 {
        let baseline: HashSet<&str, BuildHasherDefault<ZwoHasher>> =
            keys.iter().map(String::as_str).collect();
        log::info!("hashbrown baseline, always ordinal");
        time_lookups("hashbrown hits", args.rounds, keys, |key| baseline.contains(key));
        time_lookups("hashbrown misses", args.rounds, &misses, |key| {
            baseline.contains(key)
        });
    }
}

fn report(lines: usize, distinct: usize, strategy: Strategy, start_time: Instant) {
    log::info!(
        "froze {distinct} distinct keys from {lines} lines in {:.2?}",
        start_time.elapsed()
    );
    log::info!("strategy: {strategy}");
    log::debug!(
        "linear scans up to {} keys, sorted scans up to {}, at most {} keys per length bucket",
        config::MAX_SMALL_LEN,
        config::MAX_SMALL_ORDERED_LEN,
        config::LENGTH_BUCKET_SLOTS,
    );
}

fn time_lookups(label: &str, rounds: usize, keys: &[String], lookup: impl Fn(&str) -> bool) {
    if rounds == 0 || keys.is_empty() {
        return;
    }
    let start_time = Instant::now();
    let mut hits = 0usize;
    for _ in 0..rounds {
        for key in keys {
            hits += lookup(black_box(key.as_str())) as usize;
        }
    }
    let elapsed = start_time.elapsed();
    let lookups = rounds * keys.len();
    log::info!(
        "{label}: {hits} of {lookups} found, {:.1}ns per lookup",
        elapsed.as_nanos() as f64 / lookups as f64
    );
}
