//! ledger-runner: headless driver for the timestamp ledger.
//!
//! Usage:
//!   ledger-runner --script commands.jsonl
//!   ledger-runner --script -            (commands on stdin)
//!   ledger-runner --seed 12345 --ops 10000 --accounts 16
//!   ledger-runner ... --config ledger.json

use anyhow::{Context, Result};
use ledger_core::{
    command::{CommandOutcome, LedgerCommand},
    config::LedgerConfig,
    workload::WorkloadGenerator,
    Ledger,
};
use std::collections::BTreeMap;
use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let config = match find_arg(&args, "--config") {
        Some(path) => LedgerConfig::load(path)?,
        None => LedgerConfig::default(),
    };
    let mut ledger = Ledger::with_config(config);

    if let Some(script) = find_arg(&args, "--script") {
        return run_script(&mut ledger, script);
    }

    let seed = parse_arg(&args, "--seed", 42u64);
    let ops = parse_arg(&args, "--ops", 1_000usize);
    let accounts = parse_arg(&args, "--accounts", 8u64);

    println!("ledger-runner");
    println!("  seed:      {seed}");
    println!("  ops:       {ops}");
    println!("  accounts:  {accounts}");
    println!();

    let commands = WorkloadGenerator::new(seed, accounts).generate(ops);
    run_workload(&mut ledger, &commands)
}

/// Apply one JSON command per line and answer with one JSON outcome per line.
/// A line that does not parse gets an `{"error": ...}` reply and is skipped.
fn run_script(ledger: &mut Ledger, path: &str) -> Result<()> {
    let reader: Box<dyn BufRead> = if path == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let file = File::open(path).with_context(|| format!("Cannot open {path}"))?;
        Box::new(BufReader::new(file))
    };
    let mut stdout = io::stdout().lock();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<LedgerCommand>(&line) {
            Ok(command) => {
                let outcome = ledger.apply(&command);
                writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?;
            }
            Err(e) => {
                log::warn!("line {}: {e}", line_no + 1);
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}

fn run_workload(ledger: &mut Ledger, commands: &[LedgerCommand]) -> Result<()> {
    let mut rejected: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut events: BTreeMap<&'static str, usize> = BTreeMap::new();

    for command in commands {
        let outcome = ledger.apply(command);
        if outcome.is_rejection() {
            *rejected.entry(command.name()).or_default() += 1;
        }
        for event in ledger.drain_events() {
            *events.entry(event.kind()).or_default() += 1;
        }
    }

    let last = ledger.last_timestamp().unwrap_or(0);
    let top = match ledger.apply(&LedgerCommand::TopSpenders { timestamp: last, n: 5 }) {
        CommandOutcome::Spenders(top) => top,
        _ => Vec::new(),
    };
    let snapshot = ledger.snapshot();
    log::info!(
        "workload done: {} commands, {} active accounts, {} cashbacks pending",
        commands.len(),
        snapshot.accounts.len(),
        snapshot.pending_cashbacks
    );

    println!("=== RUN SUMMARY ===");
    println!("  commands:        {}", commands.len());
    println!("  final timestamp: {last}");
    println!("  accounts:        {}", snapshot.accounts.len());
    println!("  total balance:   {}", snapshot.total_balance());
    println!("  payments issued: {}", snapshot.payments_issued);
    println!("  cashback queue:  {}", snapshot.pending_cashbacks);
    println!();
    println!("=== EVENTS ===");
    for (kind, count) in &events {
        println!("  {kind:<18} {count}");
    }
    println!();
    println!("=== REJECTED ===");
    if rejected.is_empty() {
        println!("  (none)");
    }
    for (op, count) in &rejected {
        println!("  {op:<18} {count}");
    }
    println!();
    println!("=== TOP SPENDERS ===");
    for entry in &top {
        println!("  {entry}");
    }
    println!();
    println!("{}", ledger.snapshot_json()?);
    Ok(())
}

fn find_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
