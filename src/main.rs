use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::AtomicBool;

use bid_screening::batch::BatchRunner;
use bid_screening::config::AppConfig;
use bid_screening::screening::{Clause, Target};
use bid_screening::snapshot::ReferenceSnapshot;
use bid_screening::store::{JudgementStore, MemoryStore};
use bid_screening::telemetry;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "bid-screening",
    about = "Judge company/office pairs against bid-announcement requirement clauses",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a batch evaluation and print one judgement per target as JSON lines
    Judge(JudgeArgs),
}

#[derive(Args, Debug)]
struct JudgeArgs {
    /// Tab-separated clause file: announcement_id, seq, text
    #[arg(long)]
    clauses: PathBuf,
    /// Tab-separated target file: announcement_id, company_id, office_id
    #[arg(long)]
    targets: PathBuf,
    /// Override the configured master-data directory
    #[arg(long)]
    masters: Option<PathBuf>,
    /// Override the configured chunk size
    #[arg(long)]
    chunk_size: Option<usize>,
    /// Also print every per-clause verdict before the judgements
    #[arg(long)]
    verbose_verdicts: bool,
}

#[derive(Debug, Deserialize)]
struct TargetRow {
    announcement_id: u64,
    company_id: u64,
    office_id: u64,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let Cli { command } = Cli::parse();
    match command {
        Command::Judge(args) => judge(&config, args),
    }
}

fn judge(config: &AppConfig, args: JudgeArgs) -> Result<(), Box<dyn std::error::Error>> {
    use std::io::Write;

    let masters = args
        .masters
        .unwrap_or_else(|| config.batch.master_data_dir.clone());
    let snapshot = ReferenceSnapshot::from_dir(&masters)?;

    let clauses = read_tsv::<Clause>(&args.clauses)?;
    let targets: Vec<Target> = read_tsv::<TargetRow>(&args.targets)?
        .into_iter()
        .map(|row| Target {
            announcement_id: row.announcement_id,
            company_id: row.company_id,
            office_id: row.office_id,
        })
        .collect();
    info!(
        clauses = clauses.len(),
        targets = targets.len(),
        masters = %masters.display(),
        "starting batch evaluation"
    );

    let runner = BatchRunner::new(&snapshot)
        .with_chunk_size(args.chunk_size.unwrap_or(config.batch.chunk_size));
    let cancel = AtomicBool::new(false);
    let mut store = MemoryStore::new();
    let outcome = runner.run(&clauses, &targets, &cancel, &mut store)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.verbose_verdicts {
        for target in &targets {
            for record in store.verdicts(target)? {
                serde_json::to_writer(&mut out, &record)?;
                writeln!(out)?;
            }
        }
    }
    for judgement in store.judgements() {
        serde_json::to_writer(&mut out, judgement)?;
        writeln!(out)?;
    }

    info!(
        targets = outcome.targets_processed,
        verdicts = outcome.verdicts_written,
        "batch evaluation finished"
    );
    Ok(())
}

fn read_tsv<T: serde::de::DeserializeOwned>(
    path: &PathBuf,
) -> Result<Vec<T>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
