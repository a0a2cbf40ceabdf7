//! LTMS - Entry Point
//!
//! Parses the command line, loads configuration, wires the file store into
//! the repository and runs one command against it.
//!
//! Wiring sequence:
//! 1. Parse CLI + load config.toml (flags override file values)
//! 2. Init tracing (stderr, JSON or compact)
//! 3. Create metrics registry + file store
//! 4. Build repository, seed sample data into an empty store
//! 5. Dispatch the command, print text or JSON to stdout
//! 6. Optionally print storage metrics

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ltms::adapters::clock::SystemClock;
use ltms::adapters::metrics::StorageMetrics;
use ltms::adapters::persistence::{CollectionStore, FileStore, RepositoryImpl};
use ltms::cli::{Cli, Command, LawyerCommand, TransactionCommand};
use ltms::config::{AppConfig, LogFormat, loader};
use ltms::domain::monthly::{MonthlyComparison, monthly_comparison};
use ltms::domain::ranking::{LawyerRanking, rank_lawyers};
use ltms::domain::record::{Lawyer, Transaction};
use ltms::domain::statistics::{Statistics, statistics};
use ltms::ports::clock::Clock;
use ltms::ports::repository::Repository;
use ltms::usecases::backup::{export_to_dir, import_data};
use ltms::usecases::dashboard::{DashboardRefresher, DashboardSnapshot, build_snapshot};
use ltms::usecases::reports::{LawyerReport, find_lawyers, find_transactions, lawyer_report};

type Repo = RepositoryImpl<FileStore>;

/// Shared handles every command runs against.
struct App {
    repo: Arc<Repo>,
    clock: Arc<SystemClock>,
    config: AppConfig,
    json: bool,
    /// Whether startup seeded an empty store.
    seeded: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Parse CLI and load configuration ─────────────────
    let cli = Cli::parse();
    let config_path = loader::config_path(cli.config.as_deref());
    let mut config =
        loader::load_or_default(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.display().to_string();
    }

    // ── 2. Initialize logging on stderr ─────────────────────
    init_tracing(&config, cli.log_level_override());

    match config_path {
        Some(path) => info!(path = %path.display(), "Configuration loaded"),
        None => debug!("No config.toml found, using defaults"),
    }
    info!(
        name = %config.app.name,
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.storage.data_dir,
        "Starting LTMS"
    );

    // ── 3. Metrics registry and file store ──────────────────
    let metrics = StorageMetrics::new().context("Failed to create metrics registry")?;
    let store = FileStore::new(&config.storage.data_dir)
        .await
        .context("Failed to open data directory")?;

    // ── 4. Repository, seeded on first run ──────────────────
    let collections = CollectionStore::new(store, metrics.clone())
        .with_seeding(config.storage.seed_sample_data);
    let repo = Arc::new(RepositoryImpl::new(collections));
    let seeded = repo.init().await.context("Failed to initialize storage")?;

    let app = App {
        repo,
        clock: Arc::new(SystemClock),
        config,
        json: cli.json,
        seeded,
    };

    // ── 5. Run the command ──────────────────────────────────
    run(&app, cli.command).await?;

    // ── 6. Metrics dump ─────────────────────────────────────
    if cli.print_metrics {
        eprint!("{}", metrics.render()?);
    }

    Ok(())
}

/// Install the global subscriber. `-v`/`-q` beat `RUST_LOG`, which beats
/// the configured level.
fn init_tracing(config: &AppConfig, level_override: Option<&str>) {
    let filter = level_override.map_or_else(
        || {
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.app.log_level))
        },
        EnvFilter::new,
    );

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match config.app.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

async fn run(app: &App, command: Command) -> Result<()> {
    match command {
        Command::Init => {
            if app.seeded {
                println!("Sample data written to {}", app.config.storage.data_dir);
            } else {
                println!("Store already initialized");
            }
        }
        Command::Lawyer(cmd) => run_lawyer(app, cmd).await?,
        Command::Transaction(cmd) => run_transaction(app, cmd).await?,
        Command::Stats => {
            let stats = statistics(&app.repo.lawyers().await, &app.repo.transactions().await);
            emit(app.json, &stats, print_statistics)?;
        }
        Command::Report(args) => {
            let report = lawyer_report(app.repo.as_ref(), &args.lawyer, args.range()).await?;
            emit(app.json, &report, |r| print_report(r, args.details))?;
        }
        Command::Ranking => {
            let ranking = rank_lawyers(&app.repo.lawyers().await, &app.repo.transactions().await);
            emit(app.json, &ranking, |r| print_ranking(r))?;
        }
        Command::Monthly(args) => {
            let today = args.on.unwrap_or_else(|| app.clock.today());
            let comparison = monthly_comparison(&app.repo.transactions().await, today);
            emit(app.json, &comparison, print_monthly)?;
        }
        Command::Dashboard { watch } => {
            if watch {
                watch_dashboard(app).await?;
            } else {
                let snapshot = build_snapshot(
                    app.repo.as_ref(),
                    app.clock.as_ref(),
                    app.config.dashboard.top_lawyers,
                )
                .await;
                emit(app.json, &snapshot, print_dashboard)?;
            }
        }
        Command::Export { out } => {
            let path = export_to_dir(app.repo.as_ref(), app.clock.as_ref(), &out).await?;
            println!("{}", path.display());
        }
        Command::Import { file } => {
            let bytes = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let summary = import_data(app.repo.as_ref(), &bytes)
                .await
                .with_context(|| format!("Import of {} failed", file.display()))?;
            match summary.lawyers {
                Some(n) => println!("Lawyers replaced: {n}"),
                None => println!("Lawyers unchanged"),
            }
            match summary.transactions {
                Some(n) => println!("Transactions replaced: {n}"),
                None => println!("Transactions unchanged"),
            }
        }
        Command::Clear { yes } => {
            anyhow::ensure!(yes, "clear deletes every record; pass --yes to confirm");
            let seeded = app.repo.clear_and_reseed().await?;
            println!("All data cleared{}", if seeded { ", sample data restored" } else { "" });
        }
        Command::Repair => {
            let removed = app.repo.prune_orphans().await?;
            println!("Removed {removed} orphaned transaction(s)");
        }
        Command::Theme { value } => {
            if let Some(theme) = value {
                app.repo.set_theme(theme.into()).await?;
            }
            let theme = app.repo.theme().await;
            emit(app.json, &theme, |t| println!("{t}"))?;
        }
    }
    Ok(())
}

async fn run_lawyer(app: &App, command: LawyerCommand) -> Result<()> {
    let repo = app.repo.as_ref();
    match command {
        LawyerCommand::Add {
            name,
            professional_id,
            phone,
        } => {
            let lawyer = Lawyer::new(name, professional_id, phone);
            repo.add_lawyer(lawyer.clone()).await?;
            info!(id = %lawyer.id, "Lawyer added");
            emit(app.json, &lawyer, print_lawyer)?;
        }
        LawyerCommand::List { search } => {
            let lawyers = find_lawyers(repo, &search).await;
            emit(app.json, &lawyers, |list| list.iter().for_each(print_lawyer))?;
        }
        LawyerCommand::Show { id } => {
            let lawyer = repo
                .lawyer(&id)
                .await
                .with_context(|| format!("lawyer '{id}' not found"))?;
            emit(app.json, &lawyer, print_lawyer)?;
        }
        LawyerCommand::Update {
            id,
            name,
            professional_id,
            phone,
        } => {
            let mut lawyer = repo
                .lawyer(&id)
                .await
                .with_context(|| format!("lawyer '{id}' not found"))?;
            if let Some(name) = name {
                lawyer.name = name;
            }
            if let Some(professional_id) = professional_id {
                lawyer.professional_id = professional_id;
            }
            if let Some(phone) = phone {
                lawyer.phone = phone;
            }
            repo.update_lawyer(lawyer.clone()).await?;
            info!(id = %lawyer.id, "Lawyer updated");
            emit(app.json, &lawyer, print_lawyer)?;
        }
        LawyerCommand::Delete { id } => {
            repo.delete_lawyer(&id).await?;
            println!("Deleted lawyer {id} and their transactions");
        }
    }
    Ok(())
}

async fn run_transaction(app: &App, command: TransactionCommand) -> Result<()> {
    let repo = app.repo.as_ref();
    match command {
        TransactionCommand::Add {
            lawyer,
            documents,
            date,
            amount,
            paid,
        } => {
            let transaction = Transaction::new(
                lawyer,
                documents,
                date.unwrap_or_else(|| app.clock.today()),
                amount,
                paid,
            );
            ensure_lawyer_exists(repo, &transaction.lawyer_id).await?;
            repo.add_transaction(transaction.clone()).await?;
            info!(id = %transaction.id, lawyer_id = %transaction.lawyer_id, "Transaction added");
            emit(app.json, &transaction, print_transaction)?;
        }
        TransactionCommand::List(args) => {
            let transactions = find_transactions(repo, args.lawyer.as_deref(), &args.to_spec()).await;
            emit(app.json, &transactions, |list| {
                list.iter().for_each(print_transaction);
            })?;
        }
        TransactionCommand::Show { id } => {
            let transaction = repo
                .transaction(&id)
                .await
                .with_context(|| format!("transaction '{id}' not found"))?;
            emit(app.json, &transaction, print_transaction)?;
        }
        TransactionCommand::Update {
            id,
            lawyer,
            documents,
            date,
            amount,
            paid,
        } => {
            let mut transaction = repo
                .transaction(&id)
                .await
                .with_context(|| format!("transaction '{id}' not found"))?;
            if let Some(lawyer) = lawyer {
                transaction.lawyer_id = lawyer;
            }
            if let Some(documents) = documents {
                transaction.document_count = documents;
            }
            if let Some(date) = date {
                transaction.date = date;
            }
            if let Some(amount) = amount {
                transaction.amount = amount;
            }
            if let Some(paid) = paid {
                transaction.is_paid = paid;
            }
            ensure_lawyer_exists(repo, &transaction.lawyer_id).await?;
            repo.update_transaction(transaction.clone()).await?;
            info!(id = %transaction.id, "Transaction updated");
            emit(app.json, &transaction, print_transaction)?;
        }
        TransactionCommand::Delete { id } => {
            repo.delete_transaction(&id).await?;
            println!("Deleted transaction {id}");
        }
    }
    Ok(())
}

async fn ensure_lawyer_exists(repo: &Repo, lawyer_id: &str) -> Result<()> {
    anyhow::ensure!(
        repo.lawyer(lawyer_id).await.is_some(),
        "lawyer '{lawyer_id}' not found"
    );
    Ok(())
}

/// Refresh and print the dashboard until Ctrl-C.
async fn watch_dashboard(app: &App) -> Result<()> {
    let interval = Duration::from_secs(app.config.dashboard.refresh_interval_seconds);
    let (refresher, mut snapshot_rx) = DashboardRefresher::new(
        Arc::clone(&app.repo),
        Arc::clone(&app.clock),
        interval,
        app.config.dashboard.top_lawyers,
    );

    let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
    let handle = tokio::spawn(async move { refresher.run(shutdown_rx).await });

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("SIGINT received, stopping dashboard");
                break;
            }
            changed = snapshot_rx.changed() => {
                if changed.is_err() {
                    warn!("Dashboard refresher stopped unexpectedly");
                    break;
                }
                let snapshot = snapshot_rx.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    emit(app.json, &snapshot, print_dashboard)?;
                }
            }
        }
    }

    let _ = shutdown_tx.send(());
    handle.await.context("Dashboard refresher task failed")?;
    Ok(())
}

// ── Output ──────────────────────────────────────────────────

/// Print `value` as pretty JSON, or through `text` otherwise.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
        println!("{rendered}");
    } else {
        text(value);
    }
    Ok(())
}

fn print_lawyer(lawyer: &Lawyer) {
    println!(
        "{:<34} {:<24} {:<14} {}",
        lawyer.id, lawyer.name, lawyer.professional_id, lawyer.phone
    );
}

fn print_transaction(transaction: &Transaction) {
    println!(
        "{:<34} lawyer={:<34} {} docs={:<4} amount={:<12} {}",
        transaction.id,
        transaction.lawyer_id,
        transaction.date,
        transaction.document_count,
        transaction.amount,
        if transaction.is_paid { "paid" } else { "unpaid" }
    );
}

fn print_statistics(stats: &Statistics) {
    println!("Lawyers:       {}", stats.total_lawyers);
    println!("Transactions:  {}", stats.total_transactions);
    println!("Total amount:  {}", stats.total_amount);
    println!("Paid:          {} ({})", stats.total_paid, stats.paid_count);
    println!("Unpaid:        {} ({})", stats.total_unpaid, stats.unpaid_count);
}

fn print_report(report: &LawyerReport, details: bool) {
    let stats = &report.statistics;
    println!("{} ({})", report.lawyer.name, report.lawyer.professional_id);
    println!("Transactions:  {}", stats.total_transactions);
    println!("Documents:     {}", stats.total_documents);
    println!("Total amount:  {}", stats.total_amount);
    println!("Paid:          {} ({})", stats.total_paid, stats.paid_count);
    println!("Unpaid:        {} ({})", stats.total_unpaid, stats.unpaid_count);
    if details {
        println!();
        stats.transactions.iter().for_each(print_transaction);
    }
}

fn print_ranking(ranking: &[LawyerRanking]) {
    for (position, row) in ranking.iter().enumerate() {
        println!(
            "{:>2}. {:<24} {:>4} tx  total={:<12} paid={:<12} unpaid={:<12} {}% paid",
            position + 1,
            row.lawyer.name,
            row.transaction_count,
            row.total_amount,
            row.paid_amount,
            row.unpaid_amount,
            row.paid_percentage.round_dp(1)
        );
    }
}

fn print_monthly(comparison: &MonthlyComparison) {
    for (label, month) in [
        ("This month", &comparison.this_month),
        ("Last month", &comparison.last_month),
    ] {
        println!(
            "{label}: {} tx, amount={} paid={} unpaid={}",
            month.count, month.amount, month.paid, month.unpaid
        );
    }
    match comparison.amount_change_percent() {
        Some(change) => println!("Change: {}%", change.round_dp(1)),
        None => println!("Change: n/a"),
    }
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!("── Dashboard ({}) ──", snapshot.generated_at.format("%Y-%m-%d %H:%M:%S UTC"));
    print_statistics(&snapshot.statistics);
    println!();
    print_monthly(&snapshot.monthly);
    println!();
    print_ranking(&snapshot.top_lawyers);
}
