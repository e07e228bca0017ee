use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use latchkey_core::{
    decisions, export_filename, project, to_pretty_json, ArticleId, Batch, ConfidenceFilter,
    FilterConfig, ReviewStatus, SourceFilter, StatusFilter,
};
use latchkey_engine::{
    EngineConfig, InterpreterContext, Notification, Notifier, OutboundStatus, SessionId,
    SessionStore, Severity, SimulatedAgent, SimulatedAssembly,
};

/// Latchkey: editorial review desk for AI-annotated newsletter batches
#[derive(Parser, Debug)]
#[command(name = "latchkey")]
#[command(about = "Editorial review desk for AI-annotated newsletter batches", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the derived statistics for a batch file
    Stats(StatsArgs),
    /// Print the reviewer's working view of a batch file
    List(ListArgs),
    /// Write the decisions artifact for a batch file
    Export(ExportArgs),
    /// Run a scripted review session against a batch file
    Review(ReviewArgs),
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Batch file (JSON, as delivered by the annotation agent)
    batch: PathBuf,
}

#[derive(Parser, Debug)]
struct ListArgs {
    /// Batch file (JSON, as delivered by the annotation agent)
    batch: PathBuf,

    /// Confidence band to show
    #[arg(long, default_value = "all", value_parser = ["all", "high", "medium", "low"])]
    confidence: String,

    /// Disposition to show
    #[arg(long, default_value = "all", value_parser = ["all", "pending", "approved", "rejected", "saved"])]
    status: String,

    /// Source publication to show (exact name)
    #[arg(long, default_value = "all")]
    source: String,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Batch file (JSON, as delivered by the annotation agent)
    batch: PathBuf,

    /// Directory to write the artifact into
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ReviewArgs {
    /// Batch file (JSON, as delivered by the annotation agent)
    batch: PathBuf,

    /// Approve these article ids
    #[arg(long = "approve", num_args = 1..)]
    approve: Vec<String>,

    /// Reject these article ids
    #[arg(long = "reject", num_args = 1..)]
    reject: Vec<String>,

    /// Save these article ids for later
    #[arg(long = "save", num_args = 1..)]
    save: Vec<String>,

    /// Edit a proposed POV, as ID=TEXT (repeatable)
    #[arg(long = "edit-pov")]
    edit_pov: Vec<String>,

    /// Publish the approved articles after applying decisions
    #[arg(long)]
    publish: bool,

    /// Directory to write the decisions artifact into
    /// (defaults to LATCHKEY_EXPORT_DIR)
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Notifier that prints to stdout, one line per notification.
struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn notify(&self, notification: Notification) {
        let tag = match notification.severity {
            Severity::Info => "info",
            Severity::Error => "error",
        };
        println!(
            "[{}] {}: {}",
            tag, notification.title, notification.message
        );
    }
}

fn load_batch(path: &Path) -> Result<Batch> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading batch file {}", path.display()))?;
    let mut batch: Batch = serde_json::from_str(&text)
        .with_context(|| format!("parsing batch file {}", path.display()))?;
    batch.recompute_stats();
    Ok(batch)
}

fn parse_filter(args: &ListArgs) -> Result<FilterConfig> {
    let confidence = match args.confidence.as_str() {
        "all" => ConfidenceFilter::All,
        "high" => ConfidenceFilter::High,
        "medium" => ConfidenceFilter::Medium,
        "low" => ConfidenceFilter::Low,
        other => return Err(anyhow!("unknown confidence band: {}", other)),
    };
    let status = match args.status.as_str() {
        "all" => StatusFilter::All,
        "pending" => StatusFilter::Only(ReviewStatus::Pending),
        "approved" => StatusFilter::Only(ReviewStatus::Approved),
        "rejected" => StatusFilter::Only(ReviewStatus::Rejected),
        "saved" => StatusFilter::Only(ReviewStatus::Saved),
        other => return Err(anyhow!("unknown status: {}", other)),
    };
    let source = match args.source.as_str() {
        "all" => SourceFilter::All,
        name => SourceFilter::Only(name.to_string()),
    };
    Ok(FilterConfig {
        confidence,
        status,
        source,
    })
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let batch = load_batch(&args.batch)?;
    let stats = &batch.stats;
    println!("batch {} ({} articles)", batch.id, batch.articles.len());
    println!("  high confidence:   {}", stats.high_confidence);
    println!("  medium confidence: {}", stats.medium_confidence);
    println!("  low confidence:    {}", stats.low_confidence);
    println!("  avg voice score:   {:.1}", stats.avg_voice_score);
    println!("  alignment:         {}%", stats.collaboration_alignment);
    Ok(())
}

fn run_list(args: ListArgs) -> Result<()> {
    let batch = load_batch(&args.batch)?;
    let filter = parse_filter(&args)?;
    let visible = project(&batch.articles, &filter);
    if visible.is_empty() {
        println!("no articles match the current filter");
        return Ok(());
    }
    for article in visible {
        println!(
            "{:<12} {:>4.2}  {:<8}  {}",
            article.id, article.confidence, article.status, article.title
        );
    }
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    let batch = load_batch(&args.batch)?;
    let records = decisions(&batch);
    let json = to_pretty_json(&records).context("serializing decision records")?;
    let path = args
        .out
        .join(export_filename(chrono_today()));
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating export directory {}", args.out.display()))?;
    std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    println!("wrote {} decisions to {}", records.len(), path.display());
    Ok(())
}

fn chrono_today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

async fn run_review(args: ReviewArgs) -> Result<()> {
    let batch = load_batch(&args.batch)?;
    let config = EngineConfig::from_env()?;
    let export_dir = args.out.clone().unwrap_or_else(|| config.export_dir.clone());

    let store = Arc::new(SessionStore::new());
    let ctx = InterpreterContext {
        session_id: SessionId::new(),
        store: store.clone(),
        source: Arc::new(SimulatedAgent::new(Duration::from_millis(
            config.refresh_delay_ms,
        ))),
        sink: Arc::new(SimulatedAssembly::new(Duration::from_millis(
            config.publish_delay_ms,
        ))),
        notifier: Arc::new(StdoutNotifier),
        export_dir,
    };

    store.ingest_batch(&ctx, batch).await;

    for (ids, status) in [
        (&args.approve, ReviewStatus::Approved),
        (&args.reject, ReviewStatus::Rejected),
        (&args.save, ReviewStatus::Saved),
    ] {
        for id in ids {
            store
                .set_status(&ctx, ArticleId::from(id.as_str()), status)
                .await;
        }
    }

    for edit in &args.edit_pov {
        let (id, text) = edit
            .split_once('=')
            .with_context(|| format!("--edit-pov expects ID=TEXT, got {:?}", edit))?;
        store
            .edit_pov(&ctx, ArticleId::from(id), text.to_string())
            .await;
    }

    if args.publish {
        store.publish(&ctx).await;
        wait_for_outbound_ready(&store, &ctx).await?;
    }

    store.export_decisions(&ctx).await;

    let state = store
        .get(ctx.session_id)
        .await
        .ok_or_else(|| anyhow!("session vanished from the store"))?;
    if let Some(batch) = &state.batch {
        println!(
            "done: {} articles, {} approved, {} pending",
            batch.stats.total_processed,
            state.approved_count(),
            state.pending_count()
        );
    }
    Ok(())
}

/// Poll until the outbound machine has drained its in-flight publish.
async fn wait_for_outbound_ready(store: &SessionStore, ctx: &InterpreterContext) -> Result<()> {
    for _ in 0..600 {
        if let Some(state) = store.get(ctx.session_id).await {
            if state.outbound != OutboundStatus::Busy {
                return Ok(());
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Err(anyhow!("timed out waiting for the publish to complete"))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Stats(args) => run_stats(args),
        Commands::List(args) => run_list(args),
        Commands::Export(args) => run_export(args),
        Commands::Review(args) => run_review(args).await,
    }
}
