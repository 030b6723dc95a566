use anyhow::{Context, Result};
use clap::Parser;
use serde_json::to_string_pretty;
use std::path::PathBuf;
use tracing::info;

use waitlist_pusher::batch::BatchRunner;
use waitlist_pusher::config::{self, Config};
use waitlist_pusher::loader;
use waitlist_pusher::sample;
use waitlist_pusher::supabase::{SupabaseClient, WaitlistService};

#[derive(Debug, Parser)]
#[command(author, version, about = "Push data to the waitlist table")]
struct Args {
    /// Backend project URL
    #[arg(long, env = "WAITLIST_URL", required_unless_present = "config")]
    url: Option<String>,

    /// Backend API key (sent as `apikey` and as a Bearer token)
    #[arg(long, env = "WAITLIST_KEY", hide_env_values = true, required_unless_present = "config")]
    key: Option<String>,

    /// Number of sample entries to generate
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Path to JSON file with waitlist data
    #[arg(long)]
    json: Option<PathBuf>,

    /// Just show the current count
    #[arg(long)]
    count_only: bool,

    /// Optional YAML config file (backend settings and pacing)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Delay between inserts in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the payloads that would be sent instead of sending them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let args = Args::parse();
    let base = match &args.config {
        Some(path) => config::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => Config::default(),
    };
    let cfg = base.with_overrides(args.url.clone(), args.key.clone(), args.delay_ms)?;

    let client = SupabaseClient::from_config(&cfg)?;
    let runner = BatchRunner::new(cfg.pacing_delay());
    info!(?client, pacing_ms = cfg.app.pacing_delay_ms, "configured");

    if args.count_only {
        let count = client.count().await;
        println!("Current waitlist count: {}", count);
        return Ok(());
    }

    if args.dry_run {
        let entries = match &args.json {
            Some(path) => loader::load_entries(path).await?,
            None => sample::generate_sample_data(args.count),
        };
        for (i, entry) in entries.iter().enumerate() {
            println!(
                "\n[entry {}/{}] insert payload\n{}",
                i + 1,
                entries.len(),
                to_string_pretty(&entry.to_payload())?
            );
        }
        return Ok(());
    }

    match &args.json {
        Some(path) => {
            println!("Loading data from {}...", path.display());
            loader::push_from_json(path, &client, &runner).await;
        }
        None => {
            println!("Generating {} sample entries...", args.count);
            let entries = sample::generate_sample_data(args.count);
            runner.run(&client, &entries).await;
        }
    }

    let final_count = client.count().await;
    println!("Final waitlist count: {}", final_count);
    Ok(())
}
