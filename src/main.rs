use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use toplist_resolver::assemble::Assembler;
use toplist_resolver::fixture::FixtureCatalog;
use toplist_resolver::models::{MatchOutcome, TrackRequest};
use toplist_resolver::progress::{format_duration, set_log_only, ResolveProgress};
use toplist_resolver::scoring::{MatchPolicy, DEFAULT_MAX_COST};

#[derive(Parser)]
#[command(name = "toplist-resolver")]
#[command(about = "Resolve a top list of (artist, title) pairs against a catalog fixture and assemble a playlist")]
struct Args {
    /// JSON array of {artist, title} requests, in list order
    requests: PathBuf,

    /// JSON fixture catalog (query -> candidates)
    catalog: PathBuf,

    /// Name of the playlist to create
    #[arg(long, default_value = "Toplist")]
    name: String,

    /// Catalog user that owns the new playlist
    #[arg(long, default_value = "local")]
    owner: String,

    /// Acceptance threshold for the edit-cost match test
    #[arg(long, default_value_t = DEFAULT_MAX_COST)]
    max_cost: u32,

    /// Resolve requests across a worker pool instead of sequentially
    #[arg(long)]
    parallel: bool,

    /// Thread pool size (0 = rayon default)
    #[arg(long, default_value = "0")]
    workers: usize,

    /// Hide progress output (tail-friendly logs only)
    #[arg(long)]
    log_only: bool,

    /// Write resolution stats JSON to this path
    #[arg(long)]
    stats_json: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_only(args.log_only);

    if args.workers > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.workers)
            .build_global()
            .context("Failed to set thread pool size")?;
    }

    let start = Instant::now();

    let raw = std::fs::read_to_string(&args.requests)
        .with_context(|| format!("Failed to read request list {}", args.requests.display()))?;
    let requests: Vec<TrackRequest> =
        serde_json::from_str(&raw).context("Failed to parse request list")?;
    println!("Loaded {} requests from {}", requests.len(), args.requests.display());

    let catalog = FixtureCatalog::from_path(&args.catalog)?;

    let policy = MatchPolicy {
        max_cost: args.max_cost,
    };
    let assembler = Assembler::new(&catalog, &catalog, policy).parallel(args.parallel);

    let progress = ResolveProgress::start(requests.len());
    let output = assembler
        .assemble(&args.name, &args.owner, &requests)
        .context("Failed to build the playlist")?;
    progress.finish(&output.stats);

    for (request, outcome) in requests.iter().zip(&output.outcomes) {
        if let MatchOutcome::Unresolved(reason) = outcome {
            eprintln!(
                "failed matching {} {} ({})",
                request.artist, request.title, reason
            );
        }
    }

    println!("\n{:=<60}", "");
    println!("Playlist assembled!");
    println!("  Playlist: {} ({})", output.playlist.name, output.playlist.id);
    println!(
        "  Tracks: {}/{} ({:.1}%)",
        output.playlist.track_ids.len(),
        requests.len(),
        output.stats.resolve_rate()
    );
    println!("  Elapsed: {}", format_duration(start.elapsed()));
    println!("{:=<60}", "");

    if let Some(path) = args.stats_json {
        output.stats.write_to_file(&path)?;
        println!("Stats written to {}", path.display());
    }
    if args.log_only {
        output.stats.log_phase("resolve");
    }

    Ok(())
}
