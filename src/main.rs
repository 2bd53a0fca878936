use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use league_usage::display::output::{
    display_error, display_info, display_player_analysis, display_scrim_summary, display_success,
    display_warning,
};
use league_usage::rate_limit::{Cutoff, FixedDelay};
use league_usage::scrim::{load_scrims, summarize_scrims, ScrimSummary};
use league_usage::{
    analyze_players, Config, IdentityResolver, MatchCategory, PlayerHandle, RiotApiClient,
    UsageAggregator, UsageReport,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "League Usage")]
#[command(about = "Champion usage and win rates from recent matches, next to scrim statistics", long_about = None)]
struct Args {
    /// Riot IDs to analyse, e.g. "Hide on bush#KR1"
    #[arg(required = true)]
    players: Vec<String>,

    /// Queue to include; repeat for several (default: solo, flex and normal)
    #[arg(short, long = "queue", value_enum)]
    queues: Vec<MatchCategory>,

    /// Matches to analyse per queue
    #[arg(short, long, default_value = "15")]
    matches: usize,

    /// Platform region, overrides RIOT_REGION (e.g. kr, euw1, na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Pause between match detail requests in milliseconds, overrides RIOT_PACE_MS
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Stop fetching after this many seconds and show partial results
    #[arg(long)]
    deadline_secs: Option<i64>,

    /// Stop each player's analysis after this many API calls
    #[arg(long)]
    max_calls: Option<u32>,

    /// Scrim sheet to summarise alongside the API data (.xlsx/.xls workbook or CSV export)
    #[arg(long)]
    scrims: Option<PathBuf>,

    /// Rows to show per table
    #[arg(short, long, default_value = "10")]
    top_n: usize,

    /// Print results as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonPlayer<'a> {
    player: String,
    report: &'a UsageReport,
    error: Option<String>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    players: Vec<JsonPlayer<'a>>,
    scrims: Option<&'a ScrimSummary>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = Config::from_env()?;
    if let Some(region) = args.region {
        config.region = region.to_lowercase();
    }
    if let Some(pace_ms) = args.pace_ms {
        config.pace_ms = pace_ms;
    }

    let mut handles = Vec::new();
    for raw in args.players.iter().map(|p| p.trim()).filter(|p| !p.is_empty()) {
        match raw.parse::<PlayerHandle>() {
            Ok(handle) => handles.push(handle),
            Err(e) => display_warning(&format!("Skipping {}", e)),
        }
    }
    if handles.is_empty() {
        bail!("no valid Riot IDs given");
    }

    let categories = if args.queues.is_empty() {
        MatchCategory::ALL.to_vec()
    } else {
        MatchCategory::dedup(&args.queues)
    };

    let mut cutoff = match args.deadline_secs {
        Some(secs) => Cutoff::after(secs)?,
        None => Cutoff::none(),
    };
    if let Some(max_calls) = args.max_calls {
        cutoff = cutoff.with_max_calls(max_calls);
    }

    if !args.json {
        display_info(&format!(
            "Analysing {} player(s) in region {} ({} matches per queue: {})",
            handles.len(),
            config.region,
            args.matches,
            categories
                .iter()
                .map(|c| c.label())
                .collect::<Vec<_>>()
                .join(", ")
        ));
    }

    let progress = if args.json {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}") {
            pb.set_style(style);
        }
        pb.set_message("Fetching match details");
        pb
    };

    let client = RiotApiClient::new(config.clone());
    let resolver = IdentityResolver::new(&client);
    let mut aggregator = UsageAggregator::new(&client, FixedDelay::from_millis(config.pace_ms))
        .with_cutoff(cutoff)
        .with_progress(progress.clone());

    let results = analyze_players(&resolver, &mut aggregator, &handles, &categories, args.matches)?;
    progress.finish_and_clear();

    let scrims = match &args.scrims {
        Some(path) => {
            let records = load_scrims(path)
                .with_context(|| format!("failed to load scrim data from {}", path.display()))?;
            Some(summarize_scrims(&records))
        }
        None => None,
    };

    if args.json {
        let output = JsonOutput {
            players: results
                .iter()
                .map(|r| JsonPlayer {
                    player: r.handle.to_string(),
                    report: &r.report,
                    error: r.error.as_ref().map(|e| e.to_string()),
                })
                .collect(),
            scrims: scrims.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let succeeded = results.iter().filter(|r| r.error.is_none()).count();
    display_success(&format!("Analysed {}/{} players", succeeded, results.len()));

    for analysis in &results {
        display_player_analysis(analysis, args.top_n);
    }
    if let Some(summary) = &scrims {
        display_scrim_summary(summary, args.top_n);
    }

    Ok(())
}
