//! streamdash: command-line entry point for the streaming analytics dashboard.
//!
//! Usage:
//!   streamdash serve   --db catalog.db --bind 127.0.0.1:8501 [--config dash.json] [--ttl 3600]
//!   streamdash seed    --db catalog.db --seed 42 --listeners 200 --artists 30
//!   streamdash summary --db catalog.db [--json]

use anyhow::{bail, Context, Result};
use streamdash_core::{
    config::DashConfig,
    dashboard::{Dashboard, PROLIFIC_ALBUM_THRESHOLD},
    seed::{seed_catalog, SeedPlan},
    store::DashStore,
    web::{self, AppState},
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("serve");
    let config = load_config(&args)?;

    match command {
        "serve" => serve(config).await,
        "seed" => seed(&args, &config),
        "summary" => summary(&args, &config),
        other => bail!("unknown command {other:?} (expected serve, seed or summary)"),
    }
}

/// Config file (if given), then environment, then command-line flags.
fn load_config(args: &[String]) -> Result<DashConfig> {
    let mut config = match flag(args, "--config") {
        Some(path) => DashConfig::load(path)?.with_env(|key| env::var(key).ok()),
        None => DashConfig::from_env(),
    }
    .context("Invalid STREAMDASH_* environment")?;
    if let Some(db) = flag(args, "--db") {
        config.database_path = db.to_string();
    }
    if let Some(bind) = flag(args, "--bind") {
        config.bind_addr = bind.to_string();
    }
    if let Some(assets) = flag(args, "--assets") {
        config.assets_dir = assets.to_string();
    }
    config.cache_ttl_secs = parse_arg(args, "--ttl", config.cache_ttl_secs);
    config.validate()?;
    Ok(config)
}

async fn serve(config: DashConfig) -> Result<()> {
    println!("streamdash");
    println!("  db:        {}", config.database_path);
    println!("  bind:      {}", config.bind_addr);
    println!("  cache ttl: {}s", config.cache_ttl_secs);
    println!("  assets:    {}", config.assets_dir);
    println!();

    let dashboard = Dashboard::open(&config)
        .with_context(|| format!("Failed to open database {}", config.database_path))?;
    web::serve(AppState::new(dashboard), &config.bind_addr, &config.assets_dir)
        .await
        .with_context(|| format!("Server on {} failed", config.bind_addr))?;
    Ok(())
}

fn seed(args: &[String], config: &DashConfig) -> Result<()> {
    let defaults = SeedPlan::default();
    let plan = SeedPlan {
        seed: parse_arg(args, "--seed", defaults.seed),
        listeners: parse_arg(args, "--listeners", defaults.listeners),
        artists: parse_arg(args, "--artists", defaults.artists),
    };

    let store = DashStore::open(&config.database_path)?;
    store.migrate()?;
    let summary = seed_catalog(&store, plan)?;

    println!("=== SEED SUMMARY ===");
    println!("  db:        {}", config.database_path);
    println!("  seed:      {}", plan.seed);
    println!("  accounts:  {}", summary.accounts);
    println!("  artists:   {}", summary.artists);
    println!("  albums:    {}", summary.albums);
    println!("  songs:     {}", summary.songs);
    println!("  podcasts:  {}", summary.podcasts);
    println!("  episodes:  {}", summary.episodes);
    println!("  plays:     {} listener/song rows", summary.song_play_rows);
    Ok(())
}

fn summary(args: &[String], config: &DashConfig) -> Result<()> {
    let dashboard = Dashboard::open(config)?;
    let report = dashboard.overview();
    if args.iter().any(|a| a == "--json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    let t = &report.totals;

    println!("=== CATALOG ===");
    println!("  songs:     {}", t.songs);
    println!("  artists:   {}", t.artists);
    println!("  albums:    {}", t.albums);
    println!("  podcasts:  {}", t.podcasts);
    println!("  episodes:  {}", t.episodes);
    println!();
    println!("=== TOP SONGS ===");
    if report.top_songs.is_empty() {
        println!("  (no plays recorded)");
    }
    for (rank, s) in report.top_songs.iter().enumerate() {
        println!("  {}. {} ({}) | {} plays", rank + 1, s.song, s.album, s.total_plays);
    }
    println!();
    match &report.most_followed_artist {
        Some(a) => println!("Most followed artist: {} ({} followers)", a.name, a.count),
        None => println!("Most followed artist: N/A"),
    }
    println!(
        "Artists with more than {PROLIFIC_ALBUM_THRESHOLD} albums: {}",
        report.prolific_album_artists.join(", ")
    );
    Ok(())
}

fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
