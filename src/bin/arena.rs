//! Arena CLI: run bot-vs-bot experiments from the command line.
//!
//! Usage:
//!   cargo run --release --bin arena -- --games 100 --p1-profile exhaustive --p2-profile random
//!   cargo run --release --bin arena -- --games 50 --tiles my_tiles.ini --json

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use meeple_tiles::engine::arena::{run_arena, ArenaConfig};
use meeple_tiles::engine::bot_profiles::{load_default_profiles, load_profiles, PlayerProfile, PlayerProfilesFile};
use meeple_tiles::games::carcassonne::tile_source::{CatalogTileSource, IniTileSource, TileSource};

#[derive(Parser)]
#[command(name = "arena", about = "Run bot-vs-bot arena experiments")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "100")]
    games: usize,

    /// Base seed; game i uses seed + i
    #[arg(long, default_value = "42", env = "MEEPLE_SEED")]
    seed: u64,

    /// Alternate seat positions between games
    #[arg(long, default_value = "true")]
    alternate_seats: bool,

    /// Path to player_profiles.toml
    #[arg(long, env = "MEEPLE_PLAYER_PROFILES")]
    profiles: Option<PathBuf>,

    /// Tile set in ini format (default: built-in catalog)
    #[arg(long, env = "MEEPLE_TILES_FILE")]
    tiles: Option<PathBuf>,

    /// P1 display name (defaults to the profile name)
    #[arg(long)]
    p1_name: Option<String>,

    /// P1 profile name
    #[arg(long, default_value = "exhaustive")]
    p1_profile: String,

    /// P2 display name (defaults to the profile name)
    #[arg(long)]
    p2_name: Option<String>,

    /// P2 profile name
    #[arg(long, default_value = "random")]
    p2_profile: String,

    /// Print results as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn entrant(
    profiles: &PlayerProfilesFile,
    profile_name: &str,
    display_name: Option<&str>,
) -> Result<(String, PlayerProfile), String> {
    let profile = profiles.get(profile_name).ok_or_else(|| {
        format!(
            "profile '{}' not found in player_profiles.toml (available: {:?})",
            profile_name,
            profiles.names()
        )
    })?;
    Ok((display_name.unwrap_or(profile_name).to_string(), profile))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match &cli.profiles {
        Some(path) => load_profiles(path)?,
        None => load_default_profiles(),
    };

    let mut p1 = entrant(&profiles, &cli.p1_profile, cli.p1_name.as_deref())?;
    let p2 = entrant(&profiles, &cli.p2_profile, cli.p2_name.as_deref())?;
    if p1.0 == p2.0 {
        p1.0.push_str("_1");
    }

    let tiles = match &cli.tiles {
        Some(path) => IniTileSource::new(path).find_all()?,
        None => CatalogTileSource.find_all()?,
    };

    eprintln!(
        "Arena: {} games, {} tiles, seed={}, alternate_seats={}",
        cli.games,
        tiles.len(),
        cli.seed,
        cli.alternate_seats
    );
    for (name, profile) in [&p1, &p2] {
        eprintln!(
            "  {}: strategy={:?}, seed={:?}{}",
            name,
            profile.strategy,
            profile.seed,
            profile.description.as_deref().map(|d| format!(" ({})", d)).unwrap_or_default(),
        );
    }

    let config = ArenaConfig {
        num_games: cli.games,
        base_seed: cli.seed,
        alternate_seats: cli.alternate_seats,
    };
    let result = run_arena(&tiles, &[p1, p2], config)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.summary());
    }
    Ok(())
}
