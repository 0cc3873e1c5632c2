use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use meeple_tiles::engine::bot_profiles::{load_default_profiles, load_profiles};
use meeple_tiles::engine::bot_strategy::Player;
use meeple_tiles::engine::simulator::Game;
use meeple_tiles::games::carcassonne::render::TextRenderer;
use meeple_tiles::games::carcassonne::tile_source::{CatalogTileSource, IniTileSource, TileSource};

#[derive(Parser)]
#[command(name = "meeple-tiles", about = "Play a tile-placement game between bots")]
struct Cli {
    /// Tile set in ini format (default: built-in 72-tile catalog)
    #[arg(long, env = "MEEPLE_TILES_FILE")]
    tiles: Option<PathBuf>,

    /// Path to player_profiles.toml (default: auto-discover)
    #[arg(long, env = "MEEPLE_PLAYER_PROFILES")]
    profiles: Option<PathBuf>,

    /// Profile name for each seat, in seat order
    #[arg(long, value_delimiter = ',', default_value = "random,exhaustive")]
    players: Vec<String>,

    /// Seed for the bag shuffle and unseeded random players
    #[arg(long, env = "MEEPLE_SEED")]
    seed: Option<u64>,

    /// Print the final board
    #[arg(long)]
    render: bool,

    /// Print the game summary as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let profiles = match cli.profiles {
        Some(ref path) => load_profiles(path).map_err(|e| format!("Failed to load profiles: {}", e))?,
        None => load_default_profiles(),
    };

    let source: Box<dyn TileSource> = match cli.tiles {
        Some(path) => Box::new(IniTileSource::new(path)),
        None => Box::new(CatalogTileSource),
    };

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, players = ?cli.players, "starting game");

    let mut players: Vec<Box<dyn Player>> = Vec::with_capacity(cli.players.len());
    for (seat, name) in cli.players.iter().enumerate() {
        let profile = profiles.get(name).ok_or_else(|| {
            format!("profile '{}' not found (available: {:?})", name, profiles.names())
        })?;
        let seat_name = if cli.players[..seat].contains(name) {
            format!("{}#{}", name, seat + 1)
        } else {
            name.clone()
        };
        players.push(profile.build(&seat_name, Some(seed.wrapping_add(seat as u64 + 1))));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new(source.as_ref(), players, &mut rng)?;
    let summary = game.run();

    if cli.render {
        print!("{}", TextRenderer::new().render(game.map()));
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Game over after {} turns ({} skipped, {} tiles on the board)",
            summary.turns, summary.skipped_turns, summary.tiles_placed
        );
        for score in &summary.scores {
            let marker = if summary.winners.contains(&score.player_id) { "*" } else { " " };
            println!(" {} {:>16}: {}", marker, score.player_id, score.score());
        }
    }

    Ok(())
}
