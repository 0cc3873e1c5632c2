//! Named player profiles: which strategy a seat uses and how it is seeded.
//! Loaded from TOML at runtime by both CLIs.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::bot_strategy::{Player, StrategyKind};

/// A named player profile.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerProfile {
    pub description: Option<String>,
    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,
    /// Fixed seed for strategies that draw random numbers.
    pub seed: Option<u64>,
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Random
}

impl PlayerProfile {
    pub fn new(strategy: StrategyKind) -> Self {
        Self {
            description: None,
            strategy,
            seed: None,
        }
    }

    /// Build a player seated as `name`. `seed` is used when the profile has none.
    pub fn build(&self, name: &str, seed: Option<u64>) -> Box<dyn Player> {
        self.strategy.build(name, self.seed.or(seed))
    }
}

/// Top-level TOML file structure.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlayerProfilesFile {
    #[serde(default)]
    pub profiles: BTreeMap<String, PlayerProfile>,
}

impl PlayerProfilesFile {
    /// Profiles every installation has, even without a file.
    pub fn builtin() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("random".to_string(), PlayerProfile::new(StrategyKind::Random));
        profiles.insert("exhaustive".to_string(), PlayerProfile::new(StrategyKind::Exhaustive));
        Self { profiles }
    }

    /// Look up a profile by name. Built-in names resolve even when the file
    /// does not define them.
    pub fn get(&self, name: &str) -> Option<PlayerProfile> {
        self.profiles.get(name).cloned().or_else(|| {
            name.parse::<StrategyKind>().ok().map(PlayerProfile::new)
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}

/// Load profiles from a TOML file at the given path.
pub fn load_profiles(path: &Path) -> Result<PlayerProfilesFile, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    parse_profiles(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}

pub fn parse_profiles(content: &str) -> Result<PlayerProfilesFile, toml::de::Error> {
    toml::from_str(content)
}

/// Try to load profiles from well-known paths, returning the built-ins if none found.
pub fn load_default_profiles() -> PlayerProfilesFile {
    let candidates = [
        "player_profiles.toml",
        "../player_profiles.toml",
        "/etc/meeple/player_profiles.toml",
    ];
    for path in &candidates {
        let p = Path::new(path);
        if p.exists() {
            match load_profiles(p) {
                Ok(profiles) => {
                    tracing::info!(path = %p.display(), count = profiles.profiles.len(), "loaded player profiles");
                    return profiles;
                }
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "failed to load player profiles");
                }
            }
        }
    }
    tracing::info!("no player_profiles.toml found, using built-in defaults");
    PlayerProfilesFile::builtin()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"
[profiles.lucky]
description = "Random placement with a fixed seed"
strategy = "random"
seed = 7

[profiles.greedy]
strategy = "exhaustive"

[profiles.plain]
"#;

    #[test]
    fn test_parse_profiles() {
        let file = parse_profiles(SAMPLE).unwrap();
        assert_eq!(file.names(), vec!["greedy", "lucky", "plain"]);

        let lucky = &file.profiles["lucky"];
        assert_eq!(lucky.strategy, StrategyKind::Random);
        assert_eq!(lucky.seed, Some(7));
        assert!(lucky.description.is_some());

        assert_eq!(file.profiles["greedy"].strategy, StrategyKind::Exhaustive);
        assert_eq!(file.profiles["plain"], PlayerProfile::new(StrategyKind::Random));
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(parse_profiles("[profiles.x]\nstrategy = \"mcts\"\n").is_err());
    }

    #[test]
    fn test_get_falls_back_to_builtin_names() {
        let file = parse_profiles(SAMPLE).unwrap();
        assert_eq!(file.get("exhaustive"), Some(PlayerProfile::new(StrategyKind::Exhaustive)));
        assert_eq!(file.get("lucky").and_then(|p| p.seed), Some(7));
        assert_eq!(file.get("nobody"), None);
    }

    #[test]
    fn test_profile_seed_wins_over_caller_seed() {
        let file = parse_profiles(SAMPLE).unwrap();
        let map = crate::games::carcassonne::board::Map::new("R:R:R:R:G".parse().unwrap());
        let tile = "R:G:G:G:G".parse().unwrap();

        let mut a = file.profiles["lucky"].build("a", Some(1));
        let mut b = file.profiles["lucky"].build("b", Some(2));
        assert_eq!(a.name(), "a");
        assert_eq!(a.play_turn(&map, &tile), b.play_turn(&map, &tile));
    }

    #[test]
    fn test_load_profiles_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let loaded = load_profiles(file.path()).unwrap();
        assert_eq!(loaded.profiles.len(), 3);
    }

    #[test]
    fn test_load_profiles_missing_file() {
        let err = load_profiles(Path::new("/nonexistent/player_profiles.toml")).unwrap_err();
        assert!(err.starts_with("Failed to read"));
    }
}
