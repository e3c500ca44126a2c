use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::models::{Fixture, HeadToHead, MatchesDocument, Player};

const BUNDLED_PLAYERS: &str = include_str!("../../data/players.json");
const BUNDLED_MATCHES: &str = include_str!("../../data/matches.json");

/// Read-only datasets, loaded once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub players: Vec<Player>,
    pub upcoming_matches: Vec<Fixture>,
    pub head_to_head: Vec<HeadToHead>,
}

impl Dataset {
    /// The documents compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_PLAYERS, BUNDLED_MATCHES)
    }

    pub fn from_json(players_json: &str, matches_json: &str) -> Result<Self> {
        let players: Vec<Player> =
            serde_json::from_str(players_json).context("Failed to parse players dataset")?;
        let matches: MatchesDocument =
            serde_json::from_str(matches_json).context("Failed to parse matches dataset")?;

        let dataset = Self {
            players,
            upcoming_matches: matches.upcoming_matches,
            head_to_head: matches.head_to_head_results,
        };
        dataset.validate()?;
        Ok(dataset)
    }

    /// Load using file overrides from the config, falling back to the bundled
    /// copy for whichever document has no override.
    pub async fn load(config: &Config) -> Result<Self> {
        let players = match &config.players_path {
            Some(path) => read_document(path).await?,
            None => BUNDLED_PLAYERS.to_string(),
        };
        let matches = match &config.matches_path {
            Some(path) => read_document(path).await?,
            None => BUNDLED_MATCHES.to_string(),
        };

        let dataset = Self::from_json(&players, &matches)?;
        tracing::info!(
            "Loaded {} players, {} fixtures, {} head-to-head records",
            dataset.players.len(),
            dataset.upcoming_matches.len(),
            dataset.head_to_head.len()
        );
        Ok(dataset)
    }

    fn validate(&self) -> Result<()> {
        let mut ranks = HashSet::new();
        for player in &self.players {
            if !ranks.insert(player.rank) {
                return Err(anyhow!("Duplicate player rank {} ({})", player.rank, player.name));
            }
            if !player.total_score.is_finite() || player.total_score < 0.0 {
                return Err(anyhow!(
                    "Player {} has invalid total score {}",
                    player.name,
                    player.total_score
                ));
            }
        }

        for record in &self.head_to_head {
            let decided =
                u64::from(record.team1_wins) + u64::from(record.team2_wins) + u64::from(record.ties);
            if decided > u64::from(record.matches_played) {
                return Err(anyhow!(
                    "Head-to-head {} vs {} records {} results from {} matches",
                    record.team1,
                    record.team2,
                    decided,
                    record.matches_played
                ));
            }
        }

        Ok(())
    }

    /// Every team name that appears in the players list or a fixture, sorted.
    pub fn team_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .players
            .iter()
            .map(|p| p.team.clone())
            .chain(
                self.upcoming_matches
                    .iter()
                    .flat_map(|m| [m.team1.clone(), m.team2.clone()]),
            )
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        names.sort();
        names
    }
}

async fn read_document(path: &Path) -> Result<String> {
    tracing::debug!("Reading dataset from {}", path.display());
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))
}
