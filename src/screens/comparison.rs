use serde::Serialize;

use crate::error::NOT_AVAILABLE;
use crate::models::{Player, TeamSummary};
use crate::services::{players_by_score, team_summary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamColumn {
    pub team: String,
    pub summary: TeamSummary,
    pub total_label: String,
    pub average_label: String,
    pub top_player_label: String,
}

impl TeamColumn {
    fn new(players: &[Player], team: &str) -> Self {
        let summary = team_summary(players, team);
        Self {
            team: team.to_string(),
            total_label: format!("Total MVP: {:.2}", summary.total_score),
            average_label: format!("Average MVP: {:.2}", summary.average_score),
            top_player_label: format!(
                "Top Player: {}",
                summary.top_player.as_ref().map_or(NOT_AVAILABLE, |p| p.name.as_str())
            ),
            summary,
        }
    }
}

/// Side-by-side summary of two teams plus both rosters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComparison {
    pub team1: TeamColumn,
    pub team2: TeamColumn,
    /// Team 1's players by score, followed by team 2's.
    pub players: Vec<Player>,
}

impl TeamComparison {
    pub fn build(players: &[Player], team1: &str, team2: &str) -> Self {
        let roster = players_by_score(players, &[team1])
            .into_iter()
            .chain(players_by_score(players, &[team2]))
            .cloned()
            .collect();

        Self {
            team1: TeamColumn::new(players, team1),
            team2: TeamColumn::new(players, team2),
            players: roster,
        }
    }
}
