use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(rename = "Player")]
    pub name: String,
    #[serde(rename = "Team")]
    pub team: String,
    #[serde(rename = "Rank")]
    pub rank: u32,
    #[serde(rename = "Total MVP", default)]
    pub total_score: f64, // MVP points, opaque aggregate
    #[serde(rename = "Photo URL", default)]
    pub photo_ref: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub team1: String,
    pub team2: String,
    pub date: String,
    pub time: String,
    pub venue: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub team1: String,
    pub team2: String,
    #[serde(rename = "matches")]
    pub matches_played: u32,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub ties: u32,
}

impl HeadToHead {
    /// True when the record is keyed on the same two teams, in either order.
    pub fn involves(&self, team_a: &str, team_b: &str) -> bool {
        (self.team1 == team_a && self.team2 == team_b)
            || (self.team1 == team_b && self.team2 == team_a)
    }
}

/// Shape of the bundled matches document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchesDocument {
    #[serde(default)]
    pub upcoming_matches: Vec<Fixture>,
    #[serde(default)]
    pub head_to_head_results: Vec<HeadToHead>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    pub target: u32,
    pub current_score: u32,
    pub wickets_left: u32,
    pub balls_left: u32,
}

/// Returned by the remote prediction service; forwarded as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub batting_team: String,
    pub bowling_team: String,
    #[serde(rename = "batting_prob")]
    pub batting_win_probability: f64,
    #[serde(rename = "bowling_prob")]
    pub bowling_win_probability: f64,
    #[serde(default)]
    pub batting_impact: f64,
    #[serde(default)]
    pub bowling_impact: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSummary {
    pub team: String,
    pub player_count: usize,
    pub total_score: f64,
    pub average_score: f64,
    pub top_player: Option<Player>,
}

// API Response types
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: Utc::now(),
        }
    }
}
