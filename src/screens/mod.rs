//! Per-screen state and the rows each screen renders.
//!
//! Nothing here is global: a front-end builds a screen value, feeds it input,
//! and reads back [`ListItem`]s or a view struct.

pub mod comparison;
pub mod guru;
pub mod matches;
pub mod players;
pub mod predict;
pub mod result;

pub use comparison::*;
pub use guru::*;
pub use matches::*;
pub use players::*;
pub use predict::*;
pub use result::*;

use serde::Serialize;

use crate::models::{Fixture, HeadToHead, Player};

/// One renderable row. Front-ends match on this exhaustively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ListItem {
    Match(Fixture),
    DateHeader { date: String },
    SectionHeader { title: String },
    HeadToHead(HeadToHead),
    PlayerRow { name: String, team: String, score: f64 },
    Prediction { text: String },
    ActionButton { label: String, action: Action },
}

impl ListItem {
    pub fn player_row(player: &Player) -> Self {
        ListItem::PlayerRow {
            name: player.name.clone(),
            team: player.team.clone(),
            score: player.total_score,
        }
    }

    /// Plain-text rendering used by the CLI.
    pub fn to_line(&self) -> String {
        match self {
            ListItem::Match(m) => format!("{} vs {}  {} {}  @ {}", m.team1, m.team2, m.date, m.time, m.venue),
            ListItem::DateHeader { date } => format!("📅 {}", date),
            ListItem::SectionHeader { title } => format!("== {} ==", title),
            ListItem::HeadToHead(h) => format!(
                "Matches: {} | {} Wins: {} | {} Wins: {} | Ties: {}",
                h.matches_played, h.team1, h.team1_wins, h.team2, h.team2_wins, h.ties
            ),
            ListItem::PlayerRow { name, score, .. } => format!("   {:<24} Total MVP: {}", name, score),
            ListItem::Prediction { text } => format!("🔮 {}", text),
            ListItem::ActionButton { label, .. } => format!("[ {} ]", label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    FullTeamAnalysis { team1: String, team2: String },
    Close,
}

/// Where the front-end should go after an action.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Navigation {
    TeamComparison { team1: String, team2: String },
    Stay,
}
