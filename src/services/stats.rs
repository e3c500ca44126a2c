use crate::error::NOT_ENOUGH_DATA;
use crate::models::{HeadToHead, Player, TeamSummary};

pub const TOO_CLOSE_TO_CALL: &str = "It's too close to call! Both teams have equal chances.";

/// Total, average and top scorer for one team. Team names match exactly.
pub fn team_summary(players: &[Player], team_name: &str) -> TeamSummary {
    let mut total_score = 0.0;
    let mut player_count = 0usize;
    let mut top_player: Option<&Player> = None;

    for player in players.iter().filter(|p| p.team == team_name) {
        total_score += player.total_score;
        player_count += 1;
        // Strict comparison keeps the first player seen on a tie.
        if top_player.map_or(true, |top| player.total_score > top.total_score) {
            top_player = Some(player);
        }
    }

    let average_score = if player_count == 0 {
        0.0
    } else {
        total_score / player_count as f64
    };

    TeamSummary {
        team: team_name.to_string(),
        player_count,
        total_score,
        average_score,
        top_player: top_player.cloned(),
    }
}

/// Find the record for a pair of teams regardless of the order it was stored in.
pub fn head_to_head_lookup<'a>(
    records: &'a [HeadToHead],
    team_a: &str,
    team_b: &str,
) -> Option<&'a HeadToHead> {
    records.iter().find(|r| r.involves(team_a, team_b))
}

/// One-line verdict from historical win rates.
pub fn win_likelihood(record: &HeadToHead) -> String {
    if record.matches_played == 0 {
        return NOT_ENOUGH_DATA.to_string();
    }

    let matches = record.matches_played as f64;
    let team1_rate = record.team1_wins as f64 / matches;
    let team2_rate = record.team2_wins as f64 / matches;

    if team1_rate > team2_rate {
        format!("{} is likely to win ({:.2}% chance)", record.team1, team1_rate * 100.0)
    } else if team2_rate > team1_rate {
        format!("{} is likely to win ({:.2}% chance)", record.team2, team2_rate * 100.0)
    } else {
        TOO_CLOSE_TO_CALL.to_string()
    }
}

/// Lookup plus verdict; a missing record reads as "not enough data".
pub fn match_prediction(records: &[HeadToHead], team_a: &str, team_b: &str) -> String {
    head_to_head_lookup(records, team_a, team_b)
        .map(win_likelihood)
        .unwrap_or_else(|| NOT_ENOUGH_DATA.to_string())
}

/// Scale two non-negative weights to percentages that sum to 100.
///
/// Non-finite or negative inputs count as zero. When nothing is left the
/// split is even rather than NaN.
pub fn normalize_to_percentages(a: f64, b: f64) -> (f64, f64) {
    let a = sanitize(a);
    let b = sanitize(b);
    let total = a + b;
    if total <= 0.0 {
        return (50.0, 50.0);
    }
    (a / total * 100.0, b / total * 100.0)
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Players from any of `teams`, highest score first. Equal scores keep
/// dataset order.
pub fn players_by_score<'a>(players: &'a [Player], teams: &[&str]) -> Vec<&'a Player> {
    let mut selected: Vec<&Player> = players
        .iter()
        .filter(|p| teams.contains(&p.team.as_str()))
        .collect();
    selected.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
    selected
}

/// Case-insensitive substring search on player name.
pub fn search_players<'a>(players: &'a [Player], query: &str) -> Vec<&'a Player> {
    let needle = query.trim().to_lowercase();
    players
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .collect()
}
