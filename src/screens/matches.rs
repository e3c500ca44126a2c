use chrono::NaiveDate;

use super::{Action, ListItem, Navigation};
use crate::data::Dataset;
use crate::error::AppError;
use crate::models::Fixture;
use crate::services::{head_to_head_lookup, match_prediction, players_by_score};

const TOP_PLAYERS: usize = 10;

/// Upcoming fixtures, with an optional fixture opened in detail.
#[derive(Debug)]
pub struct MatchesScreen<'a> {
    dataset: &'a Dataset,
    selected: Option<Fixture>,
}

impl<'a> MatchesScreen<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&Fixture> {
        self.selected.as_ref()
    }

    pub fn select(&mut self, index: usize) -> Result<&Fixture, AppError> {
        let fixture = self
            .dataset
            .upcoming_matches
            .get(index)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("fixture {}", index)))?;
        Ok(&*self.selected.insert(fixture))
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    /// Rows for whatever is on screen: the detail when a fixture is open,
    /// otherwise the schedule.
    pub fn items(&self) -> Vec<ListItem> {
        match &self.selected {
            Some(fixture) => detail_items(self.dataset, fixture),
            None => schedule_items(&self.dataset.upcoming_matches),
        }
    }

    pub fn press(&mut self, action: &Action) -> Navigation {
        self.close();
        match action {
            Action::FullTeamAnalysis { team1, team2 } => Navigation::TeamComparison {
                team1: team1.clone(),
                team2: team2.clone(),
            },
            Action::Close => Navigation::Stay,
        }
    }
}

/// Fixtures in dataset order, with a date header each time the date changes.
pub fn schedule_items(fixtures: &[Fixture]) -> Vec<ListItem> {
    let mut items = Vec::with_capacity(fixtures.len() * 2);
    let mut current_date: Option<&str> = None;

    for fixture in fixtures {
        if current_date != Some(fixture.date.as_str()) {
            items.push(ListItem::DateHeader {
                date: display_date(&fixture.date),
            });
            current_date = Some(fixture.date.as_str());
        }
        items.push(ListItem::Match(fixture.clone()));
    }

    items
}

pub fn detail_items(dataset: &Dataset, fixture: &Fixture) -> Vec<ListItem> {
    let (team1, team2) = (fixture.team1.as_str(), fixture.team2.as_str());
    let mut items = vec![ListItem::SectionHeader {
        title: format!("{} vs {}", team1, team2),
    }];

    if let Some(record) = head_to_head_lookup(&dataset.head_to_head, team1, team2) {
        items.push(ListItem::HeadToHead(record.clone()));
    }

    items.push(ListItem::SectionHeader {
        title: "Match Prediction".to_string(),
    });
    items.push(ListItem::Prediction {
        text: match_prediction(&dataset.head_to_head, team1, team2),
    });

    items.push(ListItem::SectionHeader {
        title: "Top Players".to_string(),
    });
    items.extend(
        players_by_score(&dataset.players, &[team1, team2])
            .into_iter()
            .take(TOP_PLAYERS)
            .map(ListItem::player_row),
    );

    items.push(ListItem::ActionButton {
        label: "Full Team Analysis".to_string(),
        action: Action::FullTeamAnalysis {
            team1: team1.to_string(),
            team2: team2.to_string(),
        },
    });
    items.push(ListItem::ActionButton {
        label: "Close".to_string(),
        action: Action::Close,
    });

    items
}

/// "2025-03-22" becomes "Sat, 22 Mar 2025"; anything else is shown as stored.
fn display_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%a, %d %b %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
