use serde::{Deserialize, Deserializer, Serialize};

use super::ResultView;
use crate::error::AppError;
use crate::models::PredictionRequest;
use crate::services::PredictionClient;

pub const MAX_WICKETS: u32 = 10;
/// Twenty overs of six balls.
pub const MAX_BALLS: u32 = 120;

/// Raw form fields exactly as typed or picked. Numeric fields also accept
/// JSON numbers; validation still happens in `validate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionForm {
    pub batting_team: String,
    pub bowling_team: String,
    pub venue: String,
    #[serde(deserialize_with = "string_or_number")]
    pub target: String,
    #[serde(deserialize_with = "string_or_number")]
    pub current_score: String,
    #[serde(deserialize_with = "string_or_number")]
    pub wickets_left: String,
    #[serde(deserialize_with = "string_or_number")]
    pub balls_left: String,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(n) => n.to_string(),
    })
}

impl PredictionForm {
    /// Check every field and build the request. `teams` and `venues` are the
    /// lists loaded from the service; empty lists skip the membership check.
    pub fn validate(&self, teams: &[String], venues: &[String]) -> Result<PredictionRequest, AppError> {
        let batting_team = required("batting_team", &self.batting_team)?;
        let bowling_team = required("bowling_team", &self.bowling_team)?;
        let venue = required("venue", &self.venue)?;

        if batting_team == bowling_team {
            return Err(AppError::validation("bowling_team", "must differ from the batting team"));
        }
        one_of("batting_team", &batting_team, teams)?;
        one_of("bowling_team", &bowling_team, teams)?;
        one_of("venue", &venue, venues)?;

        let wickets_left = count("wickets_left", &self.wickets_left)?;
        if wickets_left > MAX_WICKETS {
            return Err(AppError::validation(
                "wickets_left",
                format!("must be between 0 and {}", MAX_WICKETS),
            ));
        }
        let balls_left = count("balls_left", &self.balls_left)?;
        if balls_left > MAX_BALLS {
            return Err(AppError::validation(
                "balls_left",
                format!("must be between 0 and {}", MAX_BALLS),
            ));
        }

        Ok(PredictionRequest {
            batting_team,
            bowling_team,
            venue,
            target: count("target", &self.target)?,
            current_score: count("current_score", &self.current_score)?,
            wickets_left,
            balls_left,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(field, "is required"));
    }
    Ok(value.to_string())
}

fn one_of(field: &'static str, value: &str, allowed: &[String]) -> Result<(), AppError> {
    if allowed.is_empty() || allowed.iter().any(|a| a == value) {
        Ok(())
    } else {
        Err(AppError::validation(field, format!("'{}' is not a known option", value)))
    }
}

fn count(field: &'static str, value: &str) -> Result<u32, AppError> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| AppError::validation(field, format!("'{}' is not a non-negative whole number", value.trim())))
}

/// Prediction form state: the picker options and the fields filled so far.
#[derive(Debug, Default)]
pub struct PredictScreen {
    pub teams: Vec<String>,
    pub venues: Vec<String>,
    pub form: PredictionForm,
}

impl PredictScreen {
    /// Fetch picker options. A failure leaves the lists empty so the form
    /// still works with free text.
    pub async fn load(client: &PredictionClient) -> Self {
        let teams = client.list_teams().await.unwrap_or_else(|e| {
            tracing::warn!("Could not load teams: {}", e);
            Vec::new()
        });
        let venues = client.list_venues().await.unwrap_or_else(|e| {
            tracing::warn!("Could not load venues: {}", e);
            Vec::new()
        });

        Self {
            teams,
            venues,
            form: PredictionForm::default(),
        }
    }

    pub async fn submit(&self, client: &PredictionClient) -> Result<ResultView, AppError> {
        let request = self.form.validate(&self.teams, &self.venues)?;
        let result = client.predict(&request).await?;
        Ok(ResultView::from(&result))
    }
}
