use serde::Serialize;

use crate::models::PredictionResult;
use crate::services::normalize_to_percentages;

/// What the result screen shows for one prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultView {
    pub batting_team: String,
    pub bowling_team: String,
    pub batting_pct: f64,
    pub bowling_pct: f64,
    pub batting_impact: f64,
    pub bowling_impact: f64,
    pub legend: [String; 2],
}

impl From<&PredictionResult> for ResultView {
    fn from(result: &PredictionResult) -> Self {
        let (batting_pct, bowling_pct) = normalize_to_percentages(
            result.batting_win_probability,
            result.bowling_win_probability,
        );

        Self {
            legend: [
                format!("{} Win: {:.2}%", result.batting_team, batting_pct),
                format!("{} Win: {:.2}%", result.bowling_team, bowling_pct),
            ],
            batting_team: result.batting_team.clone(),
            bowling_team: result.bowling_team.clone(),
            batting_pct,
            bowling_pct,
            batting_impact: result.batting_impact,
            bowling_impact: result.bowling_impact,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(batting: f64, bowling: f64) -> PredictionResult {
        PredictionResult {
            batting_team: "Mumbai Indians".into(),
            bowling_team: "Punjab Kings".into(),
            batting_win_probability: batting,
            bowling_win_probability: bowling,
            batting_impact: 0.0,
            bowling_impact: 0.0,
        }
    }

    #[test]
    fn test_legend_uses_normalized_percentages() {
        let view = ResultView::from(&result(0.6, 0.4));
        assert_eq!(view.legend[0], "Mumbai Indians Win: 60.00%");
        assert_eq!(view.legend[1], "Punjab Kings Win: 40.00%");
    }

    #[test]
    fn test_unnormalized_input() {
        let view = ResultView::from(&result(30.0, 90.0));
        assert!((view.batting_pct - 25.0).abs() < 1e-9);
        assert!((view.bowling_pct - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_probabilities_do_not_produce_nan() {
        let view = ResultView::from(&result(0.0, 0.0));
        assert_eq!(view.legend[0], "Mumbai Indians Win: 50.00%");
        assert!(!view.bowling_pct.is_nan());
    }
}
