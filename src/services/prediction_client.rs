use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::models::{PredictionRequest, PredictionResult};

/// Client for the remote win-probability service.
///
/// Every call is a single round trip. There is no retry, caching or backoff;
/// a failure comes back as [`AppError::Network`] and the caller decides
/// whether to offer another attempt.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
}

impl PredictionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_teams(&self) -> Result<Vec<String>, AppError> {
        self.get_json("teams").await
    }

    pub async fn list_venues(&self) -> Result<Vec<String>, AppError> {
        self.get_json("venues").await
    }

    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, AppError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!("POST {} {:?}", url, request);

        let response = self.client.post(&url).json(request).send().await?;
        let result: PredictionResult = decode(response, &url).await?;

        tracing::info!(
            "Prediction for {} vs {}: batting {:.3}, bowling {:.3}",
            result.batting_team,
            result.bowling_team,
            result.batting_win_probability,
            result.bowling_win_probability
        );
        Ok(result)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        decode(response, &url).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response, url: &str) -> Result<T, AppError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!("{} returned {}: {}", url, status, body);
        return Err(AppError::Network {
            status: Some(status.as_u16()),
            message: body,
        });
    }

    response.json::<T>().await.map_err(|e| {
        tracing::warn!("Malformed response from {}: {}", url, e);
        AppError::Network {
            status: Some(status.as_u16()),
            message: format!("malformed response: {}", e),
        }
    })
}
