use std::env;
use std::path::PathBuf;

pub const DEFAULT_PREDICTION_API_URL: &str = "https://sfe-backend-predict.onrender.com";
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Runtime settings, read once from the environment after `.env` is loaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub prediction_api_url: String,
    pub gemini_api_url: String,
    /// Only ever held server side; the `/ask` endpoint is the proxy.
    pub gemini_api_key: Option<String>,
    pub players_path: Option<PathBuf>,
    pub matches_path: Option<PathBuf>,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            prediction_api_url: env::var("PREDICTION_API_URL")
                .unwrap_or_else(|_| DEFAULT_PREDICTION_API_URL.to_string()),
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            players_path: non_empty_var("PLAYERS_DATA_PATH").map(PathBuf::from),
            matches_path: non_empty_var("MATCHES_DATA_PATH").map(PathBuf::from),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prediction_api_url: DEFAULT_PREDICTION_API_URL.to_string(),
            gemini_api_url: DEFAULT_GEMINI_API_URL.to_string(),
            gemini_api_key: None,
            players_path: None,
            matches_path: None,
            port: 3000,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
