use thiserror::Error;

/// Placeholder shown when a head-to-head prediction has nothing to work from.
pub const NOT_ENOUGH_DATA: &str = "Not enough data for prediction";

/// Placeholder for a missing value in a summary column.
pub const NOT_AVAILABLE: &str = "N/A";

/// Failures that reach a screen. None of them are fatal; each one renders as
/// a message the user can act on.
#[derive(Debug, Error)]
pub enum AppError {
    /// Transport failure or a non-2xx reply from an upstream service.
    #[error("network error{}: {message}", status_suffix(.status))]
    Network { status: Option<u16>, message: String },

    /// No head-to-head history, or a team filter that matched nobody.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// A lookup by position or name that matched nothing.
    #[error("{0} not found")]
    NotFound(String),

    /// Form input that is missing, non-numeric or out of range.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl AppError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        AppError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Text a front-end can show verbatim.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network { .. } => {
                "Failed to reach the prediction service. Please try again.".to_string()
            }
            AppError::InsufficientData(_) => NOT_ENOUGH_DATA.to_string(),
            AppError::NotFound(_) => self.to_string(),
            AppError::Validation { field, reason } => format!("Please check {}: {}", field, reason),
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Network { .. })
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}
