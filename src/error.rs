use thiserror::Error;

/// Errors that can abort a suggest flow
#[derive(Error, Debug)]
pub enum SuggestError {
    /// Transport-level failure talking to the recipe API
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The recipe catalog endpoint answered with a non-success status
    #[error("Failed to fetch recipes")]
    CatalogUnavailable { status: u16 },

    /// The gap analysis endpoint rejected the request; carries the response body verbatim
    #[error("Analyze failed: {0}")]
    AnalysisFailed(String),

    /// The configured base URL cannot be used to build endpoint URLs
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors raised by the copy and share actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// Writing to the clipboard failed
    #[error("Copy failed: {0}")]
    Clipboard(String),

    /// The share sheet reported a failure other than cancellation
    #[error("Share failed: {0}")]
    Share(String),

    /// The user dismissed the share sheet
    #[error("Share cancelled")]
    Cancelled,
}
