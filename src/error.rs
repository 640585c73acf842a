//! Error types.
//!
//! - `PriceError` is the typed failure taxonomy of the catalog/estimator layer.
//! - `AppError` is what the binary sees: a user-facing message plus an exit code.

/// Failures of the catalog, the estimator, and a single submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    /// The reference car table could not be read or parsed.
    #[error("car data unavailable: {0}")]
    DataUnavailable(String),
    /// The model artifact is missing, unreadable, or incompatible.
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// Rejected user input (never reaches the estimator).
    #[error("{0}")]
    InvalidInput(String),
    /// The estimator failed on a well-formed record.
    #[error("{0}")]
    PredictionError(String),
}

impl PriceError {
    /// True for the two conditions that halt the process at startup.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::DataUnavailable(_) | Self::ModelUnavailable(_))
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::DataUnavailable(_) | Self::ModelUnavailable(_) => 2,
            Self::InvalidInput(_) => 3,
            Self::PredictionError(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PriceError> for AppError {
    fn from(err: PriceError) -> Self {
        let message = if err.is_fatal() {
            format!(
                "Model or data files not found. Please run the model training script first to generate them. ({err})"
            )
        } else {
            err.to_string()
        };
        Self::new(err.exit_code(), message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
