use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data store returned {status}: {message}")]
    StoreError { status: u16, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to load {collection}: {message}")]
    LoadError { collection: String, message: String },

    #[error("Failed to submit review: {message}")]
    SubmissionError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Stopped at the input boundary; nothing was sent, so the command
    /// still fails.
    Low,
    /// Transient collaborator failure, the user can try again.
    Medium,
    High,
    /// The process cannot start.
    Critical,
}

impl ErrorSeverity {
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SiteError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SiteError::ValidationError { .. } => ErrorSeverity::Low,
            SiteError::ApiError(_)
            | SiteError::StoreError { .. }
            | SiteError::LoadError { .. }
            | SiteError::SubmissionError { .. } => ErrorSeverity::Medium,
            SiteError::SerializationError(_) | SiteError::IoError(_) => ErrorSeverity::High,
            SiteError::ConfigError { .. }
            | SiteError::MissingConfigError { .. }
            | SiteError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn is_config(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Text suitable for showing to a visitor, without transport details.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::LoadError { collection, .. } if collection == "reviews" => {
                crate::core::loader::REVIEWS_LOAD_FAILED.to_string()
            }
            SiteError::LoadError { collection, .. } => {
                format!("Could not load {}.", collection.replace('_', " "))
            }
            SiteError::SubmissionError { .. } => {
                crate::core::submission::SUBMIT_FAILED.to_string()
            }
            SiteError::ValidationError { message } => message.clone(),
            SiteError::MissingConfigError { field } => {
                format!("Missing required setting {}", field)
            }
            SiteError::ConfigError { .. } | SiteError::InvalidConfigValueError { .. } => {
                format!("{}", self)
            }
            SiteError::ApiError(_) | SiteError::StoreError { .. } => {
                "The data service is unavailable right now. Please try again later.".to_string()
            }
            SiteError::SerializationError(_) | SiteError::IoError(_) => {
                "Something went wrong while reading site data.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.severity() {
            ErrorSeverity::Low => "Fill in every required field and submit again",
            ErrorSeverity::Medium => "Check the data store URL and network, then retry",
            ErrorSeverity::High => "Check that the data store schema matches the site's records",
            ErrorSeverity::Critical => {
                "Set SUPABASE_URL and SUPABASE_ANON_KEY or pass --config with a [store] section"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
