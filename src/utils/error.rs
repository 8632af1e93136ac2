use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid query parameter '{field}' = '{value}': {reason}")]
    InvalidQuery {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{kind} '{id}' not found")]
    NotFound { kind: String, id: String },

    #[error("No user is logged in")]
    NotLoggedIn,

    #[error("Text generation failed: {message}")]
    GenerationError { message: String },

    #[error("Text generation service returned status {status}")]
    ServiceUnavailable { status: u16 },
}

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Session,
    Network,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MarketError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. }
            | MarketError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MarketError::InvalidQuery { .. } | MarketError::NotFound { .. } => {
                ErrorCategory::Input
            }
            MarketError::NotLoggedIn => ErrorCategory::Session,
            MarketError::HttpError(_)
            | MarketError::GenerationError { .. }
            | MarketError::ServiceUnavailable { .. } => ErrorCategory::Network,
            MarketError::IoError(_)
            | MarketError::SerializationError(_)
            | MarketError::CsvError(_) => ErrorCategory::Storage,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Session => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            MarketError::InvalidQuery { field, .. } => match field.as_str() {
                "category" => {
                    "Run `kaamkhoj categories` to list valid category ids, or use 'all'".to_string()
                }
                "sort" => "Valid sort modes: recommended, price_asc, price_desc".to_string(),
                _ => "Check the filter values and try again".to_string(),
            },
            MarketError::NotFound { kind, .. } => {
                format!("List available {} records first", kind.to_lowercase())
            }
            MarketError::NotLoggedIn => "Log in with `kaamkhoj login --email <EMAIL>`".to_string(),
            MarketError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or via the environment", field)
            }
            MarketError::ConfigError { .. }
            | MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            MarketError::HttpError(_) | MarketError::ServiceUnavailable { .. } => {
                "Check network access and the assistant endpoint, then retry".to_string()
            }
            MarketError::GenerationError { .. } => {
                "Verify GEMINI_API_KEY and the configured model".to_string()
            }
            MarketError::IoError(_) | MarketError::SerializationError(_) => {
                "Check that the storage directory is writable; remove corrupt files if needed"
                    .to_string()
            }
            MarketError::CsvError(_) => "Retry with --format json".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MarketError::NotLoggedIn => "請先登入 (you are not logged in)".to_string(),
            MarketError::InvalidQuery { field, value, .. } => {
                format!("無效的篩選條件 {}='{}'", field, value)
            }
            MarketError::NotFound { kind, id } => format!("{} '{}' 不存在", kind, id),
            other => other.to_string(),
        }
    }
}
