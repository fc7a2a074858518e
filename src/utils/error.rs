use thiserror::Error;

#[derive(Error, Debug)]
pub enum BadgeError {
    #[error("Cannot open serial port {port}: {source}")]
    ChannelOpen {
        port: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serial channel failure: {0}")]
    ChannelIo(#[source] std::io::Error),

    #[error("Location directory unavailable: {message}")]
    DirectoryFetch { message: String },

    #[error("Cannot start before a {field} has been selected")]
    MissingPrecondition { field: String },

    #[error("Location tag '{tag}' is not offered by the badge server")]
    UnknownLocation { tag: String },

    #[error("Session already stopped")]
    AlreadyStopped,

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Channel,
    Network,
    Session,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BadgeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BadgeError::ChannelOpen { .. } | BadgeError::ChannelIo(_) => ErrorCategory::Channel,
            BadgeError::DirectoryFetch { .. } => ErrorCategory::Network,
            BadgeError::MissingPrecondition { .. }
            | BadgeError::UnknownLocation { .. }
            | BadgeError::AlreadyStopped => ErrorCategory::Session,
            BadgeError::Config { .. }
            | BadgeError::InvalidConfigValue { .. }
            | BadgeError::Toml(_) => ErrorCategory::Configuration,
            BadgeError::Io(_) | BadgeError::Json(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BadgeError::DirectoryFetch { .. } => ErrorSeverity::Low,
            BadgeError::ChannelOpen { .. }
            | BadgeError::MissingPrecondition { .. }
            | BadgeError::UnknownLocation { .. }
            | BadgeError::AlreadyStopped => ErrorSeverity::Medium,
            BadgeError::Config { .. }
            | BadgeError::InvalidConfigValue { .. }
            | BadgeError::Toml(_) => ErrorSeverity::High,
            BadgeError::ChannelIo(_) | BadgeError::Io(_) | BadgeError::Json(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    /// True when the control loop may keep running after logging the error.
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BadgeError::ChannelOpen { .. } => {
                "Check that the reader is plugged in and that you may access the port (dialout group on Linux), then start again"
            }
            BadgeError::ChannelIo(_) => {
                "The reader stopped answering; reconnect it and restart the program"
            }
            BadgeError::DirectoryFetch { .. } => {
                "Check the network connection and the server URL in the settings file"
            }
            BadgeError::MissingPrecondition { .. } => {
                "Select both a serial port and a location before starting"
            }
            BadgeError::UnknownLocation { .. } => {
                "Pick one of the locations listed by --list-locations"
            }
            BadgeError::AlreadyStopped => "Restart the program to open a new session",
            BadgeError::Config { .. }
            | BadgeError::InvalidConfigValue { .. }
            | BadgeError::Toml(_) => "Fix the settings file or the command line arguments",
            BadgeError::Io(_) | BadgeError::Json(_) => {
                "Check file permissions and that the configuration file is valid JSON"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BadgeError::ChannelOpen { port, .. } => format!("Cannot use serial port {}", port),
            BadgeError::ChannelIo(_) => "Lost connection with the card reader".to_string(),
            BadgeError::DirectoryFetch { .. } => {
                "Cannot connect to the badge server".to_string()
            }
            BadgeError::MissingPrecondition { field } => format!("No {} selected", field),
            BadgeError::UnknownLocation { tag } => format!("Unknown location '{}'", tag),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BadgeError>;
