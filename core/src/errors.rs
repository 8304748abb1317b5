use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Restaurant source error: {0}")]
    Source(#[from] SourceError),

    #[error("Invalid request: {reason}")]
    BadRequest { reason: String },
}

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("No user email was provided")]
    Unauthorized,

    #[error("No restaurant name was provided")]
    MissingRestaurantName,

    #[error("Unable to put record into the order events stream")]
    PublishFailed(#[source] SinkError),
}

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to append record to stream {stream}")]
    Append {
        stream: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Event serialization failed: {reason}")]
    Serialization { reason: String },
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Unable to scan table {table}")]
    Scan {
        table: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Unable to write items to table {table}: {reason}")]
    Write { table: String, reason: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Failed to load configuration from {origin}: {error}")]
    LoadFailed {
        origin: String,
        #[source]
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::Serialization {
            reason: err.to_string(),
        }
    }
}

impl ServiceError {
    /// HTTP status the boundary reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Order(OrderError::Unauthorized) => 401,
            ServiceError::Order(OrderError::MissingRestaurantName) => 400,
            ServiceError::BadRequest { .. } => 400,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Classification only; nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ServiceError::Order(OrderError::PublishFailed(SinkError::Append { .. })) => true,
            ServiceError::Source(SourceError::Scan { .. }) => true,
            _ => false,
        }
    }
}
