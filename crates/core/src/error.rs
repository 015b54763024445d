/// Result alias that carries the custom [`WavemarkError`] type.
pub type Result<T> = std::result::Result<T, WavemarkError>;

/// Common error type for the core crate.
#[derive(Debug, thiserror::Error)]
pub enum WavemarkError {
    /// Missing or malformed startup input. Raised while building a viewer and
    /// never recovered internally.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// An interval whose start does not precede its end.
    #[error("invalid time range: start {start} must be less than end {end}")]
    InvalidRange { start: f64, end: f64 },
    /// A time that is negative or not a finite number.
    #[error("invalid time {0}: times must be finite and non-negative")]
    InvalidTime(f64),
    /// Lookup of an annotation that is not in the collection.
    #[error("no annotation with id `{0}`")]
    NotFound(String),
    /// An explicit id that is already held by a live annotation.
    #[error("an annotation with id `{0}` already exists")]
    DuplicateId(String),
    /// Positional arguments that match neither the structured nor the legacy
    /// call shape.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    #[error("invalid topic pattern `{0}`")]
    InvalidTopic(String),
    /// A listener failed and nobody subscribed to `error` to receive it.
    #[error("listener for `{topic}` failed: {message}")]
    Listener { topic: String, message: String },
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

impl WavemarkError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// True for lookup failures, which callers may choose to ignore.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<&str> for WavemarkError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for WavemarkError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
