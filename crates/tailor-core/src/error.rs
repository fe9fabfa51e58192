use thiserror::Error;

/// Shown whenever an upload/extraction call fails, whatever the cause.
pub const EXTRACTION_FAILED: &str = "Failed to extract text. Please try again.";

/// Shown when submission is attempted before the required text is present.
pub const MISSING_INPUT: &str = "Please upload both Resume and Job Description first.";

/// Shown whenever the enhancement call fails, whatever the cause.
pub const ENHANCEMENT_FAILED: &str = "Failed to enhance the resume. Please try again.";

#[derive(Error, Debug)]
pub enum TailorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TailorError>;

/// Failure of a single upload + text extraction call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("could not read {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ExtractionError {
    /// The message surfaced to the user. Details only go to the log.
    pub fn user_message(&self) -> &'static str {
        EXTRACTION_FAILED
    }
}

/// Failure of the enhancement call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnhancementError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("server responded with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl EnhancementError {
    pub fn user_message(&self) -> &'static str {
        ENHANCEMENT_FAILED
    }
}

/// Required text is missing at submission time.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("resume text is empty")]
    MissingResume,

    #[error("job description text is empty")]
    MissingJobDescription,
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        MISSING_INPUT
    }
}
