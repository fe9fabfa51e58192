pub mod config;
pub mod enhancement;
pub mod error;
pub mod upload;
pub mod validation;
pub mod workflow;

pub use config::TailorConfig;
pub use enhancement::{EnhancementRequest, EnhancementResult};
pub use error::{EnhancementError, ExtractionError, Result, TailorError, ValidationError};
pub use upload::{ExtractionTarget, SelectedFile, UploadSlot};
pub use workflow::{Command, Effect, JobDescriptionMode, SubmissionStatus, Workflow};
