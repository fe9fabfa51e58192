//! Submission gating.

use crate::error::ValidationError;
use crate::workflow::JobDescriptionMode;

/// Check that the text a submission needs is present.
///
/// Resume text is always required. Job description text is only required when
/// it comes from an uploaded file; typed text is accepted as-is, even empty.
pub fn validate_submission(
    resume_text: &str,
    job_description_text: &str,
    mode: JobDescriptionMode,
) -> Result<(), ValidationError> {
    if resume_text.is_empty() {
        return Err(ValidationError::MissingResume);
    }
    if mode == JobDescriptionMode::File && job_description_text.is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_is_always_required() {
        for mode in [JobDescriptionMode::File, JobDescriptionMode::Text] {
            assert_eq!(
                validate_submission("", "a job", mode),
                Err(ValidationError::MissingResume)
            );
        }
    }

    #[test]
    fn file_mode_requires_extracted_job_description() {
        assert_eq!(
            validate_submission("cv", "", JobDescriptionMode::File),
            Err(ValidationError::MissingJobDescription)
        );
        assert_eq!(validate_submission("cv", "jd", JobDescriptionMode::File), Ok(()));
    }

    #[test]
    fn text_mode_accepts_any_typed_text() {
        assert_eq!(validate_submission("cv", "jd", JobDescriptionMode::Text), Ok(()));
        assert_eq!(validate_submission("cv", "", JobDescriptionMode::Text), Ok(()));
    }
}
