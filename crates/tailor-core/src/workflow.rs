//! The client-side workflow state machine.
//!
//! All user intents and network completions arrive as [`Command`]s. Applying a
//! command updates the state in one step and may return an [`Effect`]: a network
//! call the caller must perform and report back on with another command.
//! Nothing in here touches the network, so every transition is testable
//! without a backend.

use tracing::{debug, info, warn};

use crate::enhancement::{EnhancementRequest, EnhancementResult};
use crate::error::{EnhancementError, ExtractionError};
use crate::upload::{ExtractionTarget, SelectedFile, SlotUpdate, Ticket, UploadSlot};
use crate::validation::validate_submission;

/// Where the job description text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobDescriptionMode {
    /// Uploaded file, text extracted by the backend.
    #[default]
    File,
    /// Typed or pasted directly.
    Text,
}

impl JobDescriptionMode {
    pub fn toggle(&self) -> JobDescriptionMode {
        match self {
            JobDescriptionMode::File => JobDescriptionMode::Text,
            JobDescriptionMode::Text => JobDescriptionMode::File,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            JobDescriptionMode::File => "Upload JD as a File",
            JobDescriptionMode::Text => "Enter JD as Text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Upload or extraction failed for this slot.
    Extraction(ExtractionTarget),
    Validation,
    Enhancement,
}

/// A failure as the user sees it: one fixed message per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    fn new(kind: FailureKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

/// Lifecycle of the submission path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// An enhancement call is in flight.
    Busy,
    /// The last submission returned a result.
    Succeeded,
    Failed(Failure),
}

/// Every state transition the workflow accepts.
#[derive(Debug, Clone)]
pub enum Command {
    /// The user picked a file for a slot.
    SelectFile {
        target: ExtractionTarget,
        file: SelectedFile,
    },
    /// An extraction started by [`Effect::Extract`] finished.
    ExtractionFinished {
        target: ExtractionTarget,
        ticket: Ticket,
        outcome: Result<String, ExtractionError>,
    },
    SetJobDescriptionMode(JobDescriptionMode),
    /// Replace the typed job description text.
    SetJobDescriptionText(String),
    SetPrompt(String),
    /// The user asked for an enhancement.
    Submit,
    /// The call started by [`Effect::Enhance`] finished.
    EnhancementFinished(Result<EnhancementResult, EnhancementError>),
    SelectSection(String),
    ClearSelection,
}

/// A network call the workflow wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Extract {
        target: ExtractionTarget,
        ticket: Ticket,
        file: SelectedFile,
    },
    Enhance(EnhancementRequest),
}

/// The whole view state: both upload slots, the form fields, the submission
/// status, the latest result and the section shown in the overlay.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    resume: UploadSlot,
    job_description: UploadSlot,
    job_description_mode: JobDescriptionMode,
    typed_job_description: String,
    prompt: String,
    status: SubmissionStatus,
    /// Extraction failure that arrived while Busy, shown once the call completes.
    deferred_failure: Option<Failure>,
    result: Option<EnhancementResult>,
    selected_section: Option<String>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one command and return the effect it requests, if any.
    pub fn apply(&mut self, command: Command) -> Option<Effect> {
        match command {
            Command::SelectFile { target, file } => Some(self.select_file(target, file)),
            Command::ExtractionFinished {
                target,
                ticket,
                outcome,
            } => {
                self.finish_extraction(target, ticket, outcome);
                None
            }
            Command::SetJobDescriptionMode(mode) => {
                self.job_description_mode = mode;
                None
            }
            Command::SetJobDescriptionText(text) => {
                self.typed_job_description = text;
                None
            }
            Command::SetPrompt(prompt) => {
                self.prompt = prompt;
                None
            }
            Command::Submit => self.submit(),
            Command::EnhancementFinished(outcome) => {
                self.finish_enhancement(outcome);
                None
            }
            Command::SelectSection(name) => {
                self.select_section(&name);
                None
            }
            Command::ClearSelection => {
                self.clear_selection();
                None
            }
        }
    }

    // ── Extraction ──────────────────────────────────────────

    fn select_file(&mut self, target: ExtractionTarget, file: SelectedFile) -> Effect {
        let ticket = self.slot_mut(target).select(file.clone());
        info!(%target, file = %file.file_name, ticket, "File selected, extracting text");
        Effect::Extract {
            target,
            ticket,
            file,
        }
    }

    fn finish_extraction(
        &mut self,
        target: ExtractionTarget,
        ticket: Ticket,
        outcome: Result<String, ExtractionError>,
    ) {
        match self.slot_mut(target).complete(ticket, &outcome) {
            SlotUpdate::Stale => {
                debug!(%target, ticket, "Discarding superseded extraction result");
            }
            SlotUpdate::Applied => {
                info!(%target, chars = self.slot(target).extracted_text().len(), "Text extracted");
                // Only this slot's own earlier failure is resolved.
                let own = FailureKind::Extraction(target);
                if self.deferred_failure.as_ref().is_some_and(|f| f.kind == own) {
                    self.deferred_failure = None;
                }
                if matches!(&self.status, SubmissionStatus::Failed(f) if f.kind == own) {
                    self.status = SubmissionStatus::Idle;
                }
            }
            SlotUpdate::Failed => {
                if let Err(e) = &outcome {
                    warn!(%target, error = %e, "Text extraction failed");
                    let failure =
                        Failure::new(FailureKind::Extraction(target), e.user_message());
                    if self.status == SubmissionStatus::Busy {
                        self.deferred_failure = Some(failure);
                    } else {
                        self.status = SubmissionStatus::Failed(failure);
                    }
                }
            }
        }
    }

    // ── Submission ──────────────────────────────────────────

    /// Whether a submission right now would pass validation.
    pub fn can_submit(&self) -> bool {
        validate_submission(
            self.resume.extracted_text(),
            self.job_description_text(),
            self.job_description_mode,
        )
        .is_ok()
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.is_busy() {
            debug!("Submission ignored, enhancement already in flight");
            return None;
        }

        self.status = SubmissionStatus::Idle;
        self.deferred_failure = None;

        if let Err(e) = validate_submission(
            self.resume.extracted_text(),
            self.job_description_text(),
            self.job_description_mode,
        ) {
            info!(reason = %e, "Submission blocked");
            self.status =
                SubmissionStatus::Failed(Failure::new(FailureKind::Validation, e.user_message()));
            return None;
        }

        let request = EnhancementRequest::new(
            self.resume.extracted_text(),
            self.job_description_text(),
            &self.prompt,
        );
        info!(
            resume_chars = request.resume_text.len(),
            jd_chars = request.job_description.len(),
            "Submitting enhancement request"
        );
        self.status = SubmissionStatus::Busy;
        Some(Effect::Enhance(request))
    }

    fn finish_enhancement(&mut self, outcome: Result<EnhancementResult, EnhancementError>) {
        if !self.is_busy() {
            warn!("Enhancement completion arrived with no submission in flight");
            return;
        }

        match outcome {
            Ok(result) => {
                info!(sections = result.len(), "Enhancement succeeded");
                if let Some(selected) = &self.selected_section {
                    if !result.contains(selected) {
                        self.selected_section = None;
                    }
                }
                self.result = Some(result);
                self.status = match self.deferred_failure.take() {
                    Some(failure) => SubmissionStatus::Failed(failure),
                    None => SubmissionStatus::Succeeded,
                };
            }
            Err(e) => {
                warn!(error = %e, "Enhancement failed");
                self.deferred_failure = None;
                self.status = SubmissionStatus::Failed(Failure::new(
                    FailureKind::Enhancement,
                    e.user_message(),
                ));
            }
        }
    }

    // ── Selection ───────────────────────────────────────────

    /// Show a section in the overlay. A name not present in the current result
    /// closes the overlay instead.
    pub fn select_section(&mut self, name: &str) {
        let present = self.result.as_ref().is_some_and(|r| r.contains(name));
        self.selected_section = present.then(|| name.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_section = None;
    }

    /// The section currently shown in the overlay, as (name, text).
    pub fn displayed_section(&self) -> Option<(&str, &str)> {
        let name = self.selected_section.as_deref()?;
        let text = self.result.as_ref()?.get(name)?;
        Some((name, text))
    }

    // ── Accessors ───────────────────────────────────────────

    pub fn slot(&self, target: ExtractionTarget) -> &UploadSlot {
        match target {
            ExtractionTarget::Resume => &self.resume,
            ExtractionTarget::JobDescription => &self.job_description,
        }
    }

    fn slot_mut(&mut self, target: ExtractionTarget) -> &mut UploadSlot {
        match target {
            ExtractionTarget::Resume => &mut self.resume,
            ExtractionTarget::JobDescription => &mut self.job_description,
        }
    }

    pub fn resume_text(&self) -> &str {
        self.resume.extracted_text()
    }

    /// Job description text for the active mode.
    pub fn job_description_text(&self) -> &str {
        match self.job_description_mode {
            JobDescriptionMode::File => self.job_description.extracted_text(),
            JobDescriptionMode::Text => &self.typed_job_description,
        }
    }

    pub fn job_description_mode(&self) -> JobDescriptionMode {
        self.job_description_mode
    }

    pub fn typed_job_description(&self) -> &str {
        &self.typed_job_description
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn is_busy(&self) -> bool {
        self.status == SubmissionStatus::Busy
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            SubmissionStatus::Failed(failure) => Some(&failure.message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&EnhancementResult> {
        self.result.as_ref()
    }

    pub fn selected_section(&self) -> Option<&str> {
        self.selected_section.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ENHANCEMENT_FAILED, EXTRACTION_FAILED, MISSING_INPUT};

    fn extract_ok(wf: &mut Workflow, target: ExtractionTarget, name: &str, text: &str) {
        let effect = wf.apply(Command::SelectFile {
            target,
            file: SelectedFile::new(name),
        });
        let Some(Effect::Extract { ticket, .. }) = effect else {
            panic!("expected an extract effect");
        };
        wf.apply(Command::ExtractionFinished {
            target,
            ticket,
            outcome: Ok(text.to_string()),
        });
    }

    fn ready_in_text_mode() -> Workflow {
        let mut wf = Workflow::new();
        extract_ok(&mut wf, ExtractionTarget::Resume, "cv.pdf", "Experienced engineer...");
        wf.apply(Command::SetJobDescriptionMode(JobDescriptionMode::Text));
        wf.apply(Command::SetJobDescriptionText(
            "Looking for a backend engineer".to_string(),
        ));
        wf.apply(Command::SetPrompt("Tailor this resume".to_string()));
        wf
    }

    fn sections(pairs: &[(&str, &str)]) -> EnhancementResult {
        pairs.iter().copied().collect()
    }

    #[test]
    fn selecting_a_file_sets_raw_file_before_extraction() {
        let mut wf = Workflow::new();
        let effect = wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("/tmp/cv.pdf"),
        });

        let raw = wf.slot(ExtractionTarget::Resume).raw_file().unwrap();
        assert_eq!(raw.file_name, "cv.pdf");
        assert!(wf.slot(ExtractionTarget::Resume).is_pending());
        assert_eq!(
            effect,
            Some(Effect::Extract {
                target: ExtractionTarget::Resume,
                ticket: 1,
                file: SelectedFile::new("/tmp/cv.pdf"),
            })
        );
        assert!(!wf.is_busy());
    }

    #[test]
    fn failed_resume_upload_keeps_empty_text_and_reports() {
        let mut wf = Workflow::new();
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("cv.pdf"),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 1,
            outcome: Err(ExtractionError::Transport("connection refused".into())),
        });

        assert_eq!(wf.error_message(), Some(EXTRACTION_FAILED));
        assert_eq!(wf.resume_text(), "");
        assert!(wf.slot(ExtractionTarget::Resume).raw_file().is_some());
    }

    #[test]
    fn successful_extraction_clears_stale_extraction_error() {
        let mut wf = Workflow::new();
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("broken.pdf"),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 1,
            outcome: Err(ExtractionError::Status(500)),
        });
        assert!(wf.error_message().is_some());

        extract_ok(&mut wf, ExtractionTarget::Resume, "cv.pdf", "resume");
        assert_eq!(wf.error_message(), None);
        assert_eq!(wf.status(), &SubmissionStatus::Idle);
    }

    #[test]
    fn other_slot_success_keeps_extraction_error() {
        let mut wf = Workflow::new();
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("broken.pdf"),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 1,
            outcome: Err(ExtractionError::Status(500)),
        });

        extract_ok(&mut wf, ExtractionTarget::JobDescription, "jd.pdf", "the job");
        assert_eq!(wf.error_message(), Some(EXTRACTION_FAILED));
        assert_eq!(wf.resume_text(), "");
        assert_eq!(
            wf.status(),
            &SubmissionStatus::Failed(Failure::new(
                FailureKind::Extraction(ExtractionTarget::Resume),
                EXTRACTION_FAILED
            ))
        );
    }

    #[test]
    fn extraction_does_not_clear_validation_error() {
        let mut wf = Workflow::new();
        extract_ok(&mut wf, ExtractionTarget::Resume, "cv.pdf", "resume");
        wf.apply(Command::Submit);
        assert_eq!(wf.error_message(), Some(MISSING_INPUT));

        extract_ok(&mut wf, ExtractionTarget::Resume, "cv2.pdf", "resume again");
        assert!(!wf.can_submit());
        assert_eq!(wf.error_message(), Some(MISSING_INPUT));
    }

    #[test]
    fn deferred_failure_survives_other_slot_success() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);

        let Some(Effect::Extract { ticket, .. }) = wf.apply(Command::SelectFile {
            target: ExtractionTarget::JobDescription,
            file: SelectedFile::new("jd.pdf"),
        }) else {
            panic!("expected an extract effect");
        };
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::JobDescription,
            ticket,
            outcome: Err(ExtractionError::Status(415)),
        });
        extract_ok(&mut wf, ExtractionTarget::Resume, "cv2.pdf", "newer resume");

        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Concise", "short")]))));
        assert_eq!(wf.error_message(), Some(EXTRACTION_FAILED));
    }

    #[test]
    fn empty_resume_blocks_submission() {
        let mut wf = Workflow::new();
        wf.apply(Command::SetJobDescriptionMode(JobDescriptionMode::Text));
        wf.apply(Command::SetJobDescriptionText("a job".into()));

        assert!(!wf.can_submit());
        assert_eq!(wf.apply(Command::Submit), None);
        assert_eq!(wf.error_message(), Some(MISSING_INPUT));
        assert!(!wf.is_busy());
    }

    #[test]
    fn file_mode_without_job_description_blocks_submission() {
        let mut wf = Workflow::new();
        extract_ok(&mut wf, ExtractionTarget::Resume, "cv.pdf", "resume");

        assert_eq!(wf.apply(Command::Submit), None);
        assert_eq!(wf.error_message(), Some(MISSING_INPUT));
    }

    #[test]
    fn text_mode_submits_without_any_job_description_upload() {
        let mut wf = ready_in_text_mode();
        assert!(wf.slot(ExtractionTarget::JobDescription).raw_file().is_none());

        let effect = wf.apply(Command::Submit);
        assert_eq!(
            effect,
            Some(Effect::Enhance(EnhancementRequest {
                resume_text: "Experienced engineer...".into(),
                job_description: "Looking for a backend engineer".into(),
                prompt: "Tailor this resume:\n\nResume:\n{resume}\n\nJob Description:\n{job_description}"
                    .into(),
            }))
        );
        assert!(wf.is_busy());
        assert_eq!(wf.error_message(), None);
    }

    #[test]
    fn file_mode_uses_extracted_job_description() {
        let mut wf = Workflow::new();
        extract_ok(&mut wf, ExtractionTarget::Resume, "cv.pdf", "resume");
        extract_ok(&mut wf, ExtractionTarget::JobDescription, "jd.docx", "the job");

        let Some(Effect::Enhance(request)) = wf.apply(Command::Submit) else {
            panic!("expected an enhance effect");
        };
        assert_eq!(request.job_description, "the job");
    }

    #[test]
    fn switching_modes_keeps_both_texts() {
        let mut wf = Workflow::new();
        extract_ok(&mut wf, ExtractionTarget::JobDescription, "jd.pdf", "from file");
        wf.apply(Command::SetJobDescriptionMode(JobDescriptionMode::Text));
        wf.apply(Command::SetJobDescriptionText("typed".into()));
        assert_eq!(wf.job_description_text(), "typed");

        wf.apply(Command::SetJobDescriptionMode(JobDescriptionMode::File));
        assert_eq!(wf.job_description_text(), "from file");
        assert_eq!(wf.typed_job_description(), "typed");
    }

    #[test]
    fn busy_only_while_enhancement_in_flight() {
        let mut wf = ready_in_text_mode();
        assert!(!wf.is_busy());

        wf.apply(Command::Submit);
        assert!(wf.is_busy());

        wf.apply(Command::EnhancementFinished(Err(EnhancementError::Status(502))));
        assert!(!wf.is_busy());
        assert_eq!(wf.error_message(), Some(ENHANCEMENT_FAILED));
    }

    #[test]
    fn submit_while_busy_is_ignored() {
        let mut wf = ready_in_text_mode();
        assert!(wf.apply(Command::Submit).is_some());
        assert_eq!(wf.apply(Command::Submit), None);
        assert!(wf.is_busy());
    }

    #[test]
    fn new_result_replaces_old_one() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[
            ("Concise", "v1 short"),
            ("Detailed", "v1 long"),
        ]))));
        assert_eq!(wf.status(), &SubmissionStatus::Succeeded);

        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Creative", "v2")]))));

        let result = wf.result().unwrap();
        assert_eq!(result, &sections(&[("Creative", "v2")]));
        assert!(!result.contains("Concise"));
    }

    #[test]
    fn failed_enhancement_keeps_previous_result_selectable() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Concise", "short")]))));

        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Err(EnhancementError::Transport(
            "timed out".into(),
        ))));

        assert_eq!(wf.error_message(), Some(ENHANCEMENT_FAILED));
        wf.apply(Command::SelectSection("Concise".into()));
        assert_eq!(wf.displayed_section(), Some(("Concise", "short")));
    }

    #[test]
    fn select_then_clear() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[
            ("Concise", "short"),
            ("Detailed", "long"),
        ]))));

        wf.apply(Command::SelectSection("Detailed".into()));
        assert_eq!(wf.selected_section(), Some("Detailed"));
        assert_eq!(wf.displayed_section(), Some(("Detailed", "long")));

        wf.apply(Command::ClearSelection);
        assert_eq!(wf.selected_section(), None);
        assert_eq!(wf.displayed_section(), None);
    }

    #[test]
    fn selecting_missing_section_closes_overlay() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Concise", "short")]))));
        wf.apply(Command::SelectSection("Concise".into()));

        wf.apply(Command::SelectSection("Nope".into()));
        assert_eq!(wf.selected_section(), None);
    }

    #[test]
    fn selection_dropped_when_new_result_lacks_it() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Concise", "short")]))));
        wf.apply(Command::SelectSection("Concise".into()));

        wf.apply(Command::Submit);
        assert_eq!(wf.selected_section(), Some("Concise"));
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Other", "x")]))));
        assert_eq!(wf.selected_section(), None);
    }

    #[test]
    fn extraction_failure_during_submission_is_shown_after_it() {
        let mut wf = ready_in_text_mode();
        wf.apply(Command::Submit);

        let Some(Effect::Extract { ticket, .. }) = wf.apply(Command::SelectFile {
            target: ExtractionTarget::JobDescription,
            file: SelectedFile::new("jd.pdf"),
        }) else {
            panic!("expected an extract effect");
        };
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::JobDescription,
            ticket,
            outcome: Err(ExtractionError::Status(415)),
        });
        assert_eq!(wf.status(), &SubmissionStatus::Busy);

        wf.apply(Command::EnhancementFinished(Ok(sections(&[("Concise", "short")]))));
        assert!(!wf.is_busy());
        assert_eq!(wf.error_message(), Some(EXTRACTION_FAILED));
        assert!(wf.result().is_some());
    }

    #[test]
    fn stray_enhancement_completion_is_ignored() {
        let mut wf = Workflow::new();
        wf.apply(Command::EnhancementFinished(Ok(sections(&[("A", "a")]))));
        assert!(wf.result().is_none());
        assert_eq!(wf.status(), &SubmissionStatus::Idle);
    }

    #[test]
    fn superseded_extraction_does_not_overwrite_newer_text() {
        let mut wf = Workflow::new();
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("old.pdf"),
        });
        wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("new.pdf"),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 2,
            outcome: Ok("new".into()),
        });
        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: 1,
            outcome: Ok("old".into()),
        });

        assert_eq!(wf.resume_text(), "new");
    }

    #[test]
    fn resume_and_job_description_extractions_are_independent() {
        let mut wf = Workflow::new();
        let Some(Effect::Extract { ticket: r, .. }) = wf.apply(Command::SelectFile {
            target: ExtractionTarget::Resume,
            file: SelectedFile::new("cv.pdf"),
        }) else {
            panic!("expected an extract effect");
        };
        let Some(Effect::Extract { ticket: j, .. }) = wf.apply(Command::SelectFile {
            target: ExtractionTarget::JobDescription,
            file: SelectedFile::new("jd.pdf"),
        }) else {
            panic!("expected an extract effect");
        };

        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::JobDescription,
            ticket: j,
            outcome: Ok("jd".into()),
        });
        assert!(wf.slot(ExtractionTarget::Resume).is_pending());

        wf.apply(Command::ExtractionFinished {
            target: ExtractionTarget::Resume,
            ticket: r,
            outcome: Ok("cv".into()),
        });
        assert_eq!(wf.resume_text(), "cv");
        assert_eq!(wf.job_description_text(), "jd");
        assert!(wf.can_submit());
    }
}
