//! Upload slots for the resume and job description files.

use std::path::{Path, PathBuf};

/// Which slot a file was picked for. Each target has its own backend endpoint
/// and multipart field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionTarget {
    Resume,
    JobDescription,
}

impl ExtractionTarget {
    /// Path segment of the upload endpoint, relative to the API base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            ExtractionTarget::Resume => "upload_resume",
            ExtractionTarget::JobDescription => "upload_jd",
        }
    }

    /// Multipart field the backend expects the file under.
    pub fn form_field(&self) -> &'static str {
        match self {
            ExtractionTarget::Resume => "resume",
            ExtractionTarget::JobDescription => "job_description",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExtractionTarget::Resume => "Resume",
            ExtractionTarget::JobDescription => "Job Description",
        }
    }
}

impl std::fmt::Display for ExtractionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A file the user picked. Contents are read when the upload happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = file_name_of(&path);
        Self { path, file_name }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string())
}

/// Identifies one file selection within a slot. Only the latest ticket's
/// completion is applied.
pub type Ticket = u64;

/// Outcome of feeding an extraction completion into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotUpdate {
    /// Text replaced.
    Applied,
    /// Extraction failed; text left as it was.
    Failed,
    /// A newer selection superseded this call; nothing changed.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct UploadSlot {
    raw_file: Option<SelectedFile>,
    extracted_text: String,
    ticket: Ticket,
    pending: bool,
}

impl UploadSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw_file(&self) -> Option<&SelectedFile> {
        self.raw_file.as_ref()
    }

    pub fn extracted_text(&self) -> &str {
        &self.extracted_text
    }

    /// Whether the latest selection is still waiting for its extraction result.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a new selection and hand out the ticket its extraction must report back with.
    pub fn select(&mut self, file: SelectedFile) -> Ticket {
        self.raw_file = Some(file);
        self.ticket += 1;
        self.pending = true;
        self.ticket
    }

    /// Apply the result of an extraction started with `ticket`.
    pub fn complete<E>(&mut self, ticket: Ticket, outcome: &Result<String, E>) -> SlotUpdate {
        if ticket != self.ticket {
            return SlotUpdate::Stale;
        }
        self.pending = false;
        match outcome {
            Ok(text) => {
                self.extracted_text = text.clone();
                SlotUpdate::Applied
            }
            Err(_) => SlotUpdate::Failed,
        }
    }
}
