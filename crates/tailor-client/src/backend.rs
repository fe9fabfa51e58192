//! The seam between the workflow and whatever serves extraction and enhancement.

use async_trait::async_trait;

use tailor_core::{
    EnhancementError, EnhancementRequest, EnhancementResult, ExtractionError, ExtractionTarget,
    SelectedFile,
};

/// Backend operations the workflow's effects need. `ApiClient` talks HTTP;
/// tests substitute in-memory implementations.
#[async_trait]
pub trait ResumeBackend: Send + Sync {
    /// Upload a file and return the text the backend extracted from it.
    async fn extract(
        &self,
        target: ExtractionTarget,
        file: &SelectedFile,
    ) -> Result<String, ExtractionError>;

    /// Request an enhancement and return the named result sections.
    async fn enhance(
        &self,
        request: &EnhancementRequest,
    ) -> Result<EnhancementResult, EnhancementError>;
}
