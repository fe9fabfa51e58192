//! Executes workflow effects against a backend.
//!
//! Every effect turns into exactly one completion command, including when the
//! backend call fails or the task running it panics, so the workflow never
//! stays Busy or pending because of a lost result.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::error;

use tailor_core::{
    Command, Effect, EnhancementError, EnhancementRequest, EnhancementResult, ExtractionError,
    ExtractionTarget, SelectedFile,
};

use crate::backend::ResumeBackend;

/// Upload `file` for `target` and return the extracted text.
pub async fn extract(
    backend: &dyn ResumeBackend,
    file: &SelectedFile,
    target: ExtractionTarget,
) -> Result<String, ExtractionError> {
    backend.extract(target, file).await
}

/// Build the request from raw form text and invoke the enhancement endpoint.
pub async fn enhance(
    backend: &dyn ResumeBackend,
    resume_text: &str,
    job_description_text: &str,
    prompt_text: &str,
) -> Result<EnhancementResult, EnhancementError> {
    let request = EnhancementRequest::new(resume_text, job_description_text, prompt_text);
    backend.enhance(&request).await
}

/// Perform one effect and return the command reporting its outcome.
pub async fn run_effect(backend: &dyn ResumeBackend, effect: Effect) -> Command {
    match effect {
        Effect::Extract {
            target,
            ticket,
            file,
        } => {
            let outcome = backend.extract(target, &file).await;
            Command::ExtractionFinished {
                target,
                ticket,
                outcome,
            }
        }
        Effect::Enhance(request) => Command::EnhancementFinished(backend.enhance(&request).await),
    }
}

/// Run an effect on the tokio runtime and hand its completion to `on_done`.
///
/// The backend call runs in its own task; if that task panics, `on_done` still
/// receives a failure command for the effect.
pub fn spawn_effect<F>(backend: Arc<dyn ResumeBackend>, effect: Effect, on_done: F) -> JoinHandle<()>
where
    F: FnOnce(Command) + Send + 'static,
{
    let fallback = aborted(&effect);
    tokio::spawn(async move {
        let call = tokio::spawn(async move { run_effect(backend.as_ref(), effect).await });
        let command = match call.await {
            Ok(command) => command,
            Err(e) => {
                error!("Backend task did not complete: {}", e);
                fallback
            }
        };
        on_done(command);
    })
}

/// The completion reported for an effect whose task died.
fn aborted(effect: &Effect) -> Command {
    const REASON: &str = "backend task aborted";
    match effect {
        Effect::Extract { target, ticket, .. } => Command::ExtractionFinished {
            target: *target,
            ticket: *ticket,
            outcome: Err(ExtractionError::Transport(REASON.to_string())),
        },
        Effect::Enhance(_) => {
            Command::EnhancementFinished(Err(EnhancementError::Transport(REASON.to_string())))
        }
    }
}
