use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tailor_client::ApiClient;
use tailor_core::TailorConfig;

/// tailor: tailor a resume to a job description from the terminal.
///
/// Uploads the resume and job description to the enhancement backend for text
/// extraction, sends both with your prompt, and lets you browse the enhanced
/// sections that come back.
#[derive(Parser, Debug)]
#[command(name = "tailor", version, about)]
struct Cli {
    /// Resume file to upload at startup (can also be set in the TUI).
    #[arg(short, long)]
    resume: Option<String>,

    /// Job description file to upload at startup.
    #[arg(short, long, conflicts_with = "job_description_text")]
    job_description: Option<String>,

    /// Job description text; switches the form to text mode.
    #[arg(long)]
    job_description_text: Option<String>,

    /// Instruction sent along with the resume and job description.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Backend base URL, e.g. http://localhost:8000/api (overrides the config file).
    #[arg(long, env = "TAILOR_API_BASE_URL")]
    api_base_url: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Log to a file so the TUI's alternate screen stays clean. If the file
    // can't be opened, logs are discarded.
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("tailor");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("tailor.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }

    let config = TailorConfig::load()
        .unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            TailorConfig::default()
        })
        .with_base_url_override(cli.api_base_url.clone());

    tracing::info!(
        base_url = config.base_url(),
        "Starting tailor v{}",
        env!("CARGO_PKG_VERSION")
    );

    let client = ApiClient::from_config(&config)?;
    let mut app = tailor_tui::App::new(Arc::new(client), config.base_url());

    if let Some(resume) = cli.resume {
        app.set_initial_resume(resume);
    }
    if let Some(path) = cli.job_description {
        app.set_initial_job_description(path);
    }
    if let Some(text) = cli.job_description_text {
        app.set_initial_job_description_text(text);
    }
    if let Some(prompt) = cli.prompt {
        app.set_initial_prompt(prompt);
    }

    app.run().await?;

    tracing::info!("tailor exited cleanly");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn job_description_file_and_text_conflict() {
        let err = Cli::try_parse_from([
            "tailor",
            "--job-description",
            "jd.pdf",
            "--job-description-text",
            "Backend engineer",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_prefills_and_verbosity() {
        let cli = Cli::try_parse_from([
            "tailor",
            "-r",
            "~/cv.pdf",
            "--job-description-text",
            "Backend engineer",
            "-p",
            "Tailor this resume",
            "--api-base-url",
            "http://example.test/api",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.resume.as_deref(), Some("~/cv.pdf"));
        assert_eq!(cli.job_description_text.as_deref(), Some("Backend engineer"));
        assert_eq!(cli.prompt.as_deref(), Some("Tailor this resume"));
        assert_eq!(cli.api_base_url.as_deref(), Some("http://example.test/api"));
        assert_eq!(cli.verbose, 2);
    }
}
