pub mod backend;
pub mod client;
pub mod protocol;
pub mod runner;

pub use backend::ResumeBackend;
pub use client::ApiClient;
pub use runner::{enhance, extract, run_effect, spawn_effect};
