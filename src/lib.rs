pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod organizer;
pub mod storage;

pub use config::{Config, OrganizerConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use llm::{ClaudeProvider, LLMProvider};
pub use organizer::OrganizerPipeline;
pub use storage::CategoryStore;
