pub mod auth;
pub mod client;
pub mod rate_limiter;

pub use auth::device_login;
pub use client::GitHubClient;
