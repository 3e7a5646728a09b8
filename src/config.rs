use std::env;

/// Bucket used when classification fails or a suggested category may not be
/// created.
pub const DEFAULT_FALLBACK_CATEGORY: &str = "Uncategorised";

const DEFAULT_MAX_README_CHARS: usize = 4000;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_client_id: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub max_readme_chars: usize,
}

impl Config {
    /// Credentials are all optional here; the binary resolves missing ones
    /// via device-flow login or an interactive prompt.
    pub fn from_env() -> Self {
        let github_token = non_empty_var("GITHUB_TOKEN");
        let github_client_id = non_empty_var("GITHUB_CLIENT_ID");
        let anthropic_api_key = non_empty_var("ANTHROPIC_API_KEY");

        let max_readme_chars = env::var("MAX_README_CHARS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_README_CHARS);

        Self {
            github_token,
            github_client_id,
            anthropic_api_key,
            max_readme_chars,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct OrganizerConfig {
    pub allow_new_categories: bool,
    pub fallback_category: String,
    pub max_readme_chars: usize,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            allow_new_categories: false,
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
            max_readme_chars: DEFAULT_MAX_README_CHARS,
        }
    }
}
