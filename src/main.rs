use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use starorganizer::config::DEFAULT_FALLBACK_CATEGORY;
use starorganizer::github;
use starorganizer::{
    CategoryStore, ClaudeProvider, Config, GitHubClient, OrganizerConfig, OrganizerPipeline,
};

#[derive(Parser, Debug)]
#[command(name = "starorganizer")]
#[command(version = "0.1.0")]
#[command(about = "Organize starred GitHub repositories into categorized lists")]
struct Args {
    /// GitHub personal access token (falls back to GITHUB_TOKEN)
    #[arg(short, long)]
    token: Option<String>,

    /// GitHub OAuth app client ID for device-flow login (falls back to GITHUB_CLIENT_ID)
    #[arg(long)]
    client_id: Option<String>,

    /// Path to the JSON file holding the category lists
    #[arg(short, long, default_value = "lists.json")]
    list_file: String,

    /// Allow creating new lists when the model suggests an unknown category
    #[arg(long)]
    create_new: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("starorganizer=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env();

    let token = resolve_github_token(&args, &config).await?;
    let api_key = match config.anthropic_api_key.clone() {
        Some(key) => key,
        None => prompt("Anthropic API key: ")?,
    };

    let github = GitHubClient::new(&token)?;
    let llm = ClaudeProvider::new(api_key, None);

    let mut store = CategoryStore::load(&args.list_file)?;
    tracing::info!(
        "Loaded {} categories covering {} repositories from {}",
        store.category_count(),
        store.repo_count(),
        args.list_file
    );

    let organizer_config = OrganizerConfig {
        allow_new_categories: args.create_new,
        fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
        max_readme_chars: config.max_readme_chars,
    };

    let pipeline = OrganizerPipeline::new(github, llm, organizer_config);
    let report = pipeline.run(&mut store).await?;

    store.save(&args.list_file)?;
    println!("Lists saved to {}", args.list_file);
    println!(
        "{} starred, {} newly categorized ({} in {}), {} already categorized",
        report.starred, report.assigned, report.fallback, DEFAULT_FALLBACK_CATEGORY, report.skipped
    );

    Ok(())
}

/// Flag and environment token first, then device-flow login when a client ID
/// is available, then a manual prompt. A failed device flow is reported and
/// falls through to the prompt.
async fn resolve_github_token(args: &Args, config: &Config) -> anyhow::Result<String> {
    if let Some(token) = args.token.clone().or_else(|| config.github_token.clone()) {
        return Ok(token);
    }

    if let Some(client_id) = args
        .client_id
        .clone()
        .or_else(|| config.github_client_id.clone())
    {
        match github::device_login(&client_id).await {
            Ok(token) => return Ok(token),
            Err(e) => println!("Device login failed: {}", e),
        }
    }

    Ok(prompt("GitHub token: ")?)
}

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}
