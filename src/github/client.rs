use reqwest::{header, Client, StatusCode};

use crate::error::{Error, Result};
use crate::github::rate_limiter::RateLimiter;
use crate::models::Repository;

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", token))?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("star-organizer/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: "https://api.github.com".to_string(),
        })
    }

    /// Every repository starred by the authenticated user, across all pages.
    pub async fn list_starred(&self) -> Result<Vec<Repository>> {
        tracing::info!("Fetching starred repositories");

        let mut starred = Vec::new();
        let mut page = 1;

        loop {
            self.rate_limiter.wait().await;

            let url = format!(
                "{}/user/starred?per_page={}&page={}",
                self.base_url, PER_PAGE, page
            );
            tracing::debug!("Fetching: {}", url);

            let response = self.client.get(&url).send().await?;
            self.rate_limiter.update_from_response(&response).await;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(Error::GitHubApi(format!(
                    "Failed to list starred repositories: {} - {}",
                    status, body
                )));
            }

            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let items: Vec<Repository> = response.json().await?;
            let items_count = items.len();
            starred.extend(items);

            if !has_next || items_count < PER_PAGE as usize {
                break;
            }

            page += 1;
        }

        Ok(starred)
    }

    /// Raw README contents for a repository. Callers treat any error here as
    /// "no README" rather than aborting the run.
    pub async fn fetch_readme(&self, owner: &str, repo: &str) -> Result<String> {
        self.rate_limiter.wait().await;

        let url = format!("{}/repos/{}/{}/readme", self.base_url, owner, repo);
        tracing::debug!("Fetching README for {}/{}", owner, repo);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/vnd.github.raw+json")
            .send()
            .await?;
        self.rate_limiter.update_from_response(&response).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::GitHubApi(format!(
                "No README for {}/{}",
                owner, repo
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::GitHubApi(format!(
                "Failed to fetch README for {}/{}: {}",
                owner, repo, status
            )));
        }

        Ok(response.text().await?)
    }
}
