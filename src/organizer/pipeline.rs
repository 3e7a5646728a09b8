use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::OrganizerConfig;
use crate::error::Result;
use crate::github::GitHubClient;
use crate::llm::{CategoryRequest, LLMProvider};
use crate::storage::CategoryStore;

pub struct OrganizerPipeline {
    github: GitHubClient,
    llm: Arc<dyn LLMProvider>,
    config: OrganizerConfig,
}

/// Counters for one organizing run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OrganizeReport {
    pub starred: usize,
    pub assigned: usize,
    pub fallback: usize,
    pub skipped: usize,
}

impl OrganizerPipeline {
    pub fn new(
        github: GitHubClient,
        llm: impl LLMProvider + 'static,
        config: OrganizerConfig,
    ) -> Self {
        Self {
            github,
            llm: Arc::new(llm),
            config,
        }
    }

    /// Classify every starred repository not already in the store. Only the
    /// initial star listing is fatal; per-repository failures degrade to an
    /// empty README or the fallback category and the run continues.
    pub async fn run(&self, store: &mut CategoryStore) -> Result<OrganizeReport> {
        let starred = self.github.list_starred().await?;
        tracing::info!("Found {} starred repositories", starred.len());

        let mut report = OrganizeReport {
            starred: starred.len(),
            ..Default::default()
        };

        let pb = ProgressBar::new(starred.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos")
                .unwrap()
                .progress_chars("#>-"),
        );

        for repo in &starred {
            if store.contains(&repo.full_name) {
                report.skipped += 1;
                pb.inc(1);
                continue;
            }

            let readme = match self.github.fetch_readme(&repo.owner.login, &repo.name).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("Could not fetch README for {}: {}", repo.full_name, e);
                    String::new()
                }
            };

            let category = self.categorize(store, &repo.full_name, readme).await;
            report.assigned += 1;
            if category == self.config.fallback_category {
                report.fallback += 1;
            }

            pb.println(format!("{} -> {}", repo.full_name, category));
            pb.inc(1);
        }

        pb.finish_with_message("Classification complete");
        Ok(report)
    }

    /// Ask the model for a category and file the repository in the store.
    /// A failed request lands the repository in the fallback category.
    async fn categorize(
        &self,
        store: &mut CategoryStore,
        full_name: &str,
        readme: String,
    ) -> String {
        let request = CategoryRequest::new(
            full_name.to_string(),
            readme,
            self.config.max_readme_chars,
        );

        let suggested = match self.llm.suggest_category(request).await {
            Ok(label) => label,
            Err(e) => {
                tracing::warn!("{} request failed for {}: {}", self.llm.name(), full_name, e);
                self.config.fallback_category.clone()
            }
        };

        store.assign(
            &suggested,
            full_name,
            self.config.allow_new_categories,
            &self.config.fallback_category,
        )
    }
}
