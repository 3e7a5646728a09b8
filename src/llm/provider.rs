use async_trait::async_trait;
use crate::error::Result;
use crate::llm::prompts::CategoryRequest;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn suggest_category(&self, request: CategoryRequest) -> Result<String>;
    fn name(&self) -> &str;
}
