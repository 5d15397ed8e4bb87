//! Default search parameters

use serde::{Deserialize, Serialize};

/// Parameters used when the caller does not override them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Number of documents requested from the backend
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Embedding model used for first-stage retrieval
    #[serde(default = "default_retriever_model")]
    pub retriever_model: String,

    /// Cross-encoder used to rerank retrieved candidates
    #[serde(default = "default_reranker_model")]
    pub reranker_model: String,

    /// Model driving the agentic search loop
    #[serde(default = "default_llm_model")]
    pub llm_model: String,

    #[serde(default = "default_true")]
    pub use_reranker: bool,

    #[serde(default = "default_true")]
    pub generate_answer: bool,

    /// Upper bound on agentic reasoning iterations
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            retriever_model: default_retriever_model(),
            reranker_model: default_reranker_model(),
            llm_model: default_llm_model(),
            use_reranker: true,
            generate_answer: true,
            max_iterations: default_max_iterations(),
        }
    }
}

impl crate::validation::Validate for DefaultsConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_range;

        validate_range("defaults.top_k", u64::from(self.top_k), 1, 100)?;
        validate_range("defaults.max_iterations", u64::from(self.max_iterations), 1, 20)?;

        for (field, value) in [
            ("defaults.retriever_model", &self.retriever_model),
            ("defaults.reranker_model", &self.reranker_model),
            ("defaults.llm_model", &self.llm_model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: field.to_string(),
                    message: "Model name cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

fn default_top_k() -> u32 {
    20
}

fn default_retriever_model() -> String {
    "Qwen3-Embedding-8B".to_string()
}

fn default_reranker_model() -> String {
    "Qwen3-Reranker-8B".to_string()
}

fn default_llm_model() -> String {
    "gpt-4".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_iterations() -> u32 {
    5
}
