use localsearch_config::{EndpointsConfig, TimeoutsConfig};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;

/// The three playground tools
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Rag,
    Web,
    Agentic,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Rag, SearchMode::Web, SearchMode::Agentic];

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Rag => "LocalRAG Search",
            SearchMode::Web => "Web Search",
            SearchMode::Agentic => "Agentic Search",
        }
    }

    pub fn endpoint<'a>(&self, endpoints: &'a EndpointsConfig) -> &'a str {
        match self {
            SearchMode::Rag => &endpoints.rag_search,
            SearchMode::Web => &endpoints.web_search,
            SearchMode::Agentic => &endpoints.agentic_search,
        }
    }

    /// How long a search in this mode is expected to take at most.
    /// Display only; requests are never aborted on it.
    pub fn expected_duration(&self, timeouts: &TimeoutsConfig) -> Duration {
        let ms = match self {
            SearchMode::Rag => timeouts.rag_ms,
            SearchMode::Web => timeouts.web_ms,
            SearchMode::Agentic => timeouts.agentic_ms,
        };
        Duration::from_millis(ms)
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A retrieved merchant/document after alias resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub score: f64,
    /// Every field the backend sent, untouched
    pub raw_fields: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub correctness: f64,
    pub completeness: f64,
    pub faithfulness: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Timings {
    pub retrieval_seconds: f64,
    pub generation_seconds: f64,
}

/// One step of an agentic search trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStep {
    pub step: usize,
    pub action: String,
    pub description: Option<String>,
    pub result: Option<String>,
}

/// Backend response mapped onto a fixed shape
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub documents: Vec<Document>,
    pub answer_text: String,
    pub metrics: Metrics,
    pub timings: Timings,
    pub steps: Vec<SearchStep>,
    pub model_used: Option<String>,
}
