//! Form validation and request composition.

use crate::city;
use crate::models::SearchMode;
use localsearch_config::DefaultsConfig;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("please select a city")]
    MissingCity,

    #[error("please enter a query")]
    EmptyQuery,

    #[error("top_k must be greater than 0")]
    InvalidTopK,
}

/// Raw user input for one search form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    pub city: Option<String>,
    pub location: Option<String>,
    pub query: String,
    pub top_k: Option<u32>,
    pub retriever_model: Option<String>,
    pub reranker_model: Option<String>,
    pub model_name: Option<String>,
}

impl QueryForm {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Prefill from one of the canned example queries
    pub fn from_example(index: usize) -> Option<Self> {
        city::EXAMPLE_QUERIES.get(index).map(|ex| {
            Self::new(ex.query)
                .with_city(ex.city)
                .with_location(ex.location)
        })
    }

    /// Check required fields and build the request for `mode`
    ///
    /// Unset parameters fall back to `defaults`.
    pub fn into_request(
        self,
        mode: SearchMode,
        defaults: &DefaultsConfig,
    ) -> Result<SearchRequest, ValidationError> {
        let city = non_empty(self.city).ok_or(ValidationError::MissingCity)?;

        let query_text = self.query.trim().to_string();
        if query_text.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let top_k = self.top_k.unwrap_or(defaults.top_k);
        if top_k == 0 {
            return Err(ValidationError::InvalidTopK);
        }

        Ok(SearchRequest {
            mode,
            query_text,
            city: Some(city),
            location: non_empty(self.location),
            top_k,
            retriever_model: Some(
                non_empty(self.retriever_model).unwrap_or_else(|| defaults.retriever_model.clone()),
            ),
            reranker_model: Some(
                non_empty(self.reranker_model).unwrap_or_else(|| defaults.reranker_model.clone()),
            ),
            model_name: Some(
                non_empty(self.model_name).unwrap_or_else(|| defaults.llm_model.clone()),
            ),
            use_reranker: defaults.use_reranker,
            generate_answer: defaults.generate_answer,
            max_iterations: defaults.max_iterations,
        })
    }
}

/// Trimmed value, `None` when blank
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A validated search, built fresh per submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub mode: SearchMode,
    /// Trimmed query text
    pub query_text: String,
    /// City code as selected in the form
    pub city: Option<String>,
    /// Trimmed location, `None` when blank
    pub location: Option<String>,
    pub top_k: u32,
    pub retriever_model: Option<String>,
    pub reranker_model: Option<String>,
    pub model_name: Option<String>,
    pub use_reranker: bool,
    pub generate_answer: bool,
    pub max_iterations: u32,
}

impl SearchRequest {
    /// `"{location} {query}"` when a location was given, else the query alone
    pub fn composed_query(&self) -> String {
        match &self.location {
            Some(location) => format!("{} {}", location, self.query_text),
            None => self.query_text.clone(),
        }
    }

    /// City name in the form the backend expects
    pub fn backend_city(&self) -> Option<&str> {
        self.city.as_deref().map(city::display_name)
    }

    /// JSON body for the mode's endpoint
    pub fn body(&self) -> SearchBody {
        let base = SearchBody {
            query: self.composed_query(),
            city: self.backend_city().map(str::to_string),
            ..Default::default()
        };

        match self.mode {
            SearchMode::Rag => SearchBody {
                top_k: Some(self.top_k),
                retriever_model: self.retriever_model.clone(),
                reranker_model: self.reranker_model.clone(),
                use_reranker: Some(self.use_reranker),
                generate_answer: Some(self.generate_answer),
                ..base
            },
            SearchMode::Web => SearchBody {
                top_k: Some(self.top_k),
                generate_answer: Some(self.generate_answer),
                ..base
            },
            SearchMode::Agentic => SearchBody {
                model: self.model_name.clone(),
                max_iterations: Some(self.max_iterations),
                ..base
            },
        }
    }
}

/// Wire format of a search POST
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchBody {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retriever_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reranker_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_reranker: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generate_answer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_iterations: Option<u32>,
}
