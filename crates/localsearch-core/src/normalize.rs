//! Mapping of backend payloads onto [`SearchResult`].
//!
//! The backend has shipped several response shapes over time. Fields are
//! resolved through ordered alias lists; the first alias holding a usable
//! value wins and missing data degrades to placeholders.

use crate::models::{Document, Metrics, SearchResult, SearchStep, Timings};
use serde_json::{Map, Value};
use tracing::debug;

pub const TITLE_ALIASES: &[&str] = &["name", "title"];
pub const SCORE_ALIASES: &[&str] = &["rerank_score", "vector_score", "score", "similarity_score"];
pub const ANSWER_ALIASES: &[&str] = &["answer", "final_answer", "generated_answer"];
pub const SOURCE_ALIASES: &[&str] = &["sources", "retrieved_docs"];
pub const STEP_ALIASES: &[&str] = &["search_steps", "reasoning_steps"];

pub const UNTITLED: &str = "Untitled";
pub const NO_ANSWER: &str = "No answer generated";

/// Untyped backend response body
#[derive(Debug, Clone, PartialEq)]
pub struct RawPayload(pub Value);

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl RawPayload {
    pub fn normalize(&self) -> SearchResult {
        let empty = Map::new();
        let root = self.0.as_object().unwrap_or(&empty);

        let documents = first_defined(root, SOURCE_ALIASES)
            .and_then(Value::as_array)
            .map(|sources| sources.iter().filter_map(normalize_document).collect())
            .unwrap_or_default();

        let answer_text =
            first_text(root, ANSWER_ALIASES).unwrap_or_else(|| NO_ANSWER.to_string());

        let metrics_obj = root.get("metrics").and_then(Value::as_object);
        let metric = |key: &str| {
            metrics_obj
                .and_then(|m| m.get(key))
                .and_then(as_number)
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(0.0)
        };
        let metrics = Metrics {
            correctness: metric("correctness"),
            completeness: metric("completeness"),
            faithfulness: metric("faithfulness"),
        };

        let timings = Timings {
            retrieval_seconds: metrics_obj
                .and_then(|m| m.get("latency_ms"))
                .and_then(as_number)
                .map(|ms| ms / 1000.0)
                .unwrap_or(0.0),
            generation_seconds: root.get("processing_time").and_then(as_number).unwrap_or(0.0),
        };

        let steps = first_defined(root, STEP_ALIASES)
            .and_then(Value::as_array)
            .map(|steps| steps.iter().enumerate().filter_map(normalize_step).collect())
            .unwrap_or_default();

        SearchResult {
            documents,
            answer_text,
            metrics,
            timings,
            steps,
            model_used: first_text(root, &["model_used", "model"]),
        }
    }
}

/// First alias whose value is present and not null
pub fn first_defined<'a>(fields: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
}

/// First alias holding a numeric value (numbers or numeric strings)
pub fn first_number(fields: &Map<String, Value>, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .filter_map(|key| fields.get(*key))
        .find_map(as_number)
}

/// First alias holding a non-blank string
pub fn first_text(fields: &Map<String, Value>, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|key| fields.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn normalize_document(source: &Value) -> Option<Document> {
    let Some(fields) = source.as_object() else {
        debug!(?source, "skipping non-object source");
        return None;
    };

    Some(Document {
        title: first_text(fields, TITLE_ALIASES).unwrap_or_else(|| UNTITLED.to_string()),
        score: first_number(fields, SCORE_ALIASES).unwrap_or(0.0),
        raw_fields: fields.clone(),
    })
}

fn normalize_step((index, step): (usize, &Value)) -> Option<SearchStep> {
    match step {
        Value::String(text) => Some(SearchStep {
            step: index + 1,
            action: text.clone(),
            description: None,
            result: None,
        }),
        Value::Object(fields) => Some(SearchStep {
            step: fields
                .get("step")
                .and_then(Value::as_u64)
                .map(|n| n as usize)
                .unwrap_or(index + 1),
            action: first_text(fields, &["action", "name"])
                .unwrap_or_else(|| format!("Step {}", index + 1)),
            description: first_text(fields, &["description"]),
            result: first_defined(fields, &["result", "observation"]).map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            }),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rerank_score_wins() {
        let payload = RawPayload(json!({
            "sources": [{ "name": "海底捞火锅", "rerank_score": 0.81, "vector_score": 0.5 }]
        }));
        let result = payload.normalize();
        assert_eq!(result.documents[0].score, 0.81);
    }

    #[test]
    fn test_score_alias_order() {
        let payload = RawPayload(json!({
            "sources": [
                { "vector_score": 0.4, "score": 0.3, "similarity_score": 0.2 },
                { "rerank_score": null, "score": 0.3, "similarity_score": 0.2 },
                { "similarity_score": 0.2 },
                {}
            ]
        }));
        let scores: Vec<f64> = payload.normalize().documents.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.4, 0.3, 0.2, 0.0]);
    }

    #[test]
    fn test_zero_score_is_defined() {
        let payload = RawPayload(json!({
            "sources": [{ "rerank_score": 0.0, "vector_score": 0.7 }]
        }));
        assert_eq!(payload.normalize().documents[0].score, 0.0);
    }

    #[test]
    fn test_title_fallbacks() {
        let payload = RawPayload(json!({
            "sources": [
                { "name": "呷哺呷哺", "title": "ignored" },
                { "title": "小龙坎火锅" },
                { "name": "" },
                { "address": "五道口" }
            ]
        }));
        let titles: Vec<String> = payload
            .normalize()
            .documents
            .into_iter()
            .map(|d| d.title)
            .collect();
        assert_eq!(titles, vec!["呷哺呷哺", "小龙坎火锅", "Untitled", "Untitled"]);
    }

    #[test]
    fn test_extra_fields_retained() {
        let payload = RawPayload(json!({
            "sources": [{ "name": "蜀大侠火锅", "avg_price": 140, "tags": ["停车"] }]
        }));
        let doc = &payload.normalize().documents[0];
        assert_eq!(doc.raw_fields["avg_price"], 140);
        assert_eq!(doc.raw_fields["tags"], json!(["停车"]));
    }

    #[test]
    fn test_answer_metrics_and_timings() {
        let payload = RawPayload(json!({
            "answer": "推荐海底捞",
            "sources": [],
            "metrics": { "correctness": 0.95, "completeness": 1.4, "faithfulness": "0.9", "latency_ms": 320 },
            "processing_time": 1.45
        }));
        let result = payload.normalize();
        assert_eq!(result.answer_text, "推荐海底捞");
        assert_eq!(result.metrics.correctness, 0.95);
        assert_eq!(result.metrics.completeness, 1.0);
        assert_eq!(result.metrics.faithfulness, 0.9);
        assert!((result.timings.retrieval_seconds - 0.32).abs() < 1e-9);
        assert_eq!(result.timings.generation_seconds, 1.45);
    }

    #[test]
    fn test_placeholders_for_unexpected_shape() {
        let result = RawPayload(json!(["not", "an", "object"])).normalize();
        assert!(result.documents.is_empty());
        assert_eq!(result.answer_text, NO_ANSWER);
        assert_eq!(result.metrics, Metrics::default());
        assert_eq!(result.timings, Timings::default());
    }

    #[test]
    fn test_agentic_steps() {
        let payload = RawPayload(json!({
            "final_answer": "海底捞",
            "search_steps": [
                { "step": 1, "action": "Query Analysis", "description": "Analyzing", "result": "location=五道口" },
                { "action": "Merchant Search", "result": { "found": 15 } }
            ],
            "model_used": "gpt-4.1"
        }));
        let result = payload.normalize();
        assert_eq!(result.answer_text, "海底捞");
        assert_eq!(result.steps.len(), 2);
        assert_eq!(result.steps[1].step, 2);
        assert_eq!(result.steps[1].result.as_deref(), Some(r#"{"found":15}"#));
        assert_eq!(result.model_used.as_deref(), Some("gpt-4.1"));
    }

    #[test]
    fn test_reasoning_steps_as_strings() {
        let payload = RawPayload(json!({
            "answer": "ok",
            "reasoning_steps": ["extract location", "search merchants"]
        }));
        let steps = payload.normalize().steps;
        assert_eq!(steps[0].step, 1);
        assert_eq!(steps[1].action, "search merchants");
    }
}
