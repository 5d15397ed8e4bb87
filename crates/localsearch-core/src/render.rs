//! View model for search results.
//!
//! Rendering is a pure function of a [`SearchResult`]; the only mutable
//! view state is whether a folded card list has been expanded.

use crate::models::{Document, Metrics, SearchMode, SearchResult, SearchStep, Timings};
use serde_json::Value;
use std::fmt;

/// Cards shown before a list needs an explicit "show more"
pub const FOLD_THRESHOLD: usize = 5;

/// Strings longer than this many chars are cut and suffixed with `...`
pub const MAX_TEXT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Basic,
    Location,
    Business,
    Delivery,
    Tags,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 5] = [
        FieldCategory::Basic,
        FieldCategory::Location,
        FieldCategory::Business,
        FieldCategory::Delivery,
        FieldCategory::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldCategory::Basic => "Basic info",
            FieldCategory::Location => "Location",
            FieldCategory::Business => "Hours & pricing",
            FieldCategory::Delivery => "Delivery",
            FieldCategory::Tags => "Tags & facilities",
        }
    }

    /// Field keys in display order
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            FieldCategory::Basic => &["name", "category", "subcategory", "description"],
            FieldCategory::Location => &[
                "address",
                "city",
                "district",
                "business_area",
                "landmark",
                "latitude",
                "longitude",
            ],
            FieldCategory::Business => &[
                "business_hours",
                "price_range",
                "avg_price",
                "rating",
                "review_count",
                "phone",
                "mobile",
                "email",
            ],
            FieldCategory::Delivery => &[
                "delivery_available",
                "delivery_range",
                "delivery_fee",
                "min_order_amount",
            ],
            FieldCategory::Tags => &["tags", "facilities", "promotions", "products", "group_deals"],
        }
    }
}

/// One object out of an array-of-objects field
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    /// 1-based position in the full list
    pub index: usize,
    pub entries: Vec<(String, String)>,
}

/// Collapsible list of cards
#[derive(Debug, Clone, PartialEq)]
pub struct CardList {
    cards: Vec<Card>,
    expanded: bool,
}

impl CardList {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            expanded: false,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn visible(&self) -> &[Card] {
        if self.expanded {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(FOLD_THRESHOLD)]
        }
    }

    /// Cards still behind "show more"
    pub fn hidden_count(&self) -> usize {
        self.cards.len() - self.visible().len()
    }

    pub fn show_more(&mut self) {
        self.expanded = true;
    }

    pub fn show_less(&mut self) {
        self.expanded = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Flag(bool),
    Number(f64),
    Text(String),
    Cards(CardList),
}

impl FieldValue {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Missing,
            Value::Bool(b) => FieldValue::Flag(*b),
            Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Missing),
            Value::String(s) if s.is_empty() => FieldValue::Missing,
            Value::String(s) => FieldValue::Text(truncate(s)),
            Value::Array(items) if items.is_empty() => FieldValue::Missing,
            Value::Array(items) if items.iter().any(Value::is_object) => {
                FieldValue::Cards(CardList::new(to_cards(items)))
            }
            Value::Array(items) => {
                FieldValue::Text(items.iter().map(plain).collect::<Vec<_>>().join(", "))
            }
            Value::Object(_) => FieldValue::Text(truncate(&value.to_string())),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Missing => f.write_str("N/A"),
            FieldValue::Flag(true) => f.write_str("✓"),
            FieldValue::Flag(false) => f.write_str("✗"),
            FieldValue::Number(n) => write!(f, "{:.4}", n),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Cards(list) => write!(f, "{} item(s)", list.len()),
        }
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_TEXT_CHARS {
        let head: String = s.chars().take(MAX_TEXT_CHARS).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Value as shown inside a card or a joined list
fn plain(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_cards(items: &[Value]) -> Vec<Card> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| Card {
            index: i + 1,
            entries: match item {
                Value::Object(fields) => fields.iter().map(|(k, v)| (k.clone(), plain(v))).collect(),
                other => vec![("value".to_string(), plain(other))],
            },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldRow {
    pub key: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldGroup {
    pub category: FieldCategory,
    pub rows: Vec<FieldRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    pub rank: usize,
    pub title: String,
    pub score: f64,
    /// Only categories with at least one present field
    pub groups: Vec<FieldGroup>,
    /// Full payload, pretty-printed
    pub raw_json: String,
}

impl DocumentView {
    pub fn render(rank: usize, doc: &Document) -> Self {
        let groups = FieldCategory::ALL
            .iter()
            .filter_map(|category| {
                let rows: Vec<FieldRow> = category
                    .fields()
                    .iter()
                    .filter_map(|key| {
                        doc.raw_fields.get(*key).map(|value| FieldRow {
                            key: key.to_string(),
                            value: FieldValue::from_json(value),
                        })
                    })
                    .collect();
                (!rows.is_empty()).then_some(FieldGroup {
                    category: *category,
                    rows,
                })
            })
            .collect();

        let raw_json = serde_json::to_string_pretty(&doc.raw_fields).unwrap_or_default();

        Self {
            rank,
            title: doc.title.clone(),
            score: doc.score,
            groups,
            raw_json,
        }
    }

    /// Every folded card list in this document
    pub fn card_lists_mut(&mut self) -> impl Iterator<Item = &mut CardList> {
        self.groups
            .iter_mut()
            .flat_map(|g| g.rows.iter_mut())
            .filter_map(|row| match &mut row.value {
                FieldValue::Cards(list) => Some(list),
                _ => None,
            })
    }
}

/// Everything the result panel of one mode shows
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub mode: SearchMode,
    pub documents: Vec<DocumentView>,
    pub answer: String,
    pub metrics: Metrics,
    pub timings: Timings,
    pub steps: Vec<SearchStep>,
    pub model_used: Option<String>,
}

impl ResultView {
    pub fn render(mode: SearchMode, result: &SearchResult) -> Self {
        let documents = result
            .documents
            .iter()
            .enumerate()
            .map(|(i, doc)| DocumentView::render(i + 1, doc))
            .collect();

        Self {
            mode,
            documents,
            answer: result.answer_text.clone(),
            metrics: result.metrics,
            timings: result.timings,
            steps: result.steps.clone(),
            model_used: result.model_used.clone(),
        }
    }

    /// Expand every folded list
    pub fn expand_all(&mut self) {
        for doc in &mut self.documents {
            doc.card_lists_mut().for_each(CardList::show_more);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::RawPayload;
    use serde_json::json;

    fn first_doc(source: Value) -> DocumentView {
        let result = RawPayload(json!({ "sources": [source] })).normalize();
        DocumentView::render(1, &result.documents[0])
    }

    #[test]
    fn test_groups_in_fixed_order() {
        let view = first_doc(json!({
            "name": "海底捞火锅",
            "tags": ["停车", "深夜"],
            "address": "五道口",
            "rerank_score": 0.92
        }));
        let categories: Vec<FieldCategory> = view.groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![FieldCategory::Basic, FieldCategory::Location, FieldCategory::Tags]
        );
        assert_eq!(view.groups[2].rows[0].value.to_string(), "停车, 深夜");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(FieldValue::from_json(&json!(null)).to_string(), "N/A");
        assert_eq!(FieldValue::from_json(&json!("")).to_string(), "N/A");
        assert_eq!(FieldValue::from_json(&json!([])).to_string(), "N/A");
        assert_eq!(FieldValue::from_json(&json!(true)).to_string(), "✓");
        assert_eq!(FieldValue::from_json(&json!(false)).to_string(), "✗");
        assert_eq!(FieldValue::from_json(&json!(4.8)).to_string(), "4.8000");
    }

    #[test]
    fn test_long_text_truncated_by_chars() {
        let long = "五".repeat(150);
        let value = FieldValue::from_json(&json!(long)).to_string();
        assert_eq!(value.chars().count(), MAX_TEXT_CHARS + 3);
        assert!(value.ends_with("..."));
    }

    #[test]
    fn test_card_list_folds_after_five() {
        let deals: Vec<Value> = (1..=8)
            .map(|i| json!({ "title": format!("团购 {}", i), "price": i * 10 }))
            .collect();
        let mut view = first_doc(json!({ "name": "x", "group_deals": deals }));

        let list = view.card_lists_mut().next().unwrap();
        assert_eq!(list.visible().len(), 5);
        assert_eq!(list.hidden_count(), 3);
        assert_eq!(list.visible()[4].index, 5);

        list.show_more();
        assert_eq!(list.visible().len(), 8);
        assert_eq!(list.hidden_count(), 0);
        assert_eq!(list.visible()[7].entries[0], ("price".to_string(), "80".to_string()));
    }

    #[test]
    fn test_short_card_list_not_folded() {
        let view = first_doc(json!({ "products": [{ "name": "锅底" }, { "name": "肥牛" }] }));
        match &view.groups[0].rows[0].value {
            FieldValue::Cards(list) => assert_eq!(list.hidden_count(), 0),
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_result_view_expand_all() {
        let products: Vec<Value> = (0..7).map(|i| json!({ "id": i })).collect();
        let result = RawPayload(json!({
            "answer": "ok",
            "sources": [{ "name": "a", "products": products }]
        }))
        .normalize();

        let mut view = ResultView::render(SearchMode::Rag, &result);
        assert_eq!(view.documents[0].rank, 1);
        view.expand_all();
        let hidden: usize = view.documents[0].card_lists_mut().map(|l| l.hidden_count()).sum();
        assert_eq!(hidden, 0);
    }
}
