//! JSON story miner: stories that only arrive through background API calls.
//!
//! Payload shapes are unknown ahead of time, so the miner walks the whole
//! value tree and tests every object against a key-set predicate. Matching
//! objects are still descended into, since one story can be nested inside
//! another story-shaped object.

use super::{StoryFilter, StoryStrategy};
use crate::models::{CapturedPayload, StorySeed};
use crate::utils::dedup_by_title;
use scraper::Html;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, instrument};

const TITLE_KEYS: &[&str] = &["title", "header", "headline", "name"];
const BODY_KEYS: &[&str] = &["content", "body", "text", "description"];
const IMAGE_KEYS: &[&str] = &[
    "image",
    "image_url",
    "img",
    "thumbnail",
    "featuredImage",
    "ogImage",
];
const NESTED_IMAGE_KEYS: &[&str] = &["url", "src", "source"];

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonStrategy;

impl StoryStrategy for JsonStrategy {
    fn name(&self) -> &'static str {
        "json"
    }

    /// Mine each payload in capture order. Duplicates across payloads are
    /// left for the orchestrator.
    fn extract(
        &self,
        _document: &Html,
        payloads: &[CapturedPayload],
        filter: &StoryFilter,
    ) -> Vec<StorySeed> {
        payloads
            .iter()
            .flat_map(|payload| {
                let seeds = mine_json(&payload.json, filter);
                debug!(source_url = %payload.source_url, count = seeds.len(), "Mined payload");
                seeds
            })
            .collect()
    }
}

/// Visitor over the tagged JSON tree. Only objects carry stories.
trait JsonVisitor {
    fn visit_object(&mut self, object: &Map<String, Value>);
}

fn walk(value: &Value, visitor: &mut impl JsonVisitor) {
    match value {
        Value::Object(object) => {
            visitor.visit_object(object);
            for child in object.values() {
                walk(child, visitor);
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, visitor);
            }
        }
        Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
    }
}

/// An object seen two ways: its key set lowercased for the story test, and
/// its exact keys for reading values. `{"Title": ..}` passes the test but
/// yields no title.
struct KeyView<'a> {
    object: &'a Map<String, Value>,
    folded: HashSet<String>,
}

impl<'a> KeyView<'a> {
    fn new(object: &'a Map<String, Value>) -> Self {
        let folded = object.keys().map(|key| key.to_lowercase()).collect();
        Self { object, folded }
    }

    fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.folded.contains(&key.to_lowercase()))
    }

    fn values(&self, keys: &'a [&'a str]) -> impl Iterator<Item = &'a Value> + '_ {
        let object = self.object;
        keys.iter().filter_map(move |key| object.get(*key))
    }

    /// Has a title-like key and a body-like key.
    fn looks_like_story(&self) -> bool {
        self.has_any(TITLE_KEYS) && self.has_any(BODY_KEYS)
    }

    fn title(&self) -> Option<&'a str> {
        self.values(TITLE_KEYS).find_map(Value::as_str)
    }

    /// A string body, or a list whose string elements join to something non-empty.
    fn body(&self) -> Option<String> {
        self.values(BODY_KEYS).find_map(|value| match value {
            Value::String(text) => Some(text.clone()),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(" ");
                (!joined.is_empty()).then_some(joined)
            }
            _ => None,
        })
    }

    /// A non-blank string, or an object with a nested `url`/`src`/`source`.
    fn image(&self) -> Option<String> {
        self.values(IMAGE_KEYS).find_map(|value| match value {
            Value::String(url) if !url.trim().is_empty() => Some(url.clone()),
            Value::Object(nested) => NESTED_IMAGE_KEYS
                .iter()
                .filter_map(|key| nested.get(*key).and_then(Value::as_str))
                .find(|url| !url.trim().is_empty())
                .map(str::to_string),
            _ => None,
        })
    }
}

struct StoryCollector<'f> {
    filter: &'f StoryFilter,
    seeds: Vec<StorySeed>,
}

impl JsonVisitor for StoryCollector<'_> {
    fn visit_object(&mut self, object: &Map<String, Value>) {
        let view = KeyView::new(object);
        if !view.looks_like_story() {
            return;
        }
        let title = view.title().unwrap_or_default();
        let body = view.body().unwrap_or_default();
        if let Some(seed) = self.filter.seed(title, &body, view.image()) {
            self.seeds.push(seed);
        }
    }
}

/// Find story-shaped objects anywhere in a JSON value.
#[instrument(level = "debug", skip_all)]
pub fn mine_json(tree: &Value, filter: &StoryFilter) -> Vec<StorySeed> {
    let mut collector = StoryCollector {
        filter,
        seeds: Vec::new(),
    };
    walk(tree, &mut collector);
    dedup_by_title(collector.seeds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(tag: &str) -> String {
        format!(
            "{tag}: the league leader's lead shrank to four points after a blank \
             from the premium forward and a surprise clean sheet at the bottom."
        )
    }

    #[test]
    fn test_nested_image_url() {
        let tree = json!({
            "items": [
                {"title": "A", "content": body("A"), "image": {"url": "http://x"}}
            ]
        });
        let seeds = mine_json(&tree, &StoryFilter::default());

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].title, "A");
        assert_eq!(seeds[0].image_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_story_nested_in_story() {
        let tree = json!({
            "headline": "Outer",
            "description": body("Outer"),
            "related": {"name": "Inner", "body": body("Inner"), "thumbnail": "http://t"}
        });
        let seeds = mine_json(&tree, &StoryFilter::default());

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].title, "Outer");
        assert_eq!(seeds[1].title, "Inner");
        assert_eq!(seeds[1].image_url.as_deref(), Some("http://t"));
    }

    #[test]
    fn test_body_from_string_list() {
        let tree = json!([{
            "title": "Listed",
            "text": ["First half was dull and goalless.", 3, "Second half exploded with five goals and two penalties saved."]
        }]);
        let seeds = mine_json(&tree, &StoryFilter::default());

        assert_eq!(seeds.len(), 1);
        assert_eq!(
            seeds[0].body,
            "First half was dull and goalless. Second half exploded with five goals and two penalties saved."
        );
    }

    #[test]
    fn test_story_test_ignores_case_but_values_need_exact_keys() {
        let tree = json!({"Title": "Capital Keys", "Content": body("Capital")});
        assert!(mine_json(&tree, &StoryFilter::default()).is_empty());

        let tree = json!({"Title": "Upper", "title": "Lower", "Content": body("Mixed")});
        let seeds = mine_json(&tree, &StoryFilter::default());
        assert_eq!(seeds.len(), 0);

        let tree = json!({"Title": "Upper", "title": "Lower", "content": body("Mixed")});
        let seeds = mine_json(&tree, &StoryFilter::default());
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].title, "Lower");
    }

    #[test]
    fn test_camel_case_image_keys() {
        let tree = json!({"title": "Og", "content": body("Og"), "ogImage": {"src": "http://og"}});
        let seeds = mine_json(&tree, &StoryFilter::default());
        assert_eq!(seeds[0].image_url.as_deref(), Some("http://og"));

        let tree = json!({"title": "Og", "content": body("Og"), "ogimage": "http://lower"});
        let seeds = mine_json(&tree, &StoryFilter::default());
        assert_eq!(seeds[0].image_url, None);
    }

    #[test]
    fn test_first_string_title_wins() {
        let tree = json!({"title": 42, "name": "Named", "content": body("Named")});
        let seeds = mine_json(&tree, &StoryFilter::default());
        assert_eq!(seeds[0].title, "Named");
    }

    #[test]
    fn test_rejections() {
        let tree = json!({
            "pages": [
                {"title": "Cookie Policy", "content": body("Cookies")},
                {"title": "Brief", "content": "too short"},
                {"title": "No body here", "image": "http://x"},
                {"title": "Blank image", "content": body("Blank"), "image": "   ", "img": {"url": ""}}
            ]
        });
        let seeds = mine_json(&tree, &StoryFilter::default());

        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].title, "Blank image");
        assert_eq!(seeds[0].image_url, None);
    }

    #[test]
    fn test_dedup_across_tree() {
        let tree = json!({
            "a": {"title": "Repeat", "content": body("one")},
            "b": [{"title": "REPEAT", "content": body("two")}]
        });
        let seeds = mine_json(&tree, &StoryFilter::default());

        assert_eq!(seeds.len(), 1);
        assert!(seeds[0].body.starts_with("one"));
    }

    #[test]
    fn test_strategy_mines_payloads_in_order() {
        let payloads = vec![
            CapturedPayload {
                source_url: "https://api.example/1".to_string(),
                json: json!({"title": "From One", "content": body("1")}),
            },
            CapturedPayload {
                source_url: "https://api.example/2".to_string(),
                json: json!([{"title": "From Two", "content": body("2")}]),
            },
        ];
        let doc = Html::parse_document("<html></html>");
        let seeds = JsonStrategy.extract(&doc, &payloads, &StoryFilter::default());

        let titles: Vec<_> = seeds.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["From One", "From Two"]);
    }
}
