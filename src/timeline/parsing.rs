//! Best-effort extraction of timeline events from model output.
//!
//! Model text is noisy: it may wrap JSON in code fences, add commentary
//! around it, return a single object instead of an array, or not be JSON at
//! all. [`parse_timeline`] runs a fixed chain of strategies and always
//! yields at least one event:
//!
//! 1. [`ParseStrategy::ArrayParse`]: first `[` through last `]`
//! 2. [`ParseStrategy::ObjectParse`]: first `{` through last `}`
//! 3. [`ParseStrategy::RawFallback`]: the trimmed input as one event
//!
//! Code-fence delimiters are removed before the JSON strategies run. The
//! fallback keeps the model's text as written.

use serde::Serialize;

use super::types::TimelineEvent;
use crate::error::ScenarioError;

/// Description used by the fallback event when the model returned nothing.
pub const FALLBACK_DESCRIPTION: &str = "No scenario returned.";

/// Which strategy produced the events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseStrategy {
    /// A JSON array of event objects.
    ArrayParse,
    /// A single JSON event object.
    ObjectParse,
    /// Raw text wrapped in one synthetic event.
    RawFallback,
}

impl ParseStrategy {
    /// All strategies, in chain order.
    pub const ALL: [Self; 3] = [Self::ArrayParse, Self::ObjectParse, Self::RawFallback];

    /// Stable name for logs and metrics.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArrayParse => "array_parse",
            Self::ObjectParse => "object_parse",
            Self::RawFallback => "raw_fallback",
        }
    }
}

impl std::fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parser output: a non-empty event list and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimeline {
    /// Events in model order.
    pub events: Vec<TimelineEvent>,
    /// Strategy that produced `events`.
    pub strategy: ParseStrategy,
}

/// Parse model output into timeline events. Never fails.
///
/// # Example
///
/// ```
/// use scenario_timeline::timeline::{parse_timeline, ParseStrategy};
///
/// let text = "```json\n[{\"title\":\"A\",\"date\":\"2026\",\"description\":\"B\"}]\n```";
/// let parsed = parse_timeline(text, "fusion", 2026);
/// assert_eq!(parsed.strategy, ParseStrategy::ArrayParse);
/// assert_eq!(parsed.events[0].title, "A");
///
/// let parsed = parse_timeline("not json", "fusion", 2026);
/// assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
/// assert_eq!(parsed.events[0].title, "Scenario for: fusion");
/// ```
#[must_use]
pub fn parse_timeline(text: &str, topic: &str, year: i32) -> ParsedTimeline {
    let cleaned = strip_code_fences(text);

    if let Some(events) = parse_array(&cleaned, year) {
        return ParsedTimeline {
            events,
            strategy: ParseStrategy::ArrayParse,
        };
    }

    if let Some(events) = parse_object(&cleaned, year) {
        return ParsedTimeline {
            events,
            strategy: ParseStrategy::ObjectParse,
        };
    }

    ParsedTimeline {
        events: vec![fallback_event(text, topic, year)],
        strategy: ParseStrategy::RawFallback,
    }
}

/// Remove code-fence delimiters (```` ``` ```` plus an optional language tag).
///
/// Fences alternate between opening and closing. A tag is only recognized
/// directly after an opening fence and must run to the end of its line, so
/// inline fences around prose keep every word. The fenced content itself is
/// kept.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut opening = true;
    while let Some(idx) = rest.find("```") {
        out.push_str(&rest[..idx]);
        rest = &rest[idx + 3..];
        if opening {
            rest = skip_language_tag(rest);
        }
        opening = !opening;
    }
    out.push_str(rest);
    out
}

/// Skip a `[A-Za-z0-9_+-]*` tag that ends at a line break or end of text.
fn skip_language_tag(rest: &str) -> &str {
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-')))
        .unwrap_or(rest.len());
    let after = &rest[tag_len..];
    if after.is_empty() || after.starts_with('\n') || after.starts_with("\r\n") {
        after
    } else {
        rest
    }
}

/// Greedy array strategy: first `[` through last `]`.
///
/// Accepts only a JSON array that still has at least one event after
/// non-object elements are dropped.
#[must_use]
pub fn parse_array(text: &str, year: i32) -> Option<Vec<TimelineEvent>> {
    let slice = greedy_slice(text, '[', ']')?;
    let value: serde_json::Value = serde_json::from_str(slice).ok()?;
    let events = TimelineEvent::list_from_values(value.as_array()?, year);
    (!events.is_empty()).then_some(events)
}

/// Greedy object strategy: first `{` through last `}`.
#[must_use]
pub fn parse_object(text: &str, year: i32) -> Option<Vec<TimelineEvent>> {
    let slice = greedy_slice(text, '{', '}')?;
    let value: serde_json::Value = serde_json::from_str(slice).ok()?;
    TimelineEvent::from_value(&value, year).map(|event| vec![event])
}

/// The single event returned when no JSON could be recovered.
#[must_use]
pub fn fallback_event(text: &str, topic: &str, year: i32) -> TimelineEvent {
    let trimmed = text.trim();
    TimelineEvent::new(
        format!("Scenario for: {topic}"),
        year.to_string(),
        if trimmed.is_empty() {
            FALLBACK_DESCRIPTION
        } else {
            trimmed
        },
    )
}

/// Extract a JSON value from free text.
///
/// Tries the whole (fence-stripped) text, then the greedy array, then the
/// greedy object. Used where the caller needs raw JSON rather than events.
///
/// # Errors
///
/// Returns [`ScenarioError::JsonParseFailed`] with a preview of the text
/// when no candidate parses.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ScenarioError> {
    let cleaned = strip_code_fences(text);
    let trimmed = cleaned.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    for (open, close) in [('[', ']'), ('{', '}')] {
        if let Some(value) = greedy_slice(trimmed, open, close)
            .and_then(|slice| serde_json::from_str(slice).ok())
        {
            return Ok(value);
        }
    }

    Err(ScenarioError::JsonParseFailed {
        message: format!(
            "No valid JSON found in response: {}",
            truncate_for_preview(trimmed, 100)
        ),
    })
}

fn greedy_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    (end > start).then(|| &text[start..=end])
}

fn truncate_for_preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use test_case::test_case;

    const VALID: &str = r#"[{"title":"A","date":"2026","description":"B"}]"#;

    #[test]
    fn test_valid_array_parses_exactly() {
        let parsed = parse_timeline(VALID, "topic", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::ArrayParse);
        assert_eq!(parsed.events, vec![TimelineEvent::new("A", "2026", "B")]);
    }

    #[test_case("```json\n{}\n```" ; "json tag")]
    #[test_case("```\n{}\n```" ; "no tag")]
    #[test_case("Here you go:\n```JSON\n{}\n```\nEnjoy!" ; "with commentary")]
    fn test_fenced_array_parses_as_unfenced(template: &str) {
        let text = template.replace("{}", VALID);
        let fenced = parse_timeline(&text, "topic", 2026);
        let plain = parse_timeline(VALID, "topic", 2026);
        assert_eq!(fenced, plain);
    }

    #[test]
    fn test_array_with_surrounding_prose() {
        let text = format!("Sure! Here is the timeline: {VALID} Hope this helps.");
        let parsed = parse_timeline(&text, "topic", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::ArrayParse);
        assert_eq!(parsed.events.len(), 1);
    }

    #[test]
    fn test_count_is_not_enforced() {
        let many: Vec<_> = (0..12)
            .map(|i| serde_json::json!({"title": format!("E{i}"), "date": "2030", "description": "d"}))
            .collect();
        let text = serde_json::to_string(&many).unwrap();
        assert_eq!(parse_timeline(&text, "t", 2026).events.len(), 12);
    }

    #[test]
    fn test_single_object_parses_as_one_event() {
        let text = r#"{"title":"Solo","date":"2031","description":"Only one"}"#;
        let parsed = parse_timeline(text, "topic", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::ObjectParse);
        assert_eq!(parsed.events, vec![TimelineEvent::new("Solo", "2031", "Only one")]);
    }

    #[test]
    fn test_empty_array_falls_through_to_object() {
        let text = r#"[] {"title":"X","date":"2027","description":"y"}"#;
        let parsed = parse_timeline(text, "topic", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::ObjectParse);
        assert_eq!(parsed.events[0].title, "X");
    }

    #[test]
    fn test_array_of_scalars_falls_back() {
        let parsed = parse_timeline("[1, 2, 3]", "topic", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(parsed.events[0].description, "[1, 2, 3]");
    }

    #[test]
    fn test_malformed_text_becomes_fallback_event() {
        let parsed = parse_timeline("  The future is bright.  ", "solar power", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(
            parsed.events,
            vec![TimelineEvent::new(
                "Scenario for: solar power",
                "2026",
                "The future is bright."
            )]
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("   \n\t" ; "whitespace")]
    fn test_empty_text_uses_placeholder(text: &str) {
        let parsed = parse_timeline(text, "topic", 2026);
        assert_eq!(parsed.events[0].description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_broken_json_falls_back_to_raw_text() {
        let text = r#"[{"title": "A", "date": }"#;
        let parsed = parse_timeline(text, "t", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(parsed.events[0].description, text);
    }

    #[test]
    fn test_strip_code_fences_keeps_content() {
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "\n[1]\n");
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("a ``` b"), "a  b");
        assert_eq!(strip_code_fences("```c++\nx\n```"), "\nx\n");
        assert_eq!(strip_code_fences("```\nx\n```done"), "\nx\ndone");
    }

    #[test]
    fn test_inline_fences_keep_words() {
        assert_eq!(
            strip_code_fences("The plan is ```Phase one``` done"),
            "The plan is Phase one done"
        );
        assert_eq!(strip_code_fences("```Phase```"), "Phase");
    }

    #[test_case("The plan is ```Phase one``` done" ; "inline fence")]
    #[test_case("```markdown\nRenewables dominate by 2030.\n```" ; "fenced prose")]
    #[test_case("```\n```" ; "empty fence")]
    fn test_fallback_keeps_input_verbatim(text: &str) {
        let parsed = parse_timeline(text, "energy", 2026);
        assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
        assert_eq!(parsed.events[0].description, text.trim());
    }

    #[test]
    fn test_greedy_slice_requires_order() {
        assert_eq!(greedy_slice("] x [", '[', ']'), None);
        assert_eq!(greedy_slice("a [1] b [2] c", '[', ']'), Some("[1] b [2]"));
    }

    #[test]
    fn test_extract_json_variants() {
        assert_eq!(extract_json(r#"{"a":1}"#).unwrap()["a"], 1);
        assert_eq!(extract_json("```json\n[1,2]\n```").unwrap()[1], 2);
        assert_eq!(
            extract_json(r#"Result: {"topics":["x"]} done"#).unwrap()["topics"][0],
            "x"
        );
    }

    #[test]
    fn test_extract_json_failure_has_preview() {
        let err = extract_json(&"z".repeat(300)).unwrap_err();
        match err {
            ScenarioError::JsonParseFailed { message } => {
                assert!(message.ends_with("..."));
                assert!(message.len() < 200);
            }
            other => unreachable!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_strategy_names() {
        let names: Vec<_> = ParseStrategy::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(names, vec!["array_parse", "object_parse", "raw_fallback"]);
    }

    proptest! {
        #[test]
        fn prop_parse_never_returns_empty(text in ".*", topic in "[a-z ]{1,20}") {
            let parsed = parse_timeline(&text, &topic, 2026);
            prop_assert!(!parsed.events.is_empty());
            for event in &parsed.events {
                prop_assert!(!event.title.is_empty());
                prop_assert!(!event.date.is_empty());
            }
        }

        #[test]
        fn prop_text_without_brackets_is_raw(text in "[a-zA-Z0-9 .,!?]{0,200}") {
            let parsed = parse_timeline(&text, "t", 2026);
            prop_assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
            let expected = if text.trim().is_empty() { FALLBACK_DESCRIPTION } else { text.trim() };
            prop_assert_eq!(&parsed.events[0].description, expected);
        }

        #[test]
        fn prop_fallback_description_is_trimmed_input(text in "[a-zA-Z `\n]{1,120}") {
            let parsed = parse_timeline(&text, "t", 2026);
            prop_assert_eq!(parsed.strategy, ParseStrategy::RawFallback);
            let expected = if text.trim().is_empty() { FALLBACK_DESCRIPTION } else { text.trim() };
            prop_assert_eq!(&parsed.events[0].description, expected);
        }
    }
}
