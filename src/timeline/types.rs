//! Timeline data types.

use serde::{Deserialize, Serialize};

/// Title used when a parsed or client object has no usable title.
pub const UNTITLED_MILESTONE: &str = "Untitled milestone";

/// Description used when a parsed or client object has no usable description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// One milestone in a generated timeline.
///
/// Events are unique only by position; the front-end keys them by index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Short milestone title.
    pub title: String,
    /// Year or date string, shown verbatim.
    pub date: String,
    /// Longer description.
    pub description: String,
}

impl TimelineEvent {
    /// Create a new event.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            description: description.into(),
        }
    }

    /// Normalize an arbitrary JSON value into an event.
    ///
    /// Returns `None` for non-objects. Missing or blank fields get
    /// placeholders; a missing date becomes `default_year`.
    ///
    /// # Example
    ///
    /// ```
    /// use scenario_timeline::timeline::TimelineEvent;
    ///
    /// let value = serde_json::json!({"title": " Launch ", "date": 2031});
    /// let event = TimelineEvent::from_value(&value, 2026).unwrap();
    /// assert_eq!(event.title, "Launch");
    /// assert_eq!(event.date, "2031");
    /// assert_eq!(event.description, "No description provided.");
    /// ```
    #[must_use]
    pub fn from_value(value: &serde_json::Value, default_year: i32) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            title: field_text(obj.get("title")).unwrap_or_else(|| UNTITLED_MILESTONE.to_string()),
            date: field_text(obj.get("date")).unwrap_or_else(|| default_year.to_string()),
            description: field_text(obj.get("description"))
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        })
    }

    /// Normalize every object element of a JSON array, dropping the rest.
    #[must_use]
    pub fn list_from_values(values: &[serde_json::Value], default_year: i32) -> Vec<Self> {
        values
            .iter()
            .filter_map(|v| Self::from_value(v, default_year))
            .collect()
    }

    /// Normalize a client-supplied event list, keeping every position.
    ///
    /// Non-object elements become placeholder events so that parallel
    /// expansion lists still line up by index.
    #[must_use]
    pub fn list_from_values_aligned(values: &[serde_json::Value], default_year: i32) -> Vec<Self> {
        values
            .iter()
            .map(|v| {
                Self::from_value(v, default_year).unwrap_or_else(|| {
                    Self::new(UNTITLED_MILESTONE, default_year.to_string(), NO_DESCRIPTION)
                })
            })
            .collect()
    }
}

/// Trimmed text of a string or number field; blank strings count as absent.
fn field_text(value: Option<&serde_json::Value>) -> Option<String> {
    let text = match value? {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Highest index accepted from an index-keyed expansion object.
const MAX_EXPANSION_INDEX: usize = 10_000;

/// Client-held expansion state for one event in an exported session.
///
/// `children_expanded[i]` describes the expansion of `children[i]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionNode {
    /// Sub-events generated when the user expanded the parent event.
    pub children: Vec<TimelineEvent>,
    /// Expansion state of each child, parallel to `children`.
    pub children_expanded: Vec<Option<ExpansionNode>>,
}

impl ExpansionNode {
    /// Read a node from client JSON (`{children, childrenExpanded}`).
    ///
    /// Returns `None` unless the value is an object.
    #[must_use]
    pub fn from_value(value: &serde_json::Value, default_year: i32) -> Option<Self> {
        let obj = value.as_object()?;
        let children = obj
            .get("children")
            .and_then(serde_json::Value::as_array)
            .map(|arr| TimelineEvent::list_from_values_aligned(arr, default_year))
            .unwrap_or_default();
        let children_expanded = obj
            .get("childrenExpanded")
            .map(|v| Self::list_from_value(v, default_year))
            .unwrap_or_default();

        Some(Self {
            children,
            children_expanded,
        })
    }

    /// Read a parallel expansion list.
    ///
    /// Accepts an array, or an object keyed by decimal index (`{"0": {...}}`).
    /// Anything else yields an empty list.
    #[must_use]
    pub fn list_from_value(value: &serde_json::Value, default_year: i32) -> Vec<Option<Self>> {
        match value {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|v| Self::from_value(v, default_year))
                .collect(),
            serde_json::Value::Object(map) => {
                let indexed: Vec<(usize, Self)> = map
                    .iter()
                    .filter_map(|(key, v)| {
                        let index: usize = key.parse().ok()?;
                        if index > MAX_EXPANSION_INDEX {
                            return None;
                        }
                        Some((index, Self::from_value(v, default_year)?))
                    })
                    .collect();
                let len = indexed.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
                let mut list = vec![None; len];
                for (i, node) in indexed {
                    list[i] = Some(node);
                }
                list
            }
            _ => Vec::new(),
        }
    }

    /// Whether this node has children to render.
    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}
