//! Scenario aggregate types.
//!
//! These are both the structured-output schemas sent to the model (via
//! [`schemars::JsonSchema`]) and the JSON shape served by `GET /api/scenarios`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A generated scenario: a title, a description and its steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Scenario {
    /// Short title.
    pub title: String,
    /// One-paragraph description.
    pub description: String,
    /// Steps that contribute to the scenario.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// When a step could be realized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EtaEstimate {
    /// Concise sentence describing the estimated timeline.
    pub eta: String,
}

/// A historical event comparable to a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HistoricalAnalogy {
    /// Name of the historical event.
    pub event: String,
    /// What the event and the step have in common.
    pub similarity: String,
    /// Lesson to carry over.
    pub lesson: String,
}

/// Someone affected by a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Stakeholder {
    /// Name or type of stakeholder.
    pub name: String,
    /// Role (e.g. Beneficiary, Regulator).
    pub role: String,
    /// Their part in this scenario.
    pub description: String,
}

/// Wrapper matching the `{"stakeholders": [...]}` response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StakeholderAnalysis {
    /// Up to five stakeholders.
    pub stakeholders: Vec<Stakeholder>,
}

/// A moonshot idea that would accelerate a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Innovation {
    /// The idea.
    pub idea: String,
    /// Potential positive impact.
    pub potential: String,
    /// Obstacles to realizing it.
    pub challenges: String,
}

/// Three alternative futures for a step, plus an optional wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FutureTimelines {
    /// Fast, smooth adoption.
    pub optimistic: String,
    /// Slow progress with setbacks.
    pub pessimistic: String,
    /// Balanced view.
    pub realistic: String,
    /// Event that could change any of the above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<String>,
}

/// Wrapper matching the `{"topics": [...]}` response object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicList {
    /// Candidate topics.
    pub topics: Vec<String>,
}

/// All generated detail for one scenario step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioItemDetail {
    /// The step text.
    pub item: String,
    /// Estimated arrival.
    pub eta: EtaEstimate,
    /// Historical analogy.
    pub analogy: HistoricalAnalogy,
    /// Affected stakeholders.
    pub stakeholders: Vec<Stakeholder>,
    /// Moonshot innovation.
    pub innovation: Innovation,
    /// Alternative futures.
    pub future_timelines: FutureTimelines,
}

/// A scenario and the detail generated for each of its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioAggregate {
    /// The scenario itself.
    pub scenario: Scenario,
    /// Detail per item, in item order.
    pub items: Vec<ScenarioItemDetail>,
}

/// Placeholder payload served before any scenario has been generated.
///
/// A single scenario with exactly one fully populated item.
#[must_use]
pub fn sample_payload() -> Vec<ScenarioAggregate> {
    vec![ScenarioAggregate {
        scenario: Scenario {
            title: "Sample AI Scenario".into(),
            description: "This is a sample scenario for accessibility and testing.".into(),
            items: Vec::new(),
        },
        items: vec![ScenarioItemDetail {
            item: "Sample Step".into(),
            eta: EtaEstimate {
                eta: "Within the next 5 years".into(),
            },
            analogy: HistoricalAnalogy {
                event: "Internet Adoption".into(),
                similarity: "Transformative technology with global impact.".into(),
                lesson: "Broad access and education are key.".into(),
            },
            stakeholders: vec![
                Stakeholder {
                    name: "Developers".into(),
                    role: "Builder".into(),
                    description: "Create and maintain the technology.".into(),
                },
                Stakeholder {
                    name: "Users".into(),
                    role: "Beneficiary".into(),
                    description: "Benefit from the solutions.".into(),
                },
            ],
            innovation: Innovation {
                idea: "AI-powered accessibility tools".into(),
                potential: "Empower people with disabilities worldwide.".into(),
                challenges: "Ensuring inclusivity and affordability.".into(),
            },
            future_timelines: FutureTimelines {
                optimistic: "Rapid adoption and positive change.".into(),
                pessimistic: "Slow uptake and resistance.".into(),
                realistic: "Gradual progress with some challenges.".into(),
                wildcard: Some("Unexpected breakthrough occurs.".into()),
            },
        }],
    }]
}
