//! Scenario elaboration through structured model calls.

use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::types::{
    EtaEstimate, FutureTimelines, HistoricalAnalogy, Innovation, Scenario, ScenarioAggregate,
    ScenarioItemDetail, StakeholderAnalysis, TopicList,
};
use crate::error::ScenarioError;
use crate::prompts::{
    analogy_prompt, eta_prompt, future_timelines_prompt, innovation_prompt, scenarios_prompt,
    stakeholders_prompt, topics_prompt,
};
use crate::timeline::extract_json;
use crate::traits::{CompletionRequest, ModelClient, ResponseFormat};

/// Name every structured-output schema is sent under.
const SCHEMA_NAME: &str = "scenario_schema";

/// Drives the topic → scenarios → item detail flow.
///
/// Calls are strictly sequential; any failed call aborts the flow.
#[derive(Clone)]
pub struct ScenarioElaborator {
    client: Arc<dyn ModelClient>,
}

impl std::fmt::Debug for ScenarioElaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScenarioElaborator").finish_non_exhaustive()
    }
}

impl ScenarioElaborator {
    /// Create a new elaborator.
    #[must_use]
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Ask the model for candidate topics.
    ///
    /// # Errors
    ///
    /// Returns [`ScenarioError::NoTopics`] if the list is empty, or any
    /// model or parse error.
    pub async fn generate_topics(&self) -> Result<Vec<String>, ScenarioError> {
        let value = self
            .call::<TopicList>(topics_prompt().to_string())
            .await?;
        let topics: Vec<String> = match value {
            serde_json::Value::Array(_) => from_value(value)?,
            other => from_value::<TopicList>(other)?.topics,
        };
        let topics: Vec<String> = topics
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        if topics.is_empty() {
            return Err(ScenarioError::NoTopics);
        }
        debug!(count = topics.len(), "Topics generated");
        Ok(topics)
    }

    /// Ask the model for scenarios about `topic`.
    ///
    /// Accepts either a JSON array of scenarios or a single scenario object.
    ///
    /// # Errors
    ///
    /// Returns any model or parse error.
    pub async fn generate_scenarios(&self, topic: &str) -> Result<Vec<Scenario>, ScenarioError> {
        let value = self.call::<Scenario>(scenarios_prompt(topic)).await?;
        let scenarios = match value {
            serde_json::Value::Array(_) => from_value(value)?,
            other => vec![from_value::<Scenario>(other)?],
        };
        debug!(count = scenarios.len(), topic = %topic, "Scenarios generated");
        Ok(scenarios)
    }

    /// Generate ETA, analogy, stakeholders, innovation and future timelines
    /// for one item, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first model or parse error.
    pub async fn elaborate_item(&self, item: &str) -> Result<ScenarioItemDetail, ScenarioError> {
        let eta: EtaEstimate = self.structured(eta_prompt(item)).await?;
        let analogy: HistoricalAnalogy = self.structured(analogy_prompt(item)).await?;
        let stakeholders: StakeholderAnalysis =
            self.structured(stakeholders_prompt(item)).await?;
        let innovation: Innovation = self.structured(innovation_prompt(item)).await?;
        let future_timelines: FutureTimelines =
            self.structured(future_timelines_prompt(item)).await?;

        debug!(item = %item, "Item elaborated");
        Ok(ScenarioItemDetail {
            item: item.to_string(),
            eta,
            analogy,
            stakeholders: stakeholders.stakeholders,
            innovation,
            future_timelines,
        })
    }

    /// Run the whole flow for `topic`.
    ///
    /// # Errors
    ///
    /// Returns the first model or parse error.
    pub async fn elaborate(&self, topic: &str) -> Result<Vec<ScenarioAggregate>, ScenarioError> {
        let scenarios = self.generate_scenarios(topic).await?;
        let mut aggregates = Vec::with_capacity(scenarios.len());

        for scenario in scenarios {
            info!(title = %scenario.title, items = scenario.items.len(), "Elaborating scenario");
            let mut items = Vec::with_capacity(scenario.items.len());
            for item in &scenario.items {
                items.push(self.elaborate_item(item).await?);
            }
            aggregates.push(ScenarioAggregate { scenario, items });
        }

        Ok(aggregates)
    }

    async fn structured<T: DeserializeOwned + JsonSchema>(
        &self,
        prompt: String,
    ) -> Result<T, ScenarioError> {
        let value = self.call::<T>(prompt).await?;
        from_value(value)
    }

    async fn call<T: JsonSchema>(&self, prompt: String) -> Result<serde_json::Value, ScenarioError> {
        let request = CompletionRequest::new(prompt)
            .with_response_format(ResponseFormat::for_type::<T>(SCHEMA_NAME));
        let response = self.client.complete(request).await?;
        extract_json(&response.content)
    }
}

fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ScenarioError> {
    serde_json::from_value(value).map_err(|e| ScenarioError::JsonParseFailed {
        message: e.to_string(),
    })
}
