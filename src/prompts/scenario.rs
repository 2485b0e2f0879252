//! Scenario elaboration prompts for the terminal flow.
//!
//! Each prompt asks for a JSON object matching one of the types in
//! [`crate::scenarios`]. The item or topic string is embedded verbatim.

#![allow(clippy::missing_const_for_fn)]

/// Prompt asking for ten scenario topics (`{"topics": [...]}`).
#[must_use]
pub fn topics_prompt() -> &'static str {
    "Generate 10 diverse and interesting AI scenario topics for positive future outcomes. \
Each topic should be a brief phrase or sentence."
}

/// Prompt asking for two scenarios about `topic`.
#[must_use]
pub fn scenarios_prompt(topic: &str) -> String {
    format!(
        r#"Imagine a future where AI is used to create a more equitable, sustainable, and fulfilling world for everyone, focusing on the following topic: "{topic}"

Describe 2 detailed and distinct scenarios illustrating how AI could positively advance humanity in this ideal future, related to the given topic.

Ensure that each scenario explores a unique aspect of AI's positive potential and does not overlap significantly with other scenarios. Consider a wide range of domains where AI could have a transformative impact, such as:

- Social impact and governance
- Environmental protection and resource management
- Scientific breakthroughs and technological innovation
- Healthcare, well-being, and longevity
- Education, creativity, and self-fulfillment

Format the output as a JSON array like this:

[
  {{
    "title": "Example Title 1",
    "description": "Example Description 1",
    "items": ["Item 1", "Item 2", "Item 3"]
  }}
]

Each scenario object should include:
- "title": A short, descriptive title (maximum 20 words).
- "description": A concise explanation of the scenario (maximum 50 words).
- "items": A list of 3 to 5 specific steps or events that contribute to the scenario."#
    )
}

/// Prompt asking when `item` could be realized.
#[must_use]
pub fn eta_prompt(item: &str) -> String {
    format!(
        r#"Consider the following step towards a positive AI scenario: "{item}"

Provide your best estimate for when this step could be realized, considering current technological trends and potential advancements.

Format your response as a JSON object with this structure:

{{
  "eta": "Concise sentence describing the estimated timeline."
}}

Be specific and provide a realistic timeframe whenever possible (e.g., "Within the next 5 years," "By the early 2030s," "Likely beyond 2050"). If the timeframe is highly uncertain, acknowledge the uncertainty and explain why."#
    )
}

/// Prompt asking for a historical analogy to `item`.
#[must_use]
pub fn analogy_prompt(item: &str) -> String {
    format!(
        r#"Consider this step towards a positive AI scenario: "{item}"

Provide a historical analogy that highlights a similar advancement or event that had a significant positive impact on humanity.

Format your response as a JSON object with this structure:

{{
  "event": "Name or brief description of the historical event",
  "similarity": "Explanation of the key similarities between the historical event and the AI scenario step",
  "lesson": "A valuable lesson or insight that can be drawn from the historical event and applied to the AI scenario"
}}

Focus on analogies that:
- Demonstrate the potential positive impact of technological advancements.
- Highlight the importance of careful planning, ethical considerations, and societal adaptation.
- Offer valuable lessons for navigating the challenges and opportunities of the AI scenario."#
    )
}

/// Prompt asking for up to five stakeholders affected by `item`.
#[must_use]
pub fn stakeholders_prompt(item: &str) -> String {
    format!(
        r#"Identify up to 5 key stakeholders who would be significantly affected by the following AI scenario step: "{item}"

Consider governments, businesses, individuals, specific communities, or other relevant groups.

Format your response as a JSON object with an array of stakeholder objects:

{{
  "stakeholders": [
    {{
      "name": "Name or type of stakeholder",
      "role": "Role of the stakeholder (e.g., Beneficiary, Regulator, Developer)",
      "description": "Brief description of the stakeholder's role in this specific scenario"
    }}
  ]
}}"#
    )
}

/// Prompt asking for a moonshot innovation that would accelerate `item`.
#[must_use]
pub fn innovation_prompt(item: &str) -> String {
    format!(
        r#"Consider this step towards a positive AI scenario: "{item}"

Generate a "moonshot" idea or innovation that could significantly enhance or accelerate this step, pushing the boundaries of what's currently possible.

Format your response as a JSON object:

{{
  "idea": "Description of the innovative idea",
  "potential": "Explanation of the potential positive impact of this innovation",
  "challenges": "Potential challenges or obstacles to realizing this innovation"
}}"#
    )
}

/// Prompt asking for optimistic, pessimistic and realistic timelines for `item`.
#[must_use]
pub fn future_timelines_prompt(item: &str) -> String {
    format!(
        r#"Consider this step towards a positive AI scenario: "{item}"

Generate three potential future timelines for this step:

* **Optimistic:** A timeline where advancements and adoption happen quickly and smoothly.
* **Pessimistic:** A timeline where progress is slow, and challenges arise.
* **Realistic:** A balanced timeline considering both potential advancements and likely obstacles.

Optionally, include a "wildcard" event or breakthrough that could significantly alter any of these timelines.

Format your response as a JSON object:

{{
  "optimistic": "Description of the optimistic timeline",
  "pessimistic": "Description of the pessimistic timeline",
  "realistic": "Description of the realistic timeline",
  "wildcard": "Description of a potential wildcard event (optional)"
}}"#
    )
}
