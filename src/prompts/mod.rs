//! Prompt templates.
//!
//! Every prompt is a pure function of its inputs:
//! - `timeline`: the web timeline prompt (topic + current year)
//! - `scenario`: the terminal elaboration prompts (topics, scenarios, and
//!   per-item ETA, analogy, stakeholders, innovation, future timelines)
//!
//! # Example
//!
//! ```
//! use scenario_timeline::prompts::timeline_prompt;
//!
//! let prompt = timeline_prompt("fusion energy", 2026);
//! assert!(prompt.contains("between 2026 and 2036"));
//! ```

mod scenario;
mod timeline;

pub use scenario::{
    analogy_prompt, eta_prompt, future_timelines_prompt, innovation_prompt, scenarios_prompt,
    stakeholders_prompt, topics_prompt,
};
pub use timeline::{timeline_prompt, TIMELINE_SPAN_YEARS};
