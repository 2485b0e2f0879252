//! Scenario Timeline
//!
//! An HTTP backend that turns a topic prompt into an LLM-generated timeline
//! of future milestones, plus an optional terminal flow that elaborates
//! positive AI scenarios.
//!
//! # Features
//!
//! - Two model backends: an OpenAI-compatible hosted API or a local NDJSON endpoint
//! - Total response parsing: model text always yields at least one event
//! - Markdown logs for every timeline, exported session and scenario report
//! - In-memory scenario store with optional expiry
//!
//! # Quick Start
//!
//! ```bash
//! OPENAI_API_KEY=sk-xxx OPENAI_MODEL=gpt-4o-mini ./scenario-timeline
//! # or a local endpoint
//! API_URL=http://localhost:11434/api/generate MODEL_NAME=llama3 ./scenario-timeline
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   HTTP   ┌─────────────────┐        ┌──────────────────┐
//! │ Browser  │─────────▶│  axum router    │───────▶│  Model gateway   │──▶ hosted / local
//! └──────────┘◀─────────│  (AppState)     │◀───────│                  │
//!                       └───────┬─────────┘        └──────────────────┘
//!                               │
//!                               ▼
//!                        ./logs/*.md
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod gateway;
pub mod markdown;
pub mod metrics;
pub mod prompts;
pub mod scenarios;
pub mod server;
pub mod storage;
pub mod timeline;
pub mod traits;

#[cfg(test)]
mod test_utils;
