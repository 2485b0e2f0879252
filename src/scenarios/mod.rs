//! Scenario elaboration and storage.
//!
//! This module provides:
//! - Scenario aggregate types (also the structured-output schemas)
//! - [`ScenarioElaborator`]: topic → scenarios → per-item detail
//! - [`ScenarioStore`]: last generated aggregates, served by `GET /api/scenarios`

mod elaborate;
mod store;
mod types;

pub use elaborate::ScenarioElaborator;
pub use store::ScenarioStore;
pub use types::{
    sample_payload, EtaEstimate, FutureTimelines, HistoricalAnalogy, Innovation, Scenario,
    ScenarioAggregate, ScenarioItemDetail, Stakeholder, StakeholderAnalysis, TopicList,
};
