//! Timeline generation.
//!
//! This module provides:
//! - [`TimelineEvent`] and [`ExpansionNode`]: timeline data types
//! - [`parse_timeline`]: total parser from model text to events
//! - [`TimelineService`]: prompt, model call, parse and log in one step

mod parsing;
mod service;
mod types;

pub use parsing::{
    extract_json, fallback_event, parse_array, parse_object, parse_timeline, strip_code_fences,
    ParseStrategy, ParsedTimeline, FALLBACK_DESCRIPTION,
};
pub use service::TimelineService;
pub use types::{ExpansionNode, TimelineEvent, NO_DESCRIPTION, UNTITLED_MILESTONE};
