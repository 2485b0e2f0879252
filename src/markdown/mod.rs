//! Markdown rendering.
//!
//! Three documents are produced:
//! - [`render_timeline`]: the log written for every generated timeline
//! - [`render_session`]: an exported session, including expanded sub-events
//! - [`render_scenario_report`]: the terminal flow's scenario report
//!
//! Text is embedded verbatim; no Markdown escaping is applied.

use std::fmt::Write;

use crate::scenarios::{ScenarioAggregate, ScenarioItemDetail};
use crate::timeline::{ExpansionNode, TimelineEvent};

/// Heading level of top-level events in timeline logs and exported sessions.
pub const BASE_HEADING_LEVEL: usize = 2;

/// Deepest heading level Markdown supports. Deeper expansions are omitted.
pub const MAX_HEADING_LEVEL: usize = 6;

/// Title used for sessions exported without one.
pub const UNTITLED_SESSION: &str = "Untitled";

/// Render a generated timeline.
///
/// # Example
///
/// ```
/// use scenario_timeline::markdown::render_timeline;
/// use scenario_timeline::timeline::TimelineEvent;
///
/// let md = render_timeline("fusion", &[TimelineEvent::new("A", "2026", "B")]);
/// assert_eq!(md, "# Timeline for: fusion\n\n## A (2026)\n\nB\n\n");
/// ```
#[must_use]
pub fn render_timeline(prompt: &str, events: &[TimelineEvent]) -> String {
    let mut md = format!("# Timeline for: {prompt}\n\n");
    for event in events {
        push_event(&mut md, event, BASE_HEADING_LEVEL);
    }
    md
}

/// Render an exported session.
///
/// Each event is followed by its expansion (`expansions[i]`) when that
/// expansion has children, one heading level deeper. Children that would
/// need a heading deeper than [`MAX_HEADING_LEVEL`] are omitted.
#[must_use]
pub fn render_session(
    title: Option<&str>,
    events: &[TimelineEvent],
    expansions: &[Option<ExpansionNode>],
) -> String {
    let title = title.filter(|t| !t.is_empty()).unwrap_or(UNTITLED_SESSION);
    let mut md = format!("# Session Timeline: {title}\n\n");
    push_session_level(&mut md, events, expansions, BASE_HEADING_LEVEL);
    md
}

fn push_session_level(
    md: &mut String,
    events: &[TimelineEvent],
    expansions: &[Option<ExpansionNode>],
    level: usize,
) {
    for (idx, event) in events.iter().enumerate() {
        push_event(md, event, level);

        if level >= MAX_HEADING_LEVEL {
            continue;
        }
        if let Some(Some(node)) = expansions.get(idx) {
            if node.has_children() {
                push_session_level(md, &node.children, &node.children_expanded, level + 1);
            }
        }
    }
}

fn push_event(md: &mut String, event: &TimelineEvent, level: usize) {
    let _ = write!(
        md,
        "{} {} ({})\n\n{}\n\n",
        "#".repeat(level),
        event.title,
        event.date,
        event.description
    );
}

/// Render the terminal flow's scenario report.
#[must_use]
pub fn render_scenario_report(topic: &str, aggregates: &[ScenarioAggregate]) -> String {
    let mut md = String::from("# Positive Future Scenarios for AI\n\n");
    let _ = write!(md, "Based on the topic: \"{topic}\"\n\n");
    md.push_str("TWO distinct scenarios illustrating how AI can transform humanity.\n\n");

    for aggregate in aggregates {
        let _ = write!(
            md,
            "## {}\n\n{}\n\n",
            aggregate.scenario.title, aggregate.scenario.description
        );
        for detail in &aggregate.items {
            push_item_detail(&mut md, detail);
        }
    }
    md
}

fn push_item_detail(md: &mut String, detail: &ScenarioItemDetail) {
    let _ = write!(md, "### {}\n\n", detail.item);
    let _ = write!(md, "**ETA:** {}\n\n", detail.eta.eta);

    let timelines = &detail.future_timelines;
    md.push_str("**Future Timelines:**\n\n");
    let _ = writeln!(md, "- **Optimistic:** {}", timelines.optimistic);
    let _ = writeln!(md, "- **Pessimistic:** {}", timelines.pessimistic);
    let _ = writeln!(md, "- **Realistic:** {}", timelines.realistic);
    if let Some(wildcard) = timelines.wildcard.as_deref().filter(|w| !w.is_empty()) {
        let _ = writeln!(md, "- **Wildcard Event:** {wildcard}");
    }
    md.push('\n');

    let analogy = &detail.analogy;
    md.push_str("**Historical Analogy:**\n\n");
    let _ = writeln!(md, "- **Event:** {}", analogy.event);
    let _ = writeln!(md, "- **Similarity:** {}", analogy.similarity);
    let _ = write!(md, "- **Lesson:** {}\n\n", analogy.lesson);

    md.push_str("**Stakeholders:**\n\n");
    for stakeholder in &detail.stakeholders {
        let _ = writeln!(
            md,
            "- **{}:** {} - {}",
            stakeholder.name, stakeholder.role, stakeholder.description
        );
    }
    md.push('\n');

    let innovation = &detail.innovation;
    md.push_str("**Innovation - Moonshot Idea:**\n\n");
    let _ = write!(md, "{}\n\n", innovation.idea);
    let _ = write!(md, "**Potential Impact:** {}\n\n", innovation.potential);
    let _ = write!(md, "**Challenges:** {}\n\n", innovation.challenges);
}
