//! Timeline generation prompt.

/// Number of years after the current year the timeline may span.
pub const TIMELINE_SPAN_YEARS: i32 = 10;

/// Prompt asking for a positive future timeline about `topic`.
///
/// The window runs from `year` to `year + 10` and the inline example uses
/// `year + 1` as its date. The topic is embedded verbatim.
#[must_use]
pub fn timeline_prompt(topic: &str, year: i32) -> String {
    let end_year = year + TIMELINE_SPAN_YEARS;
    let example_year = year + 1;
    format!(
        "Generate a positive future scenario timeline for: {topic}. \
Limit the timespan to between {year} and {end_year}. \
Include ALL foreseeable milestone events (not just generic intervals like 5, 10, or 15 years). \
Use realistic, plausible years and actual milestone dates if known. \
Do not invent artificial intervals. \
Respond ONLY as a single valid JSON array of 3 to 7 objects, each with these exact fields: title, date, description. \
Do not include markdown, code blocks, or extra commentary. \
Example: [{{\"title\":\"...\",\"date\":\"{example_year}\",\"description\":\"...\"}}, ...]"
    )
}
