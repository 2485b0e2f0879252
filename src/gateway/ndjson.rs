//! Newline-delimited JSON support for the local backend.
//!
//! This module provides:
//! - Line parsing that pulls the `response` fragment out of one JSON line
//! - An accumulator that reassembles fragments from arbitrary byte chunks
//!
//! Blank lines, lines that are not JSON, and lines without a string
//! `response` field contribute nothing.

/// Extract the `response` fragment from one NDJSON line.
///
/// # Example
///
/// ```
/// use scenario_timeline::gateway::parse_ndjson_line;
///
/// assert_eq!(parse_ndjson_line(r#"{"response":"Hel","done":false}"#), Some("Hel".to_string()));
/// assert_eq!(parse_ndjson_line("garbage"), None);
/// assert_eq!(parse_ndjson_line(r#"{"done":true}"#), None);
/// ```
#[must_use]
pub fn parse_ndjson_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let value: serde_json::Value = serde_json::from_str(line).ok()?;
    value
        .get("response")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Accumulates `response` fragments from a chunked NDJSON body.
///
/// Chunks may split lines (and multi-byte characters) anywhere; bytes are
/// buffered until a newline arrives.
#[derive(Debug, Default)]
pub struct ResponseAccumulator {
    buffer: Vec<u8>,
    text: String,
    lines: usize,
    skipped: usize,
}

impl ResponseAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of the body.
    pub fn push_bytes(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.process_line(&line[..pos]);
        }
    }

    /// Flush any trailing line without a newline and return the text.
    #[must_use]
    pub fn finish(mut self) -> String {
        if !self.buffer.is_empty() {
            let rest = std::mem::take(&mut self.buffer);
            self.process_line(&rest);
        }
        if self.skipped > 0 {
            tracing::debug!(
                lines = self.lines,
                skipped = self.skipped,
                "Skipped unparseable NDJSON lines"
            );
        }
        self.text
    }

    /// Text accumulated so far.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn process_line(&mut self, raw: &[u8]) {
        let Ok(line) = std::str::from_utf8(raw) else {
            self.lines += 1;
            self.skipped += 1;
            return;
        };
        if line.trim().is_empty() {
            return;
        }
        self.lines += 1;
        match parse_ndjson_line(line) {
            Some(fragment) => self.text.push_str(&fragment),
            None => self.skipped += 1,
        }
    }
}
