//! Interactive terminal flow (`CLI_MODE=true`).
//!
//! Reads a topic (or offers ten generated ones), elaborates two scenarios
//! through the model, stores them for `GET /api/scenarios`, and writes a
//! Markdown report to the log directory.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

use crate::error::{AppError, ScenarioError};
use crate::markdown::render_scenario_report;
use crate::scenarios::{ScenarioElaborator, ScenarioStore};
use crate::storage::{LogStore, SCENARIO_SLUG_FALLBACK};
use crate::traits::TimeProvider;

const TOPIC_PROMPT: &str = "Enter a scenario prompt (or press Enter for AI-generated topics): ";
const SELECTION_HEADER: &str = "Select a topic by entering its number (0-9):";
const SELECTION_PROMPT: &str = "Your selection: ";
const INVALID_SELECTION: &str = "Invalid selection. Using the first topic.";

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOutcome {
    /// The topic the scenarios were generated for.
    pub topic: String,
    /// Number of scenarios stored.
    pub scenarios: usize,
    /// Report file name inside the log directory.
    pub filename: String,
}

/// The terminal flow and its collaborators.
pub struct Cli {
    elaborator: ScenarioElaborator,
    store: Arc<ScenarioStore>,
    logs: LogStore,
    clock: Arc<dyn TimeProvider>,
}

impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("logs", &self.logs)
            .finish_non_exhaustive()
    }
}

impl Cli {
    /// Create a new CLI flow.
    #[must_use]
    pub fn new(
        elaborator: ScenarioElaborator,
        store: Arc<ScenarioStore>,
        logs: LogStore,
        clock: Arc<dyn TimeProvider>,
    ) -> Self {
        Self {
            elaborator,
            store,
            logs,
            clock,
        }
    }

    /// Run against the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// See [`Cli::run`].
    pub async fn run_stdio(&self) -> Result<CliOutcome, AppError> {
        self.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Run the flow against arbitrary input and output.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Scenario`] on terminal I/O, model, or parse
    /// failures and [`AppError::Storage`] if the report cannot be written.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<CliOutcome, AppError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut topic = prompt_line(&mut input, &mut output, TOPIC_PROMPT).await?;

        if topic.is_empty() {
            let topics = self.elaborator.generate_topics().await?;
            topic = select_topic(&mut input, &mut output, topics).await?;
        }

        write_line(&mut output, &format!("Generating scenario based on: {topic}")).await?;

        let aggregates = self.elaborator.elaborate(&topic).await?;
        let report = render_scenario_report(&topic, &aggregates);
        let scenarios = aggregates.len();
        self.store.replace(aggregates);

        // Reports are named by time alone; the topic lives in the body.
        let filename = self
            .logs
            .save(&self.clock.now(), "", SCENARIO_SLUG_FALLBACK, &report)
            .await?;
        write_line(
            &mut output,
            &format!(
                "File '{filename}' saved to '{}' directory!",
                self.logs.dir().display()
            ),
        )
        .await?;

        info!(topic = %topic, scenarios = scenarios, filename = %filename, "CLI run complete");
        Ok(CliOutcome {
            topic,
            scenarios,
            filename,
        })
    }
}

/// List topics and read a selection; anything invalid picks the first.
async fn select_topic<R, W>(
    input: &mut R,
    output: &mut W,
    mut topics: Vec<String>,
) -> Result<String, ScenarioError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_line(output, SELECTION_HEADER).await?;
    for (index, topic) in topics.iter().enumerate() {
        write_line(output, &format!("{index}: {topic}")).await?;
    }

    let answer = prompt_line(input, output, SELECTION_PROMPT).await?;
    let index = match answer.parse::<usize>() {
        Ok(index) if index < topics.len() => index,
        _ => {
            write_line(output, INVALID_SELECTION).await?;
            0
        }
    };
    if topics.is_empty() {
        return Err(ScenarioError::NoTopics);
    }
    Ok(topics.swap_remove(index))
}

async fn prompt_line<R, W>(input: &mut R, output: &mut W, prompt: &str) -> Result<String, ScenarioError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(prompt.as_bytes()).await.map_err(io_error)?;
    output.flush().await.map_err(io_error)?;

    let mut line = String::new();
    input.read_line(&mut line).await.map_err(io_error)?;
    Ok(line.trim().to_string())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<(), ScenarioError> {
    output.write_all(text.as_bytes()).await.map_err(io_error)?;
    output.write_all(b"\n").await.map_err(io_error)?;
    output.flush().await.map_err(io_error)
}

#[allow(clippy::needless_pass_by_value)]
fn io_error(e: std::io::Error) -> ScenarioError {
    ScenarioError::Io {
        message: e.to_string(),
    }
}
