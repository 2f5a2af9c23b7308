//! Optional narrative about a network, produced by an external text
//! generation service. Nothing here feeds back into parsing or aggregation.

pub mod client;
pub mod prompt;
pub mod session;

use tracing::warn;

use crate::contact::Contact;
use crate::error::Result;
pub use client::{GeminiClient, TextGenerator};
pub use prompt::{build_prompt, PromptOptions};
pub use session::{InsightSession, InsightState};

pub const NO_INSIGHTS: &str = "No insights generated.";
pub const INSIGHTS_FAILED: &str =
    "Failed to generate AI insights. Check your network size or try again later.";

/// What a finished request shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightOutcome {
    Ready(String),
    Failed(String),
}

impl InsightOutcome {
    pub fn into_text(self) -> String {
        match self {
            InsightOutcome::Ready(t) | InsightOutcome::Failed(t) => t,
        }
    }
}

impl From<InsightOutcome> for InsightState {
    fn from(outcome: InsightOutcome) -> Self {
        match outcome {
            InsightOutcome::Ready(t) => InsightState::Ready(t),
            InsightOutcome::Failed(t) => InsightState::Failed(t),
        }
    }
}

/// Map a generator result to what the user sees.
pub fn settle(result: Result<String>) -> InsightOutcome {
    match result {
        Ok(text) if text.trim().is_empty() => InsightOutcome::Ready(NO_INSIGHTS.to_string()),
        Ok(text) => InsightOutcome::Ready(text),
        Err(e) => {
            warn!("Insight generation failed: {}", e);
            InsightOutcome::Failed(INSIGHTS_FAILED.to_string())
        }
    }
}

/// One request, awaited in place. Returns the text to display.
pub async fn generate_insights<G: TextGenerator>(
    generator: &G,
    connections: &[Contact],
    opts: &PromptOptions,
) -> String {
    let prompt = build_prompt(connections, opts);
    settle(generator.generate(&prompt).await).into_text()
}
