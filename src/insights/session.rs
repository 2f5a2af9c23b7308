use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::prompt::{build_prompt, PromptOptions};
use super::{settle, TextGenerator};
use crate::contact::Contact;
use crate::error::{NetmapError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsightState {
    Idle,
    Pending,
    /// Text to show verbatim.
    Ready(String),
    /// Fixed fallback message.
    Failed(String),
}

/// Holds at most one outstanding insight request.
pub struct InsightSession<G> {
    generator: Arc<G>,
    state: InsightState,
    task: Option<JoinHandle<Result<String>>>,
}

impl<G: TextGenerator> InsightSession<G> {
    pub fn new(generator: G) -> Self {
        InsightSession {
            generator: Arc::new(generator),
            state: InsightState::Idle,
            task: None,
        }
    }

    pub fn state(&self) -> &InsightState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == InsightState::Pending
    }

    /// Displayable text once the request has settled.
    pub fn text(&self) -> Option<&str> {
        match &self.state {
            InsightState::Ready(t) | InsightState::Failed(t) => Some(t),
            _ => None,
        }
    }

    /// Start a request in the background. Does nothing for an empty network
    /// and refuses while another request is pending. Must be called inside a
    /// Tokio runtime.
    pub fn request(&mut self, connections: &[Contact], opts: &PromptOptions) -> Result<()> {
        if self.is_pending() {
            return Err(NetmapError::RequestInFlight);
        }
        if connections.is_empty() {
            debug!("No connections; skipping insight request");
            return Ok(());
        }

        let prompt = build_prompt(connections, opts);
        let generator = Arc::clone(&self.generator);
        self.task = Some(tokio::spawn(async move { generator.generate(&prompt).await }));
        self.state = InsightState::Pending;
        Ok(())
    }

    /// Wait for the pending request, if any, and return the settled state.
    pub async fn wait(&mut self) -> &InsightState {
        if let Some(task) = self.task.take() {
            self.state = match task.await {
                Ok(result) => settle(result).into(),
                Err(e) if e.is_cancelled() => InsightState::Idle,
                Err(e) => settle(Err(NetmapError::Io(std::io::Error::other(e)))).into(),
            };
        }
        &self.state
    }

    /// Abort the pending request and go back to idle.
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            info!("Insight request cancelled");
        }
        self.state = InsightState::Idle;
    }

    /// Forget a settled result so the next request starts from idle.
    /// A pending request is cancelled instead.
    pub fn reset(&mut self) {
        if self.task.is_some() {
            self.cancel();
            return;
        }
        if self.state != InsightState::Idle {
            debug!("Cleared insight result");
            self.state = InsightState::Idle;
        }
    }
}

impl<G> Drop for InsightSession<G> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
