//! Ports for the external text-generation collaborator.

use async_trait::async_trait;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Failures surfaced by text-generation adapters.
    pub enum TextGeneratorError {
        /// The endpoint could not be reached or timed out.
        Unavailable { message: String } =>
            "text generation service unavailable: {message}",
        /// The endpoint answered with a non-success status.
        UpstreamStatus { status: u16, message: String } =>
            "text generation upstream error (status {status}): {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "invalid text generation response: {message}",
        /// The endpoint produced no usable text.
        Empty {} =>
            "text generation produced an empty result",
    }
}

/// Driven port for the generation endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one system instruction plus one user prompt; returns raw text.
    async fn generate(
        &self,
        system_instruction: &str,
        prompt: &str,
    ) -> Result<String, TextGeneratorError>;
}

/// Driving port for AI-assisted post ideas.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdeaGeneration: Send + Sync {
    /// Produce a short post idea, optionally steered by a topic hint.
    async fn generate_idea(&self, topic: Option<String>) -> Result<String, Error>;
}
