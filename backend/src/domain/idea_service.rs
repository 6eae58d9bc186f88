//! AI-assisted post idea service.
//!
//! Stateless prompt assembly over the text-generation port; the HTTP
//! plumbing and timeouts live in the outbound adapter.

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::Error;
use crate::domain::ports::{IdeaGeneration, TextGenerator, TextGeneratorError};

/// Instruction sent with every generation request.
const SYSTEM_INSTRUCTION: &str = "You are a creative assistant for a social feed. \
    Suggest one short, engaging post idea in two sentences or fewer. \
    Reply with the idea text only, no preamble.";

/// Themes used when the caller supplies no topic hint.
const DEFAULT_THEMES: &[&str] = &[
    "something you learned this week",
    "a place you would like to revisit",
    "a small daily habit that pays off",
    "a book, film or song on your mind",
    "an unpopular opinion about food",
];

/// Idea service implementing the driving port.
#[derive(Clone)]
pub struct IdeaService<G> {
    generator: Arc<G>,
}

impl<G> IdeaService<G> {
    /// Create a new service over a text generator.
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }
}

fn map_generator_error(error: TextGeneratorError) -> Error {
    match error {
        TextGeneratorError::Unavailable { message } => {
            Error::service_unavailable(format!("idea generation unavailable: {message}"))
        }
        TextGeneratorError::UpstreamStatus { status, message } => {
            Error::internal(format!("idea generation failed (status {status}): {message}"))
        }
        TextGeneratorError::Decode { message } => {
            Error::internal(format!("idea generation returned malformed data: {message}"))
        }
        TextGeneratorError::Empty {} => Error::internal("idea generation produced no text"),
    }
}

fn build_prompt(topic: Option<&str>) -> String {
    let theme = match topic.map(str::trim) {
        Some(topic) if !topic.is_empty() => topic.to_owned(),
        // ThreadRng is not Send, so the draw happens before any await.
        _ => {
            let mut rng = rand::thread_rng();
            DEFAULT_THEMES
                .choose(&mut rng)
                .copied()
                .unwrap_or(DEFAULT_THEMES[0])
                .to_owned()
        }
    };
    format!("Write a post idea about: {theme}")
}

#[async_trait]
impl<G> IdeaGeneration for IdeaService<G>
where
    G: TextGenerator,
{
    async fn generate_idea(&self, topic: Option<String>) -> Result<String, Error> {
        let prompt = build_prompt(topic.as_deref());
        let text = self
            .generator
            .generate(SYSTEM_INSTRUCTION, &prompt)
            .await
            .map_err(map_generator_error)?;
        Ok(text.trim().to_owned())
    }
}

#[cfg(test)]
mod tests {
    //! Prompt assembly and failure mapping.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTextGenerator;

    #[tokio::test]
    async fn topic_hint_is_embedded_in_the_prompt() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|instruction, prompt| {
                instruction == SYSTEM_INSTRUCTION && prompt.contains("weekend hikes")
            })
            .returning(|_, _| Ok("  Share your favourite trail.  ".into()));

        let service = IdeaService::new(Arc::new(generator));
        let idea = service
            .generate_idea(Some("  weekend hikes ".into()))
            .await
            .unwrap();
        assert_eq!(idea, "Share your favourite trail.");
    }

    #[tokio::test]
    async fn blank_topic_falls_back_to_a_default_theme() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .withf(|_, prompt| DEFAULT_THEMES.iter().any(|theme| prompt.contains(theme)))
            .returning(|_, _| Ok("An idea.".into()));

        let service = IdeaService::new(Arc::new(generator));
        let idea = service.generate_idea(Some("   ".into())).await.unwrap();
        assert_eq!(idea, "An idea.");
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_service_unavailable() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(TextGeneratorError::unavailable("connect timeout")));

        let service = IdeaService::new(Arc::new(generator));
        let err = service.generate_idea(None).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }

    #[tokio::test]
    async fn upstream_status_maps_to_internal() {
        let mut generator = MockTextGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(TextGeneratorError::upstream_status(429_u16, "rate limited")));

        let service = IdeaService::new(Arc::new(generator));
        let err = service.generate_idea(None).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
