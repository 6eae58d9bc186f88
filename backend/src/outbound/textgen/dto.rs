//! Wire DTOs for the text-generation endpoint.
//!
//! The endpoint speaks the Gemini `generateContent` shape: a system
//! instruction plus a list of content parts in, candidate content parts out.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(crate) struct GenerateRequestDto<'a> {
    pub system_instruction: ContentDto<'a>,
    pub contents: Vec<ContentDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentDto<'a> {
    pub parts: Vec<PartDto<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PartDto<'a> {
    pub text: &'a str,
}

impl<'a> ContentDto<'a> {
    pub fn from_text(text: &'a str) -> Self {
        Self {
            parts: vec![PartDto { text }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenerateResponseDto {
    #[serde(default)]
    pub candidates: Vec<CandidateDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateDto {
    pub content: Option<CandidateContentDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContentDto {
    #[serde(default)]
    pub parts: Vec<CandidatePartDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidatePartDto {
    #[serde(default)]
    pub text: String,
}

impl GenerateResponseDto {
    /// Concatenate the first candidate's text parts.
    pub fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let content = candidate.content?;
        let text: String = content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("");
        Some(text)
    }
}
