//! Generative text seam
//!
//! The toys never talk to a model directly. They go through `Generator`, an
//! async trait with three calls. `gemini` provides the real adapter; tests
//! plug in scripted generators.

pub mod dilemma;
pub mod explain;
pub mod gemini;

use futures::stream::LocalBoxStream;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::{CombinationRequest, CraftElement};

pub use dilemma::{Choice, DilemmaSession};
pub use explain::ExplainSession;
pub use gemini::GeminiClient;

/// Finite stream of text fragments, in generation order
pub type TextStream = LocalBoxStream<'static, Result<String, GenerateError>>;

/// Things that go wrong talking to a generator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("generator returned no text")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    Parse(String),
    #[error("request timed out")]
    Timeout,
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Parse(e.to_string())
    }
}

/// A would-you-rather scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dilemma {
    pub scenario: String,
    pub option_a: String,
    pub option_b: String,
}

impl Dilemma {
    /// Shown when the generator is unavailable
    pub fn fallback() -> Self {
        Self {
            scenario: "The AI is taking a nap. You must decide:".into(),
            option_a: "Wait patiently".into(),
            option_b: "Refresh the page".into(),
        }
    }
}

/// Generative text collaborator
#[allow(async_fn_in_trait)]
pub trait Generator {
    /// Kid-friendly explanation of `topic`, streamed
    async fn explain(&self, topic: &str) -> Result<TextStream, GenerateError>;

    /// A fresh absurd dilemma
    async fn dilemma(&self) -> Result<Dilemma, GenerateError>;

    /// What you get from combining two elements
    async fn combine(&self, first: &str, second: &str) -> Result<CraftElement, GenerateError>;
}

/// Fetch a dilemma, substituting the built-in one on any failure
pub async fn dilemma_or_fallback<G: Generator>(generator: &G) -> Dilemma {
    match generator.dilemma().await {
        Ok(d) => d,
        Err(e) => {
            log::error!("Dilemma generation failed: {}", e);
            Dilemma::fallback()
        }
    }
}

/// Ask the generator to resolve a workspace combination request.
/// The answer is validated so an empty name never reaches the workspace.
pub async fn resolve_combination<G: Generator>(
    generator: &G,
    request: &CombinationRequest,
) -> Result<CraftElement, GenerateError> {
    let element = generator
        .combine(&request.first.name, &request.second.name)
        .await?;
    let name = element.name.trim();
    if name.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(CraftElement::new(name, element.emoji.trim()))
}
