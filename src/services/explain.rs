//! Explain It Like I'm 5
//!
//! The session only tracks what the view shows. Feeding it from a stream is
//! split into `begin` / `push_fragment` / `fail` / `finish` so the platform
//! layer never holds the session across an await.

use futures::StreamExt;

use super::{GenerateError, Generator};

/// Shown when the generator cannot be reached or dies mid-answer
pub const NAP_MESSAGE: &str = "The AI brain is having a nap. Try again later!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplainSession {
    pub answer: String,
    pub error: Option<String>,
    loading: bool,
}

impl ExplainSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a new question. Returns the trimmed topic, or None if the input
    /// is blank or an answer is still streaming.
    pub fn begin(&mut self, query: &str) -> Option<String> {
        let topic = query.trim();
        if topic.is_empty() || self.loading {
            return None;
        }
        self.loading = true;
        self.error = None;
        self.answer.clear();
        Some(topic.to_string())
    }

    pub fn push_fragment(&mut self, fragment: &str) {
        self.answer.push_str(fragment);
    }

    pub fn fail(&mut self, err: &GenerateError) {
        log::error!("Explanation failed: {}", err);
        self.error = Some(NAP_MESSAGE.to_string());
        self.loading = false;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}

/// Drive a whole question through `generator`. Returns false if the question
/// was refused.
pub async fn ask<G: Generator>(session: &mut ExplainSession, generator: &G, query: &str) -> bool {
    let Some(topic) = session.begin(query) else {
        return false;
    };

    let mut stream = match generator.explain(&topic).await {
        Ok(stream) => stream,
        Err(e) => {
            session.fail(&e);
            return true;
        }
    };

    while let Some(fragment) = stream.next().await {
        match fragment {
            Ok(text) => session.push_fragment(&text),
            Err(e) => {
                session.fail(&e);
                return true;
            }
        }
    }
    session.finish();
    true
}
