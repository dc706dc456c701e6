//! Gemini REST adapter
//!
//! Prompt construction and response parsing are plain functions so they can
//! be tested natively. The HTTP transport is `fetch` in the browser; native
//! builds have no transport and report a `Transport` error.

use futures::stream;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Dilemma, GenerateError, Generator, TextStream};
use crate::sim::CraftElement;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const EXPLAIN_TEMPERATURE: f64 = 0.7;

pub const DILEMMA_PROMPT: &str = "Generate a funny, absurd, or philosophical 'would you rather' dilemma. \
It should be difficult but amusing. Make sure the options are distinct.";

pub fn explain_prompt(topic: &str) -> String {
    format!(
        "Explain \"{topic}\" to me like I am a 5 year old. Use simple words, analogies, and lots of emojis. \
Keep it under 150 words. Be witty and fun."
    )
}

pub fn combine_prompt(first: &str, second: &str) -> String {
    format!(
        "Combine \"{first}\" and \"{second}\" to create a new single concept, object, or entity. \
It should be a creative but logical combination (e.g., Water + Fire = Steam, Steam + Air = Cloud). \
If the combination makes no sense, return \"Nothing\". \
Return a JSON object with 'name' and 'emoji'."
    )
}

fn user_contents(prompt: &str) -> Value {
    json!([{ "role": "user", "parts": [{ "text": prompt }] }])
}

pub fn explain_body(topic: &str) -> Value {
    json!({
        "contents": user_contents(&explain_prompt(topic)),
        "generationConfig": { "temperature": EXPLAIN_TEMPERATURE },
    })
}

pub fn dilemma_body() -> Value {
    json!({
        "contents": user_contents(DILEMMA_PROMPT),
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "scenario": { "type": "STRING", "description": "The context of the dilemma" },
                    "optionA": { "type": "STRING", "description": "The first choice" },
                    "optionB": { "type": "STRING", "description": "The second choice" },
                },
                "required": ["scenario", "optionA", "optionB"],
            },
        },
    })
}

pub fn combine_body(first: &str, second: &str) -> Value {
    json!({
        "contents": user_contents(&combine_prompt(first, second)),
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "The name of the result" },
                    "emoji": { "type": "STRING", "description": "A single emoji representing the result" },
                },
                "required": ["name", "emoji"],
            },
        },
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Text of a `generateContent` response body
pub fn extract_text(body: &str) -> Result<String, GenerateError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text = response.text();
    if text.is_empty() {
        return Err(GenerateError::EmptyResponse);
    }
    Ok(text)
}

/// Text fragments of a `streamGenerateContent?alt=sse` body, in order.
/// Chunks without text are skipped.
pub fn parse_sse(body: &str) -> Result<Vec<String>, GenerateError> {
    let mut fragments = Vec::new();
    for line in body.lines() {
        let Some(data) = line.strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data.is_empty() || data == "[DONE]" {
            continue;
        }
        let chunk: GenerateResponse = serde_json::from_str(data)?;
        let text = chunk.text();
        if !text.is_empty() {
            fragments.push(text);
        }
    }
    Ok(fragments)
}

pub fn parse_dilemma(body: &str) -> Result<Dilemma, GenerateError> {
    let text = extract_text(body)?;
    Ok(serde_json::from_str(&text)?)
}

pub fn parse_element(body: &str) -> Result<CraftElement, GenerateError> {
    let text = extract_text(body)?;
    Ok(serde_json::from_str(&text)?)
}

/// Gemini client for the three playground calls
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Client keyed from `GEMINI_API_KEY` at build time (empty if unset)
    pub fn from_build_env() -> Self {
        Self::new(option_env!("GEMINI_API_KEY").unwrap_or_default())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// False when built without `GEMINI_API_KEY`
    pub fn has_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn generate_url(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }

    pub fn stream_url(&self) -> String {
        format!("{}/{}:streamGenerateContent?alt=sse", API_BASE, self.model)
    }

    #[cfg(target_arch = "wasm32")]
    async fn post(&self, url: &str, body: &Value) -> Result<String, GenerateError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        let js_err = |e: JsValue| GenerateError::Transport(format!("{e:?}"));

        let headers = Headers::new().map_err(js_err)?;
        headers.set("Content-Type", "application/json").map_err(js_err)?;
        headers.set("x-goog-api-key", &self.api_key).map_err(js_err)?;

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_headers(&headers.into());
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body.to_string()));

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
        let window = web_sys::window().ok_or_else(|| GenerateError::Transport("no window".into()))?;
        let resp_val = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_err)?;
        let resp: Response = resp_val
            .dyn_into()
            .map_err(|_| GenerateError::Transport("not a Response".into()))?;

        if !resp.ok() {
            return Err(GenerateError::Status(resp.status()));
        }
        let text = JsFuture::from(resp.text().map_err(js_err)?)
            .await
            .map_err(js_err)?;
        text.as_string()
            .ok_or_else(|| GenerateError::Transport("body is not text".into()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn post(&self, url: &str, _body: &Value) -> Result<String, GenerateError> {
        log::warn!(
            "No HTTP transport for {} on this target (key set: {})",
            url,
            self.has_key()
        );
        Err(GenerateError::Transport("no HTTP transport on this target".into()))
    }
}

impl Generator for GeminiClient {
    async fn explain(&self, topic: &str) -> Result<TextStream, GenerateError> {
        let body = self.post(&self.stream_url(), &explain_body(topic)).await?;
        let fragments = parse_sse(&body)?;
        Ok(Box::pin(stream::iter(fragments.into_iter().map(Ok))))
    }

    async fn dilemma(&self) -> Result<Dilemma, GenerateError> {
        let body = self.post(&self.generate_url(), &dilemma_body()).await?;
        parse_dilemma(&body)
    }

    async fn combine(&self, first: &str, second: &str) -> Result<CraftElement, GenerateError> {
        let body = self
            .post(&self.generate_url(), &combine_body(first, second))
            .await?;
        parse_element(&body)
    }
}
