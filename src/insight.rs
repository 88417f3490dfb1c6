//! Free-text review insights generated from a unified diff.
//!
//! Insight is strictly optional: callers log failures and carry on without it.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{VizError, VizResult};

const PROMPT_PREFIX: &str = "You are a code review assistant. Analyze the following code diff and provide insights, highlighting key changes and potential issues.\n\nCode Diff:\n\n";

/// Builds the review prompt sent for `diff`.
pub fn review_prompt(diff: &str) -> String {
    format!("{PROMPT_PREFIX}{diff}")
}

/// Produces insight text for a diff.
pub trait InsightGenerator {
    fn generate(&self, diff: &str) -> VizResult<String>;
}

#[derive(Clone, Debug)]
pub struct GeminiOpts {
    pub base_url: String,
    pub model: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl GeminiOpts {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_owned(),
            model: "gemini-2.0-flash".to_owned(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// `generateContent` client for the Gemini API.
pub struct GeminiInsights {
    http: Client,
    opts: GeminiOpts,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiInsights {
    pub fn new(opts: GeminiOpts) -> VizResult<Self> {
        if opts.api_key.is_empty() {
            return Err(VizError::Insight("missing Gemini API key".to_owned()));
        }
        let http = Client::builder()
            .timeout(opts.timeout)
            .build()
            .map_err(|e| VizError::Insight(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, opts })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.opts.base_url.trim_end_matches('/'),
            self.opts.model
        )
    }
}

impl InsightGenerator for GeminiInsights {
    fn generate(&self, diff: &str) -> VizResult<String> {
        let prompt = review_prompt(diff);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.opts.api_key)
            .json(&body)
            .send()
            .map_err(|e| VizError::Insight(format!("request failed: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_default();
            return Err(VizError::Insight(format!("HTTP {status}: {text}")));
        }

        let parsed: GenerateResponse = resp
            .json()
            .map_err(|e| VizError::Insight(format!("unexpected response: {e}")))?;
        extract_text(parsed)
    }
}

fn extract_text(resp: GenerateResponse) -> VizResult<String> {
    let text = resp
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .filter_map(|p| p.text)
        .collect::<Vec<_>>()
        .join("");
    let text = text.trim();
    if text.is_empty() {
        return Err(VizError::Insight("empty response".to_owned()));
    }
    Ok(text.to_owned())
}

#[cfg(test)]
#[path = "../tests/unit/insight.rs"]
mod tests;
