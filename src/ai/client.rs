//! HTTP integration with the Gemini and DeepSeek text-generation APIs.
//!
//! One blocking request per analysis. Failures are turned into raw messages
//! first (status + body, transport error text, missing content) and only then
//! classified, so every path goes through the same heuristic.

use std::time::Duration;

use chrono::Local;
use log::{info, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::ai::errors::AnalysisError;
use crate::ai::prompt::{SYSTEM_PROMPT, build_analysis_prompt, format_report};
use crate::ai::provider::{ModelId, Provider};
use crate::data::Dataset;
use crate::domain::{FitParameters, Metrics};
use crate::error::AppError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const TEMPERATURE: f64 = 0.3;
const TOP_P: f64 = 0.9;
const MAX_TOKENS: u32 = 2000;

/// Everything needed to ask for one analysis. Owned so it can cross threads.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub params: FitParameters,
    pub metrics: Metrics,
    pub dataset: Dataset,
    pub provider: Provider,
    pub model: ModelId,
    pub api_key: String,
}

/// Something that turns an [`AnalysisRequest`] into a report.
pub trait AnalysisService: Send + Sync {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError>;
}

pub struct AnalysisClient {
    client: Client,
}

impl AnalysisClient {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::runtime(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    fn call_gemini(&self, request: &AnalysisRequest, model: ModelId, prompt: String) -> Result<String, String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            Provider::Gemini.base_url(),
            model.wire_id()
        );
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_TOKENS,
            },
        };

        let resp = self
            .client
            .post(url)
            .query(&[("key", request.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| transport_failure(Provider::Gemini, &e))?;

        let text = read_body(Provider::Gemini, resp)?;
        parse_gemini_body(&text)
    }

    fn call_deepseek(&self, request: &AnalysisRequest, model: ModelId, prompt: String) -> Result<String, String> {
        let url = format!("{}/chat/completions", Provider::DeepSeek.base_url());
        let body = ChatRequest {
            model: model.wire_id(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let resp = self
            .client
            .post(url)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .map_err(|e| transport_failure(Provider::DeepSeek, &e))?;

        let text = read_body(Provider::DeepSeek, resp)?;
        parse_deepseek_body(&text)
    }
}

impl AnalysisService for AnalysisClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<String, AnalysisError> {
        let provider = request.provider;
        if request.api_key.trim().is_empty() {
            return Err(AnalysisError::classify(
                "No API key provided. Configure one in the settings first.",
            ));
        }

        let model = provider.resolve_model(request.model);
        let prompt = build_analysis_prompt(request.params, &request.metrics, &request.dataset, provider);
        info!("requesting analysis from {} ({})", provider.display_name(), model.id());

        let outcome = match provider {
            Provider::Gemini => self.call_gemini(request, model, prompt),
            Provider::DeepSeek => self.call_deepseek(request, model, prompt),
        };

        match outcome {
            Ok(content) => Ok(format_report(&content, provider, model, Local::now())),
            Err(raw) => {
                warn!("{} analysis failed: {raw}", provider.short_name());
                Err(AnalysisError::classify(&raw))
            }
        }
    }
}

fn transport_failure(provider: Provider, err: &reqwest::Error) -> String {
    format!("network request to {} failed: {err}", provider.short_name())
}

fn read_body(provider: Provider, resp: reqwest::blocking::Response) -> Result<String, String> {
    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| format!("network read from {} failed: {e}", provider.short_name()))?;
    if !status.is_success() {
        return Err(format!(
            "{} API error ({}): {text}",
            provider.short_name(),
            status.as_u16()
        ));
    }
    Ok(text)
}

/// Extract `candidates[0].content.parts[0].text` from a Gemini response body.
pub(crate) fn parse_gemini_body(body: &str) -> Result<String, String> {
    let parsed: GeminiResponse = serde_json::from_str(body)
        .map_err(|e| format!("Gemini response could not be parsed: {e}"))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "Gemini returned no content".to_string())
}

/// Extract `choices[0].message.content` from a DeepSeek response body.
pub(crate) fn parse_deepseek_body(body: &str) -> Result<String, String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| format!("DeepSeek response could not be parsed: {e}"))?;
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "DeepSeek returned no content".to_string())
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gemini_text_is_extracted() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"hello"}],"role":"model"}}]}"#;
        assert_eq!(parse_gemini_body(body).unwrap(), "hello");
    }

    #[test]
    fn gemini_without_text_reports_no_content() {
        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#,
        ] {
            let err = parse_gemini_body(body).unwrap_err();
            assert_eq!(err, "Gemini returned no content", "{body}");
            assert!(matches!(AnalysisError::classify(&err), AnalysisError::Unclassified(_)));
        }
    }

    #[test]
    fn deepseek_text_is_extracted() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"r is high"}}]}"#;
        assert_eq!(parse_deepseek_body(body).unwrap(), "r is high");
        assert_eq!(
            parse_deepseek_body(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap_err(),
            "DeepSeek returned no content"
        );
    }

    #[test]
    fn malformed_body_is_reported() {
        let err = parse_deepseek_body("<html>").unwrap_err();
        assert!(err.starts_with("DeepSeek response could not be parsed"));
    }

    #[test]
    fn request_bodies_have_provider_shape() {
        let gemini = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: Some("p".into()) }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_TOKENS,
            },
        };
        let v = serde_json::to_value(&gemini).unwrap();
        assert_eq!(v["contents"][0]["parts"][0]["text"], "p");
        assert_eq!(v["generationConfig"]["topP"], 0.9);
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 2000);

        let chat = ChatRequest {
            model: ModelId::DeepSeekReasoner.wire_id(),
            messages: vec![ChatMessage { role: "user", content: "p".into() }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };
        let v = serde_json::to_value(&chat).unwrap();
        assert_eq!(v["model"], "deepseek-reasoner");
        assert_eq!(v["stream"], false);
        assert_eq!(v["max_tokens"], 2000);
    }

    #[test]
    fn missing_key_fails_before_any_request() {
        let client = AnalysisClient::new().unwrap();
        let data = Dataset::galton();
        let params = FitParameters::new(0.5, 30.0);
        let request = AnalysisRequest {
            metrics: crate::math::compute(&data, params),
            params,
            dataset: data,
            provider: Provider::Gemini,
            model: ModelId::Gemini3Pro,
            api_key: "   ".into(),
        };
        let err = client.analyze(&request).unwrap_err();
        assert!(err.is_credential());
    }
}
