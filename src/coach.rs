//! AI running coach.
//!
//! Builds a training plan prompt, sends it to the Gemini `generateContent`
//! endpoint and hands back the text. Failures never reach the UI as errors:
//! [`generate_or_fallback`] logs them and returns an apology the plan view
//! can show in place of a plan.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossbeam::channel::{bounded, Receiver, TryRecvError};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::CoachSettings;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const SYSTEM_INSTRUCTION: &str = "You are an elite Running Coach and Sports Scientist for the app \"UNITED RUNNERS\". \
Your goal is to generate personalized, structured running training plans in RUSSIAN language. \
Output format must be clean Markdown: a '###' heading per day, bullet lists for details, short paragraphs. \
The text is shown in a plain desktop view, so do not use HTML or tables. \
Do not wrap the answer in code blocks. Start directly with the plan.";

/// Shown when the model answers without any text.
pub const EMPTY_PLAN_TEXT: &str = "Не удалось создать план.";

/// Shown when the coach could not be reached at all.
pub const UNAVAILABLE_TEXT: &str =
    "Не удалось связаться с AI тренером. Пожалуйста, проверьте соединение.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunnerLevel {
    Beginner,
    #[default]
    Amateur,
    Advanced,
    Elite,
}

impl RunnerLevel {
    pub const ALL: [RunnerLevel; 4] = [
        RunnerLevel::Beginner,
        RunnerLevel::Amateur,
        RunnerLevel::Advanced,
        RunnerLevel::Elite,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RunnerLevel::Beginner => "Новичок",
            RunnerLevel::Amateur => "Любитель",
            RunnerLevel::Advanced => "Продвинутый",
            RunnerLevel::Elite => "Элита",
        }
    }
}

/// What the runner asked the coach for.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRequest {
    pub level: RunnerLevel,
    pub goal: String,
    pub days_per_week: u8,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            level: RunnerLevel::Amateur,
            goal: "Полумарафон из 2 часов".to_string(),
            days_per_week: 4,
        }
    }
}

impl PlanRequest {
    pub fn prompt(&self) -> String {
        format!(
            "Create a 1-week sample training plan for a {} runner whose goal is \"{}\". \
They can train {} days a week.\n\
\n\
Language: Russian.\n\
\n\
Structure the response as a list of daily cards.\n\
Include:\n\
- Day of week\n\
- Workout type (Recovery, Tempo, Long Run, Intervals, Rest)\n\
- Specific details (distances, paces)\n\
- A brief motivation tip.",
            self.level.label(),
            self.goal,
            self.days_per_week
        )
    }
}

/// A finished plan, or the fallback text that stands in for one.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPlan {
    pub text: String,
    pub generated_at: DateTime<Local>,
}

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: u16,
    message: String,
}

/// Coach errors.
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    #[error("No API key configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

// ============================================================================
// Client
// ============================================================================

/// Blocking Gemini client. Run it off the UI thread, see [`PlanJob`].
pub struct CoachClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
    model: String,
    temperature: f32,
    base_url: String,
}

impl CoachClient {
    pub fn new(settings: &CoachSettings) -> Result<Self, CoachError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key: settings.api_key.clone().filter(|key| !key.trim().is_empty()),
            model: settings.model.clone(),
            temperature: settings.temperature,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Ask the model for a plan and return its text with code fences removed.
    pub fn generate(&self, request: &PlanRequest) -> Result<String, CoachError> {
        let api_key = self.api_key.as_deref().ok_or(CoachError::MissingApiKey)?;
        let url = self.endpoint();
        debug!(model = %self.model, url = %url, "Sending plan request");

        let body = build_request(request, self.temperature);
        let response = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<GenerateResponse>(&text)
                .ok()
                .and_then(|r| r.error)
                .map(|e| e.message)
                .unwrap_or(text);
            return Err(CoachError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_response(&text).map(|plan| strip_code_fences(&plan))
    }
}

fn build_request(request: &PlanRequest, temperature: f32) -> GenerateRequest {
    GenerateRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(request.prompt()),
            }],
        }],
        system_instruction: Content {
            role: None,
            parts: vec![Part {
                text: Some(SYSTEM_INSTRUCTION.to_string()),
            }],
        },
        generation_config: GenerationConfig { temperature },
    }
}

/// Pull the plan text out of a `generateContent` response body.
///
/// An error object in the body is an error; a response with no text is
/// not, it yields [`EMPTY_PLAN_TEXT`].
pub fn parse_response(body: &str) -> Result<String, CoachError> {
    let response: GenerateResponse = serde_json::from_str(body)?;

    if let Some(err) = response.error {
        return Err(CoachError::Api {
            status: err.code,
            message: err.message,
        });
    }

    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<Vec<_>>()
                .concat()
        })
        .filter(|t| !t.is_empty());

    Ok(text.unwrap_or_else(|| EMPTY_PLAN_TEXT.to_string()))
}

/// Drop a leading ```` ```lang ```` fence and a trailing ```` ``` ````.
pub fn strip_code_fences(text: &str) -> String {
    let mut out = text;

    if let Some(rest) = out.strip_prefix("```") {
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        let after_tag = &rest[tag_len..];
        // A word is only a language tag when its line ends right after it.
        let ends_line = after_tag.is_empty() || after_tag.starts_with(|c: char| c == '\n' || c == '\r');
        let body = if ends_line {
            after_tag
        } else {
            rest
        };
        out = body.trim_start();
    }

    out.strip_suffix("```").unwrap_or(out).to_string()
}

/// Generate a plan, turning any failure into the apology text.
pub fn generate_or_fallback(client: &CoachClient, request: &PlanRequest) -> String {
    info!(
        runner_level = request.level.label(),
        days = request.days_per_week,
        "Generating training plan"
    );
    match client.generate(request) {
        Ok(text) => text,
        Err(e) => {
            error!("Coach error: {}", e);
            UNAVAILABLE_TEXT.to_string()
        }
    }
}

// ============================================================================
// Background job
// ============================================================================

/// One plan generation running on a worker thread.
pub struct PlanJob {
    receiver: Receiver<GeneratedPlan>,
}

impl PlanJob {
    /// Start generating. `notify` runs on the worker once the plan is ready.
    pub fn spawn<F>(client: Arc<CoachClient>, request: PlanRequest, notify: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let (tx, rx) = bounded(1);

        thread::spawn(move || {
            let text = generate_or_fallback(&client, &request);
            let plan = GeneratedPlan {
                text,
                generated_at: Local::now(),
            };
            if tx.send(plan).is_err() {
                debug!("Plan job dropped before completion");
            }
            notify();
        });

        Self { receiver: rx }
    }

    /// Non-blocking check for the result.
    pub fn poll(&self) -> Option<GeneratedPlan> {
        match self.receiver.try_recv() {
            Ok(plan) => Some(plan),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(GeneratedPlan {
                text: UNAVAILABLE_TEXT.to_string(),
                generated_at: Local::now(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_request() {
        let request = PlanRequest {
            level: RunnerLevel::Elite,
            goal: "10 км быстрее 40 минут".to_string(),
            days_per_week: 6,
        };
        let prompt = request.prompt();
        assert!(prompt.contains("Элита"));
        assert!(prompt.contains("\"10 км быстрее 40 минут\""));
        assert!(prompt.contains("6 days a week"));
        assert!(prompt.contains("Language: Russian."));
    }

    #[test]
    fn test_request_body_shape() {
        let body = build_request(&PlanRequest::default(), 0.7);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Любитель"));
        assert!(json["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("UNITED RUNNERS"));
        assert!(json["systemInstruction"].get("role").is_none());
        assert!((json["generationConfig"]["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_parse_response_takes_first_text() {
        let body = r####"{"candidates":[{"content":{"role":"model","parts":[{"text":"### Понедельник"}]}}]}"####;
        assert_eq!(parse_response(body).unwrap(), "### Понедельник");
    }

    #[test]
    fn test_parse_response_joins_all_parts() {
        let body = serde_json::json!({
            "candidates": [
                {"content": {"parts": [{"text": "### Пн\n"}, {"text": "### Вт\n"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        })
        .to_string();
        assert_eq!(parse_response(&body).unwrap(), "### Пн\n### Вт\n");
    }

    #[test]
    fn test_parse_response_without_text() {
        let body = r#"{"candidates":[{"content":{"parts":[]}}]}"#;
        assert_eq!(parse_response(body).unwrap(), EMPTY_PLAN_TEXT);
        assert_eq!(parse_response("{}").unwrap(), EMPTY_PLAN_TEXT);
    }

    #[test]
    fn test_parse_response_error_object() {
        let body = r#"{"error":{"code":403,"message":"API key not valid","status":"PERMISSION_DENIED"}}"#;
        match parse_response(body) {
            Err(CoachError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_invalid_json() {
        assert!(matches!(parse_response("not json"), Err(CoachError::Decode(_))));
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```html\n<p>x</p>\n```"), "<p>x</p>\n");
        assert_eq!(strip_code_fences("```markdown\n### День 1```"), "### День 1");
        assert_eq!(strip_code_fences("```\nplain\n```"), "plain\n");
        assert_eq!(strip_code_fences("no fences"), "no fences");
        assert_eq!(strip_code_fences("```Monday: easy 5 km```"), "Monday: easy 5 km");
        assert_eq!(strip_code_fences("```markdown"), "");
    }
}
