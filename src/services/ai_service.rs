//! OpenAI-compatible chat client for itinerary generation and budget
//! analysis.
//!
//! Both operations send a fixed prompt with the caller's payload appended
//! and require the model to answer with a strict JSON document.

use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{AppError, Result};
use crate::models::ai::{BudgetAnalysis, PlanResponse};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

const PLAN_PROMPT: &str = r#"You are a professional travel planning assistant.
The user provides a destination, day count, budget, party size and travel preferences.
Produce a detailed day-by-day itinerary as JSON. Coordinates must be accurate.

The output must follow this structure exactly:
{
  "plan": [
    {
      "day": 1,
      "spots": [
        {"name": "Spot A", "lng": 116.397, "lat": 39.908, "description": "Description A"},
        {"name": "Spot B", "lng": 116.384, "lat": 39.925, "description": "Description B"}
      ]
    }
  ]
}

Answer with the JSON document only, no surrounding text."#;

const BUDGET_PROMPT: &str = r#"You are a professional financial analysis assistant.
The user provides a travel plan's total budget and its recorded expenses.
Analyze spending trends, suggest concrete optimizations, summarize budget usage,
and warn about overspending risk.

The output must follow this structure exactly:
{
  "consumptionTrend": "detailed description of the spending trend",
  "suggestions": [
    "suggestion 1",
    "suggestion 2",
    "suggestion 3"
  ],
  "budgetSummary": "summary of current budget usage",
  "riskWarning": "risk warning, or 'no risk identified' when spending looks healthy"
}

Answer with the JSON document only, no surrounding text."#;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: String,
}

#[derive(Clone)]
pub struct AiService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl AiService {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| AppError::Config("OPENAI_API_KEY not set".to_string()))?;

        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url,
            model,
        })
    }

    /// Generate a day-by-day itinerary from the client's request payload.
    pub async fn generate_plan(&self, payload: &Value) -> Result<PlanResponse> {
        let prompt = format!("{}\n\nUser request parameters: {}", PLAN_PROMPT, payload);
        let reply = self.chat(&prompt).await?;
        parse_reply(&reply)
    }

    /// Analyze a plan's spending from the client's budget payload.
    pub async fn analyze_budget(&self, payload: &Value) -> Result<BudgetAnalysis> {
        let prompt = format!("{}\n\nUser budget data: {}", BUDGET_PROMPT, payload);
        let reply = self.chat(&prompt).await?;
        parse_reply(&reply)
    }

    async fn chat(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("chat request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upstream(format!(
                "chat request failed with status {}: {}",
                status, error_text
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse chat response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Upstream("chat response contained no choices".to_string()))
    }
}

/// Decode the model's JSON answer, tolerating a Markdown code fence
/// around it.
fn parse_reply<T: serde::de::DeserializeOwned>(reply: &str) -> Result<T> {
    let body = strip_code_fence(reply);
    serde_json::from_str(body)
        .map_err(|e| AppError::Upstream(format!("model returned unparseable JSON: {}", e)))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
