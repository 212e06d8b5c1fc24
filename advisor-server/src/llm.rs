//! Chat-model client used to phrase recommendations.
//!
//! The engine decides; the model only rewrites the structured result as prose.

use advisor_core::PriorityResult;
use anyhow::{bail, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::config::LlmSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Anthropic,
    OpenAI,
}

impl Provider {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "openai" => Ok(Provider::OpenAI),
            other => bail!("unknown llm provider: {other} (expected anthropic or openai)"),
        }
    }

    fn default_base_url(&self) -> &'static str {
        match self {
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::OpenAI => "https://api.openai.com",
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: Provider,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub api_key: String,
}

impl LlmConfig {
    /// `None` when the `[llm]` section is disabled.
    pub fn from_section(section: &LlmSection) -> Result<Option<Self>> {
        if !section.enabled {
            return Ok(None);
        }
        let provider = Provider::parse(&section.provider)?;
        let api_key = std::env::var(&section.api_key_env)
            .with_context(|| format!("llm enabled but {} is not set", section.api_key_env))?;
        let base_url = section
            .base_url
            .clone()
            .unwrap_or_else(|| provider.default_base_url().to_string());

        Ok(Some(Self {
            provider,
            model: section.model.clone(),
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: section.temperature,
            max_tokens: section.max_tokens,
            api_key,
        }))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

const SYSTEM_PROMPT: &str = "You are a supportive study coach. You receive a priority decision \
that has already been made for a student. Write one or two short, encouraging sentences telling \
the student what to focus on today and why. If overdue work is listed, mention it first. \
Do not change the chosen task, the numbers, or the steps. Reply with the sentences only.";

/// Build the chat turns asking the model to phrase `result` for `student_name`.
pub fn recommendation_turns(result: &PriorityResult, student_name: &str) -> Result<Vec<ChatTurn>> {
    let payload = serde_json::to_string_pretty(result).context("serialize priority result")?;
    Ok(vec![ChatTurn {
        role: "user".to_string(),
        content: format!("Student: {student_name}\n\nPriority decision:\n{payload}"),
    }])
}

pub async fn write_recommendation(
    client: &reqwest::Client,
    config: &LlmConfig,
    result: &PriorityResult,
    student_name: &str,
) -> Result<String> {
    let turns = recommendation_turns(result, student_name)?;
    let text = chat_complete(client, config, SYSTEM_PROMPT, &turns).await?;
    if text.is_empty() {
        bail!("{:?} returned an empty completion", config.provider);
    }
    Ok(text)
}

pub async fn chat_complete(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: &str,
    turns: &[ChatTurn],
) -> Result<String> {
    match config.provider {
        Provider::Anthropic => anthropic_complete(client, config, system, turns).await,
        Provider::OpenAI => openai_complete(client, config, system, turns).await,
    }
}

async fn anthropic_complete(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: &str,
    turns: &[ChatTurn],
) -> Result<String> {
    #[derive(Serialize)]
    struct Req<'a> {
        model: &'a str,
        max_tokens: u32,
        temperature: f32,
        system: &'a str,
        messages: &'a [ChatTurn],
    }

    #[derive(Deserialize)]
    struct Resp {
        content: Vec<ContentBlock>,
    }

    #[derive(Deserialize)]
    struct ContentBlock {
        #[serde(rename = "type")]
        t: String,
        text: Option<String>,
    }

    let body = Req {
        model: &config.model,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        system,
        messages: turns,
    };

    let mut headers = HeaderMap::new();
    headers.insert("x-api-key", HeaderValue::from_str(&config.api_key)?);
    headers.insert("anthropic-version", HeaderValue::from_static("2023-06-01"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let resp = client
        .post(format!("{}/v1/messages", config.base_url))
        .headers(headers)
        .json(&body)
        .send()
        .await
        .context("anthropic request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("anthropic error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse anthropic response")?;
    let mut s = String::new();
    for b in out.content {
        if b.t == "text" {
            if let Some(t) = b.text {
                s.push_str(&t);
            }
        }
    }
    Ok(s.trim().to_string())
}

async fn openai_complete(
    client: &reqwest::Client,
    config: &LlmConfig,
    system: &str,
    turns: &[ChatTurn],
) -> Result<String> {
    #[derive(Serialize)]
    struct Req {
        model: String,
        messages: Vec<ChatTurn>,
        temperature: f32,
        max_tokens: u32,
    }

    #[derive(Deserialize)]
    struct Resp {
        choices: Vec<Choice>,
    }

    #[derive(Deserialize)]
    struct Choice {
        message: MsgOut,
    }

    #[derive(Deserialize)]
    struct MsgOut {
        content: Option<String>,
    }

    let mut messages = Vec::with_capacity(turns.len() + 1);
    messages.push(ChatTurn {
        role: "system".to_string(),
        content: system.to_string(),
    });
    messages.extend(turns.iter().cloned());

    let body = Req {
        model: config.model.clone(),
        messages,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
    };

    let resp = client
        .post(format!("{}/v1/chat/completions", config.base_url))
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .context("openai request")?;

    let status = resp.status();
    if !status.is_success() {
        let txt = resp.text().await.unwrap_or_default();
        bail!("openai error: {status} {txt}");
    }

    let out: Resp = resp.json().await.context("parse openai response")?;
    let content = out
        .choices
        .first()
        .and_then(|c| c.message.content.clone())
        .unwrap_or_default();

    Ok(content.trim().to_string())
}
