use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
	pub role: &'static str,
	pub content: String,
}
impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self { role: "system", content: content.into() }
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self { role: "user", content: content.into() }
	}
}

/// Sends one chat-completion request and returns the first choice's message text.
///
/// No retries: callers decide what a failure means.
pub async fn complete(
	cfg: &bookms_config::LlmProviderConfig,
	messages: &[ChatMessage],
) -> Result<String> {
	let Some(api_key) = cfg.api_key.as_deref() else {
		return Err(Error::InvalidConfig {
			message: "providers.llm_ranker.api_key is not configured.".to_string(),
		});
	};
	let mut builder = Client::builder();

	if let Some(timeout_ms) = cfg.timeout_ms {
		builder = builder.timeout(Duration::from_millis(timeout_ms));
	}

	let client = builder.build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"messages": messages,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Status { status: status.as_u16() });
	}

	let bytes = res.bytes().await?;
	let json: Value = serde_json::from_slice(&bytes)?;

	parse_message_content(json)
}

fn parse_message_content(json: Value) -> Result<String> {
	let content = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Chat response is missing message content.".to_string(),
		})?;

	if content.trim().is_empty() {
		return Err(Error::InvalidResponse {
			message: "Chat response message content is empty.".to_string(),
		});
	}

	Ok(content.to_string())
}
