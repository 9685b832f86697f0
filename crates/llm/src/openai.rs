use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use studio_common::{Result, StudioError};
use tracing::debug;

use crate::client::{LlmClient, LlmRequest, LlmResponse, Role, TokenUsage};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct WireMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    model: String,
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

/// Client for OpenAI's chat completions API and compatible servers.
pub struct OpenAiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(base_url: Option<String>, model: String, api_key: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            model,
            api_key,
            http_client: reqwest::Client::new(),
        }
    }

    fn wire_role(role: Role) -> &'static str {
        match role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn request_body<'a>(&'a self, request: &LlmRequest) -> ChatCompletionRequest<'a> {
        let system = request.system_prompt.iter().map(|instructions| WireMessage {
            role: "system".to_string(),
            content: Some(instructions.clone()),
        });
        let turns = request.messages.iter().map(|msg| WireMessage {
            role: Self::wire_role(msg.role).to_string(),
            content: Some(msg.content.clone()),
        });

        ChatCompletionRequest {
            model: &self.model,
            messages: system.chain(turns).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }

    fn into_response(body: ChatCompletionResponse) -> Result<LlmResponse> {
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| StudioError::Agent("No choices in completion response".to_string()))?;

        let content = choice
            .message
            .content
            .ok_or_else(|| StudioError::Agent("Completion has no text output".to_string()))?;

        Ok(LlmResponse {
            content,
            model: body.model,
            usage: body.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: LlmRequest) -> Result<LlmResponse> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.request_body(&request);

        debug!(model = %self.model, url = %url, "Sending chat completion");

        let mut http_req = self.http_client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            http_req = http_req.bearer_auth(key);
        }

        let response = http_req
            .send()
            .await
            .map_err(|e| StudioError::Agent(format!("OpenAI request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(StudioError::Agent(format!(
                "OpenAI API error {status}: {body_text}"
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| StudioError::Agent(format!("Failed to parse OpenAI response: {e}")))?;

        Self::into_response(parsed)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_puts_instructions_first() {
        let client = OpenAiClient::new(None, "gpt-4o-mini".to_string(), Some("sk-test".to_string()));
        let request = LlmRequest::single_turn("Pick a style agent.", "launch our new app")
            .with_sampling(Some(0.5), Some(512));

        let json = serde_json::to_value(client.request_body(&request)).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.5);
        assert_eq!(json["max_tokens"], 512);

        let messages = json["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], "Pick a style agent.");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["content"], "launch our new app");
    }

    #[test]
    fn request_body_omits_unset_sampling() {
        let client = OpenAiClient::new(None, "gpt-4o-mini".to_string(), None);
        let json = serde_json::to_value(client.request_body(&LlmRequest::single_turn("", "hi")))
            .unwrap();

        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert!(json.get("temperature").is_none());
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn base_url_defaults_and_trims_slash() {
        let client = OpenAiClient::new(None, "m".to_string(), None);
        assert_eq!(client.base_url, "https://api.openai.com");

        let client = OpenAiClient::new(Some("http://localhost:11434/".into()), "m".to_string(), None);
        assert_eq!(client.base_url, "http://localhost:11434");
    }

    #[test]
    fn response_takes_first_choice() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "model": "gpt-4o-mini",
                "choices": [{"message": {"role": "assistant", "content": "Hype Agent"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3}
            }"#,
        )
        .unwrap();

        let response = OpenAiClient::into_response(body).unwrap();
        assert_eq!(response.content, "Hype Agent");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().completion_tokens, 3);
    }

    #[test]
    fn response_without_choices_is_an_error() {
        let body: ChatCompletionResponse =
            serde_json::from_str(r#"{"model": "m", "choices": []}"#).unwrap();
        assert!(OpenAiClient::into_response(body).is_err());
    }

    #[test]
    fn response_with_null_content_is_an_error() {
        let body: ChatCompletionResponse = serde_json::from_str(
            r#"{"model": "m", "choices": [{"message": {"role": "assistant", "content": null}}]}"#,
        )
        .unwrap();
        assert!(OpenAiClient::into_response(body).is_err());
    }
}
