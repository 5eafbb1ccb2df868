//! Anthropic Messages API provider.

use super::{CompletionProvider, CompletionRequest, ContentPart, ProviderError, UserContent};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
}

pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(config: AnthropicConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_content(content: UserContent) -> MessageContent {
        match content {
            UserContent::Text(text) => MessageContent::Text(text),
            UserContent::Parts(parts) => MessageContent::Blocks(
                parts
                    .into_iter()
                    .map(|part| match part {
                        ContentPart::Image { media_type, data } => ContentBlock::Image {
                            source: ImageSource {
                                kind: "base64",
                                media_type,
                                data: BASE64.encode(data),
                            },
                        },
                        ContentPart::Text(text) => ContentBlock::Text { text },
                    })
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: vec![Message {
                role: "user",
                content: Self::build_content(request.user_content),
            }],
        };

        let url = format!("{}/v1/messages", self.config.base_url);

        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            "sending messages request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            // The body is usually the API's error object; surface its
            // message rather than the whole payload.
            let message = serde_json::from_str::<MessagesReply>(&error_text)
                .ok()
                .and_then(|reply| reply.error)
                .map(|e| e.message)
                .unwrap_or(error_text);
            return Err(ProviderError::Api(format!(
                "upstream error {status}: {message}"
            )));
        }

        let reply: MessagesReply = response
            .json()
            .await
            .map_err(|e| ProviderError::Api(format!("failed to decode messages reply: {e}")))?;

        // Some failures arrive with a success status and an error
        // object in the body.
        if let Some(error) = reply.error {
            return Err(ProviderError::Api(error.message));
        }

        reply
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| ProviderError::Api("messages reply carried no text content".to_string()))
    }
}

// ============================================================================
// Messages API request/response types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: MessageContent,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Image { source: ImageSource },
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ImageSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct MessagesReply {
    #[serde(default)]
    content: Vec<ReplyBlock>,
    #[serde(default)]
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ReplyBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_request_serializes_as_plain_content() {
        let body = MessagesRequest {
            model: "test-model",
            max_tokens: 1000,
            system: "Be terse.",
            messages: vec![Message {
                role: "user",
                content: AnthropicProvider::build_content(UserContent::Text("hello".to_string())),
            }],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["max_tokens"], 1000);
        assert_eq!(value["system"], "Be terse.");
    }

    #[test]
    fn image_parts_serialize_as_base64_source_blocks() {
        let content = AnthropicProvider::build_content(UserContent::Parts(vec![
            ContentPart::Image {
                media_type: "image/png".to_string(),
                data: vec![0xDE, 0xAD, 0xBE, 0xEF],
            },
            ContentPart::Text("what is this?".to_string()),
        ]));

        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value[0]["type"], "image");
        assert_eq!(value[0]["source"]["type"], "base64");
        assert_eq!(value[0]["source"]["media_type"], "image/png");
        assert_eq!(value[0]["source"]["data"], BASE64.encode([0xDE, 0xAD, 0xBE, 0xEF]));
        assert_eq!(value[1]["type"], "text");
        assert_eq!(value[1]["text"], "what is this?");
    }

    #[test]
    fn reply_parsing_takes_the_first_text_segment() {
        let reply: MessagesReply = serde_json::from_value(json!({
            "content": [{"type": "text", "text": "the completion"}],
        }))
        .unwrap();
        assert!(reply.error.is_none());
        assert_eq!(
            reply.content.into_iter().find_map(|b| b.text).as_deref(),
            Some("the completion")
        );
    }

    #[test]
    fn embedded_error_object_deserializes() {
        let reply: MessagesReply = serde_json::from_value(json!({
            "error": {"type": "rate_limit_error", "message": "rate limited"},
        }))
        .unwrap();
        assert_eq!(reply.error.unwrap().message, "rate limited");
    }
}
