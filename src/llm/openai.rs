//! OpenAI-compatible chat-completions client

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{ChatClient, ChatMessage, ChatReply, Role, ToolCall, ToolDefinition};
use crate::config::LlmConfig;

/// Chat-completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireToolFunction<'a>,
}

#[derive(Debug, Serialize)]
struct WireToolFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a serde_json::Value,
}

/// Chat-completions response body (only the fields we use)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

fn function_kind() -> String {
    "function".to_string()
}

impl From<&ToolCall> for WireToolCall {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            kind: function_kind(),
            function: WireFunction {
                name: call.name.clone(),
                arguments: call.arguments.clone(),
            },
        }
    }
}

impl From<WireToolCall> for ToolCall {
    fn from(call: WireToolCall) -> Self {
        Self {
            id: call.id,
            name: call.function.name,
            arguments: call.function.arguments,
        }
    }
}

pub struct OpenAiClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    /// A missing key is not an error here; the API rejects the call instead.
    pub fn new(config: &LlmConfig, api_key: Option<String>) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(request_timeout(config.timeout_secs))
            .build()
            .into();

        Self {
            agent,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage], tools: &'a [ToolDefinition]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role,
                    content: m.content.as_deref(),
                    tool_calls: m.tool_calls.iter().map(WireToolCall::from).collect(),
                    tool_call_id: m.tool_call_id.as_deref(),
                })
                .collect(),
            tools: tools
                .iter()
                .map(|t| WireTool {
                    kind: "function",
                    function: WireToolFunction {
                        name: &t.name,
                        description: &t.description,
                        parameters: &t.parameters,
                    },
                })
                .collect(),
        }
    }
}

/// `0` disables the timeout
fn request_timeout(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_reply(body: &str) -> Result<ChatReply> {
    let response: ChatResponse = serde_json::from_str(body).context("Failed to parse chat completions response")?;

    let message = response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message)
        .ok_or_else(|| eyre::eyre!("No choices in chat completions response"))?;

    Ok(ChatReply {
        content: message.content,
        tool_calls: message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(ToolCall::from)
            .collect(),
    })
}

impl ChatClient for OpenAiClient {
    fn complete(&self, messages: &[ChatMessage], tools: &[ToolDefinition]) -> Result<ChatReply> {
        log::info!(
            "Calling {} with model={}, messages={}, tools={}",
            self.endpoint,
            self.model,
            messages.len(),
            tools.len()
        );

        let request = self.build_request(messages, tools);
        let request_body = serde_json::to_string(&request).context("Failed to serialize request")?;

        let mut builder = self
            .agent
            .post(&self.endpoint)
            .header("Content-Type", "application/json");
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", &format!("Bearer {}", key));
        }

        let mut response = builder
            .send(request_body.as_bytes())
            .context("Failed to call chat completions API")?;

        let response_body = response
            .body_mut()
            .read_to_string()
            .context("Failed to read response")?;
        log::debug!("Chat completions response: {}", response_body);

        parse_reply(&response_body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> OpenAiClient {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            model: "test-model".to_string(),
            ..LlmConfig::default()
        };
        OpenAiClient::new(&config, Some("sk-test".to_string()))
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        assert_eq!(client().endpoint(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_request_body_shape() {
        let client = client();
        let messages = vec![
            ChatMessage::system("You are a writer."),
            ChatMessage::assistant(
                None,
                vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "write_file".to_string(),
                    arguments: "{}".to_string(),
                }],
            ),
            ChatMessage::tool_result("call_1", "ok"),
        ];
        let tools = vec![ToolDefinition {
            name: "write_file".to_string(),
            description: "Write a file".to_string(),
            parameters: json!({"type": "object"}),
        }];

        let body = serde_json::to_value(client.build_request(&messages, &tools)).unwrap();

        assert_eq!(body["model"], "test-model");
        assert_eq!(body["messages"][0]["role"], "system");
        assert!(body["messages"][0].get("tool_calls").is_none());
        assert_eq!(body["messages"][1]["content"], serde_json::Value::Null);
        assert_eq!(body["messages"][1]["tool_calls"][0]["type"], "function");
        assert_eq!(body["messages"][1]["tool_calls"][0]["function"]["name"], "write_file");
        assert_eq!(body["messages"][2]["role"], "tool");
        assert_eq!(body["messages"][2]["tool_call_id"], "call_1");
        assert_eq!(body["tools"][0]["function"]["name"], "write_file");
    }

    #[test]
    fn test_request_omits_empty_tools() {
        let client = client();
        let messages = vec![ChatMessage::user("hi")];
        let body = serde_json::to_value(client.build_request(&messages, &[])).unwrap();
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_zero_timeout_means_none() {
        assert_eq!(request_timeout(0), None);
        assert_eq!(request_timeout(30), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_parse_text_reply() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Hello"}}]}"#;
        let reply = parse_reply(body).unwrap();
        assert_eq!(reply.content.as_deref(), Some("Hello"));
        assert!(!reply.has_tool_calls());
    }

    #[test]
    fn test_parse_tool_call_reply() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":null,
            "tool_calls":[{"id":"call_9","type":"function",
            "function":{"name":"read_file","arguments":"{}"}}]}}]}"#;
        let reply = parse_reply(body).unwrap();
        assert!(reply.content.is_none());
        assert_eq!(reply.tool_calls.len(), 1);
        assert_eq!(reply.tool_calls[0].id, "call_9");
        assert_eq!(reply.tool_calls[0].name, "read_file");
    }

    #[test]
    fn test_parse_without_choices_fails() {
        assert!(parse_reply(r#"{"choices":[]}"#).is_err());
        assert!(parse_reply("not json").is_err());
    }
}
