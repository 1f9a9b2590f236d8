//! Gemini wire types and conversions.
//!
//! Request/response shapes for `models/{model}:generateContent` (camelCase
//! JSON), plus the conversion from a response candidate to the domain
//! [`LlmResponse`]. Gemini does not assign tool-use IDs, so the caller
//! supplies an ID generator and results are correlated back by function
//! name on the wire.

use sandpiper_application::ports::llm_gateway::ToolResultMessage;
use sandpiper_domain::{ContentBlock, LlmResponse, StopReason, TokenUsage};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashMap;

/// One conversation entry: role is `"user"`, `"model"`, or `"tool"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part: exactly one of the fields is populated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: HashMap<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

/// Tool catalog attachment for the request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDeclarations {
    pub function_declarations: Vec<Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDeclarations>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u64,
    #[serde(default)]
    pub candidates_token_count: u64,
}

/// A system-instruction content (role is ignored by the API but required by
/// the shape).
pub fn system_content(text: &str) -> Content {
    Content {
        role: "user".to_string(),
        parts: vec![Part {
            text: Some(text.to_string()),
            ..Default::default()
        }],
    }
}

/// A plain user text message.
pub fn user_text(text: &str) -> Content {
    Content {
        role: "user".to_string(),
        parts: vec![Part {
            text: Some(text.to_string()),
            ..Default::default()
        }],
    }
}

/// Tool results for one round, as a single tool-role content.
///
/// Success payloads are wrapped as `{"result": ...}`, failures as
/// `{"error": ...}`, which is how the model distinguishes them.
pub fn tool_results_content(results: &[ToolResultMessage]) -> Content {
    let parts = results
        .iter()
        .map(|r| {
            let response = if r.is_error {
                json!({ "error": r.output })
            } else {
                json!({ "result": r.output })
            };
            Part {
                function_response: Some(FunctionResponse {
                    name: r.tool_name.clone(),
                    response,
                }),
                ..Default::default()
            }
        })
        .collect();

    Content {
        role: "tool".to_string(),
        parts,
    }
}

/// Convert a response candidate into the domain [`LlmResponse`].
///
/// `next_id` supplies correlation IDs for tool-use blocks.
pub fn convert_candidate(
    content: &Content,
    finish_reason: Option<&str>,
    usage: Option<UsageMetadata>,
    model: &str,
    mut next_id: impl FnMut() -> String,
) -> LlmResponse {
    let mut blocks = Vec::new();
    for part in &content.parts {
        if let Some(text) = &part.text {
            blocks.push(ContentBlock::Text(text.clone()));
        }
        if let Some(call) = &part.function_call {
            blocks.push(ContentBlock::ToolUse {
                id: next_id(),
                name: call.name.clone(),
                input: call.args.clone(),
            });
        }
    }

    let has_calls = blocks
        .iter()
        .any(|b| matches!(b, ContentBlock::ToolUse { .. }));
    let stop_reason = if has_calls {
        Some(StopReason::ToolUse)
    } else {
        finish_reason.map(|r| match r {
            "STOP" => StopReason::EndTurn,
            "MAX_TOKENS" => StopReason::MaxTokens,
            other => StopReason::Other(other.to_string()),
        })
    };

    LlmResponse {
        content: blocks,
        stop_reason,
        model: Some(model.to_string()),
        usage: usage.map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_camel_case_fields() {
        let request = GenerateContentRequest {
            system_instruction: Some(system_content("be helpful")),
            contents: vec![user_text("hi")],
            tools: Some(vec![ToolDeclarations {
                function_declarations: vec![json!({"name": "read_file"})],
            }]),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("systemInstruction").is_some());
        assert!(value["tools"][0].get("functionDeclarations").is_some());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        // unset part fields are omitted entirely
        assert!(value["contents"][0]["parts"][0].get("functionCall").is_none());
    }

    #[test]
    fn response_parses_function_call_parts() {
        let raw = json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Let me check." },
                        { "functionCall": { "name": "list_directory", "args": { "directory": "." } } }
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 42, "candidatesTokenCount": 7 }
        });

        let parsed: GenerateContentResponse = serde_json::from_value(raw).unwrap();
        let candidate = &parsed.candidates[0];
        let mut n = 0u64;
        let response = convert_candidate(
            candidate.content.as_ref().unwrap(),
            candidate.finish_reason.as_deref(),
            parsed.usage_metadata,
            "gemini-2.0-flash-001",
            || {
                n += 1;
                format!("call-{}", n)
            },
        );

        assert_eq!(response.text_content(), "Let me check.");
        assert_eq!(response.stop_reason, Some(StopReason::ToolUse));
        assert_eq!(response.usage, Some(TokenUsage::new(42, 7)));

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].tool_name, "list_directory");
        assert_eq!(calls[0].native_id.as_deref(), Some("call-1"));
        assert_eq!(calls[0].get_string("directory"), Some("."));
    }

    #[test]
    fn text_only_candidate_maps_stop_to_end_turn() {
        let content = Content {
            role: "model".to_string(),
            parts: vec![Part {
                text: Some("done".to_string()),
                ..Default::default()
            }],
        };
        let response = convert_candidate(&content, Some("STOP"), None, "m", || unreachable!());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn tool_results_wrap_success_and_error_distinctly() {
        let results = vec![
            ToolResultMessage {
                tool_use_id: "call-1".to_string(),
                tool_name: "read_file".to_string(),
                output: "contents".to_string(),
                is_error: false,
            },
            ToolResultMessage {
                tool_use_id: "call-2".to_string(),
                tool_name: "run_script".to_string(),
                output: "Error: Unknown function: run_scripts".to_string(),
                is_error: true,
            },
        ];

        let content = tool_results_content(&results);
        assert_eq!(content.role, "tool");
        assert_eq!(content.parts.len(), 2);

        let ok = content.parts[0].function_response.as_ref().unwrap();
        assert_eq!(ok.name, "read_file");
        assert_eq!(ok.response["result"], "contents");

        let err = content.parts[1].function_response.as_ref().unwrap();
        assert_eq!(err.response["error"], "Error: Unknown function: run_scripts");
    }
}
