//! Conversions between Gemini REST payloads and domain types
//!
//! Request bodies are built as JSON values; responses are deserialized into
//! the minimal structs below and converted to domain types.

use proposal_application::ports::llm_client::{GenerationRequest, LlmError};
use proposal_domain::{TokenCount, ToolCall, ToolDefinition};
use serde::Deserialize;
use serde_json::{Map, Value, json};

// ─── Domain → Gemini ─────────────────────────────────────────────

/// Rewrites a JSON Schema into Gemini's OpenAPI subset: `type` values are
/// upper-cased and keywords Gemini rejects are dropped.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let mut converted = Map::new();
            for (key, value) in map {
                match key.as_str() {
                    "type" => {
                        let upper = value
                            .as_str()
                            .map(|t| Value::String(t.to_uppercase()))
                            .unwrap_or_else(|| value.clone());
                        converted.insert(key.clone(), upper);
                    }
                    "additionalProperties" | "$schema" => {}
                    "properties" => {
                        let properties = value
                            .as_object()
                            .map(|props| {
                                props
                                    .iter()
                                    .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                                    .collect::<Map<_, _>>()
                            })
                            .unwrap_or_default();
                        converted.insert(key.clone(), Value::Object(properties));
                    }
                    "items" => {
                        converted.insert(key.clone(), to_gemini_schema(value));
                    }
                    _ => {
                        converted.insert(key.clone(), value.clone());
                    }
                }
            }
            Value::Object(converted)
        }
        other => other.clone(),
    }
}

fn base_body(request: &GenerationRequest) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(
        "systemInstruction".to_string(),
        json!({ "parts": [{ "text": request.system_prompt }] }),
    );
    body.insert(
        "contents".to_string(),
        json!([{ "role": "user", "parts": [{ "text": request.user_prompt }] }]),
    );
    body.insert(
        "generationConfig".to_string(),
        json!({ "temperature": request.temperature }),
    );
    body
}

/// `generateContent` body for free text.
pub fn text_body(request: &GenerationRequest) -> Value {
    Value::Object(base_body(request))
}

/// `generateContent` body constrained to JSON matching `schema`.
pub fn structured_body(request: &GenerationRequest, schema: &Value) -> Value {
    let mut body = base_body(request);
    body.insert(
        "generationConfig".to_string(),
        json!({
            "temperature": request.temperature,
            "responseMimeType": "application/json",
            "responseSchema": to_gemini_schema(schema),
        }),
    );
    Value::Object(body)
}

/// `generateContent` body that forces a call to one of `tools`.
pub fn function_call_body(request: &GenerationRequest, tools: &[ToolDefinition]) -> Value {
    let declarations: Vec<Value> = tools
        .iter()
        .map(|tool| {
            let schema = tool.to_json_schema();
            json!({
                "name": tool.name,
                "description": tool.description,
                "parameters": to_gemini_schema(&schema["parameters"]),
            })
        })
        .collect();

    let mut body = base_body(request);
    body.insert(
        "tools".to_string(),
        json!([{ "functionDeclarations": declarations }]),
    );
    body.insert(
        "toolConfig".to_string(),
        json!({ "functionCallingConfig": { "mode": "ANY" } }),
    );
    Value::Object(body)
}

pub fn embed_body(model: &str, text: &str, dimensions: usize) -> Value {
    json!({
        "model": format!("models/{}", model),
        "content": { "parts": [{ "text": text }] },
        "outputDimensionality": dimensions,
    })
}

pub fn count_tokens_body(text: &str) -> Value {
    json!({ "contents": [{ "role": "user", "parts": [{ "text": text }] }] })
}

// ─── Gemini → Domain ─────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    text: Option<String>,
    function_call: Option<FunctionCall>,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmbedContentResponse {
    embedding: Embedding,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountTokensResponse {
    #[serde(default)]
    total_tokens: u64,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> Result<&[Part], LlmError> {
        let Some(candidate) = self.candidates.first() else {
            let reason = self
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.as_deref())
                .unwrap_or("no candidates");
            return Err(LlmError::InvalidResponse(format!(
                "empty response: {}",
                reason
            )));
        };
        match &candidate.content {
            Some(content) => Ok(&content.parts),
            None => Err(LlmError::InvalidResponse(format!(
                "candidate without content (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }

    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Result<String, LlmError> {
        Ok(self
            .first_parts()?
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect())
    }

    /// First function call of the first candidate, if the model made one.
    pub fn function_call(&self) -> Result<Option<ToolCall>, LlmError> {
        Ok(self
            .first_parts()?
            .iter()
            .find_map(|part| part.function_call.as_ref())
            .map(|call| {
                call.args
                    .iter()
                    .fold(ToolCall::new(call.name.clone()), |tool_call, (key, value)| {
                        tool_call.with_arg(key.clone(), value.clone())
                    })
            }))
    }
}

impl EmbedContentResponse {
    pub fn into_values(self) -> Vec<f32> {
        self.embedding.values
    }
}

impl From<CountTokensResponse> for TokenCount {
    fn from(response: CountTokensResponse) -> Self {
        TokenCount {
            total_tokens: response.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proposal_domain::ModelSelector;
    use proposal_domain::tool::web_search_tool;

    fn request() -> GenerationRequest {
        GenerationRequest::new(ModelSelector::gemini("gemini-2.5-flash"), "system", "user")
    }

    #[test]
    fn test_to_gemini_schema_uppercases_types() {
        let schema = json!({
            "type": "object",
            "additionalProperties": false,
            "properties": {
                "action": { "type": "string", "enum": ["plan", "done"] },
                "topics": { "type": "array", "items": { "type": "string" } },
            },
            "required": ["action"],
        });

        let converted = to_gemini_schema(&schema);

        assert_eq!(converted["type"], "OBJECT");
        assert!(converted.get("additionalProperties").is_none());
        assert_eq!(converted["properties"]["action"]["type"], "STRING");
        assert_eq!(converted["properties"]["action"]["enum"], json!(["plan", "done"]));
        assert_eq!(converted["properties"]["topics"]["items"]["type"], "STRING");
        assert_eq!(converted["required"], json!(["action"]));
    }

    #[test]
    fn test_structured_body() {
        let body = structured_body(&request(), &json!({ "type": "object" }));
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "system");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "user");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
    }

    #[test]
    fn test_function_call_body_forces_a_call() {
        let body = function_call_body(&request(), &[web_search_tool()]);
        let declaration = &body["tools"][0]["functionDeclarations"][0];
        assert_eq!(declaration["name"], "web_search");
        assert_eq!(declaration["parameters"]["type"], "OBJECT");
        assert_eq!(declaration["parameters"]["required"], json!(["query"]));
        assert_eq!(body["toolConfig"]["functionCallingConfig"]["mode"], "ANY");
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Hello " }, { "text": "world" }] },
                "finishReason": "STOP",
            }]
        }))
        .unwrap();
        assert_eq!(response.text().unwrap(), "Hello world");
        assert_eq!(response.function_call().unwrap(), None);
    }

    #[test]
    fn test_response_function_call() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{
                    "functionCall": { "name": "web_search", "args": { "query": "EV tariffs" } }
                }] }
            }]
        }))
        .unwrap();
        let call = response.function_call().unwrap().unwrap();
        assert_eq!(call.tool_name, "web_search");
        assert_eq!(call.get_string("query"), Some("EV tariffs"));
    }

    #[test]
    fn test_blocked_prompt_is_invalid_response() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        let err = response.text().unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse(msg) if msg.contains("SAFETY")));
    }

    #[test]
    fn test_embedding_and_token_responses() {
        let embed: EmbedContentResponse =
            serde_json::from_value(json!({ "embedding": { "values": [0.5, -0.25] } })).unwrap();
        assert_eq!(embed.into_values(), vec![0.5, -0.25]);

        let tokens: CountTokensResponse =
            serde_json::from_value(json!({ "totalTokens": 1234 })).unwrap();
        assert_eq!(TokenCount::from(tokens).total_tokens, 1234);
    }

    #[test]
    fn test_embed_body() {
        let body = embed_body("gemini-embedding-001", "chunk", 1536);
        assert_eq!(body["model"], "models/gemini-embedding-001");
        assert_eq!(body["outputDimensionality"], 1536);
    }
}
