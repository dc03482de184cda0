use indexmap::IndexMap;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

/// Request body sent to the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GenerateRequest {
    /// Topic the questions should cover
    pub job: String,
}

/// Response body returned by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Generated MCQs", description = "Multiple-choice questions generated for a topic")]
pub struct GenerateResponse {
    pub mcqs: Vec<McqPayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McqPayload {
    /// Prompt text
    pub question: String,
    /// Option key -> option text, in the order the generator sent them
    pub options: IndexMap<String, String>,
    /// Correct option keys; the first entry is authoritative
    #[serde(default)]
    pub answer: Vec<String>,
}

impl GenerateResponse {
    /// Pretty-printed JSON schema of the payload the generator must return.
    pub fn json_schema() -> String {
        let schema = schema_for!(GenerateResponse);
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "Schema serialization failed".to_string())
    }
}

impl McqPayload {
    pub fn new<K, V>(question: impl Into<String>, options: impl IntoIterator<Item = (K, V)>, answer: &[&str]) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            question: question.into(),
            options: options.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            answer: answer.iter().map(|key| (*key).to_string()).collect(),
        }
    }
}
