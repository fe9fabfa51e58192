//! Enhancement request construction and the result mapping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Build the prompt sent to the backend. The `{resume}` and `{job_description}`
/// markers are literal; the backend fills them in.
pub fn build_prompt(prompt_text: &str) -> String {
    format!("{prompt_text}:\n\nResume:\n{{resume}}\n\nJob Description:\n{{job_description}}")
}

/// Body of `POST /enhance_resume/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancementRequest {
    pub resume_text: String,
    pub job_description: String,
    pub prompt: String,
}

impl EnhancementRequest {
    pub fn new(resume_text: &str, job_description: &str, prompt_text: &str) -> Self {
        Self {
            resume_text: resume_text.to_string(),
            job_description: job_description.to_string(),
            prompt: build_prompt(prompt_text),
        }
    }
}

/// Named sections returned by the backend, keyed by section name.
///
/// Held sorted so the section list renders in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct EnhancementResult {
    sections: BTreeMap<String, String>,
}

impl EnhancementResult {
    pub fn new(sections: BTreeMap<String, String>) -> Self {
        Self { sections }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.sections.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnhancementResult {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            sections: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for EnhancementResult {
    type Error = String;

    /// Strings are kept verbatim; any other JSON value is rendered as
    /// pretty-printed JSON so it can still be displayed.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => return Err(format!("expected a JSON object, got {}", json_kind(&other))),
        };
        let sections = map
            .into_iter()
            .map(|(name, content)| {
                let text = match content {
                    serde_json::Value::String(s) => s,
                    other => serde_json::to_string_pretty(&other)
                        .unwrap_or_else(|_| other.to_string()),
                };
                (name, text)
            })
            .collect();
        Ok(Self { sections })
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
