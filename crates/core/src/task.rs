//! Task input and the aggregated execution result.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An incoming unit of work. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub session_id: String,
    pub text: String,
}

impl Task {
    pub fn new(session_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            text: text.into(),
        }
    }
}

/// What a single agent returned.
///
/// Serialized untagged: plain text becomes a JSON string, structured payloads
/// pass through, and a failure becomes `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentOutput {
    Text(String),
    Failed { error: String },
    Structured(serde_json::Value),
}

impl AgentOutput {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self::Failed {
            error: error.into(),
        }
    }

    /// The text payload, if this is a text result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl std::fmt::Display for AgentOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Failed { error } => write!(f, "error: {error}"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl PartialEq<&str> for AgentOutput {
    fn eq(&self, other: &&str) -> bool {
        self.as_text() == Some(*other)
    }
}

/// Agent name → output, in invocation order.
///
/// Inserting an existing name overwrites its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionResult {
    entries: IndexMap<String, AgentOutput>,
}

impl ExecutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, agent: impl Into<String>, output: AgentOutput) {
        self.entries.insert(agent.into(), output);
    }

    pub fn get(&self, agent: &str) -> Option<&AgentOutput> {
        self.entries.get(agent)
    }

    pub fn contains_key(&self, agent: &str) -> bool {
        self.entries.contains_key(agent)
    }

    /// Agent names in invocation order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentOutput)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of agents whose output is a failure marker.
    pub fn failures(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, out)| out.is_failure())
            .map(|(name, _)| name)
            .collect()
    }
}

impl std::ops::Index<&str> for ExecutionResult {
    type Output = AgentOutput;

    fn index(&self, agent: &str) -> &AgentOutput {
        self.entries
            .get(agent)
            .unwrap_or_else(|| panic!("no result for agent '{agent}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_preserves_invocation_order() {
        let mut result = ExecutionResult::new();
        result.insert("llm", AgentOutput::text("hi"));
        result.insert("search", AgentOutput::text("Search results"));
        result.insert("calendar", AgentOutput::text("Event created in calendar"));

        let keys: Vec<&str> = result.keys().collect();
        assert_eq!(keys, vec!["llm", "search", "calendar"]);

        let json = serde_json::to_string(&result).unwrap();
        assert!(json.find("llm").unwrap() < json.find("search").unwrap());
        assert!(json.find("search").unwrap() < json.find("calendar").unwrap());
    }

    #[test]
    fn reinsert_overwrites_in_place() {
        let mut result = ExecutionResult::new();
        result.insert("llm", AgentOutput::text("first"));
        result.insert("search", AgentOutput::text("x"));
        result.insert("llm", AgentOutput::text("second"));

        assert_eq!(result.len(), 2);
        assert_eq!(result["llm"], "second");
        assert_eq!(result.keys().next(), Some("llm"));
    }

    #[test]
    fn outputs_serialize_untagged() {
        let mut result = ExecutionResult::new();
        result.insert("llm", AgentOutput::text("Echo: hi"));
        result.insert("search", AgentOutput::failed("boom"));
        result.insert(
            "calendar",
            AgentOutput::Structured(serde_json::json!({"event_id": "abc123"})),
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["llm"], "Echo: hi");
        assert_eq!(value["search"]["error"], "boom");
        assert_eq!(value["calendar"]["event_id"], "abc123");
        assert_eq!(result.failures(), vec!["search"]);
    }

    #[test]
    fn failure_marker_parses_back() {
        let out: AgentOutput = serde_json::from_str(r#"{"error": "timed out"}"#).unwrap();
        assert!(out.is_failure());
        let out: AgentOutput = serde_json::from_str(r#"{"showtime": "8pm"}"#).unwrap();
        assert!(matches!(out, AgentOutput::Structured(_)));
    }

    #[test]
    fn empty_result() {
        let result = ExecutionResult::new();
        assert!(result.is_empty());
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
    }
}
