use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::types::{AgentMode, CapabilityGroup, ToolSchema};

/// Trait that all tools must implement.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (used in function calling).
    fn name(&self) -> &str;

    /// Human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// JSON Schema describing the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> Result<String>;
}

/// Ordered collection of tools, grouped by capability.
///
/// Assembled once at startup and shared read-only from then on.
/// Resolution by mode preserves registration order within each group.
pub struct ToolCatalogue {
    tools: Vec<(CapabilityGroup, Arc<dyn Tool>)>,
    index: HashMap<String, usize>,
}

impl ToolCatalogue {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool under a capability group. Tool names are unique
    /// across the whole catalogue; the first registration wins.
    pub fn register(&mut self, group: CapabilityGroup, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        if self.index.contains_key(&name) {
            tracing::warn!("Duplicate tool name ignored: {}", name);
            return;
        }
        tracing::debug!("Registered tool: {} ({:?})", name, group);
        self.index.insert(name, self.tools.len());
        self.tools.push((group, tool));
    }

    /// Get a tool by name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i].1)
    }

    /// Tools advertised in the given mode, in group then registration order.
    pub fn resolve(&self, mode: AgentMode) -> Vec<Arc<dyn Tool>> {
        self.resolve_groups(mode.groups())
    }

    /// Tools belonging to the given groups, duplicate-free, in group then
    /// registration order.
    pub fn resolve_groups(&self, groups: &[CapabilityGroup]) -> Vec<Arc<dyn Tool>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();
        for group in groups {
            for (g, tool) in &self.tools {
                if g == group && seen.insert(tool.name().to_string()) {
                    resolved.push(Arc::clone(tool));
                }
            }
        }
        resolved
    }

    /// Schemas for the tools in the given groups, suitable for sending to
    /// the model.
    pub fn schemas(&self, groups: &[CapabilityGroup]) -> Vec<ToolSchema> {
        self.resolve_groups(groups)
            .iter()
            .map(|t| ToolSchema {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect()
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|(_, t)| t.name()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolCatalogue {
    fn default() -> Self {
        Self::new()
    }
}

/// Check a decoded argument object against a tool's parameter schema.
///
/// Failures are reported back to the caller alongside the surfaced call;
/// they never abort the turn.
pub fn validate_arguments(schema: &Value, args: &Value) -> std::result::Result<(), String> {
    let Some(args_map) = args.as_object() else {
        return Err("arguments must be a JSON object".to_string());
    };

    let empty = serde_json::Map::new();
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|r| r.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    for name in &required {
        if !args_map.contains_key(*name) {
            return Err(format!("missing required argument '{name}'"));
        }
    }

    for (key, value) in args_map {
        let Some(decl) = properties.get(key) else {
            return Err(format!("unexpected argument '{key}'"));
        };
        if value.is_null() && !required.contains(&key.as_str()) {
            continue;
        }
        if let Some(ty) = decl.get("type").and_then(Value::as_str) {
            if !type_matches(ty, value) {
                return Err(format!("argument '{key}' should be of type {ty}"));
            }
        }
    }

    Ok(())
}

fn type_matches(declared: &str, value: &Value) -> bool {
    match declared {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StubTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "stub"
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {}})
        }

        async fn execute(&self, _args: Value) -> Result<String> {
            Ok("ok".to_string())
        }
    }

    fn sample_catalogue() -> ToolCatalogue {
        let mut catalogue = ToolCatalogue::new();
        catalogue.register(CapabilityGroup::Intake, Arc::new(StubTool { name: "analyze" }));
        catalogue.register(CapabilityGroup::Intake, Arc::new(StubTool { name: "extract" }));
        catalogue.register(CapabilityGroup::Research, Arc::new(StubTool { name: "search" }));
        catalogue.register(CapabilityGroup::Planning, Arc::new(StubTool { name: "plan" }));
        catalogue.register(CapabilityGroup::Risk, Arc::new(StubTool { name: "assess" }));
        catalogue
    }

    fn names(tools: &[Arc<dyn Tool>]) -> Vec<&str> {
        tools.iter().map(|t| t.name()).collect()
    }

    #[test]
    fn test_resolve_full_mode_preserves_registration_order() {
        let catalogue = sample_catalogue();
        let resolved = catalogue.resolve(AgentMode::Full);
        assert_eq!(names(&resolved), ["analyze", "extract", "search", "plan", "assess"]);
    }

    #[test]
    fn test_resolve_mode_unions() {
        let catalogue = sample_catalogue();
        assert_eq!(names(&catalogue.resolve(AgentMode::Intake)), ["analyze", "extract"]);
        assert_eq!(
            names(&catalogue.resolve(AgentMode::Research)),
            ["search", "analyze", "extract"]
        );
        assert_eq!(names(&catalogue.resolve(AgentMode::Risk)), ["assess", "search"]);
    }

    #[test]
    fn test_resolve_groups_dedupes_repeated_groups() {
        let catalogue = sample_catalogue();
        let resolved = catalogue.resolve_groups(&[
            CapabilityGroup::Research,
            CapabilityGroup::Research,
            CapabilityGroup::Intake,
        ]);
        assert_eq!(names(&resolved), ["search", "analyze", "extract"]);
    }

    #[test]
    fn test_register_skips_duplicate_names() {
        let mut catalogue = ToolCatalogue::new();
        catalogue.register(CapabilityGroup::Intake, Arc::new(StubTool { name: "analyze" }));
        catalogue.register(CapabilityGroup::Research, Arc::new(StubTool { name: "analyze" }));
        assert_eq!(catalogue.len(), 1);
        assert_eq!(names(&catalogue.resolve(AgentMode::Full)), ["analyze"]);
    }

    #[test]
    fn test_lookup() {
        let catalogue = sample_catalogue();
        assert!(catalogue.lookup("search").is_some());
        assert!(catalogue.lookup("nope").is_none());
    }

    #[test]
    fn test_validate_arguments_accepts_valid() {
        let schema = json!({
            "type": "object",
            "properties": {
                "url": {"type": "string"},
                "max_len": {"type": "integer"}
            },
            "required": ["url"]
        });
        assert!(validate_arguments(&schema, &json!({"url": "https://x.dev"})).is_ok());
        assert!(validate_arguments(&schema, &json!({"url": "https://x.dev", "max_len": 5})).is_ok());
    }

    #[test]
    fn test_validate_arguments_missing_required() {
        let schema = json!({
            "type": "object",
            "properties": {"url": {"type": "string"}},
            "required": ["url"]
        });
        let err = validate_arguments(&schema, &json!({})).unwrap_err();
        assert!(err.contains("missing required argument 'url'"), "got: {err}");
    }

    #[test]
    fn test_validate_arguments_rejects_unexpected_field() {
        let schema = json!({
            "type": "object",
            "properties": {"url": {"type": "string"}},
            "required": ["url"]
        });
        let err =
            validate_arguments(&schema, &json!({"url": "https://x.dev", "extra": 1})).unwrap_err();
        assert!(err.contains("unexpected argument 'extra'"), "got: {err}");
    }

    #[test]
    fn test_validate_arguments_type_mismatch() {
        let schema = json!({
            "type": "object",
            "properties": {"url": {"type": "string"}},
            "required": ["url"]
        });
        let err = validate_arguments(&schema, &json!({"url": 42})).unwrap_err();
        assert!(err.contains("should be of type string"), "got: {err}");
    }

    #[test]
    fn test_validate_arguments_rejects_non_object() {
        let schema = json!({"type": "object", "properties": {}});
        assert!(validate_arguments(&schema, &json!("plain string")).is_err());
    }

    #[test]
    fn test_validate_arguments_null_optional_accepted() {
        let schema = json!({
            "type": "object",
            "properties": {
                "url": {"type": "string"},
                "note": {"type": "string"}
            },
            "required": ["url"]
        });
        let args = json!({"url": "https://x.dev", "note": null});
        assert!(validate_arguments(&schema, &args).is_ok());
    }
}
