use std::collections::HashMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Registered name of the document export tool.
pub const EXPORT_DOC_TOOL: &str = "export_trip_plan_to_doc";
/// Registered name of the spreadsheet export tool.
pub const EXPORT_SHEET_TOOL: &str = "export_trip_plan_to_sheet";
/// Registered name of the file deletion tool.
pub const DELETE_FILE_TOOL: &str = "delete_file";

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn execute(&self, input: Value) -> Result<Value>;
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn register<T>(&mut self, tool: T)
    where
        T: Tool + 'static,
    {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub async fn execute(&self, name: &str, input: Value) -> Result<Value> {
        let Some(tool) = self.get(name) else {
            bail!("no tool registered under `{name}`");
        };
        tool.execute(input).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{Tool, ToolRegistry};
    use anyhow::Result;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn description(&self) -> &'static str {
            "returns its input"
        }

        async fn execute(&self, input: Value) -> Result<Value> {
            Ok(input)
        }
    }

    #[tokio::test]
    async fn registered_tools_execute_by_name() {
        let mut registry = ToolRegistry::default();
        registry.register(Echo);

        let output = registry.execute("echo", json!({"k": 1})).await.expect("echo succeeds");
        assert_eq!(output, json!({"k": 1}));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::default();
        let error = registry.execute("missing", json!({})).await.expect_err("unknown tool");
        assert!(error.to_string().contains("missing"));
    }
}
