//! Tool registry for dispatching model-issued function calls

use std::collections::HashMap;
use std::future::Future;

use futures::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::llm::core::types::ToolSchema;

/// Type alias for boxed async tool functions
type AsyncToolFn =
    Box<dyn Fn(serde_json::Value) -> BoxFuture<'static, Result<String, ToolError>> + Send + Sync>;

/// Errors raised while invoking a tool binding
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments did not deserialize into the tool's parameter struct
    #[error("failed to deserialize tool arguments: {0}")]
    InvalidArguments(#[source] serde_json::Error),

    /// The tool's return value could not be JSON-encoded
    #[error("failed to serialize tool result: {0}")]
    SerializeResult(#[source] serde_json::Error),

    /// The tool itself reported a failure
    #[error("{0}")]
    Execution(String),
}

/// Startup-time registration errors
///
/// Both variants abort the process before it starts serving.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Two tools registered under the same name
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),

    /// A tool registered with an empty or blank name
    #[error("tool registered without a name")]
    UnnamedTool,
}

/// A registered tool: its compiled schema plus the invocable function
///
/// Created once at startup, immutable thereafter, looked up by name during
/// dispatch.
pub struct ToolBinding {
    schema: ToolSchema,
    function: AsyncToolFn,
}

impl ToolBinding {
    /// The schema compiled at registration time
    pub fn schema(&self) -> &ToolSchema {
        &self.schema
    }

    /// Invoke the tool with already-parsed JSON arguments
    ///
    /// Sync and async tools are both awaited uniformly; the result is the
    /// JSON-encoded return value.
    pub async fn invoke(&self, arguments: serde_json::Value) -> Result<String, ToolError> {
        (self.function)(arguments).await
    }
}

/// Registry mapping tool names to bindings
///
/// Built once at startup and never mutated afterwards, so concurrent chat
/// requests can read it without synchronization.
///
/// # Example
///
/// ```ignore
/// #[derive(Deserialize)]
/// #[serde(deny_unknown_fields)]
/// struct WeatherArgs {
///     location: String,
/// }
///
/// let mut registry = ToolRegistry::new();
/// registry.register_async(
///     ToolSchema::builder("get_weather")
///         .description("Get the current weather for a location.")
///         .param("location", ParamType::String)
///         .build(),
///     |args: WeatherArgs| async move { get_weather(args).await },
/// )?;
/// ```
pub struct ToolRegistry {
    tools: HashMap<String, ToolBinding>,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register an async tool under its schema's name
    ///
    /// # Type Parameters
    ///
    /// * `F` - The function type
    /// * `Args` - The argument struct (must implement `DeserializeOwned`;
    ///   use `#[serde(deny_unknown_fields)]` to reject stray keys)
    /// * `R` - The result type (must implement `Serialize`)
    /// * `Fut` - The future type returned by the function
    pub fn register_async<F, Args, R, Fut>(
        &mut self,
        schema: ToolSchema,
        func: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(Args) -> Fut + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
        Fut: Future<Output = Result<R, String>> + Send + 'static,
    {
        let wrapper = move |args_json: serde_json::Value| {
            // Deserialize arguments into the typed parameter struct
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    return Box::pin(async move { Err(ToolError::InvalidArguments(e)) })
                        as BoxFuture<'static, _>;
                }
            };

            // Call the function
            let future = func(args);

            // Box the future and handle result serialization
            Box::pin(async move {
                match future.await {
                    Ok(result) => {
                        serde_json::to_string(&result).map_err(ToolError::SerializeResult)
                    }
                    Err(e) => Err(ToolError::Execution(e)),
                }
            }) as BoxFuture<'static, _>
        };

        self.insert(schema, Box::new(wrapper))
    }

    /// Register a synchronous tool under its schema's name
    pub fn register_sync<F, Args, R>(
        &mut self,
        schema: ToolSchema,
        func: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(Args) -> Result<R, String> + Send + Sync + 'static,
        Args: DeserializeOwned + Send + 'static,
        R: Serialize + Send + 'static,
    {
        let wrapper = move |args_json: serde_json::Value| {
            // Deserialize arguments into the typed parameter struct
            let args = match serde_json::from_value::<Args>(args_json) {
                Ok(args) => args,
                Err(e) => {
                    return Box::pin(async move { Err(ToolError::InvalidArguments(e)) })
                        as BoxFuture<'static, _>;
                }
            };

            // Call the function
            let result = func(args);

            // Box the result as a future
            Box::pin(async move {
                match result {
                    Ok(result) => {
                        serde_json::to_string(&result).map_err(ToolError::SerializeResult)
                    }
                    Err(e) => Err(ToolError::Execution(e)),
                }
            }) as BoxFuture<'static, _>
        };

        self.insert(schema, Box::new(wrapper))
    }

    fn insert(&mut self, schema: ToolSchema, function: AsyncToolFn) -> Result<(), RegistryError> {
        if schema.name.trim().is_empty() {
            return Err(RegistryError::UnnamedTool);
        }
        if self.tools.contains_key(&schema.name) {
            return Err(RegistryError::DuplicateTool(schema.name.clone()));
        }

        let name = schema.name.clone();
        self.tools.insert(name, ToolBinding { schema, function });
        Ok(())
    }

    /// Look up a tool by name
    pub fn lookup(&self, name: &str) -> Option<&ToolBinding> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Collect the compiled schemas of every registered tool
    pub fn schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|binding| binding.schema.clone())
            .collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tools::schema::ParamType;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct AddArgs {
        a: i32,
        b: i32,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct AddResult {
        sum: i32,
    }

    fn add_schema(name: &str) -> ToolSchema {
        ToolSchema::builder(name)
            .description("Adds two numbers.")
            .param("a", ParamType::Integer)
            .param("b", ParamType::Integer)
            .build()
    }

    #[tokio::test]
    async fn test_register_sync_tool() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        assert!(registry.contains("add"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_invoke_sync_tool() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        let args = serde_json::json!({"a": 5, "b": 3});
        let result = registry.lookup("add").unwrap().invoke(args).await.unwrap();

        let parsed: AddResult = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, AddResult { sum: 8 });
    }

    #[tokio::test]
    async fn test_invoke_async_tool() {
        let mut registry = ToolRegistry::new();

        registry
            .register_async(add_schema("add_async"), |args: AddArgs| async move {
                tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        let args = serde_json::json!({"a": 10, "b": 20});
        let result = registry
            .lookup("add_async")
            .unwrap()
            .invoke(args)
            .await
            .unwrap();

        let parsed: AddResult = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed, AddResult { sum: 30 });
    }

    #[tokio::test]
    async fn test_execution_error() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("divide"), |args: AddArgs| {
                if args.b == 0 {
                    Err("Division by zero".to_string())
                } else {
                    Ok(AddResult { sum: args.a / args.b })
                }
            })
            .unwrap();

        let args = serde_json::json!({"a": 10, "b": 0});
        let result = registry.lookup("divide").unwrap().invoke(args).await;

        match result {
            Err(ToolError::Execution(message)) => assert_eq!(message, "Division by zero"),
            other => panic!("Expected execution error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_field_rejected() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        let args = serde_json::json!({"a": 5});
        let result = registry.lookup("add").unwrap().invoke(args).await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[tokio::test]
    async fn test_unknown_field_rejected() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        let args = serde_json::json!({"a": 5, "b": 3, "c": 9});
        let result = registry.lookup("add").unwrap().invoke(args).await;

        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_duplicate_name_is_startup_error() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();

        let err = registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a * args.b })
            })
            .unwrap_err();

        assert_eq!(err, RegistryError::DuplicateTool("add".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_blank_name_is_startup_error() {
        let mut registry = ToolRegistry::new();

        let err = registry
            .register_sync(add_schema("   "), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap_err();

        assert_eq!(err, RegistryError::UnnamedTool);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_missing_tool() {
        let registry = ToolRegistry::new();
        assert!(registry.lookup("unknown").is_none());
    }

    #[test]
    fn test_schemas_collects_all_tools() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(add_schema("add"), |args: AddArgs| {
                Ok(AddResult { sum: args.a + args.b })
            })
            .unwrap();
        registry
            .register_sync(add_schema("multiply"), |args: AddArgs| {
                Ok(AddResult { sum: args.a * args.b })
            })
            .unwrap();

        let mut names: Vec<String> = registry
            .schemas()
            .into_iter()
            .map(|schema| schema.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["add", "multiply"]);
    }

    #[derive(Debug, Serialize)]
    struct ComplexResult {
        message: String,
        data: Vec<i32>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields)]
    struct EmptyArgs {}

    #[tokio::test]
    async fn test_result_is_json_encoded() {
        let mut registry = ToolRegistry::new();

        registry
            .register_sync(
                ToolSchema::builder("get_data").build(),
                |_args: EmptyArgs| {
                    Ok(ComplexResult {
                        message: "Success".to_string(),
                        data: vec![1, 2, 3],
                    })
                },
            )
            .unwrap();

        let args = serde_json::json!({});
        let result = registry
            .lookup("get_data")
            .unwrap()
            .invoke(args)
            .await
            .unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(parsed["message"], "Success");
        assert_eq!(parsed["data"][0], 1);
    }
}
