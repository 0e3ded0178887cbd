//! Tool binding infrastructure
//!
//! This module provides the schema builder used to advertise tools to the
//! model and the registry the orchestrator dispatches function calls
//! through.

pub mod registry;
pub mod schema;

// Re-export commonly used types
pub use registry::{RegistryError, ToolBinding, ToolError, ToolRegistry};
pub use schema::{ParamType, ToolSchemaBuilder};
