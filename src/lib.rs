// HTTP server modules
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;

// Grid spreadsheet client
pub mod grid;

// LLM abstraction layer
pub mod llm;
