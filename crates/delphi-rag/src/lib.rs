//! Retrieval-augmented answering over a codebase.
//!
//! Provides the orchestration pipeline: retriever contract, completion
//! client, context assembly with citable indices, prompt construction,
//! and the engine wiring retrieval → assembly → prompt → completion →
//! cited result for query answering, documentation generation, and
//! refactoring suggestions.

pub mod context;
pub mod engine;
pub mod llm;
pub mod prompt;
pub mod retriever;
