//! Core types, configuration, and error handling for Delphi.
//!
//! This crate provides the shared foundation used by the orchestration
//! crate:
//! - [`DelphiError`] — unified error type using `thiserror`
//! - [`DelphiConfig`] — configuration loaded from `.delphi.toml`
//! - Shared types: [`CodeChunk`], [`Citation`], [`AnswerResult`],
//!   [`DocResult`], [`RefactorResult`]

mod config;
mod error;
mod types;

pub use config::{DelphiConfig, LlmConfig, RetrievalConfig};
pub use error::DelphiError;
pub use types::{AnswerResult, Citation, CodeChunk, DocResult, RefactorResult, SNIPPET_MAX_CHARS};

/// A convenience `Result` type for Delphi operations.
pub type Result<T> = std::result::Result<T, DelphiError>;
