//! Contract for the external chunk retriever.
//!
//! The production retriever (vector index, hybrid search, whatever the
//! deployment uses) lives outside this crate; the engine only depends
//! on this trait, so tests substitute a stub via constructor injection.

use async_trait::async_trait;
use delphi_core::{CodeChunk, Result};

/// Maps a query (plus optional file filter) to ranked code chunks.
///
/// Contract:
/// - When `file_path` is given, results are restricted to that file.
/// - An empty `query` is valid and means "return chunks for this file
///   regardless of relevance"; the whole-file operations rely on this
///   degenerate mode.
/// - `top_k` bounds the maximum number of chunks returned, not a
///   minimum.
/// - The returned order is the retriever's ranking; the engine never
///   re-scores it.
#[async_trait]
pub trait Retriever: Send + Sync {
    /// Retrieve up to `top_k` chunks relevant to `query`.
    ///
    /// # Errors
    ///
    /// Implementations report failures as
    /// [`DelphiError::Retrieval`](delphi_core::DelphiError::Retrieval);
    /// the engine propagates them unchanged.
    async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        file_path: Option<&str>,
    ) -> Result<Vec<CodeChunk>>;
}
