use delphi_core::{AnswerResult, Citation, DelphiConfig, DocResult, RefactorResult, Result};

use crate::context::{assemble_context, concat_file_chunks};
use crate::llm::CompletionClient;
use crate::prompt::{
    build_documentation_prompt, build_query_prompt, build_refactoring_prompt, Operation,
};
use crate::retriever::Retriever;

/// RAG orchestrator wiring retrieval → assembly → prompt → completion
/// → cited result.
///
/// Both collaborators are injected at construction, so tests swap in
/// deterministic stubs. The engine holds no mutable state and caches
/// nothing; every operation is an independent call chain, safe to run
/// concurrently with the others.
///
/// Failures are never caught here: retrieval and completion errors
/// propagate unchanged to the caller, and a completion that returns no
/// content surfaces as an absent result field rather than an error.
pub struct RagEngine<R, C> {
    retriever: R,
    llm: C,
    config: DelphiConfig,
}

impl<R: Retriever, C: CompletionClient> RagEngine<R, C> {
    /// Create a new engine from its collaborators and configuration.
    pub fn new(retriever: R, llm: C, config: DelphiConfig) -> Self {
        Self {
            retriever,
            llm,
            config,
        }
    }

    /// Answer a natural-language question about the codebase.
    ///
    /// Retrieves up to `top_k` chunks (defaulting to the configured
    /// `retrieval.top_k`, optionally restricted to `file_path`),
    /// assembles them into an indexed context block, and asks the
    /// completion service. The returned `references` list holds one
    /// citation per retrieved chunk in context order — whether or not
    /// the answer text actually mentions each `[n]` marker; no in-text
    /// marker parsing is performed.
    ///
    /// # Errors
    ///
    /// Propagates [`DelphiError::Retrieval`](delphi_core::DelphiError::Retrieval)
    /// and [`DelphiError::Completion`](delphi_core::DelphiError::Completion)
    /// from the collaborators unchanged.
    pub async fn answer_query(
        &self,
        query: &str,
        file_path: Option<&str>,
        top_k: Option<usize>,
    ) -> Result<AnswerResult> {
        let top_k = top_k.unwrap_or(self.config.retrieval.top_k);
        let chunks = self.retriever.retrieve(query, top_k, file_path).await?;

        let context = assemble_context(&chunks);
        let user = build_query_prompt(&context, query);

        let operation = Operation::QueryAnswer;
        let params = operation.sampling(&self.config.llm.model);
        let answer = self
            .llm
            .complete(operation.system_prompt(), &user, &params)
            .await?;

        let references = chunks.iter().map(Citation::from_chunk).collect();

        Ok(AnswerResult { answer, references })
    }

    /// Generate documentation for a single file.
    ///
    /// Fetches all known chunks for the file (empty query, bounded by
    /// the configured `retrieval.file_chunk_limit`), concatenates them
    /// in line order, and asks the completion service for structured
    /// documentation.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures unchanged.
    pub async fn generate_documentation(&self, file_path: &str) -> Result<DocResult> {
        let documentation = self
            .run_file_operation(Operation::Documentation, file_path, build_documentation_prompt)
            .await?;
        Ok(DocResult {
            file_path: file_path.to_string(),
            documentation,
        })
    }

    /// Suggest refactoring improvements for a single file.
    ///
    /// Same retrieval and concatenation path as
    /// [`generate_documentation`](Self::generate_documentation), with
    /// the refactoring prompt template.
    ///
    /// # Errors
    ///
    /// Propagates collaborator failures unchanged.
    pub async fn suggest_refactoring(&self, file_path: &str) -> Result<RefactorResult> {
        let refactoring_suggestions = self
            .run_file_operation(Operation::Refactoring, file_path, build_refactoring_prompt)
            .await?;
        Ok(RefactorResult {
            file_path: file_path.to_string(),
            refactoring_suggestions,
        })
    }

    /// Shared whole-file pipeline: fetch every chunk of one file, sort
    /// by line, concatenate, complete.
    async fn run_file_operation(
        &self,
        operation: Operation,
        file_path: &str,
        build_prompt: fn(&str) -> String,
    ) -> Result<Option<String>> {
        let chunks = self
            .retriever
            .retrieve("", self.config.retrieval.file_chunk_limit, Some(file_path))
            .await?;

        let full_code = concat_file_chunks(&chunks);
        let user = build_prompt(&full_code);

        let params = operation.sampling(&self.config.llm.model);
        self.llm
            .complete(operation.system_prompt(), &user, &params)
            .await
    }
}
