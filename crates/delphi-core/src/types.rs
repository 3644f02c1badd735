use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of characters of chunk code kept in a citation
/// snippet before the ellipsis marker is appended.
pub const SNIPPET_MAX_CHARS: usize = 100;

const SNIPPET_ELLIPSIS: &str = "...";

/// A contiguous fragment of source code returned by the retriever.
///
/// Line bounds are 1-based and inclusive; by convention
/// `line_start <= line_end` and `code` holds exactly those lines of
/// the named file as they were at ingestion time. Chunks are created
/// per retrieval call, held for the duration of one operation, and
/// never persisted.
///
/// # Examples
///
/// ```
/// use delphi_core::CodeChunk;
///
/// let chunk = CodeChunk {
///     file_path: "src/auth.py".into(),
///     line_start: 10,
///     line_end: 25,
///     code: "def validate_token(token):\n    ...".into(),
///     score: Some(0.92),
/// };
/// assert!(chunk.line_start <= chunk.line_end);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeChunk {
    /// Path of the source file, relative to the repository root.
    pub file_path: String,
    /// First line of the fragment (1-based, inclusive).
    pub line_start: u32,
    /// Last line of the fragment (1-based, inclusive).
    pub line_end: u32,
    /// Literal text content of the fragment.
    pub code: String,
    /// Retrieval relevance, if the retriever scored this chunk.
    /// `None` means the retriever's ordering is already final.
    pub score: Option<f64>,
}

/// A user-facing reference to a [`CodeChunk`] included in a result.
///
/// # Examples
///
/// ```
/// use delphi_core::{Citation, CodeChunk};
///
/// let chunk = CodeChunk {
///     file_path: "a.py".into(),
///     line_start: 1,
///     line_end: 10,
///     code: "code1".into(),
///     score: None,
/// };
/// let citation = Citation::from_chunk(&chunk);
/// assert_eq!(citation.code_snippet, "code1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Path of the source file, copied from the chunk.
    pub file_path: String,
    /// First line of the cited fragment.
    pub line_start: u32,
    /// Last line of the cited fragment.
    pub line_end: u32,
    /// Preview of the chunk's code, truncated to
    /// [`SNIPPET_MAX_CHARS`] characters with a trailing `"..."` when
    /// truncation occurred.
    pub code_snippet: String,
}

impl Citation {
    /// Derive a citation from a retrieved chunk.
    ///
    /// The snippet keeps the code unmodified when it fits within
    /// [`SNIPPET_MAX_CHARS`] characters; otherwise the first
    /// [`SNIPPET_MAX_CHARS`] characters are kept and an ellipsis
    /// marker is appended. Truncation counts characters, not bytes,
    /// so multi-byte source text never splits mid-sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use delphi_core::{Citation, CodeChunk};
    ///
    /// let chunk = CodeChunk {
    ///     file_path: "big.rs".into(),
    ///     line_start: 1,
    ///     line_end: 50,
    ///     code: "x".repeat(150),
    ///     score: None,
    /// };
    /// let citation = Citation::from_chunk(&chunk);
    /// assert_eq!(citation.code_snippet.len(), 103);
    /// assert!(citation.code_snippet.ends_with("..."));
    /// ```
    pub fn from_chunk(chunk: &CodeChunk) -> Self {
        let code_snippet = if chunk.code.chars().count() > SNIPPET_MAX_CHARS {
            let truncated: String = chunk.code.chars().take(SNIPPET_MAX_CHARS).collect();
            format!("{truncated}{SNIPPET_ELLIPSIS}")
        } else {
            chunk.code.clone()
        };

        Self {
            file_path: chunk.file_path.clone(),
            line_start: chunk.line_start,
            line_end: chunk.line_end,
            code_snippet,
        }
    }
}

/// Result of answering a query about the codebase.
///
/// # Examples
///
/// ```
/// use delphi_core::AnswerResult;
///
/// let result = AnswerResult {
///     answer: Some("X works via code1.".into()),
///     references: vec![],
/// };
/// assert!(result.answer.is_some());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Synthesized answer text. `None` when the completion service
    /// returned no content, which is a valid outcome rather than an
    /// error.
    pub answer: Option<String>,
    /// One citation per chunk placed in the prompt context, in the
    /// same order, so citation index `n` matches the `[n]` marker in
    /// the assembled context.
    pub references: Vec<Citation>,
}

impl fmt::Display for AnswerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.answer {
            Some(answer) => writeln!(f, "{answer}")?,
            None => writeln!(f, "(no answer)")?,
        }
        if !self.references.is_empty() {
            writeln!(f, "\nReferences:")?;
            for (i, citation) in self.references.iter().enumerate() {
                writeln!(
                    f,
                    "[{}] {} (lines {}-{})",
                    i + 1,
                    citation.file_path,
                    citation.line_start,
                    citation.line_end,
                )?;
            }
        }
        Ok(())
    }
}

impl AnswerResult {
    /// Render the answer and its reference list as markdown.
    ///
    /// Reference numbering matches the `[n]` indices used in the
    /// prompt context, so in-answer markers line up with this list.
    ///
    /// # Examples
    ///
    /// ```
    /// use delphi_core::{AnswerResult, Citation};
    ///
    /// let result = AnswerResult {
    ///     answer: Some("X works via code1.".into()),
    ///     references: vec![Citation {
    ///         file_path: "a.py".into(),
    ///         line_start: 1,
    ///         line_end: 10,
    ///         code_snippet: "code1".into(),
    ///     }],
    /// };
    /// let md = result.to_markdown();
    /// assert!(md.contains("`a.py:1-10`"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        match &self.answer {
            Some(answer) => {
                out.push_str(answer);
                out.push('\n');
            }
            None => out.push_str("_No answer was produced._\n"),
        }
        if !self.references.is_empty() {
            out.push_str("\n## References\n\n");
            for (i, citation) in self.references.iter().enumerate() {
                out.push_str(&format!(
                    "{}. `{}:{}-{}`\n",
                    i + 1,
                    citation.file_path,
                    citation.line_start,
                    citation.line_end,
                ));
            }
        }
        out
    }
}

/// Result of generating documentation for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocResult {
    /// The file that was documented.
    pub file_path: String,
    /// Generated documentation, or `None` if the completion service
    /// returned no content.
    pub documentation: Option<String>,
}

/// Result of suggesting refactoring improvements for a single file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefactorResult {
    /// The file that was analyzed.
    pub file_path: String,
    /// Suggested improvements, or `None` if the completion service
    /// returned no content.
    pub refactoring_suggestions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk_with_code(code: &str) -> CodeChunk {
        CodeChunk {
            file_path: "src/lib.rs".into(),
            line_start: 1,
            line_end: 5,
            code: code.into(),
            score: None,
        }
    }

    #[test]
    fn short_code_kept_verbatim() {
        let citation = Citation::from_chunk(&chunk_with_code("fn main() {}"));
        assert_eq!(citation.code_snippet, "fn main() {}");
    }

    #[test]
    fn exactly_100_chars_not_truncated() {
        let code = "y".repeat(100);
        let citation = Citation::from_chunk(&chunk_with_code(&code));
        assert_eq!(citation.code_snippet, code);
        assert!(!citation.code_snippet.ends_with("..."));
    }

    #[test]
    fn long_code_truncated_with_ellipsis() {
        let code = "z".repeat(101);
        let citation = Citation::from_chunk(&chunk_with_code(&code));
        assert_eq!(citation.code_snippet.chars().count(), 103);
        assert!(citation.code_snippet.ends_with("..."));
        assert!(citation.code_snippet.starts_with(&"z".repeat(100)));
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        // 120 two-byte characters; byte-indexed slicing would panic
        // or split a sequence.
        let code = "é".repeat(120);
        let citation = Citation::from_chunk(&chunk_with_code(&code));
        assert_eq!(citation.code_snippet.chars().count(), 103);
        assert!(citation.code_snippet.starts_with(&"é".repeat(100)));
    }

    #[test]
    fn citation_copies_location_fields() {
        let chunk = CodeChunk {
            file_path: "a.py".into(),
            line_start: 20,
            line_end: 25,
            code: "code2".into(),
            score: Some(0.5),
        };
        let citation = Citation::from_chunk(&chunk);
        assert_eq!(citation.file_path, "a.py");
        assert_eq!(citation.line_start, 20);
        assert_eq!(citation.line_end, 25);
    }

    #[test]
    fn answer_result_serializes_spec_field_names() {
        let result = AnswerResult {
            answer: None,
            references: vec![Citation {
                file_path: "a.py".into(),
                line_start: 1,
                line_end: 10,
                code_snippet: "code1".into(),
            }],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("answer").is_some());
        assert!(json.get("references").is_some());
        assert!(json["references"][0].get("file_path").is_some());
        assert!(json["references"][0].get("code_snippet").is_some());
    }

    #[test]
    fn display_and_markdown_output() {
        let result = AnswerResult {
            answer: Some("X works via code1.".into()),
            references: vec![Citation {
                file_path: "a.py".into(),
                line_start: 1,
                line_end: 10,
                code_snippet: "code1".into(),
            }],
        };
        let text = format!("{result}");
        assert!(text.contains("X works via code1."));
        assert!(text.contains("[1] a.py (lines 1-10)"));

        let md = result.to_markdown();
        assert!(md.contains("## References"));
        assert!(md.contains("1. `a.py:1-10`"));
    }

    #[test]
    fn absent_answer_renders_placeholder() {
        let result = AnswerResult {
            answer: None,
            references: vec![],
        };
        assert!(format!("{result}").contains("(no answer)"));
        assert!(result.to_markdown().contains("_No answer was produced._"));
    }

    #[test]
    fn doc_and_refactor_results_serialize() {
        let doc = DocResult {
            file_path: "b.py".into(),
            documentation: Some("# Overview".into()),
        };
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["file_path"], "b.py");

        let refactor = RefactorResult {
            file_path: "b.py".into(),
            refactoring_suggestions: None,
        };
        let json = serde_json::to_value(&refactor).unwrap();
        assert!(json["refactoring_suggestions"].is_null());
    }
}
