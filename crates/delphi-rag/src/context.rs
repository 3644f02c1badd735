//! Turns retrieved chunks into prompt-ready text.
//!
//! Two modes: indexed context blocks for query answering (each chunk
//! gets a `[n]` header that doubles as its citation number), and
//! whole-file concatenation for the documentation/refactoring paths.

use std::fmt::Write;

use delphi_core::CodeChunk;

/// Format an ordered chunk sequence as a single context block.
///
/// One section per chunk: a 1-based `[n]` index with the file path and
/// line range, the code fenced as a literal block, then a blank
/// separator line. The index assigned here is the same index used to
/// label the chunk's citation in the returned reference list, so an
/// answer that mentions `[2]` points at `references[1]`.
///
/// Chunks are never dropped, reordered, merged, or deduplicated here;
/// ordering is the caller's responsibility. An empty sequence yields
/// an empty string, not an error.
///
/// # Examples
///
/// ```
/// use delphi_core::CodeChunk;
/// use delphi_rag::context::assemble_context;
///
/// let chunks = vec![CodeChunk {
///     file_path: "a.py".into(),
///     line_start: 1,
///     line_end: 10,
///     code: "code1".into(),
///     score: None,
/// }];
/// let context = assemble_context(&chunks);
/// assert!(context.starts_with("[1] a.py (lines 1-10):\n"));
/// ```
pub fn assemble_context(chunks: &[CodeChunk]) -> String {
    let mut formatted = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = writeln!(
            formatted,
            "[{}] {} (lines {}-{}):",
            i + 1,
            chunk.file_path,
            chunk.line_start,
            chunk.line_end,
        );
        let _ = writeln!(formatted, "```\n{}\n```", chunk.code);
        formatted.push('\n');
    }
    formatted
}

/// Concatenate chunks into a single file body for the whole-file
/// operations.
///
/// Chunks are sorted by `line_start` ascending (independent of
/// retrieval order) and their `code` fields joined with newline
/// separators, with no index or file framing. Overlapping or gapped
/// line ranges are reproduced as-is: no gap-filling and no duplicate
/// elimination is attempted.
///
/// # Examples
///
/// ```
/// use delphi_core::CodeChunk;
/// use delphi_rag::context::concat_file_chunks;
///
/// let chunk = |start, code: &str| CodeChunk {
///     file_path: "b.py".into(),
///     line_start: start,
///     line_end: start + 5,
///     code: code.into(),
///     score: None,
/// };
/// let code = concat_file_chunks(&[chunk(20, "B"), chunk(1, "A")]);
/// assert_eq!(code, "A\nB\n");
/// ```
pub fn concat_file_chunks(chunks: &[CodeChunk]) -> String {
    let mut ordered: Vec<&CodeChunk> = chunks.iter().collect();
    ordered.sort_by_key(|c| c.line_start);

    let mut full_code = String::new();
    for chunk in ordered {
        full_code.push_str(&chunk.code);
        full_code.push('\n');
    }
    full_code
}
