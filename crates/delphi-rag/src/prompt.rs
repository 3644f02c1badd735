use crate::llm::SamplingParams;

/// Sampling temperature shared by all three operations. Kept low to
/// favor determinism and accuracy over creativity.
pub const TEMPERATURE: f32 = 0.2;

const QUERY_SYSTEM_PROMPT: &str = "You are an expert code assistant.";
const DOC_SYSTEM_PROMPT: &str = "You are an expert code documentation generator.";
const REFACTOR_SYSTEM_PROMPT: &str = "You are an expert code reviewer.";

/// The three engine operations, each carrying its instruction template
/// and output-token budget.
///
/// One descriptor consumed by a single generic pipeline replaces three
/// near-identical methods; per-operation behavior differences live
/// here.
///
/// # Examples
///
/// ```
/// use delphi_rag::prompt::Operation;
///
/// assert_eq!(Operation::QueryAnswer.max_output_tokens(), 1000);
/// assert_eq!(Operation::Documentation.max_output_tokens(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Answer a natural-language question about the codebase.
    QueryAnswer,
    /// Generate documentation for a whole file.
    Documentation,
    /// Suggest refactoring improvements for a whole file.
    Refactoring,
}

impl Operation {
    /// System-role instruction for this operation.
    pub fn system_prompt(self) -> &'static str {
        match self {
            Operation::QueryAnswer => QUERY_SYSTEM_PROMPT,
            Operation::Documentation => DOC_SYSTEM_PROMPT,
            Operation::Refactoring => REFACTOR_SYSTEM_PROMPT,
        }
    }

    /// Output-token budget for this operation. The whole-file
    /// operations expect longer output than query answering.
    pub fn max_output_tokens(self) -> u32 {
        match self {
            Operation::QueryAnswer => 1000,
            Operation::Documentation | Operation::Refactoring => 2000,
        }
    }

    /// Build the sampling parameters for this operation against the
    /// given model.
    ///
    /// # Examples
    ///
    /// ```
    /// use delphi_rag::prompt::Operation;
    ///
    /// let params = Operation::Refactoring.sampling("gpt-4-turbo");
    /// assert_eq!(params.temperature, 0.2);
    /// assert_eq!(params.max_tokens, 2000);
    /// ```
    pub fn sampling(self, model: &str) -> SamplingParams {
        SamplingParams {
            model: model.to_string(),
            temperature: TEMPERATURE,
            max_tokens: self.max_output_tokens(),
        }
    }
}

/// Build the user prompt for query answering.
///
/// Embeds the assembled context block and the literal question, with
/// an instruction to answer accurately and concisely using only the
/// given context.
///
/// # Examples
///
/// ```
/// use delphi_rag::prompt::build_query_prompt;
///
/// let prompt = build_query_prompt("[1] a.py (lines 1-10):\n```\ncode1\n```\n\n", "how does X work");
/// assert!(prompt.contains("how does X work"));
/// assert!(prompt.contains("Code Context:"));
/// ```
pub fn build_query_prompt(context: &str, query: &str) -> String {
    format!(
        "You are an expert software engineer assistant. You are given code context retrieved \
from a codebase and a developer query.\n\
Use the code context to answer the question accurately and concisely.\n\
\n\
Code Context:\n\
{context}\n\
\n\
Question:\n\
{query}\n\
\n\
Answer:"
    )
}

/// Build the user prompt for documentation generation.
///
/// Embeds the concatenated file body verbatim; the builder never
/// truncates or summarizes the code it is given.
///
/// # Examples
///
/// ```
/// use delphi_rag::prompt::build_documentation_prompt;
///
/// let prompt = build_documentation_prompt("def f():\n    pass\n");
/// assert!(prompt.contains("def f():"));
/// assert!(prompt.contains("Usage examples"));
/// ```
pub fn build_documentation_prompt(code: &str) -> String {
    format!(
        "Generate comprehensive documentation for the following code file:\n\
\n\
{code}\n\
\n\
Provide:\n\
1. A high-level overview\n\
2. Core functionality description\n\
3. Important functions/classes with their purposes\n\
4. Dependencies and relationships\n\
5. Usage examples\n\
\n\
Format your response in markdown."
    )
}

/// Build the user prompt for refactoring suggestions.
///
/// # Examples
///
/// ```
/// use delphi_rag::prompt::build_refactoring_prompt;
///
/// let prompt = build_refactoring_prompt("fn main() {}\n");
/// assert!(prompt.contains("fn main() {}"));
/// assert!(prompt.contains("Error handling"));
/// ```
pub fn build_refactoring_prompt(code: &str) -> String {
    format!(
        "Analyze the following code and suggest refactoring improvements:\n\
\n\
{code}\n\
\n\
Focus on:\n\
1. Code quality and readability\n\
2. Performance optimizations\n\
3. Design patterns\n\
4. Error handling\n\
5. Maintainability\n\
\n\
Provide specific code examples for your suggestions."
    )
}
