//! Prompt template for the design-system assistant.

/// Session-level instructions, sent as the system message on every call.
pub const SYSTEM_PROMPT: &str = "\
You are an expert on this organization's design-system component library.
Answer questions using only the component source excerpts provided with
each question.

Structure your answers as:
1. Component overview
2. Props (names, types, required or optional)
3. Usage example
4. Caveats

If the excerpts do not cover the question, say so rather than guessing.";

const TEMPLATE: &str = "\
Component sources:
{context}

Question: {question}";

/// Render the per-turn user message with retrieved context and the question.
#[must_use]
pub fn render(context: &str, question: &str) -> String {
    TEMPLATE
        .replace("{context}", context)
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_substituted() {
        let rendered = render("export const Button = ...", "What is Button?");
        assert!(rendered.contains("export const Button = ..."));
        assert!(rendered.contains("Question: What is Button?"));
        assert!(!rendered.contains("{context}"));
        assert!(!rendered.contains("{question}"));
    }

    #[test]
    fn empty_context_keeps_structure() {
        let rendered = render("", "Anything?");
        assert!(rendered.contains("Component sources:"));
        assert!(rendered.contains("Question: Anything?"));
    }

    #[test]
    fn system_prompt_carries_answer_structure() {
        assert!(SYSTEM_PROMPT.contains("1. Component overview"));
        assert!(SYSTEM_PROMPT.contains("4. Caveats"));
    }
}
