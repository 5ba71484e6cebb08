//! Strips the Markdown code fences models like to wrap JSON in.

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Removes one leading "```json" (or, failing that, one bare "```") and one
/// trailing "```". Everything between the fences, whitespace included, is
/// left untouched.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text
        .strip_prefix(JSON_FENCE)
        .or_else(|| text.strip_prefix(FENCE))
        .unwrap_or(text);
    text.strip_suffix(FENCE).unwrap_or(text)
}
