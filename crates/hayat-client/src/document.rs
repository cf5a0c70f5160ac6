//! Single-file HTML app generation helpers.

use regex::Regex;
use std::sync::OnceLock;

/// Download name used when the prompt yields no usable words.
pub const DEFAULT_FILENAME: &str = "ai-generated-app.html";

const MAX_FILENAME_WORDS: usize = 5;

/// Wrap the user's description in the fixed app-builder instructions.
pub fn build_prompt(description: &str) -> String {
    format!(
        "Generate a complete, single-file HTML web application based on the following description: \"{}\".\n\n\
The HTML file must be self-contained. All CSS must be inside a <style> tag in the <head>, and all JavaScript must be inside a <script> tag at the end of the <body>.\n\
The application should be functional, responsive, and visually appealing using modern design principles.\n\
Do not include any explanations, comments, or markdown fences like ```html. Just return the raw HTML code starting with <!DOCTYPE html>.",
        description
    )
}

/// Unwrap one ```` ```html ```` (or bare ```` ``` ````) fenced block.
///
/// The closing fence is removed only when present. Unfenced text comes back trimmed.
pub fn strip_code_fence(raw: &str) -> String {
    let text = raw.trim();
    let inner = match text.strip_prefix("```html").or_else(|| text.strip_prefix("```")) {
        Some(rest) => rest.strip_suffix("```").unwrap_or(rest),
        None => return text.to_string(),
    };
    inner.trim().to_string()
}

static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used, reason = "constant pattern, covered by the filename tests")]
fn non_word_regex() -> &'static Regex {
    NON_WORD_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("Non-word regex is valid"))
}

/// Filename derived from the first five words of the prompt.
///
/// Lowercased, non-word characters dropped, words joined with `-`.
pub fn download_filename(prompt: &str) -> String {
    let lowered = prompt.to_lowercase();
    let cleaned = non_word_regex().replace_all(&lowered, "");
    let slug = cleaned
        .split_whitespace()
        .take(MAX_FILENAME_WORDS)
        .collect::<Vec<_>>()
        .join("-");

    if slug.is_empty() {
        DEFAULT_FILENAME.to_string()
    } else {
        format!("{}.html", slug)
    }
}
