//! crates/component_generator_core/src/extract.rs
//!
//! Pulls the generated component out of a markdown-formatted model reply.

use regex::Regex;
use std::sync::LazyLock;

/// Language tags that mark a fenced block as a UI component.
const COMPONENT_LANGUAGES: &[&str] = &["tsx", "jsx", "typescript", "ts", "javascript", "js"];

/// Opening fence with its optional tag, the body, and the closing fence.
/// Matches are non-overlapping, so a skipped block still consumes its closing fence.
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[ \t]*([A-Za-z0-9_+#.-]*)[ \t]*\r?\n([\s\S]*?)\r?\n[ \t]*```")
        .expect("fenced block pattern is valid")
});

/// Returns the interior of the first fenced block that is untagged or tagged
/// with a UI-component language.
///
/// Blocks in other languages are skipped. A qualifying block with only
/// whitespace inside counts as no block.
pub fn extract_code_block(content: &str) -> Option<String> {
    let body = FENCED_BLOCK
        .captures_iter(content)
        .find(|caps| {
            let tag = caps.get(1).map_or("", |m| m.as_str());
            tag.is_empty()
                || COMPONENT_LANGUAGES
                    .iter()
                    .any(|lang| lang.eq_ignore_ascii_case(tag))
        })?
        .get(2)?
        .as_str();

    if body.trim().is_empty() {
        None
    } else {
        Some(body.to_string())
    }
}
