//! `{name}` placeholder substitution.
//!
//! Shared by localized text (`ContentOverlay::format`) and feature template
//! expansion. Substitution is a single pass: replacement values are inserted
//! verbatim and never scanned for further placeholders. `{{` and `}}` are
//! literal braces.

use std::sync::OnceLock;
use thiserror::Error;

// Escaped braces first, then a placeholder with no nested braces
static PLACEHOLDER_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn placeholder_regex() -> &'static regex_lite::Regex {
    PLACEHOLDER_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"\{\{|\}\}|\{([^{}]*)\}")
            .expect("PLACEHOLDER_REGEX pattern is invalid")
    })
}

/// Substitution failures. Callers fall back to the unsubstituted text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceholderError {
    #[error("No value for placeholder {{{0}}}")]
    MissingParameter(String),
    #[error("Unbalanced braces in: {0}")]
    Malformed(String),
}

/// Whether `text` contains anything that looks like a placeholder.
pub fn has_placeholders(text: &str) -> bool {
    text.contains('{') || text.contains('}')
}

/// Replace every `{name}` in `text` with `lookup(name)`.
///
/// Fails on the first placeholder `lookup` cannot resolve, on an empty
/// `{}`, or on a brace that is neither escaped nor part of a placeholder.
pub fn interpolate<F>(text: &str, mut lookup: F) -> Result<String, PlaceholderError>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        push_literal(&mut out, &text[last..whole.start()], text)?;
        last = whole.end();

        match whole.as_str() {
            "{{" => out.push('{'),
            "}}" => out.push('}'),
            _ => {
                let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                if name.is_empty() {
                    return Err(PlaceholderError::Malformed(text.to_string()));
                }
                let value = lookup(name)
                    .ok_or_else(|| PlaceholderError::MissingParameter(name.to_string()))?;
                out.push_str(&value);
            }
        }
    }

    push_literal(&mut out, &text[last..], text)?;
    Ok(out)
}

fn push_literal(out: &mut String, segment: &str, text: &str) -> Result<(), PlaceholderError> {
    if has_placeholders(segment) {
        return Err(PlaceholderError::Malformed(text.to_string()));
    }
    out.push_str(segment);
    Ok(())
}
