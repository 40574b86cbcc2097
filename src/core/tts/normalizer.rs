//! Markdown to plain prose, so synthesized speech does not read out markup.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("normalizer pattern is invalid")
}

/// Rewrites applied in order on every pass.
///
/// Fenced blocks go first so inline-code unwrapping never sees their backticks.
/// Line-anchored prefixes are stripped before emphasis so a `* item` bullet is not
/// mistaken for an italic marker.
static REWRITES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        // ```fenced code```
        (compile(r"(?s)```.*?```"), ""),
        // --- / *** / ___ rules
        (compile(r"(?m)^[ \t]*[-*_]{3,}[ \t]*$"), ""),
        // # Heading
        (compile(r"(?m)^[ \t]*#{1,6}[ \t]+"), ""),
        // - item / * item / + item
        (compile(r"(?m)^[ \t]*[-*+][ \t]+"), ""),
        // 1. item
        (compile(r"(?m)^[ \t]*\d+\.[ \t]+"), ""),
        // > quote
        (compile(r"(?m)^[ \t]*>[ \t]*"), ""),
        // *italic* **bold** ***both***, whole marker runs at once
        (compile(r"\*+([^*\n]+)\*+"), "$1"),
        // _italic_ __bold__ ___both___
        (compile(r"_+([^_\n]+)_+"), "$1"),
        // ~~strike~~
        (compile(r"~~([^~\n]+)~~"), "$1"),
        // `code`
        (compile(r"`([^`\n]+)`"), "$1"),
        // ![alt](url), before links so the `!` goes too
        (compile(r"!\[([^\]]*)\]\([^)]*\)"), "$1"),
        // [label](url)
        (compile(r"\[([^\]]+)\]\([^)]*\)"), "$1"),
    ]
});

static PARAGRAPH_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"\n\s*\n"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| compile(r"\s{2,}"));

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| compile(r"[\r\n]"));

/// Upper bound on rewrite passes over one input
const MAX_PASSES: usize = 4;

fn normalize_pass(text: &str) -> String {
    let mut current = text.to_string();
    for (pattern, replacement) in REWRITES.iter() {
        current = pattern.replace_all(&current, *replacement).into_owned();
    }

    let current = PARAGRAPH_BREAK.replace_all(current.trim(), ". ");
    let current = WHITESPACE_RUN.replace_all(&current, " ");
    let current = LINE_BREAK.replace_all(&current, " ");
    current.trim().to_string()
}

/// Strip markdown from `text` for speaking.
///
/// Passes repeat until the text stops changing, so markup exposed by a later rewrite
/// is picked up by an earlier one. Emphasis patterns consume whole marker runs, so
/// nesting depth does not add passes; `MAX_PASSES` keeps the cost linear in the input.
pub fn normalize(text: &str) -> String {
    let mut current = normalize_pass(text);
    for _ in 1..MAX_PASSES {
        let next = normalize_pass(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}
