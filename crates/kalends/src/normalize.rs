//! Phrase tokenizer.
//!
//! Turns free text into the lowercase token stream the resolver works on:
//! contractions expanded, punctuation removed, spelled numbers and ordinal
//! suffixes converted to digits, articles dropped. ISO dates (`2117-02-03`)
//! survive as single tokens. Tokenizing already-tokenized text is a no-op.

use std::sync::LazyLock;

use regex::Regex;

use crate::numbers::convert_numbers;

static ISO_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("Invalid regex"));
static SIGNED_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([+-])(\d+)$").expect("Invalid regex"));
static ORDINAL_SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:st|nd|rd|th)$").expect("Invalid regex"));

/// Words that an "a" or "an" in front of turns into a count of one.
const COUNTABLE: &[&str] = &[
    "day",
    "week",
    "weekend",
    "fortnight",
    "month",
    "year",
    "decade",
    "century",
    "millennium",
    "hour",
    "minute",
    "second",
];

/// Words before which "'s" means "is" rather than a possessive.
const IS_CONTRACTORS: &[&str] = &[
    "it", "he", "she", "that", "this", "what", "where", "when", "who", "there", "here", "how",
];

const ARTICLES: &[&str] = &["the", "a", "an"];

// ── Contractions ────────────────────────────────────────────────────────────

fn expand_contraction(word: &str) -> Vec<String> {
    let irregular: Option<&[&str]> = match word {
        "won't" => Some(&["will", "not"]),
        "can't" | "cannot" => Some(&["can", "not"]),
        "shan't" => Some(&["shall", "not"]),
        "ain't" => Some(&["is", "not"]),
        "let's" => Some(&["let", "us"]),
        _ => None,
    };
    if let Some(parts) = irregular {
        return parts.iter().map(|p| p.to_string()).collect();
    }

    let suffixes = [
        ("n't", "not"),
        ("'re", "are"),
        ("'ll", "will"),
        ("'ve", "have"),
        ("'m", "am"),
        ("'d", "would"),
    ];
    for (suffix, expansion) in suffixes {
        if let Some(stem) = word.strip_suffix(suffix).filter(|s| !s.is_empty()) {
            return vec![stem.to_string(), expansion.to_string()];
        }
    }

    if let Some(stem) = word.strip_suffix("'s").filter(|s| !s.is_empty()) {
        return if IS_CONTRACTORS.contains(&stem) {
            vec![stem.to_string(), "is".to_string()]
        } else {
            // possessive: "today's" → "today"
            vec![stem.to_string()]
        };
    }

    vec![word.to_string()]
}

// ── Per-token cleanup ───────────────────────────────────────────────────────

fn is_edge_punctuation(c: char) -> bool {
    matches!(
        c,
        ',' | '.' | ';' | ':' | '!' | '?' | '"' | '(' | ')' | '[' | ']' | '{' | '}'
    )
}

/// Split one contraction-free word into clean alphanumeric tokens.
fn clean_word(word: &str, out: &mut Vec<String>) {
    if ISO_DATE_PATTERN.is_match(word) {
        out.push(word.to_string());
        return;
    }
    match word {
        "+" => return out.push("plus".to_string()),
        "-" => return out.push("minus".to_string()),
        _ => {}
    }
    if let Some(caps) = SIGNED_NUMBER_PATTERN.captures(word) {
        let sign = if &caps[1] == "+" { "plus" } else { "minus" };
        out.push(sign.to_string());
        out.push(caps[2].to_string());
        return;
    }

    for part in word.split('-') {
        let stripped: String = part.chars().filter(|c| c.is_alphanumeric()).collect();
        if stripped.is_empty() {
            continue;
        }
        match ORDINAL_SUFFIX_PATTERN.captures(&stripped) {
            Some(caps) => out.push(caps[1].to_string()),
            None => out.push(stripped),
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────────

/// Normalize a phrase into resolver tokens.
///
/// # Examples
///
/// ```
/// use kalends::tokenize;
///
/// assert_eq!(tokenize("The 3rd day of May"), vec!["3", "day", "of", "may"]);
/// assert_eq!(tokenize("twenty-two weeks ago"), vec!["22", "weeks", "ago"]);
/// ```
pub fn tokenize(phrase: &str) -> Vec<String> {
    let lowered = phrase.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");

    let mut words = Vec::new();
    for raw in lowered.split_whitespace() {
        let trimmed = raw.trim_matches(is_edge_punctuation);
        if trimmed.is_empty() {
            continue;
        }
        for word in expand_contraction(trimmed) {
            clean_word(&word, &mut words);
        }
    }

    let words = convert_numbers(&words);

    let mut tokens = Vec::with_capacity(words.len());
    for (i, word) in words.iter().enumerate() {
        if ARTICLES.contains(&word.as_str()) {
            let next = words.get(i + 1).map(String::as_str);
            if word != "the" && next.is_some_and(|n| COUNTABLE.contains(&n)) {
                tokens.push("1".to_string());
            }
            continue;
        }
        tokens.push(word.clone());
    }
    tokens
}
