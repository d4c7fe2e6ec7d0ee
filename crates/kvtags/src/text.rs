//! String helpers for escaping and quoting tokens.

use std::sync::LazyLock;

use regex::Regex;

static QUOTED_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"((?:\\.|[^\\])*?)"?$"#)
        .unwrap_or_else(|_| unreachable!("quoted token regex is valid"))
});

static CLOSED_QUOTED_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^"(?:\\.|[^\\])*"$"#)
        .unwrap_or_else(|_| unreachable!("closed quote regex is valid"))
});

static ESCAPED_CHAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(.)").unwrap_or_else(|_| unreachable!("escape regex is valid"))
});

/// Escapes the regular expression metacharacters `.^$*+-?()[]{}\|`.
pub fn escape_regex_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '.' | '^' | '$' | '*' | '+' | '-' | '?' | '(' | ')' | '[' | ']' | '{' | '}' | '\\' | '|'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Escapes `&`, `<` and `>` for embedding text in HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Wraps text in double quotes, escaping backslashes and quotes.
pub fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Removes the surrounding quotes of a quoted token and resolves escapes.
///
/// The closing quote is optional so a token that is still being typed can
/// be unquoted as well. Tokens that do not start with `"` are returned
/// trimmed but otherwise untouched.
pub fn unquote(token: &str) -> String {
    let trimmed = token.trim();
    if !trimmed.starts_with('"') {
        return trimmed.to_string();
    }
    let inner = QUOTED_TOKEN_RE.replace(trimmed, "$1");
    ESCAPED_CHAR_RE.replace_all(&inner, "$1").trim().to_string()
}

/// Returns true if the token is a quoted token with its closing quote.
pub fn is_closed_quote(token: &str) -> bool {
    CLOSED_QUOTED_TOKEN_RE.is_match(token)
}
