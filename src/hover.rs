//! Hover parser: pick the most likely type name out of hover markdown.
//!
//! Hover text from the analysis service is only loosely structured, so there
//! is no grammar to parse it with. Instead a fixed list of rules is tried in
//! order, most precise first, and the first rule that yields a name wins.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{HoverMatch, HoverRule, TypeName};

/// A constant path such as `Foo` or `Foo::Bar`.
const CONSTANT: &str = r"[A-Z][A-Za-z0-9_]*(?:::[A-Z][A-Za-z0-9_]*)*";

/// One optional bracketed generic suffix, allowing one level of nesting.
const GENERIC: &str = r"(?:\[(?:[^\[\]]|\[[^\[\]]*\])*\])?";

/// Code-fence language the default parser looks for.
pub const DEFAULT_LANGUAGE: &str = "ruby";

/// `Class#method` / `Class.method`: a name directly followed by `#` or `.`.
static MEMBER_SIGNATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({CONSTANT}{GENERIC})[#.]"))
        .expect("valid member signature regex")
});

/// A capitalized name standing on its own, not glued to `(` or `,`.
static BARE_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:^|\s)({CONSTANT}{GENERIC})[?|]?(?:\s|:|$)"))
        .expect("valid bare type regex")
});

/// The first capitalized name anywhere, even glued to a lowercase prefix.
static FALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"({CONSTANT}{GENERIC})")).expect("valid fallback regex")
});

/// The whole input is one symbol literal.
static SYMBOL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:[A-Za-z0-9_?!=<>+\-*/%\[\]~^&|@$]+$").expect("valid symbol literal regex")
});

/// A literal value at the start of a code block.
static LEADING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"[^"\n]*"|'[^'\n]*'|:[A-Za-z_][A-Za-z0-9_]*[?!=]?|true\b|false\b)"#)
        .expect("valid leading literal regex")
});

/// A capitalized name after leading non-identifier characters.
static LEADING_CONSTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[^A-Za-z0-9_]*({CONSTANT}{GENERIC})")).expect("valid leading constant regex")
});

static DEFAULT_PARSER: LazyLock<HoverParser> =
    LazyLock::new(|| return HoverParser::for_language(DEFAULT_LANGUAGE));

/// Hover parser bound to one code-fence language.
#[derive(Debug, Clone)]
pub struct HoverParser {
    fenced_block: Regex,
}

impl HoverParser {
    /// Build a parser that reads fenced blocks tagged `language`.
    ///
    /// # Panics
    ///
    /// Panics if the fence regex fails to compile, which the escaped tag rules out.
    pub fn for_language(language: &str) -> Self {
        let pattern = format!(r"(?s)```{}[ \t]*\r?\n(.*?)```", regex::escape(language));
        return Self {
            fenced_block: Regex::new(&pattern).expect("valid fenced block regex"),
        };
    }

    /// The normalized type name, or `None` when no rule matches.
    pub fn parse(&self, markdown: Option<&str>) -> Option<TypeName> {
        return self.resolve(markdown).map(|found| return found.type_name);
    }

    /// Try every rule in order and report the first that matches.
    pub fn resolve(&self, markdown: Option<&str>) -> Option<HoverMatch> {
        let content = markdown?.trim();
        if content.is_empty() {
            return None;
        }

        let found = HoverRule::ORDERED.into_iter().find_map(|rule| {
            return self
                .extract(rule, content)
                .map(|type_name| return HoverMatch { rule, type_name });
        });

        match &found {
            Some(m) => tracing::debug!(rule = m.rule.name(), type_name = %m.type_name, "hover rule matched"),
            None => tracing::debug!(content_len = content.len(), "no hover rule matched"),
        }
        return found;
    }

    /// Apply a single rule to already-trimmed content.
    pub fn extract(&self, rule: HoverRule, content: &str) -> Option<TypeName> {
        return match rule {
            HoverRule::MemberSignature => first_capture(&MEMBER_SIGNATURE, content).and_then(normalize),
            HoverRule::ArrayLiteral => looks_like_array(content).then(|| return TypeName("Array".to_string())),
            HoverRule::FencedBlock => self.first_block_type(content),
            HoverRule::BareType => first_capture(&BARE_TYPE, content).and_then(normalize),
            HoverRule::Fallback => first_capture(&FALLBACK, content).and_then(normalize),
            HoverRule::SymbolLiteral => {
                SYMBOL_LITERAL.is_match(content).then(|| return TypeName("Symbol".to_string()))
            },
        };
    }

    fn first_block_type(&self, content: &str) -> Option<TypeName> {
        let body = self.fenced_block.captures(content)?.get(1)?.as_str().trim_start();
        if let Some(literal) = LEADING_LITERAL.find(body) {
            return normalize(literal.as_str());
        }
        return first_capture(&LEADING_CONSTANT, body).and_then(normalize);
    }
}

impl Default for HoverParser {
    fn default() -> Self {
        return Self::for_language(DEFAULT_LANGUAGE);
    }
}

/// Parse hover markdown with the default language.
pub fn parse(markdown: Option<&str>) -> Option<TypeName> {
    return DEFAULT_PARSER.parse(markdown);
}

/// Like [`parse`], but also reports which rule fired.
pub fn resolve(markdown: Option<&str>) -> Option<HoverMatch> {
    return DEFAULT_PARSER.resolve(markdown);
}

/// Canonicalize a raw token into a type name.
///
/// Drops a trailing generic suffix, maps string, symbol and boolean
/// literals to `String`, `Symbol` and `Boolean`, and keeps only the last
/// `::` segment of a qualified constant.
pub fn normalize(raw: &str) -> Option<TypeName> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let name = strip_generic_suffix(raw);

    if name.starts_with('"') || name.starts_with('\'') {
        return Some(TypeName("String".to_string()));
    }
    if name.starts_with(':') {
        return Some(TypeName("Symbol".to_string()));
    }
    if name == "true" || name == "false" {
        return Some(TypeName("Boolean".to_string()));
    }

    let last = name.rsplit("::").next().unwrap_or(name);
    if last.is_empty() {
        return None;
    }
    return Some(TypeName(last.to_string()));
}

/// Structured metadata from hover content. Reserved; always empty for now.
pub fn extract_metadata(_markdown: &str) -> BTreeMap<String, String> {
    return BTreeMap::new();
}

/// Pull the markdown text out of an LSP `textDocument/hover` result.
///
/// Accepts the whole result (`{"contents": ...}`) or just its `contents`,
/// where contents is `MarkupContent`, a `MarkedString`, or an array of
/// `MarkedString`s (joined by blank lines).
pub fn markdown_from_lsp(value: &serde_json::Value) -> Option<String> {
    let contents = value.get("contents").unwrap_or(value);
    return match contents {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Object(_) => marked_string(contents),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(marked_string).collect();
            (!parts.is_empty()).then(|| return parts.join("\n\n"))
        },
        _ => None,
    };
}

/// A `MarkedString` or `MarkupContent` as markdown. Language-tagged code
/// is rendered back into a fenced block.
fn marked_string(value: &serde_json::Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    let text = value.get("value")?.as_str()?;
    return match value.get("language").and_then(serde_json::Value::as_str) {
        Some(language) => Some(format!("```{language}\n{text}\n```")),
        None => Some(text.to_string()),
    };
}

fn first_capture<'a>(pattern: &Regex, content: &'a str) -> Option<&'a str> {
    return pattern.captures(content)?.get(1).map(|m| return m.as_str());
}

fn looks_like_array(content: &str) -> bool {
    return content.starts_with('[')
        || content.starts_with("Array[")
        || content.contains(": [")
        || content.contains("-> [");
}

/// `Name[...]` -> `Name`. A leading `[` is left alone.
fn strip_generic_suffix(raw: &str) -> &str {
    if !raw.ends_with(']') {
        return raw;
    }
    return match raw.split_once('[') {
        Some((name, _)) if !name.is_empty() => name,
        _ => raw,
    };
}
