/// Core domain types for share payloads and hover type names.
use std::fmt;

/// A share payload: compressed source text in the URL-safe base64 alphabet
/// `[A-Za-z0-9_-]`, never padded. Newtype keeps it apart from arbitrary strings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SharePayload(
    /// The URL-safe payload characters.
    pub String,
);

impl SharePayload {
    /// The payload as it appears in a URL fragment, `code=<payload>`.
    pub fn fragment(&self) -> String {
        return format!("code={}", self.0);
    }
}

impl fmt::Display for SharePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

/// A normalized type name: unqualified, generic suffix removed.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TypeName(
    /// The innermost unqualified name.
    pub String,
);

impl TypeName {
    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        return &self.0;
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return f.write_str(&self.0);
    }
}

impl PartialEq<&str> for TypeName {
    fn eq(&self, other: &&str) -> bool {
        return self.0 == *other;
    }
}

/// The hover rules, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HoverRule {
    /// `Class#method` or `Class.method`.
    MemberSignature,
    /// Leading `[`, `: [`, `-> [`, or `Array[`.
    ArrayLiteral,
    /// First capitalized identifier in the language's fenced block.
    FencedBlock,
    /// Capitalized identifier standing on its own.
    BareType,
    /// First capitalized identifier anywhere.
    Fallback,
    /// Whole input is a symbol literal such as `:foo?`.
    SymbolLiteral,
}

impl HoverRule {
    /// Every rule, highest precedence first.
    pub const ORDERED: [Self; 6] = [
        Self::MemberSignature,
        Self::ArrayLiteral,
        Self::FencedBlock,
        Self::BareType,
        Self::Fallback,
        Self::SymbolLiteral,
    ];

    /// Short kebab-case name used in CLI output.
    pub const fn name(self) -> &'static str {
        return match self {
            Self::MemberSignature => "member-signature",
            Self::ArrayLiteral => "array-literal",
            Self::FencedBlock => "fenced-block",
            Self::BareType => "bare-type",
            Self::Fallback => "fallback",
            Self::SymbolLiteral => "symbol-literal",
        };
    }
}

/// Which rule produced a type name, and the name itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct HoverMatch {
    /// The rule that fired first.
    pub rule: HoverRule,
    /// The normalized name it produced.
    #[serde(rename = "type")]
    pub type_name: TypeName,
}
