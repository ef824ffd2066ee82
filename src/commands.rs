//! CLI commands for playshare: share, restore, embed, codeblock, hover, info.

use std::io::Read as _;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Error;
use crate::export;
use crate::hover::{self, HoverParser};
use crate::share;

/// How `hover` should print its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoverOutput {
    /// Print the rule name next to the type.
    pub explain: bool,
    /// Print a JSON object instead of plain text.
    pub json: bool,
    /// Input is an LSP hover response rather than raw markdown.
    pub lsp: bool,
}

// ── Share codec ───────────────────────────────────────────────────────

/// Print the share URL for the input text.
///
/// # Errors
///
/// Returns `Error::InvalidLocation` for a location without scheme and host,
/// or I/O errors from reading the input.
pub fn share(config: &Config, input: Option<&Path>, location: Option<&str>) -> Result<(), Error> {
    let text = read_input(input)?;
    let location = checked_location(location.unwrap_or(&config.location))?;
    println!("{}", share::share_url(&text, location));
    return Ok(());
}

/// Print the source text recovered from a share fragment or URL.
///
/// # Errors
///
/// Returns `Error::NothingToRestore` if the fragment does not decode.
pub fn restore(fragment_or_url: &str) -> Result<(), Error> {
    let fragment = share::fragment_of(fragment_or_url.trim());
    let Some(text) = share::decode(Some(fragment)) else {
        tracing::warn!(fragment_len = fragment.len(), "shared payload could not be restored");
        return Err(Error::NothingToRestore);
    };
    print!("{text}");
    return Ok(());
}

/// Print the embeddable frame markup for the input text.
///
/// # Errors
///
/// Returns `Error::InvalidLocation` for a location without scheme and host,
/// or I/O errors from reading the input.
pub fn embed(config: &Config, input: Option<&Path>, location: Option<&str>) -> Result<(), Error> {
    let text = read_input(input)?;
    let location = checked_location(location.unwrap_or(&config.location))?;
    println!("{}", export::embed_markup(&text, location, &config.embed));
    return Ok(());
}

/// Print the input text as a fenced code block.
///
/// # Errors
///
/// Returns I/O errors from reading the input.
pub fn codeblock(config: &Config, input: Option<&Path>) -> Result<(), Error> {
    let text = read_input(input)?;
    println!("{}", export::code_block(&text, &config.language));
    return Ok(());
}

// ── Hover parser ──────────────────────────────────────────────────────

/// Print the type name found in hover markdown.
///
/// # Errors
///
/// Returns `Error::NoTypeMatch` when no rule matches,
/// or I/O errors from reading the input.
pub fn hover(config: &Config, input: Option<&Path>, output: HoverOutput) -> Result<(), Error> {
    let raw = read_input(input)?;
    let markdown = if output.lsp { lsp_markdown(&raw) } else { Some(raw) };

    let parser = HoverParser::for_language(&config.language);
    let found = parser.resolve(markdown.as_deref());

    if output.json {
        // Serializing these plain structs cannot fail.
        println!("{}", serde_json::to_string_pretty(&found).unwrap_or_default());
    }

    let Some(found) = found else {
        return Err(Error::NoTypeMatch);
    };

    if !output.json {
        if output.explain {
            println!("{}\t{}", found.type_name, found.rule.name());
        } else {
            println!("{}", found.type_name);
        }
    }
    return Ok(());
}

/// Markdown from an LSP hover response. Unparseable JSON counts as no content.
fn lsp_markdown(raw: &str) -> Option<String> {
    return match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => hover::markdown_from_lsp(&value),
        Err(e) => {
            tracing::warn!(error = %e, "hover input is not valid JSON");
            None
        },
    };
}

// ── Input helpers ─────────────────────────────────────────────────────

/// Read the named file, or stdin when no file is given.
///
/// # Errors
///
/// Returns `Error::FileNotFound` for a missing file, `Error::Io` otherwise.
fn read_input(input: Option<&Path>) -> Result<String, Error> {
    let Some(path) = input else {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    };

    return match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(Error::FileNotFound { path: PathBuf::from(path) })
        },
        Err(e) => Err(Error::Io(e)),
    };
}

/// A share location needs a scheme and a host to be openable.
///
/// # Errors
///
/// Returns `Error::InvalidLocation` describing what is missing.
fn checked_location(location: &str) -> Result<&str, Error> {
    let invalid = |reason: &str| {
        return Error::InvalidLocation {
            location: location.to_string(),
            reason: reason.to_string(),
        };
    };

    let Some((scheme, rest)) = location.split_once("://") else {
        return Err(invalid("missing scheme"));
    };
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return Err(invalid("bad scheme"));
    }
    let host_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    if host_end == 0 {
        return Err(invalid("missing host"));
    }
    return Ok(location);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_locations() {
        assert!(checked_location("https://play.example.org/").is_ok());
        assert!(checked_location("http://localhost:8000").is_ok());
    }

    #[test]
    fn rejects_locations_without_scheme_or_host() {
        assert!(matches!(
            checked_location("play.example.org"),
            Err(Error::InvalidLocation { reason, .. }) if reason == "missing scheme"
        ));
        assert!(matches!(
            checked_location("https:///path"),
            Err(Error::InvalidLocation { reason, .. }) if reason == "missing host"
        ));
    }

    #[test]
    fn missing_input_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.rb");
        assert!(matches!(read_input(Some(&path)), Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn lsp_markdown_tolerates_bad_json() {
        assert_eq!(lsp_markdown("{not json"), None);
        assert_eq!(
            lsp_markdown(r#"{"contents":{"kind":"markdown","value":"Integer"}}"#).as_deref(),
            Some("Integer")
        );
    }
}
