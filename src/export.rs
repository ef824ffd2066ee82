//! Derived share artifacts: embeddable frame markup and fenced code blocks.

use crate::config::EmbedConfig;
use crate::share;

/// Point a share URL at the embed entry document, keeping query and fragment.
///
/// `https://host/#code=x` becomes `https://host/embed.html#code=x`, and
/// `https://host/app/index.html?v=1#code=x` becomes
/// `https://host/app/embed.html?v=1#code=x`.
pub fn embed_url(url: &str, document: &str) -> String {
    let (before_fragment, fragment) = match url.split_once('#') {
        Some((before, fragment)) => (before, Some(fragment)),
        None => (url, None),
    };
    let (before_query, query) = match before_fragment.split_once('?') {
        Some((before, query)) => (before, Some(query)),
        None => (before_fragment, None),
    };

    let path_start = path_offset(before_query);
    let (origin, path) = before_query.split_at(path_start);
    let directory = path.rfind('/').and_then(|slash| return path.get(..=slash)).unwrap_or("");

    let mut out = String::with_capacity(url.len().saturating_add(document.len()));
    out.push_str(origin);
    if directory.is_empty() && !origin.is_empty() {
        out.push('/');
    }
    out.push_str(directory);
    out.push_str(document);
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    return out;
}

/// Byte offset where the path starts: after `scheme://authority`, or 0 for
/// a location that is already just a path.
fn path_offset(url: &str) -> usize {
    let Some((scheme, rest)) = url.split_once("://") else {
        return 0;
    };
    let authority_start = scheme.len().saturating_add("://".len());
    return rest
        .find('/')
        .map_or(url.len(), |slash| return authority_start.saturating_add(slash));
}

/// Frame markup that embeds `text` as a read-only playground.
pub fn embed_markup(text: &str, location: &str, embed: &EmbedConfig) -> String {
    let url = embed_url(&share::share_url(text, location), &embed.document);
    return format!(
        "<iframe src=\"{}\" width=\"{}\" height=\"{}\" frameborder=\"0\" \
         sandbox=\"allow-scripts allow-same-origin\" loading=\"lazy\"></iframe>",
        escape_attribute(&url),
        escape_attribute(&embed.width),
        escape_attribute(&embed.height),
    );
}

/// Wrap `text` verbatim in a fenced block tagged with `language`.
pub fn code_block(text: &str, language: &str) -> String {
    let newline = if text.ends_with('\n') { "" } else { "\n" };
    return format!("```{language}\n{text}{newline}```");
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    return out;
}
