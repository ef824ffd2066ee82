use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render an error as a structured markdown diagnostic.
///
/// Each variant produces a block with what happened and how to fix it.
pub fn render_error(e: &Error) -> String {
    match e {
        Error::FileNotFound { path } => render_file_not_found(path),
        Error::InvalidLocation { location, reason } => render_invalid_location(location, reason),
        Error::NothingToRestore => render_nothing_to_restore(),
        Error::NoTypeMatch => render_no_type_match(),
        Error::UnknownLanguage { language } => render_unknown_language(language),
        Error::TomlDe(e) => format!("\
# Error: Invalid Config

{e}

## Fix

Correct `{CONFIG_FILE}`, or remove it to use the defaults.
"),
        Error::Io(e) => format!("\
# Error: I/O

{e}
"),
    }
}

fn render_file_not_found(path: &Path) -> String {
    format!("\
# Error: File Not Found

`{}` does not exist.
", path.display())
}

fn render_invalid_location(location: &str, reason: &str) -> String {
    format!("\
# Error: Invalid Location

`{location}` cannot host a share link ({reason}).

## Fix

Pass a full URL such as `https://play.example.org/`, either with
`--location` or as `location` in `{CONFIG_FILE}`.
")
}

fn render_nothing_to_restore() -> String {
    "\
# Nothing To Restore

The fragment does not contain a share payload this version can read.
It may be truncated or copied incompletely.
"
    .to_string()
}

fn render_no_type_match() -> String {
    "\
# No Type Found

None of the hover rules found a type name in the input.
"
    .to_string()
}

fn render_unknown_language(language: &str) -> String {
    format!("\
# Error: Unknown Language

`{language}` is not a usable code-fence tag.

## Fix

Use a single word such as `ruby` for `language` in `{CONFIG_FILE}`.
")
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn invalid_location_names_config_key() {
        let md = render_error(&Error::InvalidLocation {
            location: "example.org".to_string(),
            reason: "missing scheme".to_string(),
        });
        assert!(md.starts_with("# Error: Invalid Location"));
        assert!(md.contains("`example.org` cannot host a share link (missing scheme)"));
        assert!(md.contains(CONFIG_FILE));
    }

    #[test]
    fn every_block_starts_with_heading() {
        let errors = [
            Error::NothingToRestore,
            Error::NoTypeMatch,
            Error::UnknownLanguage { language: "a b".to_string() },
            Error::FileNotFound { path: "x.rb".into() },
        ];
        for e in &errors {
            assert!(render_error(e).starts_with('#'), "no heading for {e}");
        }
    }
}
