use std::path::{Path, PathBuf};

use crate::error::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILE: &str = ".playground.toml";

/// Project configuration loaded from `.playground.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Embed frame settings.
    pub embed: EmbedConfig,
    /// Language tag used for fenced code blocks, in both directions.
    pub language: String,
    /// Base location share URLs are built on.
    pub location: String,
}

/// Settings for the embeddable frame markup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Entry document the embed URL points at.
    pub document: String,
    /// Frame height attribute.
    pub height: String,
    /// Frame width attribute.
    pub width: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        return Self {
            document: "embed.html".to_string(),
            height: "400".to_string(),
            width: "100%".to_string(),
        };
    }
}

/// Raw TOML structure for `.playground.toml`.
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct PlaygroundTomlConfig {
    #[serde(default)]
    embed: EmbedConfig,
    language: Option<String>,
    location: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            embed: EmbedConfig::default(),
            language: "ruby".to_string(),
            location: "https://example.com/".to_string(),
        }
    }
}

impl Config {
    /// Load config from `.playground.toml` in the given root directory.
    /// Returns the defaults if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// `Error::TomlDe` if the TOML is malformed,
    /// or `Error::UnknownLanguage` if the language tag is unusable.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(Error::Io(e)),
        }
    }

    /// Load config from an explicitly named file. Unlike [`Config::load`],
    /// a missing file is an error: the user asked for it by name.
    ///
    /// # Errors
    ///
    /// Returns `Error::FileNotFound` if the file is missing,
    /// or the errors of [`Config::parse`].
    pub fn load_file(path: &Path) -> Result<Self, Error> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::FileNotFound { path: PathBuf::from(path) });
            },
            Err(e) => return Err(Error::Io(e)),
        };
        Self::parse(&content)
    }

    /// Parse config TOML, filling unset keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::TomlDe` if the TOML is malformed,
    /// or `Error::UnknownLanguage` if the language tag is unusable.
    pub fn parse(content: &str) -> Result<Self, Error> {
        let raw: PlaygroundTomlConfig = toml::from_str(content)?;
        let defaults = Self::default();

        let language = raw.language.unwrap_or(defaults.language);
        validate_language_tag(&language)?;

        Ok(Self {
            embed: raw.embed,
            language,
            location: raw.location.unwrap_or(defaults.location),
        })
    }
}

/// A fence tag must be a single non-empty token.
///
/// # Errors
///
/// Returns `Error::UnknownLanguage` for empty tags or tags with other characters.
fn validate_language_tag(language: &str) -> Result<(), Error> {
    let valid = !language.is_empty()
        && language
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'));
    if valid {
        Ok(())
    } else {
        Err(Error::UnknownLanguage { language: language.to_string() })
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.language, "ruby");
        assert_eq!(config.embed.document, "embed.html");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "location = \"https://play.example.org/\"\n\n[embed]\nheight = \"600\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.location, "https://play.example.org/");
        assert_eq!(config.language, "ruby");
        assert_eq!(config.embed.height, "600");
        assert_eq!(config.embed.width, "100%");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "language = [").unwrap();
        assert!(matches!(Config::load(dir.path()), Err(Error::TomlDe(_))));
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert!(matches!(Config::parse("lang = \"ruby\""), Err(Error::TomlDe(_))));
    }

    #[test]
    fn rejects_language_with_spaces() {
        let err = Config::parse("language = \"ruby 3\"").unwrap_err();
        assert!(matches!(err, Error::UnknownLanguage { language } if language == "ruby 3"));
    }

    #[test]
    fn explicit_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(matches!(Config::load_file(&path), Err(Error::FileNotFound { .. })));
    }
}
