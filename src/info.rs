use std::path::Path;

use serde::Serialize;

use crate::config::{CONFIG_FILE, Config};

/// Output the playshare reference document, as markdown or JSON.
///
/// `config_path` is the file the config was loaded from, or would have been.
pub fn run(config_path: &Path, config: &Config, json: bool) {
    let state = gather_state(config_path, config);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    config_found: bool,
    config_path: String,
    embed_document: String,
    language: String,
    location: String,
}

fn gather_state(config_path: &Path, config: &Config) -> CurrentState {
    CurrentState {
        config_found: config_path.is_file(),
        config_path: config_path.display().to_string(),
        embed_document: config.embed.document.clone(),
        language: config.language.clone(),
        location: config.location.clone(),
    }
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# playshare {version}

Share links and hover type hints for the code playground. Source text is
compressed into a URL fragment (`#code=<payload>`) that any earlier or later
build can restore.

## Commands

    playshare share [FILE] [--location URL]     Print a share URL for FILE (or stdin)
    playshare restore <FRAGMENT|URL>            Print the source stored in a share link
    playshare embed [FILE] [--location URL]     Print <iframe> markup for an embed
    playshare codeblock [FILE]                  Print FILE as a fenced markdown block
    playshare hover [FILE] [--lsp] [--explain] [--json]
                                                Print the type name in hover markdown

## Hover Rules (first match wins)

| Rule             | Matches                                   |
|------------------|-------------------------------------------|
| member-signature | `Class#method`, `Class.method`            |
| array-literal    | `[..`, `: [`, `-> [`, `Array[`            |
| fenced-block     | first name in the language's code block   |
| bare-type        | a name standing alone                     |
| fallback         | the first capitalized name anywhere       |
| symbol-literal   | the whole input is `:symbol`              |

## Configuration ({CONFIG_FILE})

    language = \"ruby\"                       # code-fence tag
    location = \"https://example.com/\"       # base for share URLs

    [embed]
    document = \"embed.html\"                 # entry document for embeds
    width = \"100%\"
    height = \"400\"

## Current State

"
    );
}

fn print_markdown_state(state: &CurrentState) {
    if state.config_found {
        println!("Config:     {} (found)", state.config_path);
    } else {
        println!("Config:     {} (not found, using defaults)", state.config_path);
    }
    println!("Language:   {}", state.language);
    println!("Location:   {}", state.location);
    println!("Embed:      {}", state.embed_document);
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | Success |
| 1    | Nothing restored / no type found |
| 3    | Runtime error |
"
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    version: String,
    hover_rules: Vec<&'static str>,
    exit_codes: Vec<ExitCodeInfo>,
    current_state: StateJson,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    config_found: bool,
    config_path: String,
    embed_document: String,
    language: String,
    location: String,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        hover_rules: crate::types::HoverRule::ORDERED.iter().map(|r| r.name()).collect(),
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "Success".to_string() },
            ExitCodeInfo { code: 1, meaning: "Nothing restored / no type found".to_string() },
            ExitCodeInfo { code: 3, meaning: "Runtime error".to_string() },
        ],
        current_state: StateJson {
            config_found: state.config_found,
            config_path: state.config_path.clone(),
            embed_document: state.embed_document.clone(),
            language: state.language.clone(),
            location: state.location.clone(),
        },
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
