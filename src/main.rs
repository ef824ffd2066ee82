use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;
use tracing_subscriber::EnvFilter;

use playshare::commands::{self, HoverOutput};
use playshare::config::{CONFIG_FILE, Config};
use playshare::{diagnostics, error, info};

#[derive(Parser)]
#[command(name = "playshare", version, about = "Share links and hover type hints for the code playground")]
struct Cli {
    /// Config file to use instead of ./.playground.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log codec and hover rule decisions to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a share URL for a source file (or stdin)
    Share {
        /// Source file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Base location, overriding the config
        #[arg(long)]
        location: Option<String>,
    },
    /// Print the source stored in a share fragment or URL
    Restore {
        /// `#code=...`, `code=...`, a bare payload, or a full share URL
        fragment: String,
    },
    /// Print <iframe> markup embedding a source file (or stdin)
    Embed {
        /// Source file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Base location, overriding the config
        #[arg(long)]
        location: Option<String>,
    },
    /// Print a source file (or stdin) as a fenced markdown block
    Codeblock {
        /// Source file; reads stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the type name found in hover markdown (file or stdin)
    Hover {
        /// Hover markdown file; reads stdin when omitted
        file: Option<PathBuf>,
        /// Input is an LSP hover response (JSON)
        #[arg(long)]
        lsp: bool,
        /// Also print which rule matched
        #[arg(long)]
        explain: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a reference document for playshare
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = PathBuf::from(".");
    let config_path = cli.config.clone().unwrap_or_else(|| return root.join(CONFIG_FILE));
    let result = load_config(&root, cli.config.as_deref()).and_then(|config| {
        return match cli.command {
            Commands::Share { file, location } => {
                commands::share(&config, file.as_deref(), location.as_deref())
            },
            Commands::Restore { fragment } => commands::restore(&fragment),
            Commands::Embed { file, location } => {
                commands::embed(&config, file.as_deref(), location.as_deref())
            },
            Commands::Codeblock { file } => commands::codeblock(&config, file.as_deref()),
            Commands::Hover { file, lsp, explain, json } => {
                commands::hover(&config, file.as_deref(), HoverOutput { explain, json, lsp })
            },
            Commands::Info { json } => {
                info::run(&config_path, &config, json);
                Ok(())
            },
        };
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            diagnostics::print_error(&e);
            exit_code_for(&e)
        },
    }
}

/// Logs go to stderr so stdout stays pipeable. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config, error::Error> {
    match explicit {
        Some(path) => Config::load_file(path),
        None => Config::load(root),
    }
}

/// No result (1) is distinct from failure (3).
fn exit_code_for(e: &error::Error) -> ExitCode {
    match e {
        error::Error::NothingToRestore | error::Error::NoTypeMatch => ExitCode::from(1),
        _ => ExitCode::from(3),
    }
}
