//! skulink command-line front end: file input, interactive prompts, chunked
//! upload rounds and the undo ledger file.

pub mod input;
pub mod ledger;
pub mod prompt;
pub mod upload;

/// Default location of the undo ledger written by `skulink upload`
pub const DEFAULT_LEDGER_PATH: &str = "skulink-undo.json";

/// Initialize tracing for CLI binaries. Logs go to stderr; stdout carries results.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
