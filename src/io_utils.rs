use std::fmt;
use std::io;
use std::path::Path;

use crate::TidSearchError;

#[derive(Debug)]
pub struct CliError {
    pub msg: String,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.msg.fmt(f)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Format a user friendly I/O error message with suggestions.
pub fn format_io_error(operation: &str, path: &Path, err: &io::Error) -> String {
    use io::ErrorKind::*;
    let suggestion = match err.kind() {
        NotFound => "Check that the file exists and the path is correct.",
        PermissionDenied => "Check permissions or run as a different user.",
        UnexpectedEof => "File appears truncated or corrupted.",
        WriteZero => "Disk may be full. Free up space and try again.",
        Other if err.raw_os_error() == Some(28) => "Disk may be full. Free up space and try again.",
        _ => "Check permissions or free up disk space.",
    };
    format!(
        "Error {} '{}': {}. {}",
        operation,
        path.display(),
        err,
        suggestion
    )
}

/// Simple CLI error from string.
pub fn simple_cli_error(msg: &str) -> CliError {
    CliError {
        msg: msg.to_string(),
        source: None,
    }
}

/// Wrap a library error raised while touching `path`.
pub fn table_cli_error(operation: &str, path: &Path, err: TidSearchError) -> CliError {
    let msg = match &err {
        TidSearchError::Io(io) => format_io_error(operation, path, io),
        other => format!(
            "Error {} '{}': {}",
            operation,
            path.display(),
            cli_hint(other)
        ),
    };
    CliError {
        msg,
        source: Some(Box::new(err)),
    }
}

/// Convert a library error into a CLI error with a hint.
pub fn tidsearch_cli_error(context: &str, err: TidSearchError) -> CliError {
    CliError {
        msg: format!("{}: {}", context, cli_hint(&err)),
        source: Some(Box::new(err)),
    }
}

/// Return an actionable hint for an error variant.
pub fn cli_hint(err: &TidSearchError) -> String {
    use TidSearchError::*;
    match err {
        InvalidRange { .. } => format!("{err}. The upper bound must not precede the lower bound."),
        Format(msg) => format!("{msg}. Not a seed table, or written by another version."),
        Checksum => "checksum mismatch. The table is corrupted, rebuild it.".to_string(),
        Encoding(e) => format!("{e}. The table is corrupted, rebuild it."),
        Csv(e) => format!("{e}"),
        ThreadPool(e) => format!("{e}. Try a smaller --threads value."),
        Io(io) => format!("{io}"),
    }
}
