use colored::*;
use contamscan_core::discovery::DiscoveryError;
use contamscan_core::error::IoOperation;
use std::error::Error as StdError;
use std::fmt;
use std::io;

/// Process exit codes, one per failure class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    Misuse = 2,
    ConfigError = 3,
    FilesystemError = 4,
}

impl ExitCode {
    fn label(self) -> &'static str {
        match self {
            ExitCode::Success => "Ok",
            ExitCode::GeneralError => "Error",
            ExitCode::Misuse => "Usage Error",
            ExitCode::ConfigError => "Configuration Error",
            ExitCode::FilesystemError => "File Error",
        }
    }
}

/// Error reported to the user before the process exits
#[derive(Debug)]
pub struct CliError {
    message: String,
    code: ExitCode,
    /// Key/value details shown under the message
    context: Vec<(String, String)>,
    pub suggestions: Vec<String>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    fn new(message: &str, code: ExitCode) -> Self {
        Self {
            message: message.to_string(),
            code,
            context: Vec::new(),
            suggestions: Vec::new(),
            source: None,
        }
    }

    pub fn general(message: &str) -> Self {
        Self::new(message, ExitCode::GeneralError)
    }

    /// Bad arguments or patterns
    pub fn misuse(message: &str) -> Self {
        Self::new(message, ExitCode::Misuse)
            .with_suggestion("Run 'contamscan --help' for usage information")
    }

    /// Unreadable, malformed or missing configuration
    pub fn config(message: &str) -> Self {
        Self::new(message, ExitCode::ConfigError)
            .with_suggestion("Check the configuration file and CONTAMSCAN_* environment variables")
            .with_suggestion("Run 'contamscan --print-config' to see the effective configuration")
    }

    /// Output files or symlinks could not be created
    ///
    /// Suggestions are picked from the wording of the message.
    pub fn filesystem(message: &str) -> Self {
        let lower = message.to_lowercase();
        let error = Self::new(message, ExitCode::FilesystemError);

        if lower.contains("not found") || lower.contains("no such file") {
            error
                .with_suggestion("Check that the parent directory of the output exists")
                .with_suggestion("Verify you have the correct path")
        } else if lower.contains("permission") || lower.contains("denied") {
            error.with_suggestion("Check file permissions on the output location")
        } else {
            error
        }
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestions.push(suggestion.to_string());
        self
    }

    fn from_core_ref(error: &contamscan_core::Error) -> Self {
        let cli_error = match error {
            contamscan_core::Error::Io(io_error) => {
                let cli_error = Self::new(&io_error.to_string(), ExitCode::FilesystemError);
                let cli_error = match io_error.kind() {
                    io::ErrorKind::NotFound => cli_error
                        .with_suggestion("Check that the parent directory of the output exists"),
                    io::ErrorKind::PermissionDenied => cli_error
                        .with_suggestion("Check file permissions on the output location"),
                    _ => cli_error,
                };
                if io_error.operation == IoOperation::Symlink {
                    cli_error.with_suggestion(
                        "Symlink creation may need extra privileges on some platforms",
                    )
                } else {
                    cli_error
                }
            }
            contamscan_core::Error::Discovery(DiscoveryError::InvalidPattern(pattern)) => {
                Self::misuse(&format!("Invalid exclude pattern: {pattern}"))
            }
            contamscan_core::Error::Discovery(e @ DiscoveryError::PathNotFound(_)) => {
                Self::filesystem(&e.to_string())
            }
        };

        match error.path() {
            Some(path) => cli_error.with_context("path", &path.display().to_string()),
            None => cli_error,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.code
    }

    /// Render for stderr; `debug` adds the full cause chain
    pub fn format_for_user(&self, debug: bool) -> String {
        let label = match self.code {
            ExitCode::Misuse | ExitCode::ConfigError => self.code.label().yellow(),
            _ => self.code.label().red(),
        };

        let mut out = String::new();
        out.push_str(&format!("{label}: {}\n", self.message));

        if !self.context.is_empty() {
            out.push_str("\nContext:\n");
            for (key, value) in &self.context {
                out.push_str(&format!("  {}: {value}\n", key.bold()));
            }
        }

        if debug && let Some(source) = &self.source {
            out.push_str("\nCaused by:\n");
            let first: &(dyn StdError + 'static) = source.as_ref();
            let chain = std::iter::successors(Some(first), |e| StdError::source(*e));
            for (level, cause) in chain.enumerate() {
                out.push_str(&format!("  {}: {cause}\n", level + 1));
            }
        }

        if !self.suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for suggestion in &self.suggestions {
                out.push_str(&format!("  • {suggestion}\n"));
            }
        }

        out
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.label(), self.message)?;
        self.context
            .iter()
            .try_for_each(|(key, value)| write!(f, " ({key}: {value})"))
    }
}

impl StdError for CliError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

impl From<contamscan_core::Error> for CliError {
    fn from(error: contamscan_core::Error) -> Self {
        let mut cli_error = Self::from_core_ref(&error);
        cli_error.source = Some(Box::new(error));
        cli_error
    }
}

/// Core and configuration errors anywhere in the chain keep their exit
/// code; an outer context message is kept as `while` context.
impl From<anyhow::Error> for CliError {
    fn from(error: anyhow::Error) -> Self {
        let outer = error.to_string();
        let mapped = error.chain().find_map(|cause| {
            if let Some(core) = cause.downcast_ref::<contamscan_core::Error>() {
                let cli_error = Self::from_core_ref(core);
                return Some(if outer == core.to_string() {
                    cli_error
                } else {
                    cli_error.with_context("while", &outer)
                });
            }
            cause
                .downcast_ref::<figment::Error>()
                .map(|_| Self::config(&format!("{outer}: {cause}")))
        });

        let mut cli_error = mapped.unwrap_or_else(|| Self::general(&outer));
        cli_error.source = Some(error.into());
        cli_error
    }
}
