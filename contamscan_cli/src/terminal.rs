//! Color decisions for the console report

use is_terminal::IsTerminal;
use std::env;
use std::io::stdout;

/// CI services that allocate a TTY but should still get plain output
const CI_VARS: &[&str] = &[
    "CI",
    "CONTINUOUS_INTEGRATION",
    "JENKINS_URL",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "BUILDKITE",
    "TF_BUILD", // Azure DevOps
];

/// Snapshot of the terminal facts that decide coloring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerminalEnv {
    pub stdout_is_tty: bool,
    pub term: Option<String>,
    pub no_color: bool,
    pub ci: bool,
}

impl TerminalEnv {
    /// Read the current process environment
    pub fn detect() -> Self {
        Self {
            stdout_is_tty: stdout().is_terminal(),
            term: env::var("TERM").ok(),
            no_color: env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()),
            ci: CI_VARS.iter().any(|var| env::var_os(var).is_some()),
        }
    }

    /// Whether ANSI colors can be written to stdout
    pub fn supports_color(&self) -> bool {
        if !self.stdout_is_tty || self.ci || self.no_color {
            return false;
        }

        match self.term.as_deref() {
            Some("dumb") => false,
            // Windows consoles set no TERM but handle ANSI
            None | Some("") => cfg!(windows),
            Some(_) => true,
        }
    }
}

/// Decide whether the report should be colored
pub fn should_use_color(color_enabled: bool) -> bool {
    color_enabled && TerminalEnv::detect().supports_color()
}
