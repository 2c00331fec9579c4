//! Command trait definition for CLI commands.

use anyhow::Result;

/// Trait implemented by CLI commands.
///
/// `execute` runs the command's main logic. Output goes to `out`, so tests can capture it.
pub trait Command {
    #[allow(clippy::missing_errors_doc)]
    fn execute(&self, out: &mut dyn std::io::Write) -> Result<()>;
}
