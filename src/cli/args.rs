//! Command-line argument parsing.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Run without the dashboard, logging to stderr
    Headless,
    /// Run the dashboard (default)
    RunTui,
}

/// Parse command-line arguments, program name first.
///
/// `--version` wins over `--headless` wherever it appears.
///
/// # Examples
///
/// ```
/// use seatbelt::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["seatbelt".to_string(), "--headless".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Headless);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut command = CliCommand::RunTui;
    for arg in args.skip(1) {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--headless" => command = CliCommand::Headless,
            _ => {}
        }
    }
    command
}
