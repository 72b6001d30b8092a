//! Command-line interface.
//!
//! Parsed before anything else in `main()`:
//!
//! ```ignore
//! use seatbelt::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args()) {
//!     CliCommand::Version => seatbelt::cli::handle_version_command(),
//!     CliCommand::Headless => { /* run without dashboard */ }
//!     CliCommand::RunTui => { /* run dashboard */ }
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand};
pub use version::{handle_version_command, version_line, VERSION};
