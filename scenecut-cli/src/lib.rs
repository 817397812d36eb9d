// scenecut-cli/src/lib.rs
//
// Library portion of the scenecut CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::run::{EXIT_FAILURE, EXIT_OK, RunSummary, run};
