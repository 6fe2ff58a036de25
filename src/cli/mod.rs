//! Command Line Interface for spamsift.

pub mod args;
pub mod commands;
pub mod output;
pub mod repl;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
