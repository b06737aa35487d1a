//! Shared infrastructure for the jtran translator: internal errors,
//! translation options, and logging setup.

pub mod error;
pub mod logging;
pub mod options;

pub use error::InternalError;
pub use options::{MemoryManagement, TranslateOptions};
