//! Translation passes of the jtran translator.
//!
//! - [`enums`]: lowers enum types to classes with explicit constant
//!   initialization.
//! - [`native`]: builds and prints the Objective-C support code attached to
//!   lowered types.

pub mod enums;
pub mod native;

pub use enums::{lower_enums, EnumRewriter, LowerStats};
