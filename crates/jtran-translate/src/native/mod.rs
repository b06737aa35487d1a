//! Generated native (Objective-C) support code.
//!
//! Passes describe generated code as [`item::NativeItem`]s, lower them to
//! the [`doc::Doc`] layout IR, and print text only at the very end. The
//! resulting text is attached to the tree as opaque
//! [`jtran_ast::NativeDeclaration`]s for the printer to copy out verbatim.

pub mod doc;
pub mod enum_support;
pub mod item;
pub mod printer;

pub use enum_support::{emit_enum_support, EnumSupport};
