//! The tree surface translation passes operate on.
//!
//! Front ends produce a fully resolved [`CompilationUnit`]: every name is
//! bound, every call carries the binding of the method it invokes. Passes
//! rewrite the tree in place; the printer renders the result.

pub mod binding;
pub mod env;
pub mod node;
pub mod types;

pub use binding::{MethodBinding, VarId, VarIdGen, VariableBinding};
pub use env::TypeEnv;
pub use node::*;
pub use types::{Modifiers, TypeBinding, TypeKind, Visibility};
