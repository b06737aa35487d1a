//! Method and variable bindings.
//!
//! A binding is the resolved description of a declared entity. Rewrites that
//! change a signature replace the binding wherever it is referenced, so the
//! declaration, its callers and its instantiation sites stay in agreement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Modifiers, TypeBinding};

/// Identity of a variable. Two bindings name the same variable exactly when
/// their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub u32);

/// Issues fresh [`VarId`]s, sequentially from a starting point.
#[derive(Debug, Clone)]
pub struct VarIdGen {
    next: u32,
}

impl VarIdGen {
    /// Start issuing at `first`; callers pass the first id the front end
    /// left unused.
    pub fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// The next unused id, or `None` once the id space is exhausted.
    ///
    /// `u32::MAX` is never issued, so [`VarIdGen::peek`] can always name
    /// the first unused id.
    pub fn fresh(&mut self) -> Option<VarId> {
        let next = self.next.checked_add(1)?;
        let id = VarId(self.next);
        self.next = next;
        Some(id)
    }

    /// The id the next call to [`VarIdGen::fresh`] will return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}

/// A resolved variable: local, parameter or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableBinding {
    pub id: VarId,
    pub name: String,
    pub ty: TypeBinding,
    #[serde(default)]
    pub is_parameter: bool,
    #[serde(default)]
    pub is_field: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<TypeBinding>,
}

impl VariableBinding {
    pub fn local(id: VarId, name: &str, ty: TypeBinding) -> Self {
        Self {
            id,
            name: name.to_string(),
            ty,
            is_parameter: false,
            is_field: false,
            declaring_type: None,
        }
    }

    pub fn parameter(id: VarId, name: &str, ty: TypeBinding, declaring_type: TypeBinding) -> Self {
        Self {
            is_parameter: true,
            declaring_type: Some(declaring_type),
            ..Self::local(id, name, ty)
        }
    }

    pub fn field(id: VarId, name: &str, ty: TypeBinding, declaring_type: TypeBinding) -> Self {
        Self {
            is_field: true,
            declaring_type: Some(declaring_type),
            ..Self::local(id, name, ty)
        }
    }

    pub fn same_variable(&self, other: &VariableBinding) -> bool {
        self.id == other.id
    }
}

/// A resolved method or constructor signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    /// Method name; `<init>` for constructors.
    pub name: String,
    pub declaring_type: TypeBinding,
    #[serde(default)]
    pub parameter_types: Vec<TypeBinding>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeBinding>,
    #[serde(default)]
    pub is_constructor: bool,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl MethodBinding {
    pub const CONSTRUCTOR_NAME: &'static str = "<init>";

    pub fn constructor(declaring_type: TypeBinding, parameter_types: Vec<TypeBinding>) -> Self {
        Self {
            name: Self::CONSTRUCTOR_NAME.to_string(),
            declaring_type,
            parameter_types,
            return_type: None,
            is_constructor: true,
            modifiers: Modifiers::default(),
        }
    }

    pub fn method(
        declaring_type: TypeBinding,
        name: &str,
        parameter_types: Vec<TypeBinding>,
        return_type: Option<TypeBinding>,
    ) -> Self {
        Self {
            name: name.to_string(),
            declaring_type,
            parameter_types,
            return_type,
            is_constructor: false,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }

    pub fn is_enum_constructor(&self) -> bool {
        self.is_constructor && self.declaring_type.is_enum()
    }
}

/// `com.example.Color.<init>(int, NSString)`
impl fmt::Display for MethodBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.parameter_types.iter().map(|p| p.to_string()).collect();
        write!(
            f,
            "{}.{}({})",
            self.declaring_type,
            self.name,
            params.join(", ")
        )
    }
}
