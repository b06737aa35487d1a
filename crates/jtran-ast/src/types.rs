//! Type bindings and declaration modifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What sort of type a [`TypeBinding`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Enum,
    Interface,
    /// A Java primitive such as `int` or `boolean`.
    Primitive,
    /// A type provided by the Objective-C runtime (`NSString`, `NSObject`).
    Foundation,
}

/// A resolved reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeBinding {
    /// Dotted Java package, e.g. `com.example`. `None` for the default
    /// package, primitives and foundation types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Simple (unqualified) name.
    pub name: String,
    /// Enclosing type for member types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outer: Option<Box<TypeBinding>>,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<Box<TypeBinding>>,
}

impl TypeBinding {
    fn new(package: Option<&str>, name: &str, kind: TypeKind) -> Self {
        Self {
            package: package.map(str::to_string),
            name: name.to_string(),
            outer: None,
            kind,
            superclass: None,
        }
    }

    pub fn class(package: Option<&str>, name: &str) -> Self {
        Self::new(package, name, TypeKind::Class)
    }

    pub fn enum_type(package: Option<&str>, name: &str) -> Self {
        Self::new(package, name, TypeKind::Enum)
    }

    pub fn primitive(name: &str) -> Self {
        Self::new(None, name, TypeKind::Primitive)
    }

    pub fn foundation(name: &str) -> Self {
        Self::new(None, name, TypeKind::Foundation)
    }

    /// Make this a member type of `outer`, inheriting its package.
    pub fn nested_in(mut self, outer: TypeBinding) -> Self {
        self.package = outer.package.clone();
        self.outer = Some(Box::new(outer));
        self
    }

    pub fn with_superclass(mut self, superclass: TypeBinding) -> Self {
        self.superclass = Some(Box::new(superclass));
        self
    }

    pub fn is_enum(&self) -> bool {
        self.kind == TypeKind::Enum
    }

    /// Enclosing types from outermost to this type itself.
    pub fn enclosing_chain(&self) -> Vec<&TypeBinding> {
        let mut chain = vec![self];
        let mut current = self;
        while let Some(outer) = current.outer.as_deref() {
            chain.push(outer);
            current = outer;
        }
        chain.reverse();
        chain
    }
}

/// Java source form, e.g. `com.example.Outer.Inner`.
impl fmt::Display for TypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(package) = &self.package {
            write!(f, "{package}.")?;
        }
        let names: Vec<&str> = self
            .enclosing_chain()
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        f.write_str(&names.join("."))
    }
}

/// Declared access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Package,
    Private,
}

/// Modifiers shared by declarations and their bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_static: bool,
    /// Generated by the translator; the printer writes no declaration
    /// for synthetic members.
    pub is_synthetic: bool,
}

impl Modifiers {
    pub fn public() -> Self {
        Self {
            visibility: Visibility::Public,
            ..Self::default()
        }
    }

    pub fn private() -> Self {
        Self {
            visibility: Visibility::Private,
            ..Self::default()
        }
    }

    /// Force `Private` visibility and mark as synthetic.
    pub fn make_private_synthetic(&mut self) {
        self.visibility = Visibility::Private;
        self.is_synthetic = true;
    }
}
