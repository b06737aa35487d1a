//! Name and type resolution service.
//!
//! [`TypeEnv`] hands out the well-known types translation passes refer to
//! and computes the output (Objective-C) names of Java types.

use rustc_hash::FxHashMap;

use crate::types::{TypeBinding, TypeKind};

/// Java primitives known to the environment.
const JAVA_PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Foundation and runtime types the generated code names directly.
const IOS_TYPES: &[&str] = &["NSString", "NSObject", "NSZone", "NSUInteger", "IOSObjectArray"];

/// Well-known types and the output-name table.
#[derive(Debug, Clone)]
pub struct TypeEnv {
    java_types: FxHashMap<&'static str, TypeBinding>,
    ios_types: FxHashMap<&'static str, TypeBinding>,
    illegal_argument: TypeBinding,
}

impl TypeEnv {
    pub fn new() -> Self {
        let java_types = JAVA_PRIMITIVES
            .iter()
            .map(|name| (*name, TypeBinding::primitive(name)))
            .collect();
        let ios_types = IOS_TYPES
            .iter()
            .map(|name| (*name, TypeBinding::foundation(name)))
            .collect();
        Self {
            java_types,
            ios_types,
            illegal_argument: TypeBinding::class(Some("java.lang"), "IllegalArgumentException"),
        }
    }

    /// Look up a Java primitive by its source spelling.
    pub fn resolve_java_type(&self, name: &str) -> Option<&TypeBinding> {
        self.java_types.get(name)
    }

    /// Look up a foundation/runtime type by its Objective-C name.
    pub fn resolve_ios_type(&self, name: &str) -> Option<&TypeBinding> {
        self.ios_types.get(name)
    }

    /// The string type (`NSString`).
    pub fn string_type(&self) -> &TypeBinding {
        &self.ios_types["NSString"]
    }

    /// The Java `int` type.
    pub fn int_type(&self) -> &TypeBinding {
        &self.java_types["int"]
    }

    /// `java.lang.IllegalArgumentException`, raised by failed lookups.
    pub fn illegal_argument_exception(&self) -> &TypeBinding {
        &self.illegal_argument
    }

    /// Output name of a type.
    ///
    /// Package segments are capitalized and concatenated as a prefix; member
    /// types join their enclosing chain with `_`:
    ///
    /// - `com.example.Color` -> `ComExampleColor`
    /// - `com.example.Outer.Inner` -> `ComExampleOuter_Inner`
    /// - `java.lang.IllegalArgumentException` -> `JavaLangIllegalArgumentException`
    ///
    /// Primitives and foundation types keep their own names.
    pub fn full_name(&self, ty: &TypeBinding) -> String {
        if matches!(ty.kind, TypeKind::Primitive | TypeKind::Foundation) {
            return ty.name.clone();
        }
        let prefix = ty.package.as_deref().map(package_prefix).unwrap_or_default();
        let names: Vec<&str> = ty
            .enclosing_chain()
            .into_iter()
            .map(|t| t.name.as_str())
            .collect();
        format!("{}{}", prefix, names.join("_"))
    }

    /// Name of the plain C enum mirroring an enum type's ordinals.
    pub fn native_enum_name(type_name: &str) -> String {
        format!("{type_name}_Enum")
    }
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// `com.example.util` -> `ComExampleUtil`
fn package_prefix(package: &str) -> String {
    package
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) => {
            let upper: String = c.to_uppercase().collect();
            upper + chars.as_str()
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_top_level() {
        let env = TypeEnv::new();
        let color = TypeBinding::enum_type(Some("com.example"), "Color");
        assert_eq!(env.full_name(&color), "ComExampleColor");
    }

    #[test]
    fn full_name_member_type() {
        let env = TypeEnv::new();
        let outer = TypeBinding::class(Some("com.example"), "Outer");
        let inner = TypeBinding::enum_type(None, "Inner").nested_in(outer);
        assert_eq!(env.full_name(&inner), "ComExampleOuter_Inner");
    }

    #[test]
    fn full_name_default_package_and_builtins() {
        let env = TypeEnv::new();
        assert_eq!(env.full_name(&TypeBinding::enum_type(None, "Suit")), "Suit");
        assert_eq!(env.full_name(env.string_type()), "NSString");
        assert_eq!(env.full_name(env.int_type()), "int");
        assert_eq!(
            env.full_name(env.illegal_argument_exception()),
            "JavaLangIllegalArgumentException"
        );
    }

    #[test]
    fn well_known_lookups() {
        let env = TypeEnv::new();
        assert_eq!(env.resolve_java_type("int"), Some(env.int_type()));
        assert_eq!(env.resolve_ios_type("NSString"), Some(env.string_type()));
        assert!(env.resolve_java_type("String").is_none());
        assert_eq!(TypeEnv::native_enum_name("ComExampleColor"), "ComExampleColor_Enum");
    }
}
