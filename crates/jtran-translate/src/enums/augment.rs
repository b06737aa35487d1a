use jtran_ast::{MethodBinding, TypeEnv};

/// Widen an enum constructor signature with the implicit name and ordinal
/// parameters.
///
/// Returns a copy of `method` whose parameter list ends with the string
/// type followed by the int type. `method` itself is left untouched.
pub fn add_enum_constructor_params(method: &MethodBinding, env: &TypeEnv) -> MethodBinding {
    let mut widened = method.clone();
    widened.parameter_types.push(env.string_type().clone());
    widened.parameter_types.push(env.int_type().clone());
    widened
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtran_ast::TypeBinding;

    #[test]
    fn appends_string_then_int() {
        let env = TypeEnv::new();
        let color = TypeBinding::enum_type(Some("com.example"), "Color");
        let original = MethodBinding::constructor(color, vec![TypeBinding::primitive("double")]);

        let widened = add_enum_constructor_params(&original, &env);

        assert_eq!(widened.arity(), original.arity() + 2);
        assert_eq!(widened.parameter_types[0], TypeBinding::primitive("double"));
        assert_eq!(&widened.parameter_types[1], env.string_type());
        assert_eq!(&widened.parameter_types[2], env.int_type());
        assert_eq!(original.arity(), 1, "input binding must not change");
        assert_eq!(widened.name, original.name);
        assert_eq!(widened.declaring_type, original.declaring_type);
    }
}
