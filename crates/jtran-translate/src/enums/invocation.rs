use jtran_ast::{Expression, MethodBinding, TypeEnv};
use jtran_common::InternalError;

use super::augment::add_enum_constructor_params;
use super::context::ImplicitContext;

/// Rewrite a forwarding constructor call (`this(...)` or `super(...)`) made
/// from inside an enum constructor.
///
/// The callee's binding is widened and the caller's own implicit name and
/// ordinal variables are forwarded after the existing arguments.
pub fn rewrite_forwarding_call(
    method: &mut MethodBinding,
    arguments: &mut Vec<Expression>,
    ctx: &ImplicitContext,
    env: &TypeEnv,
) -> Result<(), InternalError> {
    let vars = ctx.active().ok_or_else(|| InternalError::ContextInactive {
        call: method.to_string(),
    })?;
    *method = add_enum_constructor_params(method, env);
    arguments.push(Expression::SimpleName(vars.name.clone()));
    arguments.push(Expression::SimpleName(vars.ordinal.clone()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::context::ImplicitVars;
    use jtran_ast::{TypeBinding, VarIdGen};

    #[test]
    fn forwards_active_vars_after_existing_args() {
        let env = TypeEnv::new();
        let color = TypeBinding::enum_type(None, "Color");
        let mut ids = VarIdGen::starting_at(0);
        let vars = ImplicitVars::fresh(&color, "Color.<init>()".into(), &env, &mut ids).unwrap();
        let mut ctx = ImplicitContext::default();
        ctx.enter(vars.clone()).unwrap();

        let mut method = MethodBinding::constructor(color, vec![TypeBinding::primitive("int")]);
        let mut args = vec![Expression::NumberLiteral(7)];
        rewrite_forwarding_call(&mut method, &mut args, &ctx, &env).unwrap();

        assert_eq!(method.arity(), 3);
        assert_eq!(args.len(), 3);
        assert_eq!(args[0], Expression::NumberLiteral(7));
        assert_eq!(args[1], Expression::SimpleName(vars.name));
        assert_eq!(args[2], Expression::SimpleName(vars.ordinal));
    }

    #[test]
    fn inactive_context_is_an_internal_error() {
        let env = TypeEnv::new();
        let color = TypeBinding::enum_type(None, "Color");
        let mut method = MethodBinding::constructor(color, vec![]);
        let mut args = Vec::new();

        let err = rewrite_forwarding_call(&mut method, &mut args, &ImplicitContext::default(), &env)
            .unwrap_err();

        assert_eq!(
            err,
            InternalError::ContextInactive {
                call: "Color.<init>()".to_string()
            }
        );
        assert_eq!(method.arity(), 0, "nothing rewritten on failure");
        assert!(args.is_empty());
    }
}
