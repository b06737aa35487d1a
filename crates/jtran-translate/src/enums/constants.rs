//! Instantiation of enum constants in the class initializer.

use rustc_hash::FxHashSet;
use tracing::warn;

use jtran_ast::{
    BodyDeclaration, ClassInstanceCreation, EnumConstantDeclaration, EnumDeclaration, Expression,
    MethodBinding, Statement, TypeEnv,
};

use super::augment::add_enum_constructor_params;

/// Prepend one `CONST = new T(args..., "CONST", ordinal)` statement per
/// constant to the enum's class initializer.
///
/// Ordinals follow declaration order starting at 0. The statements run
/// before any other static initializer. Returns the number of constants
/// instantiated.
pub fn lower_constants(decl: &mut EnumDeclaration, env: &TypeEnv) -> usize {
    warn_duplicate_names(decl);

    let enum_decl: &EnumDeclaration = decl;
    let mut statements: Vec<Statement> = enum_decl
        .constants
        .iter()
        .enumerate()
        .map(|(ordinal, constant)| {
            let constructor = resolve_constructor(enum_decl, &constant.constructor, env);
            Statement::expression(Expression::assignment(
                Expression::SimpleName(constant.variable.clone()),
                Expression::ClassInstanceCreation(instantiate(constant, constructor, ordinal)),
            ))
        })
        .collect();

    let count = statements.len();
    statements.append(&mut decl.class_init_statements);
    decl.class_init_statements = statements;
    count
}

fn instantiate(
    constant: &EnumConstantDeclaration,
    constructor: MethodBinding,
    ordinal: usize,
) -> ClassInstanceCreation {
    let mut arguments = constant.arguments.clone();
    arguments.push(Expression::StringLiteral(constant.name().to_string()));
    arguments.push(Expression::NumberLiteral(ordinal as i64));
    ClassInstanceCreation {
        method: constructor,
        arguments,
        // Constants live for the whole process.
        has_retained_result: true,
    }
}

/// The widened constructor a constant is created with.
///
/// Prefers the binding of the rewritten constructor declaration, so the
/// instantiation carries the same modifiers as the declaration it calls.
/// Enums without a declared constructor fall back to widening the
/// constant's own binding.
fn resolve_constructor(decl: &EnumDeclaration, declared: &MethodBinding, env: &TypeEnv) -> MethodBinding {
    let widened = add_enum_constructor_params(declared, env);
    decl.body_declarations
        .iter()
        .find_map(|body| match body {
            BodyDeclaration::Method(m)
                if m.binding.is_constructor
                    && m.binding.declaring_type == widened.declaring_type
                    && m.binding.parameter_types == widened.parameter_types =>
            {
                Some(m.binding.clone())
            }
            _ => None,
        })
        .unwrap_or(widened)
}

/// Names are expected to be unique already; a duplicate means the front end
/// let something through.
fn warn_duplicate_names(decl: &EnumDeclaration) {
    let mut seen = FxHashSet::default();
    for constant in &decl.constants {
        if !seen.insert(constant.name()) {
            warn!(
                target: "jtran::enums",
                enum_type = %decl.binding,
                constant = constant.name(),
                "duplicate enum constant name"
            );
        }
    }
}
