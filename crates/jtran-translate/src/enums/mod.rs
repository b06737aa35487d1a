//! Enum lowering.
//!
//! The target runtime has no enums, so each enum becomes an ordinary class
//! whose instances are created once by the class initializer:
//!
//! 1. Every enum constructor gains two trailing parameters, `__name` and
//!    `__ordinal`, and becomes private and synthetic.
//! 2. `this(...)` / `super(...)` calls inside those constructors forward the
//!    two parameters.
//! 3. Each constant becomes `CONST = new T(args..., "CONST", i)` at the front
//!    of the class initializer.
//! 4. Native support (`values`, `valueOf`, `fromOrdinal`, `copyWithZone:`)
//!    is attached as pre-rendered text.
//!
//! The name/ordinal variables of the constructor being rewritten live in an
//! [`ImplicitContext`] passed down the walk. Each type declaration starts
//! its own context.

pub mod augment;
pub mod constants;
pub mod context;
pub mod invocation;

use serde::Serialize;
use tracing::debug;

use jtran_ast::{
    BodyDeclaration, CompilationUnit, EnumDeclaration, MethodDeclaration,
    SingleVariableDeclaration, Statement, TypeDeclaration, TypeEnv, VarIdGen,
};
use jtran_common::{InternalError, TranslateOptions};

use crate::native::emit_enum_support;

pub use augment::add_enum_constructor_params;
pub use constants::lower_constants;
pub use context::{ImplicitContext, ImplicitVars};
pub use invocation::rewrite_forwarding_call;

/// Counts of what one run of the pass rewrote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LowerStats {
    pub enums: usize,
    pub constructors: usize,
    pub forwarding_calls: usize,
    pub constants: usize,
}

/// Lower every enum in `unit`, including member and local enums.
///
/// Variables invented by the pass take ids from `unit.next_var_id`, which
/// is advanced past them.
pub fn lower_enums(
    unit: &mut CompilationUnit,
    env: &TypeEnv,
    options: &TranslateOptions,
) -> Result<LowerStats, InternalError> {
    let mut rewriter = EnumRewriter::new(env, options, VarIdGen::starting_at(unit.next_var_id));
    let result = unit
        .types
        .iter_mut()
        .try_for_each(|decl| rewriter.rewrite_type(decl));
    unit.next_var_id = rewriter.ids.peek();
    result.map(|()| rewriter.stats)
}

/// Single-pass enum rewriter.
pub struct EnumRewriter<'a> {
    env: &'a TypeEnv,
    options: &'a TranslateOptions,
    ids: VarIdGen,
    stats: LowerStats,
}

impl<'a> EnumRewriter<'a> {
    pub fn new(env: &'a TypeEnv, options: &'a TranslateOptions, ids: VarIdGen) -> Self {
        Self {
            env,
            options,
            ids,
            stats: LowerStats::default(),
        }
    }

    pub fn stats(&self) -> LowerStats {
        self.stats
    }

    /// Rewrite one type declaration and the member types it contains.
    pub fn rewrite_type(&mut self, decl: &mut TypeDeclaration) -> Result<(), InternalError> {
        let mut ctx = ImplicitContext::default();
        for body in decl.body_declarations_mut() {
            match body {
                BodyDeclaration::Method(method) => {
                    self.rewrite_method(method, &mut ctx)?;
                }
                BodyDeclaration::Type(member) => self.rewrite_type(member)?,
                BodyDeclaration::Field(_) | BodyDeclaration::Native(_) => {}
            }
        }
        if let TypeDeclaration::Enum(enum_decl) = decl {
            self.end_enum(enum_decl);
        }
        Ok(())
    }

    /// Rewrite `method` if it is an enum constructor; any other method,
    /// body included, is left alone. Returns whether it was rewritten.
    pub fn rewrite_method(
        &mut self,
        method: &mut MethodDeclaration,
        ctx: &mut ImplicitContext,
    ) -> Result<bool, InternalError> {
        if !method.binding.is_enum_constructor() {
            return Ok(false);
        }
        self.rewrite_constructor(method, ctx)?;
        Ok(true)
    }

    /// Widen an enum constructor and rewrite the forwarding calls in its
    /// body. `ctx` must be inactive on entry and is inactive again on
    /// return, whether or not the body rewrite succeeds.
    pub fn rewrite_constructor(
        &mut self,
        method: &mut MethodDeclaration,
        ctx: &mut ImplicitContext,
    ) -> Result<(), InternalError> {
        if !method.binding.is_enum_constructor() {
            return Err(InternalError::NotAnEnumConstructor {
                method: method.binding.to_string(),
            });
        }

        let vars = ImplicitVars::fresh(
            &method.binding.declaring_type,
            method.binding.to_string(),
            self.env,
            &mut self.ids,
        )?;
        let params = [
            SingleVariableDeclaration::new(vars.name.clone()),
            SingleVariableDeclaration::new(vars.ordinal.clone()),
        ];
        ctx.enter(vars)?;

        let mut widened = add_enum_constructor_params(&method.binding, self.env);
        // Only the generated constant initializers may call it.
        widened.modifiers.make_private_synthetic();
        method.modifiers.make_private_synthetic();
        method.binding = widened;
        method.parameters.extend(params);
        self.stats.constructors += 1;
        debug!(target: "jtran::enums", constructor = %method.binding, "rewrote enum constructor");

        let result = match method.body.as_mut() {
            Some(body) => body
                .statements
                .iter_mut()
                .try_for_each(|stmt| self.rewrite_statement(stmt, ctx)),
            None => Ok(()),
        };
        ctx.leave();
        result
    }

    /// Walk a statement of an enum constructor body.
    fn rewrite_statement(
        &mut self,
        stmt: &mut Statement,
        ctx: &mut ImplicitContext,
    ) -> Result<(), InternalError> {
        match stmt {
            Statement::ConstructorInvocation(call) => {
                rewrite_forwarding_call(&mut call.method, &mut call.arguments, ctx, self.env)?;
                self.stats.forwarding_calls += 1;
            }
            Statement::SuperConstructorInvocation(call) => {
                rewrite_forwarding_call(&mut call.method, &mut call.arguments, ctx, self.env)?;
                self.stats.forwarding_calls += 1;
            }
            Statement::Block(block) => {
                for inner in &mut block.statements {
                    self.rewrite_statement(inner, ctx)?;
                }
            }
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                self.rewrite_statement(then_branch, ctx)?;
                if let Some(else_branch) = else_branch {
                    self.rewrite_statement(else_branch, ctx)?;
                }
            }
            // A local class is a separate scope with its own context.
            Statement::TypeDeclaration(local) => self.rewrite_type(local)?,
            Statement::Expression(_)
            | Statement::Return(_)
            | Statement::VariableDeclaration { .. } => {}
        }
        Ok(())
    }

    /// Runs once all constructors of `decl` have been rewritten.
    fn end_enum(&mut self, decl: &mut EnumDeclaration) {
        let constants = lower_constants(decl, self.env);

        let type_name = self.env.full_name(&decl.binding);
        let support = emit_enum_support(&type_name, constants, self.env, self.options);
        decl.body_declarations.push(BodyDeclaration::Native(support.inner));
        decl.body_declarations.push(BodyDeclaration::Native(support.outer));

        self.stats.enums += 1;
        self.stats.constants += constants;
        debug!(
            target: "jtran::enums",
            enum_type = %type_name,
            constants,
            "lowered enum"
        );
    }
}
