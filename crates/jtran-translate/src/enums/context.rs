//! The implicit name/ordinal variables of the constructor being rewritten.

use jtran_ast::{TypeBinding, TypeEnv, VarIdGen, VariableBinding};
use jtran_common::InternalError;

/// The two parameters injected into one enum constructor.
///
/// Both variables exist together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplicitVars {
    pub name: VariableBinding,
    pub ordinal: VariableBinding,
    /// Display form of the constructor these belong to.
    pub owner: String,
}

impl ImplicitVars {
    pub const NAME_VAR: &'static str = "__name";
    pub const ORDINAL_VAR: &'static str = "__ordinal";

    /// Fresh `__name: NSString` and `__ordinal: int` parameters of a
    /// constructor declared in `declaring_type`.
    pub fn fresh(
        declaring_type: &TypeBinding,
        owner: String,
        env: &TypeEnv,
        ids: &mut VarIdGen,
    ) -> Result<Self, InternalError> {
        let (Some(name_id), Some(ordinal_id)) = (ids.fresh(), ids.fresh()) else {
            return Err(InternalError::VarIdsExhausted { constructor: owner });
        };
        Ok(Self {
            name: VariableBinding::parameter(
                name_id,
                Self::NAME_VAR,
                env.string_type().clone(),
                declaring_type.clone(),
            ),
            ordinal: VariableBinding::parameter(
                ordinal_id,
                Self::ORDINAL_VAR,
                env.int_type().clone(),
                declaring_type.clone(),
            ),
            owner,
        })
    }
}

/// Scope slot for [`ImplicitVars`]: inactive, or active for exactly one
/// constructor. Not reentrant.
#[derive(Debug, Default)]
pub struct ImplicitContext {
    active: Option<ImplicitVars>,
}

impl ImplicitContext {
    /// Activate `vars`. Fails if another constructor's variables are active.
    pub fn enter(&mut self, vars: ImplicitVars) -> Result<(), InternalError> {
        if let Some(active) = &self.active {
            return Err(InternalError::ContextAlreadyActive {
                constructor: vars.owner,
                active: active.owner.clone(),
            });
        }
        self.active = Some(vars);
        Ok(())
    }

    /// Deactivate, returning the variables that were active.
    pub fn leave(&mut self) -> Option<ImplicitVars> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&ImplicitVars> {
        self.active.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
