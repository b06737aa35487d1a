use std::fmt;

/// An internal-consistency failure raised by a translation pass.
///
/// These never describe a problem in the user's program. The input is
/// assumed to be fully resolved and type-checked, so any of these means a
/// pass was driven in the wrong order or handed a malformed tree. Drivers
/// report them separately from user diagnostics and abort the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalError {
    /// A constructor visit began while another constructor's implicit
    /// name/ordinal variables were still active.
    ContextAlreadyActive {
        /// The constructor whose visit was being entered.
        constructor: String,
        /// The constructor that still owns the active context.
        active: String,
    },
    /// A forwarding constructor call was rewritten with no enclosing
    /// constructor context to forward from.
    ContextInactive {
        /// The constructor named by the forwarding call.
        call: String,
    },
    /// A constructor rewrite was requested for a method that is not a
    /// constructor of an enum type.
    NotAnEnumConstructor { method: String },
    /// No variable ids were left for the implicit parameters of a
    /// constructor.
    VarIdsExhausted {
        /// The constructor being rewritten.
        constructor: String,
    },
}

impl InternalError {
    /// Short tag used when reporting the failure in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ContextAlreadyActive { .. } => "I0001",
            Self::ContextInactive { .. } => "I0002",
            Self::NotAnEnumConstructor { .. } => "I0003",
            Self::VarIdsExhausted { .. } => "I0004",
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ContextAlreadyActive {
                constructor,
                active,
            } => write!(
                f,
                "entered enum constructor `{constructor}` while the implicit context of `{active}` is still active"
            ),
            Self::ContextInactive { call } => write!(
                f,
                "forwarding call to `{call}` outside of an enum constructor context"
            ),
            Self::NotAnEnumConstructor { method } => {
                write!(f, "`{method}` is not a constructor of an enum type")
            }
            Self::VarIdsExhausted { constructor } => write!(
                f,
                "no variable ids left for the implicit parameters of `{constructor}`"
            ),
        }
    }
}

impl std::error::Error for InternalError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_display() {
        let err = InternalError::ContextAlreadyActive {
            constructor: "Color.<init>".into(),
            active: "Shade.<init>".into(),
        };
        assert_eq!(
            err.to_string(),
            "entered enum constructor `Color.<init>` while the implicit context of `Shade.<init>` is still active"
        );
        assert_eq!(
            InternalError::ContextInactive { call: "this".into() }.to_string(),
            "forwarding call to `this` outside of an enum constructor context"
        );
        assert_eq!(
            InternalError::NotAnEnumConstructor { method: "Point.<init>".into() }.to_string(),
            "`Point.<init>` is not a constructor of an enum type"
        );
        assert_eq!(
            InternalError::VarIdsExhausted { constructor: "Color.<init>".into() }.to_string(),
            "no variable ids left for the implicit parameters of `Color.<init>`"
        );
    }

    #[test]
    fn internal_error_codes_are_distinct() {
        let codes = [
            InternalError::ContextAlreadyActive {
                constructor: String::new(),
                active: String::new(),
            }
            .code(),
            InternalError::ContextInactive { call: String::new() }.code(),
            InternalError::NotAnEnumConstructor { method: String::new() }.code(),
            InternalError::VarIdsExhausted { constructor: String::new() }.code(),
        ];
        assert_eq!(codes, ["I0001", "I0002", "I0003", "I0004"]);
    }
}
