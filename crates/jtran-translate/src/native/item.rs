//! Typed model of generated Objective-C declarations.
//!
//! An item is a signature plus a list of statements. Items render to a
//! declaration (for the header) and a definition (for the implementation)
//! through the layout IR in [`super::doc`].

use super::doc::{braced, text, Doc};

/// A C or Objective-C type as spelled in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType {
    pub name: String,
    pub pointer: bool,
}

impl CType {
    pub fn object(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: true,
        }
    }

    pub fn value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: false,
        }
    }

    /// Spelling in a cast or method signature: `NSString *`, `NSUInteger`.
    pub fn spelled(&self) -> String {
        if self.pointer {
            format!("{} *", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Spelling in a C declarator: `NSString *name`, `NSUInteger ordinal`.
    pub fn declare(&self, declarator: &str) -> String {
        if self.pointer {
            format!("{} *{}", self.name, declarator)
        } else {
            format!("{} {}", self.name, declarator)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty: CType,
    pub name: String,
}

impl Param {
    pub fn new(ty: CType, name: &str) -> Self {
        Self {
            ty,
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Less,
    GreaterEq,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Less => "<",
            BinaryOp::GreaterEq => ">=",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeExpr {
    Ident(String),
    Int(usize),
    Nil,
    /// `f(args)`
    Call { func: String, args: Vec<NativeExpr> },
    /// `[receiver label:arg label:arg]`, or `[receiver label]` for a
    /// unary message (single part with no argument).
    Send {
        receiver: Box<NativeExpr>,
        parts: Vec<(String, Option<NativeExpr>)>,
    },
    /// `base[index]`
    Index {
        base: Box<NativeExpr>,
        index: Box<NativeExpr>,
    },
    /// `(T)expr`
    Cast { ty: CType, expr: Box<NativeExpr> },
    Binary {
        op: BinaryOp,
        lhs: Box<NativeExpr>,
        rhs: Box<NativeExpr>,
    },
}

impl NativeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        NativeExpr::Ident(name.into())
    }

    pub fn call(func: impl Into<String>, args: Vec<NativeExpr>) -> Self {
        NativeExpr::Call {
            func: func.into(),
            args,
        }
    }

    /// `[receiver selector]`
    pub fn unary_send(receiver: NativeExpr, selector: &str) -> Self {
        NativeExpr::Send {
            receiver: Box::new(receiver),
            parts: vec![(selector.to_string(), None)],
        }
    }

    /// `[receiver l1:a1 l2:a2 ...]`
    pub fn send(receiver: NativeExpr, parts: Vec<(&str, NativeExpr)>) -> Self {
        NativeExpr::Send {
            receiver: Box::new(receiver),
            parts: parts
                .into_iter()
                .map(|(label, arg)| (label.to_string(), Some(arg)))
                .collect(),
        }
    }

    pub fn index(base: NativeExpr, index: NativeExpr) -> Self {
        NativeExpr::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    pub fn cast(ty: CType, expr: NativeExpr) -> Self {
        NativeExpr::Cast {
            ty,
            expr: Box::new(expr),
        }
    }

    pub fn binary(op: BinaryOp, lhs: NativeExpr, rhs: NativeExpr) -> Self {
        NativeExpr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn render(&self) -> String {
        match self {
            NativeExpr::Ident(name) => name.clone(),
            NativeExpr::Int(n) => n.to_string(),
            NativeExpr::Nil => "nil".to_string(),
            NativeExpr::Call { func, args } => {
                let args: Vec<String> = args.iter().map(NativeExpr::render).collect();
                format!("{}({})", func, args.join(", "))
            }
            NativeExpr::Send { receiver, parts } => {
                let parts: Vec<String> = parts
                    .iter()
                    .map(|(label, arg)| match arg {
                        Some(arg) => format!("{}:{}", label, arg.render()),
                        None => label.clone(),
                    })
                    .collect();
                format!("[{} {}]", receiver.render(), parts.join(" "))
            }
            NativeExpr::Index { base, index } => format!("{}[{}]", base.render(), index.render()),
            NativeExpr::Cast { ty, expr } => format!("({}){}", ty.spelled(), expr.render()),
            NativeExpr::Binary { op, lhs, rhs } => {
                format!("{} {} {}", lhs.render(), op.symbol(), rhs.render())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeStmt {
    Expr(NativeExpr),
    Return(NativeExpr),
    Throw(NativeExpr),
    /// `T *name = init;`
    Local {
        ty: CType,
        name: String,
        init: NativeExpr,
    },
    If {
        cond: NativeExpr,
        then: Vec<NativeStmt>,
    },
    /// `for (int var = 0; var < bound; var++)`
    CountedFor {
        var: String,
        bound: usize,
        body: Vec<NativeStmt>,
    },
}

impl NativeStmt {
    pub fn to_doc(&self) -> Doc {
        match self {
            NativeStmt::Expr(e) => text(format!("{};", e.render())),
            NativeStmt::Return(e) => text(format!("return {};", e.render())),
            NativeStmt::Throw(e) => text(format!("@throw {};", e.render())),
            NativeStmt::Local { ty, name, init } => {
                text(format!("{} = {};", ty.declare(name), init.render()))
            }
            NativeStmt::If { cond, then } => braced(
                format!("if ({})", cond.render()),
                then.iter().map(NativeStmt::to_doc).collect(),
            ),
            NativeStmt::CountedFor { var, bound, body } => {
                let cond = NativeExpr::binary(
                    BinaryOp::Less,
                    NativeExpr::ident(var.as_str()),
                    NativeExpr::Int(*bound),
                );
                braced(
                    format!("for (int {var} = 0; {}; {var}++)", cond.render()),
                    body.iter().map(NativeStmt::to_doc).collect(),
                )
            }
        }
    }
}

/// Whether an Objective-C method is sent to the class or to instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Class,
    Instance,
}

/// A generated Objective-C method taking at most one argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjcMethod {
    pub kind: MethodKind,
    pub return_type: CType,
    pub selector: String,
    pub param: Option<Param>,
    pub body: Vec<NativeStmt>,
}

/// A generated C function at file scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CFunction {
    pub return_type: CType,
    pub name: String,
    pub params: Vec<Param>,
    pub body: Vec<NativeStmt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeItem {
    Method(ObjcMethod),
    Function(CFunction),
}

impl NativeItem {
    pub fn name(&self) -> &str {
        match self {
            NativeItem::Method(m) => &m.selector,
            NativeItem::Function(f) => &f.name,
        }
    }

    fn signature(&self) -> String {
        match self {
            NativeItem::Method(m) => {
                let sign = match m.kind {
                    MethodKind::Class => '+',
                    MethodKind::Instance => '-',
                };
                let mut sig = format!("{} ({}){}", sign, m.return_type.spelled(), m.selector);
                if let Some(param) = &m.param {
                    sig.push_str(&format!(":({}){}", param.ty.spelled(), param.name));
                }
                sig
            }
            NativeItem::Function(f) => {
                let params: Vec<String> =
                    f.params.iter().map(|p| p.ty.declare(&p.name)).collect();
                let declarator = format!("{}({})", f.name, params.join(", "));
                f.return_type.declare(&declarator)
            }
        }
    }

    /// Header form: `+ (T *)sel;` or `FOUNDATION_EXPORT T *f(args);`.
    pub fn declaration(&self) -> Doc {
        match self {
            NativeItem::Method(_) => text(format!("{};", self.signature())),
            NativeItem::Function(_) => text(format!("FOUNDATION_EXPORT {};", self.signature())),
        }
    }

    /// Implementation form: the signature followed by the braced body.
    pub fn definition(&self) -> Doc {
        let body = match self {
            NativeItem::Method(m) => &m.body,
            NativeItem::Function(f) => &f.body,
        };
        braced(self.signature(), body.iter().map(NativeStmt::to_doc).collect())
    }
}
