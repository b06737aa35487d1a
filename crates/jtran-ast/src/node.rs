//! Declaration, statement and expression nodes.
//!
//! Nodes are plain owned trees. Translation passes mutate them in place and
//! hand the same tree on to the printer.

use serde::{Deserialize, Serialize};

use crate::binding::{MethodBinding, VariableBinding};
use crate::types::{Modifiers, TypeBinding};

// ── Declarations ────────────────────────────────────────────────────────

/// One translated source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
    /// First variable id not used by the front end. Passes that invent
    /// variables allocate from here and advance it.
    #[serde(default)]
    pub next_var_id: u32,
}

impl CompilationUnit {
    pub fn new(types: Vec<TypeDeclaration>, next_var_id: u32) -> Self {
        Self {
            source_path: None,
            types,
            next_var_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeDeclaration {
    Class(ClassDeclaration),
    Enum(EnumDeclaration),
}

impl TypeDeclaration {
    pub fn binding(&self) -> &TypeBinding {
        match self {
            TypeDeclaration::Class(c) => &c.binding,
            TypeDeclaration::Enum(e) => &e.binding,
        }
    }

    pub fn body_declarations(&self) -> &[BodyDeclaration] {
        match self {
            TypeDeclaration::Class(c) => &c.body_declarations,
            TypeDeclaration::Enum(e) => &e.body_declarations,
        }
    }

    pub fn body_declarations_mut(&mut self) -> &mut Vec<BodyDeclaration> {
        match self {
            TypeDeclaration::Class(c) => &mut c.body_declarations,
            TypeDeclaration::Enum(e) => &mut e.body_declarations,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDeclaration> {
        match self {
            TypeDeclaration::Enum(e) => Some(e),
            TypeDeclaration::Class(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDeclaration {
    pub binding: TypeBinding,
    #[serde(default)]
    pub body_declarations: Vec<BodyDeclaration>,
    /// Statements run once by the class initializer, in order.
    #[serde(default)]
    pub class_init_statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDeclaration {
    pub binding: TypeBinding,
    /// Constants in declaration order.
    #[serde(default)]
    pub constants: Vec<EnumConstantDeclaration>,
    #[serde(default)]
    pub body_declarations: Vec<BodyDeclaration>,
    #[serde(default)]
    pub class_init_statements: Vec<Statement>,
}

impl EnumDeclaration {
    pub fn new(binding: TypeBinding) -> Self {
        Self {
            binding,
            constants: Vec::new(),
            body_declarations: Vec::new(),
            class_init_statements: Vec::new(),
        }
    }

    pub fn constructors(&self) -> impl Iterator<Item = &MethodDeclaration> {
        self.body_declarations.iter().filter_map(|body| match body {
            BodyDeclaration::Method(m) if m.binding.is_constructor => Some(m),
            _ => None,
        })
    }

    pub fn native_declarations(&self) -> impl Iterator<Item = &NativeDeclaration> {
        self.body_declarations.iter().filter_map(|body| match body {
            BodyDeclaration::Native(n) => Some(n),
            _ => None,
        })
    }
}

/// One constant of an enum, e.g. `RED(255, 0, 0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumConstantDeclaration {
    /// The static field holding the constant; its name is the display name.
    pub variable: VariableBinding,
    /// Constructor selected for the constant's arguments, as written.
    pub constructor: MethodBinding,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

impl EnumConstantDeclaration {
    pub fn name(&self) -> &str {
        &self.variable.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BodyDeclaration {
    Method(MethodDeclaration),
    Field(FieldDeclaration),
    Type(TypeDeclaration),
    Native(NativeDeclaration),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub variable: VariableBinding,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub binding: MethodBinding,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub parameters: Vec<SingleVariableDeclaration>,
    /// `None` for abstract and native methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Block>,
}

impl MethodDeclaration {
    pub fn new(binding: MethodBinding, parameters: Vec<SingleVariableDeclaration>, body: Block) -> Self {
        Self {
            modifiers: binding.modifiers,
            binding,
            parameters,
            body: Some(body),
        }
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleVariableDeclaration {
    pub variable: VariableBinding,
}

impl SingleVariableDeclaration {
    pub fn new(variable: VariableBinding) -> Self {
        Self { variable }
    }
}

/// Which scope a [`NativeDeclaration`] is emitted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativePlacement {
    /// Inside the type's `@interface` / `@implementation`.
    Inner,
    /// At file scope, next to the type.
    Outer,
}

/// Pre-rendered native text, printed verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeDeclaration {
    pub placement: NativePlacement,
    pub header: String,
    pub implementation: String,
}

impl NativeDeclaration {
    pub fn inner(header: String, implementation: String) -> Self {
        Self {
            placement: NativePlacement::Inner,
            header,
            implementation,
        }
    }

    pub fn outer(header: String, implementation: String) -> Self {
        Self {
            placement: NativePlacement::Outer,
            header,
            implementation,
        }
    }
}

// ── Statements ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(Expression),
    Block(Block),
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_branch: Option<Box<Statement>>,
    },
    Return(Option<Expression>),
    VariableDeclaration {
        variable: VariableBinding,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        initializer: Option<Expression>,
    },
    /// A local class declared inside a method body.
    TypeDeclaration(Box<TypeDeclaration>),
    /// `this(...)`
    ConstructorInvocation(ConstructorInvocation),
    /// `super(...)`
    SuperConstructorInvocation(SuperConstructorInvocation),
}

impl Statement {
    pub fn expression(expr: Expression) -> Self {
        Statement::Expression(expr)
    }
}

/// A same-type forwarding call, `this(args)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorInvocation {
    pub method: MethodBinding,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

/// A parent-type forwarding call, `super(args)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperConstructorInvocation {
    pub method: MethodBinding,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

// ── Expressions ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfixOp {
    Plus,
    Minus,
    Times,
    Equals,
    NotEquals,
    Less,
    Greater,
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// A reference to a variable.
    SimpleName(VariableBinding),
    StringLiteral(String),
    NumberLiteral(i64),
    BooleanLiteral(bool),
    NullLiteral,
    Assignment {
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    ClassInstanceCreation(ClassInstanceCreation),
    MethodInvocation {
        method: MethodBinding,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        receiver: Option<Box<Expression>>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    Infix {
        op: InfixOp,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
}

impl Expression {
    pub fn assignment(lhs: Expression, rhs: Expression) -> Self {
        Expression::Assignment {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

/// `new T(args)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassInstanceCreation {
    pub method: MethodBinding,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    /// The created object is retained by its consumer and outlives the
    /// expression that produced it.
    #[serde(default)]
    pub has_retained_result: bool,
}

impl ClassInstanceCreation {
    pub fn new(method: MethodBinding, arguments: Vec<Expression>) -> Self {
        Self {
            method,
            arguments,
            has_retained_result: false,
        }
    }
}
