//! Runtime support generated for every lowered enum.
//!
//! Each enum gets two native blocks. The inner block adds class methods
//! (`values`, `valueOfWithNSString:`), `copyWithZone:` and, for Swift
//! interop, `toNSEnum` to the type itself. The outer block adds the file
//! scope functions those methods forward to, plus `fromOrdinal`.
//!
//! Constant storage is the `<Type>_values_` array filled by the class
//! initializer; `<Type>_initialize()` runs that initializer at most once.

use jtran_ast::{NativeDeclaration, TypeEnv};
use jtran_common::TranslateOptions;

use super::doc::{blank_line, concat, hardline, join, Doc};
use super::item::{
    BinaryOp, CFunction, CType, MethodKind, NativeExpr, NativeItem, NativeStmt, ObjcMethod, Param,
};
use super::printer::print;

/// The inner and outer native blocks for one enum type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSupport {
    pub inner: NativeDeclaration,
    pub outer: NativeDeclaration,
}

/// Build the native support blocks for an enum.
///
/// `type_name` is the enum's output name and `constant_count` the number of
/// constants it declares.
pub fn emit_enum_support(
    type_name: &str,
    constant_count: usize,
    env: &TypeEnv,
    options: &TranslateOptions,
) -> EnumSupport {
    let names = SupportNames::new(type_name, env);
    let inner = inner_items(&names, constant_count, options);
    let outer = outer_items(&names, constant_count, options);
    EnumSupport {
        inner: inner.render(options),
        outer: render_outer(&outer, options),
    }
}

fn render_outer(items: &[NativeItem], options: &TranslateOptions) -> NativeDeclaration {
    let header = join(items.iter().map(NativeItem::declaration).collect(), &blank_line());
    let implementation = join(items.iter().map(NativeItem::definition).collect(), &blank_line());
    NativeDeclaration::outer(
        print(&header, options.indent_width),
        print(&implementation, options.indent_width),
    )
}

/// Methods added to the enum type itself.
struct InnerItems {
    /// `values` and `valueOfWithNSString:`.
    lookups: Vec<NativeItem>,
    to_ns_enum: Option<NativeItem>,
    copy_with_zone: NativeItem,
}

impl InnerItems {
    /// The conversion is declared last, directly under `copyWithZone:`, but
    /// defined before it.
    fn render(&self, options: &TranslateOptions) -> NativeDeclaration {
        let mut declarations: Vec<Doc> = self.lookups.iter().map(NativeItem::declaration).collect();
        declarations.push(self.copy_with_zone.declaration());
        let mut header = join(declarations, &blank_line());
        if let Some(conversion) = &self.to_ns_enum {
            header = concat(vec![header, hardline(), conversion.declaration()]);
        }

        let definitions: Vec<Doc> = self
            .lookups
            .iter()
            .chain(&self.to_ns_enum)
            .chain(std::iter::once(&self.copy_with_zone))
            .map(NativeItem::definition)
            .collect();
        let implementation = join(definitions, &blank_line());

        NativeDeclaration::inner(
            print(&header, options.indent_width),
            print(&implementation, options.indent_width),
        )
    }
}

/// Names derived from the enum's output name.
struct SupportNames {
    ty: String,
    native_enum: String,
    exception: String,
}

impl SupportNames {
    fn new(type_name: &str, env: &TypeEnv) -> Self {
        Self {
            ty: type_name.to_string(),
            native_enum: TypeEnv::native_enum_name(type_name),
            exception: env.full_name(env.illegal_argument_exception()),
        }
    }

    fn values_fn(&self) -> String {
        format!("{}_values", self.ty)
    }

    fn value_of_fn(&self) -> String {
        format!("{}_valueOfWithNSString_", self.ty)
    }

    fn from_ordinal_fn(&self) -> String {
        format!("{}_fromOrdinal", self.ty)
    }

    fn storage(&self) -> NativeExpr {
        NativeExpr::ident(format!("{}_values_", self.ty))
    }

    fn initialize(&self) -> NativeStmt {
        NativeStmt::Expr(NativeExpr::call(format!("{}_initialize", self.ty), vec![]))
    }
}

fn inner_items(names: &SupportNames, count: usize, options: &TranslateOptions) -> InnerItems {
    let lookups = vec![
        NativeItem::Method(ObjcMethod {
            kind: MethodKind::Class,
            return_type: CType::object("IOSObjectArray"),
            selector: "values".to_string(),
            param: None,
            body: vec![NativeStmt::Return(NativeExpr::call(names.values_fn(), vec![]))],
        }),
        NativeItem::Method(ObjcMethod {
            kind: MethodKind::Class,
            return_type: CType::object(names.ty.as_str()),
            selector: "valueOfWithNSString".to_string(),
            param: Some(Param::new(CType::object("NSString"), "name")),
            body: vec![NativeStmt::Return(NativeExpr::call(
                names.value_of_fn(),
                vec![NativeExpr::ident("name")],
            ))],
        }),
    ];

    // An empty enum has no native counterpart to convert to.
    let to_ns_enum = (options.swift_friendly && count > 0).then(|| {
        let native = CType::value(names.native_enum.as_str());
        NativeItem::Method(ObjcMethod {
            kind: MethodKind::Instance,
            return_type: native.clone(),
            selector: "toNSEnum".to_string(),
            param: None,
            body: vec![NativeStmt::Return(NativeExpr::cast(
                native,
                NativeExpr::unary_send(NativeExpr::ident("self"), "ordinal"),
            ))],
        })
    });

    // Constants are never deallocated, so a copy is the constant itself and
    // needs no extra retain.
    let copy_with_zone = NativeItem::Method(ObjcMethod {
        kind: MethodKind::Instance,
        return_type: CType::value("id"),
        selector: "copyWithZone".to_string(),
        param: Some(Param::new(CType::object("NSZone"), "zone")),
        body: vec![NativeStmt::Return(NativeExpr::ident("self"))],
    });

    InnerItems {
        lookups,
        to_ns_enum,
        copy_with_zone,
    }
}

fn outer_items(names: &SupportNames, count: usize, options: &TranslateOptions) -> Vec<NativeItem> {
    vec![
        values_function(names, count),
        value_of_function(names, count, options),
        from_ordinal_function(names, count),
    ]
}

fn values_function(names: &SupportNames, count: usize) -> NativeItem {
    let array = NativeExpr::send(
        NativeExpr::ident("IOSObjectArray"),
        vec![
            ("arrayWithObjects", names.storage()),
            ("count", NativeExpr::Int(count)),
            ("type", NativeExpr::call(format!("{}_class_", names.ty), vec![])),
        ],
    );
    NativeItem::Function(CFunction {
        return_type: CType::object("IOSObjectArray"),
        name: names.values_fn(),
        params: vec![],
        body: vec![names.initialize(), NativeStmt::Return(array)],
    })
}

fn value_of_function(names: &SupportNames, count: usize, options: &TranslateOptions) -> NativeItem {
    let mut body = vec![names.initialize()];

    if count > 0 {
        let matches = NativeExpr::send(
            NativeExpr::ident("name"),
            vec![("isEqual", NativeExpr::unary_send(NativeExpr::ident("e"), "name"))],
        );
        body.push(NativeStmt::CountedFor {
            var: "i".to_string(),
            bound: count,
            body: vec![
                NativeStmt::Local {
                    ty: CType::object(names.ty.as_str()),
                    name: "e".to_string(),
                    init: NativeExpr::index(names.storage(), NativeExpr::ident("i")),
                },
                NativeStmt::If {
                    cond: matches,
                    then: vec![NativeStmt::Return(NativeExpr::ident("e"))],
                },
            ],
        });
    }

    let allocated = NativeExpr::unary_send(NativeExpr::ident(names.exception.as_str()), "alloc");
    let mut exception = NativeExpr::send(allocated, vec![("initWithNSString", NativeExpr::ident("name"))]);
    // Under manual reference counting the thrown object must not stay owned
    // by the throw site.
    if options.memory.is_reference_counting() {
        exception = NativeExpr::unary_send(exception, "autorelease");
    }
    body.push(NativeStmt::Throw(exception));
    body.push(NativeStmt::Return(NativeExpr::Nil));

    NativeItem::Function(CFunction {
        return_type: CType::object(names.ty.as_str()),
        name: names.value_of_fn(),
        params: vec![Param::new(CType::object("NSString"), "name")],
        body,
    })
}

fn from_ordinal_function(names: &SupportNames, count: usize) -> NativeItem {
    // The parameter is unsigned: only the upper bound needs checking, and
    // with no constants there is nothing to check against.
    let body = if count == 0 {
        vec![NativeStmt::Return(NativeExpr::Nil)]
    } else {
        let ordinal = NativeExpr::ident("ordinal");
        vec![
            names.initialize(),
            NativeStmt::If {
                cond: NativeExpr::binary(BinaryOp::GreaterEq, ordinal.clone(), NativeExpr::Int(count)),
                then: vec![NativeStmt::Return(NativeExpr::Nil)],
            },
            NativeStmt::Return(NativeExpr::index(names.storage(), ordinal)),
        ]
    };
    NativeItem::Function(CFunction {
        return_type: CType::object(names.ty.as_str()),
        name: names.from_ordinal_fn(),
        params: vec![Param::new(CType::value("NSUInteger"), "ordinal")],
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jtran_common::MemoryManagement;

    fn emit(count: usize, options: &TranslateOptions) -> EnumSupport {
        emit_enum_support("Foo", count, &TypeEnv::new(), options)
    }

    #[test]
    fn placements() {
        let support = emit(2, &TranslateOptions::default());
        assert_eq!(support.inner.placement, jtran_ast::NativePlacement::Inner);
        assert_eq!(support.outer.placement, jtran_ast::NativePlacement::Outer);
    }

    #[test]
    fn reference_counting_autoreleases_thrown_exception() {
        let support = emit(1, &TranslateOptions::default());
        assert!(support.outer.implementation.contains(
            "@throw [[[JavaLangIllegalArgumentException alloc] initWithNSString:name] autorelease];"
        ));
    }

    #[test]
    fn arc_throws_without_release() {
        let options = TranslateOptions {
            memory: MemoryManagement::Arc,
            ..TranslateOptions::default()
        };
        let support = emit(1, &options);
        assert!(support
            .outer
            .implementation
            .contains("@throw [[JavaLangIllegalArgumentException alloc] initWithNSString:name];"));
        assert!(!support.outer.implementation.contains("autorelease"));
    }

    #[test]
    fn swift_conversion_only_with_constants() {
        let options = TranslateOptions {
            swift_friendly: true,
            ..TranslateOptions::default()
        };
        let with = emit(3, &options);
        assert!(with.inner.header.contains("- (Foo_Enum)toNSEnum;"));
        assert!(with.inner.implementation.contains("return (Foo_Enum)[self ordinal];"));

        let empty = emit(0, &options);
        assert!(!empty.inner.header.contains("toNSEnum"));
        assert!(!empty.inner.implementation.contains("toNSEnum"));

        let off = emit(3, &TranslateOptions::default());
        assert!(!off.inner.header.contains("toNSEnum"));
    }

    #[test]
    fn value_of_scans_each_constant() {
        let support = emit(4, &TranslateOptions::default());
        assert!(support.outer.implementation.contains("for (int i = 0; i < 4; i++) {"));
        assert!(support.outer.implementation.contains("Foo *e = Foo_values_[i];"));
    }

    #[test]
    fn from_ordinal_bounds_check_uses_count() {
        let support = emit(4, &TranslateOptions::default());
        assert!(support.outer.implementation.contains("if (ordinal >= 4) {"));
        assert!(support.outer.implementation.contains("return Foo_values_[ordinal];"));
    }

    #[test]
    fn conversion_is_declared_right_after_copy_with_zone() {
        let options = TranslateOptions {
            swift_friendly: true,
            ..TranslateOptions::default()
        };
        let support = emit(2, &options);
        assert!(support
            .inner
            .header
            .ends_with("- (id)copyWithZone:(NSZone *)zone;\n- (Foo_Enum)toNSEnum;\n"));
        assert!(support.inner.implementation.contains(
            "- (Foo_Enum)toNSEnum {\n  return (Foo_Enum)[self ordinal];\n}\n\n- (id)copyWithZone:(NSZone *)zone {"
        ));
    }

    #[test]
    fn inner_methods_forward_to_file_scope_functions() {
        let support = emit(2, &TranslateOptions::default());
        let implementation = &support.inner.implementation;
        assert!(implementation.contains("+ (IOSObjectArray *)values {\n  return Foo_values();\n}"));
        assert!(implementation.contains(
            "+ (Foo *)valueOfWithNSString:(NSString *)name {\n  return Foo_valueOfWithNSString_(name);\n}"
        ));
        assert!(implementation.ends_with("- (id)copyWithZone:(NSZone *)zone {\n  return self;\n}\n"));
    }
}
