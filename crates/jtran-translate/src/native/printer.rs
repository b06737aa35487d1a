//! Printer for the native layout IR.

use super::doc::Doc;

/// A command on the printer's work stack.
#[derive(Debug)]
struct PrintCmd<'a> {
    indent: usize,
    doc: &'a Doc,
}

/// Render `doc` with `indent_size` spaces per level.
///
/// Output always ends with exactly one trailing newline unless empty.
pub fn print(doc: &Doc, indent_size: usize) -> String {
    let mut out = String::new();
    let mut stack: Vec<PrintCmd> = vec![PrintCmd { indent: 0, doc }];

    while let Some(cmd) = stack.pop() {
        match cmd.doc {
            Doc::Empty => {}

            Doc::Text(s) => out.push_str(s),

            Doc::Hardline => {
                out.push('\n');
                out.push_str(&" ".repeat(cmd.indent));
            }

            Doc::Indent(child) => stack.push(PrintCmd {
                indent: cmd.indent + indent_size,
                doc: child,
            }),

            Doc::Concat(parts) => {
                // Reverse so the first part is popped first.
                for part in parts.iter().rev() {
                    stack.push(PrintCmd {
                        indent: cmd.indent,
                        doc: part,
                    });
                }
            }
        }
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::doc::*;

    #[test]
    fn text_gets_trailing_newline() {
        assert_eq!(print(&text("x;"), 2), "x;\n");
        assert_eq!(print(&Doc::Empty, 2), "");
    }

    #[test]
    fn nested_braces_indent_per_level() {
        let doc = braced(
            "void f()",
            vec![braced("if (a)", vec![text("return;")]), text("g();")],
        );
        assert_eq!(
            print(&doc, 2),
            "void f() {\n  if (a) {\n    return;\n  }\n  g();\n}\n"
        );
    }

    #[test]
    fn indent_size_is_configurable() {
        let doc = braced("void f()", vec![text("g();")]);
        assert_eq!(print(&doc, 4), "void f() {\n    g();\n}\n");
    }

    #[test]
    fn blank_line_at_top_level_has_no_trailing_spaces() {
        let doc = join(vec![text("a;"), text("b;")], &blank_line());
        assert_eq!(print(&doc, 2), "a;\n\nb;\n");
    }
}
