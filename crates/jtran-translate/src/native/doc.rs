//! Layout IR for generated native text.
//!
//! Native items are lowered to a [`Doc`] tree, which fixes line structure
//! and nesting; the printer turns it into text. Keeping layout here means
//! item construction never concatenates raw strings with newlines.

/// A layout node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    /// Literal text. Never contains a newline.
    Text(String),
    /// A newline followed by the current indentation.
    Hardline,
    /// Render the child one indentation level deeper.
    Indent(Box<Doc>),
    /// A sequence rendered in order.
    Concat(Vec<Doc>),
    /// Produces no output.
    Empty,
}

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

pub fn hardline() -> Doc {
    Doc::Hardline
}

pub fn indent(doc: Doc) -> Doc {
    Doc::Indent(Box::new(doc))
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

/// Join `docs` with `separator` between each adjacent pair.
pub fn join(docs: Vec<Doc>, separator: &Doc) -> Doc {
    let mut parts = Vec::with_capacity(docs.len() * 2);
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(separator.clone());
        }
        parts.push(doc);
    }
    Doc::Concat(parts)
}

/// Two hardlines: an empty line between items.
pub fn blank_line() -> Doc {
    concat(vec![hardline(), hardline()])
}

/// `header {`, each of `lines` on its own indented line, then `}`.
pub fn braced(header: impl Into<String>, lines: Vec<Doc>) -> Doc {
    let mut body = Vec::with_capacity(lines.len() * 2);
    for line in lines {
        body.push(hardline());
        body.push(line);
    }
    concat(vec![
        text(format!("{} {{", header.into())),
        indent(concat(body)),
        hardline(),
        text("}"),
    ])
}
