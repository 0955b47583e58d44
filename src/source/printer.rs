// Fri Oct 16 2026 - Alex

use crate::source::syntax::{FieldDecl, SourceFile, StructExpr, TypeSpec};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    /// Spaces per indentation level when tabs are off.
    pub indent: usize,
    pub use_tabs: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            use_tabs: true,
        }
    }
}

impl PrintOptions {
    fn unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent)
        }
    }
}

/// Prints a file back to text. Declarations that were not modified, and all
/// other text, are emitted exactly as they were read.
pub fn print_file(file: &SourceFile, opts: &PrintOptions) -> String {
    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    for spec in file.specs() {
        if !spec.modified {
            continue;
        }
        if let Some(st) = spec.struct_expr() {
            edits.push((spec.doc_span.clone(), render_doc(spec)));
            edits.push((spec.ty_span.clone(), render_struct(st, opts)));
            edits.push((spec.comment_span.clone(), render_comment(&spec.comment)));
        }
    }
    edits.sort_by_key(|(range, _)| (range.start, range.end));

    let src = &file.content;
    let mut out = String::with_capacity(src.len() + 256);
    let mut cursor = 0usize;
    for (range, text) in edits {
        if range.start < cursor {
            continue;
        }
        out.push_str(&src[cursor..range.start]);
        out.push_str(&text);
        cursor = range.end;
    }
    out.push_str(&src[cursor..]);
    out
}

fn render_doc(spec: &TypeSpec) -> String {
    spec.doc
        .iter()
        .map(|line| format!("{}{}\n", spec.indent, line))
        .collect()
}

fn render_comment(comment: &[String]) -> String {
    if comment.is_empty() {
        String::new()
    } else {
        format!(" {}", comment.join(" "))
    }
}

const TAG_COLUMN: usize = 2;

/// Name, type, tag and comment cells; embedded fields leave the type cell
/// empty.
fn cells(field: &FieldDecl) -> [String; 4] {
    let (head, ty) = if field.names.is_empty() {
        (field.ty_text.clone(), String::new())
    } else {
        (field.names.join(", "), field.ty_text.clone())
    };
    [
        head,
        ty,
        field.tag.clone().unwrap_or_default(),
        field.comment.join(" "),
    ]
}

/// Joins cells so that columns line up inside each run of fields; a field
/// with doc comments starts a new run. Columns empty on every row are
/// dropped, comments always start past the widest tag.
fn align_rows(rows: &[[String; 4]]) -> Vec<String> {
    let kept: Vec<usize> = (0..4)
        .filter(|&col| rows.iter().any(|row| !row[col].is_empty()))
        .collect();
    let rows: Vec<Vec<&str>> = rows
        .iter()
        .map(|row| {
            let mut cells: Vec<&str> = kept.iter().map(|&col| row[col].as_str()).collect();
            while cells.len() > 1 && cells.last().map_or(false, |c| c.is_empty()) {
                cells.pop();
            }
            cells
        })
        .collect();

    let mut widths = vec![0usize; kept.len()];
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i + 1 < row.len() || kept[i] == TAG_COLUMN {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    rows.iter()
        .map(|row| {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                line.push_str(cell);
                if i + 1 < row.len() {
                    let pad = widths[i] - cell.chars().count() + 1;
                    line.push_str(&" ".repeat(pad));
                }
            }
            line
        })
        .collect()
}

pub fn render_struct(st: &StructExpr, opts: &PrintOptions) -> String {
    if st.fields.is_empty() && st.trailing.is_empty() {
        return "struct{}".to_string();
    }
    let field_indent = match &st.field_indent {
        Some(indent) => indent.clone(),
        None => format!("{}{}", st.close_indent, opts.unit()),
    };

    let mut runs: Vec<Vec<&FieldDecl>> = Vec::new();
    for field in &st.fields {
        match runs.last_mut() {
            Some(run) if field.doc.is_empty() => run.push(field),
            _ => runs.push(vec![field]),
        }
    }

    let mut out = String::from("struct {\n");
    for run in runs {
        let rows: Vec<[String; 4]> = run.iter().map(|f| cells(f)).collect();
        for (field, line) in run.iter().zip(align_rows(&rows)) {
            for doc in &field.doc {
                out.push_str(&field_indent);
                out.push_str(doc);
                out.push('\n');
            }
            out.push_str(&field_indent);
            out.push_str(&line);
            out.push('\n');
        }
    }
    for comment in &st.trailing {
        out.push_str(&field_indent);
        out.push_str(comment);
        out.push('\n');
    }
    out.push_str(&st.close_indent);
    out.push('}');
    out
}
