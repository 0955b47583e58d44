// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{Strategy, StrategyError};
use crate::structure::Struct;

/// Marker carried by every generated annotation line.
pub const STAMP: &str = "layout-curator";

const FIELD_NOTE: &str = "// field size:";
const STRUCT_NOTE: &str = "// struct size:";
const STAMP_NOTE: &str = "// struct has been auto curated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Doc,
    Comment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteTarget {
    Fields,
    Struct,
}

/// Size annotations, either on every field or once on the structure.
#[derive(Debug, Clone, Copy)]
pub struct Annotate {
    target: NoteTarget,
    kind: NoteKind,
}

/// Marks the structure as processed.
#[derive(Debug, Clone, Copy)]
pub struct Stamp {
    kind: NoteKind,
}

/// Whether a line was generated by this tool.
pub fn is_stamped(line: &str) -> bool {
    line.contains(STAMP)
}

/// Replaces previously generated lines of one kind with `note`, keeping the
/// position of the first one.
fn renote(lines: &mut Vec<String>, prefix: &str, note: String) {
    let generated = |line: &String| line.starts_with(prefix) && is_stamped(line);
    match lines.iter().position(generated) {
        Some(at) => {
            lines.retain(|line| !generated(line));
            lines.insert(at, note);
        }
        None => lines.push(note),
    }
}

impl Annotate {
    pub fn new(target: NoteTarget, kind: NoteKind) -> Self {
        Self { target, kind }
    }
}

impl Stamp {
    pub fn new(kind: NoteKind) -> Self {
        Self { kind }
    }
}

impl Strategy for Annotate {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        match self.target {
            NoteTarget::Fields => {
                for field in r.fields.iter_mut() {
                    let note = format!(
                        "{} {} bytes; field align: {} bytes; - {}",
                        FIELD_NOTE, field.size, field.align, STAMP
                    );
                    let lines = match self.kind {
                        NoteKind::Doc => &mut field.doc,
                        NoteKind::Comment => &mut field.comment,
                    };
                    renote(lines, FIELD_NOTE, note);
                }
            }
            NoteTarget::Struct => {
                let note = format!(
                    "{} {} bytes; struct align: {} bytes; struct aligned size: {} bytes; - {}",
                    STRUCT_NOTE,
                    r.fields_size(),
                    r.align(),
                    r.size_align().0,
                    STAMP
                );
                let lines = match self.kind {
                    NoteKind::Doc => &mut r.doc,
                    NoteKind::Comment => &mut r.comment,
                };
                renote(lines, STRUCT_NOTE, note);
            }
        }
        Ok(r)
    }
}

impl Strategy for Stamp {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        let note = format!("{} - {}", STAMP_NOTE, STAMP);
        let lines = match self.kind {
            NoteKind::Doc => &mut r.doc,
            NoteKind::Comment => &mut r.comment,
        };
        renote(lines, STAMP_NOTE, note);
        Ok(r)
    }
}
