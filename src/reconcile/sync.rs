// Fri Oct 16 2026 - Alex

use crate::reconcile::ReconcileError;
use crate::source::lexer::quote_tag;
use crate::source::{FieldDecl, TypeSpec};
use crate::strategy::note::is_stamped;
use crate::structure::{Struct, PAD_NAME};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PAD_TYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*\]byte").expect("pad type regex"));

/// Rewrites a struct declaration so that it matches `st`: same fields in the
/// same order, explicit pads, tags and generated notes.
pub fn sync_spec(spec: &mut TypeSpec, st: &Struct) -> Result<(), ReconcileError> {
    let name = spec.name.clone();
    let body = spec
        .struct_expr_mut()
        .ok_or_else(|| ReconcileError::NotStruct(name.clone()))?;

    let flat = flatten(&name, std::mem::take(&mut body.fields))?;
    let kept = filter(flat, st);
    let ordered = reorder(kept, st);
    let mut fields = pad_sync(&name, ordered, st)?;
    tag_sync(&mut fields, st);
    note_sync_fields(&mut fields, st);
    body.fields = fields;

    note_sync(&mut spec.doc, &st.doc);
    note_sync(&mut spec.comment, &st.comment);
    spec.modified = true;
    Ok(())
}

/// One declaration per name; a shared doc stays on the first one.
fn flatten(name: &str, decls: Vec<FieldDecl>) -> Result<Vec<FieldDecl>, ReconcileError> {
    let mut out = Vec::with_capacity(decls.len());
    for decl in decls {
        if decl.is_embedded() {
            if decl.name().is_none() {
                return Err(ReconcileError::NotFlat {
                    name: name.to_string(),
                    field: decl.ty_text,
                });
            }
            out.push(decl);
            continue;
        }
        for (i, field_name) in decl.names.iter().enumerate() {
            let mut single = decl.clone();
            single.names = vec![field_name.clone()];
            if i > 0 {
                single.doc.clear();
            }
            out.push(single);
        }
    }
    Ok(out)
}

fn decl_name(decl: &FieldDecl) -> &str {
    decl.name().unwrap_or_default()
}

/// Drops existing pads and fields the result no longer has.
fn filter(decls: Vec<FieldDecl>, st: &Struct) -> Vec<FieldDecl> {
    decls
        .into_iter()
        .filter(|decl| {
            let name = decl_name(decl);
            name != PAD_NAME && st.get_field(name).is_some()
        })
        .collect()
}

fn reorder(mut decls: Vec<FieldDecl>, st: &Struct) -> Vec<FieldDecl> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    for (i, field) in st.fields.iter().enumerate() {
        index.entry(field.name.as_str()).or_insert(i);
    }
    decls.sort_by_key(|decl| index.get(decl_name(decl)).copied().unwrap_or(0));
    decls
}

fn pad_sync(name: &str, decls: Vec<FieldDecl>, st: &Struct) -> Result<Vec<FieldDecl>, ReconcileError> {
    let expected = st.fields.len();
    let found = decls.len() + st.padding_fields().count();
    let mut decls = decls.into_iter();
    let mut out = Vec::with_capacity(expected);
    for field in &st.fields {
        if field.is_padding() {
            if !PAD_TYPE.is_match(&field.type_name) {
                return Err(ReconcileError::UnexpectedPad {
                    name: name.to_string(),
                    ty: field.type_name.clone(),
                });
            }
            out.push(FieldDecl::pad(field.size));
            continue;
        }
        match decls.next() {
            Some(decl) => out.push(decl),
            None => break,
        }
    }
    if out.len() != expected || found != expected {
        return Err(ReconcileError::LengthMismatch {
            name: name.to_string(),
            expected,
            found,
        });
    }
    Ok(out)
}

/// Result tags replace declared ones; an emptied tag drops the literal.
fn tag_sync(decls: &mut [FieldDecl], st: &Struct) {
    for (decl, field) in decls.iter_mut().zip(&st.fields) {
        if field.tag.is_empty() {
            if decl.tag.is_some() && !field.is_padding() {
                decl.tag = None;
            }
        } else {
            decl.tag = Some(quote_tag(&field.tag));
        }
    }
}

fn note_sync_fields(decls: &mut [FieldDecl], st: &Struct) {
    for (decl, field) in decls.iter_mut().zip(&st.fields) {
        note_sync(&mut decl.doc, &field.doc);
        note_sync(&mut decl.comment, &field.comment);
    }
}

/// Replaces generated lines with the ones of the result.
fn note_sync(lines: &mut Vec<String>, notes: &[String]) {
    lines.retain(|line| !is_stamped(line));
    lines.extend(notes.iter().cloned());
}
