// Fri Oct 16 2026 - Alex

use crate::structure::alignment::walk_struct;
use crate::structure::Struct;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub id: String,
    pub name: String,
    pub size: u64,
    pub align: u64,
    pub doc: Vec<String>,
    pub comment: Vec<String>,
    pub fields: Vec<SerializableField>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub offset: u64,
    pub size: u64,
    pub align: u64,
    pub tag: String,
    pub exported: bool,
    pub embedded: bool,
    pub doc: Vec<String>,
    pub comment: Vec<String>,
}

impl SerializableLayout {
    pub fn new(id: impl Into<String>, st: &Struct) -> Self {
        let (size, align) = st.size_align();
        let mut offset = 0u64;
        let mut fields = Vec::with_capacity(st.fields.len());
        walk_struct(st, 0, |pad, field| {
            offset += pad;
            if let Some(f) = field {
                fields.push(SerializableField {
                    name: f.name.clone(),
                    type_name: f.type_name.clone(),
                    offset,
                    size: f.size,
                    align: f.align,
                    tag: f.tag.clone(),
                    exported: f.exported,
                    embedded: f.embedded,
                    doc: f.doc.clone(),
                    comment: f.comment.clone(),
                });
                offset += f.size;
            }
        });
        Self {
            id: id.into(),
            name: st.name.clone(),
            size,
            align,
            doc: st.doc.clone(),
            comment: st.comment.clone(),
            fields,
        }
    }
}
