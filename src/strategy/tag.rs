// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::{GroupKey, Strategy, StrategyError};
use crate::structure::Struct;
use std::fmt;
use std::ops::Range;

/// Struct tag key holding strategy annotations.
pub const TAG_KEY: &str = "curator";

const GROUP_ANCHOR: &str = "group:";
const DEFAULT_GROUP: &str = "default";

/// One `key:"value"` pair of a struct tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagEntry {
    key: String,
    value: String,
    span: Range<usize>,
}

/// Splits a struct tag into its entries, stopping at the first malformed one
/// the same way struct tag lookup does in the source language.
fn entries(tag: &str) -> Vec<TagEntry> {
    let bytes = tag.as_bytes();
    let mut out = Vec::new();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i] == b' ' {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let start = i;
        while i < bytes.len()
            && bytes[i] > b' '
            && bytes[i] != b':'
            && bytes[i] != b'"'
            && bytes[i] != 0x7f
        {
            i += 1;
        }
        if i == start || i + 1 >= bytes.len() || bytes[i] != b':' || bytes[i + 1] != b'"' {
            break;
        }
        let key = tag[start..i].to_string();
        i += 2;
        let mut value = String::new();
        let mut closed = false;
        let mut chars = tag[i..].char_indices();
        while let Some((at, c)) = chars.next() {
            match c {
                '"' => {
                    i += at + 1;
                    closed = true;
                    break;
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                c => value.push(c),
            }
        }
        if !closed {
            break;
        }
        out.push(TagEntry {
            key,
            value,
            span: start..i,
        });
    }
    out
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Value stored under `key`, if any.
pub fn lookup(tag: &str, key: &str) -> Option<String> {
    entries(tag).into_iter().find(|e| e.key == key).map(|e| e.value)
}

/// Sets `key` to `value`, replacing an existing entry in place or appending.
pub fn set(tag: &str, key: &str, value: &str) -> String {
    let entry = format!("{}:{}", key, quote(value));
    match entries(tag).into_iter().find(|e| e.key == key) {
        Some(found) => format!("{}{}{}", &tag[..found.span.start], entry, &tag[found.span.end..]),
        None if tag.trim().is_empty() => entry,
        None => format!("{} {}", tag.trim_end(), entry),
    }
}

/// Removes `key` and the separator in front of it.
pub fn remove(tag: &str, key: &str) -> String {
    match entries(tag).into_iter().find(|e| e.key == key) {
        Some(found) => {
            let head = tag[..found.span.start].trim_end();
            let tail = tag[found.span.end..].trim_start();
            match (head.is_empty(), tail.is_empty()) {
                (true, _) => tail.to_string(),
                (_, true) => head.to_string(),
                _ => format!("{} {}", head, tail),
            }
        }
        None => tag.to_string(),
    }
}

/// Parsed strategy annotation of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAnnotation {
    pub group: Option<String>,
    pub strategies: Vec<String>,
}

impl TagAnnotation {
    /// Parses `stg,stg` or `group:name;stg,stg`; `-` yields `None`.
    pub fn parse(value: &str) -> Result<Option<Self>, String> {
        let value = value.trim();
        if value == "-" {
            return Ok(None);
        }
        let tokens: Vec<&str> = value.trim_matches(';').split(';').collect();
        let (group, list) = match tokens.as_slice() {
            [list] => (None, *list),
            [group, list] => {
                let name = group
                    .strip_prefix(GROUP_ANCHOR)
                    .ok_or_else(|| format!("named group `{}` anchor is missing", GROUP_ANCHOR))?;
                if name.is_empty() {
                    return Err("named group has an empty name".to_string());
                }
                (Some(name.to_string()), *list)
            }
            _ => return Err("neither a default nor a named group annotation".to_string()),
        };
        let strategies: Vec<String> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if strategies.is_empty() {
            return Err("empty strategies list".to_string());
        }
        Ok(Some(Self { group, strategies }))
    }

    pub fn key(&self) -> GroupKey {
        match &self.group {
            Some(name) => GroupKey::Named(name.clone()),
            None => GroupKey::Default,
        }
    }
}

impl fmt::Display for TagAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(group) = &self.group {
            write!(f, "{}{};", GROUP_ANCHOR, group)?;
        }
        write!(f, "{}", self.strategies.join(","))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMode {
    /// Keeps existing annotations.
    Soft,
    /// Overwrites existing annotations.
    Force,
    /// Soft, with one group per field.
    Discrete,
    /// Force, with one group per field.
    ForceDiscrete,
    /// Deletes annotations.
    Remove,
}

/// Writes the strategy list into every field tag so that a later run of
/// the group strategy can replay it.
#[derive(Debug, Clone)]
pub struct TagWriter {
    mode: TagMode,
    names: Vec<String>,
    group: Option<String>,
}

impl TagWriter {
    pub fn new(mode: TagMode, names: Vec<String>, group: Option<String>) -> Self {
        Self {
            mode,
            names,
            group: group.filter(|g| !g.is_empty()),
        }
    }

    fn annotation(&self, index: usize) -> TagAnnotation {
        let group = match self.mode {
            TagMode::Discrete | TagMode::ForceDiscrete => Some(format!(
                "{}-{}",
                self.group.as_deref().unwrap_or(DEFAULT_GROUP),
                index + 1
            )),
            _ => self.group.clone(),
        };
        TagAnnotation {
            group,
            strategies: self.names.clone(),
        }
    }
}

impl Strategy for TagWriter {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut r = origin.clone();
        for (i, field) in r.fields.iter_mut().enumerate() {
            let existing = lookup(&field.tag, TAG_KEY).is_some();
            field.tag = match self.mode {
                TagMode::Remove => remove(&field.tag, TAG_KEY),
                TagMode::Soft | TagMode::Discrete if existing => continue,
                _ => set(&field.tag, TAG_KEY, &self.annotation(i).to_string()),
            };
        }
        Ok(r)
    }
}
