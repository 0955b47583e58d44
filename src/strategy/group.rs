// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::builder::PROCESS_TAG_GROUP;
use crate::strategy::tag::{lookup, TagAnnotation, TAG_KEY};
use crate::strategy::{Builder, Ignore, Pipe, Strategy, StrategyError};
use crate::structure::{Field, Struct};
use log::debug;
use rayon::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Field group of a tagged structure, in result order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKey {
    Default,
    Untagged,
    Named(String),
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Untagged => write!(f, "untagged"),
            Self::Named(name) => write!(f, "{:?}", name),
        }
    }
}

struct Partition {
    strategies: Option<Vec<String>>,
    fields: Vec<Field>,
}

/// Replays the strategies recorded in field tags, one pipe per group, and
/// concatenates the group results.
#[derive(Clone)]
pub struct Group {
    builder: Builder,
}

impl Group {
    pub fn new(builder: Builder) -> Self {
        Self { builder }
    }

    fn partition(&self, st: &Struct) -> Result<BTreeMap<GroupKey, Partition>, StrategyError> {
        let mut groups: BTreeMap<GroupKey, Partition> = BTreeMap::new();
        let mut owners: HashMap<&str, GroupKey> = HashMap::new();
        for field in &st.fields {
            let annotation = match lookup(&field.tag, TAG_KEY) {
                Some(value) => TagAnnotation::parse(&value).map_err(|reason| StrategyError::MalformedTag {
                    field: field.name.clone(),
                    tag: field.tag.clone(),
                    reason,
                })?,
                None => None,
            };
            let key = annotation.as_ref().map_or(GroupKey::Untagged, TagAnnotation::key);
            if !field.is_padding() {
                if let Some(first) = owners.get(field.name.as_str()) {
                    if *first != key {
                        return Err(StrategyError::OverlappingGroups {
                            field: field.name.clone(),
                            first: first.to_string(),
                            second: key.to_string(),
                        });
                    }
                }
                owners.insert(&field.name, key.clone());
            }
            let strategies = annotation.map(|a| a.strategies);
            let entry = groups.entry(key.clone()).or_insert_with(|| Partition {
                strategies: strategies.clone(),
                fields: Vec::new(),
            });
            if entry.strategies != strategies {
                return Err(StrategyError::InconsistentGroup {
                    group: key.to_string(),
                    field: field.name.clone(),
                    found: strategies.map(|s| s.join(",")).unwrap_or_default(),
                });
            }
            entry.fields.push(field.clone());
        }
        Ok(groups)
    }

    fn pipe(&self, strategies: &Option<Vec<String>>) -> Result<Pipe, StrategyError> {
        match strategies {
            Some(names) => {
                if let Some(nested) = names.iter().find(|n| n.as_str() == PROCESS_TAG_GROUP) {
                    return Err(StrategyError::NestedGroup(nested.clone()));
                }
                self.builder.build(names)
            }
            None => Ok(Pipe::new().then(Arc::new(Ignore))),
        }
    }
}

impl Strategy for Group {
    fn apply(&self, ctx: &Context, origin: &Struct) -> Result<Struct, StrategyError> {
        ctx.check()?;
        let mut jobs = Vec::new();
        for (key, partition) in self.partition(origin)? {
            let pipe = self.pipe(&partition.strategies)?;
            let mut sub = origin.clone();
            sub.fields = partition.fields;
            jobs.push((key, pipe, sub));
        }
        debug!("struct {} split into {} tag groups", origin.name, jobs.len());

        let gctx = ctx.child();
        let results: Vec<Result<(GroupKey, Struct), StrategyError>> = jobs
            .into_par_iter()
            .map(|(key, pipe, sub)| {
                let applied = pipe.apply(&gctx, &sub);
                if applied.is_err() {
                    gctx.cancel();
                }
                applied.map(|st| (key, st))
            })
            .collect();

        // a failing group cancels its siblings, report the cause not the echo
        let mut failure: Option<StrategyError> = None;
        let mut applied = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(done) => applied.push(done),
                Err(err) => {
                    let echo = matches!(err, StrategyError::Context(_));
                    if failure.as_ref().map_or(true, |f| !echo && matches!(f, StrategyError::Context(_))) {
                        failure = Some(err);
                    }
                }
            }
        }
        if let Some(err) = failure {
            return Err(err);
        }

        let mut r = origin.clone();
        r.fields.clear();
        for (key, st) in applied {
            if key == GroupKey::Default {
                r.doc = st.doc.clone();
                r.comment = st.comment.clone();
            }
            r.fields.extend(st.fields);
        }
        ctx.check()?;
        Ok(r)
    }
}
