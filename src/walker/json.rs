// Fri Oct 16 2026 - Alex

use crate::context::Context;
use crate::strategy::Strategy;
use crate::structure::{Hierarchic, SerializableLayout};
use crate::walker::{Curation, Walker, WalkerError, Writer};
use regex::Regex;
use std::sync::Arc;

/// Name of the file `json_files` writes into the package directory.
pub const JSON_FILE: &str = "layout-curator.json";

/// Emits curated layouts as pretty JSON, ordered by location and identity.
pub struct JsonWalker {
    curation: Curation,
    writer: Writer,
}

impl JsonWalker {
    pub fn new(curation: Curation, writer: Writer) -> Self {
        Self { curation, writer }
    }
}

pub fn to_json(results: &Hierarchic) -> Result<String, WalkerError> {
    let layouts: Vec<SerializableLayout> = results
        .locations()
        .filter_map(|loc| results.cat(loc))
        .flat_map(|cat| cat.iter().map(|(id, st)| SerializableLayout::new(id.as_str(), st)))
        .collect();
    Ok(serde_json::to_string_pretty(&layouts)?)
}

impl Walker for JsonWalker {
    fn visit(&self, ctx: &Context, regex: &Regex, strategy: Arc<dyn Strategy>) -> Result<(), WalkerError> {
        let (pkg, _, results) = self.curation.curate(ctx, regex, strategy)?;
        let json = to_json(&results)?;
        ctx.check()?;
        self.writer.write(&pkg.path.join(JSON_FILE), &json)
    }
}
