// Fri Oct 16 2026 - Alex

use crate::source::PrintOptions;
use crate::walker::{AstWalker, Curation, JsonWalker, Walker, WalkerError, Writer};

pub const WALKER_NAMES: &[&str] = &["json_std", "json_files", "ast_std", "ast_go", "ast_copy"];

/// Suffix of the files `ast_copy` writes.
pub const COPY_SUFFIX: &str = "curated";

/// Walker registry.
pub struct WalkerBuilder {
    curation: Curation,
    print: PrintOptions,
    stream: Writer,
}

impl WalkerBuilder {
    pub fn new(curation: Curation, print: PrintOptions) -> Self {
        Self {
            curation,
            print,
            stream: Writer::stdout(),
        }
    }

    /// Replaces standard output for the `*_std` walkers.
    pub fn with_stream(mut self, stream: Writer) -> Self {
        self.stream = stream;
        self
    }

    pub fn build(&self, name: &str) -> Result<Box<dyn Walker>, WalkerError> {
        let curation = self.curation.clone();
        let walker: Box<dyn Walker> = match name {
            "json_std" => Box::new(JsonWalker::new(curation, self.stream.clone())),
            "json_files" => Box::new(JsonWalker::new(curation, Writer::Origin)),
            "ast_std" => Box::new(AstWalker::new(curation, self.print, self.stream.clone())),
            "ast_go" => Box::new(AstWalker::new(curation, self.print, Writer::Origin)),
            "ast_copy" => Box::new(AstWalker::new(
                curation,
                self.print,
                Writer::Suffix(COPY_SUFFIX.to_string()),
            )),
            _ => return Err(WalkerError::UnknownWalker(name.to_string())),
        };
        Ok(walker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Oracle, Platform};
    use crate::source::{DirParser, PackageParser};
    use std::sync::Arc;

    #[test]
    fn test_registry() {
        let parser: Arc<dyn PackageParser> = Arc::new(DirParser::new(".", false));
        let oracle: Arc<dyn Oracle> = Arc::new(Platform::new("gc", "amd64", &[]).unwrap());
        let builder = WalkerBuilder::new(
            Curation {
                parser,
                oracle,
                deep: false,
                backref: false,
            },
            PrintOptions::default(),
        );
        for name in WALKER_NAMES {
            assert!(builder.build(name).is_ok(), "{}", name);
        }
        assert!(matches!(
            builder.build("xml_std"),
            Err(WalkerError::UnknownWalker(name)) if name == "xml_std"
        ));
    }
}
