// Fri Oct 16 2026 - Alex

use crate::platform::Oracle;
use crate::strategy::{
    Annotate, CacheRounding, ExplicitPadding, FalseSharing, Filter, FilterKind, Group, Ignore,
    NoteKind, NoteTarget, Pack, Pipe, Separate, Sort, SortKey, Stamp, Strategy, StrategyError,
    TagMode, TagWriter, Unpack, Void,
};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

pub const PROCESS_TAG_GROUP: &str = "process_tag_group";

static FALSE_SHARING_BYTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^false_sharing_bytes_(\d+)$").expect("false sharing regex"));
static CACHE_ROUNDING_BYTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^cache_rounding_bytes_(\d+)$").expect("cache rounding regex"));
static SEPARATE_BYTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^separate_padding_bytes_(\d+)_(top|bottom)$").expect("separate padding regex"));

/// Every fixed strategy name; `*_bytes_{n}` variants are matched separately.
pub const NAMES: &[&str] = &[
    "memory_pack",
    "memory_unpack",
    "explicit_paddings_system_alignment",
    "explicit_paddings_type_natural",
    "false_sharing_cpu_l1",
    "false_sharing_cpu_l2",
    "false_sharing_cpu_l3",
    "cache_rounding_cpu_l1",
    "cache_rounding_cpu_l2",
    "cache_rounding_cpu_l3",
    "separate_padding_system_alignment_top",
    "separate_padding_system_alignment_bottom",
    "separate_padding_cpu_l1_top",
    "separate_padding_cpu_l2_top",
    "separate_padding_cpu_l3_top",
    "separate_padding_cpu_l1_bottom",
    "separate_padding_cpu_l2_bottom",
    "separate_padding_cpu_l3_bottom",
    PROCESS_TAG_GROUP,
    "add_tag_group_soft",
    "add_tag_group_force",
    "add_tag_group_discrete",
    "add_tag_group_force_discrete",
    "remove_tag_group",
    "fields_annotate_doc",
    "fields_annotate_comment",
    "struct_annotate_doc",
    "struct_annotate_comment",
    "struct_stamp_doc",
    "struct_stamp_comment",
    "name_lexicographical_ascending",
    "name_lexicographical_descending",
    "type_lexicographical_ascending",
    "type_lexicographical_descending",
    "name_length_ascending",
    "name_length_descending",
    "type_length_ascending",
    "type_length_descending",
    "embedded_ascending",
    "embedded_descending",
    "exported_ascending",
    "exported_descending",
    "filter_pads",
    "filter_embedded",
    "filter_not_embedded",
    "filter_exported",
    "filter_not_exported",
    "ignore",
    "void",
];

/// Names that read or write tag annotations and so never get recorded in one.
pub fn is_tag_strategy(name: &str) -> bool {
    name == PROCESS_TAG_GROUP || name == "remove_tag_group" || name.starts_with("add_tag_group_")
}

/// Strategy registry bound to one target platform.
#[derive(Clone)]
pub struct Builder {
    oracle: Arc<dyn Oracle>,
    tag_group: String,
}

impl Builder {
    pub fn new(oracle: Arc<dyn Oracle>, tag_group: impl Into<String>) -> Self {
        Self {
            oracle,
            tag_group: tag_group.into(),
        }
    }

    /// Composes the named strategies into one pipe, in order.
    pub fn build<S: AsRef<str>>(&self, names: &[S]) -> Result<Pipe, StrategyError> {
        let recorded = names
            .iter()
            .map(|n| n.as_ref().to_string())
            .filter(|n| !is_tag_strategy(n))
            .collect_vec();
        let mut pipe = Pipe::new();
        for name in names {
            pipe.push(self.strategy(name.as_ref(), &recorded)?);
        }
        Ok(pipe)
    }

    fn line(&self, level: usize) -> u64 {
        self.oracle.cache_line(level)
    }

    fn tag(&self, mode: TagMode, recorded: &[String]) -> Arc<dyn Strategy> {
        let group = Some(self.tag_group.clone());
        Arc::new(TagWriter::new(mode, recorded.to_vec(), group))
    }

    fn strategy(&self, name: &str, recorded: &[String]) -> Result<Arc<dyn Strategy>, StrategyError> {
        if let Some(caps) = FALSE_SHARING_BYTES.captures(name) {
            return Ok(Arc::new(FalseSharing::new(bytes(name, &caps[1])?)));
        }
        if let Some(caps) = CACHE_ROUNDING_BYTES.captures(name) {
            return Ok(Arc::new(CacheRounding::new(bytes(name, &caps[1])?)));
        }
        if let Some(caps) = SEPARATE_BYTES.captures(name) {
            let size = bytes(name, &caps[1])?;
            return Ok(Arc::new(separate(size, &caps[2] == "top")));
        }

        let strategy: Arc<dyn Strategy> = match name {
            "memory_pack" => Arc::new(Pack),
            "memory_unpack" => Arc::new(Unpack),
            "explicit_paddings_system_alignment" => Arc::new(ExplicitPadding::system(self.oracle.max_align())),
            "explicit_paddings_type_natural" => Arc::new(ExplicitPadding::type_natural()),
            "false_sharing_cpu_l1" => Arc::new(FalseSharing::new(self.line(1))),
            "false_sharing_cpu_l2" => Arc::new(FalseSharing::new(self.line(2))),
            "false_sharing_cpu_l3" => Arc::new(FalseSharing::new(self.line(3))),
            "cache_rounding_cpu_l1" => Arc::new(CacheRounding::new(self.line(1))),
            "cache_rounding_cpu_l2" => Arc::new(CacheRounding::new(self.line(2))),
            "cache_rounding_cpu_l3" => Arc::new(CacheRounding::new(self.line(3))),
            "separate_padding_system_alignment_top" => Arc::new(Separate::top(self.oracle.max_align())),
            "separate_padding_system_alignment_bottom" => {
                Arc::new(Separate::bottom(self.oracle.max_align()))
            }
            "separate_padding_cpu_l1_top" => Arc::new(Separate::top(self.line(1))),
            "separate_padding_cpu_l2_top" => Arc::new(Separate::top(self.line(2))),
            "separate_padding_cpu_l3_top" => Arc::new(Separate::top(self.line(3))),
            "separate_padding_cpu_l1_bottom" => Arc::new(Separate::bottom(self.line(1))),
            "separate_padding_cpu_l2_bottom" => Arc::new(Separate::bottom(self.line(2))),
            "separate_padding_cpu_l3_bottom" => Arc::new(Separate::bottom(self.line(3))),
            PROCESS_TAG_GROUP => Arc::new(Group::new(self.clone())),
            "add_tag_group_soft" => self.tag(TagMode::Soft, recorded),
            "add_tag_group_force" => self.tag(TagMode::Force, recorded),
            "add_tag_group_discrete" => self.tag(TagMode::Discrete, recorded),
            "add_tag_group_force_discrete" => self.tag(TagMode::ForceDiscrete, recorded),
            "remove_tag_group" => self.tag(TagMode::Remove, &[]),
            "fields_annotate_doc" => Arc::new(Annotate::new(NoteTarget::Fields, NoteKind::Doc)),
            "fields_annotate_comment" => Arc::new(Annotate::new(NoteTarget::Fields, NoteKind::Comment)),
            "struct_annotate_doc" => Arc::new(Annotate::new(NoteTarget::Struct, NoteKind::Doc)),
            "struct_annotate_comment" => Arc::new(Annotate::new(NoteTarget::Struct, NoteKind::Comment)),
            "struct_stamp_doc" => Arc::new(Stamp::new(NoteKind::Doc)),
            "struct_stamp_comment" => Arc::new(Stamp::new(NoteKind::Comment)),
            "name_lexicographical_ascending" => Arc::new(Sort::ascending(SortKey::NameLexicographical)),
            "name_lexicographical_descending" => Arc::new(Sort::descending(SortKey::NameLexicographical)),
            "type_lexicographical_ascending" => Arc::new(Sort::ascending(SortKey::TypeLexicographical)),
            "type_lexicographical_descending" => Arc::new(Sort::descending(SortKey::TypeLexicographical)),
            "name_length_ascending" => Arc::new(Sort::ascending(SortKey::NameLength)),
            "name_length_descending" => Arc::new(Sort::descending(SortKey::NameLength)),
            "type_length_ascending" => Arc::new(Sort::ascending(SortKey::TypeLength)),
            "type_length_descending" => Arc::new(Sort::descending(SortKey::TypeLength)),
            "embedded_ascending" => Arc::new(Sort::ascending(SortKey::Embedded)),
            "embedded_descending" => Arc::new(Sort::descending(SortKey::Embedded)),
            "exported_ascending" => Arc::new(Sort::ascending(SortKey::Exported)),
            "exported_descending" => Arc::new(Sort::descending(SortKey::Exported)),
            "filter_pads" => Arc::new(Filter::new(FilterKind::Pads)),
            "filter_embedded" => Arc::new(Filter::new(FilterKind::Embedded)),
            "filter_not_embedded" => Arc::new(Filter::new(FilterKind::NotEmbedded)),
            "filter_exported" => Arc::new(Filter::new(FilterKind::Exported)),
            "filter_not_exported" => Arc::new(Filter::new(FilterKind::NotExported)),
            "ignore" => Arc::new(Ignore),
            "void" => Arc::new(Void),
            _ => return Err(StrategyError::UnknownStrategy(name.to_string())),
        };
        Ok(strategy)
    }
}

fn bytes(name: &str, digits: &str) -> Result<u64, StrategyError> {
    digits
        .parse()
        .map_err(|_| StrategyError::UnknownStrategy(name.to_string()))
}

fn separate(size: u64, top: bool) -> Separate {
    if top {
        Separate::top(size)
    } else {
        Separate::bottom(size)
    }
}
