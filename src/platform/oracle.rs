// Fri Oct 16 2026 - Alex

use crate::platform::sizes::{sizes_for, StdSizes};
use crate::platform::PlatformError;
use crate::scope::{BasicKind, Type};
use crate::structure::align_up;

/// Cache line size used for levels that were not configured.
pub const DEFAULT_CACHE_LINE: u64 = 64;

/// Read only layout facts of the target platform.
pub trait Oracle: Send + Sync {
    fn word_size(&self) -> u64;
    fn max_align(&self) -> u64;
    /// Cache line size for a 1 based level, never fails.
    fn cache_line(&self, level: usize) -> u64;
    fn type_name(&self, ty: &Type) -> String;
    fn type_size(&self, ty: &Type) -> u64;
    fn type_align(&self, ty: &Type) -> u64;
}

#[derive(Debug, Clone)]
pub struct Platform {
    compiler: String,
    arch: String,
    sizes: StdSizes,
    cache_lines: Vec<u64>,
}

impl Platform {
    /// Builds the oracle for a compiler and architecture pair. Non positive
    /// cache lines are kept as zero, which disables rounding for that level.
    pub fn new(compiler: &str, arch: &str, cache_lines: &[i64]) -> Result<Self, PlatformError> {
        let sizes = sizes_for(compiler, arch).ok_or_else(|| PlatformError::Unsupported {
            compiler: compiler.to_string(),
            arch: arch.to_string(),
        })?;
        if cache_lines.len() > 3 {
            return Err(PlatformError::TooManyCacheLines(cache_lines.len()));
        }
        Ok(Self {
            compiler: compiler.to_string(),
            arch: arch.to_string(),
            sizes,
            cache_lines: cache_lines.iter().map(|&line| line.max(0) as u64).collect(),
        })
    }

    pub fn compiler(&self) -> &str {
        &self.compiler
    }

    pub fn arch(&self) -> &str {
        &self.arch
    }

    fn cap(&self, align: u64) -> u64 {
        align.min(self.sizes.max_align).max(1)
    }

    fn basic_size(&self, kind: BasicKind) -> u64 {
        match kind {
            BasicKind::String => 2 * self.sizes.word_size,
            other => other.fixed_size().unwrap_or(self.sizes.word_size),
        }
    }
}

impl Oracle for Platform {
    fn word_size(&self) -> u64 {
        self.sizes.word_size
    }

    fn max_align(&self) -> u64 {
        self.sizes.max_align
    }

    fn cache_line(&self, level: usize) -> u64 {
        level
            .checked_sub(1)
            .and_then(|idx| self.cache_lines.get(idx))
            .copied()
            .unwrap_or(DEFAULT_CACHE_LINE)
    }

    fn type_name(&self, ty: &Type) -> String {
        ty.to_string()
    }

    fn type_size(&self, ty: &Type) -> u64 {
        let word = self.sizes.word_size;
        match ty {
            Type::Basic(kind) => self.basic_size(*kind),
            Type::Pointer(_) | Type::Map(_, _) | Type::Chan(_) | Type::Func(_) | Type::Foreign(_) => word,
            Type::Interface(_) => 2 * word,
            Type::Slice(_) => 3 * word,
            Type::Array(len, elem) => {
                if *len == 0 {
                    return 0;
                }
                let size = self.type_size(elem);
                align_up(size, self.type_align(elem)) * (len - 1) + size
            }
            Type::Struct(st) => {
                let mut offset = 0u64;
                let mut max = 1u64;
                for field in &st.fields {
                    let align = self.type_align(&field.ty);
                    max = max.max(align);
                    offset = align_up(offset, align) + self.type_size(&field.ty);
                }
                align_up(offset, max)
            }
            Type::Named(named) => self.type_size(&named.underlying),
        }
    }

    fn type_align(&self, ty: &Type) -> u64 {
        let word = self.sizes.word_size;
        let align = match ty {
            Type::Basic(kind) if kind.is_complex() => self.basic_size(*kind) / 2,
            Type::Basic(BasicKind::String) => word,
            Type::Basic(kind) => self.basic_size(*kind),
            Type::Pointer(_)
            | Type::Map(_, _)
            | Type::Chan(_)
            | Type::Func(_)
            | Type::Foreign(_)
            | Type::Interface(_)
            | Type::Slice(_) => word,
            Type::Array(_, elem) => self.type_align(elem),
            Type::Struct(st) => st
                .fields
                .iter()
                .map(|field| self.type_align(&field.ty))
                .max()
                .unwrap_or(1),
            Type::Named(named) => self.type_align(&named.underlying),
        };
        self.cap(align)
    }
}
