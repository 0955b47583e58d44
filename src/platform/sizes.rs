// Fri Oct 16 2026 - Alex

/// Word size and max alignment of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StdSizes {
    pub word_size: u64,
    pub max_align: u64,
}

impl StdSizes {
    const fn new(word_size: u64, max_align: u64) -> Self {
        Self {
            word_size,
            max_align,
        }
    }
}

const GC: &[(&str, StdSizes)] = &[
    ("386", StdSizes::new(4, 4)),
    ("amd64", StdSizes::new(8, 8)),
    ("amd64p32", StdSizes::new(4, 8)),
    ("arm", StdSizes::new(4, 4)),
    ("arm64", StdSizes::new(8, 8)),
    ("loong64", StdSizes::new(8, 8)),
    ("mips", StdSizes::new(4, 4)),
    ("mipsle", StdSizes::new(4, 4)),
    ("mips64", StdSizes::new(8, 8)),
    ("mips64le", StdSizes::new(8, 8)),
    ("ppc64", StdSizes::new(8, 8)),
    ("ppc64le", StdSizes::new(8, 8)),
    ("riscv64", StdSizes::new(8, 8)),
    ("s390x", StdSizes::new(8, 8)),
    ("sparc64", StdSizes::new(8, 8)),
    ("wasm", StdSizes::new(8, 8)),
];

const GCCGO: &[(&str, StdSizes)] = &[
    ("386", StdSizes::new(4, 4)),
    ("amd64", StdSizes::new(8, 8)),
    ("amd64p32", StdSizes::new(4, 8)),
    ("arm", StdSizes::new(4, 8)),
    ("arm64", StdSizes::new(8, 8)),
    ("loong64", StdSizes::new(8, 8)),
    ("mips", StdSizes::new(4, 8)),
    ("mipsle", StdSizes::new(4, 8)),
    ("mips64", StdSizes::new(8, 8)),
    ("mips64le", StdSizes::new(8, 8)),
    ("ppc64", StdSizes::new(8, 8)),
    ("ppc64le", StdSizes::new(8, 8)),
    ("riscv64", StdSizes::new(8, 8)),
    ("s390x", StdSizes::new(8, 8)),
    ("sparc64", StdSizes::new(8, 8)),
];

/// Looks up the sizes of a compiler and architecture pair.
pub fn sizes_for(compiler: &str, arch: &str) -> Option<StdSizes> {
    let table = match compiler {
        "gc" => GC,
        "gccgo" => GCCGO,
        _ => return None,
    };
    table
        .iter()
        .find(|(name, _)| *name == arch)
        .map(|(_, sizes)| *sizes)
}

pub fn compilers() -> &'static [&'static str] {
    &["gc", "gccgo"]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pairs() {
        assert_eq!(sizes_for("gc", "amd64"), Some(StdSizes::new(8, 8)));
        assert_eq!(sizes_for("gc", "386"), Some(StdSizes::new(4, 4)));
        assert_eq!(sizes_for("gccgo", "arm"), Some(StdSizes::new(4, 8)));
        assert_eq!(sizes_for("gc", "amd64p32"), Some(StdSizes::new(4, 8)));
    }

    #[test]
    fn test_unknown_pairs() {
        assert_eq!(sizes_for("gccgo", "wasm"), None);
        assert_eq!(sizes_for("tinygo", "amd64"), None);
        assert_eq!(sizes_for("gc", "z80"), None);
    }
}
