// Fri Oct 16 2026 - Alex

use std::fmt;
use std::sync::Arc;

/// Compact position inside a [`FileSet`], zero is "no position".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub usize);

impl Pos {
    pub const NONE: Pos = Pos(0);

    pub fn is_valid(self) -> bool {
        self.0 > 0
    }
}

/// Resolved file, line and column of a position, line and column are 1 based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub filename: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filename.is_empty() {
            write!(f, "{}:{}", self.line, self.column)
        } else {
            write!(f, "{}:{}:{}", self.filename, self.line, self.column)
        }
    }
}

/// One file registered in a [`FileSet`] with its line table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    name: String,
    base: usize,
    size: usize,
    lines: Vec<usize>,
}

impl FileInfo {
    fn new(name: String, base: usize, content: &str) -> Self {
        let mut lines = vec![0];
        lines.extend(
            content
                .bytes()
                .enumerate()
                .filter(|(_, b)| *b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            name,
            base,
            size: content.len(),
            lines,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn pos(&self, offset: usize) -> Pos {
        Pos(self.base + offset.min(self.size))
    }

    pub fn offset(&self, pos: Pos) -> usize {
        pos.0.saturating_sub(self.base).min(self.size)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 >= self.base && pos.0 <= self.base + self.size
    }

    /// 1 based line and column of a byte offset.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let idx = match self.lines.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        (idx + 1, offset - self.lines[idx] + 1)
    }

    pub fn position(&self, pos: Pos) -> Position {
        let offset = self.offset(pos);
        let (line, column) = self.line_col(offset);
        Position {
            filename: self.name.clone(),
            offset,
            line,
            column,
        }
    }
}

/// Set of files sharing one position space.
///
/// Every file occupies the range `[base, base + size]`; the next file starts
/// one past it, so positions of different files never collide. A set can
/// start at an arbitrary base to keep several sets disjoint.
#[derive(Debug, Clone)]
pub struct FileSet {
    base: usize,
    files: Vec<Arc<FileInfo>>,
}

impl Default for FileSet {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSet {
    pub fn new() -> Self {
        Self::with_base(1)
    }

    pub fn with_base(base: usize) -> Self {
        Self {
            base: base.max(1),
            files: Vec::new(),
        }
    }

    /// Next free base, a set created with it is disjoint from this one.
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn add_file(&mut self, name: impl Into<String>, content: &str) -> Arc<FileInfo> {
        let info = Arc::new(FileInfo::new(name.into(), self.base, content));
        self.base += content.len() + 1;
        self.files.push(Arc::clone(&info));
        info
    }

    pub fn files(&self) -> &[Arc<FileInfo>] {
        &self.files
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.file(pos).is_some()
    }

    pub fn file(&self, pos: Pos) -> Option<&Arc<FileInfo>> {
        if !pos.is_valid() {
            return None;
        }
        let idx = self.files.partition_point(|f| f.base <= pos.0);
        let file = self.files.get(idx.checked_sub(1)?)?;
        file.contains(pos).then_some(file)
    }

    pub fn position(&self, pos: Pos) -> Option<Position> {
        self.file(pos).map(|file| file.position(pos))
    }
}
