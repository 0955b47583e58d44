// Fri Oct 16 2026 - Alex

use crate::walker::WalkerError;
use parking_lot::Mutex;
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type Stream = Arc<Mutex<dyn Write + Send>>;

/// Destination of rendered output.
#[derive(Clone)]
pub enum Writer {
    /// Everything goes to one stream, one whole document at a time.
    Stream(Stream),
    /// Each document replaces the file it was read from.
    Origin,
    /// Each document lands next to its source as `<stem>.<suffix>.<ext>`.
    Suffix(String),
}

impl fmt::Debug for Writer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(_) => write!(f, "Stream"),
            Self::Origin => write!(f, "Origin"),
            Self::Suffix(suffix) => write!(f, "Suffix({:?})", suffix),
        }
    }
}

impl Writer {
    pub fn stdout() -> Self {
        Self::Stream(Arc::new(Mutex::new(io::stdout())))
    }

    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream(_))
    }

    /// File a document read from `path` is written to, `None` for streams.
    pub fn target(&self, path: &Path) -> Option<PathBuf> {
        match self {
            Self::Stream(_) => None,
            Self::Origin => Some(path.to_path_buf()),
            Self::Suffix(suffix) => {
                let stem = path.file_stem()?.to_string_lossy();
                let name = match path.extension() {
                    Some(ext) => format!("{}.{}.{}", stem, suffix, ext.to_string_lossy()),
                    None => format!("{}.{}", stem, suffix),
                };
                Some(path.with_file_name(name))
            }
        }
    }

    pub fn write(&self, path: &Path, content: &str) -> Result<(), WalkerError> {
        match (self, self.target(path)) {
            (Self::Stream(stream), _) => {
                let mut out = stream.lock();
                put(&mut *out, content, true).map_err(|err| WalkerError::io(path, err))
            }
            (_, Some(target)) => {
                let file = File::create(&target).map_err(|err| WalkerError::io(&target, err))?;
                let mut writer = BufWriter::new(file);
                put(&mut writer, content, false).map_err(|err| WalkerError::io(&target, err))
            }
            (_, None) => Ok(()),
        }
    }
}

fn put(out: &mut dyn Write, content: &str, terminate: bool) -> io::Result<()> {
    out.write_all(content.as_bytes())?;
    if terminate && !content.ends_with('\n') {
        out.write_all(b"\n")?;
    }
    out.flush()
}
