//! # Program Image Loading
//!
//! Copies a raw binary image (no header, a plain byte dump) into memory at a
//! caller-chosen offset. A failed load never leaves memory half-written: the
//! image is read and size-checked before the first byte is stored.

use crate::MemoryBus;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Size of the 6502 address space in bytes.
pub const ADDRESS_SPACE: usize = 0x10000;

/// Errors reported while loading a program image.
#[derive(Debug)]
pub enum LoadError {
    /// The image file could not be opened or read.
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// `offset + len` runs past the end of the 64KB address space.
    TooLarge {
        /// Requested load address.
        offset: u16,
        /// Image length in bytes.
        len: usize,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read image {}: {}", path.display(), source)
            }
            LoadError::TooLarge { offset, len } => write!(
                f,
                "image of {} bytes at ${:04X} does not fit in the 64KB address space",
                len, offset
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::TooLarge { .. } => None,
        }
    }
}

/// Copies `bytes` into memory starting at `offset`.
///
/// Returns the number of bytes written.
///
/// # Examples
///
/// ```
/// use core6502::{load_bytes, FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// let written = load_bytes(&mut mem, &[0xA9, 0x05], 0x8000).unwrap();
///
/// assert_eq!(written, 2);
/// assert_eq!(mem.read(0x8001), 0x05);
/// ```
pub fn load_bytes<M: MemoryBus>(
    memory: &mut M,
    bytes: &[u8],
    offset: u16,
) -> Result<usize, LoadError> {
    if offset as usize + bytes.len() > ADDRESS_SPACE {
        return Err(LoadError::TooLarge {
            offset,
            len: bytes.len(),
        });
    }

    for (i, &byte) in bytes.iter().enumerate() {
        memory.write(offset.wrapping_add(i as u16), byte);
    }

    Ok(bytes.len())
}

/// Reads the file at `path` and loads it into memory at `offset`.
///
/// Returns the number of bytes written.
pub fn load_image<M: MemoryBus, P: AsRef<Path>>(
    memory: &mut M,
    path: P,
    offset: u16,
) -> Result<usize, LoadError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let written = load_bytes(memory, &bytes, offset)?;
    log::debug!(
        "loaded {} bytes from {} at ${:04X}",
        written,
        path.display(),
        offset
    );
    Ok(written)
}
