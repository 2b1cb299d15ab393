//! Bounded reader over a single lump

use std::io::{Cursor, Read, Seek, SeekFrom};

/// Reader scoped to one lump's byte range
///
/// Reads and seeks never leave the lump; reading past its end returns EOF.
#[derive(Debug, Clone)]
pub struct LumpReader<'a> {
    name: &'a str,
    data: Cursor<&'a [u8]>,
}

impl<'a> LumpReader<'a> {
    pub(crate) fn new(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data: Cursor::new(data),
        }
    }

    /// Name of the lump being read
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Total lump size in bytes
    pub fn len(&self) -> usize {
        self.data.get_ref().len()
    }

    /// Whether the lump holds no data
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes left before the end of the lump
    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.data.position() as usize)
    }

    /// The whole lump as a slice
    pub fn as_slice(&self) -> &'a [u8] {
        self.data.get_ref()
    }
}

impl Read for LumpReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.data.read(buf)
    }
}

impl Seek for LumpReader<'_> {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.data.seek(pos)
    }
}
