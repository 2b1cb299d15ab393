//! In-memory WAD image builder

use crate::fixtures::{GlFixture, MapFixture};
use crate::records::name_bytes;
use std::io::Write;
use tempfile::NamedTempFile;

/// Builds a WAD image lump by lump
///
/// Lump data is laid out after the header in insertion order, followed by
/// the directory.
#[derive(Debug, Clone)]
pub struct WadBuilder {
    magic: [u8; 4],
    lumps: Vec<(String, Vec<u8>)>,
}

impl WadBuilder {
    /// Empty IWAD
    pub fn iwad() -> Self {
        Self::with_magic(*b"IWAD")
    }

    /// Empty PWAD
    pub fn pwad() -> Self {
        Self::with_magic(*b"PWAD")
    }

    /// Empty archive with an arbitrary magic
    pub fn with_magic(magic: [u8; 4]) -> Self {
        Self {
            magic,
            lumps: Vec::new(),
        }
    }

    /// Append a lump
    #[must_use]
    pub fn lump(mut self, name: impl Into<String>, data: Vec<u8>) -> Self {
        self.lumps.push((name.into(), data));
        self
    }

    /// Append a zero-size lump
    #[must_use]
    pub fn marker(self, name: impl Into<String>) -> Self {
        self.lump(name, Vec::new())
    }

    /// Append several lumps
    #[must_use]
    pub fn lumps(mut self, lumps: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        self.lumps.extend(lumps);
        self
    }

    /// Append a map label and its structural lumps
    #[must_use]
    pub fn map(self, name: &str, fixture: &MapFixture) -> Self {
        self.marker(name).lumps(fixture.lumps())
    }

    /// Append a `GL_` label for `map_name` and the companion lumps
    #[must_use]
    pub fn gl_nodes(self, map_name: &str, fixture: &GlFixture) -> Self {
        let prefix: String = map_name.chars().take(5).collect();
        self.marker(format!("GL_{prefix}")).lumps(fixture.lumps())
    }

    /// Serialize the archive
    pub fn build(&self) -> Vec<u8> {
        let data_size: usize = self.lumps.iter().map(|(_, data)| data.len()).sum();
        let directory_offset = 12 + data_size;

        let mut out = Vec::with_capacity(directory_offset + self.lumps.len() * 16);
        out.extend_from_slice(&self.magic);
        out.extend_from_slice(&(self.lumps.len() as u32).to_le_bytes());
        out.extend_from_slice(&(directory_offset as u32).to_le_bytes());

        let mut positions = Vec::with_capacity(self.lumps.len());
        for (_, data) in &self.lumps {
            positions.push(out.len() as u32);
            out.extend_from_slice(data);
        }

        for ((name, data), position) in self.lumps.iter().zip(positions) {
            out.extend_from_slice(&position.to_le_bytes());
            out.extend_from_slice(&(data.len() as u32).to_le_bytes());
            out.extend_from_slice(&name_bytes(name));
        }

        out
    }
}

/// Write a WAD image to a temporary `.wad` file
pub fn write_temp_wad(data: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".wad")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(data).expect("Failed to write WAD image");
    file.flush().expect("Failed to flush WAD image");
    file
}
