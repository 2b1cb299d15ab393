//! WAD header parsing

use crate::wad::error::{Result, WadError};
use binrw::BinRead;
use serde::Serialize;

/// Size of the WAD header in bytes
pub const HEADER_SIZE: usize = 12;

/// Magic for a full game archive
pub const IWAD_MAGIC: [u8; 4] = *b"IWAD";

/// Magic for a patch archive
pub const PWAD_MAGIC: [u8; 4] = *b"PWAD";

/// Archive flavour identified by the header magic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WadKind {
    /// Internal (game data) WAD
    Iwad,
    /// Patch WAD
    Pwad,
}

impl WadKind {
    /// Identify the archive flavour from its magic
    pub fn from_magic(magic: [u8; 4]) -> Result<Self> {
        match magic {
            IWAD_MAGIC => Ok(Self::Iwad),
            PWAD_MAGIC => Ok(Self::Pwad),
            other => Err(WadError::InvalidMagic(other)),
        }
    }

    /// Magic bytes for this flavour
    pub const fn magic(self) -> [u8; 4] {
        match self {
            Self::Iwad => IWAD_MAGIC,
            Self::Pwad => PWAD_MAGIC,
        }
    }
}

/// WAD header
///
/// - Magic `IWAD` or `PWAD` (4 bytes)
/// - Lump count (4 bytes, little-endian)
/// - Directory offset (4 bytes, little-endian)
#[derive(Debug, Clone, PartialEq, Eq, BinRead)]
#[br(little)]
pub struct WadHeader {
    /// Magic signature
    pub magic: [u8; 4],

    /// Number of entries in the lump directory
    pub lump_count: u32,

    /// Byte offset of the lump directory
    pub directory_offset: u32,
}

impl WadHeader {
    /// Validate the magic and return the archive flavour
    pub fn kind(&self) -> Result<WadKind> {
        WadKind::from_magic(self.magic)
    }

    /// Byte offset one past the end of the directory
    pub fn directory_end(&self) -> u64 {
        u64::from(self.directory_offset)
            + u64::from(self.lump_count) * crate::wad::directory::DIRECTORY_ENTRY_SIZE as u64
    }
}
