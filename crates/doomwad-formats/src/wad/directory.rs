//! Lump directory entries and 8-byte name decoding

use binrw::BinRead;
use serde::Serialize;
use std::fmt;

/// Size of one directory entry in bytes
pub const DIRECTORY_ENTRY_SIZE: usize = 16;

/// Maximum length of a lump or texture name
pub const NAME_LENGTH: usize = 8;

/// Decode a zero-padded 8-byte name
///
/// Copies bytes up to the first NUL. Anything after the first NUL is
/// ignored, even when nonzero.
pub fn decode_name(raw: &[u8; NAME_LENGTH]) -> String {
    raw.iter()
        .take_while(|&&b| b != 0)
        .map(|&b| char::from(b))
        .collect()
}

/// Case-insensitive lump name comparison
pub fn names_match(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// One entry of the lump directory
#[derive(Debug, Clone, PartialEq, Eq, BinRead, Serialize)]
#[br(little)]
pub struct Lump {
    /// Byte offset of the lump data
    pub position: u32,

    /// Size of the lump data in bytes
    pub size: u32,

    /// Lump name
    #[br(map = |raw: [u8; NAME_LENGTH]| decode_name(&raw))]
    pub name: String,
}

impl Lump {
    /// Check the lump name, ignoring case
    pub fn is_named(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Byte offset one past the end of the lump data
    pub fn end(&self) -> u64 {
        u64::from(self.position) + u64::from(self.size)
    }

    /// Zero-size lumps carry no data (map labels, markers)
    pub fn is_marker(&self) -> bool {
        self.size == 0
    }
}

impl fmt::Display for Lump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lump {{ name = {}, position = {:08x}, size = {} }}",
            self.name, self.position, self.size
        )
    }
}
