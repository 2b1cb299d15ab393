//! Error types for level building

use crate::wad::WadError;
use thiserror::Error;

/// Errors that can occur while building a level from a map
#[derive(Error, Debug)]
pub enum LevelError {
    /// Lump length is not a whole number of records
    #[error("Invalid {lump} size: {size} bytes is not a multiple of {record_size}")]
    InvalidLumpSize {
        /// Lump name
        lump: String,
        /// Lump size in bytes (after any version tag)
        size: usize,
        /// Expected record size
        record_size: usize,
    },

    /// A required structural lump is absent from the map
    #[error("Map {map} has no {lump} lump")]
    MissingLump {
        /// Map name
        map: String,
        /// Missing lump name
        lump: &'static str,
    },

    /// The map cannot be decoded by this builder
    #[error("Unsupported map format for {map}: {format}")]
    UnsupportedFormat {
        /// Map name
        map: String,
        /// Format description
        format: String,
    },

    /// A record refers to an entry beyond its table
    #[error("{source_table} {index} refers to {target} {target_index}, but only {count} exist")]
    IndexOutOfRange {
        /// Table holding the reference
        source_table: &'static str,
        /// Index of the referring record
        index: usize,
        /// Table being referenced
        target: &'static str,
        /// Referenced index
        target_index: usize,
        /// Length of the referenced table
        count: usize,
    },

    /// Archive access failed
    #[error("WAD error: {0}")]
    Wad(#[from] WadError),

    /// `BinRW` parsing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

impl LevelError {
    /// Malformed or unsupported map data
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidLumpSize { .. }
                | Self::MissingLump { .. }
                | Self::UnsupportedFormat { .. }
                | Self::BinRw(_)
                | Self::Wad(WadError::LumpOutOfBounds { .. })
        )
    }

    /// A dangling index between records
    pub fn is_reference_error(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. })
    }

    pub(crate) fn out_of_range(
        source_table: &'static str,
        index: usize,
        target: &'static str,
        target_index: usize,
        count: usize,
    ) -> Self {
        Self::IndexOutOfRange {
            source_table,
            index,
            target,
            target_index,
            count,
        }
    }
}

/// Result type for level operations
pub type Result<T> = std::result::Result<T, LevelError>;
