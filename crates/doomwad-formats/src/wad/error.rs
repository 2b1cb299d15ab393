//! Error types for WAD archive access

use thiserror::Error;

/// Errors that can occur when opening or reading a WAD archive
#[derive(Error, Debug)]
pub enum WadError {
    /// The first four bytes are neither `IWAD` nor `PWAD`
    #[error("Invalid WAD magic: expected 'IWAD' or 'PWAD', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// File too small to hold the 12-byte header
    #[error("Truncated WAD header: {size} bytes")]
    TruncatedHeader {
        /// Actual file size in bytes
        size: usize,
    },

    /// The lump directory extends past the end of the file
    #[error(
        "Lump directory out of bounds: offset={offset}, lumps={lump_count}, file size={file_size}"
    )]
    DirectoryOutOfBounds {
        /// Directory offset from the header
        offset: u32,
        /// Lump count from the header
        lump_count: u32,
        /// Actual file size in bytes
        file_size: usize,
    },

    /// Lump index beyond the directory
    #[error("Lump index {index} out of bounds ({count} lumps)")]
    LumpIndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of lumps in the directory
        count: usize,
    },

    /// Lump byte range extends past the end of the file
    #[error("Lump {name} out of bounds: position={position}, size={size}, file size={file_size}")]
    LumpOutOfBounds {
        /// Lump name
        name: String,
        /// Lump position from the directory
        position: u32,
        /// Lump size from the directory
        size: u32,
        /// Actual file size in bytes
        file_size: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `BinRW` parsing error
    #[error("Binary format error: {0}")]
    BinRw(#[from] binrw::Error),
}

/// Type alias for WAD archive operation results
pub type Result<T> = std::result::Result<T, WadError>;
