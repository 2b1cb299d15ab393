//! WAD archive container support
//!
//! A WAD is a flat sequence of named byte blobs ("lumps") described by a
//! directory at the end of the file:
//!
//! - **Header** (12 bytes): magic `IWAD` or `PWAD`, lump count, directory offset
//! - **Lump data**: raw bytes, addressed only through the directory
//! - **Directory**: 16-byte entries of position, size, and 8-byte name
//!
//! All multi-byte fields are little-endian. Names are compared without
//! regard to case, and lookups that find nothing return `None` rather than
//! an error so optional lumps can be probed cheaply.
//!
//! ```rust,no_run
//! use doomwad_formats::wad::WadArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let archive = WadArchive::open("doom2.wad")?;
//! if let Some(playpal) = archive.read_lump_by_name("PLAYPAL")? {
//!     println!("PLAYPAL: {} bytes", playpal.len());
//! }
//! for map in archive.maps() {
//!     println!("{map}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod archive;
pub mod directory;
pub mod error;
pub mod header;
pub mod reader;

pub use archive::{ArchiveOptions, WadArchive};
pub use directory::{Lump, decode_name, names_match};
pub use error::{Result, WadError};
pub use header::{WadHeader, WadKind};
pub use reader::LumpReader;
